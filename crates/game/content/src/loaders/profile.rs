//! Player profile loader.

use std::path::Path;

use anyhow::Context;
use combat_core::PlayerProfile;

use crate::loaders::{LoadResult, read_file};

/// Loader for the persisted player stat block.
pub struct ProfileLoader;

impl ProfileLoader {
    pub fn load(path: &Path) -> LoadResult<PlayerProfile> {
        let content = read_file(path)?;
        Self::parse(&content).with_context(|| format!("in {}", path.display()))
    }

    pub fn parse(content: &str) -> LoadResult<PlayerProfile> {
        ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse player profile RON: {}", e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn inventory_reads_as_map() {
        let profile = ProfileLoader::parse(
            r#"(
                name: "Hero",
                level: 2,
                base_health: 60,
                base_attack: 9,
                base_defense: 2,
                inventory: {"potion": 2},
            )"#,
        )
        .expect("valid RON");

        assert_eq!(profile.inventory.get("potion"), Some(&2));
        assert_eq!(profile.max_mana, 0);
        assert!(profile.abilities.is_empty());
    }
}
