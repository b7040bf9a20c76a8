//! Actor template loader.

use std::path::Path;

use anyhow::Context;
use combat_core::ActorTemplate;
use serde::Deserialize;

use crate::loaders::{LoadResult, read_file};

/// Top-level layout of `actors.ron`.
#[derive(Debug, Clone, Deserialize)]
struct ActorFile {
    templates: Vec<ActorTemplate>,
}

/// Loader for hostile actor templates.
pub struct ActorLoader;

impl ActorLoader {
    pub fn load(path: &Path) -> LoadResult<Vec<ActorTemplate>> {
        let content = read_file(path)?;
        Self::parse(&content).with_context(|| format!("in {}", path.display()))
    }

    pub fn parse(content: &str) -> LoadResult<Vec<ActorTemplate>> {
        let file: ActorFile = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse actor catalog RON: {}", e))?;
        Ok(file.templates)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn optional_fields_default() {
        let templates = ActorLoader::parse(
            r#"(templates: [(id: "rat", name: "Rat", level: 1, health: 10, attack: 3, defense: 0)])"#,
        )
        .expect("valid RON");

        let rat = &templates[0];
        assert_eq!(rat.mana, 0);
        assert!(rat.abilities.is_empty());
        assert!(rat.loot.items.is_empty());
        assert!(!rat.boss);
    }
}
