//! Combat configuration loader.

use std::path::Path;

use anyhow::Context;
use combat_core::CombatConfig;

use crate::loaders::{LoadResult, read_file};

/// Loader for combat balance tables from TOML files.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Reads `path`. Keys missing from the file keep their defaults.
    pub fn load(path: &Path) -> LoadResult<CombatConfig> {
        let content = read_file(path)?;
        Self::parse(&content).with_context(|| format!("in {}", path.display()))
    }

    pub fn parse(content: &str) -> LoadResult<CombatConfig> {
        let config: CombatConfig = toml::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse config TOML: {}", e))?;

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_file_keeps_defaults() {
        let config = ConfigLoader::parse(
            r#"
            enemy_ability_chance = 0.5

            [boss]
            health_factor = 2.0
            "#,
        )
        .expect("valid TOML");

        let defaults = CombatConfig::default();
        assert_eq!(config.enemy_ability_chance, 0.5);
        assert_eq!(config.boss.health_factor, 2.0);
        assert_eq!(config.boss.attack_factor, defaults.boss.attack_factor);
        assert_eq!(config.retreat, defaults.retreat);
        assert_eq!(config.basic_crit_chance, defaults.basic_crit_chance);
    }
}
