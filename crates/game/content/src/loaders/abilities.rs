//! Ability catalog loader.

use std::path::Path;

use anyhow::Context;
use combat_core::AbilityDefinition;
use serde::Deserialize;

use crate::loaders::{LoadResult, read_file};

/// Top-level layout of `abilities.ron`.
#[derive(Debug, Clone, Deserialize)]
struct AbilityFile {
    abilities: Vec<AbilityDefinition>,
}

/// Loader for the ability catalog.
pub struct AbilityLoader;

impl AbilityLoader {
    pub fn load(path: &Path) -> LoadResult<Vec<AbilityDefinition>> {
        let content = read_file(path)?;
        Self::parse(&content).with_context(|| format!("in {}", path.display()))
    }

    pub fn parse(content: &str) -> LoadResult<Vec<AbilityDefinition>> {
        let file: AbilityFile = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse ability catalog RON: {}", e))?;
        Ok(file.abilities)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use combat_core::{AbilityKind, SpecialEffect, StatusKind};

    #[test]
    fn parses_payload_variants() {
        let abilities = AbilityLoader::parse(
            r#"(
                abilities: [
                    (id: "jab", name: "Jab", kind: Attack),
                    (
                        id: "bite",
                        name: "Bite",
                        kind: Attack,
                        damage_multiplier: Some(0.9),
                        status_effect: Some((kind: poison, chance: Some(0.5), duration: 3, damage: Some(2))),
                    ),
                    (id: "dodge", name: "Dodge", kind: Special(Dodge(chance: 0.4, duration: 2))),
                ],
            )"#,
        )
        .expect("valid RON");

        assert_eq!(abilities.len(), 3);
        assert_eq!(abilities[0].hits, 1);
        assert_eq!(abilities[0].damage_multiplier, None);

        let status = abilities[1].status_effect.as_ref().expect("status payload");
        assert_eq!(status.kind, StatusKind::Poison);
        assert_eq!(status.damage, Some(2));

        assert_eq!(
            abilities[2].kind,
            AbilityKind::Special(SpecialEffect::Dodge {
                chance: 0.4,
                duration: 2
            })
        );
    }

    #[test]
    fn rejects_unknown_kind() {
        let result = AbilityLoader::parse(r#"(abilities: [(id: "x", name: "X", kind: Teleport)])"#);
        assert!(result.is_err());
    }
}
