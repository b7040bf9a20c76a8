//! Zone definitions: which hostiles may appear where.
//!
//! A zone lists level bands. Every band whose `min_level` is at or below the
//! zone level contributes its enemies, so the eligible pool only grows as the
//! level rises.

use std::collections::HashMap;

use super::error::CatalogError;

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LevelBand {
    pub min_level: u32,
    pub enemies: Vec<String>,
}

impl LevelBand {
    pub fn new<I, S>(min_level: u32, enemies: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            min_level,
            enemies: enemies.into_iter().map(Into::into).collect(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ZoneDefinition {
    pub id: String,
    pub name: String,
    /// Template id of the zone's designated boss.
    pub boss: String,
    pub bands: Vec<LevelBand>,
}

impl ZoneDefinition {
    /// Eligible template ids at `zone_level`, in band order, without duplicates.
    pub fn eligible(&self, zone_level: u32) -> Vec<&str> {
        let mut eligible: Vec<&str> = Vec::new();
        for band in self.bands.iter().filter(|b| b.min_level <= zone_level) {
            for enemy in &band.enemies {
                if !eligible.contains(&enemy.as_str()) {
                    eligible.push(enemy);
                }
            }
        }
        eligible
    }
}

/// Oracle resolving zone identifiers.
pub trait ZoneOracle: Send + Sync {
    fn zone(&self, id: &str) -> Option<&ZoneDefinition>;
}

#[derive(Clone, Debug, Default)]
pub struct ZoneTable {
    zones: HashMap<String, ZoneDefinition>,
}

impl ZoneTable {
    pub fn from_zones(
        zones: impl IntoIterator<Item = ZoneDefinition>,
    ) -> Result<Self, CatalogError> {
        let mut map = HashMap::new();
        for zone in zones {
            if map.contains_key(&zone.id) {
                return Err(CatalogError::DuplicateZone(zone.id));
            }
            map.insert(zone.id.clone(), zone);
        }
        Ok(Self { zones: map })
    }

    pub fn get(&self, id: &str) -> Option<&ZoneDefinition> {
        self.zones.get(id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &ZoneDefinition> {
        self.zones.values()
    }

    pub fn len(&self) -> usize {
        self.zones.len()
    }

    pub fn is_empty(&self) -> bool {
        self.zones.is_empty()
    }
}

impl ZoneOracle for ZoneTable {
    fn zone(&self, id: &str) -> Option<&ZoneDefinition> {
        self.get(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn forest() -> ZoneDefinition {
        ZoneDefinition {
            id: "forest".into(),
            name: "Whispering Forest".into(),
            boss: "forest_troll".into(),
            bands: vec![
                LevelBand::new(1, ["slime", "wolf"]),
                LevelBand::new(3, ["bandit", "wolf"]),
                LevelBand::new(6, ["treant"]),
            ],
        }
    }

    #[test]
    fn pool_grows_monotonically_with_level() {
        let zone = forest();
        assert_eq!(zone.eligible(1), vec!["slime", "wolf"]);
        assert_eq!(zone.eligible(3), vec!["slime", "wolf", "bandit"]);
        assert_eq!(zone.eligible(9), vec!["slime", "wolf", "bandit", "treant"]);
    }

    #[test]
    fn below_first_band_is_empty() {
        let zone = forest();
        assert!(zone.eligible(0).is_empty());
    }

    #[test]
    fn duplicate_zone_ids_fail_fast() {
        let result = ZoneTable::from_zones([forest(), forest()]);
        assert_eq!(
            result.err(),
            Some(CatalogError::DuplicateZone("forest".into()))
        );
    }
}
