//! Read-only combat data and the random stream.
//!
//! Oracles expose ability definitions, actor templates, consumables and zone
//! tables. The [`CombatEnv`] aggregate bundles them with the balance config so
//! the engine can reach everything it needs without coupling to concrete
//! catalogs.
mod abilities;
mod actors;
mod error;
mod items;
mod loot;
mod rng;
mod zones;

pub use abilities::{
    AbilityCatalog, AbilityDefinition, AbilityKind, AbilityOracle, BASIC_ATTACK_ID, CountRange,
    HealSpec, ScalingAttribute, SpecialEffect, StatusSpec, SummonSpec,
};
pub use actors::{ActorOracle, ActorTemplate, TemplateCatalog};
pub use error::CatalogError;
pub use items::{ItemCatalog, ItemDefinition, ItemEffect, ItemOracle};
pub use loot::{LootEntry, LootTable, ValueRange};
pub use rng::{PcgRng, RngOracle, ScriptedRng};
pub use zones::{LevelBand, ZoneDefinition, ZoneOracle, ZoneTable};

use crate::config::CombatConfig;

/// Aggregates the read-only oracles used during an encounter.
#[derive(Clone, Copy)]
pub struct CombatEnv<'a> {
    abilities: &'a dyn AbilityOracle,
    actors: &'a dyn ActorOracle,
    items: &'a dyn ItemOracle,
    zones: &'a dyn ZoneOracle,
    config: &'a CombatConfig,
}

impl<'a> CombatEnv<'a> {
    pub fn new(
        abilities: &'a dyn AbilityOracle,
        actors: &'a dyn ActorOracle,
        items: &'a dyn ItemOracle,
        zones: &'a dyn ZoneOracle,
        config: &'a CombatConfig,
    ) -> Self {
        Self {
            abilities,
            actors,
            items,
            zones,
            config,
        }
    }

    pub fn abilities(&self) -> &'a dyn AbilityOracle {
        self.abilities
    }

    pub fn actors(&self) -> &'a dyn ActorOracle {
        self.actors
    }

    pub fn items(&self) -> &'a dyn ItemOracle {
        self.items
    }

    pub fn zones(&self) -> &'a dyn ZoneOracle {
        self.zones
    }

    pub fn config(&self) -> &'a CombatConfig {
        self.config
    }
}

impl std::fmt::Debug for CombatEnv<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CombatEnv")
            .field("config", self.config)
            .finish_non_exhaustive()
    }
}
