//! Deterministic turn-based combat rules.
//!
//! `combat-core` defines the canonical combat rules (abilities, actors, status
//! effects, damage resolution, turn scheduling, rewards) and exposes pure,
//! synchronous APIs that a presentation layer can drive step by step.
//! All session mutation flows through [`engine::CombatEngine`], and every random
//! decision is drawn from a single [`env::RngOracle`] stream so encounters can
//! be replayed exactly.
pub mod combat;
pub mod config;
pub mod encounter;
pub mod engine;
pub mod env;
pub mod error;
pub mod rewards;
pub mod state;

pub use combat::{
    AttackContext, DamageResult, StatusApplication, TickReport, apply_status, resolve_attack,
    resolve_heal, tick_statuses,
};
pub use config::CombatConfig;
pub use encounter::{EncounterFactory, instantiate, instantiate_boss};
pub use engine::{
    ActionError, AggressivePolicy, CombatEngine, CombatEvent, EventKind, PlayerAction,
    PlayerPolicy, StatusChange, StatusChangeKind,
};
pub use env::{
    AbilityCatalog, AbilityDefinition, AbilityKind, AbilityOracle, ActorOracle, ActorTemplate,
    CatalogError, CombatEnv, CountRange, HealSpec, ItemCatalog, ItemDefinition, ItemEffect,
    ItemOracle, LevelBand, LootEntry, LootTable, PcgRng, RngOracle, ScalingAttribute,
    ScriptedRng, SpecialEffect, StatusSpec, SummonSpec, TemplateCatalog, ValueRange,
    ZoneDefinition, ZoneOracle, ZoneTable,
};
pub use error::{ErrorSeverity, GameError};
pub use rewards::{LootRoll, RewardSummary, roll_loot};
pub use state::{
    AbilitySlot, ActionRestrictions, Actor, ActorId, Attributes, EncounterSession,
    EquipmentModifiers, Outcome, Phase, PlayerProfile, Side, StatusEffect, StatusEffects,
    StatusKind,
};
