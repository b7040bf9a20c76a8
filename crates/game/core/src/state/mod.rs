//! Runtime combat state.
//!
//! This module owns the data structures that describe combatants, their
//! status effects and the encounter session. Controllers read this state
//! freely but mutate it exclusively through the engine.
mod actor;
mod profile;
mod session;
mod status;

pub use actor::{AbilitySlot, Actor, ActorId, Attributes, Side};
pub use profile::{EquipmentModifiers, PlayerProfile};
pub use session::{EncounterSession, Outcome, Phase};
pub use status::{
    ActionRestrictions, ModifiedStat, StatusEffect, StatusEffects, StatusKind, Upsert,
};
