//! Data-driven combat content and loaders.
//!
//! This crate houses the static combat tables and turns them into validated
//! catalogs:
//! - Abilities (RON)
//! - Hostile actor templates with loot tables (RON)
//! - Consumable items (RON)
//! - Zones and level bands (RON)
//! - The persisted player profile (RON)
//! - Combat balance tables (TOML)
//!
//! The default tables are embedded in the binary; [`ContentFactory::new`]
//! reads the same files from a directory instead.

pub mod bundle;

#[cfg(feature = "loaders")]
pub mod loaders;

pub use bundle::ContentBundle;

#[cfg(feature = "loaders")]
pub use loaders::{
    AbilityLoader, ActorLoader, ConfigLoader, ContentFactory, ItemLoader, LoadResult,
    ProfileLoader, ZoneLoader,
};
