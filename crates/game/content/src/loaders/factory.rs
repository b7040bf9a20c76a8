//! Content factory for building a validated combat environment.

use std::path::{Path, PathBuf};

use anyhow::Context;
use combat_core::{
    AbilityDefinition, ActorTemplate, CombatConfig, ItemDefinition, PlayerProfile, ZoneDefinition,
};

use crate::bundle::ContentBundle;
use crate::loaders::{
    AbilityLoader, ActorLoader, ConfigLoader, ItemLoader, LoadResult, ProfileLoader, ZoneLoader,
};

pub const ABILITIES_FILE: &str = "abilities.ron";
pub const ACTORS_FILE: &str = "actors.ron";
pub const ITEMS_FILE: &str = "items.ron";
pub const ZONES_FILE: &str = "zones.ron";
pub const PROFILE_FILE: &str = "player.ron";
pub const TABLES_FILE: &str = "tables.toml";

mod builtin {
    pub const ABILITIES: &str = include_str!("../../data/abilities.ron");
    pub const ACTORS: &str = include_str!("../../data/actors.ron");
    pub const ITEMS: &str = include_str!("../../data/items.ron");
    pub const ZONES: &str = include_str!("../../data/zones.ron");
    pub const PROFILE: &str = include_str!("../../data/player.ron");
    pub const TABLES: &str = include_str!("../../data/tables.toml");
}

#[derive(Clone, Debug)]
enum Source {
    Builtin,
    Directory(PathBuf),
}

/// Loads combat content either from the tables compiled into this crate or
/// from a data directory.
///
/// # Directory Structure
///
/// ```text
/// data_dir/
/// ├── tables.toml
/// ├── abilities.ron
/// ├── actors.ron
/// ├── items.ron
/// ├── zones.ron
/// └── player.ron
/// ```
#[derive(Clone, Debug)]
pub struct ContentFactory {
    source: Source,
}

impl ContentFactory {
    /// Creates a factory reading from `data_dir`.
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            source: Source::Directory(data_dir.into()),
        }
    }

    /// Creates a factory over the built-in tables.
    pub fn builtin() -> Self {
        Self {
            source: Source::Builtin,
        }
    }

    /// Returns the data directory, or `None` for built-in content.
    pub fn data_dir(&self) -> Option<&Path> {
        match &self.source {
            Source::Builtin => None,
            Source::Directory(dir) => Some(dir.as_path()),
        }
    }

    pub fn load_config(&self) -> LoadResult<CombatConfig> {
        match &self.source {
            Source::Builtin => ConfigLoader::parse(builtin::TABLES),
            Source::Directory(dir) => ConfigLoader::load(&dir.join(TABLES_FILE)),
        }
    }

    pub fn load_abilities(&self) -> LoadResult<Vec<AbilityDefinition>> {
        match &self.source {
            Source::Builtin => AbilityLoader::parse(builtin::ABILITIES),
            Source::Directory(dir) => AbilityLoader::load(&dir.join(ABILITIES_FILE)),
        }
    }

    pub fn load_actors(&self) -> LoadResult<Vec<ActorTemplate>> {
        match &self.source {
            Source::Builtin => ActorLoader::parse(builtin::ACTORS),
            Source::Directory(dir) => ActorLoader::load(&dir.join(ACTORS_FILE)),
        }
    }

    pub fn load_items(&self) -> LoadResult<Vec<ItemDefinition>> {
        match &self.source {
            Source::Builtin => ItemLoader::parse(builtin::ITEMS),
            Source::Directory(dir) => ItemLoader::load(&dir.join(ITEMS_FILE)),
        }
    }

    pub fn load_zones(&self) -> LoadResult<Vec<ZoneDefinition>> {
        match &self.source {
            Source::Builtin => ZoneLoader::parse(builtin::ZONES),
            Source::Directory(dir) => ZoneLoader::load(&dir.join(ZONES_FILE)),
        }
    }

    pub fn load_profile(&self) -> LoadResult<PlayerProfile> {
        match &self.source {
            Source::Builtin => ProfileLoader::parse(builtin::PROFILE),
            Source::Directory(dir) => ProfileLoader::load(&dir.join(PROFILE_FILE)),
        }
    }

    /// Loads every table and validates the result.
    ///
    /// Fails fast on parse errors, duplicate ids and broken cross references.
    pub fn build_env(&self) -> LoadResult<ContentBundle> {
        let config = self.load_config().context("loading combat tables")?;
        let abilities = self.load_abilities().context("loading abilities")?;
        let templates = self.load_actors().context("loading actor templates")?;
        let items = self.load_items().context("loading items")?;
        let zones = self.load_zones().context("loading zones")?;
        let profile = self.load_profile().context("loading player profile")?;

        ContentBundle::assemble(abilities, templates, items, zones, config, profile)
            .context("validating content")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn factory_paths() {
        let factory = ContentFactory::new("/tmp/data");
        assert_eq!(factory.data_dir(), Some(Path::new("/tmp/data")));
        assert_eq!(ContentFactory::builtin().data_dir(), None);
    }

    #[test]
    fn missing_directory_names_the_file() {
        let error = ContentFactory::new("/nonexistent/combat-data")
            .build_env()
            .expect_err("no such directory");
        let message = format!("{error:#}");
        assert!(message.contains(TABLES_FILE), "{message}");
    }
}
