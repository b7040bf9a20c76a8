//! Content loaders for reading combat data from files.
//!
//! Each loader parses one RON/TOML file into combat-core types. `load` reads
//! from disk; `parse` takes the text directly (used for the built-in tables).

pub mod abilities;
pub mod actors;
pub mod config;
pub mod factory;
pub mod items;
pub mod profile;
pub mod zones;

pub use abilities::AbilityLoader;
pub use actors::ActorLoader;
pub use config::ConfigLoader;
pub use factory::ContentFactory;
pub use items::ItemLoader;
pub use profile::ProfileLoader;
pub use zones::ZoneLoader;

use std::path::Path;

/// Common result type for loaders.
pub type LoadResult<T> = anyhow::Result<T>;

/// Helper function to read file contents.
pub(crate) fn read_file(path: &Path) -> LoadResult<String> {
    std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("Failed to read file {}: {}", path.display(), e))
}
