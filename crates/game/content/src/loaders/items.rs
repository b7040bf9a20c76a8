//! Consumable item loader.

use std::path::Path;

use anyhow::Context;
use combat_core::ItemDefinition;
use serde::Deserialize;

use crate::loaders::{LoadResult, read_file};

/// Top-level layout of `items.ron`.
#[derive(Debug, Clone, Deserialize)]
struct ItemFile {
    items: Vec<ItemDefinition>,
}

/// Loader for the item catalog.
pub struct ItemLoader;

impl ItemLoader {
    pub fn load(path: &Path) -> LoadResult<Vec<ItemDefinition>> {
        let content = read_file(path)?;
        Self::parse(&content).with_context(|| format!("in {}", path.display()))
    }

    pub fn parse(content: &str) -> LoadResult<Vec<ItemDefinition>> {
        let file: ItemFile = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse item catalog RON: {}", e))?;
        Ok(file.items)
    }
}
