//! Zone table loader.

use std::path::Path;

use anyhow::Context;
use combat_core::ZoneDefinition;
use serde::Deserialize;

use crate::loaders::{LoadResult, read_file};

/// Top-level layout of `zones.ron`.
#[derive(Debug, Clone, Deserialize)]
struct ZoneFile {
    zones: Vec<ZoneDefinition>,
}

pub struct ZoneLoader;

impl ZoneLoader {
    pub fn load(path: &Path) -> LoadResult<Vec<ZoneDefinition>> {
        let content = read_file(path)?;
        Self::parse(&content).with_context(|| format!("in {}", path.display()))
    }

    pub fn parse(content: &str) -> LoadResult<Vec<ZoneDefinition>> {
        let file: ZoneFile = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse zone table RON: {}", e))?;
        Ok(file.zones)
    }
}
