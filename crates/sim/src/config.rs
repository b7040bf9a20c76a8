//! Simulation settings shared by every subcommand.

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use combat_content::{ContentBundle, ContentFactory};
use combat_core::AggressivePolicy;

/// Encounter parameters. Each flag falls back to a `SIM_*` environment variable.
#[derive(Args, Clone, Debug)]
pub struct SimConfig {
    /// Seed for the combat random stream (random when omitted)
    #[arg(long, global = true, env = "SIM_SEED")]
    pub seed: Option<u64>,

    /// Read content tables from this directory instead of the built-in ones
    #[arg(long, global = true, env = "SIM_DATA_DIR", value_name = "DIR")]
    pub data_dir: Option<PathBuf>,

    /// Zone to generate hostiles from
    #[arg(long, global = true, env = "SIM_ZONE", default_value = "forest")]
    pub zone: String,

    /// Zone level; selects which level bands are eligible
    #[arg(long, global = true, env = "SIM_ZONE_LEVEL", default_value_t = 1)]
    pub zone_level: u32,

    /// Fight the zone boss instead of a generated roster
    #[arg(long, global = true, env = "SIM_BOSS")]
    pub boss: bool,

    /// Stop an encounter after this many rounds
    #[arg(long, global = true, env = "SIM_MAX_ROUNDS", default_value_t = 100)]
    pub max_rounds: u32,

    /// Health ratio below which the auto player heals
    #[arg(long, global = true, default_value_t = 0.3)]
    pub heal_below: f64,

    /// Log every resolved step
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

impl SimConfig {
    /// Loads and validates content from `data_dir` or the built-in tables.
    pub fn content(&self) -> Result<ContentBundle> {
        let factory = match &self.data_dir {
            Some(dir) => ContentFactory::new(dir),
            None => ContentFactory::builtin(),
        };
        factory.build_env()
    }

    pub fn seed(&self) -> u64 {
        self.seed.unwrap_or_else(rand::random)
    }

    pub fn policy(&self) -> AggressivePolicy {
        AggressivePolicy {
            heal_below: self.heal_below,
        }
    }
}
