use anyhow::Result;
use clap::{Parser, ValueEnum};
use combat_core::{CombatEngine, PcgRng};

use crate::config::SimConfig;
use crate::report::{self, RunReport};

#[derive(Clone, Copy, Debug, Default, ValueEnum)]
enum OutputFormat {
    /// Styled event log
    #[default]
    Log,
    /// Pretty-printed JSON report
    Json,
}

#[derive(Parser)]
pub struct Run {
    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Log)]
    format: OutputFormat,
}

impl Run {
    pub fn execute(self, config: &SimConfig) -> Result<()> {
        let bundle = config.content()?;
        let seed = config.seed();
        let mut rng = PcgRng::new(seed);
        let mut engine = CombatEngine::new(bundle.env(), &mut rng);

        let mut session =
            engine.start_encounter(&bundle.profile, &config.zone, config.zone_level, config.boss);

        let outcome = engine.autoplay(&mut session, &mut config.policy(), config.max_rounds);
        tracing::debug!(seed, %outcome, rounds = session.round, "encounter finished");

        match self.format {
            OutputFormat::Log => report::print_log(&session, seed),
            OutputFormat::Json => {
                let report = RunReport::new(seed, &config.zone, config.zone_level, &session);
                println!("{}", serde_json::to_string_pretty(&report)?);
            }
        }
        Ok(())
    }
}
