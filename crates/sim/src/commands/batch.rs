use std::collections::BTreeMap;

use anyhow::Result;
use clap::Parser;
use combat_core::{CombatEngine, Outcome, PcgRng};
use console::style;

use crate::config::SimConfig;

#[derive(Parser)]
pub struct Batch {
    /// Number of encounters to play; seeds run consecutively from the base seed
    #[arg(short = 'n', long, default_value_t = 100)]
    count: u32,
}

#[derive(Default)]
struct Tally {
    outcomes: BTreeMap<&'static str, u32>,
    rounds: u64,
    gold: u64,
    experience: u64,
    items_used: u64,
}

impl Batch {
    pub fn execute(self, config: &SimConfig) -> Result<()> {
        if self.count == 0 {
            anyhow::bail!("--count must be at least 1");
        }
        let bundle = config.content()?;
        let base = config.seed();
        let mut tally = Tally::default();

        for offset in 0..self.count {
            let seed = base.wrapping_add(u64::from(offset));
            let mut rng = PcgRng::new(seed);
            let mut engine = CombatEngine::new(bundle.env(), &mut rng);
            let mut session = engine.start_encounter(
                &bundle.profile,
                &config.zone,
                config.zone_level,
                config.boss,
            );
            let outcome = engine.autoplay(&mut session, &mut config.policy(), config.max_rounds);
            tracing::debug!(seed, %outcome, rounds = session.round, "encounter finished");

            *tally.outcomes.entry(outcome.into()).or_default() += 1;
            tally.rounds += u64::from(session.round);
            tally.items_used += session.items_consumed.len() as u64;
            if let Some(rewards) = &session.rewards {
                tally.gold += u64::from(rewards.gold_gained);
                tally.experience += u64::from(rewards.experience_gained);
            }
        }

        let n = f64::from(self.count);
        println!(
            "{} {} encounters in {} (level {}{}), seeds {}..{}",
            style("==>").bold().cyan(),
            self.count,
            config.zone,
            config.zone_level,
            if config.boss { ", boss" } else { "" },
            base,
            base.wrapping_add(u64::from(self.count - 1))
        );
        for (outcome, count) in &tally.outcomes {
            let line = format!("  {:<8} {:>6} ({:.1}%)", outcome, count, 100.0 * f64::from(*count) / n);
            let line = if *outcome == <&str>::from(Outcome::Victory) {
                style(line).green()
            } else if *outcome == <&str>::from(Outcome::Defeat) {
                style(line).red()
            } else {
                style(line).yellow()
            };
            println!("{line}");
        }
        println!(
            "  avg rounds {:.2}  avg gold {:.2}  avg experience {:.2}  avg items used {:.2}",
            tally.rounds as f64 / n,
            tally.gold as f64 / n,
            tally.experience as f64 / n,
            tally.items_used as f64 / n
        );
        Ok(())
    }
}
