use anyhow::Result;
use clap::Parser;
use combat_core::ZoneOracle;
use console::style;

use crate::config::SimConfig;

#[derive(Parser)]
pub struct Check {
    /// Also list the eligible enemy pool of every zone at the configured level
    #[arg(long)]
    pools: bool,
}

impl Check {
    pub fn execute(self, config: &SimConfig) -> Result<()> {
        let bundle = config.content()?;
        let source = config
            .data_dir
            .as_ref()
            .map_or_else(|| "built-in tables".to_string(), |dir| dir.display().to_string());

        println!("{} {}", style("✓").green().bold(), style(source).bold());
        println!("  abilities {}", bundle.abilities.len());
        println!("  templates {}", bundle.templates.len());
        println!("  items     {}", bundle.items.len());
        println!("  zones     {}", bundle.zones.len());
        println!(
            "  player    {} (level {}, {} abilities)",
            bundle.profile.name,
            bundle.profile.level,
            bundle.profile.abilities.len()
        );

        if self.pools {
            for zone in bundle.zones.iter() {
                println!(
                    "  {} @ {}: [{}] boss {}",
                    zone.id,
                    config.zone_level,
                    zone.eligible(config.zone_level).join(", "),
                    zone.boss
                );
            }
        }

        if bundle.zones.zone(&config.zone).is_none() {
            println!(
                "{} zone '{}' is not defined",
                style("!").yellow().bold(),
                config.zone
            );
        }
        Ok(())
    }
}
