//! Text and JSON rendering of finished encounters.

use combat_core::{
    CombatEvent, EncounterSession, EventKind, Outcome, RewardSummary, StatusChangeKind,
};
use console::style;
use serde::Serialize;

/// Machine-readable record of one encounter.
#[derive(Serialize)]
pub struct RunReport<'a> {
    pub seed: u64,
    pub zone: &'a str,
    pub zone_level: u32,
    pub outcome: Outcome,
    pub rounds: u32,
    pub player_health: u32,
    pub events: &'a [CombatEvent],
    pub rewards: Option<&'a RewardSummary>,
}

impl<'a> RunReport<'a> {
    pub fn new(seed: u64, zone: &'a str, zone_level: u32, session: &'a EncounterSession) -> Self {
        Self {
            seed,
            zone,
            zone_level,
            outcome: session.outcome,
            rounds: session.round,
            player_health: session.player.health(),
            events: session.events(),
            rewards: session.rewards.as_ref(),
        }
    }
}

fn name(session: &EncounterSession, id: combat_core::ActorId) -> &str {
    session.actor(id).map_or("?", |actor| actor.name.as_str())
}

/// Renders one step as a single line.
pub fn describe(session: &EncounterSession, event: &CombatEvent) -> String {
    let actor = name(session, event.actor_id);
    let target = event.target_id.map(|id| name(session, id));
    let what = event
        .ability_id
        .as_deref()
        .or(event.item_id.as_deref())
        .unwrap_or("basic attack");

    let mut line = match event.kind {
        EventKind::Attack => match &event.damage {
            Some(damage) if damage.was_evaded => {
                format!("{actor} uses {what} on {}, evaded", target.unwrap_or("?"))
            }
            Some(damage) => {
                let mut text = format!(
                    "{actor} uses {what} on {} for {}",
                    target.unwrap_or("?"),
                    damage.amount_dealt
                );
                if damage.hits > 1 {
                    text.push_str(&format!(" ({} hits)", damage.hits));
                }
                if damage.was_critical {
                    text.push_str(" CRIT");
                }
                if let Some(reflected) = &damage.reflected {
                    text.push_str(&format!(", {} reflected", reflected.amount_dealt));
                }
                text
            }
            None => format!("{actor} uses {what}"),
        },
        EventKind::Heal | EventKind::PassiveHeal => {
            format!("{actor} recovers {} with {what}", event.healing)
        }
        EventKind::Buff | EventKind::Debuff | EventKind::Special => match target {
            Some(target) => format!("{actor} uses {what} on {target}"),
            None => format!("{actor} uses {what}"),
        },
        EventKind::PassiveApplied => format!("{actor}'s passives take hold"),
        EventKind::StatusTick => format!("{actor}: {}", event.descriptions.join("; ")),
        EventKind::Stunned => format!("{actor} is stunned"),
        EventKind::Summon => format!("{actor} calls reinforcements with {what}"),
        EventKind::ItemUsed => match (event.healing, event.damage.as_ref()) {
            (_, Some(damage)) => format!(
                "{actor} throws {what} at {} for {}",
                target.unwrap_or("?"),
                damage.amount_dealt
            ),
            (0, None) => format!("{actor} uses {what}"),
            (healing, None) => format!("{actor} uses {what}, recovering {healing}"),
        },
        EventKind::RetreatSucceeded => format!("{actor} escapes"),
        EventKind::RetreatFailed => format!("{actor} fails to escape"),
        EventKind::RoundAdvanced => format!("round {} begins", event.round),
    };

    for change in &event.status_changes {
        let who = name(session, change.actor_id);
        let verb = match change.change {
            StatusChangeKind::Applied => "gains",
            StatusChangeKind::Refreshed => "refreshes",
            StatusChangeKind::Resisted => "resists",
            StatusChangeKind::Expired => "loses",
            StatusChangeKind::Removed => "is cleansed of",
        };
        line.push_str(&format!(" [{who} {verb} {}]", change.status));
    }
    if let Some(health) = event.new_health {
        line.push_str(&format!(" -> {health} hp"));
    }
    line
}

/// Prints the event log followed by the reward summary.
pub fn print_log(session: &EncounterSession, seed: u64) {
    println!("{} seed {}", style("==>").bold().cyan(), seed);
    for event in session.events() {
        if event.kind == EventKind::RoundAdvanced {
            println!("{}", style(describe(session, event)).dim());
            continue;
        }
        let label = if event.actor_id.is_player() {
            style(format!("[r{}]", event.round)).green()
        } else {
            style(format!("[r{}]", event.round)).red()
        };
        println!("{label} {}", describe(session, event));
    }
    print_outcome(session);
}

fn print_outcome(session: &EncounterSession) {
    let outcome = match session.outcome {
        Outcome::Victory => style(session.outcome.to_string()).green().bold(),
        Outcome::Defeat => style(session.outcome.to_string()).red().bold(),
        _ => style(session.outcome.to_string()).yellow().bold(),
    };
    println!(
        "\n{} after {} rounds, {} at {}/{} hp",
        outcome,
        session.round,
        session.player.name,
        session.player.health(),
        session.player.max_health()
    );
    if let Some(rewards) = &session.rewards {
        println!(
            "  gold {}  experience {}  loot [{}]  used [{}]",
            rewards.gold_gained,
            rewards.experience_gained,
            rewards.loot_item_ids.join(", "),
            rewards.items_consumed.join(", ")
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use combat_core::{Actor, ActorId, DamageResult, Phase, Side};
    use std::collections::BTreeMap;

    fn session() -> EncounterSession {
        let player = Actor::new(ActorId::PLAYER, "Aria", Side::Player, 1, 50, 8, 2);
        let wolf = Actor::new(ActorId(1), "Wolf", Side::Hostile, 1, 20, 4, 1);
        EncounterSession::new(player, vec![wolf], BTreeMap::new())
    }

    #[test]
    fn attack_lines_name_both_sides() {
        let session = session();
        let damage = DamageResult {
            amount_dealt: 7,
            was_critical: true,
            hits: 2,
            ..DamageResult::default()
        };
        let event = CombatEvent::new(1, Phase::Player, EventKind::Attack, ActorId::PLAYER)
            .with_target(ActorId(1))
            .with_ability("twin_slash")
            .with_damage(damage)
            .with_new_health(13);

        assert_eq!(
            describe(&session, &event),
            "Aria uses twin_slash on Wolf for 7 (2 hits) CRIT -> 13 hp"
        );
    }

    #[test]
    fn unknown_actor_renders_placeholder() {
        let session = session();
        let event = CombatEvent::new(2, Phase::Enemy, EventKind::Stunned, ActorId(9));
        assert_eq!(describe(&session, &event), "? is stunned");
    }
}
