//! Status application and per-turn ticking.

use crate::config::CombatConfig;
use crate::env::{RngOracle, StatusSpec};
use crate::state::{ActionRestrictions, Actor, StatusEffect, StatusKind, Upsert};

/// What happened when a status was offered to an actor.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum StatusApplication {
    /// A new entry was added.
    Applied,
    /// An entry of the same kind existed and was replaced.
    Refreshed,
    /// The roll failed; nothing changed.
    Resisted,
}

impl StatusApplication {
    pub fn took_effect(self) -> bool {
        !matches!(self, Self::Resisted)
    }
}

/// Offers `spec` to `actor`.
///
/// Always draws one roll. The effect lands iff the roll is below
/// `chance_override`, else `spec.chance`, else 1.0. A landed effect of an
/// already active kind replaces the existing entry (duration is not added).
pub fn apply_status(
    actor: &mut Actor,
    spec: &StatusSpec,
    chance_override: Option<f64>,
    rng: &mut dyn RngOracle,
) -> StatusApplication {
    let chance = chance_override.or(spec.chance).unwrap_or(1.0);
    if !rng.chance(chance) {
        tracing::debug!(actor = %actor.name, status = %spec.kind, chance, "status resisted");
        return StatusApplication::Resisted;
    }

    let mut effect = StatusEffect::new(spec.kind, spec.duration);
    effect.damage = spec.damage;
    effect.magnitude = spec.magnitude.unwrap_or(0.0);

    let result = match actor.status_effects.upsert(effect) {
        Upsert::Inserted => StatusApplication::Applied,
        Upsert::Refreshed => StatusApplication::Refreshed,
    };
    actor.recompute_stats();

    tracing::debug!(
        actor = %actor.name,
        status = %spec.kind,
        duration = spec.duration,
        ?result,
        "status applied"
    );
    result
}

/// Summary of one status tick.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TickReport {
    /// Damage actually removed from health.
    pub total_damage: u32,
    /// Healing actually restored.
    pub total_healing: u32,
    /// One line per processed effect.
    pub descriptions: Vec<String>,
    pub restrictions: ActionRestrictions,
    /// Kinds removed because their duration ran out.
    pub expired: Vec<StatusKind>,
}

impl TickReport {
    pub fn is_empty(&self) -> bool {
        self.total_damage == 0
            && self.total_healing == 0
            && self.descriptions.is_empty()
            && self.expired.is_empty()
    }
}

/// Runs the start-of-turn step of every active effect on `actor`.
///
/// Damage from all effects is summed and applied in one update, then healing
/// (only if the actor survived). Each effect loses one turn of duration and
/// exhausted effects are removed. The resulting restrictions are stored on
/// the actor for the turn that follows.
pub fn tick_statuses(actor: &mut Actor, config: &CombatConfig) -> TickReport {
    let mut report = TickReport::default();
    let max_health = actor.max_health();
    let mut damage = 0u32;
    let mut healing = 0u32;

    for effect in actor.status_effects.iter_mut() {
        if effect.remaining == 0 {
            continue;
        }

        report.restrictions |= effect.kind.restriction();
        match effect.kind {
            StatusKind::Poison | StatusKind::Burn => {
                let amount = effect
                    .damage
                    .unwrap_or_else(|| share_of(max_health, config.dot_fraction));
                damage = damage.saturating_add(amount);
                report
                    .descriptions
                    .push(format!("{} takes {amount} {} damage", actor.name, effect.kind));
            }
            StatusKind::Bleed => {
                let amount = share_of(max_health, config.bleed_fraction);
                damage = damage.saturating_add(amount);
                report
                    .descriptions
                    .push(format!("{} bleeds for {amount} damage", actor.name));
            }
            StatusKind::Regeneration => {
                let amount = effect
                    .damage
                    .unwrap_or_else(|| share_of(max_health, config.dot_fraction));
                healing = healing.saturating_add(amount);
                report
                    .descriptions
                    .push(format!("{} regenerates {amount} health", actor.name));
            }
            StatusKind::Stun => {
                report.descriptions.push(format!("{} is stunned", actor.name));
            }
            StatusKind::Immobilize => {
                report
                    .descriptions
                    .push(format!("{} is immobilized", actor.name));
            }
            _ => {}
        }

        effect.remaining -= 1;
    }

    report.expired = actor.status_effects.remove_where(|e| e.remaining == 0);
    actor.recompute_stats();
    for kind in &report.expired {
        report
            .descriptions
            .push(format!("{} is no longer affected by {kind}", actor.name));
    }

    report.total_damage = actor.take_damage(damage);
    if actor.is_alive() {
        report.total_healing = actor.heal(healing);
    }
    actor.restrictions = report.restrictions;

    if !report.is_empty() {
        tracing::debug!(
            actor = %actor.name,
            damage = report.total_damage,
            healing = report.total_healing,
            expired = report.expired.len(),
            "status tick"
        );
    }
    report
}

/// `ceil(max_health * fraction)`.
fn share_of(max_health: u32, fraction: f64) -> u32 {
    (max_health as f64 * fraction).ceil().max(0.0) as u32
}
