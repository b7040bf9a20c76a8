//! Attack resolution.
//!
//! # Formula (per hit)
//!
//! ```text
//! raw      = attacker.current_attack * (ability.damage_multiplier ?? 1.0)
//! raw     *= defend_factor                      if defender is defending
//! hit      = max(minimum_damage, floor(raw - defender.current_defense * (1 - armor_piercing)))
//! hit      = 0, evaded                          if defender dodges
//! hit      = floor(hit * crit_multiplier)       on a critical
//! ```
//!
//! Hits are summed. Reflect, on-hit status and the final health update follow,
//! in that order.
//!
//! Reflected damage is a flat fraction of the summed hits applied straight to
//! the attacker. It deliberately does not re-enter this formula, so it takes no
//! mitigation, dodge, crit or further reflect.

use crate::config::CombatConfig;
use crate::env::{AbilityDefinition, RngOracle};
use crate::state::{Actor, Side, StatusKind};

use super::status::{StatusApplication, apply_status};

/// Per-call switches that are not part of the ability record.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct AttackContext {
    /// Rolls the baseline critical chance when the ability defines none.
    pub baseline_crit: bool,
}

impl AttackContext {
    /// The player's basic attack crits at the baseline rate; nothing else does
    /// unless the ability carries its own crit chance.
    pub fn for_attack(attacker: &Actor, ability: &AbilityDefinition) -> Self {
        Self {
            baseline_crit: attacker.side == Side::Player && ability.is_basic_attack(),
        }
    }
}

/// Resolved outcome of one attack, consumed by presentation for log text and
/// animation selection.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DamageResult {
    /// Damage actually removed from the target's health.
    pub amount_dealt: u32,
    /// At least one hit was critical.
    pub was_critical: bool,
    /// Every hit was evaded.
    pub was_evaded: bool,
    /// Retaliation dealt back to the attacker.
    pub reflected: Option<Box<DamageResult>>,
    /// The on-hit status landed.
    pub status_applied: bool,
    /// How the on-hit status was received; `None` when none was offered or
    /// every hit was evaded.
    pub status: Option<StatusApplication>,
    /// Number of strikes rolled.
    pub hits: u32,
}

/// Resolves `ability` from `attacker` against `defender` and applies the damage.
///
/// Reflected damage is applied to `attacker` before the defender's health
/// changes. Callers check terminal conditions afterwards.
pub fn resolve_attack(
    attacker: &mut Actor,
    defender: &mut Actor,
    ability: &AbilityDefinition,
    context: AttackContext,
    config: &CombatConfig,
    rng: &mut dyn RngOracle,
) -> DamageResult {
    let strikes = ability.strike_count();
    let mut total = 0u32;
    let mut evaded = 0u32;
    let mut critical = false;

    for _ in 0..strikes {
        let strike = roll_strike(attacker, defender, ability, context, config, rng);
        total = total.saturating_add(strike.damage);
        critical |= strike.critical;
        if strike.evaded {
            evaded += 1;
        }
    }

    let mut result = DamageResult {
        amount_dealt: 0,
        was_critical: critical,
        was_evaded: evaded == strikes,
        reflected: None,
        status_applied: false,
        status: None,
        hits: strikes,
    };

    if total > 0 {
        if let Some(reflect) = defender.status_effects.get(StatusKind::Reflect) {
            let amount = (total as f64 * reflect.magnitude).floor().max(0.0) as u32;
            if amount > 0 {
                result.reflected = Some(Box::new(resolve_reflect(attacker, amount)));
            }
        }
    }

    if !result.was_evaded {
        if let Some(spec) = &ability.status_effect {
            let application = apply_status(defender, spec, None, rng);
            result.status_applied = application.took_effect();
            result.status = Some(application);
        }
    }

    result.amount_dealt = defender.take_damage(total);

    tracing::debug!(
        attacker = %attacker.name,
        defender = %defender.name,
        ability = %ability.id,
        damage = result.amount_dealt,
        critical = result.was_critical,
        evaded = result.was_evaded,
        "attack resolved"
    );
    result
}

struct Strike {
    damage: u32,
    critical: bool,
    evaded: bool,
}

fn roll_strike(
    attacker: &Actor,
    defender: &Actor,
    ability: &AbilityDefinition,
    context: AttackContext,
    config: &CombatConfig,
    rng: &mut dyn RngOracle,
) -> Strike {
    let mut raw = attacker.current_attack as f64 * ability.damage_multiplier.unwrap_or(1.0);
    if defender.status_effects.has(StatusKind::Defending) {
        raw *= config.defend_factor;
    }

    let piercing = ability.armor_piercing.unwrap_or(0.0).clamp(0.0, 1.0);
    let mitigation = defender.current_defense as f64 * (1.0 - piercing);
    let damage = (raw - mitigation)
        .floor()
        .max(config.minimum_damage as f64) as u32;

    if let Some(dodge) = defender.status_effects.get(StatusKind::Dodge) {
        if rng.chance(dodge.magnitude) {
            return Strike {
                damage: 0,
                critical: false,
                evaded: true,
            };
        }
    }

    let crit_chance = ability
        .crit_chance
        .or(context.baseline_crit.then_some(config.basic_crit_chance));
    let critical = crit_chance.is_some_and(|chance| rng.chance(chance));
    let damage = if critical {
        let multiplier = ability.crit_multiplier.unwrap_or(config.crit_multiplier);
        (damage as f64 * multiplier).floor() as u32
    } else {
        damage
    };

    Strike {
        damage,
        critical,
        evaded: false,
    }
}

/// Retaliation bypasses mitigation, dodge, crit and further reflect.
fn resolve_reflect(target: &mut Actor, amount: u32) -> DamageResult {
    let dealt = target.take_damage(amount);
    tracing::debug!(target = %target.name, damage = dealt, "damage reflected");
    DamageResult {
        amount_dealt: dealt,
        hits: 1,
        ..DamageResult::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::env::{AbilityKind, ScriptedRng, StatusSpec};
    use crate::state::{ActorId, StatusEffect};

    fn fighter(attack: u32, defense: u32) -> Actor {
        Actor::new(ActorId(1), "Fighter", Side::Hostile, 1, 100, attack, defense)
    }

    fn player(attack: u32) -> Actor {
        Actor::new(ActorId::PLAYER, "Hero", Side::Player, 1, 100, attack, 0)
    }

    fn strike(
        attacker: &mut Actor,
        defender: &mut Actor,
        ability: &AbilityDefinition,
        rolls: &[f64],
    ) -> DamageResult {
        let context = AttackContext::for_attack(attacker, ability);
        let mut rng = ScriptedRng::new(rolls.to_vec());
        resolve_attack(attacker, defender, ability, context, &CombatConfig::default(), &mut rng)
    }

    #[test]
    fn mitigation_never_drops_below_one() {
        let mut attacker = fighter(5, 0);
        let mut defender = fighter(10, 50);
        let result = strike(&mut attacker, &mut defender, &AbilityDefinition::basic_attack(), &[]);
        assert_eq!(result.amount_dealt, 1);
        assert_eq!(defender.health(), 99);
    }

    #[test]
    fn defending_halves_before_mitigation() {
        let mut attacker = fighter(20, 0);
        let mut defender = fighter(10, 4);
        defender
            .status_effects
            .upsert(StatusEffect::new(StatusKind::Defending, 1));
        let result = strike(&mut attacker, &mut defender, &AbilityDefinition::basic_attack(), &[]);
        assert_eq!(result.amount_dealt, 6);
    }

    #[test]
    fn armor_piercing_ignores_part_of_defense() {
        let mut attacker = fighter(20, 0);
        let mut defender = fighter(10, 10);
        let ability = AbilityDefinition::new("pierce", "Pierce", AbilityKind::Attack)
            .with_armor_piercing(0.5);
        let result = strike(&mut attacker, &mut defender, &ability, &[]);
        assert_eq!(result.amount_dealt, 15);
    }

    #[test]
    fn player_basic_attack_crits_at_baseline() {
        let mut attacker = player(10);
        let mut defender = fighter(10, 2);
        let basic = AbilityDefinition::basic_attack();

        let crit = strike(&mut attacker, &mut defender, &basic, &[0.1]);
        assert!(crit.was_critical);
        assert_eq!(crit.amount_dealt, 12);

        let normal = strike(&mut attacker, &mut defender, &basic, &[0.5]);
        assert!(!normal.was_critical);
        assert_eq!(normal.amount_dealt, 8);
    }

    #[test]
    fn hostile_basic_attack_never_rolls_crit() {
        let mut attacker = fighter(10, 0);
        let mut defender = player(10);
        let mut rng = ScriptedRng::constant(0.0);
        let basic = AbilityDefinition::basic_attack();
        let context = AttackContext::for_attack(&attacker, &basic);
        let result = resolve_attack(
            &mut attacker,
            &mut defender,
            &basic,
            context,
            &CombatConfig::default(),
            &mut rng,
        );
        assert!(!result.was_critical);
        assert_eq!(rng.drawn(), 0);
    }

    #[test]
    fn dodge_negates_and_skips_crit_roll() {
        let mut attacker = player(10);
        let mut defender = fighter(10, 0);
        defender
            .status_effects
            .upsert(StatusEffect::new(StatusKind::Dodge, 2).with_magnitude(0.5));
        let mut rng = ScriptedRng::new(vec![0.2]);
        let basic = AbilityDefinition::basic_attack();
        let context = AttackContext::for_attack(&attacker, &basic);
        let result = resolve_attack(
            &mut attacker,
            &mut defender,
            &basic,
            context,
            &CombatConfig::default(),
            &mut rng,
        );
        assert!(result.was_evaded);
        assert_eq!(result.amount_dealt, 0);
        assert_eq!(rng.drawn(), 1);
        assert_eq!(defender.health(), 100);
    }

    #[test]
    fn multi_hit_sums_independent_strikes() {
        let mut attacker = fighter(10, 0);
        let mut defender = fighter(10, 4);
        let ability = AbilityDefinition::new("flurry", "Flurry", AbilityKind::Attack)
            .with_hits(3)
            .with_crit(0.5, Some(2.0));
        let result = strike(&mut attacker, &mut defender, &ability, &[0.9, 0.1, 0.9]);
        assert_eq!(result.hits, 3);
        assert!(result.was_critical);
        assert_eq!(result.amount_dealt, 6 + 12 + 6);
    }

    #[test]
    fn reflect_returns_fraction_to_attacker() {
        let mut attacker = fighter(30, 0);
        let mut defender = fighter(10, 0);
        defender
            .status_effects
            .upsert(StatusEffect::new(StatusKind::Reflect, 2).with_magnitude(0.5));
        let result = strike(&mut attacker, &mut defender, &AbilityDefinition::basic_attack(), &[]);
        assert_eq!(result.amount_dealt, 30);
        let reflected = result.reflected.expect("reflect triggered");
        assert_eq!(reflected.amount_dealt, 15);
        assert!(reflected.reflected.is_none());
        assert_eq!(attacker.health(), 85);
    }

    #[test]
    fn on_hit_status_uses_ability_chance() {
        let mut attacker = fighter(10, 0);
        let mut defender = fighter(10, 0);
        let ability = AbilityDefinition::new("venom_bite", "Venom Bite", AbilityKind::Attack)
            .with_status(StatusSpec::new(StatusKind::Poison, 3).with_damage(2).with_chance(0.4));

        let landed = strike(&mut attacker, &mut defender, &ability, &[0.3]);
        assert!(landed.status_applied);
        assert!(defender.status_effects.has(StatusKind::Poison));

        let mut other = fighter(10, 0);
        let missed = strike(&mut attacker, &mut other, &ability, &[0.6]);
        assert!(!missed.status_applied);
        assert_eq!(missed.status, Some(StatusApplication::Resisted));
        assert!(!other.status_effects.has(StatusKind::Poison));
    }

    #[test]
    fn repeated_on_hit_status_reports_refresh() {
        let mut attacker = fighter(10, 0);
        let mut defender = fighter(40, 0);
        let ability = AbilityDefinition::new("venom_bite", "Venom Bite", AbilityKind::Attack)
            .with_status(StatusSpec::new(StatusKind::Poison, 3).with_damage(2));

        let first = strike(&mut attacker, &mut defender, &ability, &[0.0]);
        assert_eq!(first.status, Some(StatusApplication::Applied));
        let second = strike(&mut attacker, &mut defender, &ability, &[0.0]);
        assert_eq!(second.status, Some(StatusApplication::Refreshed));
        assert!(second.status_applied);
        assert_eq!(defender.status_effects.len(), 1);
    }

    #[test]
    fn basic_attack_offers_no_status() {
        let mut attacker = fighter(10, 0);
        let mut defender = fighter(10, 0);
        let result = strike(&mut attacker, &mut defender, &AbilityDefinition::basic_attack(), &[]);
        assert_eq!(result.status, None);
    }
}
