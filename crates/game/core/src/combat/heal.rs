//! Heal resolution.

use crate::env::HealSpec;
use crate::state::Actor;

/// `base + floor(scaling_value * spec.scaling) + floor(level * spec.level_factor)`.
pub fn heal_amount(spec: &HealSpec, scaling_value: u32, level: u32) -> u32 {
    let scaled = (scaling_value as f64 * spec.scaling).floor().max(0.0) as u32;
    let levelled = (level as f64 * spec.level_factor).floor().max(0.0) as u32;
    spec.base.saturating_add(scaled).saturating_add(levelled)
}

/// Heals `target` and returns the amount actually restored, which is less
/// than requested when the target is near full health.
pub fn resolve_heal(target: &mut Actor, spec: &HealSpec, scaling_value: u32, level: u32) -> u32 {
    let requested = heal_amount(spec, scaling_value, level);
    let restored = target.heal(requested);
    tracing::debug!(target = %target.name, requested, restored, "heal resolved");
    restored
}

/// Heals an actor using its own attribute and level for scaling.
pub fn resolve_self_heal(actor: &mut Actor, spec: &HealSpec) -> u32 {
    let scaling_value = spec.attribute.value_of(actor);
    let level = actor.level;
    resolve_heal(actor, spec, scaling_value, level)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::env::ScalingAttribute;
    use crate::state::{ActorId, Attributes, Side};

    #[test]
    fn formula_floors_each_term() {
        let spec = HealSpec {
            base: 10,
            attribute: ScalingAttribute::Intelligence,
            scaling: 1.5,
            level_factor: 0.5,
        };
        assert_eq!(heal_amount(&spec, 7, 3), 10 + 10 + 1);
    }

    #[test]
    fn returns_actual_amount_near_full_health() {
        let mut actor = Actor::new(ActorId::PLAYER, "Hero", Side::Player, 1, 50, 8, 2);
        actor.take_damage(5);
        let restored = resolve_heal(&mut actor, &HealSpec::flat(20), 0, 1);
        assert_eq!(restored, 5);
        assert_eq!(actor.health(), 50);
    }

    #[test]
    fn self_heal_reads_own_attribute() {
        let mut actor = Actor::new(ActorId::PLAYER, "Hero", Side::Player, 4, 100, 8, 2)
            .with_attributes(Attributes {
                vitality: 10,
                ..Attributes::default()
            });
        actor.take_damage(60);
        let spec = HealSpec {
            base: 5,
            attribute: ScalingAttribute::Vitality,
            scaling: 2.0,
            level_factor: 1.0,
        };
        assert_eq!(resolve_self_heal(&mut actor, &spec), 29);
    }
}
