//! Automatic play for unattended encounters.

use crate::env::{AbilityKind, CombatEnv, ItemEffect};
use crate::error::{ErrorSeverity, GameError};
use crate::state::{EncounterSession, Outcome, Phase};

use super::{CombatEngine, PlayerAction};

/// Chooses the player's action when no human is driving the session.
pub trait PlayerPolicy {
    /// Returns an action and an optional roster index to target.
    fn choose(
        &mut self,
        session: &EncounterSession,
        env: &CombatEnv<'_>,
    ) -> (PlayerAction, Option<usize>);
}

/// Heals when low, otherwise hits the weakest hostile with the first ready
/// damaging ability, falling back to the basic attack.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AggressivePolicy {
    /// Health ratio below which healing is preferred.
    pub heal_below: f64,
}

impl Default for AggressivePolicy {
    fn default() -> Self {
        Self { heal_below: 0.3 }
    }
}

impl PlayerPolicy for AggressivePolicy {
    fn choose(
        &mut self,
        session: &EncounterSession,
        env: &CombatEnv<'_>,
    ) -> (PlayerAction, Option<usize>) {
        let player = &session.player;

        if player.health_ratio() < self.heal_below {
            let potion = session
                .inventory
                .iter()
                .filter(|(_, quantity)| **quantity > 0)
                .map(|(id, _)| id)
                .find(|id| {
                    env.items()
                        .item(id)
                        .is_some_and(|item| matches!(item.effect, ItemEffect::Heal { .. }))
                });
            if let Some(id) = potion {
                return (PlayerAction::UseItem(id.clone()), None);
            }

            let heal = player
                .ready_abilities()
                .find(|slot| matches!(slot.ability.kind, AbilityKind::Heal(_)));
            if let Some(slot) = heal {
                return (PlayerAction::Ability(slot.ability.id.clone()), None);
            }
        }

        let target = session
            .living_hostiles()
            .min_by_key(|(_, hostile)| hostile.health())
            .map(|(index, _)| index);

        let attack = player
            .ready_abilities()
            .filter(|slot| slot.ability.deals_damage())
            .max_by(|a, b| {
                let a = a.ability.damage_multiplier.unwrap_or(1.0) * a.ability.strike_count() as f64;
                let b = b.ability.damage_multiplier.unwrap_or(1.0) * b.ability.strike_count() as f64;
                a.total_cmp(&b)
            });
        match attack {
            Some(slot) => (PlayerAction::Ability(slot.ability.id.clone()), target),
            None => (PlayerAction::BasicAttack, target),
        }
    }
}

impl CombatEngine<'_> {
    /// Drives `session` until it ends or `max_rounds` rounds have passed.
    ///
    /// Rejected policy choices fall back to a basic attack. Returns the
    /// outcome, `Ongoing` if the round limit was hit first.
    pub fn autoplay(
        &mut self,
        session: &mut EncounterSession,
        policy: &mut dyn PlayerPolicy,
        max_rounds: u32,
    ) -> Outcome {
        while !session.is_over() && session.round <= max_rounds {
            match session.phase {
                Phase::Player => {
                    let (action, target) = policy.choose(session, &self.env);
                    if let Err(error) = self.submit_player_action(session, action.clone(), target) {
                        if error.severity() == ErrorSeverity::Internal {
                            tracing::error!(code = error.error_code(), %error, "stopping autoplay");
                            break;
                        }
                        tracing::warn!(
                            code = error.error_code(),
                            severity = error.severity().as_str(),
                            %error,
                            ?action,
                            "policy action rejected; attacking instead"
                        );
                        if let Err(error) =
                            self.submit_player_action(session, PlayerAction::BasicAttack, None)
                        {
                            tracing::error!(%error, "basic attack rejected; stopping autoplay");
                            break;
                        }
                    }
                }
                Phase::Enemy => {
                    if let Err(error) = self.advance(session) {
                        tracing::error!(%error, "enemy phase rejected; stopping autoplay");
                        break;
                    }
                }
            }
        }

        if !session.is_over() {
            tracing::info!(round = session.round, "autoplay stopped at round limit");
        }
        session.outcome
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CombatConfig;
    use crate::env::{
        AbilityCatalog, AbilityDefinition, ItemCatalog, ItemDefinition, TemplateCatalog,
        ZoneTable,
    };
    use crate::state::{Actor, ActorId, Side};
    use std::collections::BTreeMap;

    fn env_parts() -> (AbilityCatalog, TemplateCatalog, ItemCatalog, ZoneTable, CombatConfig) {
        let items = ItemCatalog::from_items([ItemDefinition::new(
            "potion",
            "Potion",
            ItemEffect::Heal { amount: 20 },
        )])
        .expect("unique items");
        (
            AbilityCatalog::default(),
            TemplateCatalog::default(),
            items,
            ZoneTable::default(),
            CombatConfig::default(),
        )
    }

    #[test]
    fn low_health_prefers_potion() {
        let (abilities, templates, items, zones, config) = env_parts();
        let env = CombatEnv::new(&abilities, &templates, &items, &zones, &config);

        let mut player = Actor::new(ActorId::PLAYER, "Hero", Side::Player, 1, 100, 10, 2);
        player.take_damage(80);
        let hostile = Actor::new(ActorId(1), "Rat", Side::Hostile, 1, 10, 2, 0);
        let session = EncounterSession::new(
            player,
            vec![hostile],
            BTreeMap::from([("potion".to_string(), 1)]),
        );

        let (action, _) = AggressivePolicy::default().choose(&session, &env);
        assert_eq!(action, PlayerAction::UseItem("potion".into()));
    }

    #[test]
    fn healthy_player_uses_strongest_ready_attack_on_weakest() {
        let (abilities, templates, items, zones, config) = env_parts();
        let env = CombatEnv::new(&abilities, &templates, &items, &zones, &config);

        let player = Actor::new(ActorId::PLAYER, "Hero", Side::Player, 1, 100, 10, 2)
            .with_abilities([
                AbilityDefinition::new("jab", "Jab", AbilityKind::Attack).with_multiplier(0.8),
                AbilityDefinition::new("cleave", "Cleave", AbilityKind::Attack)
                    .with_multiplier(1.6),
            ]);
        let mut weak = Actor::new(ActorId(2), "Bat", Side::Hostile, 1, 20, 2, 0);
        weak.take_damage(15);
        let strong = Actor::new(ActorId(1), "Ogre", Side::Hostile, 1, 50, 5, 1);
        let session = EncounterSession::new(player, vec![strong, weak], BTreeMap::new());

        let (action, target) = AggressivePolicy::default().choose(&session, &env);
        assert_eq!(action, PlayerAction::Ability("cleave".into()));
        assert_eq!(target, Some(1));
    }
}
