//! Phase sequencing: player-turn entry, the enemy phase and round advance.

use crate::combat::{DamageResult, tick_statuses};
use crate::env::AbilityDefinition;
use crate::state::{Actor, EncounterSession, Phase};

use super::{
    ActionError, CombatEngine, CombatEvent, EventKind, Slot, StatusChange, StatusChangeKind,
    actor_mut, new_event,
};

impl CombatEngine<'_> {
    /// Runs the enemy phase, then the round advance and the next player-turn
    /// entry.
    ///
    /// If the player is stunned on entry the session stays in the enemy phase
    /// and the controller calls `advance` again.
    pub fn advance(
        &mut self,
        session: &mut EncounterSession,
    ) -> Result<Vec<CombatEvent>, ActionError> {
        if session.is_over() {
            return Err(ActionError::EncounterOver);
        }
        if session.phase != Phase::Enemy {
            return Err(ActionError::WrongPhase {
                expected: Phase::Enemy,
                current: session.phase,
            });
        }

        let start = session.events().len();
        if !self.run_enemy_phase(session) {
            self.advance_round(session);
            self.begin_player_turn(session);
        }
        Ok(session.events_since(start))
    }

    /// Player-turn entry: passive heals, status tick, stun check.
    pub(super) fn begin_player_turn(&mut self, session: &mut EncounterSession) {
        session.phase = Phase::Player;
        self.apply_passive_heals(session, Slot::Player);
        if self.tick_actor(session, Slot::Player) {
            return;
        }

        if session.player.is_stunned() {
            let id = session.player.id;
            let event = new_event(session, EventKind::Stunned, id);
            self.emit(session, event);
            session.phase = Phase::Enemy;
        }
    }

    /// Runs one turn per living hostile. Actions are chosen up front so that
    /// hostiles holding a priority ability take their turns first; roster
    /// order decides otherwise. Each turn heals from passives, ticks statuses,
    /// checks the stun and then acts, and the next turn starts only after the
    /// previous one resolved. Returns true if the encounter ended.
    fn run_enemy_phase(&mut self, session: &mut EncounterSession) -> bool {
        session.phase = Phase::Enemy;
        let mut plan: Vec<(usize, AbilityDefinition)> = Vec::with_capacity(session.hostiles.len());
        for index in 0..session.hostiles.len() {
            if session.hostiles[index].is_alive() {
                let ability = self.select_enemy_ability(&session.hostiles[index]);
                plan.push((index, ability));
            }
        }
        plan.sort_by_key(|(_, ability)| !ability.priority);

        for (index, ability) in plan {
            if self.run_hostile_turn(session, index, &ability) {
                return true;
            }
        }
        false
    }

    /// One hostile turn. The planned action is dropped if the hostile died
    /// earlier in the phase or its tick stuns or kills it.
    fn run_hostile_turn(
        &mut self,
        session: &mut EncounterSession,
        index: usize,
        ability: &AbilityDefinition,
    ) -> bool {
        if session.hostiles[index].is_defeated() {
            return false;
        }
        self.apply_passive_heals(session, Slot::Hostile(index));
        if self.tick_actor(session, Slot::Hostile(index)) {
            return true;
        }

        let hostile = &session.hostiles[index];
        if hostile.is_defeated() {
            return false;
        }
        if hostile.is_stunned() {
            let id = hostile.id;
            let event = new_event(session, EventKind::Stunned, id);
            return self.emit(session, event);
        }

        tracing::debug!(hostile = %hostile.name, ability = %ability.id, "hostile acts");
        self.perform_ability(session, Slot::Hostile(index), ability, Slot::Player)
    }

    /// Rolls whether the hostile uses an ability, then picks uniformly among
    /// the ready ones. Falls back to the basic attack.
    fn select_enemy_ability(&mut self, hostile: &Actor) -> AbilityDefinition {
        let has_actions = hostile.abilities.iter().any(|slot| !slot.ability.is_passive());
        if !has_actions {
            return AbilityDefinition::basic_attack();
        }
        if !self.rng.chance(self.env.config().enemy_ability_chance) {
            return AbilityDefinition::basic_attack();
        }

        let ready: Vec<_> = hostile.ready_abilities().collect();
        if ready.is_empty() {
            return AbilityDefinition::basic_attack();
        }
        ready[self.rng.index(ready.len())].ability.clone()
    }

    /// Decrements every cooldown, regenerates player mana and starts the next
    /// round.
    fn advance_round(&mut self, session: &mut EncounterSession) {
        session.player.tick_cooldowns();
        for hostile in &mut session.hostiles {
            hostile.tick_cooldowns();
        }
        session
            .player
            .restore_mana(self.env.config().mana_regen_per_round);

        session.round += 1;
        let event = new_event(session, EventKind::RoundAdvanced, session.player.id);
        self.emit(session, event);
        tracing::debug!(round = session.round, "round advanced");
    }

    /// Ticks statuses on one combatant and records the result. Returns true if
    /// the tick ended the encounter.
    pub(super) fn tick_actor(&mut self, session: &mut EncounterSession, slot: Slot) -> bool {
        let config = self.env.config();
        let Some(actor) = actor_mut(session, slot) else {
            return false;
        };
        let report = tick_statuses(actor, config);
        if report.is_empty() {
            return false;
        }

        let (id, health) = (actor.id, actor.health());
        let mut event = new_event(session, EventKind::StatusTick, id)
            .with_target(id)
            .with_healing(report.total_healing)
            .with_new_health(health);
        if report.total_damage > 0 {
            event.damage = Some(DamageResult {
                amount_dealt: report.total_damage,
                ..DamageResult::default()
            });
        }
        for kind in &report.expired {
            event.push_status(StatusChange::new(id, *kind, StatusChangeKind::Expired));
        }
        event.descriptions = report.descriptions;
        self.emit(session, event)
    }
}
