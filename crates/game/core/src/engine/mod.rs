//! Turn scheduling and action resolution.
//!
//! The [`CombatEngine`] is the only writer of an [`EncounterSession`]. It
//! exposes synchronous step functions for a controller:
//!
//! - [`start_encounter`](CombatEngine::start_encounter) /
//!   [`open_session`](CombatEngine::open_session) build the session and enter
//!   the first player turn
//! - [`submit_player_action`](CombatEngine::submit_player_action) resolves
//!   exactly one player action
//! - [`advance`](CombatEngine::advance) runs the enemy phase, the round
//!   advance and the next player-turn entry
//!
//! Every step returns the events it produced and appends them to the
//! session's history. Terminal conditions are checked after every event.

mod actions;
mod autoplay;
mod errors;
mod events;
mod turns;

pub use actions::PlayerAction;
pub use autoplay::{AggressivePolicy, PlayerPolicy};
pub use errors::ActionError;
pub use events::{CombatEvent, EventKind, StatusChange, StatusChangeKind};

use std::collections::BTreeMap;

use crate::combat::{apply_status, resolve_self_heal};
use crate::encounter::EncounterFactory;
use crate::env::{AbilityKind, CombatEnv, RngOracle};
use crate::rewards::{RewardSummary, roll_loot};
use crate::state::{Actor, EncounterSession, Outcome, PlayerProfile};

/// Addresses a combatant inside a session.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Slot {
    Player,
    Hostile(usize),
}

/// Drives encounter sessions with one environment and one random stream.
pub struct CombatEngine<'a> {
    env: CombatEnv<'a>,
    rng: &'a mut dyn RngOracle,
}

impl<'a> CombatEngine<'a> {
    pub fn new(env: CombatEnv<'a>, rng: &'a mut dyn RngOracle) -> Self {
        Self { env, rng }
    }

    pub fn env(&self) -> &CombatEnv<'a> {
        &self.env
    }

    /// Builds the player from `profile`, generates a roster for the zone and
    /// opens the session.
    pub fn start_encounter(
        &mut self,
        profile: &PlayerProfile,
        zone_id: &str,
        zone_level: u32,
        is_boss: bool,
    ) -> EncounterSession {
        let hostiles = EncounterFactory::new(self.env).build(
            zone_id,
            zone_level,
            None,
            is_boss,
            &mut *self.rng,
        );
        let player = profile.to_actor(self.env.abilities());
        self.open_session(player, hostiles, profile.inventory.clone())
    }

    /// Opens a session over an explicit roster.
    ///
    /// Passive buffs are granted to every combatant, then the first player
    /// turn is entered (which ticks the player's statuses).
    pub fn open_session(
        &mut self,
        player: Actor,
        hostiles: Vec<Actor>,
        inventory: BTreeMap<String, u32>,
    ) -> EncounterSession {
        let mut session = EncounterSession::new(player, hostiles, inventory);
        tracing::info!(
            player = %session.player.name,
            hostiles = session.hostiles.len(),
            "encounter opened"
        );

        self.apply_passive_buffs(&mut session, Slot::Player);
        for index in 0..session.hostiles.len() {
            self.apply_passive_buffs(&mut session, Slot::Hostile(index));
        }
        if !self.terminal_reached(&mut session) {
            self.begin_player_turn(&mut session);
        }
        session
    }

    // ========================================================================
    // Terminal handling
    // ========================================================================

    /// Sets the outcome if the player or the whole roster has fallen.
    /// Defeat wins when both happen in the same step.
    fn check_terminal(&mut self, session: &mut EncounterSession) -> Option<Outcome> {
        if session.is_over() {
            return Some(session.outcome);
        }
        let outcome = if session.player.is_defeated() {
            Outcome::Defeat
        } else if session.all_hostiles_defeated() {
            Outcome::Victory
        } else {
            return None;
        };
        self.finish(session, outcome);
        Some(outcome)
    }

    fn terminal_reached(&mut self, session: &mut EncounterSession) -> bool {
        self.check_terminal(session).is_some()
    }

    /// Ends the encounter and computes the reward summary.
    fn finish(&mut self, session: &mut EncounterSession, outcome: Outcome) {
        session.outcome = outcome;
        let consumed = session.items_consumed.clone();
        let summary = match outcome {
            Outcome::Victory => {
                RewardSummary::victory(roll_loot(session.defeated_hostiles(), &mut *self.rng), consumed)
            }
            _ => RewardSummary::empty(outcome, consumed),
        };
        tracing::info!(
            %outcome,
            round = session.round,
            gold = summary.gold_gained,
            experience = summary.experience_gained,
            "encounter finished"
        );
        session.rewards = Some(summary);
    }

    /// Records `event`, stamping it with the terminal outcome if this step
    /// ended the encounter. Returns true when the encounter is over.
    fn emit(&mut self, session: &mut EncounterSession, mut event: CombatEvent) -> bool {
        event.terminal = self.check_terminal(session);
        let over = event.terminal.is_some();
        session.record(event);
        over
    }

    // ========================================================================
    // Passive abilities
    // ========================================================================

    fn apply_passive_buffs(&mut self, session: &mut EncounterSession, slot: Slot) {
        let Some(actor) = actor_mut(session, slot) else {
            return;
        };
        let passives: Vec<_> = actor
            .abilities
            .iter()
            .filter_map(|s| match &s.ability.kind {
                AbilityKind::PassiveBuff(spec) => Some(spec.clone()),
                _ => None,
            })
            .collect();
        if passives.is_empty() {
            return;
        }

        let id = actor.id;
        let changes: Vec<_> = passives
            .iter()
            .map(|spec| {
                let application = apply_status(actor, spec, Some(1.0), &mut *self.rng);
                StatusChange::new(id, spec.kind, application)
            })
            .collect();

        let mut event = new_event(session, EventKind::PassiveApplied, id).with_target(id);
        event.status_changes = changes;
        self.emit(session, event);
    }

    fn apply_passive_heals(&mut self, session: &mut EncounterSession, slot: Slot) {
        let Some(actor) = actor_mut(session, slot) else {
            return;
        };
        let passives: Vec<_> = actor
            .abilities
            .iter()
            .filter_map(|s| match &s.ability.kind {
                AbilityKind::PassiveHeal(spec) => Some((s.ability.id.clone(), spec.clone())),
                _ => None,
            })
            .collect();

        for (ability_id, spec) in passives {
            let Some(actor) = actor_mut(session, slot) else {
                return;
            };
            let healed = resolve_self_heal(actor, &spec);
            if healed == 0 {
                continue;
            }
            let (id, health) = (actor.id, actor.health());
            let event = new_event(session, EventKind::PassiveHeal, id)
                .with_target(id)
                .with_ability(ability_id)
                .with_healing(healed)
                .with_new_health(health);
            self.emit(session, event);
        }
    }
}

pub(crate) fn actor_mut(session: &mut EncounterSession, slot: Slot) -> Option<&mut Actor> {
    match slot {
        Slot::Player => Some(&mut session.player),
        Slot::Hostile(index) => session.hostiles.get_mut(index),
    }
}

/// Borrows an attacker and a defender from opposite sides.
pub(crate) fn pair_mut(
    session: &mut EncounterSession,
    first: Slot,
    second: Slot,
) -> Option<(&mut Actor, &mut Actor)> {
    let (player, hostiles) = session.combatants_mut();
    match (first, second) {
        (Slot::Player, Slot::Hostile(index)) => hostiles.get_mut(index).map(|h| (player, h)),
        (Slot::Hostile(index), Slot::Player) => hostiles.get_mut(index).map(|h| (h, player)),
        _ => None,
    }
}

pub(crate) fn new_event(
    session: &EncounterSession,
    kind: EventKind,
    actor: crate::state::ActorId,
) -> CombatEvent {
    CombatEvent::new(session.round, session.phase, kind, actor)
}
