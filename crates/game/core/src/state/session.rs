//! Encounter session: the single mutable value an engine call works on.

use std::collections::BTreeMap;

use crate::engine::CombatEvent;
use crate::rewards::RewardSummary;

use super::actor::{Actor, ActorId};

/// Whose step comes next.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Phase {
    Player,
    Enemy,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::IntoStaticStr)]
#[strum(serialize_all = "snake_case")]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Outcome {
    Ongoing,
    Victory,
    Defeat,
    Retreat,
}

impl Outcome {
    pub fn is_terminal(self) -> bool {
        self != Self::Ongoing
    }
}

/// One encounter from roster creation to a terminal outcome.
///
/// Owned exclusively by the controller that created it. Every mutation goes
/// through [`CombatEngine`](crate::engine::CombatEngine).
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct EncounterSession {
    pub player: Actor,
    /// Hostiles in fixed roster order; defeated actors stay for loot.
    pub hostiles: Vec<Actor>,
    /// Starts at 1.
    pub round: u32,
    pub phase: Phase,
    pub outcome: Outcome,
    /// Consumables available to the player (id to quantity).
    pub inventory: BTreeMap<String, u32>,
    /// Item ids used during the encounter, in use order.
    pub items_consumed: Vec<String>,
    /// Set once a terminal outcome is reached.
    pub rewards: Option<RewardSummary>,
    events: Vec<CombatEvent>,
    next_id: u32,
}

impl EncounterSession {
    /// Creates a session in the first round. Hostile ids are reassigned in
    /// roster order starting after the player.
    pub fn new(player: Actor, hostiles: Vec<Actor>, inventory: BTreeMap<String, u32>) -> Self {
        let mut player = player;
        player.id = ActorId::PLAYER;

        let mut next_id = ActorId::PLAYER.0 + 1;
        let hostiles = hostiles
            .into_iter()
            .map(|mut hostile| {
                hostile.id = ActorId(next_id);
                next_id += 1;
                hostile
            })
            .collect();

        Self {
            player,
            hostiles,
            round: 1,
            phase: Phase::Player,
            outcome: Outcome::Ongoing,
            inventory,
            items_consumed: Vec::new(),
            rewards: None,
            events: Vec::new(),
            next_id,
        }
    }

    pub fn is_over(&self) -> bool {
        self.outcome.is_terminal()
    }

    pub fn actor(&self, id: ActorId) -> Option<&Actor> {
        if id.is_player() {
            return Some(&self.player);
        }
        self.hostiles.iter().find(|h| h.id == id)
    }

    /// Index of the first hostile still standing.
    pub fn first_living_hostile(&self) -> Option<usize> {
        self.hostiles.iter().position(Actor::is_alive)
    }

    pub fn living_hostiles(&self) -> impl Iterator<Item = (usize, &Actor)> {
        self.hostiles.iter().enumerate().filter(|(_, h)| h.is_alive())
    }

    pub fn all_hostiles_defeated(&self) -> bool {
        self.hostiles.iter().all(Actor::is_defeated)
    }

    pub fn defeated_hostiles(&self) -> impl Iterator<Item = &Actor> {
        self.hostiles.iter().filter(|h| h.is_defeated())
    }

    pub fn item_quantity(&self, id: &str) -> u32 {
        self.inventory.get(id).copied().unwrap_or(0)
    }

    /// Full event history of the encounter.
    pub fn events(&self) -> &[CombatEvent] {
        &self.events
    }

    pub(crate) fn record(&mut self, event: CombatEvent) {
        self.events.push(event);
    }

    pub(crate) fn events_since(&self, start: usize) -> Vec<CombatEvent> {
        self.events[start.min(self.events.len())..].to_vec()
    }

    pub(crate) fn allocate_id(&mut self) -> ActorId {
        let id = ActorId(self.next_id);
        self.next_id += 1;
        id
    }

    /// Splits the session into the player and the hostile roster.
    pub(crate) fn combatants_mut(&mut self) -> (&mut Actor, &mut [Actor]) {
        (&mut self.player, &mut self.hostiles)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::Side;

    fn hostile(name: &str) -> Actor {
        Actor::new(ActorId(99), name, Side::Hostile, 1, 10, 3, 1)
    }

    #[test]
    fn new_session_starts_in_first_player_turn() {
        let player = Actor::new(ActorId(7), "Hero", Side::Player, 1, 40, 10, 2);
        let session = EncounterSession::new(player, vec![hostile("a"), hostile("b")], BTreeMap::new());

        assert_eq!(session.round, 1);
        assert_eq!(session.phase, Phase::Player);
        assert_eq!(session.outcome, Outcome::Ongoing);
        assert_eq!(session.player.id, ActorId::PLAYER);
        let ids: Vec<_> = session.hostiles.iter().map(|h| h.id).collect();
        assert_eq!(ids, vec![ActorId(1), ActorId(2)]);
    }

    #[test]
    fn allocated_ids_follow_roster() {
        let player = Actor::new(ActorId::PLAYER, "Hero", Side::Player, 1, 40, 10, 2);
        let mut session = EncounterSession::new(player, vec![hostile("a")], BTreeMap::new());
        assert_eq!(session.allocate_id(), ActorId(2));
        assert_eq!(session.allocate_id(), ActorId(3));
    }

    #[test]
    fn first_living_hostile_skips_defeated() {
        let player = Actor::new(ActorId::PLAYER, "Hero", Side::Player, 1, 40, 10, 2);
        let mut session =
            EncounterSession::new(player, vec![hostile("a"), hostile("b")], BTreeMap::new());
        session.hostiles[0].take_damage(100);
        assert_eq!(session.first_living_hostile(), Some(1));
        assert!(!session.all_hostiles_defeated());
        session.hostiles[1].take_damage(100);
        assert!(session.all_hostiles_defeated());
        assert_eq!(session.defeated_hostiles().count(), 2);
    }
}
