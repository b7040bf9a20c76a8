//! Player actions and the shared ability resolution path.

use crate::combat::{
    AttackContext, DamageResult, apply_status, resolve_attack, resolve_self_heal,
};
use crate::encounter::instantiate;
use crate::env::{AbilityDefinition, AbilityKind, ItemDefinition, ItemEffect, StatusSpec};
use crate::state::{EncounterSession, Outcome, Phase};

use super::{
    ActionError, CombatEngine, CombatEvent, EventKind, Slot, StatusChange, StatusChangeKind,
    actor_mut, new_event, pair_mut,
};

/// One action offered by the controller during the player's turn.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum PlayerAction {
    BasicAttack,
    Ability(String),
    UseItem(String),
    Retreat,
}

impl CombatEngine<'_> {
    /// Resolves exactly one player action.
    ///
    /// `target` is a roster index; `None` selects the first living hostile.
    /// A rejected action leaves the session untouched. A failed retreat still
    /// ends the player's turn.
    pub fn submit_player_action(
        &mut self,
        session: &mut EncounterSession,
        action: PlayerAction,
        target: Option<usize>,
    ) -> Result<Vec<CombatEvent>, ActionError> {
        let target = self.validate_player_action(session, &action, target)?;
        let start = session.events().len();
        tracing::debug!(?action, target, round = session.round, "player action");

        match action {
            PlayerAction::BasicAttack => {
                let ability = AbilityDefinition::basic_attack();
                self.perform_ability(session, Slot::Player, &ability, Slot::Hostile(target));
            }
            PlayerAction::Ability(id) => {
                let Some(ability) = session.player.ability_slot(&id).map(|s| s.ability.clone())
                else {
                    return Err(ActionError::StateMismatch(format!(
                        "ability slot '{id}' vanished"
                    )));
                };
                self.perform_ability(session, Slot::Player, &ability, Slot::Hostile(target));
            }
            PlayerAction::UseItem(id) => {
                let Some(item) = self.env.items().item(&id) else {
                    return Err(ActionError::StateMismatch(format!("item '{id}' vanished")));
                };
                self.use_item(session, item, target);
            }
            PlayerAction::Retreat => self.attempt_retreat(session),
        }

        if !session.is_over() {
            session.phase = Phase::Enemy;
        }
        Ok(session.events_since(start))
    }

    /// Checks the request against the session without mutating it and
    /// returns the resolved target index.
    fn validate_player_action(
        &self,
        session: &EncounterSession,
        action: &PlayerAction,
        target: Option<usize>,
    ) -> Result<usize, ActionError> {
        if session.is_over() {
            return Err(ActionError::EncounterOver);
        }
        if session.phase != Phase::Player {
            return Err(ActionError::WrongPhase {
                expected: Phase::Player,
                current: session.phase,
            });
        }
        let player = &session.player;
        if player.is_defeated() {
            return Err(ActionError::ActorDefeated);
        }

        let target = match target {
            Some(index) => match session.hostiles.get(index) {
                Some(hostile) if hostile.is_alive() => index,
                _ => return Err(ActionError::InvalidTarget { index }),
            },
            None => session
                .first_living_hostile()
                .ok_or(ActionError::EncounterOver)?,
        };

        match action {
            PlayerAction::BasicAttack => {}
            PlayerAction::Ability(id) => {
                let slot = player
                    .ability_slot(id)
                    .ok_or_else(|| ActionError::AbilityNotKnown(id.clone()))?;
                let ability = &slot.ability;
                if ability.is_passive() || matches!(ability.kind, AbilityKind::Summon(_)) {
                    return Err(ActionError::AbilityNotUsable(id.clone()));
                }
                if !slot.is_ready() {
                    return Err(ActionError::OnCooldown {
                        ability: id.clone(),
                        remaining: slot.cooldown_remaining,
                    });
                }
                if player.mana < ability.mana_cost {
                    return Err(ActionError::InsufficientMana {
                        ability: id.clone(),
                        required: ability.mana_cost,
                        available: player.mana,
                    });
                }
            }
            PlayerAction::UseItem(id) => {
                if session.item_quantity(id) == 0 {
                    return Err(ActionError::ItemNotInInventory(id.clone()));
                }
                if self.env.items().item(id).is_none() {
                    return Err(ActionError::ItemNotFound(id.clone()));
                }
            }
            PlayerAction::Retreat => {
                if player.is_immobilized() {
                    return Err(ActionError::Immobilized);
                }
            }
        }
        Ok(target)
    }

    fn attempt_retreat(&mut self, session: &mut EncounterSession) {
        let chance = self
            .env
            .config()
            .retreat
            .chance(session.player.attributes.agility);
        let id = session.player.id;

        if self.rng.chance(chance) {
            tracing::info!(chance, "retreat succeeded");
            self.finish(session, Outcome::Retreat);
            let event = new_event(session, EventKind::RetreatSucceeded, id);
            self.emit(session, event);
        } else {
            tracing::debug!(chance, "retreat failed");
            let event = new_event(session, EventKind::RetreatFailed, id);
            self.emit(session, event);
        }
    }

    fn use_item(&mut self, session: &mut EncounterSession, item: &ItemDefinition, target: usize) {
        if let Some(quantity) = session.inventory.get_mut(&item.id) {
            *quantity = quantity.saturating_sub(1);
            if *quantity == 0 {
                session.inventory.remove(&item.id);
            }
        }
        session.items_consumed.push(item.id.clone());

        let player_id = session.player.id;
        let mut event = new_event(session, EventKind::ItemUsed, player_id).with_item(&item.id);
        match item.effect {
            ItemEffect::Heal { amount } => {
                let healed = session.player.heal(amount);
                event = event
                    .with_target(player_id)
                    .with_healing(healed)
                    .with_new_health(session.player.health());
            }
            ItemEffect::RestoreMana { amount } => {
                let restored = session.player.restore_mana(amount);
                event = event.with_target(player_id);
                event
                    .descriptions
                    .push(format!("{} restores {restored} mana", session.player.name));
            }
            ItemEffect::Cleanse => {
                let removed = session
                    .player
                    .status_effects
                    .remove_where(|e| e.kind.is_harmful());
                session.player.recompute_stats();
                event = event.with_target(player_id);
                for kind in removed {
                    event.push_status(StatusChange::new(player_id, kind, StatusChangeKind::Removed));
                }
            }
            ItemEffect::Damage { amount } => {
                if let Some(hostile) = session.hostiles.get_mut(target) {
                    let dealt = hostile.take_damage(amount);
                    event = event
                        .with_target(hostile.id)
                        .with_new_health(hostile.health())
                        .with_damage(DamageResult {
                            amount_dealt: dealt,
                            hits: 1,
                            ..Default::default()
                        });
                }
            }
        }
        self.emit(session, event);
    }

    /// Resolves `ability` for `user`. `target` is used by opponent-targeted
    /// kinds only. Pays mana and starts the cooldown first. Returns true if
    /// the encounter ended.
    pub(super) fn perform_ability(
        &mut self,
        session: &mut EncounterSession,
        user: Slot,
        ability: &AbilityDefinition,
        target: Slot,
    ) -> bool {
        let Some(actor) = actor_mut(session, user) else {
            return false;
        };
        if !ability.is_basic_attack() {
            actor.spend_mana(ability.mana_cost);
            if let Some(slot) = actor.ability_slot_mut(&ability.id) {
                slot.trigger();
            }
        }

        match &ability.kind {
            AbilityKind::Attack | AbilityKind::AttackHeal(_) => {
                self.perform_attack(session, user, ability, target)
            }
            AbilityKind::Heal(spec) => {
                let Some(actor) = actor_mut(session, user) else {
                    return false;
                };
                let healed = resolve_self_heal(actor, spec);
                let (id, health) = (actor.id, actor.health());
                let event = new_event(session, EventKind::Heal, id)
                    .with_target(id)
                    .with_ability(&ability.id)
                    .with_healing(healed)
                    .with_new_health(health);
                self.emit(session, event)
            }
            AbilityKind::Buff(spec) | AbilityKind::PassiveBuff(spec) => {
                self.apply_self_status(session, user, ability, spec, EventKind::Buff)
            }
            AbilityKind::Special(effect) => {
                let spec = effect.as_status();
                self.apply_self_status(session, user, ability, &spec, EventKind::Special)
            }
            AbilityKind::Debuff => self.perform_debuff(session, user, ability, target),
            AbilityKind::Summon(_) => self.perform_summon(session, user, ability),
            AbilityKind::PassiveHeal(_) => {
                tracing::warn!(ability = %ability.id, "passive heal used as an action; ignored");
                false
            }
        }
    }

    fn perform_attack(
        &mut self,
        session: &mut EncounterSession,
        user: Slot,
        ability: &AbilityDefinition,
        target: Slot,
    ) -> bool {
        let config = self.env.config();
        for defender_slot in opponents(session, user, ability, target) {
            let Some((attacker, defender)) = pair_mut(session, user, defender_slot) else {
                continue;
            };
            if attacker.is_defeated() {
                return false;
            }
            if defender.is_defeated() {
                continue;
            }

            let context = AttackContext::for_attack(attacker, ability);
            let result = resolve_attack(attacker, defender, ability, context, config, &mut *self.rng);
            let (attacker_id, defender_id, health) = (attacker.id, defender.id, defender.health());

            let mut event = new_event(session, EventKind::Attack, attacker_id)
                .with_target(defender_id)
                .with_ability(&ability.id)
                .with_new_health(health);
            if let (Some(spec), Some(application)) = (&ability.status_effect, result.status) {
                event.push_status(StatusChange::new(defender_id, spec.kind, application));
            }
            if self.emit(session, event.with_damage(result)) {
                return true;
            }
        }

        let AbilityKind::AttackHeal(spec) = &ability.kind else {
            return false;
        };
        let Some(actor) = actor_mut(session, user) else {
            return false;
        };
        if actor.is_defeated() {
            return false;
        }
        let healed = resolve_self_heal(actor, spec);
        let (id, health) = (actor.id, actor.health());
        let event = new_event(session, EventKind::Heal, id)
            .with_target(id)
            .with_ability(&ability.id)
            .with_healing(healed)
            .with_new_health(health);
        self.emit(session, event)
    }

    fn apply_self_status(
        &mut self,
        session: &mut EncounterSession,
        user: Slot,
        ability: &AbilityDefinition,
        spec: &StatusSpec,
        kind: EventKind,
    ) -> bool {
        let Some(actor) = actor_mut(session, user) else {
            return false;
        };
        let application = apply_status(actor, spec, None, &mut *self.rng);
        let (id, health) = (actor.id, actor.health());
        let mut event = new_event(session, kind, id)
            .with_target(id)
            .with_ability(&ability.id)
            .with_new_health(health);
        event.push_status(StatusChange::new(id, spec.kind, application));
        self.emit(session, event)
    }

    fn perform_debuff(
        &mut self,
        session: &mut EncounterSession,
        user: Slot,
        ability: &AbilityDefinition,
        target: Slot,
    ) -> bool {
        let Some(spec) = ability.status_effect.as_ref() else {
            tracing::warn!(ability = %ability.id, "debuff without a status payload");
            return false;
        };
        let Some(user_id) = actor_mut(session, user).map(|a| a.id) else {
            return false;
        };

        for defender_slot in opponents(session, user, ability, target) {
            let Some(defender) = actor_mut(session, defender_slot) else {
                continue;
            };
            if defender.is_defeated() {
                continue;
            }
            let application = apply_status(defender, spec, None, &mut *self.rng);
            let (defender_id, health) = (defender.id, defender.health());
            let mut event = new_event(session, EventKind::Debuff, user_id)
                .with_target(defender_id)
                .with_ability(&ability.id)
                .with_new_health(health);
            event.push_status(StatusChange::new(defender_id, spec.kind, application));
            if self.emit(session, event) {
                return true;
            }
        }
        false
    }

    /// Appends the summoned hostiles to the roster; they act from the next
    /// enemy phase.
    fn perform_summon(
        &mut self,
        session: &mut EncounterSession,
        user: Slot,
        ability: &AbilityDefinition,
    ) -> bool {
        let AbilityKind::Summon(spec) = &ability.kind else {
            return false;
        };
        let Some((user_id, user_name)) = actor_mut(session, user).map(|a| (a.id, a.name.clone()))
        else {
            return false;
        };

        let count = self.rng.range_inclusive(spec.count.min, spec.count.max);
        let mut summoned = 0;
        for _ in 0..count {
            let id = session.allocate_id();
            let Some(actor) = instantiate(&self.env, &spec.template, 0, id) else {
                continue;
            };
            session.hostiles.push(actor);
            summoned += 1;
            let index = session.hostiles.len() - 1;
            self.apply_passive_buffs(session, Slot::Hostile(index));
        }

        let mut event = new_event(session, EventKind::Summon, user_id).with_ability(&ability.id);
        event
            .descriptions
            .push(format!("{user_name} summons {summoned} {}", spec.template));
        tracing::debug!(summoner = %user_name, template = %spec.template, summoned, "summon resolved");
        self.emit(session, event)
    }
}

/// Opponents hit by `ability`: every living hostile for a player area
/// ability, otherwise the single chosen target.
fn opponents(
    session: &EncounterSession,
    user: Slot,
    ability: &AbilityDefinition,
    target: Slot,
) -> Vec<Slot> {
    match user {
        Slot::Player if ability.area_effect => session
            .living_hostiles()
            .map(|(index, _)| Slot::Hostile(index))
            .collect(),
        Slot::Player => vec![target],
        Slot::Hostile(_) => vec![Slot::Player],
    }
}
