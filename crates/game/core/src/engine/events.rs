//! Per-step payloads handed to presentation.
//!
//! Each event carries enough to render a step without re-deriving rules:
//! who acted on whom with what, the resolved damage, status changes, the
//! target's new health and, on the final step, the terminal outcome.

use crate::combat::{DamageResult, StatusApplication};
use crate::state::{ActorId, Outcome, Phase, StatusKind};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum EventKind {
    /// Passive buffs granted when the encounter opens or a summon arrives.
    PassiveApplied,
    /// Passive heal at the start of the owner's turn.
    PassiveHeal,
    /// Start-of-turn status processing.
    StatusTick,
    /// The actor lost its action to a stun.
    Stunned,
    Attack,
    Heal,
    Buff,
    Debuff,
    Special,
    Summon,
    ItemUsed,
    RetreatSucceeded,
    RetreatFailed,
    RoundAdvanced,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum StatusChangeKind {
    Applied,
    Refreshed,
    Resisted,
    Expired,
    Removed,
}

impl From<StatusApplication> for StatusChangeKind {
    fn from(application: StatusApplication) -> Self {
        match application {
            StatusApplication::Applied => Self::Applied,
            StatusApplication::Refreshed => Self::Refreshed,
            StatusApplication::Resisted => Self::Resisted,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StatusChange {
    pub actor_id: ActorId,
    pub status: StatusKind,
    pub change: StatusChangeKind,
}

impl StatusChange {
    pub fn new(actor_id: ActorId, status: StatusKind, change: impl Into<StatusChangeKind>) -> Self {
        Self {
            actor_id,
            status,
            change: change.into(),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CombatEvent {
    pub round: u32,
    pub phase: Phase,
    pub kind: EventKind,
    pub actor_id: ActorId,
    pub target_id: Option<ActorId>,
    pub ability_id: Option<String>,
    pub item_id: Option<String>,
    pub damage: Option<DamageResult>,
    pub healing: u32,
    pub status_changes: Vec<StatusChange>,
    /// Health of the target (or the actor for self-targeted steps) afterwards.
    pub new_health: Option<u32>,
    /// Human-readable lines from status ticks.
    pub descriptions: Vec<String>,
    /// Set on the step that ended the encounter.
    pub terminal: Option<Outcome>,
}

impl CombatEvent {
    pub fn new(round: u32, phase: Phase, kind: EventKind, actor_id: ActorId) -> Self {
        Self {
            round,
            phase,
            kind,
            actor_id,
            target_id: None,
            ability_id: None,
            item_id: None,
            damage: None,
            healing: 0,
            status_changes: Vec::new(),
            new_health: None,
            descriptions: Vec::new(),
            terminal: None,
        }
    }

    pub fn with_target(mut self, target: ActorId) -> Self {
        self.target_id = Some(target);
        self
    }

    pub fn with_ability(mut self, ability: impl Into<String>) -> Self {
        self.ability_id = Some(ability.into());
        self
    }

    pub fn with_item(mut self, item: impl Into<String>) -> Self {
        self.item_id = Some(item.into());
        self
    }

    pub fn with_damage(mut self, damage: DamageResult) -> Self {
        self.damage = Some(damage);
        self
    }

    pub fn with_healing(mut self, healing: u32) -> Self {
        self.healing = healing;
        self
    }

    pub fn with_new_health(mut self, health: u32) -> Self {
        self.new_health = Some(health);
        self
    }

    pub fn push_status(&mut self, change: StatusChange) {
        self.status_changes.push(change);
    }

    /// Total damage dealt to the target by this step, excluding reflection.
    pub fn damage_dealt(&self) -> u32 {
        self.damage.as_ref().map_or(0, |d| d.amount_dealt)
    }
}
