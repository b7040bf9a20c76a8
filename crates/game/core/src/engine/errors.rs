//! Rejections surfaced by the engine's step functions.
//!
//! A rejected request never mutates the session. The controller re-prompts
//! (recoverable) or fixes the request it built (validation).

use crate::error::{ErrorSeverity, GameError};
use crate::state::Phase;

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ActionError {
    #[error("the encounter is already over")]
    EncounterOver,

    #[error("it is not the {expected:?} phase (current: {current:?})")]
    WrongPhase { expected: Phase, current: Phase },

    #[error("the player is defeated")]
    ActorDefeated,

    #[error("no living hostile at roster index {index}")]
    InvalidTarget { index: usize },

    #[error("the player does not know ability '{0}'")]
    AbilityNotKnown(String),

    #[error("ability '{0}' cannot be used as an action")]
    AbilityNotUsable(String),

    #[error("ability '{ability}' is on cooldown for {remaining} more round(s)")]
    OnCooldown { ability: String, remaining: u32 },

    #[error("ability '{ability}' needs {required} mana, {available} available")]
    InsufficientMana {
        ability: String,
        required: u32,
        available: u32,
    },

    #[error("item '{0}' is not in the inventory")]
    ItemNotInInventory(String),

    #[error("item '{0}' is not a known consumable")]
    ItemNotFound(String),

    #[error("the player is immobilized and cannot retreat")]
    Immobilized,

    #[error("session changed between validation and resolution: {0}")]
    StateMismatch(String),
}

impl GameError for ActionError {
    fn severity(&self) -> ErrorSeverity {
        use ActionError::*;
        match self {
            OnCooldown { .. } | InsufficientMana { .. } | ItemNotInInventory(_) | Immobilized => {
                ErrorSeverity::Recoverable
            }
            EncounterOver
            | WrongPhase { .. }
            | ActorDefeated
            | InvalidTarget { .. }
            | AbilityNotKnown(_)
            | AbilityNotUsable(_)
            | ItemNotFound(_) => ErrorSeverity::Validation,
            StateMismatch(_) => ErrorSeverity::Internal,
        }
    }

    fn error_code(&self) -> &'static str {
        use ActionError::*;
        match self {
            EncounterOver => "ACTION_ENCOUNTER_OVER",
            WrongPhase { .. } => "ACTION_WRONG_PHASE",
            ActorDefeated => "ACTION_ACTOR_DEFEATED",
            InvalidTarget { .. } => "ACTION_INVALID_TARGET",
            AbilityNotKnown(_) => "ACTION_ABILITY_NOT_KNOWN",
            AbilityNotUsable(_) => "ACTION_ABILITY_NOT_USABLE",
            OnCooldown { .. } => "ACTION_ON_COOLDOWN",
            InsufficientMana { .. } => "ACTION_INSUFFICIENT_MANA",
            ItemNotInInventory(_) => "ACTION_ITEM_NOT_IN_INVENTORY",
            ItemNotFound(_) => "ACTION_ITEM_NOT_FOUND",
            Immobilized => "ACTION_IMMOBILIZED",
            StateMismatch(_) => "ACTION_STATE_MISMATCH",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exhausted_resources_are_recoverable() {
        let err = ActionError::OnCooldown {
            ability: "fireball".into(),
            remaining: 2,
        };
        assert!(err.severity().is_recoverable());
        assert_eq!(err.error_code(), "ACTION_ON_COOLDOWN");
        assert_eq!(
            err.to_string(),
            "ability 'fireball' is on cooldown for 2 more round(s)"
        );
    }

    #[test]
    fn wrong_phase_is_a_validation_error() {
        let err = ActionError::WrongPhase {
            expected: Phase::Player,
            current: Phase::Enemy,
        };
        assert_eq!(err.severity(), ErrorSeverity::Validation);
    }

    #[test]
    fn resolution_mismatch_is_internal() {
        let err = ActionError::StateMismatch("item 'potion' vanished".into());
        assert_eq!(err.severity(), ErrorSeverity::Internal);
        assert_eq!(err.error_code(), "ACTION_STATE_MISMATCH");
    }
}
