//! Common error infrastructure for combat-core.
//!
//! Domain-specific errors (`ActionError`, `CatalogError`) are defined next to
//! the operations they guard. This module provides the shared classification
//! used by callers to decide between re-prompting, substituting a default, or
//! refusing to start.
//!
//! # Design Principles
//!
//! - **Type Safety**: Each boundary has its own error enum with specific variants
//! - **Severity Classification**: Errors are categorized for recovery strategies
//! - **No silent corruption**: a rejected request never mutates the session

/// Severity level of an error, used for categorization and recovery strategies.
///
/// - **Recoverable**: the request is fine in principle but a resource is exhausted
///   (cooldown, mana, inventory); the controller re-prompts
/// - **Validation**: the request does not fit the current state (wrong phase,
///   defeated target); the controller should not have built it
/// - **Internal**: unexpected state inconsistency
/// - **Fatal**: malformed static data detected at load time
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ErrorSeverity {
    /// Recoverable error - can retry with an alternative action.
    ///
    /// Examples: ability on cooldown, not enough mana
    Recoverable,

    /// Validation error - invalid request for the current state.
    ///
    /// Examples: not the player's turn, target already defeated
    Validation,

    /// Internal error - unexpected state inconsistency.
    Internal,

    /// Fatal error - static data is unusable, no encounter may start.
    ///
    /// Examples: duplicate ability ids, zone boss missing from templates
    Fatal,
}

impl ErrorSeverity {
    /// Returns a human-readable description of this severity level.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Recoverable => "recoverable",
            Self::Validation => "validation",
            Self::Internal => "internal",
            Self::Fatal => "fatal",
        }
    }

    /// Returns true if this error is potentially recoverable.
    pub const fn is_recoverable(&self) -> bool {
        matches!(self, Self::Recoverable)
    }
}

/// Classification shared by every combat-core error enum.
pub trait GameError: core::fmt::Display + core::fmt::Debug {
    /// Returns the severity level of this error.
    fn severity(&self) -> ErrorSeverity;

    /// Returns a static string identifier for this error variant.
    ///
    /// Used as the reason code handed back to the controller.
    fn error_code(&self) -> &'static str {
        core::any::type_name::<Self>()
    }
}
