//! Status effect system for actors.
//!
//! Status effects are timed modifiers measured in the owner's turns. An actor
//! holds at most one effect per [`StatusKind`]: re-application refreshes the
//! existing entry instead of stacking.

use arrayvec::ArrayVec;
use bitflags::bitflags;

use crate::config::CombatConfig;

/// Types of status effects.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    strum::Display,
    strum::EnumString,
    strum::IntoStaticStr,
    strum::EnumIter,
)]
#[strum(serialize_all = "snake_case")]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum StatusKind {
    // ========================================================================
    // Damage over time
    // ========================================================================
    /// Flat damage per turn, or a fraction of max health.
    Poison,

    /// Flat damage per turn, or a fraction of max health.
    Burn,

    /// `ceil(max_health * bleed_fraction)` per turn.
    Bleed,

    // ========================================================================
    // Action restriction
    // ========================================================================
    /// Skips the owner's action entirely.
    Stun,

    /// Forbids retreating; attacking is still allowed.
    Immobilize,

    // ========================================================================
    // Stat modifiers
    // ========================================================================
    AttackUp,
    AttackDown,
    DefenseUp,
    DefenseDown,

    // ========================================================================
    // Defensive stances
    // ========================================================================
    /// Magnitude is the chance to evade an incoming hit.
    Dodge,

    /// Magnitude is the fraction of resolved damage sent back to the attacker.
    Reflect,

    /// Halves incoming damage before mitigation.
    Defending,

    // ========================================================================
    // Recovery
    // ========================================================================
    /// Heals per turn, flat or a fraction of max health.
    Regeneration,
}

/// Stat touched by a modifier status.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ModifiedStat {
    Attack,
    Defense,
}

impl StatusKind {
    /// Returns the stat this kind modifies and the sign applied to its magnitude.
    pub const fn stat_modifier(self) -> Option<(ModifiedStat, i64)> {
        match self {
            Self::AttackUp => Some((ModifiedStat::Attack, 1)),
            Self::AttackDown => Some((ModifiedStat::Attack, -1)),
            Self::DefenseUp => Some((ModifiedStat::Defense, 1)),
            Self::DefenseDown => Some((ModifiedStat::Defense, -1)),
            _ => None,
        }
    }

    /// Action restriction raised while this kind is ticking.
    pub const fn restriction(self) -> ActionRestrictions {
        match self {
            Self::Stun => ActionRestrictions::STUNNED,
            Self::Immobilize => ActionRestrictions::IMMOBILIZED,
            _ => ActionRestrictions::empty(),
        }
    }

    /// Negative effects removed by a cleansing item.
    pub const fn is_harmful(self) -> bool {
        matches!(
            self,
            Self::Poison
                | Self::Burn
                | Self::Bleed
                | Self::Stun
                | Self::Immobilize
                | Self::AttackDown
                | Self::DefenseDown
        )
    }
}

bitflags! {
    /// Restrictions raised by a status tick for the owner's current turn.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    pub struct ActionRestrictions: u8 {
        /// Skip the action entirely.
        const STUNNED = 0b0000_0001;
        /// Retreat is not allowed.
        const IMMOBILIZED = 0b0000_0010;
    }
}

/// A single active status effect.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StatusEffect {
    pub kind: StatusKind,
    /// Owner turns left before the effect expires.
    pub remaining: u32,
    /// Flat per-tick amount (damage-over-time and regeneration).
    pub damage: Option<u32>,
    /// Stat amount for modifiers, probability/fraction for dodge and reflect.
    pub magnitude: f64,
}

impl StatusEffect {
    pub fn new(kind: StatusKind, remaining: u32) -> Self {
        Self {
            kind,
            remaining,
            damage: None,
            magnitude: 0.0,
        }
    }

    pub fn with_damage(mut self, damage: u32) -> Self {
        self.damage = Some(damage);
        self
    }

    pub fn with_magnitude(mut self, magnitude: f64) -> Self {
        self.magnitude = magnitude;
        self
    }

    /// Signed contribution of this effect to `stat`.
    pub fn modifier_for(&self, stat: ModifiedStat) -> i64 {
        match self.kind.stat_modifier() {
            Some((modified, sign)) if modified == stat => sign * self.magnitude.round() as i64,
            _ => 0,
        }
    }
}

/// Result of inserting an effect into a [`StatusEffects`] set.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Upsert {
    Inserted,
    Refreshed,
}

/// Active status effects on an actor, keyed by kind.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StatusEffects {
    effects: ArrayVec<StatusEffect, { CombatConfig::MAX_STATUS_EFFECTS }>,
}

impl StatusEffects {
    /// Creates an empty status effect set.
    pub fn empty() -> Self {
        Self {
            effects: ArrayVec::new(),
        }
    }

    /// Checks if an effect of this kind is active.
    pub fn has(&self, kind: StatusKind) -> bool {
        self.get(kind).is_some()
    }

    pub fn get(&self, kind: StatusKind) -> Option<&StatusEffect> {
        self.effects
            .iter()
            .find(|e| e.kind == kind && e.remaining > 0)
    }

    /// Inserts `effect`, or refreshes the existing entry of the same kind.
    ///
    /// Refresh replaces duration, flat damage and magnitude with the new values.
    pub fn upsert(&mut self, effect: StatusEffect) -> Upsert {
        if let Some(existing) = self.effects.iter_mut().find(|e| e.kind == effect.kind) {
            *existing = effect;
            return Upsert::Refreshed;
        }

        // One slot per kind fits in capacity.
        self.effects.push(effect);
        Upsert::Inserted
    }

    /// Removes an effect immediately. Returns true if it was present.
    pub fn remove(&mut self, kind: StatusKind) -> bool {
        let before = self.effects.len();
        self.effects.retain(|e| e.kind != kind);
        before != self.effects.len()
    }

    /// Removes every effect matching `predicate`, returning the removed kinds.
    pub fn remove_where(
        &mut self,
        mut predicate: impl FnMut(&StatusEffect) -> bool,
    ) -> Vec<StatusKind> {
        let removed = self
            .effects
            .iter()
            .filter(|e| predicate(*e))
            .map(|e| e.kind)
            .collect();
        self.effects.retain(|e| !predicate(e));
        removed
    }

    /// Sum of all modifier contributions to `stat`.
    pub fn modifier_total(&self, stat: ModifiedStat) -> i64 {
        self.effects
            .iter()
            .filter(|e| e.remaining > 0)
            .map(|e| e.modifier_for(stat))
            .sum()
    }

    pub fn iter(&self) -> impl Iterator<Item = &StatusEffect> {
        self.effects.iter()
    }

    pub(crate) fn iter_mut(&mut self) -> impl Iterator<Item = &mut StatusEffect> {
        self.effects.iter_mut()
    }

    pub fn len(&self) -> usize {
        self.effects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.effects.is_empty()
    }
}
