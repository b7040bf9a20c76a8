/// Combat balance constants and tunable parameters.
///
/// `Default` yields the reference balance. With the `serde` feature the struct
/// deserializes from TOML; every field is optional in the file.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct CombatConfig {
    /// Critical chance of the player's basic attack.
    pub basic_crit_chance: f64,
    /// Critical multiplier used when an ability does not define its own.
    pub crit_multiplier: f64,
    /// Damage factor applied while the defender holds a defending stance.
    pub defend_factor: f64,
    /// Floor applied after mitigation (an evaded hit still deals 0).
    pub minimum_damage: u32,
    /// Fraction of max health lost per bleed tick (rounded up).
    pub bleed_fraction: f64,
    /// Fraction of max health used by poison/burn/regeneration ticks without a flat value.
    pub dot_fraction: f64,
    /// Probability that a hostile picks one of its ready abilities instead of a basic attack.
    pub enemy_ability_chance: f64,
    /// Mana restored to the player on every round advance.
    pub mana_regen_per_round: u32,
    pub retreat: RetreatRules,
    pub boss: BossScaling,
    pub encounter: EncounterRules,
}

/// Retreat chance: `min(cap, base + agility * per_agility)`.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct RetreatRules {
    pub base: f64,
    pub per_agility: f64,
    pub cap: f64,
}

impl RetreatRules {
    pub fn chance(&self, agility: u32) -> f64 {
        (self.base + agility as f64 * self.per_agility).min(self.cap)
    }
}

impl Default for RetreatRules {
    fn default() -> Self {
        Self {
            base: 0.4,
            per_agility: 0.03,
            cap: 0.7,
        }
    }
}

/// Fixed post-scale applied on top of a normal instantiation for bosses.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct BossScaling {
    pub level_bonus: u32,
    pub health_factor: f64,
    pub attack_factor: f64,
}

impl Default for BossScaling {
    fn default() -> Self {
        Self {
            level_bonus: 2,
            health_factor: 1.5,
            attack_factor: 1.2,
        }
    }
}

/// Roster sizing and level jitter for generated encounters.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct EncounterRules {
    /// Hostile count range used when the caller does not ask for a specific count.
    pub min_hostiles: u32,
    pub max_hostiles: u32,
    /// `variance = clamp(zone_level / jitter_divisor, 0, jitter_cap)`.
    pub jitter_divisor: u32,
    pub jitter_cap: u32,
}

impl EncounterRules {
    pub fn level_variance(&self, zone_level: u32) -> u32 {
        if self.jitter_divisor == 0 {
            return 0;
        }
        (zone_level / self.jitter_divisor).min(self.jitter_cap)
    }
}

impl Default for EncounterRules {
    fn default() -> Self {
        Self {
            min_hostiles: 1,
            max_hostiles: 2,
            jitter_divisor: 4,
            jitter_cap: 1,
        }
    }
}

impl CombatConfig {
    // ===== compile-time constants used as type parameters =====
    /// Capacity of an actor's status set. One slot per status kind, so it never overflows.
    pub const MAX_STATUS_EFFECTS: usize = 16;
    /// Upper bound on strikes per ability use.
    pub const MAX_HITS: u32 = 10;

    pub fn new() -> Self {
        Self {
            basic_crit_chance: 0.2,
            crit_multiplier: 1.5,
            defend_factor: 0.5,
            minimum_damage: 1,
            bleed_fraction: 0.05,
            dot_fraction: 0.05,
            enemy_ability_chance: 0.7,
            mana_regen_per_round: 0,
            retreat: RetreatRules::default(),
            boss: BossScaling::default(),
            encounter: EncounterRules::default(),
        }
    }
}

impl Default for CombatConfig {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn retreat_chance_is_capped() {
        let rules = RetreatRules::default();
        assert!((rules.chance(0) - 0.4).abs() < 1e-9);
        assert!((rules.chance(5) - 0.55).abs() < 1e-9);
        assert!((rules.chance(50) - 0.7).abs() < 1e-9);
    }

    #[test]
    fn level_variance_is_clamped() {
        let rules = EncounterRules::default();
        assert_eq!(rules.level_variance(1), 0);
        assert_eq!(rules.level_variance(3), 0);
        assert_eq!(rules.level_variance(4), 1);
        assert_eq!(rules.level_variance(40), 1);
    }
}
