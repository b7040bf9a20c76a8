//! Ability definitions and the ability catalog.
//!
//! Abilities are a closed, declarative set of effect primitives. Each
//! [`AbilityKind`] variant carries exactly the payload that kind needs; the
//! shared damage modifiers live on [`AbilityDefinition`].
//!
//! The catalog hands out owned copies. Callers attach their own bookkeeping
//! (e.g. cooldown counters) to the copy without touching the catalog.

use std::collections::HashMap;

use crate::state::{Actor, StatusKind};

use super::error::CatalogError;

/// Identifier of the built-in fallback attack.
pub const BASIC_ATTACK_ID: &str = "basic_attack";

/// Status payload carried by an ability.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StatusSpec {
    pub kind: StatusKind,
    /// Application chance in `[0, 1]`; `None` always applies.
    #[cfg_attr(feature = "serde", serde(default))]
    pub chance: Option<f64>,
    /// Duration in owner turns.
    pub duration: u32,
    /// Flat per-tick amount.
    #[cfg_attr(feature = "serde", serde(default))]
    pub damage: Option<u32>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub magnitude: Option<f64>,
}

impl StatusSpec {
    pub fn new(kind: StatusKind, duration: u32) -> Self {
        Self {
            kind,
            chance: None,
            duration,
            damage: None,
            magnitude: None,
        }
    }

    pub fn with_chance(mut self, chance: f64) -> Self {
        self.chance = Some(chance);
        self
    }

    pub fn with_damage(mut self, damage: u32) -> Self {
        self.damage = Some(damage);
        self
    }

    pub fn with_magnitude(mut self, magnitude: f64) -> Self {
        self.magnitude = Some(magnitude);
        self
    }
}

/// Actor value that scales a heal.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ScalingAttribute {
    #[default]
    Attack,
    Intelligence,
    Vitality,
    MaxHealth,
}

impl ScalingAttribute {
    pub fn value_of(self, actor: &Actor) -> u32 {
        match self {
            Self::Attack => actor.current_attack,
            Self::Intelligence => actor.attributes.intelligence,
            Self::Vitality => actor.attributes.vitality,
            Self::MaxHealth => actor.max_health(),
        }
    }
}

/// `amount = base + floor(attribute * scaling) + floor(level * level_factor)`.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct HealSpec {
    pub base: u32,
    pub attribute: ScalingAttribute,
    pub scaling: f64,
    pub level_factor: f64,
}

impl HealSpec {
    pub fn flat(base: u32) -> Self {
        Self {
            base,
            ..Self::default()
        }
    }
}

/// Inclusive count range.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CountRange {
    pub min: u32,
    pub max: u32,
}

impl CountRange {
    pub const fn new(min: u32, max: u32) -> Self {
        Self { min, max }
    }
}

/// Actors conjured by a summon ability.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SummonSpec {
    pub template: String,
    pub count: CountRange,
}

/// Self-targeted defensive stances.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SpecialEffect {
    /// Sends `fraction` of each resolved hit back to the attacker.
    Reflect { fraction: f64, duration: u32 },
    /// Evades incoming hits with probability `chance`.
    Dodge { chance: f64, duration: u32 },
    /// Halves incoming damage.
    Defend { duration: u32 },
}

impl SpecialEffect {
    /// Status granted to the user.
    pub fn as_status(&self) -> StatusSpec {
        match *self {
            Self::Reflect { fraction, duration } => {
                StatusSpec::new(StatusKind::Reflect, duration).with_magnitude(fraction)
            }
            Self::Dodge { chance, duration } => {
                StatusSpec::new(StatusKind::Dodge, duration).with_magnitude(chance)
            }
            Self::Defend { duration } => StatusSpec::new(StatusKind::Defending, duration),
        }
    }
}

/// What an ability does when used.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AbilityKind {
    /// Damage against one opponent (or all, with `area_effect`).
    Attack,
    /// Heals the user.
    Heal(HealSpec),
    /// Grants a status to the user.
    Buff(StatusSpec),
    /// Applies `status_effect` to the opponent without dealing damage.
    Debuff,
    /// Grants a defensive stance to the user.
    Special(SpecialEffect),
    /// Conjures additional hostiles.
    Summon(SummonSpec),
    /// Damage against the opponent, then heals the user.
    AttackHeal(HealSpec),
    /// Granted to the owner at encounter start; never selected as an action.
    PassiveBuff(StatusSpec),
    /// Heals the owner at the start of each of its turns; never selected as an action.
    PassiveHeal(HealSpec),
}

impl AbilityKind {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Attack => "attack",
            Self::Heal(_) => "heal",
            Self::Buff(_) => "buff",
            Self::Debuff => "debuff",
            Self::Special(_) => "special",
            Self::Summon(_) => "summon",
            Self::AttackHeal(_) => "attack_heal",
            Self::PassiveBuff(_) => "passive_buff",
            Self::PassiveHeal(_) => "passive_heal",
        }
    }
}

/// Immutable ability record keyed by identifier.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AbilityDefinition {
    pub id: String,
    pub name: String,
    pub kind: AbilityKind,
    #[cfg_attr(feature = "serde", serde(default))]
    pub damage_multiplier: Option<f64>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub area_effect: bool,
    /// On-hit status for damaging kinds, the payload itself for `Debuff`.
    #[cfg_attr(feature = "serde", serde(default))]
    pub status_effect: Option<StatusSpec>,
    /// Rounds that must elapse before reuse.
    #[cfg_attr(feature = "serde", serde(default))]
    pub cooldown: u32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub mana_cost: u32,
    /// Resolves before normal actions within the same phase.
    #[cfg_attr(feature = "serde", serde(default))]
    pub priority: bool,
    /// Fraction of defender mitigation ignored.
    #[cfg_attr(feature = "serde", serde(default))]
    pub armor_piercing: Option<f64>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub crit_chance: Option<f64>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub crit_multiplier: Option<f64>,
    /// Strike count for multi-hit abilities.
    #[cfg_attr(feature = "serde", serde(default = "default_hits"))]
    pub hits: u32,
}

#[cfg(feature = "serde")]
fn default_hits() -> u32 {
    1
}

impl AbilityDefinition {
    pub fn new(id: impl Into<String>, name: impl Into<String>, kind: AbilityKind) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            kind,
            damage_multiplier: None,
            area_effect: false,
            status_effect: None,
            cooldown: 0,
            mana_cost: 0,
            priority: false,
            armor_piercing: None,
            crit_chance: None,
            crit_multiplier: None,
            hits: 1,
        }
    }

    /// The default used whenever an ability cannot be resolved.
    pub fn basic_attack() -> Self {
        Self::new(BASIC_ATTACK_ID, "Attack", AbilityKind::Attack).with_multiplier(1.0)
    }

    pub fn with_multiplier(mut self, multiplier: f64) -> Self {
        self.damage_multiplier = Some(multiplier);
        self
    }

    pub fn with_status(mut self, status: StatusSpec) -> Self {
        self.status_effect = Some(status);
        self
    }

    pub fn with_cooldown(mut self, cooldown: u32) -> Self {
        self.cooldown = cooldown;
        self
    }

    pub fn with_mana_cost(mut self, mana_cost: u32) -> Self {
        self.mana_cost = mana_cost;
        self
    }

    pub fn with_area_effect(mut self) -> Self {
        self.area_effect = true;
        self
    }

    pub fn with_priority(mut self) -> Self {
        self.priority = true;
        self
    }

    pub fn with_armor_piercing(mut self, fraction: f64) -> Self {
        self.armor_piercing = Some(fraction);
        self
    }

    pub fn with_crit(mut self, chance: f64, multiplier: Option<f64>) -> Self {
        self.crit_chance = Some(chance);
        self.crit_multiplier = multiplier;
        self
    }

    pub fn with_hits(mut self, hits: u32) -> Self {
        self.hits = hits;
        self
    }

    pub fn is_basic_attack(&self) -> bool {
        self.id == BASIC_ATTACK_ID
    }

    pub fn is_passive(&self) -> bool {
        matches!(
            self.kind,
            AbilityKind::PassiveBuff(_) | AbilityKind::PassiveHeal(_)
        )
    }

    /// True when the ability resolves damage against an opponent.
    pub fn deals_damage(&self) -> bool {
        matches!(self.kind, AbilityKind::Attack | AbilityKind::AttackHeal(_))
    }

    /// Strike count clamped to `[1, MAX_HITS]`.
    pub fn strike_count(&self) -> u32 {
        self.hits.clamp(1, crate::config::CombatConfig::MAX_HITS)
    }
}

/// Oracle resolving ability identifiers.
pub trait AbilityOracle: Send + Sync {
    /// Returns an independent copy of the definition, or `None` when unknown.
    fn ability(&self, id: &str) -> Option<AbilityDefinition>;
}

/// Static registry of ability definitions.
#[derive(Clone, Debug, Default)]
pub struct AbilityCatalog {
    abilities: HashMap<String, AbilityDefinition>,
}

impl AbilityCatalog {
    /// Builds a catalog, rejecting duplicate identifiers.
    pub fn from_definitions(
        definitions: impl IntoIterator<Item = AbilityDefinition>,
    ) -> Result<Self, CatalogError> {
        let mut abilities = HashMap::new();
        for definition in definitions {
            if abilities.contains_key(&definition.id) {
                return Err(CatalogError::DuplicateAbility(definition.id));
            }
            abilities.insert(definition.id.clone(), definition);
        }
        Ok(Self { abilities })
    }

    /// Looks up an ability. Unknown ids are logged and yield `None`.
    pub fn get(&self, id: &str) -> Option<AbilityDefinition> {
        let found = self.abilities.get(id).cloned();
        if found.is_none() {
            tracing::warn!(ability = id, "ability not found in catalog");
        }
        found
    }

    pub fn contains(&self, id: &str) -> bool {
        self.abilities.contains_key(id)
    }

    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.abilities.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.abilities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.abilities.is_empty()
    }
}

impl AbilityOracle for AbilityCatalog {
    fn ability(&self, id: &str) -> Option<AbilityDefinition> {
        self.get(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog() -> AbilityCatalog {
        AbilityCatalog::from_definitions([
            AbilityDefinition::new("slash", "Slash", AbilityKind::Attack).with_multiplier(1.2),
            AbilityDefinition::new("venom", "Venom", AbilityKind::Debuff)
                .with_status(StatusSpec::new(StatusKind::Poison, 3).with_chance(0.5)),
        ])
        .expect("unique ids")
    }

    #[test]
    fn lookup_returns_independent_copies() {
        let catalog = catalog();
        let mut first = catalog.get("slash").expect("known ability");
        let second = catalog.get("slash").expect("known ability");
        assert_eq!(first, second);

        first.cooldown = 9;
        first.damage_multiplier = Some(5.0);
        assert_eq!(catalog.get("slash"), Some(second));
    }

    #[test]
    fn unknown_id_is_not_found() {
        let catalog = catalog();
        assert!(catalog.get("does_not_exist").is_none());
    }

    #[test]
    fn duplicate_ids_fail_fast() {
        let result = AbilityCatalog::from_definitions([
            AbilityDefinition::new("slash", "Slash", AbilityKind::Attack),
            AbilityDefinition::new("slash", "Slash Again", AbilityKind::Attack),
        ]);
        assert_eq!(
            result.err(),
            Some(CatalogError::DuplicateAbility("slash".into()))
        );
    }

    #[test]
    fn strike_count_is_bounded() {
        let ability = AbilityDefinition::new("flurry", "Flurry", AbilityKind::Attack).with_hits(0);
        assert_eq!(ability.strike_count(), 1);
        let ability = ability.with_hits(99);
        assert_eq!(ability.strike_count(), crate::config::CombatConfig::MAX_HITS);
    }

    #[test]
    fn passive_kinds_are_flagged() {
        let passive = AbilityDefinition::new(
            "thick_hide",
            "Thick Hide",
            AbilityKind::PassiveBuff(StatusSpec::new(StatusKind::DefenseUp, 99)),
        );
        assert!(passive.is_passive());
        assert!(!passive.deals_damage());
    }
}
