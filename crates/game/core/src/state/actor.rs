//! Runtime combatants.

use crate::env::{AbilityDefinition, LootTable};

use super::status::{ActionRestrictions, ModifiedStat, StatusEffects};

/// Unique identifier of a combatant within one encounter.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ActorId(pub u32);

impl ActorId {
    pub const PLAYER: Self = Self(0);

    pub fn is_player(self) -> bool {
        self == Self::PLAYER
    }
}

impl std::fmt::Display for ActorId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Side {
    Player,
    Hostile,
}

/// Primary attributes. Agility drives retreat; the rest feed heal scaling.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Attributes {
    pub strength: u32,
    pub agility: u32,
    pub intelligence: u32,
    pub vitality: u32,
}

/// An ability owned by an actor, with its cooldown counter.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AbilitySlot {
    pub ability: AbilityDefinition,
    pub cooldown_remaining: u32,
}

impl AbilitySlot {
    pub fn new(ability: AbilityDefinition) -> Self {
        Self {
            ability,
            cooldown_remaining: 0,
        }
    }

    pub fn id(&self) -> &str {
        &self.ability.id
    }

    pub fn is_ready(&self) -> bool {
        self.cooldown_remaining == 0
    }

    /// Starts the cooldown after a use.
    pub fn trigger(&mut self) {
        self.cooldown_remaining = self.ability.cooldown;
    }

    pub fn tick_cooldown(&mut self) {
        self.cooldown_remaining = self.cooldown_remaining.saturating_sub(1);
    }
}

/// A combatant owned by an encounter session.
///
/// # Invariants
///
/// - `health` stays within `[0, max_health]`; every mutation goes through
///   [`take_damage`](Self::take_damage), [`heal`](Self::heal) or
///   [`set_max_health`](Self::set_max_health)
/// - `current_attack`/`current_defense` equal the base stat plus the active
///   modifier statuses; call [`recompute_stats`](Self::recompute_stats) after
///   touching `status_effects`
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Actor {
    pub id: ActorId,
    pub name: String,
    pub side: Side,
    /// Template the actor was built from. `None` for the player and placeholders.
    pub template_id: Option<String>,
    pub level: u32,

    health: u32,
    max_health: u32,
    pub mana: u32,
    pub max_mana: u32,

    pub base_attack: u32,
    pub base_defense: u32,
    pub current_attack: u32,
    pub current_defense: u32,
    pub attributes: Attributes,

    pub abilities: Vec<AbilitySlot>,
    pub status_effects: StatusEffects,
    /// Restrictions raised by the most recent status tick.
    pub restrictions: ActionRestrictions,

    pub loot: LootTable,
    pub is_boss: bool,
}

impl Actor {
    pub fn new(
        id: ActorId,
        name: impl Into<String>,
        side: Side,
        level: u32,
        max_health: u32,
        attack: u32,
        defense: u32,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            side,
            template_id: None,
            level: level.max(1),
            health: max_health,
            max_health,
            mana: 0,
            max_mana: 0,
            base_attack: attack,
            base_defense: defense,
            current_attack: attack,
            current_defense: defense,
            attributes: Attributes::default(),
            abilities: Vec::new(),
            status_effects: StatusEffects::empty(),
            restrictions: ActionRestrictions::empty(),
            loot: LootTable::default(),
            is_boss: false,
        }
    }

    /// Generic hostile scaled only by level, used when data is missing.
    pub fn placeholder(id: ActorId, level: u32) -> Self {
        let level = level.max(1);
        let mut actor = Self::new(
            id,
            format!("Wild Creature (Lv {level})"),
            Side::Hostile,
            level,
            20 + level * 8,
            4 + level * 2,
            1 + level,
        );
        actor.loot = LootTable::placeholder(level);
        actor
    }

    pub fn with_mana(mut self, mana: u32) -> Self {
        self.mana = mana;
        self.max_mana = mana;
        self
    }

    pub fn with_attributes(mut self, attributes: Attributes) -> Self {
        self.attributes = attributes;
        self
    }

    pub fn with_abilities(mut self, abilities: impl IntoIterator<Item = AbilityDefinition>) -> Self {
        self.abilities = abilities.into_iter().map(AbilitySlot::new).collect();
        self
    }

    pub fn with_loot(mut self, loot: LootTable) -> Self {
        self.loot = loot;
        self
    }

    // ========================================================================
    // Health
    // ========================================================================

    #[inline]
    pub fn health(&self) -> u32 {
        self.health
    }

    #[inline]
    pub fn max_health(&self) -> u32 {
        self.max_health
    }

    #[inline]
    pub fn is_defeated(&self) -> bool {
        self.health == 0
    }

    #[inline]
    pub fn is_alive(&self) -> bool {
        !self.is_defeated()
    }

    /// Removes health, clamped at zero. Returns the amount actually lost.
    pub fn take_damage(&mut self, amount: u32) -> u32 {
        let lost = amount.min(self.health);
        self.health -= lost;
        lost
    }

    /// Restores health, clamped at max. Returns the amount actually restored.
    pub fn heal(&mut self, amount: u32) -> u32 {
        let restored = amount.min(self.max_health - self.health);
        self.health += restored;
        restored
    }

    /// Changes max health. With `refill` the actor is restored to the new max.
    pub fn set_max_health(&mut self, max_health: u32, refill: bool) {
        self.max_health = max_health;
        self.health = if refill {
            max_health
        } else {
            self.health.min(max_health)
        };
    }

    pub fn health_ratio(&self) -> f64 {
        if self.max_health == 0 {
            return 0.0;
        }
        self.health as f64 / self.max_health as f64
    }

    // ========================================================================
    // Mana
    // ========================================================================

    pub fn spend_mana(&mut self, cost: u32) -> bool {
        if self.mana < cost {
            return false;
        }
        self.mana -= cost;
        true
    }

    pub fn restore_mana(&mut self, amount: u32) -> u32 {
        let restored = amount.min(self.max_mana.saturating_sub(self.mana));
        self.mana += restored;
        restored
    }

    // ========================================================================
    // Stats and abilities
    // ========================================================================

    /// Rebuilds current attack/defense from base stats and active modifiers.
    pub fn recompute_stats(&mut self) {
        self.current_attack = apply_modifier(
            self.base_attack,
            self.status_effects.modifier_total(ModifiedStat::Attack),
        );
        self.current_defense = apply_modifier(
            self.base_defense,
            self.status_effects.modifier_total(ModifiedStat::Defense),
        );
    }

    pub fn ability_slot(&self, id: &str) -> Option<&AbilitySlot> {
        self.abilities.iter().find(|slot| slot.id() == id)
    }

    pub fn ability_slot_mut(&mut self, id: &str) -> Option<&mut AbilitySlot> {
        self.abilities.iter_mut().find(|slot| slot.id() == id)
    }

    /// Abilities that may be chosen as an action right now.
    pub fn ready_abilities(&self) -> impl Iterator<Item = &AbilitySlot> {
        self.abilities.iter().filter(|slot| {
            slot.is_ready() && !slot.ability.is_passive() && slot.ability.mana_cost <= self.mana
        })
    }

    pub fn tick_cooldowns(&mut self) {
        for slot in &mut self.abilities {
            slot.tick_cooldown();
        }
    }

    pub fn is_stunned(&self) -> bool {
        self.restrictions.contains(ActionRestrictions::STUNNED)
    }

    pub fn is_immobilized(&self) -> bool {
        self.restrictions.contains(ActionRestrictions::IMMOBILIZED)
    }
}

fn apply_modifier(base: u32, modifier: i64) -> u32 {
    (base as i64 + modifier).clamp(0, u32::MAX as i64) as u32
}
