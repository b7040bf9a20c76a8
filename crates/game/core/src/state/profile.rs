//! The player's persisted stat block.
//!
//! The profile is read once when an encounter starts and turned into the
//! player [`Actor`]. The only artifact written back is the reward summary.

use std::collections::BTreeMap;

use crate::env::AbilityOracle;

use super::actor::{AbilitySlot, Actor, ActorId, Attributes, Side};

/// Flat bonuses granted by equipped items.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct EquipmentModifiers {
    pub attack: u32,
    pub defense: u32,
    pub health: u32,
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PlayerProfile {
    pub name: String,
    pub level: u32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub attributes: Attributes,
    pub base_health: u32,
    pub base_attack: u32,
    pub base_defense: u32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub max_mana: u32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub equipment: EquipmentModifiers,
    #[cfg_attr(feature = "serde", serde(default))]
    pub abilities: Vec<String>,
    /// Consumable id to quantity.
    #[cfg_attr(feature = "serde", serde(default))]
    pub inventory: BTreeMap<String, u32>,
}

impl PlayerProfile {
    pub fn new(name: impl Into<String>, level: u32, health: u32, attack: u32, defense: u32) -> Self {
        Self {
            name: name.into(),
            level,
            attributes: Attributes::default(),
            base_health: health,
            base_attack: attack,
            base_defense: defense,
            max_mana: 0,
            equipment: EquipmentModifiers::default(),
            abilities: Vec::new(),
            inventory: BTreeMap::new(),
        }
    }

    /// Builds the player actor. Unknown ability ids are skipped with a warning.
    pub fn to_actor(&self, abilities: &dyn AbilityOracle) -> Actor {
        let mut actor = Actor::new(
            ActorId::PLAYER,
            self.name.clone(),
            Side::Player,
            self.level,
            self.base_health + self.equipment.health,
            self.base_attack + self.equipment.attack,
            self.base_defense + self.equipment.defense,
        )
        .with_mana(self.max_mana)
        .with_attributes(self.attributes);

        actor.abilities = self
            .abilities
            .iter()
            .filter_map(|id| match abilities.ability(id) {
                Some(ability) => Some(AbilitySlot::new(ability)),
                None => {
                    tracing::warn!(ability = %id, "player ability unknown; skipped");
                    None
                }
            })
            .collect();
        actor
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::env::{AbilityCatalog, AbilityDefinition, AbilityKind};

    #[test]
    fn equipment_adds_to_base_stats() {
        let mut profile = PlayerProfile::new("Hero", 3, 50, 10, 4);
        profile.equipment = EquipmentModifiers {
            attack: 2,
            defense: 1,
            health: 10,
        };
        profile.max_mana = 20;
        profile.abilities = vec!["slash".into(), "missing".into()];

        let catalog = AbilityCatalog::from_definitions([AbilityDefinition::new(
            "slash",
            "Slash",
            AbilityKind::Attack,
        )])
        .expect("unique ids");
        let actor = profile.to_actor(&catalog);

        assert_eq!(actor.id, ActorId::PLAYER);
        assert_eq!(actor.max_health(), 60);
        assert_eq!(actor.health(), 60);
        assert_eq!(actor.current_attack, 12);
        assert_eq!(actor.current_defense, 5);
        assert_eq!(actor.mana, 20);
        assert_eq!(actor.abilities.len(), 1);
    }
}
