//! Consumable item definitions usable during combat.

use std::collections::HashMap;

use super::error::CatalogError;

/// What a consumable does when used by the player.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ItemEffect {
    /// Restores health (clamped to max).
    Heal { amount: u32 },
    /// Restores mana (clamped to max).
    RestoreMana { amount: u32 },
    /// Removes every harmful status.
    Cleanse,
    /// Deals fixed damage to the selected hostile, ignoring mitigation.
    Damage { amount: u32 },
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ItemDefinition {
    pub id: String,
    pub name: String,
    pub effect: ItemEffect,
}

impl ItemDefinition {
    pub fn new(id: impl Into<String>, name: impl Into<String>, effect: ItemEffect) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            effect,
        }
    }
}

/// Oracle resolving item identifiers.
pub trait ItemOracle: Send + Sync {
    fn item(&self, id: &str) -> Option<&ItemDefinition>;
}

/// Static registry of consumables.
#[derive(Clone, Debug, Default)]
pub struct ItemCatalog {
    items: HashMap<String, ItemDefinition>,
}

impl ItemCatalog {
    pub fn from_items(
        items: impl IntoIterator<Item = ItemDefinition>,
    ) -> Result<Self, CatalogError> {
        let mut map = HashMap::new();
        for item in items {
            if map.contains_key(&item.id) {
                return Err(CatalogError::DuplicateItem(item.id));
            }
            map.insert(item.id.clone(), item);
        }
        Ok(Self { items: map })
    }

    pub fn get(&self, id: &str) -> Option<&ItemDefinition> {
        self.items.get(id)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl ItemOracle for ItemCatalog {
    fn item(&self, id: &str) -> Option<&ItemDefinition> {
        self.get(id)
    }
}
