//! Actor template definitions and oracle interface.
//!
//! Templates describe hostiles in a data-driven way. They are turned into
//! runtime [`Actor`](crate::state::Actor)s by
//! [`instantiate`](crate::encounter::instantiate).

use std::collections::HashMap;

use crate::state::Attributes;

use super::error::CatalogError;
use super::loot::LootTable;

/// Static description of an enemy (or summonable creature).
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ActorTemplate {
    pub id: String,
    pub name: String,
    pub level: u32,
    pub health: u32,
    pub attack: u32,
    pub defense: u32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub mana: u32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub attributes: Attributes,
    #[cfg_attr(feature = "serde", serde(default))]
    pub abilities: Vec<String>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub loot: LootTable,
    #[cfg_attr(feature = "serde", serde(default))]
    pub boss: bool,
}

impl ActorTemplate {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        level: u32,
        health: u32,
        attack: u32,
        defense: u32,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            level,
            health,
            attack,
            defense,
            mana: 0,
            attributes: Attributes::default(),
            abilities: Vec::new(),
            loot: LootTable::default(),
            boss: false,
        }
    }

    pub fn with_abilities<I, S>(mut self, abilities: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.abilities = abilities.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_loot(mut self, loot: LootTable) -> Self {
        self.loot = loot;
        self
    }

    pub fn with_mana(mut self, mana: u32) -> Self {
        self.mana = mana;
        self
    }

    pub fn as_boss(mut self) -> Self {
        self.boss = true;
        self
    }
}

/// Oracle resolving actor template identifiers.
pub trait ActorOracle: Send + Sync {
    fn template(&self, id: &str) -> Option<&ActorTemplate>;
}

/// Static registry of actor templates.
#[derive(Clone, Debug, Default)]
pub struct TemplateCatalog {
    templates: HashMap<String, ActorTemplate>,
}

impl TemplateCatalog {
    /// Builds a catalog, rejecting duplicate identifiers.
    pub fn from_templates(
        templates: impl IntoIterator<Item = ActorTemplate>,
    ) -> Result<Self, CatalogError> {
        let mut map = HashMap::new();
        for template in templates {
            if map.contains_key(&template.id) {
                return Err(CatalogError::DuplicateTemplate(template.id));
            }
            map.insert(template.id.clone(), template);
        }
        Ok(Self { templates: map })
    }

    pub fn get(&self, id: &str) -> Option<&ActorTemplate> {
        self.templates.get(id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.templates.contains_key(id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &ActorTemplate> {
        self.templates.values()
    }

    pub fn len(&self) -> usize {
        self.templates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }
}

impl ActorOracle for TemplateCatalog {
    fn template(&self, id: &str) -> Option<&ActorTemplate> {
        self.get(id)
    }
}
