//! Loot table definitions attached to actor templates.

/// Inclusive integer range rolled as `floor(uniform(min, max + 1))`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ValueRange {
    pub min: u32,
    pub max: u32,
}

impl ValueRange {
    pub const fn new(min: u32, max: u32) -> Self {
        Self { min, max }
    }

    pub const fn fixed(value: u32) -> Self {
        Self::new(value, value)
    }
}

/// One independently rolled item drop.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LootEntry {
    pub id: String,
    /// Bernoulli probability in `[0, 1]`.
    pub chance: f64,
}

impl LootEntry {
    pub fn new(id: impl Into<String>, chance: f64) -> Self {
        Self {
            id: id.into(),
            chance,
        }
    }
}

/// Per-template reward specification.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct LootTable {
    pub gold: ValueRange,
    pub experience: ValueRange,
    pub items: Vec<LootEntry>,
}

impl LootTable {
    pub fn new(gold: ValueRange, experience: ValueRange) -> Self {
        Self {
            gold,
            experience,
            items: Vec::new(),
        }
    }

    pub fn with_item(mut self, id: impl Into<String>, chance: f64) -> Self {
        self.items.push(LootEntry::new(id, chance));
        self
    }

    /// Level-scaled rewards for synthesized placeholder actors.
    pub fn placeholder(level: u32) -> Self {
        let level = level.max(1);
        Self::new(
            ValueRange::new(level * 2, level * 5),
            ValueRange::new(level * 5, level * 10),
        )
    }
}
