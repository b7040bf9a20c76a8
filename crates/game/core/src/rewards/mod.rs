//! Reward rolls for defeated hostiles.
//!
//! Every defeated actor contributes independently: one gold roll, one
//! experience roll and one Bernoulli trial per loot entry. Draw order is fixed
//! (roster order; gold, experience, then items in table order) so a replayed
//! stream yields the same rewards.

use crate::env::RngOracle;
use crate::state::{Actor, Outcome};

/// Totals rolled across a set of defeated actors.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LootRoll {
    pub gold: u32,
    pub experience: u32,
    /// Dropped item ids; duplicates across actors are kept.
    pub items: Vec<String>,
}

/// Rolls rewards for `defeated`.
pub fn roll_loot<'a>(
    defeated: impl IntoIterator<Item = &'a Actor>,
    rng: &mut dyn RngOracle,
) -> LootRoll {
    let mut roll = LootRoll::default();
    for actor in defeated {
        let table = &actor.loot;
        let gold = rng.range_inclusive(table.gold.min, table.gold.max);
        let experience = rng.range_inclusive(table.experience.min, table.experience.max);
        roll.gold = roll.gold.saturating_add(gold);
        roll.experience = roll.experience.saturating_add(experience);

        for entry in &table.items {
            if rng.chance(entry.chance) {
                roll.items.push(entry.id.clone());
            }
        }
    }

    tracing::info!(
        gold = roll.gold,
        experience = roll.experience,
        items = roll.items.len(),
        "loot rolled"
    );
    roll
}

/// The artifact a controller writes back into long-term player state.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RewardSummary {
    pub outcome: Outcome,
    pub experience_gained: u32,
    pub gold_gained: u32,
    pub loot_item_ids: Vec<String>,
    /// Consumables used during the encounter.
    pub items_consumed: Vec<String>,
}

impl RewardSummary {
    pub fn victory(roll: LootRoll, items_consumed: Vec<String>) -> Self {
        Self {
            outcome: Outcome::Victory,
            experience_gained: roll.experience,
            gold_gained: roll.gold,
            loot_item_ids: roll.items,
            items_consumed,
        }
    }

    /// Defeat and retreat grant nothing.
    pub fn empty(outcome: Outcome, items_consumed: Vec<String>) -> Self {
        Self {
            outcome,
            experience_gained: 0,
            gold_gained: 0,
            loot_item_ids: Vec::new(),
            items_consumed,
        }
    }
}
