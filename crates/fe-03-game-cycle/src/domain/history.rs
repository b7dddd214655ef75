//! # Game-Cycle History
//!
//! Each completed cycle's staging scope is copied into a `History` record
//! slot. Slots form a ring of `capacity` records indexed by the monotonic
//! history head.

use serde::{Deserialize, Serialize};
use shared_types::BaseUnits;
use std::collections::BTreeMap;

/// Path of the summary entry inside every archived record.
pub const SUMMARY_PATH: &str = "Summary";

/// Path of the wager-category breakdown staged by the final main-play outcome.
pub const WAGER_CATEGORIES_PATH: &str = "WagerCategories";

/// What every archived cycle records about itself.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistorySummary {
    pub game_cycle: u64,
    pub starting_bet: BaseUnits,
    pub mid_game_bet: BaseUnits,
    pub win: BaseUnits,
    /// Base units per credit.
    pub denomination: u64,
}

/// One archived game cycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryRecord {
    pub slot: u32,
    pub summary: HistorySummary,
    /// Game-staged entries other than the summary.
    pub entries: BTreeMap<String, Vec<u8>>,
}

/// Bet attributed to one wager category of the paytable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WagerCategoryUsage {
    pub category: u32,
    pub bet: BaseUnits,
}

/// Outcome reported by the game for one evaluation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GameOutcome {
    pub win: BaseUnits,
    /// Required on the final main-play outcome.
    pub wager_categories: Vec<WagerCategoryUsage>,
}

impl GameOutcome {
    pub fn win(win: BaseUnits) -> Self {
        Self {
            win,
            wager_categories: Vec::new(),
        }
    }

    pub fn with_wager_category(mut self, category: u32, bet: BaseUnits) -> Self {
        self.wager_categories.push(WagerCategoryUsage { category, bet });
        self
    }
}

/// Slot the record with history head `head` is archived to.
pub fn slot_for(head: u64, capacity: u32) -> u32 {
    (head % u64::from(capacity.max(1))) as u32
}

/// Number of browsable records.
pub fn record_count(head: u64, capacity: u32) -> u32 {
    head.min(u64::from(capacity)) as u32
}

/// Slot of the record `age` cycles back, 0 being the most recent.
pub fn slot_for_age(head: u64, capacity: u32, age: u32) -> Option<u32> {
    if age >= record_count(head, capacity) {
        return None;
    }
    Some(slot_for(head - 1 - u64::from(age), capacity))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ring_wraps() {
        assert_eq!(slot_for(0, 3), 0);
        assert_eq!(slot_for(3, 3), 0);
        assert_eq!(slot_for(4, 3), 1);
    }

    #[test]
    fn test_record_count_saturates() {
        assert_eq!(record_count(0, 10), 0);
        assert_eq!(record_count(4, 10), 4);
        assert_eq!(record_count(40, 10), 10);
    }

    #[test]
    fn test_slot_for_age() {
        // Five cycles archived into a ring of three: slots hold heads 3, 4, 2.
        assert_eq!(slot_for_age(5, 3, 0), Some(1));
        assert_eq!(slot_for_age(5, 3, 1), Some(0));
        assert_eq!(slot_for_age(5, 3, 2), Some(2));
        assert_eq!(slot_for_age(5, 3, 3), None);
        assert_eq!(slot_for_age(0, 3, 0), None);
    }
}
