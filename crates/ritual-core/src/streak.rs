//! Current-streak computation.
//!
//! The streak is recomputed from the day-mark records on every query. There
//! is no grace period: if today is not marked the streak is zero.

use chrono::{Datelike, NaiveDate};

use crate::calendar::YearMonth;
use crate::error::Result;
use crate::marks::{load_marked, DaySet};
use crate::storage::KvStore;

pub const DEFAULT_MAX_LOOKBACK_DAYS: u32 = 3000;

/// Walks backward from today counting consecutive marked days.
#[derive(Debug, Clone, Copy)]
pub struct StreakEngine {
    max_lookback_days: u32,
}

impl Default for StreakEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl StreakEngine {
    pub fn new() -> Self {
        Self {
            max_lookback_days: DEFAULT_MAX_LOOKBACK_DAYS,
        }
    }

    /// Bound the walk to `days`, which also caps the largest streak reported.
    /// The walk always covers at least today.
    pub fn with_max_lookback(days: u32) -> Self {
        Self {
            max_lookback_days: days.max(1),
        }
    }

    /// Consecutive marked days ending at `today`.
    pub fn compute<S: KvStore + ?Sized>(
        &self,
        store: &S,
        habit_id: &str,
        today: NaiveDate,
    ) -> Result<u32> {
        let mut month = YearMonth::of(today);
        let mut days: DaySet = load_marked(store, habit_id, month)?;
        if !days.contains(&today.day()) {
            return Ok(0);
        }

        let mut count = 0;
        let mut probe = today;
        for _ in 0..self.max_lookback_days {
            let probe_month = YearMonth::of(probe);
            if probe_month != month {
                month = probe_month;
                days = load_marked(store, habit_id, month)?;
            }
            if !days.contains(&probe.day()) {
                break;
            }
            count += 1;
            match probe.pred_opt() {
                Some(prev) => probe = prev,
                None => break,
            }
        }
        Ok(count)
    }
}
