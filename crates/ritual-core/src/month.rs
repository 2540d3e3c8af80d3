//! Month-completion detection.
//!
//! Fires once when a month becomes fully marked. A persisted flag keeps it
//! from firing again while the month stays complete; clearing the month
//! drops the flag.

use serde::{Deserialize, Serialize};

use crate::calendar::YearMonth;
use crate::error::Result;
use crate::marks::DaySet;
use crate::storage::{keys, KvStore};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthCompletion {
    pub year: i32,
    pub month: u32,
    pub total_days: u32,
}

pub fn is_month_done<S: KvStore + ?Sized>(store: &S, habit_id: &str, ym: YearMonth) -> Result<bool> {
    Ok(store.get(&keys::month_done(habit_id, ym))?.is_some())
}

/// Report `ym` as complete if every day is marked and it hasn't been
/// reported since its last clear.
pub fn check_month_complete<S: KvStore + ?Sized>(
    store: &mut S,
    habit_id: &str,
    ym: YearMonth,
    marked: &DaySet,
    days_in_month: u32,
) -> Result<Option<MonthCompletion>> {
    if marked.len() != days_in_month as usize || is_month_done(&*store, habit_id, ym)? {
        return Ok(None);
    }
    store.set(&keys::month_done(habit_id, ym), keys::FLAG_SET)?;
    tracing::info!(habit_id, month = %ym, "month completed");
    Ok(Some(MonthCompletion {
        year: ym.year(),
        month: ym.month(),
        total_days: days_in_month,
    }))
}

pub fn clear_month_done<S: KvStore + ?Sized>(store: &mut S, habit_id: &str, ym: YearMonth) -> Result<()> {
    store.remove(&keys::month_done(habit_id, ym))?;
    Ok(())
}
