//! Day-mark store: which days of a month are marked for a habit.
//!
//! Persisted as a JSON object keyed by day number. Only key presence counts;
//! the stored value is ignored on read.

use std::collections::{BTreeMap, BTreeSet};

use crate::calendar::YearMonth;
use crate::error::Result;
use crate::storage::{keys, KvStore};

/// Marked day numbers of one month, 1-based.
pub type DaySet = BTreeSet<u32>;

/// Marked days of `ym`. Absent or malformed records read as empty.
pub fn load_marked<S: KvStore + ?Sized>(store: &S, habit_id: &str, ym: YearMonth) -> Result<DaySet> {
    let key = keys::marked(habit_id, ym);
    let Some(raw) = store.get(&key)? else {
        return Ok(DaySet::new());
    };
    Ok(parse_record(&key, &raw))
}

/// Replace the marked days of `ym` with `days`.
pub fn save_marked<S: KvStore + ?Sized>(
    store: &mut S,
    habit_id: &str,
    ym: YearMonth,
    days: &DaySet,
) -> Result<()> {
    let record: BTreeMap<u32, bool> = days.iter().map(|&d| (d, true)).collect();
    let json = serde_json::to_string(&record)?;
    store.set(&keys::marked(habit_id, ym), &json)?;
    Ok(())
}

/// Flip one day and return whether it is marked afterwards.
pub fn toggle_day<S: KvStore + ?Sized>(
    store: &mut S,
    habit_id: &str,
    ym: YearMonth,
    day: u32,
) -> Result<bool> {
    let mut days = load_marked(&*store, habit_id, ym)?;
    let marked = if days.remove(&day) {
        false
    } else {
        days.insert(day);
        true
    };
    save_marked(store, habit_id, ym, &days)?;
    tracing::debug!(habit_id, month = %ym, day, marked, "toggled day");
    Ok(marked)
}

fn parse_record(key: &str, raw: &str) -> DaySet {
    match serde_json::from_str::<BTreeMap<String, serde_json::Value>>(raw) {
        Ok(map) => map.keys().filter_map(|k| k.trim().parse::<u32>().ok()).collect(),
        Err(e) => {
            tracing::warn!(key, error = %e, "ignoring malformed day-mark record");
            DaySet::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;

    fn march() -> YearMonth {
        YearMonth::new(2025, 3).unwrap()
    }

    #[test]
    fn absent_record_is_empty() {
        let store = MemoryStore::new();
        assert!(load_marked(&store, "default", march()).unwrap().is_empty());
    }

    #[test]
    fn presence_means_marked_regardless_of_value() {
        let mut store = MemoryStore::new();
        store
            .set("ht_default_2025_03", r#"{"1":true,"2":1,"5":"yes","x":true}"#)
            .unwrap();
        let days = load_marked(&store, "default", march()).unwrap();
        assert_eq!(days.into_iter().collect::<Vec<_>>(), vec![1, 2, 5]);
    }

    #[test]
    fn malformed_record_reads_as_empty() {
        let mut store = MemoryStore::new();
        store.set("ht_default_2025_03", "[1,2").unwrap();
        assert!(load_marked(&store, "default", march()).unwrap().is_empty());
        store.set("ht_default_2025_03", "null").unwrap();
        assert!(load_marked(&store, "default", march()).unwrap().is_empty());
    }

    #[test]
    fn save_replaces_rather_than_merges() {
        let mut store = MemoryStore::new();
        save_marked(&mut store, "default", march(), &DaySet::from([1, 2, 3])).unwrap();
        save_marked(&mut store, "default", march(), &DaySet::from([10])).unwrap();
        assert_eq!(
            load_marked(&store, "default", march()).unwrap(),
            DaySet::from([10])
        );
        assert_eq!(
            store.get("ht_default_2025_03").unwrap().as_deref(),
            Some(r#"{"10":true}"#)
        );
    }

    #[test]
    fn toggle_flips_a_single_day() {
        let mut store = MemoryStore::new();
        assert!(toggle_day(&mut store, "default", march(), 4).unwrap());
        assert!(!toggle_day(&mut store, "default", march(), 4).unwrap());
        assert!(load_marked(&store, "default", march()).unwrap().is_empty());
    }

    #[test]
    fn habits_do_not_share_marks() {
        let mut store = MemoryStore::new();
        toggle_day(&mut store, "default", march(), 4).unwrap();
        assert!(load_marked(&store, "h_1", march()).unwrap().is_empty());
    }
}
