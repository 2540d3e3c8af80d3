//! Persisted key layout.
//!
//! Every per-habit key starts with `ht_{habit_id}_`, which is what cascading
//! deletion scans for. Generated habit ids never contain `_` after their
//! `h_` head, so one habit's prefix cannot swallow another's keys.

use crate::calendar::YearMonth;

pub const HABITS: &str = "ht_habits";
pub const ACTIVE: &str = "ht_active";

/// Value written for presence-only flags.
pub const FLAG_SET: &str = "1";

/// Prefix shared by every key belonging to `habit_id`.
pub fn habit_prefix(habit_id: &str) -> String {
    format!("ht_{habit_id}_")
}

/// `ht_{id}_{year}_{MM}`: marked days of one month.
pub fn marked(habit_id: &str, ym: YearMonth) -> String {
    format!("ht_{habit_id}_{}_{:02}", ym.year(), ym.month())
}

/// `ht_{id}_md_{year}_{MM}`: month-complete celebration already fired.
pub fn month_done(habit_id: &str, ym: YearMonth) -> String {
    format!("ht_{habit_id}_md_{}_{:02}", ym.year(), ym.month())
}

/// `ht_{id}_sk_{n}`: milestone `n` already claimed.
pub fn streak_shown(habit_id: &str, length: u32) -> String {
    format!("ht_{habit_id}_sk_{length}")
}

pub fn streak_shown_prefix(habit_id: &str) -> String {
    format!("ht_{habit_id}_sk_")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn month_keys_are_zero_padded() {
        let ym = YearMonth::new(2025, 3).unwrap();
        assert_eq!(marked("h_1", ym), "ht_h_1_2025_03");
        assert_eq!(month_done("h_1", ym), "ht_h_1_md_2025_03");
    }

    #[test]
    fn all_habit_keys_share_the_prefix() {
        let ym = YearMonth::new(2025, 11).unwrap();
        let prefix = habit_prefix("default");
        assert!(marked("default", ym).starts_with(&prefix));
        assert!(month_done("default", ym).starts_with(&prefix));
        assert!(streak_shown("default", 10).starts_with(&prefix));
        assert!(streak_shown("default", 10).starts_with(&streak_shown_prefix("default")));
    }
}
