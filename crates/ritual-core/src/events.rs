use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::habit::Habit;
use crate::tier::TierKind;

/// Every state change the presentation layer needs to react to.
/// The GUI polls for events via [`Tracker::drain_events`](crate::Tracker::drain_events).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Event {
    HabitListChanged {
        habits: Vec<Habit>,
        at: DateTime<Utc>,
    },
    ActiveHabitChanged {
        habit_id: String,
        at: DateTime<Utc>,
    },
    MarkedDaysChanged {
        year: i32,
        month: u32,
        at: DateTime<Utc>,
    },
    /// One celebration is now open. Nothing else is released until the
    /// presentation layer acknowledges it.
    MilestoneReady {
        length: u32,
        tier: TierKind,
        at: DateTime<Utc>,
    },
    /// Every day of the month is marked, reported once per fill.
    MonthCompleted {
        year: i32,
        month: u32,
        total_days: u32,
        at: DateTime<Utc>,
    },
}

impl Event {
    /// Snake-case event name, matching the serialized `type` tag.
    pub fn name(&self) -> &'static str {
        match self {
            Event::HabitListChanged { .. } => "habit_list_changed",
            Event::ActiveHabitChanged { .. } => "active_habit_changed",
            Event::MarkedDaysChanged { .. } => "marked_days_changed",
            Event::MilestoneReady { .. } => "milestone_ready",
            Event::MonthCompleted { .. } => "month_completed",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_with_type_tag() {
        let event = Event::MilestoneReady {
            length: 10,
            tier: TierKind::Kindled,
            at: Utc::now(),
        };
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["type"], "milestone_ready");
        assert_eq!(json["tier"], "kindled");
        assert_eq!(json["length"], 10);
        assert_eq!(event.name(), "milestone_ready");

        let back: Event = serde_json::from_value(json).unwrap();
        assert_eq!(back, event);
    }
}
