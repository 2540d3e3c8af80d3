//! Session controller.
//!
//! A [`Tracker`] owns the store together with the view state the
//! presentation layer works against: the active habit, the displayed month
//! and the milestone queue. Every command that changes what should be on
//! screen ends with a [`refresh`](Tracker::refresh), the equivalent of a
//! full re-render, and leaves its notifications in an event buffer for the
//! caller to poll.
//!
//! ## Usage
//!
//! ```ignore
//! let mut tracker = Tracker::open(store, today, &config.tracker)?;
//! tracker.toggle_day(14)?;
//! for event in tracker.drain_events() {
//!     // render, and call acknowledge_milestone() when a celebration closes
//! }
//! ```

use chrono::{NaiveDate, Utc};
use serde::Serialize;

use crate::calendar::YearMonth;
use crate::error::{CoreError, Result, ValidationError};
use crate::events::Event;
use crate::habit::{Habit, HabitRegistry};
use crate::marks::{self, DaySet};
use crate::milestone::{clear_shown_flags, Celebration, MilestoneQueue};
use crate::month::{check_month_complete, clear_month_done};
use crate::storage::{KvStore, TrackerConfig};
use crate::streak::StreakEngine;
use crate::tier::{get_tier, TierKind};

/// Current streak as shown in the header badge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StreakBadge {
    pub days: u32,
    /// `None` for streaks of one or two days.
    pub tier: Option<TierKind>,
}

impl StreakBadge {
    /// The badge stays hidden until today is marked.
    pub fn is_visible(&self) -> bool {
        self.days > 0
    }
}

/// How much of the displayed month is marked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MonthProgress {
    pub year: i32,
    pub month: u32,
    pub marked: u32,
    pub total_days: u32,
    /// Rounded to the nearest whole percent.
    pub percent: u32,
}

pub struct Tracker<S: KvStore> {
    store: S,
    streak: StreakEngine,
    default_habit_name: String,
    today: NaiveDate,
    active_id: String,
    view: YearMonth,
    queue: MilestoneQueue,
    events: Vec<Event>,
}

impl<S: KvStore> Tracker<S> {
    /// Load the registry, view today's month and run the initial refresh.
    ///
    /// `today` stays fixed for the lifetime of the tracker so streak math is
    /// consistent across a session.
    pub fn open(store: S, today: NaiveDate, config: &TrackerConfig) -> Result<Self> {
        let mut tracker = Self {
            store,
            streak: StreakEngine::with_max_lookback(config.max_lookback_days),
            default_habit_name: config.default_habit_name.clone(),
            today,
            active_id: String::new(),
            view: YearMonth::of(today),
            queue: MilestoneQueue::new(),
            events: Vec::new(),
        };
        let active = tracker.registry().active_id()?;
        tracker.active_id = active;
        tracker.refresh()?;
        Ok(tracker)
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn today(&self) -> NaiveDate {
        self.today
    }

    pub fn view(&self) -> YearMonth {
        self.view
    }

    pub fn active_habit_id(&self) -> &str {
        &self.active_id
    }

    pub fn habits(&mut self) -> Result<Vec<Habit>> {
        self.registry().list()
    }

    /// The active habit, falling back to the first one.
    pub fn active_habit(&mut self) -> Result<Habit> {
        let habits = self.registry().list()?;
        habits
            .iter()
            .find(|h| h.id == self.active_id)
            .or_else(|| habits.first())
            .cloned()
            .ok_or_else(|| CoreError::Custom("habit registry is empty".to_string()))
    }

    /// Marked days of the displayed month.
    pub fn marked_days(&self) -> Result<DaySet> {
        marks::load_marked(&self.store, &self.active_id, self.view)
    }

    /// Current streak of the active habit as of today.
    pub fn streak(&self) -> Result<u32> {
        self.streak.compute(&self.store, &self.active_id, self.today)
    }

    pub fn streak_badge(&self) -> Result<StreakBadge> {
        let days = self.streak()?;
        Ok(StreakBadge {
            days,
            tier: get_tier(days).map(|t| t.kind),
        })
    }

    pub fn month_progress(&self) -> Result<MonthProgress> {
        let marked = self.marked_days()?.len() as u32;
        let total_days = self.view.days_in_month();
        let percent = (f64::from(marked) * 100.0 / f64::from(total_days)).round() as u32;
        Ok(MonthProgress {
            year: self.view.year(),
            month: self.view.month(),
            marked,
            total_days,
            percent,
        })
    }

    /// The celebration currently waiting for acknowledgement.
    pub fn open_milestone(&self) -> Option<Celebration> {
        self.queue.open()
    }

    pub fn queue(&self) -> &MilestoneQueue {
        &self.queue
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Take every event emitted since the last call.
    pub fn drain_events(&mut self) -> Vec<Event> {
        std::mem::take(&mut self.events)
    }

    // ── Commands ─────────────────────────────────────────────────────

    /// Recompute the streak and month state, queueing any newly unlocked
    /// milestone and reporting a newly completed month.
    pub fn refresh(&mut self) -> Result<()> {
        let streak = self.streak()?;
        if streak >= 1 {
            if let Some(celebration) =
                self.queue
                    .enqueue_pending(&mut self.store, &self.active_id, streak)?
            {
                self.emit_milestone(celebration);
            }
        }

        let marked = self.marked_days()?;
        let completion = check_month_complete(
            &mut self.store,
            &self.active_id,
            self.view,
            &marked,
            self.view.days_in_month(),
        )?;
        if let Some(done) = completion {
            self.events.push(Event::MonthCompleted {
                year: done.year,
                month: done.month,
                total_days: done.total_days,
                at: Utc::now(),
            });
        }
        Ok(())
    }

    /// Add a habit and make it active.
    pub fn create_habit(&mut self, name: &str) -> Result<String> {
        let id = self.registry().create(name)?;
        self.registry().set_active_id(&id)?;
        self.active_id = id.clone();
        self.reset_session();
        self.emit_habit_list()?;
        self.emit_active_changed();
        self.refresh()?;
        Ok(id)
    }

    /// Rename a habit. Returns `false` for an unknown id.
    pub fn rename_habit(&mut self, id: &str, name: &str) -> Result<bool> {
        let renamed = self.registry().rename(id, name)?;
        if renamed {
            self.emit_habit_list()?;
        }
        Ok(renamed)
    }

    /// Delete a habit and all of its data.
    ///
    /// # Errors
    /// [`ValidationError::LastHabit`] when `id` is the only habit.
    pub fn delete_habit(&mut self, id: &str) -> Result<Vec<Habit>> {
        let before = self.registry().list()?;
        if !before.iter().any(|h| h.id == id) {
            return Ok(before);
        }

        let remaining = self.registry().delete(id)?;
        let active = self.registry().active_id()?;
        let active_changed = active != self.active_id;
        self.active_id = active;
        self.reset_session();
        self.emit_habit_list()?;
        if active_changed {
            self.emit_active_changed();
        }
        self.refresh()?;
        Ok(remaining)
    }

    /// Make `id` the active habit. Returns `false` if it already is, or if
    /// no such habit exists.
    pub fn switch_habit(&mut self, id: &str) -> Result<bool> {
        if id == self.active_id || self.registry().get(id)?.is_none() {
            return Ok(false);
        }
        self.registry().set_active_id(id)?;
        self.active_id = id.to_string();
        self.reset_session();
        self.emit_active_changed();
        self.refresh()?;
        Ok(true)
    }

    pub fn show_month(&mut self, ym: YearMonth) -> Result<()> {
        self.view = ym;
        self.refresh()
    }

    pub fn previous_month(&mut self) -> Result<()> {
        self.show_month(self.view.previous())
    }

    pub fn next_month(&mut self) -> Result<()> {
        self.show_month(self.view.next())
    }

    /// Toggle `day` of the displayed month. Returns whether it is now marked.
    ///
    /// # Errors
    /// [`ValidationError::DayOutOfRange`] if the month has no such day.
    pub fn toggle_day(&mut self, day: u32) -> Result<bool> {
        let days_in_month = self.view.days_in_month();
        if !(1..=days_in_month).contains(&day) {
            return Err(ValidationError::DayOutOfRange { day, days_in_month }.into());
        }
        let marked = marks::toggle_day(&mut self.store, &self.active_id, self.view, day)?;
        self.emit_marked_changed();
        self.refresh()?;
        Ok(marked)
    }

    /// Unmark every day of the displayed month.
    ///
    /// If that breaks the live streak, every milestone of the habit becomes
    /// eligible again.
    pub fn clear_month(&mut self) -> Result<()> {
        marks::save_marked(&mut self.store, &self.active_id, self.view, &DaySet::new())?;
        clear_month_done(&mut self.store, &self.active_id, self.view)?;
        if self.streak()? == 0 {
            clear_shown_flags(&mut self.store, &self.active_id)?;
        }
        self.emit_marked_changed();
        self.refresh()
    }

    /// The open celebration was dismissed; release the next one.
    pub fn acknowledge_milestone(&mut self) -> Option<Celebration> {
        let next = self.queue.acknowledge();
        if let Some(celebration) = next {
            self.emit_milestone(celebration);
        }
        next
    }

    // ── Internal ─────────────────────────────────────────────────────

    fn registry(&mut self) -> HabitRegistry<'_, S> {
        HabitRegistry::new(&mut self.store).with_default_name(&self.default_habit_name)
    }

    /// View and queue state never carry over from one habit to another.
    fn reset_session(&mut self) {
        self.view = YearMonth::of(self.today);
        self.queue.reset();
    }

    fn emit_habit_list(&mut self) -> Result<()> {
        let habits = self.registry().list()?;
        self.events.push(Event::HabitListChanged {
            habits,
            at: Utc::now(),
        });
        Ok(())
    }

    fn emit_active_changed(&mut self) {
        self.events.push(Event::ActiveHabitChanged {
            habit_id: self.active_id.clone(),
            at: Utc::now(),
        });
    }

    fn emit_marked_changed(&mut self) {
        self.events.push(Event::MarkedDaysChanged {
            year: self.view.year(),
            month: self.view.month(),
            at: Utc::now(),
        });
    }

    fn emit_milestone(&mut self, celebration: Celebration) {
        self.events.push(Event::MilestoneReady {
            length: celebration.length,
            tier: celebration.tier.kind,
            at: Utc::now(),
        });
    }
}
