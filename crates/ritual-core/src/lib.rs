//! # Ritual Core Library
//!
//! This library provides the business logic for Ritual, a habit tracker:
//! users mark calendar days per habit and get streak counts, milestone
//! celebrations and month-completion rewards. Every operation is available
//! from the standalone CLI; a GUI is meant to be a thin layer over the same
//! [`Tracker`].
//!
//! ## Architecture
//!
//! - **Storage**: a flat string key-value contract ([`KvStore`]) with
//!   SQLite and in-memory adapters, plus TOML configuration
//! - **Habit Registry**: ordered habit list and the active-habit pointer
//! - **Day Marks / Streak Engine**: per-month mark sets and the
//!   consecutive-day walk over them
//! - **Tiers / Milestones**: the static tier catalog and the single-flight
//!   delivery queue for celebrations
//! - **Month Completion**: one-shot detection of fully marked months
//!
//! ## Key Components
//!
//! - [`Tracker`]: session controller owning view state and emitting [`Event`]s
//! - [`MilestoneQueue`]: Idle/Draining state machine for celebrations
//! - [`SqliteStore`]: durable key-value store
//! - [`Config`]: application configuration management

pub mod calendar;
pub mod error;
pub mod events;
pub mod habit;
pub mod marks;
pub mod milestone;
pub mod month;
pub mod storage;
pub mod streak;
pub mod tier;
pub mod tracker;

pub use calendar::YearMonth;
pub use error::{ConfigError, CoreError, StoreError, ValidationError};
pub use events::Event;
pub use habit::{Habit, HabitRegistry};
pub use marks::DaySet;
pub use milestone::{Celebration, MilestoneQueue, QueueState};
pub use month::MonthCompletion;
pub use storage::{Config, KvStore, MemoryStore, SqliteStore};
pub use streak::StreakEngine;
pub use tier::{get_tier, is_milestone, Tier, TierKind, TIERS};
pub use tracker::{MonthProgress, StreakBadge, Tracker};
