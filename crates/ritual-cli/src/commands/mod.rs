//! Subcommand implementations.
//!
//! Tracker-backed commands open a session against the configured database,
//! run one command and print a single JSON document containing the command
//! result plus every event it produced.

pub mod completions;
pub mod config;
pub mod day;
pub mod habit;
pub mod month;
pub mod status;

use chrono::NaiveDate;
use ritual_core::{Config, Event, SqliteStore, Tracker, YearMonth};

pub type CmdResult = Result<(), Box<dyn std::error::Error>>;

/// Values from the global flags.
pub struct Context {
    pub today: NaiveDate,
    pub month: Option<YearMonth>,
}

/// Open a tracker for `ctx`, honouring `--month`.
pub fn open_tracker(ctx: &Context) -> Result<Tracker<SqliteStore>, Box<dyn std::error::Error>> {
    let config = Config::load()?;
    tracing::debug!(today = %ctx.today, db = %config.storage.database_file, "opening tracker");
    let store = SqliteStore::open(&config.storage.database_file)?;
    let mut tracker = Tracker::open(store, ctx.today, &config.tracker)?;
    if let Some(month) = ctx.month {
        tracker.show_month(month)?;
    }
    Ok(tracker)
}

/// Collect pending events, acknowledging each celebration in turn so queued
/// milestones are all reported.
pub fn deliver_events(tracker: &mut Tracker<SqliteStore>) -> Vec<Event> {
    let mut events = tracker.drain_events();
    while tracker.acknowledge_milestone().is_some() {
        events.extend(tracker.drain_events());
    }
    events
}

/// Print `body` with the delivered events attached under `"events"`.
pub fn respond(tracker: &mut Tracker<SqliteStore>, mut body: serde_json::Value) -> CmdResult {
    let events = deliver_events(tracker);
    if let Some(obj) = body.as_object_mut() {
        obj.insert("events".to_string(), serde_json::to_value(&events)?);
    }
    println!("{}", serde_json::to_string_pretty(&body)?);
    Ok(())
}
