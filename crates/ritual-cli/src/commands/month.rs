use clap::Subcommand;
use ritual_core::month::is_month_done;
use serde_json::json;

use super::{open_tracker, respond, CmdResult, Context};

#[derive(Subcommand)]
pub enum MonthAction {
    /// Unmark every day of the displayed month
    Clear,
    /// Progress of the displayed month
    Status,
}

pub fn run(ctx: &Context, action: MonthAction) -> CmdResult {
    let mut tracker = open_tracker(ctx)?;
    match action {
        MonthAction::Clear => {
            tracker.clear_month()?;
            let progress = tracker.month_progress()?;
            let streak = tracker.streak_badge()?;
            respond(&mut tracker, json!({ "progress": progress, "streak": streak }))
        }
        MonthAction::Status => {
            let progress = tracker.month_progress()?;
            let completed =
                is_month_done(tracker.store(), tracker.active_habit_id(), tracker.view())?;
            let label = tracker.view().label();
            respond(
                &mut tracker,
                json!({
                    "label": label,
                    "progress": progress,
                    "completed": completed,
                }),
            )
        }
    }
}
