use clap::Subcommand;
use serde_json::json;

use super::{open_tracker, respond, CmdResult, Context};

#[derive(Subcommand)]
pub enum DayAction {
    /// Toggle a day of the displayed month
    Toggle {
        /// Day of month (1-31)
        day: u32,
    },
    /// List marked days of the displayed month
    List,
}

pub fn run(ctx: &Context, action: DayAction) -> CmdResult {
    let mut tracker = open_tracker(ctx)?;
    let view = tracker.view();
    match action {
        DayAction::Toggle { day } => {
            let marked = tracker.toggle_day(day)?;
            let streak = tracker.streak_badge()?;
            respond(
                &mut tracker,
                json!({ "month": view.to_string(), "day": day, "marked": marked, "streak": streak }),
            )
        }
        DayAction::List => {
            let days = tracker.marked_days()?;
            respond(&mut tracker, json!({ "month": view.to_string(), "days": days }))
        }
    }
}
