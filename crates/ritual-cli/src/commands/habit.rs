//! Habit management commands for CLI.

use clap::Subcommand;
use serde_json::json;

use super::{open_tracker, respond, CmdResult, Context};

#[derive(Subcommand)]
pub enum HabitAction {
    /// List habits and the active one
    List,
    /// Create a habit and make it active
    Add {
        /// Habit name
        name: String,
    },
    /// Rename a habit
    Rename {
        /// Habit ID
        id: String,
        /// New name
        name: String,
    },
    /// Delete a habit and all of its marks
    Delete {
        /// Habit ID
        id: String,
    },
    /// Make a habit active
    Switch {
        /// Habit ID
        id: String,
    },
}

pub fn run(ctx: &Context, action: HabitAction) -> CmdResult {
    let mut tracker = open_tracker(ctx)?;
    match action {
        HabitAction::List => {
            let habits = tracker.habits()?;
            let active = tracker.active_habit_id().to_string();
            respond(&mut tracker, json!({ "active": active, "habits": habits }))
        }
        HabitAction::Add { name } => {
            let id = tracker.create_habit(&name)?;
            let habits = tracker.habits()?;
            respond(&mut tracker, json!({ "id": id, "habits": habits }))
        }
        HabitAction::Rename { id, name } => {
            let renamed = tracker.rename_habit(&id, &name)?;
            if !renamed {
                eprintln!("unknown habit: {id}");
            }
            respond(&mut tracker, json!({ "renamed": renamed }))
        }
        HabitAction::Delete { id } => {
            let habits = tracker.delete_habit(&id)?;
            let active = tracker.active_habit_id().to_string();
            respond(&mut tracker, json!({ "active": active, "habits": habits }))
        }
        HabitAction::Switch { id } => {
            let switched = tracker.switch_habit(&id)?;
            let active = tracker.active_habit_id().to_string();
            respond(&mut tracker, json!({ "switched": switched, "active": active }))
        }
    }
}
