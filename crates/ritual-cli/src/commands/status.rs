use serde_json::json;

use super::{open_tracker, respond, CmdResult, Context};

pub fn run(ctx: &Context) -> CmdResult {
    let mut tracker = open_tracker(ctx)?;
    let habit = tracker.active_habit()?;
    let streak = tracker.streak_badge()?;
    let tier = streak.tier.map(|kind| kind.tier());
    let progress = tracker.month_progress()?;
    respond(
        &mut tracker,
        json!({
            "today": ctx.today.to_string(),
            "habit": habit,
            "streak": streak,
            "tier": tier,
            "progress": progress,
        }),
    )
}
