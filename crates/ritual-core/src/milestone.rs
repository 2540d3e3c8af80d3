//! Milestone delivery queue.
//!
//! Back-filling old months can unlock several milestones at once. The queue
//! hands them to the presentation layer one at a time, and only releases the
//! next after the open one is acknowledged.
//!
//! ## State Transitions
//!
//! ```text
//! Idle --enqueue (non-empty)--> Draining --acknowledge (queue empty)--> Idle
//!                               Draining --acknowledge (more queued)--> Draining
//! ```
//!
//! A milestone is *claimed* (its shown flag persisted) the moment it is
//! queued, not when it is displayed, so it is never queued twice even if the
//! process exits before it is shown.

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::storage::{keys, KvStore};
use crate::tier::{get_tier, is_milestone, Tier, MIN_TIER_DAYS};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QueueState {
    #[default]
    Idle,
    /// A celebration is open and waiting for acknowledgement.
    Draining,
}

/// A milestone handed to the presentation layer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Celebration {
    pub length: u32,
    pub tier: &'static Tier,
}

/// Single-flight FIFO of milestone lengths for the active habit.
#[derive(Debug, Default)]
pub struct MilestoneQueue {
    pending: VecDeque<u32>,
    state: QueueState,
    open: Option<Celebration>,
}

impl MilestoneQueue {
    pub fn new() -> Self {
        Self::default()
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn state(&self) -> QueueState {
        self.state
    }

    /// Lengths waiting behind the open celebration, in delivery order.
    pub fn pending(&self) -> impl Iterator<Item = u32> + '_ {
        self.pending.iter().copied()
    }

    pub fn open(&self) -> Option<Celebration> {
        self.open
    }

    // ── Commands ─────────────────────────────────────────────────────

    /// Claim and queue every milestone up to `streak` not yet shown for
    /// `habit_id`.
    ///
    /// Returns the celebration opened by this call, which only happens when
    /// the queue was idle.
    pub fn enqueue_pending<S: KvStore + ?Sized>(
        &mut self,
        store: &mut S,
        habit_id: &str,
        streak: u32,
    ) -> Result<Option<Celebration>> {
        let claimed = claim_pending(store, habit_id, streak)?;
        if claimed.is_empty() {
            return Ok(None);
        }
        tracing::debug!(habit_id, ?claimed, "queued milestones");
        self.pending.extend(claimed);

        Ok(match self.state {
            QueueState::Idle => self.drain(),
            QueueState::Draining => None,
        })
    }

    /// Close the open celebration and release the next one, if any.
    ///
    /// Ignored while idle.
    pub fn acknowledge(&mut self) -> Option<Celebration> {
        match self.state {
            QueueState::Idle => None,
            QueueState::Draining => {
                self.open = None;
                self.drain()
            }
        }
    }

    /// Drop everything queued. Shown flags stay set, so discarded entries
    /// never come back for that habit.
    pub fn reset(&mut self) {
        if !self.pending.is_empty() || self.open.is_some() {
            tracing::debug!(discarded = self.pending.len(), "reset milestone queue");
        }
        self.pending.clear();
        self.open = None;
        self.state = QueueState::Idle;
    }

    // ── Internal ─────────────────────────────────────────────────────

    fn drain(&mut self) -> Option<Celebration> {
        while let Some(length) = self.pending.pop_front() {
            match get_tier(length) {
                Some(tier) => {
                    let celebration = Celebration { length, tier };
                    self.state = QueueState::Draining;
                    self.open = Some(celebration);
                    return Some(celebration);
                }
                None => tracing::debug!(length, "skipping milestone without a tier"),
            }
        }
        self.state = QueueState::Idle;
        self.open = None;
        None
    }
}

/// Persist the shown flag for each unclaimed milestone in `3..=streak` and
/// return the newly claimed lengths in ascending order.
pub fn claim_pending<S: KvStore + ?Sized>(
    store: &mut S,
    habit_id: &str,
    streak: u32,
) -> Result<Vec<u32>> {
    let mut claimed = Vec::new();
    for n in (MIN_TIER_DAYS..=streak).filter(|&n| is_milestone(n)) {
        let key = keys::streak_shown(habit_id, n);
        if store.get(&key)?.is_none() {
            store.set(&key, keys::FLAG_SET)?;
            claimed.push(n);
        }
    }
    Ok(claimed)
}

pub fn is_shown<S: KvStore + ?Sized>(store: &S, habit_id: &str, length: u32) -> Result<bool> {
    Ok(store.get(&keys::streak_shown(habit_id, length))?.is_some())
}

/// Forget every claimed milestone of `habit_id` so a rebuilt streak
/// celebrates them again.
pub fn clear_shown_flags<S: KvStore + ?Sized>(store: &mut S, habit_id: &str) -> Result<usize> {
    let removed = store.remove_prefix(&keys::streak_shown_prefix(habit_id))?;
    tracing::debug!(habit_id, removed, "cleared milestone flags");
    Ok(removed)
}
