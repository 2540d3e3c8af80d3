//! Habit registry.
//!
//! The list of habits and the active-habit pointer live under `ht_habits`
//! and `ht_active`. The registry is never empty: reading an absent, empty or
//! unparsable list seeds a default habit.

use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::error::{Result, ValidationError};
use crate::storage::{keys, KvStore};

pub const DEFAULT_HABIT_ID: &str = "default";
pub const DEFAULT_HABIT_NAME: &str = "Daily Ritual";

/// A tracked activity with its own calendar state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Habit {
    /// Immutable once created; namespaces every key of this habit.
    pub id: String,
    pub name: String,
}

/// CRUD over the habit list, borrowing the store for the duration of a call
/// sequence.
pub struct HabitRegistry<'a, S: KvStore + ?Sized> {
    store: &'a mut S,
    default_name: &'a str,
}

impl<'a, S: KvStore + ?Sized> HabitRegistry<'a, S> {
    pub fn new(store: &'a mut S) -> Self {
        Self {
            store,
            default_name: DEFAULT_HABIT_NAME,
        }
    }

    /// Name used when seeding the registry on first use.
    pub fn with_default_name(mut self, name: &'a str) -> Self {
        self.default_name = name;
        self
    }

    /// All habits in insertion order. Never empty.
    pub fn list(&mut self) -> Result<Vec<Habit>> {
        if let Some(raw) = self.store.get(keys::HABITS)? {
            match serde_json::from_str::<Vec<Habit>>(&raw) {
                Ok(habits) if !habits.is_empty() => return Ok(habits),
                Ok(_) => tracing::warn!("habit list is empty, seeding default habit"),
                Err(e) => tracing::warn!(error = %e, "habit list is malformed, seeding default habit"),
            }
        }

        let name = match self.default_name.trim() {
            "" => DEFAULT_HABIT_NAME,
            name => name,
        };
        let seeded = vec![Habit {
            id: DEFAULT_HABIT_ID.to_string(),
            name: name.to_string(),
        }];
        self.save(&seeded)?;
        Ok(seeded)
    }

    pub fn get(&mut self, id: &str) -> Result<Option<Habit>> {
        Ok(self.list()?.into_iter().find(|h| h.id == id))
    }

    /// Append a new habit and return its id.
    ///
    /// # Errors
    /// [`ValidationError::EmptyName`] if `name` is blank.
    pub fn create(&mut self, name: &str) -> Result<String> {
        let name = validated_name(name)?;
        let mut habits = self.list()?;
        let id = next_id(&habits);
        habits.push(Habit {
            id: id.clone(),
            name: name.to_string(),
        });
        self.save(&habits)?;
        tracing::info!(habit_id = %id, name, "created habit");
        Ok(id)
    }

    /// Rename `id`. Returns `false` when no such habit exists.
    ///
    /// # Errors
    /// [`ValidationError::EmptyName`] if `name` is blank.
    pub fn rename(&mut self, id: &str, name: &str) -> Result<bool> {
        let name = validated_name(name)?;
        let mut habits = self.list()?;
        let Some(habit) = habits.iter_mut().find(|h| h.id == id) else {
            return Ok(false);
        };
        habit.name = name.to_string();
        self.save(&habits)?;
        tracing::info!(habit_id = %id, name, "renamed habit");
        Ok(true)
    }

    /// Remove `id` together with every key namespaced under it.
    ///
    /// Returns the remaining habits. An unknown id leaves everything as is.
    /// If the removed habit was active, the first remaining habit becomes
    /// active.
    ///
    /// # Errors
    /// [`ValidationError::LastHabit`] if `id` is the only habit left.
    pub fn delete(&mut self, id: &str) -> Result<Vec<Habit>> {
        let habits = self.list()?;
        if !habits.iter().any(|h| h.id == id) {
            return Ok(habits);
        }
        if habits.len() == 1 {
            return Err(ValidationError::LastHabit { id: id.to_string() }.into());
        }

        let was_active = self.active_id()? == id;
        let remaining: Vec<Habit> = habits.into_iter().filter(|h| h.id != id).collect();
        self.save(&remaining)?;
        let removed = self.store.remove_prefix(&keys::habit_prefix(id))?;
        tracing::info!(habit_id = %id, removed_keys = removed, "deleted habit");

        if was_active {
            if let Some(first) = remaining.first() {
                self.set_active_id(&first.id)?;
            }
        }
        Ok(remaining)
    }

    /// The persisted active habit, or the first habit when unset or stale.
    pub fn active_id(&mut self) -> Result<String> {
        let habits = self.list()?;
        if let Some(active) = self.store.get(keys::ACTIVE)? {
            if habits.iter().any(|h| h.id == active) {
                return Ok(active);
            }
            tracing::debug!(habit_id = %active, "active habit pointer is stale");
        }
        Ok(habits
            .into_iter()
            .next()
            .map(|h| h.id)
            .unwrap_or_else(|| DEFAULT_HABIT_ID.to_string()))
    }

    pub fn set_active_id(&mut self, id: &str) -> Result<()> {
        self.store.set(keys::ACTIVE, id)?;
        Ok(())
    }

    fn save(&mut self, habits: &[Habit]) -> Result<()> {
        let json = serde_json::to_string(habits)?;
        self.store.set(keys::HABITS, &json)?;
        Ok(())
    }
}

fn validated_name(name: &str) -> Result<&str, ValidationError> {
    match name.trim() {
        "" => Err(ValidationError::EmptyName),
        trimmed => Ok(trimmed),
    }
}

/// `h_<unix millis>`, bumped past any id already taken.
fn next_id(habits: &[Habit]) -> String {
    let mut millis = Utc::now().timestamp_millis();
    loop {
        let id = format!("h_{millis}");
        if !habits.iter().any(|h| h.id == id) {
            return id;
        }
        millis += 1;
    }
}
