//! Patrol scheduling - time-triggered navigation targets.

use serde::{Deserialize, Serialize};

/// One patrol stop: at `time_minutes` into the day, head to `location`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PatrolEntry {
    /// Trigger time, minutes since midnight.
    pub time_minutes: f32,
    /// Named location to navigate to.
    pub location: String,
    /// What this stop is for (logging and status display).
    #[serde(default)]
    pub action: String,
}

impl PatrolEntry {
    /// Create a patrol entry.
    pub fn new(time_minutes: f32, location: impl Into<String>, action: impl Into<String>) -> Self {
        Self {
            time_minutes,
            location: location.into(),
            action: action.into(),
        }
    }
}

/// A day's patrol route, consumed in time order.
///
/// The schedule keeps a cursor instead of removing entries: each entry
/// triggers at most once, strictly in order, and a past entry never
/// re-triggers even if the clock is rewound.
#[derive(Clone, Debug, Default)]
pub struct PatrolSchedule {
    entries: Vec<PatrolEntry>,
    next: usize,
}

impl PatrolSchedule {
    /// Build a schedule, sorting entries by trigger time.
    pub fn new(mut entries: Vec<PatrolEntry>) -> Self {
        entries.sort_by(|a, b| a.time_minutes.total_cmp(&b.time_minutes));
        Self { entries, next: 0 }
    }

    /// All entries in trigger order.
    pub fn entries(&self) -> &[PatrolEntry] {
        &self.entries
    }

    /// Number of entries not yet triggered.
    pub fn remaining(&self) -> usize {
        self.entries.len() - self.next
    }

    /// Pop the next entry if its trigger time has passed.
    ///
    /// Advances the cursor, so the same entry is never returned twice.
    pub fn pop_due(&mut self, current_minutes: f32) -> Option<PatrolEntry> {
        let entry = self.entries.get(self.next)?;
        if current_minutes >= entry.time_minutes {
            self.next += 1;
            Some(entry.clone())
        } else {
            None
        }
    }
}

/// The default daily patrol route over the default office.
pub fn default_patrol() -> Vec<PatrolEntry> {
    vec![
        PatrolEntry::new(8.0 * 60.0 + 50.0, "entrance", "morning greeting"),
        PatrolEntry::new(9.0 * 60.0 - 5.0, "meeting-room-a", "standup reminder"),
        PatrolEntry::new(9.0 * 60.0 + 30.0, "hall-center", "corridor round"),
        PatrolEntry::new(10.0 * 60.0 - 5.0, "meeting-room-c", "weekly sync reminder"),
        PatrolEntry::new(12.0 * 60.0, "pantry", "lunch round"),
        PatrolEntry::new(14.0 * 60.0 - 5.0, "meeting-room-b", "1-on-1 reminder"),
        PatrolEntry::new(15.0 * 60.0, "hall-center", "afternoon round"),
        PatrolEntry::new(16.0 * 60.0 - 5.0, "meeting-room-a", "review reminder"),
        PatrolEntry::new(17.0 * 60.0 + 30.0, "dock", "return to charge"),
    ]
}
