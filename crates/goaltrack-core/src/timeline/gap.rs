//! Free-slot detection within the schedulable day.
//!
//! Finds the time between wake-up and sleep that is not covered by the work
//! block or an existing task, keeping only windows long enough for the
//! requested activity.

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use super::busy::{collect_busy_intervals, BusyInterval};
use crate::clock;
use crate::energy::{EnergyLevel, EnergyModel};
use crate::profile::UserProfile;
use crate::task::ExistingTask;

/// A free window on the scheduling date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FreeSlot {
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
    pub duration_minutes: i64,
    /// Energy at `start`.
    pub energy: EnergyLevel,
}

impl FreeSlot {
    /// Check if this slot can fit an activity of given duration
    pub fn can_fit(&self, minutes: i64) -> bool {
        self.duration_minutes >= minutes
    }

    /// `"hh:mm AM/PM"` of the start.
    pub fn start_label(&self) -> String {
        clock::format_12h(self.start.time())
    }

    /// `"hh:mm AM/PM"` of the end.
    pub fn end_label(&self) -> String {
        clock::format_12h(self.end.time())
    }

    /// One-line description, e.g. `07:00 AM - 08:30 AM, Duration: 90 min, Energy: Medium`.
    pub fn describe(&self) -> String {
        format!(
            "{} - {}, Duration: {} min, Energy: {}",
            self.start_label(),
            self.end_label(),
            self.duration_minutes,
            self.energy
        )
    }
}

/// Computes free slots for a single day from a user profile.
pub struct SlotFinder<'a> {
    profile: &'a UserProfile,
    energy: EnergyModel<'a>,
}

impl<'a> SlotFinder<'a> {
    pub fn new(profile: &'a UserProfile) -> Self {
        Self {
            profile,
            energy: EnergyModel::from_profile(profile),
        }
    }

    /// Free slots on `date` of at least `min_duration_minutes`, in chronological order.
    ///
    /// Busy intervals are swept with a single cursor, so overlapping
    /// intervals never split a slot. The sweep is confined to
    /// `[wake_time, sleep_time]`: intervals outside the day are ignored and
    /// a day with `sleep_time <= wake_time` has no slots.
    pub fn find_free_slots(
        &self,
        date: NaiveDate,
        existing_tasks: &[ExistingTask],
        min_duration_minutes: i64,
    ) -> Vec<FreeSlot> {
        let busy = collect_busy_intervals(self.profile, date, existing_tasks);
        self.sweep(date, &busy, min_duration_minutes)
    }

    /// Sweep pre-computed busy intervals (must be sorted by start).
    pub fn sweep(
        &self,
        date: NaiveDate,
        busy: &[BusyInterval],
        min_duration_minutes: i64,
    ) -> Vec<FreeSlot> {
        let day_start = date.and_time(self.profile.wake_time);
        let day_end = date.and_time(self.profile.sleep_time);

        let mut slots = Vec::new();
        if day_end <= day_start {
            return slots;
        }

        let mut cursor = day_start;
        for interval in busy {
            if interval.start >= day_end {
                break;
            }
            if cursor < interval.start {
                self.push_slot(&mut slots, cursor, interval.start, min_duration_minutes);
            }
            cursor = cursor.max(interval.end.min(day_end));
        }

        if cursor < day_end {
            self.push_slot(&mut slots, cursor, day_end, min_duration_minutes);
        }

        slots
    }

    fn push_slot(
        &self,
        slots: &mut Vec<FreeSlot>,
        start: NaiveDateTime,
        end: NaiveDateTime,
        min_duration_minutes: i64,
    ) {
        let duration_minutes = (end - start).num_minutes();
        if duration_minutes < min_duration_minutes {
            return;
        }
        slots.push(FreeSlot {
            start,
            end,
            duration_minutes,
            energy: self.energy.label(start.time()),
        });
    }
}

/// Convenience function using a profile directly.
pub fn find_free_slots(
    profile: &UserProfile,
    date: NaiveDate,
    existing_tasks: &[ExistingTask],
    min_duration_minutes: i64,
) -> Vec<FreeSlot> {
    SlotFinder::new(profile).find_free_slots(date, existing_tasks, min_duration_minutes)
}
