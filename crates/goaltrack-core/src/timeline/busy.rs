//! Busy intervals: the work block and existing tasks.

use chrono::{Duration, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::profile::UserProfile;
use crate::task::ExistingTask;

/// What makes an interval busy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind", content = "activity")]
pub enum BusySource {
    /// Work hours plus both commutes
    WorkBlock,
    /// A task from the store
    Task(String),
}

impl BusySource {
    pub fn label(&self) -> &str {
        match self {
            Self::WorkBlock => "Work + commute",
            Self::Task(activity) => activity,
        }
    }
}

/// A time range during which no new activity can be placed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BusyInterval {
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
    pub source: BusySource,
}

impl BusyInterval {
    pub fn new(start: NaiveDateTime, end: NaiveDateTime, source: BusySource) -> Self {
        Self { start, end, source }
    }

    /// Get duration in minutes
    pub fn duration_minutes(&self) -> i64 {
        (self.end - self.start).num_minutes()
    }

    /// The single block from leaving for work until arriving home.
    ///
    /// Commutes are applied regardless of whether they overlap work hours.
    pub fn work_block(profile: &UserProfile, date: NaiveDate) -> Self {
        let leave = date.and_time(profile.work_start)
            - Duration::minutes(profile.commute_to_work as i64);
        let arrive =
            date.and_time(profile.work_end) + Duration::minutes(profile.commute_from_work as i64);
        Self::new(leave, arrive, BusySource::WorkBlock)
    }

    /// Interval for an existing task, or `None` when its time does not parse.
    pub fn from_task(task: &ExistingTask, date: NaiveDate) -> Option<Self> {
        let start = date.and_time(task.start_time()?);
        let end = start + Duration::minutes(task.duration_minutes as i64);
        Some(Self::new(start, end, BusySource::Task(task.activity.clone())))
    }
}

/// All busy intervals for `date`, sorted by start time.
///
/// Overlapping intervals are left as they are; the free-slot sweep absorbs
/// them. Tasks without a parsable time are skipped.
pub fn collect_busy_intervals(
    profile: &UserProfile,
    date: NaiveDate,
    tasks: &[ExistingTask],
) -> Vec<BusyInterval> {
    let mut intervals = vec![BusyInterval::work_block(profile, date)];

    for task in tasks {
        match BusyInterval::from_task(task, date) {
            Some(interval) => intervals.push(interval),
            None => tracing::debug!(
                activity = %task.activity,
                time = ?task.time,
                "skipping task without a parsable start time"
            ),
        }
    }

    intervals.sort_by_key(|i| i.start);
    intervals
}
