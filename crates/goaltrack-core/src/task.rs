//! Task records exchanged with a task store.

use std::fmt;
use std::str::FromStr;

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

use crate::clock;
use crate::energy::EnergyLevel;

/// Status every newly created task starts with.
pub const PLANNED_STATUS: &str = "Planned";

/// A previously scheduled commitment read from a task store.
///
/// Fields are kept as the store reported them. `time` stays raw so that a
/// malformed value can still be displayed; [`ExistingTask::start_time`] is the
/// only place it gets interpreted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExistingTask {
    pub activity: String,
    #[serde(default)]
    pub date: Option<NaiveDate>,
    #[serde(default)]
    pub time: Option<String>,
    #[serde(default)]
    pub duration_minutes: u32,
    #[serde(default = "default_energy")]
    pub energy: String,
    #[serde(default = "default_status")]
    pub status: String,
}

fn default_energy() -> String {
    EnergyLevel::Medium.as_str().to_string()
}

fn default_status() -> String {
    PLANNED_STATUS.to_string()
}

impl ExistingTask {
    pub fn new(activity: impl Into<String>) -> Self {
        Self {
            activity: activity.into(),
            date: None,
            time: None,
            duration_minutes: 0,
            energy: default_energy(),
            status: default_status(),
        }
    }

    pub fn at(mut self, time: impl Into<String>) -> Self {
        self.time = Some(time.into());
        self
    }

    pub fn on(mut self, date: NaiveDate) -> Self {
        self.date = Some(date);
        self
    }

    pub fn with_duration(mut self, minutes: u32) -> Self {
        self.duration_minutes = minutes;
        self
    }

    /// Start clock time, or `None` when the time is absent or not `"hh:mm AM/PM"`.
    pub fn start_time(&self) -> Option<NaiveTime> {
        self.time.as_deref().and_then(clock::parse_12h)
    }
}

/// Category attached to a newly created task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum TaskCategory {
    #[default]
    Personal,
    Work,
    Health,
    Learning,
    Social,
}

impl TaskCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Personal => "Personal",
            Self::Work => "Work",
            Self::Health => "Health",
            Self::Learning => "Learning",
            Self::Social => "Social",
        }
    }
}

impl fmt::Display for TaskCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TaskCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "personal" => Ok(Self::Personal),
            "work" => Ok(Self::Work),
            "health" => Ok(Self::Health),
            "learning" => Ok(Self::Learning),
            "social" => Ok(Self::Social),
            other => Err(format!("unknown category: {other}")),
        }
    }
}

/// Priority of the activity being scheduled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    High,
    #[default]
    Medium,
    Low,
}

impl Priority {
    /// Lowercase form used in ranking prompts.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::High => "high",
            Self::Medium => "medium",
            Self::Low => "low",
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Priority {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "high" => Ok(Self::High),
            "medium" => Ok(Self::Medium),
            "low" => Ok(Self::Low),
            other => Err(format!("unknown priority: {other}")),
        }
    }
}

/// A task about to be written to a store. Status is always [`PLANNED_STATUS`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewTask {
    pub activity: String,
    pub date: NaiveDate,
    pub time: NaiveTime,
    pub duration_minutes: u32,
    pub energy: EnergyLevel,
    pub category: TaskCategory,
}

impl NewTask {
    /// `"YYYY-MM-DD"`.
    pub fn date_string(&self) -> String {
        clock::format_date(self.date)
    }

    /// `"hh:mm AM/PM"`.
    pub fn time_string(&self) -> String {
        clock::format_12h(self.time)
    }

    pub fn status(&self) -> &'static str {
        PLANNED_STATUS
    }

    /// The record a store would hand back for this task.
    pub fn to_existing(&self) -> ExistingTask {
        ExistingTask {
            activity: self.activity.clone(),
            date: Some(self.date),
            time: Some(self.time_string()),
            duration_minutes: self.duration_minutes,
            energy: self.energy.as_str().to_string(),
            status: PLANNED_STATUS.to_string(),
        }
    }
}
