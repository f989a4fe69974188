//! Energy labels derived from configured time ranges.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveTime;
use serde::{Deserialize, Serialize};

use crate::profile::{ClockRange, UserProfile};

/// Qualitative energy of a point in time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EnergyLevel {
    High,
    Medium,
    Low,
}

impl EnergyLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::High => "High",
            Self::Medium => "Medium",
            Self::Low => "Low",
        }
    }
}

impl fmt::Display for EnergyLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EnergyLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "high" => Ok(Self::High),
            "medium" => Ok(Self::Medium),
            "low" => Ok(Self::Low),
            other => Err(format!("unknown energy level: {other}")),
        }
    }
}

/// Labels clock times from a profile's energy periods.
///
/// High periods are checked before low ones, so a time covered by both
/// (a configuration mistake) is labelled `High`.
#[derive(Debug, Clone, Copy)]
pub struct EnergyModel<'a> {
    high: &'a [ClockRange],
    low: &'a [ClockRange],
}

impl<'a> EnergyModel<'a> {
    pub fn new(high: &'a [ClockRange], low: &'a [ClockRange]) -> Self {
        Self { high, low }
    }

    pub fn from_profile(profile: &'a UserProfile) -> Self {
        Self::new(&profile.high_energy_periods, &profile.low_energy_periods)
    }

    /// Label for `time`. Bounds are inclusive; anything uncovered is `Medium`.
    pub fn label(&self, time: NaiveTime) -> EnergyLevel {
        if self.high.iter().any(|p| p.contains(time)) {
            EnergyLevel::High
        } else if self.low.iter().any(|p| p.contains(time)) {
            EnergyLevel::Low
        } else {
            EnergyLevel::Medium
        }
    }

    pub fn high_periods(&self) -> &'a [ClockRange] {
        self.high
    }

    pub fn low_periods(&self) -> &'a [ClockRange] {
        self.low
    }
}
