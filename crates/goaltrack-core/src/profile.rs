//! The user's fixed daily routine.
//!
//! A [`UserProfile`] is plain data: it is loaded from the `[profile]` table of
//! the configuration file and handed explicitly to the energy model, the slot
//! finder and the ranker.

use chrono::NaiveTime;
use serde::{Deserialize, Serialize};

use crate::clock::{self, hhmm};
use crate::error::ValidationError;

/// Allowed commute length in minutes.
pub const MAX_COMMUTE_MINUTES: u32 = 120;

/// An inclusive clock-time range, e.g. a high-energy period.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClockRange {
    #[serde(with = "hhmm")]
    pub start: NaiveTime,
    #[serde(with = "hhmm")]
    pub end: NaiveTime,
}

impl ClockRange {
    pub fn new(start: NaiveTime, end: NaiveTime) -> Self {
        Self { start, end }
    }

    /// Inclusive on both ends.
    pub fn contains(&self, time: NaiveTime) -> bool {
        self.start <= time && time <= self.end
    }

    /// `"HH:MM-HH:MM"`.
    pub fn label(&self) -> String {
        format!("{}-{}", clock::format_24h(self.start), clock::format_24h(self.end))
    }
}

/// Daily routine used to derive the schedulable day and energy labels.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    #[serde(with = "hhmm", default = "default_wake")]
    pub wake_time: NaiveTime,
    #[serde(with = "hhmm", default = "default_sleep")]
    pub sleep_time: NaiveTime,
    #[serde(with = "hhmm", default = "default_work_start")]
    pub work_start: NaiveTime,
    #[serde(with = "hhmm", default = "default_work_end")]
    pub work_end: NaiveTime,
    /// Minutes, subtracted from `work_start`.
    #[serde(default = "default_commute")]
    pub commute_to_work: u32,
    /// Minutes, added to `work_end`.
    #[serde(default = "default_commute")]
    pub commute_from_work: u32,
    #[serde(default = "default_high_energy")]
    pub high_energy_periods: Vec<ClockRange>,
    #[serde(default = "default_low_energy")]
    pub low_energy_periods: Vec<ClockRange>,
}

fn hm(hour: u32, minute: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(hour, minute, 0).unwrap_or(NaiveTime::MIN)
}

fn default_wake() -> NaiveTime {
    hm(7, 0)
}
fn default_sleep() -> NaiveTime {
    hm(23, 0)
}
fn default_work_start() -> NaiveTime {
    hm(9, 0)
}
fn default_work_end() -> NaiveTime {
    hm(17, 0)
}
fn default_commute() -> u32 {
    30
}
fn default_high_energy() -> Vec<ClockRange> {
    vec![ClockRange::new(hm(9, 0), hm(11, 30))]
}
fn default_low_energy() -> Vec<ClockRange> {
    vec![ClockRange::new(hm(14, 0), hm(15, 30))]
}

impl Default for UserProfile {
    fn default() -> Self {
        Self {
            wake_time: default_wake(),
            sleep_time: default_sleep(),
            work_start: default_work_start(),
            work_end: default_work_end(),
            commute_to_work: default_commute(),
            commute_from_work: default_commute(),
            high_energy_periods: default_high_energy(),
            low_energy_periods: default_low_energy(),
        }
    }
}

impl UserProfile {
    /// Check the invariants the configuration surface must uphold.
    ///
    /// The core itself never calls this; it is the gate used by the CLI
    /// before a profile change is saved.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.wake_time >= self.sleep_time {
            return Err(ValidationError::InvalidTimeRange {
                field: "profile.sleep_time".into(),
                start: self.wake_time,
                end: self.sleep_time,
            });
        }
        if self.work_start >= self.work_end {
            return Err(ValidationError::InvalidTimeRange {
                field: "profile.work_end".into(),
                start: self.work_start,
                end: self.work_end,
            });
        }
        for (field, value) in [
            ("profile.commute_to_work", self.commute_to_work),
            ("profile.commute_from_work", self.commute_from_work),
        ] {
            if value > MAX_COMMUTE_MINUTES {
                return Err(ValidationError::OutOfRange {
                    field: field.into(),
                    value: value as i64,
                    min: 0,
                    max: MAX_COMMUTE_MINUTES as i64,
                });
            }
        }
        for (field, periods) in [
            ("profile.high_energy_periods", &self.high_energy_periods),
            ("profile.low_energy_periods", &self.low_energy_periods),
        ] {
            if let Some(bad) = periods.iter().find(|p| p.start > p.end) {
                return Err(ValidationError::InvalidTimeRange {
                    field: field.into(),
                    start: bad.start,
                    end: bad.end,
                });
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_documented_routine() {
        let p = UserProfile::default();
        assert_eq!(p.wake_time, hm(7, 0));
        assert_eq!(p.sleep_time, hm(23, 0));
        assert_eq!(p.work_start, hm(9, 0));
        assert_eq!(p.work_end, hm(17, 0));
        assert_eq!(p.commute_to_work, 30);
        assert_eq!(p.commute_from_work, 30);
        assert_eq!(p.high_energy_periods, vec![ClockRange::new(hm(9, 0), hm(11, 30))]);
        assert_eq!(p.low_energy_periods, vec![ClockRange::new(hm(14, 0), hm(15, 30))]);
        assert!(p.validate().is_ok());
    }

    #[test]
    fn clock_range_is_inclusive() {
        let range = ClockRange::new(hm(9, 0), hm(11, 30));
        assert!(range.contains(hm(9, 0)));
        assert!(range.contains(hm(11, 30)));
        assert!(!range.contains(hm(11, 31)));
        assert_eq!(range.label(), "09:00-11:30");
    }

    #[test]
    fn validate_rejects_inverted_day() {
        let p = UserProfile {
            wake_time: hm(23, 0),
            sleep_time: hm(7, 0),
            ..UserProfile::default()
        };
        assert!(matches!(
            p.validate(),
            Err(ValidationError::InvalidTimeRange { ref field, .. }) if field == "profile.sleep_time"
        ));
    }

    #[test]
    fn validate_rejects_long_commute() {
        let p = UserProfile {
            commute_from_work: 150,
            ..UserProfile::default()
        };
        assert_eq!(
            p.validate(),
            Err(ValidationError::OutOfRange {
                field: "profile.commute_from_work".into(),
                value: 150,
                min: 0,
                max: 120,
            })
        );
    }

    #[test]
    fn profile_reads_hhmm_from_toml() {
        let toml_str = r#"
            wake_time = "06:30"
            sleep_time = "22:00"
            commute_to_work = 0

            [[high_energy_periods]]
            start = "07:00"
            end = "08:00"
        "#;
        let p: UserProfile = toml::from_str(toml_str).unwrap();
        assert_eq!(p.wake_time, hm(6, 30));
        assert_eq!(p.sleep_time, hm(22, 0));
        assert_eq!(p.work_start, hm(9, 0));
        assert_eq!(p.commute_to_work, 0);
        assert_eq!(p.high_energy_periods, vec![ClockRange::new(hm(7, 0), hm(8, 0))]);
        assert_eq!(p.low_energy_periods, default_low_energy());
    }
}
