//! Scheduling service.
//!
//! Ties the profile, a task store and a ranking oracle together:
//! - `plan`: read the day's tasks, find free slots and rank them
//! - `commit`: write the chosen slot back to the store as a planned task
//! - `overview`: the day's tasks next to its free slots

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{Result, ValidationError};
use crate::integrations::TaskStore;
use crate::profile::UserProfile;
use crate::ranking::{RankingOracle, SlotRanker, SlotRecommendation, Suggestion};
use crate::storage::{MAX_ACTIVITY_MINUTES, MIN_ACTIVITY_MINUTES};
use crate::task::{ExistingTask, NewTask, Priority, TaskCategory};
use crate::timeline::{FreeSlot, SlotFinder};

/// An activity the user wants placed on a day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActivityRequest {
    pub activity: String,
    pub duration_minutes: u32,
    pub priority: Priority,
    pub category: TaskCategory,
    pub date: NaiveDate,
}

impl ActivityRequest {
    pub fn new(activity: impl Into<String>, date: NaiveDate) -> Self {
        Self {
            activity: activity.into(),
            duration_minutes: 60,
            priority: Priority::default(),
            category: TaskCategory::default(),
            date,
        }
    }

    pub fn validate(&self) -> std::result::Result<(), ValidationError> {
        if self.activity.trim().is_empty() {
            return Err(ValidationError::InvalidValue {
                field: "activity".into(),
                message: "activity name cannot be empty".into(),
            });
        }
        if !(MIN_ACTIVITY_MINUTES..=MAX_ACTIVITY_MINUTES).contains(&self.duration_minutes) {
            return Err(ValidationError::OutOfRange {
                field: "duration".into(),
                value: self.duration_minutes as i64,
                min: MIN_ACTIVITY_MINUTES as i64,
                max: MAX_ACTIVITY_MINUTES as i64,
            });
        }
        Ok(())
    }
}

/// Tasks and free slots of one day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DayOverview {
    pub date: NaiveDate,
    pub tasks: Vec<ExistingTask>,
    pub free_slots: Vec<FreeSlot>,
}

impl DayOverview {
    pub fn free_minutes(&self) -> i64 {
        self.free_slots.iter().map(|s| s.duration_minutes).sum()
    }
}

pub struct Scheduler<'a> {
    profile: &'a UserProfile,
    store: &'a dyn TaskStore,
    oracle: &'a dyn RankingOracle,
}

impl<'a> Scheduler<'a> {
    pub fn new(
        profile: &'a UserProfile,
        store: &'a dyn TaskStore,
        oracle: &'a dyn RankingOracle,
    ) -> Self {
        Self {
            profile,
            store,
            oracle,
        }
    }

    /// Suggest a slot for `request`. Store failures are returned; oracle
    /// failures are absorbed by the ranker's fallback.
    pub fn plan(&self, request: &ActivityRequest) -> Result<Suggestion> {
        request.validate()?;
        let tasks = self.store.fetch_tasks(Some(request.date))?;
        let slots = SlotFinder::new(self.profile).find_free_slots(
            request.date,
            &tasks,
            i64::from(request.duration_minutes),
        );
        tracing::debug!(
            store = self.store.name(),
            tasks = tasks.len(),
            slots = slots.len(),
            "planning {}",
            request.activity
        );
        Ok(SlotRanker::new(self.profile, self.oracle).suggest_optimal_slot(
            &request.activity,
            request.duration_minutes,
            &slots,
            request.priority,
        ))
    }

    /// Persist the recommended slot as a planned task.
    pub fn commit(
        &self,
        request: &ActivityRequest,
        recommendation: &SlotRecommendation,
    ) -> Result<NewTask> {
        request.validate()?;
        let task = NewTask {
            activity: request.activity.trim().to_string(),
            date: recommendation.slot.start.date(),
            time: recommendation.slot.start.time(),
            duration_minutes: request.duration_minutes,
            energy: recommendation.slot.energy,
            category: request.category,
        };
        self.store.create_task(&task)?;
        Ok(task)
    }

    /// The day's tasks and its free slots of at least `min_minutes`.
    pub fn overview(&self, date: NaiveDate, min_minutes: u32) -> Result<DayOverview> {
        let tasks = self.store.fetch_tasks(Some(date))?;
        let free_slots =
            SlotFinder::new(self.profile).find_free_slots(date, &tasks, i64::from(min_minutes));
        Ok(DayOverview {
            date,
            tasks,
            free_slots,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::energy::EnergyLevel;
    use crate::error::{CoreError, StoreError};
    use crate::ranking::{DisabledOracle, HeuristicOracle, RankSource};
    use chrono::NaiveTime;
    use std::cell::RefCell;

    #[derive(Default)]
    struct MemoryStore {
        tasks: RefCell<Vec<ExistingTask>>,
        fail: bool,
    }

    impl TaskStore for MemoryStore {
        fn name(&self) -> &str {
            "memory"
        }

        fn display_name(&self) -> &str {
            "Memory"
        }

        fn test_connection(&self) -> std::result::Result<(), StoreError> {
            Ok(())
        }

        fn fetch_tasks(
            &self,
            date: Option<NaiveDate>,
        ) -> std::result::Result<Vec<ExistingTask>, StoreError> {
            if self.fail {
                return Err(StoreError::Unauthorized);
            }
            Ok(self
                .tasks
                .borrow()
                .iter()
                .filter(|t| date.is_none() || t.date == date)
                .cloned()
                .collect())
        }

        fn create_task(&self, task: &NewTask) -> std::result::Result<(), StoreError> {
            self.tasks.borrow_mut().push(task.to_existing());
            Ok(())
        }
    }

    fn monday() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 19).unwrap()
    }

    fn t(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    #[test]
    fn plan_then_commit_round_trip() {
        let profile = UserProfile::default();
        let store = MemoryStore::default();
        store
            .tasks
            .borrow_mut()
            .push(ExistingTask::new("Dinner").on(monday()).at("06:00 PM").with_duration(60));
        let oracle = DisabledOracle::default();
        let scheduler = Scheduler::new(&profile, &store, &oracle);

        let mut request = ActivityRequest::new("Exercise", monday());
        request.category = TaskCategory::Health;

        let suggestion = scheduler.plan(&request).unwrap();
        let rec = suggestion.recommendation().unwrap();
        // 07:00-08:30 and 19:00-23:00; neither starts in a high period.
        assert_eq!(rec.all_slots.len(), 2);
        assert_eq!(rec.source, RankSource::FirstAvailableFallback);
        assert_eq!(rec.slot.start.time(), t(7, 0));

        let task = scheduler.commit(&request, rec).unwrap();
        assert_eq!(task.time_string(), "07:00 AM");
        assert_eq!(task.duration_minutes, 60);
        assert_eq!(task.energy, EnergyLevel::Medium);
        assert_eq!(task.category, TaskCategory::Health);

        // The committed task now blocks the morning.
        let next = scheduler.plan(&request).unwrap();
        let next = next.recommendation().unwrap();
        assert_eq!(next.slot.start.time(), t(19, 0));
    }

    #[test]
    fn plan_uses_requested_duration_as_threshold() {
        let profile = UserProfile::default();
        let store = MemoryStore::default();
        let oracle = HeuristicOracle::new();
        let scheduler = Scheduler::new(&profile, &store, &oracle);

        let mut request = ActivityRequest::new("Long read", monday());
        request.duration_minutes = 120;
        let suggestion = scheduler.plan(&request).unwrap();
        let rec = suggestion.recommendation().unwrap();
        assert!(rec.all_slots.iter().all(|s| s.duration_minutes >= 120));
        assert_eq!(rec.all_slots.len(), 1);
    }

    #[test]
    fn full_day_yields_no_slots() {
        let profile = UserProfile::default();
        let store = MemoryStore::default();
        store.tasks.borrow_mut().extend([
            ExistingTask::new("Early").on(monday()).at("07:00 AM").with_duration(90),
            ExistingTask::new("Evening").on(monday()).at("06:00 PM").with_duration(300),
        ]);
        let oracle = HeuristicOracle::new();
        let scheduler = Scheduler::new(&profile, &store, &oracle);

        let request = ActivityRequest::new("Anything", monday());
        assert_eq!(scheduler.plan(&request).unwrap(), Suggestion::NoSlotsAvailable);
    }

    #[test]
    fn store_failure_is_surfaced() {
        let profile = UserProfile::default();
        let store = MemoryStore {
            fail: true,
            ..MemoryStore::default()
        };
        let oracle = HeuristicOracle::new();
        let scheduler = Scheduler::new(&profile, &store, &oracle);

        let err = scheduler.plan(&ActivityRequest::new("Read", monday())).unwrap_err();
        assert!(matches!(err, CoreError::Store(StoreError::Unauthorized)));
    }

    #[test]
    fn request_duration_is_bounded() {
        let profile = UserProfile::default();
        let store = MemoryStore::default();
        let oracle = HeuristicOracle::new();
        let scheduler = Scheduler::new(&profile, &store, &oracle);

        let mut request = ActivityRequest::new("Nap", monday());
        request.duration_minutes = 10;
        assert!(matches!(
            scheduler.plan(&request),
            Err(CoreError::Validation(ValidationError::OutOfRange { .. }))
        ));

        let blank = ActivityRequest::new("  ", monday());
        assert!(matches!(
            scheduler.plan(&blank),
            Err(CoreError::Validation(ValidationError::InvalidValue { .. }))
        ));
    }

    #[test]
    fn overview_lists_tasks_and_slots() {
        let profile = UserProfile::default();
        let store = MemoryStore::default();
        store.tasks.borrow_mut().extend([
            ExistingTask::new("Dinner").on(monday()).at("06:00 PM").with_duration(60),
            ExistingTask::new("Other day")
                .on(NaiveDate::from_ymd_opt(2026, 10, 20).unwrap())
                .at("07:00 AM")
                .with_duration(60),
        ]);
        let oracle = DisabledOracle::default();
        let scheduler = Scheduler::new(&profile, &store, &oracle);

        let overview = scheduler.overview(monday(), 30).unwrap();
        assert_eq!(overview.tasks.len(), 1);
        // 07:00-08:30, 17:30-18:00 and 19:00-23:00.
        assert_eq!(overview.free_slots.len(), 3);
        assert_eq!(overview.free_minutes(), 90 + 30 + 240);
    }
}
