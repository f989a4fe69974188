//! Local JSON file as a task store.
//!
//! The file holds a JSON array of task records. A missing file is an empty
//! store and is created on the first write. Records are read leniently: a
//! missing or mistyped field gets the same default the Notion store uses, so
//! one hand-edited record never hides the rest.

use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use serde_json::Value;

use super::traits::TaskStore;
use crate::clock;
use crate::error::StoreError;
use crate::task::{ExistingTask, NewTask, PLANNED_STATUS};

#[derive(Debug, Clone)]
pub struct JsonFileTaskStore {
    path: PathBuf,
}

impl JsonFileTaskStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load_all(&self) -> Result<Vec<ExistingTask>, StoreError> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }
        let content = std::fs::read_to_string(&self.path)?;
        if content.trim().is_empty() {
            return Ok(Vec::new());
        }
        let malformed = |message: String| {
            StoreError::Malformed(format!("{}: {message}", self.path.display()))
        };
        let value: Value = serde_json::from_str(&content).map_err(|e| malformed(e.to_string()))?;
        let Value::Array(records) = value else {
            return Err(malformed("expected a JSON array of tasks".into()));
        };

        Ok(records
            .iter()
            .filter_map(|record| {
                let task = task_from_record(record);
                if task.is_none() {
                    tracing::debug!(path = %self.path.display(), "skipping non-object task record");
                }
                task
            })
            .collect())
    }

    fn save_all(&self, tasks: &[ExistingTask]) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        let content = serde_json::to_string_pretty(tasks)
            .map_err(|e| StoreError::Malformed(e.to_string()))?;
        std::fs::write(&self.path, content)?;
        Ok(())
    }
}

impl TaskStore for JsonFileTaskStore {
    fn name(&self) -> &str {
        "file"
    }

    fn display_name(&self) -> &str {
        "JSON file"
    }

    fn test_connection(&self) -> Result<(), StoreError> {
        self.load_all().map(|_| ())
    }

    fn fetch_tasks(&self, date: Option<NaiveDate>) -> Result<Vec<ExistingTask>, StoreError> {
        let tasks = self.load_all()?;
        Ok(match date {
            Some(date) => tasks.into_iter().filter(|t| t.date == Some(date)).collect(),
            None => tasks,
        })
    }

    fn create_task(&self, task: &NewTask) -> Result<(), StoreError> {
        let mut tasks = self.load_all()?;
        tasks.push(task.to_existing());
        self.save_all(&tasks)?;
        tracing::info!(path = %self.path.display(), activity = %task.activity, "task appended");
        Ok(())
    }
}

fn task_from_record(record: &Value) -> Option<ExistingTask> {
    let record = record.as_object()?;
    let text = |key: &str| {
        record
            .get(key)
            .and_then(Value::as_str)
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
    };

    let duration_minutes = record
        .get("duration_minutes")
        .and_then(Value::as_f64)
        .filter(|n| n.is_finite() && *n >= 0.0)
        .map(|n| n.round() as u32)
        .unwrap_or(0);
    let date = text("date").and_then(|s| clock::parse_date(s.get(..10).unwrap_or(&s)));

    Some(ExistingTask {
        activity: text("activity").unwrap_or_else(|| "Untitled".into()),
        date,
        time: text("time"),
        duration_minutes,
        energy: text("energy").unwrap_or_else(|| "Medium".into()),
        status: text("status").unwrap_or_else(|| PLANNED_STATUS.into()),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::energy::EnergyLevel;
    use crate::task::TaskCategory;
    use chrono::NaiveTime;
    use tempfile::TempDir;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, d).unwrap()
    }

    #[test]
    fn missing_file_is_empty_store() {
        let dir = TempDir::new().unwrap();
        let store = JsonFileTaskStore::new(dir.path().join("tasks.json"));
        assert!(store.test_connection().is_ok());
        assert!(store.fetch_tasks(None).unwrap().is_empty());
    }

    #[test]
    fn create_then_fetch_by_date() {
        let dir = TempDir::new().unwrap();
        let store = JsonFileTaskStore::new(dir.path().join("nested").join("tasks.json"));

        for (d, name) in [(19, "Exercise"), (20, "Groceries")] {
            store
                .create_task(&NewTask {
                    activity: name.into(),
                    date: day(d),
                    time: NaiveTime::from_hms_opt(17, 0, 0).unwrap(),
                    duration_minutes: 60,
                    energy: EnergyLevel::Medium,
                    category: TaskCategory::Personal,
                })
                .unwrap();
        }

        let all = store.fetch_tasks(None).unwrap();
        assert_eq!(all.len(), 2);

        let monday = store.fetch_tasks(Some(day(19))).unwrap();
        assert_eq!(monday.len(), 1);
        assert_eq!(monday[0].activity, "Exercise");
        assert_eq!(monday[0].time.as_deref(), Some("05:00 PM"));
        assert_eq!(monday[0].status, "Planned");
    }

    #[test]
    fn reads_hand_written_records() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("tasks.json");
        std::fs::write(
            &path,
            r#"[{"activity": "Lunch", "date": "2026-10-19", "time": "12:00 PM", "duration_minutes": 60}]"#,
        )
        .unwrap();

        let tasks = JsonFileTaskStore::new(&path).fetch_tasks(Some(day(19))).unwrap();
        assert_eq!(tasks.len(), 1);
        assert_eq!(tasks[0].energy, "Medium");
        assert_eq!(tasks[0].start_time(), NaiveTime::from_hms_opt(12, 0, 0));
    }

    #[test]
    fn corrupt_file_is_malformed() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("tasks.json");
        std::fs::write(&path, "{not json").unwrap();
        assert!(matches!(
            JsonFileTaskStore::new(&path).fetch_tasks(None),
            Err(StoreError::Malformed(_))
        ));
    }

    #[test]
    fn loose_records_get_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("tasks.json");
        std::fs::write(
            &path,
            r#"[
              {"activity": "Lunch", "date": "2026-10-19", "time": "12:00 PM", "duration_minutes": 60},
              {"date": "2026-10-19", "time": "07:00 PM", "duration_minutes": 30.0},
              {"activity": "  ", "date": "2026-10-20T09:00:00Z", "duration_minutes": 44.6, "energy": null},
              {"activity": "Negative", "duration_minutes": -5},
              "not a record"
            ]"#,
        )
        .unwrap();
        let store = JsonFileTaskStore::new(&path);

        let all = store.fetch_tasks(None).unwrap();
        assert_eq!(all.len(), 4);
        assert_eq!(all[1].activity, "Untitled");
        assert_eq!(all[1].duration_minutes, 30);
        assert_eq!(all[1].start_time(), NaiveTime::from_hms_opt(19, 0, 0));
        assert_eq!(all[2].activity, "Untitled");
        assert_eq!(all[2].date, Some(day(20)));
        assert_eq!(all[2].duration_minutes, 45);
        assert_eq!(all[2].energy, "Medium");
        assert_eq!(all[2].status, "Planned");
        assert_eq!(all[3].duration_minutes, 0);
        assert_eq!(all[3].date, None);

        let monday = store.fetch_tasks(Some(day(19))).unwrap();
        assert_eq!(monday.len(), 2);
        assert_eq!(monday[0].activity, "Lunch");
    }

    #[test]
    fn appending_keeps_loose_records() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("tasks.json");
        std::fs::write(&path, r#"[{"date": "2026-10-19", "duration_minutes": 30.0}]"#).unwrap();
        let store = JsonFileTaskStore::new(&path);

        store
            .create_task(&NewTask {
                activity: "Walk".into(),
                date: day(19),
                time: NaiveTime::from_hms_opt(8, 0, 0).unwrap(),
                duration_minutes: 30,
                energy: EnergyLevel::High,
                category: TaskCategory::Health,
            })
            .unwrap();

        let tasks = store.fetch_tasks(Some(day(19))).unwrap();
        assert_eq!(tasks.len(), 2);
        assert_eq!(tasks[0].activity, "Untitled");
        assert_eq!(tasks[1].activity, "Walk");
    }

    #[test]
    fn non_array_file_is_malformed() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("tasks.json");
        std::fs::write(&path, r#"{"activity": "Lunch"}"#).unwrap();
        assert!(matches!(
            JsonFileTaskStore::new(&path).fetch_tasks(None),
            Err(StoreError::Malformed(_))
        ));
    }
}
