use chrono::NaiveDate;

use crate::error::StoreError;
use crate::task::{ExistingTask, NewTask};

/// Every task store implements this trait.
///
/// Calls are blocking and single-attempt. A failure is terminal for the
/// current scheduling decision and is reported to the caller.
pub trait TaskStore {
    /// Unique identifier (e.g. "notion", "file").
    fn name(&self) -> &str;

    /// Human-readable display name.
    fn display_name(&self) -> &str;

    /// Confirm the store is reachable with the configured credentials.
    fn test_connection(&self) -> Result<(), StoreError>;

    /// Tasks on `date`, or every task when `date` is `None`.
    fn fetch_tasks(&self, date: Option<NaiveDate>) -> Result<Vec<ExistingTask>, StoreError>;

    /// Append a task with status "Planned".
    fn create_task(&self, task: &NewTask) -> Result<(), StoreError>;
}

impl<T: TaskStore + ?Sized> TaskStore for Box<T> {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn display_name(&self) -> &str {
        (**self).display_name()
    }

    fn test_connection(&self) -> Result<(), StoreError> {
        (**self).test_connection()
    }

    fn fetch_tasks(&self, date: Option<NaiveDate>) -> Result<Vec<ExistingTask>, StoreError> {
        (**self).fetch_tasks(date)
    }

    fn create_task(&self, task: &NewTask) -> Result<(), StoreError> {
        (**self).create_task(task)
    }
}
