use chrono::Utc;
use tracing::info;

use crate::error::{Result, TaskError};
use crate::model::{Status, Task, TaskList};
use crate::store::files::FileStore;

/// Task operations over an injected [`FileStore`].
///
/// Every mutating call is one locked cycle: load the full list, change it in
/// memory, write the full list back. A failed lookup returns before the save
/// step, so the file is left exactly as it was. The lock is held until the
/// cycle returns, on success or failure.
pub struct Repository {
    store: FileStore,
}

impl Repository {
    pub fn new(store: FileStore) -> Self {
        Self { store }
    }

    #[cfg(test)]
    pub(crate) fn store(&self) -> &FileStore {
        &self.store
    }

    fn mutate<T>(&self, op: impl FnOnce(&mut TaskList) -> Result<T>) -> Result<T> {
        let _lock = self.store.lock()?;
        let mut list = self.store.load()?;
        let out = op(&mut list)?;
        self.store.save(&list)?;
        Ok(out)
    }

    pub fn add(&self, description: &str) -> Result<Task> {
        let description = checked_description(description)?;
        let task = self.mutate(|list| list.create(description, Utc::now()))?;
        info!(id = task.id, "task added");
        Ok(task)
    }

    pub fn update(&self, id: u64, description: &str) -> Result<Task> {
        let description = checked_description(description)?;
        let task = self.mutate(|list| {
            let task = list.get_mut(id).ok_or_else(|| TaskError::not_found(id))?;
            task.description = description;
            task.updated_at = Utc::now();
            Ok(task.clone())
        })?;
        info!(id, "task updated");
        Ok(task)
    }

    /// Remove a task. Remaining tasks keep their ids and order, and the
    /// counter is untouched so the id is never handed out again.
    pub fn delete(&self, id: u64) -> Result<Task> {
        let task = self.mutate(|list| list.remove(id).ok_or_else(|| TaskError::not_found(id)))?;
        info!(id, "task deleted");
        Ok(task)
    }

    /// Set any status on a task. There is no transition check: a `done`
    /// task can go straight back to `todo` or `in-progress`.
    pub fn mark(&self, id: u64, status: Status) -> Result<Task> {
        let task = self.mutate(|list| {
            let task = list.get_mut(id).ok_or_else(|| TaskError::not_found(id))?;
            task.status = status;
            task.updated_at = Utc::now();
            Ok(task.clone())
        })?;
        info!(id, %status, "task marked");
        Ok(task)
    }

    pub fn get(&self, id: u64) -> Result<Task> {
        let list = self.store.load()?;
        list.get(id).cloned().ok_or_else(|| TaskError::not_found(id))
    }

    pub fn list(&self, status: Option<Status>) -> Result<Vec<Task>> {
        Ok(self.store.load()?.filtered(status))
    }
}

/// Blank descriptions are refused. Anything else is stored exactly as
/// typed, surrounding whitespace included.
fn checked_description(description: &str) -> Result<String> {
    if description.trim().is_empty() {
        return Err(TaskError::EmptyDescription);
    }
    Ok(description.to_string())
}
