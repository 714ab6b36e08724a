use std::collections::HashSet;

use chrono::{DateTime, Utc};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::error::{Result, TaskError};

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "kebab-case")]
#[clap(rename_all = "kebab-case")]
pub enum Status {
    #[default]
    Todo,
    InProgress,
    Done,
}

impl Status {
    /// Checkbox-style marker used by the pretty list output.
    pub fn glyph(self) -> &'static str {
        match self {
            Self::Todo => "[ ]",
            Self::InProgress => "[~]",
            Self::Done => "[✓]",
        }
    }
}

impl std::fmt::Display for Status {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Todo => write!(f, "todo"),
            Self::InProgress => write!(f, "in-progress"),
            Self::Done => write!(f, "done"),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: u64,
    pub description: String,
    pub status: Status,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// The persisted aggregate: every task plus the next id to hand out.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TaskList {
    pub tasks: Vec<Task>,
    pub next_id: u64,
}

impl Default for TaskList {
    fn default() -> Self {
        Self {
            tasks: Vec::new(),
            next_id: 1,
        }
    }
}

impl TaskList {
    /// Append a new `todo` task with `id = next_id` and bump the counter.
    /// Fails without touching the list once the counter cannot advance.
    pub fn create(&mut self, description: String, now: DateTime<Utc>) -> Result<Task> {
        let next_id = self
            .next_id
            .checked_add(1)
            .ok_or(TaskError::IdsExhausted(self.next_id))?;
        let task = Task {
            id: self.next_id,
            description,
            status: Status::Todo,
            created_at: now,
            updated_at: now,
        };
        self.tasks.push(task.clone());
        self.next_id = next_id;
        Ok(task)
    }

    pub fn get(&self, id: u64) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }

    pub fn get_mut(&mut self, id: u64) -> Option<&mut Task> {
        self.tasks.iter_mut().find(|t| t.id == id)
    }

    /// Remove a task, keeping the relative order of the rest.
    pub fn remove(&mut self, id: u64) -> Option<Task> {
        let pos = self.tasks.iter().position(|t| t.id == id)?;
        Some(self.tasks.remove(pos))
    }

    pub fn filtered(&self, status: Option<Status>) -> Vec<Task> {
        self.tasks
            .iter()
            .filter(|t| status.is_none_or(|s| t.status == s))
            .cloned()
            .collect()
    }

    /// Ids must be positive, unique, and strictly below `next_id`.
    pub fn validate(&self) -> std::result::Result<(), String> {
        if self.next_id == 0 {
            return Err("nextId must be at least 1".into());
        }
        let mut seen = HashSet::new();
        for task in &self.tasks {
            if task.id == 0 {
                return Err("task id 0 is not allowed".into());
            }
            if task.id >= self.next_id {
                return Err(format!(
                    "task id {} is not below nextId {}",
                    task.id, self.next_id
                ));
            }
            if !seen.insert(task.id) {
                return Err(format!("duplicate task id {}", task.id));
            }
        }
        Ok(())
    }
}
