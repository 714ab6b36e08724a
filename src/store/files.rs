use std::fs::{self, File};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::{Result, TaskError};
use crate::model::TaskList;
use crate::store::lock::StoreLock;

/// Single JSON document holding the whole task list.
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[cfg(test)]
    pub(crate) fn path(&self) -> &Path {
        &self.path
    }

    fn sibling(&self, suffix: &str) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_else(|| "tasks.json".into());
        name.push(suffix);
        self.path.with_file_name(name)
    }

    fn lock_path(&self) -> PathBuf {
        self.sibling(".lock")
    }

    fn ensure_parent(&self) -> Result<()> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)?;
        }
        Ok(())
    }

    /// Take the advisory lock guarding a load/mutate/save cycle.
    pub fn lock(&self) -> Result<StoreLock> {
        self.ensure_parent()?;
        StoreLock::acquire(&self.lock_path())
    }

    /// Read the task list. A missing file yields the empty default and is
    /// not created; unparsable content is reported and left untouched.
    pub fn load(&self) -> Result<TaskList> {
        let data = match fs::read_to_string(&self.path) {
            Ok(data) => data,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "no task file yet, starting empty");
                return Ok(TaskList::default());
            }
            Err(e) => return Err(e.into()),
        };

        let list: TaskList = serde_json::from_str(&data).map_err(|e| self.corrupt(e.to_string()))?;
        list.validate().map_err(|reason| self.corrupt(reason))?;

        debug!(
            path = %self.path.display(),
            tasks = list.tasks.len(),
            next_id = list.next_id,
            "loaded task list"
        );
        Ok(list)
    }

    /// Replace the file contents via temp file + rename so a crash leaves
    /// either the old or the new document, never a torn one.
    pub fn save(&self, list: &TaskList) -> Result<()> {
        self.ensure_parent()?;

        let mut json = serde_json::to_string_pretty(list)?;
        json.push('\n');

        let temp_path = self.sibling(&format!(".tmp.{}", std::process::id()));
        if let Err(e) = write_synced(&temp_path, json.as_bytes()) {
            let _ = fs::remove_file(&temp_path);
            return Err(e);
        }
        if let Err(e) = fs::rename(&temp_path, &self.path) {
            debug!(path = %self.path.display(), error = %e, "rename over task file failed");
            let _ = fs::remove_file(&temp_path);
            return Err(e.into());
        }

        debug!(
            path = %self.path.display(),
            tasks = list.tasks.len(),
            next_id = list.next_id,
            "saved task list"
        );
        Ok(())
    }

    fn corrupt(&self, reason: String) -> TaskError {
        debug!(path = %self.path.display(), %reason, "task file failed to load");
        TaskError::Corrupt {
            path: self.path.display().to_string(),
            reason,
        }
    }
}

fn write_synced(path: &Path, bytes: &[u8]) -> Result<()> {
    let mut file = File::create(path)?;
    file.write_all(bytes)?;
    file.sync_all()?;
    Ok(())
}
