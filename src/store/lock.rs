use std::fs::{File, OpenOptions};
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use fs2::FileExt;
use tracing::debug;

use crate::error::{Result, TaskError};

const WAIT_LIMIT: Duration = Duration::from_secs(1);
const POLL_INTERVAL: Duration = Duration::from_millis(10);

/// Exclusive hold on a task file's `.lock` sibling for one
/// load/mutate/save cycle. Unlocks on drop.
#[derive(Debug)]
pub struct StoreLock {
    file: File,
    path: PathBuf,
}

impl StoreLock {
    pub fn acquire(path: &Path) -> Result<Self> {
        Self::acquire_within(path, WAIT_LIMIT)
    }

    /// Poll for the lock until `limit` has elapsed, then give up with
    /// `Locked`.
    pub fn acquire_within(path: &Path, limit: Duration) -> Result<Self> {
        let file = OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .truncate(false)
            .open(path)?;

        let deadline = Instant::now() + limit;
        while file.try_lock_exclusive().is_err() {
            if Instant::now() >= deadline {
                debug!(path = %path.display(), "task file still locked, giving up");
                return Err(TaskError::Locked(path.display().to_string()));
            }
            std::thread::sleep(POLL_INTERVAL);
        }

        debug!(path = %path.display(), "task file locked");
        Ok(Self {
            file,
            path: path.to_path_buf(),
        })
    }
}

impl Drop for StoreLock {
    fn drop(&mut self) {
        if let Err(e) = FileExt::unlock(&self.file) {
            debug!(path = %self.path.display(), error = %e, "unlock failed");
        }
    }
}
