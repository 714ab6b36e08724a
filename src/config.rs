use std::path::PathBuf;

/// Environment variable naming the task file when `--file` is not given.
pub const TASK_FILE_ENV: &str = "TASK_CLI_FILE";

pub const DEFAULT_TASK_FILE: &str = "tasks.json";

/// Resolve the backing file: explicit flag, then `TASK_CLI_FILE`, then
/// `tasks.json` in the working directory.
pub fn resolve_task_file(flag: Option<PathBuf>) -> PathBuf {
    flag.or_else(task_file_from_env)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_TASK_FILE))
}

fn task_file_from_env() -> Option<PathBuf> {
    std::env::var_os(TASK_FILE_ENV)
        .filter(|s| !s.is_empty())
        .map(PathBuf::from)
}
