use thiserror::Error;

#[derive(Debug, Error)]
pub enum TaskError {
    #[error("description cannot be empty")]
    EmptyDescription,

    #[error("{0}")]
    InvalidArguments(String),

    #[error("task {0} not found")]
    TaskNotFound(String),

    #[error("no task ids left: nextId {0} cannot advance")]
    IdsExhausted(u64),

    #[error("task file '{path}' is corrupt: {reason}")]
    Corrupt { path: String, reason: String },

    #[error("locked by another process: {0}")]
    Locked(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

impl TaskError {
    pub fn code(&self) -> &'static str {
        match self {
            Self::EmptyDescription => "empty_description",
            Self::InvalidArguments(_) => "invalid_arguments",
            Self::TaskNotFound(_) => "task_not_found",
            Self::IdsExhausted(_) => "ids_exhausted",
            Self::Corrupt { .. } => "corrupt_store",
            Self::Locked(_) => "locked",
            Self::Io(_) => "io_error",
            Self::Json(_) => "json_error",
        }
    }

    pub(crate) fn not_found(id: u64) -> Self {
        Self::TaskNotFound(id.to_string())
    }
}

pub type Result<T> = std::result::Result<T, TaskError>;
