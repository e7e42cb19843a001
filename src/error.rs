use thiserror::Error;

/// Result type for flow operations
pub type FlowResult<T> = Result<T, FlowError>;

/// Errors surfaced to callers of the flow builder
#[derive(Error, Debug)]
pub enum FlowError {
    #[error("at least one task payload is required")]
    NoTasks,

    #[error("no tasks are pending; call add() before dispatch()")]
    NothingPending,

    #[error("task type '{0}' is already registered")]
    DuplicateTaskType(String),

    #[error("failed to encode task '{task_type}': {message}")]
    Serialization { task_type: String, message: String },

    #[error(transparent)]
    Submission(#[from] SubmitError),
}

/// Rejections produced by the queue backend at submission time
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SubmitError {
    #[error("unknown rate limiter '{0}'")]
    UnknownRateLimiter(String),

    #[error("connection '{0}' is unavailable")]
    ConnectionUnavailable(String),

    #[error("backend rejected the job: {0}")]
    Rejected(String),
}

/// Task execution outcome - determines retry behavior in the executing subsystem
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TaskError {
    /// Retryable error - the executing subsystem may schedule a retry
    #[error("retryable task failure: {0}")]
    Retryable(String),

    /// Permanent error - fail immediately, no retry
    #[error("permanent task failure: {0}")]
    Permanent(String),
}

impl TaskError {
    /// Create a retryable error
    pub fn retryable(msg: impl Into<String>) -> Self {
        Self::Retryable(msg.into())
    }

    /// Create a permanent error
    pub fn permanent(msg: impl Into<String>) -> Self {
        Self::Permanent(msg.into())
    }

    /// Check if this error is retryable
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Retryable(_))
    }

    /// Get the error message
    pub fn message(&self) -> &str {
        match self {
            Self::Retryable(msg) | Self::Permanent(msg) => msg,
        }
    }
}
