use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Opaque handle for an accepted job submission
///
/// Returned by the backend and passed through to callers unchanged; this
/// layer never inspects it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SubmissionHandle(pub String);

impl SubmissionHandle {
    /// Generate a new unique submission handle
    pub fn new() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    /// Create a submission handle from a string
    pub fn from_string(handle: String) -> Self {
        Self(handle)
    }

    /// Get the inner string value
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for SubmissionHandle {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for SubmissionHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for SubmissionHandle {
    fn from(handle: String) -> Self {
        Self(handle)
    }
}

impl From<&str> for SubmissionHandle {
    fn from(handle: &str) -> Self {
        Self(handle.to_string())
    }
}
