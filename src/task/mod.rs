pub mod payload;
pub mod registry;

pub use payload::TaskPayload;
pub use registry::TaskRegistry;

use async_trait::async_trait;
use serde::{de::DeserializeOwned, Serialize};

use crate::error::TaskError;

/// Trait for portable units of deferred work
///
/// A task carries its own captured state as serializable fields and takes no
/// arguments at execution time. The `TASK_TYPE` identifier is what lets a
/// worker process on the other side of the queue find the matching
/// implementation again, so it must be unique within an application.
#[async_trait]
pub trait Task: Send + Sync + Serialize + DeserializeOwned + 'static {
    /// Task type identifier for dispatch
    const TASK_TYPE: &'static str;

    /// Execute the task
    async fn run(&self) -> Result<(), TaskError>;

    /// Get the task type identifier for dispatch
    fn task_type(&self) -> &'static str {
        Self::TASK_TYPE
    }
}
