use std::fmt;
use std::sync::Arc;

use crate::error::TaskError;

/// Callback invoked by the executing subsystem when a task fails in a worker
///
/// Cloneable so one handler can be attached to every job in a batch.
#[derive(Clone)]
pub struct FailureHandler(Arc<dyn Fn(&TaskError) + Send + Sync>);

impl FailureHandler {
    /// Wrap a callback as a failure handler
    pub fn new(handler: impl Fn(&TaskError) + Send + Sync + 'static) -> Self {
        Self(Arc::new(handler))
    }

    /// Invoke the handler with the execution error
    pub fn call(&self, error: &TaskError) {
        (self.0)(error)
    }
}

impl fmt::Debug for FailureHandler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("FailureHandler")
    }
}
