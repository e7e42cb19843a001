use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;

use crate::error::{FlowError, FlowResult, TaskError};
use crate::task::{Task, TaskPayload};

/// Type-erased task runner for runtime dispatch
#[async_trait]
trait TaskRunner: Send + Sync {
    /// Decode the payload and run the task
    async fn run(&self, payload: &TaskPayload) -> Result<(), TaskError>;

    /// Get the task type this runner handles
    fn task_type(&self) -> &'static str;
}

struct TypedRunner<T: Task> {
    _phantom: std::marker::PhantomData<T>,
}

impl<T: Task> TypedRunner<T> {
    fn new() -> Self {
        Self {
            _phantom: std::marker::PhantomData,
        }
    }
}

#[async_trait]
impl<T: Task> TaskRunner for TypedRunner<T> {
    async fn run(&self, payload: &TaskPayload) -> Result<(), TaskError> {
        let task: T = serde_json::from_slice(&payload.payload_bytes)
            .map_err(|e| TaskError::Permanent(format!("failed to decode task: {}", e)))?;

        task.run().await
    }

    fn task_type(&self) -> &'static str {
        T::TASK_TYPE
    }
}

/// Registry mapping task type identifiers to their runners
///
/// Worker-side processes register every task type they can execute; the
/// in-memory backend uses the same registry to run submitted payloads in
/// tests and development.
pub struct TaskRegistry {
    runners: HashMap<String, Arc<dyn TaskRunner>>,
}

impl TaskRegistry {
    /// Create an empty task registry
    pub fn new() -> Self {
        Self {
            runners: HashMap::new(),
        }
    }

    /// Register a task type
    pub fn register<T: Task>(&mut self) -> FlowResult<()> {
        let runner = Arc::new(TypedRunner::<T>::new());
        let task_type = runner.task_type().to_string();

        if self.runners.contains_key(&task_type) {
            return Err(FlowError::DuplicateTaskType(task_type));
        }

        self.runners.insert(task_type, runner);
        Ok(())
    }

    /// Decode and run a payload
    pub async fn run(&self, payload: &TaskPayload) -> Result<(), TaskError> {
        let runner = self.runners.get(&payload.task_type).ok_or_else(|| {
            TaskError::Permanent(format!("unknown task type: {}", payload.task_type))
        })?;

        runner.run(payload).await
    }

    /// Check if a task type is registered
    pub fn is_registered(&self, task_type: &str) -> bool {
        self.runners.contains_key(task_type)
    }

    /// Get all registered task types
    pub fn registered_types(&self) -> Vec<String> {
        self.runners.keys().cloned().collect()
    }
}

impl Default for TaskRegistry {
    fn default() -> Self {
        Self::new()
    }
}
