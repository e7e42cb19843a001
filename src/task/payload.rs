use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::error::{FlowError, FlowResult};
use crate::task::Task;

/// Type-erased task payload - immutable submission data
///
/// Pairs the registered task type identifier with the task's serialized
/// captured state, which is all a worker needs to reconstruct and run it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskPayload {
    /// Task type identifier for dispatch
    pub task_type: String,

    /// Serialized task state (opaque bytes)
    pub payload_bytes: Vec<u8>,

    /// Codec used for serialization
    pub codec: String,
}

impl TaskPayload {
    /// Encode a task into a payload
    pub fn encode<T: Task>(task: &T) -> FlowResult<Self> {
        let payload_bytes = serde_json::to_vec(task).map_err(|e| FlowError::Serialization {
            task_type: T::TASK_TYPE.to_string(),
            message: e.to_string(),
        })?;

        Ok(Self {
            task_type: T::TASK_TYPE.to_string(),
            payload_bytes,
            codec: "json".to_string(),
        })
    }

    /// Deterministic content hash of this payload, usable as a dedup key
    ///
    /// Two payloads hash identically exactly when they carry the same task
    /// type and the same serialized state.
    pub fn dedup_key(&self) -> String {
        let mut hasher = Sha256::new();
        hasher.update(self.task_type.as_bytes());
        hasher.update([0u8]);
        hasher.update(&self.payload_bytes);
        hex::encode(hasher.finalize())
    }

    /// Get the payload size in bytes
    pub fn payload_size(&self) -> usize {
        self.payload_bytes.len()
    }
}
