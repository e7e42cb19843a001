#[cfg(feature = "memory")]
pub mod memory;

use async_trait::async_trait;

use crate::error::SubmitError;
use crate::types::{JobEnvelope, SubmissionHandle};

/// Contract expected from the queue subsystem this layer hands jobs to
///
/// Durable storage, worker dispatch, retry, unique-lock bookkeeping,
/// encryption at rest, and rate-limiter accounting all live behind this
/// trait. The flow layer only builds envelopes and submits them.
#[async_trait]
pub trait QueueBackend: Send + Sync {
    /// Accept a fully configured job envelope, returning an opaque handle
    ///
    /// Rejections surface synchronously; execution failures are reported
    /// later through the envelope's failure handler, if one is attached.
    async fn submit(&self, envelope: JobEnvelope) -> Result<SubmissionHandle, SubmitError>;
}
