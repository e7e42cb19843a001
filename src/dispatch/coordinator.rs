use std::sync::Arc;

use tracing::{debug, instrument};

use crate::backend::QueueBackend;
use crate::config::FlowConfig;
use crate::dispatch::state::{DispatchState, Uniqueness};
use crate::error::FlowResult;
use crate::task::TaskPayload;
use crate::types::{JobEnvelope, JobVariant, SubmissionHandle};

/// Builds one job envelope per payload and hands it to the backend
pub struct Dispatcher {
    backend: Arc<dyn QueueBackend>,
    config: Arc<FlowConfig>,
}

impl Dispatcher {
    /// Create a dispatcher over the given backend and configuration
    pub fn new(backend: Arc<dyn QueueBackend>, config: Arc<FlowConfig>) -> Self {
        Self { backend, config }
    }

    /// Build an envelope from the current state and submit it
    ///
    /// Unset fields stay `None` so the backend's own defaults apply. Backend
    /// rejections propagate unchanged; nothing is retried here.
    #[instrument(skip_all, fields(task_type = %payload.task_type))]
    pub async fn dispatch(
        &self,
        payload: TaskPayload,
        state: &DispatchState,
    ) -> FlowResult<SubmissionHandle> {
        let variant = self.select_variant(&payload, state);
        debug!(variant = variant.name(), "submitting job envelope");

        let envelope = JobEnvelope {
            variant,
            queue: state.queue().map(str::to_owned),
            connection: state.connection().map(str::to_owned),
            delay: state.delay(),
            strip_references: state.strip_references(),
            rate_limiter: state.rate_limiter().map(str::to_owned),
            failure_handler: state.failure_handler().cloned(),
            payload,
        };

        let handle = self.backend.submit(envelope).await?;
        Ok(handle)
    }

    /// Pick the job shape for this payload, first match wins
    ///
    /// Uniqueness takes precedence over encryption; a duration that is unset
    /// or non-positive resolves to the configured default.
    fn select_variant(&self, payload: &TaskPayload, state: &DispatchState) -> JobVariant {
        match state.uniqueness() {
            Uniqueness::ForDuration(secs) => {
                let unique_for = match secs {
                    Some(secs) if secs > 0 => secs,
                    _ => self.config.unique_for_or_default(),
                };
                JobVariant::UniqueFor {
                    unique_for,
                    dedup_key: payload.dedup_key(),
                }
            }
            Uniqueness::UntilProcessing => JobVariant::UniqueUntilProcessing {
                dedup_key: payload.dedup_key(),
            },
            Uniqueness::None if state.encrypted() => JobVariant::Encrypted,
            Uniqueness::None => JobVariant::Plain,
        }
    }
}
