use std::fmt;
use std::sync::Arc;

use tracing::warn;

use crate::backend::QueueBackend;
use crate::config::FlowConfig;
use crate::dispatch::{DispatchState, Dispatcher, Uniqueness};
use crate::error::{FlowError, FlowResult, TaskError};
use crate::task::{Task, TaskPayload};
use crate::types::{Delay, FailureHandler, SubmissionHandle};

/// Handles returned by one dispatch call
///
/// A single submission yields its handle directly; a batch yields the
/// handles in submission order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Dispatched {
    One(SubmissionHandle),
    Many(Vec<SubmissionHandle>),
}

impl Dispatched {
    /// Number of submitted jobs
    pub fn len(&self) -> usize {
        match self {
            Self::One(_) => 1,
            Self::Many(handles) => handles.len(),
        }
    }

    /// Check if no jobs were submitted (never true for a successful dispatch)
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Get the handle of a single submission
    pub fn as_one(&self) -> Option<&SubmissionHandle> {
        match self {
            Self::One(handle) => Some(handle),
            Self::Many(_) => None,
        }
    }

    /// Consume into a vector of handles, in submission order
    pub fn into_vec(self) -> Vec<SubmissionHandle> {
        match self {
            Self::One(handle) => vec![handle],
            Self::Many(handles) => handles,
        }
    }
}

/// Fluent builder that accumulates task payloads and configuration, then
/// fans them out to the backend
///
/// One builder owns one [`DispatchState`] and one pending list; the same
/// configuration applies to every payload in a batch. After `dispatch`,
/// both are reset to fresh defaults and the builder can be reused.
///
/// Not intended for concurrent mutation: callers sharing a builder across
/// threads must add their own exclusion.
pub struct QueueFlow {
    dispatcher: Dispatcher,
    config: Arc<FlowConfig>,
    state: DispatchState,
    pending: Vec<TaskPayload>,
    auto_dispatch_enabled: bool,
}

impl QueueFlow {
    /// Create a builder over the given backend and configuration
    pub fn new(backend: Arc<dyn QueueBackend>, config: Arc<FlowConfig>) -> Self {
        Self {
            dispatcher: Dispatcher::new(backend, config.clone()),
            state: DispatchState::new(&config),
            pending: Vec::new(),
            auto_dispatch_enabled: config.auto_dispatch,
            config,
        }
    }

    /// Build the builder, configure it inside `f`, and dispatch anything
    /// pending when `f` returns
    ///
    /// This is the deterministic replacement for dispatch-on-drop: work added
    /// inside the scope is submitted exactly once on exit, and an empty scope
    /// submits nothing.
    pub async fn scoped<F>(
        backend: Arc<dyn QueueBackend>,
        config: Arc<FlowConfig>,
        f: F,
    ) -> FlowResult<Option<Dispatched>>
    where
        F: FnOnce(&mut QueueFlow) -> FlowResult<()>,
    {
        let mut flow = QueueFlow::new(backend, config);
        f(&mut flow)?;

        if flow.pending.is_empty() {
            return Ok(None);
        }
        flow.dispatch().await.map(Some)
    }

    /// Encode a task and append it to the pending list
    pub fn add<T: Task>(&mut self, task: &T) -> FlowResult<&mut Self> {
        let payload = TaskPayload::encode(task)?;
        Ok(self.add_payload(payload))
    }

    /// Append one pre-encoded payload to the pending list
    pub fn add_payload(&mut self, payload: TaskPayload) -> &mut Self {
        self.pending.push(payload);
        self
    }

    /// Append a sequence of pre-encoded payloads to the pending list
    ///
    /// Fails when the sequence contributes nothing.
    pub fn add_payloads<I>(&mut self, payloads: I) -> FlowResult<&mut Self>
    where
        I: IntoIterator<Item = TaskPayload>,
    {
        let before = self.pending.len();
        self.pending.extend(payloads);

        if self.pending.len() == before {
            return Err(FlowError::NoTasks);
        }
        Ok(self)
    }

    /// Enable or disable the abandoned-work warning on drop
    pub fn auto_dispatch(&mut self, enabled: bool) -> &mut Self {
        self.auto_dispatch_enabled = enabled;
        self
    }

    /// Set the queue name for the batch
    pub fn on_queue(&mut self, queue: impl Into<String>) -> &mut Self {
        self.state.set_queue(Some(queue.into()));
        self
    }

    /// Set the connection name for the batch
    pub fn on_connection(&mut self, connection: impl Into<String>) -> &mut Self {
        self.state.set_connection(Some(connection.into()));
        self
    }

    /// Delay processing by a duration or until an instant
    pub fn delay(&mut self, delay: impl Into<Delay>) -> &mut Self {
        self.state.set_delay(Some(delay.into()));
        self
    }

    /// Strip attached object-graph references from payloads before they are
    /// persisted
    pub fn without_references(&mut self) -> &mut Self {
        self.state.set_strip_references(true);
        self
    }

    /// Deduplicate jobs for the configured default duration
    pub fn should_be_unique(&mut self) -> &mut Self {
        self.state.set_uniqueness(Uniqueness::ForDuration(None));
        self
    }

    /// Deduplicate jobs for the given number of seconds
    pub fn should_be_unique_for(&mut self, secs: i64) -> &mut Self {
        self.state.set_uniqueness(Uniqueness::ForDuration(Some(secs)));
        self
    }

    /// Deduplicate jobs until a worker begins processing them
    pub fn should_be_unique_until_processing(&mut self) -> &mut Self {
        self.state.set_uniqueness(Uniqueness::UntilProcessing);
        self
    }

    /// Ask the backend to encrypt payloads at rest
    pub fn should_be_encrypted(&mut self) -> &mut Self {
        self.state.set_encrypted(true);
        self
    }

    /// Apply the named rate limiting policy to the batch
    pub fn rate_limited(&mut self, name: impl Into<String>) -> &mut Self {
        self.state.set_rate_limiter(Some(name.into()));
        self
    }

    /// Attach a callback for execution failures inside a worker
    pub fn on_failure(
        &mut self,
        handler: impl Fn(&TaskError) + Send + Sync + 'static,
    ) -> &mut Self {
        self.state.set_failure_handler(Some(FailureHandler::new(handler)));
        self
    }

    /// Number of payloads waiting to be dispatched
    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }

    /// The configuration currently accumulated for the next dispatch
    pub fn state(&self) -> &DispatchState {
        &self.state
    }

    /// Submit every pending payload in insertion order under the current
    /// configuration
    ///
    /// The pending list and configuration are reset afterwards whether the
    /// batch succeeded or not. The first backend rejection aborts the rest
    /// of the batch and propagates unchanged; jobs already accepted stay
    /// accepted.
    pub async fn dispatch(&mut self) -> FlowResult<Dispatched> {
        if self.pending.is_empty() {
            return Err(FlowError::NothingPending);
        }

        let payloads = std::mem::take(&mut self.pending);
        let mut handles = Vec::with_capacity(payloads.len());
        let mut failure = None;

        for payload in payloads {
            match self.dispatcher.dispatch(payload, &self.state).await {
                Ok(handle) => handles.push(handle),
                Err(err) => {
                    failure = Some(err);
                    break;
                }
            }
        }

        self.reset();

        if let Some(err) = failure {
            return Err(err);
        }

        if handles.len() == 1 {
            Ok(Dispatched::One(handles.swap_remove(0)))
        } else {
            Ok(Dispatched::Many(handles))
        }
    }

    fn reset(&mut self) {
        self.pending.clear();
        self.state.reset(&self.config);
        self.auto_dispatch_enabled = self.config.auto_dispatch;
    }
}

impl fmt::Debug for QueueFlow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("QueueFlow")
            .field("pending", &self.pending.len())
            .field("state", &self.state)
            .field("auto_dispatch", &self.auto_dispatch_enabled)
            .finish_non_exhaustive()
    }
}

impl Drop for QueueFlow {
    fn drop(&mut self) {
        // No submission happens here: drop timing is not a dispatch trigger.
        if self.auto_dispatch_enabled && !self.pending.is_empty() {
            warn!(
                pending = self.pending.len(),
                "queue flow dropped with pending tasks; use dispatch() or scoped()"
            );
        }
    }
}
