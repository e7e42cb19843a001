use crate::config::FlowConfig;
use crate::types::{Delay, FailureHandler};

/// Deduplication behavior for pending jobs
///
/// A single field holds the active mode, so setting one mode replaces any
/// other: the last setter applied wins.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Uniqueness {
    /// No deduplication
    #[default]
    None,

    /// Deduplicate for a fixed number of seconds; `None` or a non-positive
    /// value resolves to the configured default at dispatch time
    ForDuration(Option<i64>),

    /// Deduplicate until a worker begins processing
    UntilProcessing,
}

/// Mutable configuration accumulated between dispatches
///
/// Queue and connection defaults come from [`FlowConfig`] at construction
/// and again on every reset; everything else starts disabled. Values are
/// not validated here: a bad queue name or negative delay only surfaces if
/// the backend rejects it.
#[derive(Debug, Clone, Default)]
pub struct DispatchState {
    queue: Option<String>,
    connection: Option<String>,
    delay: Option<Delay>,
    strip_references: bool,
    uniqueness: Uniqueness,
    encrypted: bool,
    rate_limiter: Option<String>,
    failure_handler: Option<FailureHandler>,
}

impl DispatchState {
    /// Create a state seeded with the configured defaults
    pub fn new(config: &FlowConfig) -> Self {
        Self {
            queue: config.queue.clone(),
            connection: config.connection.clone(),
            ..Self::default()
        }
    }

    /// Restore configured defaults and clear every other field
    pub fn reset(&mut self, config: &FlowConfig) {
        *self = Self::new(config);
    }

    pub fn queue(&self) -> Option<&str> {
        self.queue.as_deref()
    }

    pub fn set_queue(&mut self, queue: Option<String>) {
        self.queue = queue;
    }

    pub fn connection(&self) -> Option<&str> {
        self.connection.as_deref()
    }

    pub fn set_connection(&mut self, connection: Option<String>) {
        self.connection = connection;
    }

    pub fn delay(&self) -> Option<Delay> {
        self.delay
    }

    pub fn set_delay(&mut self, delay: Option<Delay>) {
        self.delay = delay;
    }

    pub fn strip_references(&self) -> bool {
        self.strip_references
    }

    pub fn set_strip_references(&mut self, strip: bool) {
        self.strip_references = strip;
    }

    pub fn uniqueness(&self) -> Uniqueness {
        self.uniqueness
    }

    pub fn set_uniqueness(&mut self, uniqueness: Uniqueness) {
        self.uniqueness = uniqueness;
    }

    pub fn encrypted(&self) -> bool {
        self.encrypted
    }

    pub fn set_encrypted(&mut self, encrypted: bool) {
        self.encrypted = encrypted;
    }

    pub fn rate_limiter(&self) -> Option<&str> {
        self.rate_limiter.as_deref()
    }

    pub fn set_rate_limiter(&mut self, name: Option<String>) {
        self.rate_limiter = name;
    }

    pub fn failure_handler(&self) -> Option<&FailureHandler> {
        self.failure_handler.as_ref()
    }

    pub fn set_failure_handler(&mut self, handler: Option<FailureHandler>) {
        self.failure_handler = handler;
    }
}
