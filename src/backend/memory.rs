use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use parking_lot::RwLock;
use tracing::debug;

use crate::backend::QueueBackend;
use crate::config::RateLimit;
use crate::error::{SubmitError, TaskError};
use crate::task::TaskRegistry;
use crate::types::{JobEnvelope, JobVariant, SubmissionHandle};

/// Lifecycle of a job held by the in-memory backend
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmittedState {
    /// Accepted and waiting to be run
    Pending,

    /// Ran to completion
    Completed,

    /// Ran and failed
    Failed { error: String },
}

impl SubmittedState {
    /// Check if the job reached a terminal state
    pub fn is_terminal(&self) -> bool {
        !matches!(self, Self::Pending)
    }
}

/// One accepted submission, in acceptance order
#[derive(Debug, Clone)]
pub struct SubmittedJob {
    /// Handle returned to the submitter
    pub handle: SubmissionHandle,

    /// The envelope as received
    pub envelope: JobEnvelope,

    /// When the submission was accepted
    pub submitted_at: DateTime<Utc>,

    /// When the job becomes eligible to run
    pub run_at: DateTime<Utc>,

    /// Current lifecycle state
    pub state: SubmittedState,
}

struct DedupEntry {
    handle: SubmissionHandle,
    expires_at: Option<DateTime<Utc>>,
}

/// In-memory backend for testing and development
///
/// Records envelopes in submission order and plays the role of the external
/// queue subsystem: it honors dedup keys, validates rate limiter names when
/// given a table to check against, and can run pending payloads through a
/// [`TaskRegistry`] so failure handlers are exercised end to end.
pub struct MemoryBackend {
    jobs: RwLock<Vec<SubmittedJob>>,
    dedup: RwLock<HashMap<String, DedupEntry>>,
    rate_limiters: Option<HashMap<String, RateLimit>>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self {
            jobs: RwLock::new(Vec::new()),
            dedup: RwLock::new(HashMap::new()),
            rate_limiters: None,
        }
    }

    /// Create a backend that rejects rate limiter names missing from `table`
    pub fn with_rate_limiters(table: HashMap<String, RateLimit>) -> Self {
        Self {
            jobs: RwLock::new(Vec::new()),
            dedup: RwLock::new(HashMap::new()),
            rate_limiters: Some(table),
        }
    }

    /// Snapshot of every accepted submission, in acceptance order
    pub fn submitted(&self) -> Vec<SubmittedJob> {
        self.jobs.read().clone()
    }

    /// Number of accepted submissions
    pub fn len(&self) -> usize {
        self.jobs.read().len()
    }

    /// Check if nothing has been submitted
    pub fn is_empty(&self) -> bool {
        self.jobs.read().is_empty()
    }

    /// Look up one submission by handle
    pub fn get(&self, handle: &SubmissionHandle) -> Option<SubmittedJob> {
        self.jobs.read().iter().find(|j| j.handle == *handle).cloned()
    }

    /// Run every pending payload in submission order
    ///
    /// Marks each job completed or failed, invokes the attached failure
    /// handler on failure, and returns per-job outcomes. Until-processing
    /// dedup keys are released the moment their job starts.
    pub async fn run_pending(
        &self,
        registry: &TaskRegistry,
    ) -> Vec<(SubmissionHandle, Result<(), TaskError>)> {
        let pending: Vec<SubmittedJob> = {
            let jobs = self.jobs.read();
            jobs.iter()
                .filter(|j| j.state == SubmittedState::Pending)
                .cloned()
                .collect()
        };

        let mut outcomes = Vec::with_capacity(pending.len());
        for job in pending {
            if matches!(job.envelope.variant, JobVariant::UniqueUntilProcessing { .. }) {
                self.release_dedup(&job.handle);
            }

            let result = registry.run(&job.envelope.payload).await;
            match &result {
                Ok(()) => self.mark(&job.handle, SubmittedState::Completed),
                Err(err) => {
                    if let Some(handler) = &job.envelope.failure_handler {
                        handler.call(err);
                    }
                    self.mark(
                        &job.handle,
                        SubmittedState::Failed {
                            error: err.to_string(),
                        },
                    );
                }
            }
            outcomes.push((job.handle, result));
        }

        outcomes
    }

    fn mark(&self, handle: &SubmissionHandle, state: SubmittedState) {
        let mut jobs = self.jobs.write();
        if let Some(job) = jobs.iter_mut().find(|j| j.handle == *handle) {
            job.state = state;
        }
    }

    fn release_dedup(&self, handle: &SubmissionHandle) {
        self.dedup.write().retain(|_, entry| entry.handle != *handle);
    }

    /// Find a still-live dedup reservation for `key`
    fn live_dedup_handle(&self, key: &str, now: DateTime<Utc>) -> Option<SubmissionHandle> {
        let dedup = self.dedup.read();
        let entry = dedup.get(key)?;

        if let Some(expires_at) = entry.expires_at {
            if now >= expires_at {
                return None;
            }
        }

        // A terminal job no longer blocks new submissions with its key
        let jobs = self.jobs.read();
        let job = jobs.iter().find(|j| j.handle == entry.handle)?;
        if job.state.is_terminal() {
            return None;
        }

        Some(entry.handle.clone())
    }
}

#[async_trait]
impl QueueBackend for MemoryBackend {
    async fn submit(&self, envelope: JobEnvelope) -> Result<SubmissionHandle, SubmitError> {
        if let (Some(table), Some(name)) = (&self.rate_limiters, &envelope.rate_limiter) {
            if !table.contains_key(name) {
                return Err(SubmitError::UnknownRateLimiter(name.clone()));
            }
        }

        let now = Utc::now();

        if let Some(key) = envelope.variant.dedup_key() {
            if let Some(existing) = self.live_dedup_handle(key, now) {
                debug!(handle = %existing, "dedup key still reserved, returning existing handle");
                return Ok(existing);
            }
        }

        let handle = SubmissionHandle::new();
        let run_at = envelope
            .delay
            .map(|delay| delay.run_at(now))
            .unwrap_or(now);

        match &envelope.variant {
            JobVariant::UniqueFor {
                unique_for,
                dedup_key,
            } => {
                self.dedup.write().insert(
                    dedup_key.clone(),
                    DedupEntry {
                        handle: handle.clone(),
                        expires_at: Some(now + Duration::seconds(*unique_for)),
                    },
                );
            }
            JobVariant::UniqueUntilProcessing { dedup_key } => {
                self.dedup.write().insert(
                    dedup_key.clone(),
                    DedupEntry {
                        handle: handle.clone(),
                        expires_at: None,
                    },
                );
            }
            _ => {}
        }

        debug!(
            handle = %handle,
            variant = envelope.variant.name(),
            task_type = %envelope.payload.task_type,
            "job accepted"
        );

        self.jobs.write().push(SubmittedJob {
            handle: handle.clone(),
            envelope,
            submitted_at: now,
            run_at,
            state: SubmittedState::Pending,
        });

        Ok(handle)
    }
}

impl Default for MemoryBackend {
    fn default() -> Self {
        Self::new()
    }
}
