//! # queue-flow: Fluent Job Dispatch Over Pluggable Queue Backends
//!
//! **Configure once, dispatch many: a thin coordination layer for background jobs**
//!
//! queue-flow lets application code hand portable units of work to an existing
//! background queue through a chainable builder, without caring which backend
//! sits on the other side:
//!
//! - **Fluent configuration**: queue, connection, delay, uniqueness,
//!   encryption, rate limiting, and failure callbacks in one chain
//! - **Batch fan-out**: accumulate any number of tasks and submit them in
//!   insertion order under a single configuration
//! - **Portable payloads**: tasks serialize their captured state and travel
//!   as a registered type identifier plus opaque bytes
//! - **Content-hash deduplication**: unique jobs derive their dedup key
//!   deterministically from the serialized payload
//! - **One trait seam**: durable storage, workers, retries, locks, and
//!   encryption all live behind [`QueueBackend`]
//!
//! ## 🚀 Quick Start
//!
//! ```no_run
//! use std::sync::Arc;
//!
//! use queue_flow::{FlowConfig, MemoryBackend, QueueFlow, Task, TaskError};
//! use serde::{Deserialize, Serialize};
//!
//! #[derive(Serialize, Deserialize)]
//! struct SendWelcomeEmail {
//!     user_id: u64,
//! }
//!
//! #[async_trait::async_trait]
//! impl Task for SendWelcomeEmail {
//!     const TASK_TYPE: &'static str = "send_welcome_email";
//!
//!     async fn run(&self) -> Result<(), TaskError> {
//!         // deliver the email here
//!         Ok(())
//!     }
//! }
//!
//! # async fn demo() -> queue_flow::FlowResult<()> {
//! let backend = Arc::new(MemoryBackend::new());
//! let config = Arc::new(FlowConfig::default());
//!
//! let mut flow = QueueFlow::new(backend, config);
//! let dispatched = flow
//!     .add(&SendWelcomeEmail { user_id: 42 })?
//!     .on_queue("emails")
//!     .delay(60)
//!     .should_be_unique_for(3600)
//!     .dispatch()
//!     .await?;
//!
//! println!("submitted {} job(s)", dispatched.len());
//! # Ok(())
//! # }
//! ```

pub mod backend;
pub mod config;
pub mod dispatch;
pub mod error;
pub mod flow;
pub mod helpers;
pub mod task;
pub mod types;

// Core API exports
pub use backend::QueueBackend;
pub use config::{FlowConfig, RateLimit, DEFAULT_UNIQUE_FOR_SECS};
pub use dispatch::{DispatchState, Dispatcher, Uniqueness};
pub use error::{FlowError, FlowResult, SubmitError, TaskError};
pub use flow::{Dispatched, QueueFlow};
pub use helpers::{queue_flow, FlowOutcome};
pub use task::{Task, TaskPayload, TaskRegistry};
pub use types::{Delay, FailureHandler, JobEnvelope, JobVariant, SubmissionHandle};

#[cfg(feature = "memory")]
pub use backend::memory::{MemoryBackend, SubmittedJob, SubmittedState};
