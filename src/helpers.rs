use std::sync::Arc;

use crate::backend::QueueBackend;
use crate::config::FlowConfig;
use crate::error::FlowResult;
use crate::flow::{Dispatched, QueueFlow};
use crate::task::TaskPayload;

/// Result of the [`queue_flow`] helper
#[derive(Debug)]
pub enum FlowOutcome {
    /// The payloads were dispatched immediately
    Dispatched(Dispatched),

    /// Auto dispatch was off; the builder is returned for further chaining
    Pending(QueueFlow),
}

impl FlowOutcome {
    /// Check whether the payloads were dispatched immediately
    pub fn is_dispatched(&self) -> bool {
        matches!(self, Self::Dispatched(_))
    }

    /// Get the dispatch result, if the payloads were dispatched
    pub fn dispatched(self) -> Option<Dispatched> {
        match self {
            Self::Dispatched(dispatched) => Some(dispatched),
            Self::Pending(_) => None,
        }
    }

    /// Get the un-dispatched builder, if auto dispatch was off
    pub fn pending(self) -> Option<QueueFlow> {
        match self {
            Self::Dispatched(_) => None,
            Self::Pending(flow) => Some(flow),
        }
    }
}

/// One-call convenience entry point
///
/// Builds a [`QueueFlow`], adds the given payloads, and either dispatches
/// immediately or hands the builder back for further chaining. The
/// `auto_dispatch` argument overrides the configured
/// `auto_dispatch_on_helper` flag when given.
pub async fn queue_flow<I>(
    backend: Arc<dyn QueueBackend>,
    config: Arc<FlowConfig>,
    payloads: I,
    auto_dispatch: Option<bool>,
) -> FlowResult<FlowOutcome>
where
    I: IntoIterator<Item = TaskPayload>,
{
    let mut flow = QueueFlow::new(backend, config.clone());
    flow.auto_dispatch(false);
    flow.add_payloads(payloads)?;

    let auto_dispatch = auto_dispatch.unwrap_or(config.auto_dispatch_on_helper);

    if auto_dispatch {
        flow.dispatch().await.map(FlowOutcome::Dispatched)
    } else {
        Ok(FlowOutcome::Pending(flow))
    }
}
