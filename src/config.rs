use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Fallback unique-job duration when none is configured
pub const DEFAULT_UNIQUE_FOR_SECS: i64 = 3600;

/// A named rate limiter definition: request-count limit per window
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RateLimit {
    /// Maximum number of jobs allowed per window
    pub limit: u32,

    /// Window length in minutes
    pub per_minutes: u32,
}

impl Default for RateLimit {
    fn default() -> Self {
        Self {
            limit: 60,
            per_minutes: 1,
        }
    }
}

/// Process-wide flow configuration, passed explicitly to builders and backends
///
/// Applications typically deserialize this from their own configuration file;
/// everything has a sensible default.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FlowConfig {
    /// Default queue name applied to every dispatch unless overridden
    pub queue: Option<String>,

    /// Default connection name applied to every dispatch unless overridden
    pub connection: Option<String>,

    /// Default unique-job duration in seconds; non-positive or absent values
    /// fall back to [`DEFAULT_UNIQUE_FOR_SECS`]
    pub unique_for: Option<i64>,

    /// Named rate limiter definitions resolvable by the backend
    pub rate_limiters: HashMap<String, RateLimit>,

    /// Whether builders start with scope-exit auto dispatch enabled
    pub auto_dispatch: bool,

    /// Whether the `queue_flow` helper dispatches immediately by default
    pub auto_dispatch_on_helper: bool,
}

impl Default for FlowConfig {
    fn default() -> Self {
        let mut rate_limiters = HashMap::new();
        rate_limiters.insert("default".to_string(), RateLimit::default());

        Self {
            queue: None,
            connection: None,
            unique_for: None,
            rate_limiters,
            auto_dispatch: false,
            auto_dispatch_on_helper: true,
        }
    }
}

impl FlowConfig {
    /// Resolve the unique-job duration, falling back to the default when the
    /// configured value is absent or non-positive
    pub fn unique_for_or_default(&self) -> i64 {
        match self.unique_for {
            Some(secs) if secs > 0 => secs,
            _ => DEFAULT_UNIQUE_FOR_SECS,
        }
    }

    /// Look up a rate limiter definition by name
    pub fn rate_limit(&self, name: &str) -> Option<&RateLimit> {
        self.rate_limiters.get(name)
    }

    /// Set the default queue name
    pub fn with_queue(mut self, queue: impl Into<String>) -> Self {
        self.queue = Some(queue.into());
        self
    }

    /// Set the default connection name
    pub fn with_connection(mut self, connection: impl Into<String>) -> Self {
        self.connection = Some(connection.into());
        self
    }

    /// Set the default unique-job duration in seconds
    pub fn with_unique_for(mut self, secs: i64) -> Self {
        self.unique_for = Some(secs);
        self
    }

    /// Register a named rate limiter definition
    pub fn with_rate_limiter(mut self, name: impl Into<String>, limit: RateLimit) -> Self {
        self.rate_limiters.insert(name.into(), limit);
        self
    }

    /// Enable or disable scope-exit auto dispatch for new builders
    pub fn with_auto_dispatch(mut self, enabled: bool) -> Self {
        self.auto_dispatch = enabled;
        self
    }

    /// Enable or disable immediate dispatch in the `queue_flow` helper
    pub fn with_auto_dispatch_on_helper(mut self, enabled: bool) -> Self {
        self.auto_dispatch_on_helper = enabled;
        self
    }
}
