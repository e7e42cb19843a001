use chrono::{DateTime, Duration, Utc};

/// When a job should become eligible for processing
///
/// Either a relative duration from submission time or an absolute instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Delay {
    /// Run after the given duration has elapsed
    For(Duration),

    /// Run at the given instant
    Until(DateTime<Utc>),
}

impl Delay {
    /// Create a delay of the given number of seconds
    pub fn seconds(secs: i64) -> Self {
        Self::For(Duration::seconds(secs))
    }

    /// Resolve the absolute instant this delay points at, relative to `now`
    pub fn run_at(&self, now: DateTime<Utc>) -> DateTime<Utc> {
        match self {
            Self::For(duration) => now + *duration,
            Self::Until(instant) => *instant,
        }
    }
}

impl From<i64> for Delay {
    fn from(secs: i64) -> Self {
        Self::seconds(secs)
    }
}

impl From<Duration> for Delay {
    fn from(duration: Duration) -> Self {
        Self::For(duration)
    }
}

impl From<std::time::Duration> for Delay {
    fn from(duration: std::time::Duration) -> Self {
        Self::For(Duration::from_std(duration).unwrap_or(Duration::MAX))
    }
}

impl From<DateTime<Utc>> for Delay {
    fn from(instant: DateTime<Utc>) -> Self {
        Self::Until(instant)
    }
}
