use crate::task::TaskPayload;
use crate::types::{Delay, FailureHandler};

/// Mutually exclusive job shapes, selected at submission time
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JobVariant {
    /// Ordinary job with no special handling
    Plain,

    /// Job deduplicated for a fixed duration after submission
    UniqueFor {
        /// Seconds the dedup key stays reserved
        unique_for: i64,

        /// Deterministic content hash of the payload
        dedup_key: String,
    },

    /// Job deduplicated until a worker begins processing it
    UniqueUntilProcessing {
        /// Deterministic content hash of the payload
        dedup_key: String,
    },

    /// Job whose payload must be encrypted at rest by the backend
    Encrypted,
}

impl JobVariant {
    /// Get the variant name as a string
    pub fn name(&self) -> &'static str {
        match self {
            Self::Plain => "plain",
            Self::UniqueFor { .. } => "unique_for",
            Self::UniqueUntilProcessing { .. } => "unique_until_processing",
            Self::Encrypted => "encrypted",
        }
    }

    /// Get the dedup key, if this variant carries one
    pub fn dedup_key(&self) -> Option<&str> {
        match self {
            Self::UniqueFor { dedup_key, .. } | Self::UniqueUntilProcessing { dedup_key } => {
                Some(dedup_key)
            }
            _ => None,
        }
    }
}

/// Fully configured job handed to the backend
///
/// Optional fields that are `None` leave the backend's own defaults in
/// effect. Built freshly per payload and consumed by submission.
#[derive(Debug, Clone)]
pub struct JobEnvelope {
    /// Selected job shape
    pub variant: JobVariant,

    /// The task payload to execute
    pub payload: TaskPayload,

    /// Target queue name
    pub queue: Option<String>,

    /// Target connection name
    pub connection: Option<String>,

    /// When the job becomes eligible for processing
    pub delay: Option<Delay>,

    /// Instructs the serializer to drop attached object-graph references
    /// before persisting the payload
    pub strip_references: bool,

    /// Name of the rate limiting policy the backend should apply
    pub rate_limiter: Option<String>,

    /// Callback for execution failures inside a worker
    pub failure_handler: Option<FailureHandler>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn variant_names_are_stable() {
        assert_eq!(JobVariant::Plain.name(), "plain");
        assert_eq!(JobVariant::Encrypted.name(), "encrypted");
        assert_eq!(
            JobVariant::UniqueFor {
                unique_for: 60,
                dedup_key: "abc".to_string()
            }
            .name(),
            "unique_for"
        );
        assert_eq!(
            JobVariant::UniqueUntilProcessing {
                dedup_key: "abc".to_string()
            }
            .name(),
            "unique_until_processing"
        );
    }

    #[test]
    fn only_unique_variants_carry_dedup_keys() {
        assert!(JobVariant::Plain.dedup_key().is_none());
        assert!(JobVariant::Encrypted.dedup_key().is_none());
        assert_eq!(
            JobVariant::UniqueUntilProcessing {
                dedup_key: "abc".to_string()
            }
            .dedup_key(),
            Some("abc")
        );
    }
}
