pub mod delay;
pub mod envelope;
pub mod handler;
pub mod ids;

pub use delay::Delay;
pub use envelope::{JobEnvelope, JobVariant};
pub use handler::FailureHandler;
pub use ids::SubmissionHandle;
