//! Scoring port: Trait for the external risk-scoring exchange.
//!
//! This trait abstracts the remote Framingham scoring service from the
//! wizard, so the submission flow can be exercised against stubs in tests.

use crate::domain::{AssessmentRequest, RiskAssessment};

/// Trait for submitting an assessment to the scoring service.
///
/// One request, one response; retries are the caller's decision.
pub trait RiskScorer: Send + Sync {
    /// Error type for scoring operations.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Submit the payload and return the scored assessment.
    ///
    /// Blocks until the service responds or the transport fails, so callers
    /// on a UI loop should run this on a background thread.
    ///
    /// # Errors
    /// Returns error on transport failure, a non-success response status,
    /// or a response body that does not match the expected shape.
    fn assess(&self, request: &AssessmentRequest) -> Result<RiskAssessment, Self::Error>;
}
