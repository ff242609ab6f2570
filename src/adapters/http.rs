//! HTTP adapter for the remote scoring service.
//!
//! Performs the single JSON POST exchange against
//! `{base}/api/assess-cvd-risk` and validates the response body against the
//! typed [`RiskAssessment`] shape before it reaches the presenter.

use reqwest::blocking::Client;

use crate::domain::{AssessmentRequest, RiskAssessment};
use crate::ports::RiskScorer;

/// Environment variable overriding the service base URL.
pub const API_URL_ENV: &str = "CARDIOSCAN_API_URL";

/// Default base URL when no configuration is supplied.
pub const DEFAULT_BASE_URL: &str = "http://localhost:8001";

/// Error from the scoring exchange.
#[derive(Debug, thiserror::Error)]
pub enum ScoringError {
    #[error("scoring request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("scoring service returned status {0}")]
    Status(reqwest::StatusCode),

    #[error("scoring service returned a malformed response: {0}")]
    MalformedResponse(String),
}

/// Scoring service client over HTTP.
pub struct HttpScoringService {
    client: Client,
    base_url: String,
}

impl HttpScoringService {
    /// Create a client against the given base URL.
    ///
    /// # Errors
    /// Returns error if the underlying HTTP client cannot be built.
    pub fn new(base_url: impl Into<String>) -> Result<Self, ScoringError> {
        let client = Client::builder()
            .user_agent(concat!("cardioscan/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.into(),
        })
    }

    /// Create a client from `CARDIOSCAN_API_URL`, falling back to the local
    /// default endpoint.
    ///
    /// # Errors
    /// Returns error if the underlying HTTP client cannot be built.
    pub fn from_env() -> Result<Self, ScoringError> {
        let base_url =
            std::env::var(API_URL_ENV).unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());
        Self::new(base_url)
    }

    fn endpoint(&self) -> String {
        format!("{}/api/assess-cvd-risk", self.base_url.trim_end_matches('/'))
    }
}

impl RiskScorer for HttpScoringService {
    type Error = ScoringError;

    fn assess(&self, request: &AssessmentRequest) -> Result<RiskAssessment, ScoringError> {
        let url = self.endpoint();
        tracing::debug!("Submitting assessment to {}", url);

        let response = self.client.post(&url).json(request).send()?;

        let status = response.status();
        if !status.is_success() {
            tracing::warn!("Scoring service returned status {}", status);
            return Err(ScoringError::Status(status));
        }

        let body = response.text()?;
        decode_body(&body)
    }
}

/// Validate the response body against the expected shape.
fn decode_body(body: &str) -> Result<RiskAssessment, ScoringError> {
    let assessment: RiskAssessment = serde_json::from_str(body)
        .map_err(|e| ScoringError::MalformedResponse(e.to_string()))?;

    if !(0.0..=100.0).contains(&assessment.risk_percentage) {
        return Err(ScoringError::MalformedResponse(format!(
            "risk_percentage {} out of range [0, 100]",
            assessment.risk_percentage
        )));
    }

    Ok(assessment)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::RiskLevel;

    #[test]
    fn test_endpoint_join_handles_trailing_slash() {
        let svc = HttpScoringService::new("http://localhost:8001/").expect("client");
        assert_eq!(svc.endpoint(), "http://localhost:8001/api/assess-cvd-risk");

        let svc = HttpScoringService::new("http://localhost:8001").expect("client");
        assert_eq!(svc.endpoint(), "http://localhost:8001/api/assess-cvd-risk");
    }

    #[test]
    fn test_decode_valid_body() {
        let body = r#"{
            "risk_percentage": 8.2,
            "risk_level": "borderline",
            "risk_category": "Borderline Risk",
            "recommendations": ["Maintain healthy diet"]
        }"#;
        let assessment = decode_body(body).expect("valid body");
        assert_eq!(assessment.risk_level, RiskLevel::Borderline);
        assert!((assessment.risk_percentage - 8.2).abs() < f64::EPSILON);
    }

    #[test]
    fn test_decode_rejects_missing_fields() {
        let body = r#"{"risk_percentage": 8.2}"#;
        assert!(matches!(
            decode_body(body),
            Err(ScoringError::MalformedResponse(_))
        ));
    }

    #[test]
    fn test_decode_rejects_out_of_range_percentage() {
        let body = r#"{
            "risk_percentage": 140.0,
            "risk_level": "high",
            "risk_category": "High Risk",
            "recommendations": []
        }"#;
        assert!(matches!(
            decode_body(body),
            Err(ScoringError::MalformedResponse(_))
        ));
    }

    #[test]
    fn test_decode_rejects_non_json() {
        assert!(matches!(
            decode_body("<html>gateway error</html>"),
            Err(ScoringError::MalformedResponse(_))
        ));
    }
}
