//! Risk assessment results returned by the scoring service.

use serde::{Deserialize, Serialize};

/// Risk band for the computed 10-year CVD risk.
///
/// Variants are ordered by severity, so `Ord` gives the display ordering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    Low,
    Borderline,
    Intermediate,
    High,
}

impl RiskLevel {
    /// Fixed boundary label for the band.
    #[must_use]
    pub fn band_label(&self) -> &'static str {
        match self {
            Self::Low => "<5%",
            Self::Borderline => "5-10%",
            Self::Intermediate => "10-20%",
            Self::High => ">20%",
        }
    }

    /// Get a human-readable description.
    #[must_use]
    pub fn description(&self) -> &'static str {
        match self {
            Self::Low => "Low risk - Keep up the healthy habits",
            Self::Borderline => "Borderline risk - Lifestyle changes recommended",
            Self::Intermediate => "Intermediate risk - Discuss with your doctor",
            Self::High => "High risk - Medical consultation advised",
        }
    }

    /// Get the associated color for TUI display (RGB).
    #[must_use]
    pub fn color(&self) -> (u8, u8, u8) {
        match self {
            Self::Low => (16, 185, 129),           // Emerald (#10B981)
            Self::Borderline => (251, 191, 36),    // Amber (#FBBF24)
            Self::Intermediate => (249, 115, 22),  // Orange (#F97316)
            Self::High => (244, 63, 94),           // Rose (#F43F5E)
        }
    }

    /// Short marker shown next to the band name.
    #[must_use]
    pub fn icon(&self) -> &'static str {
        match self {
            Self::Low => "OK",
            Self::Borderline | Self::Intermediate => "!",
            Self::High => "!!",
        }
    }
}

impl std::fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Low => write!(f, "LOW"),
            Self::Borderline => write!(f, "BORDERLINE"),
            Self::Intermediate => write!(f, "INTERMEDIATE"),
            Self::High => write!(f, "HIGH"),
        }
    }
}

/// Scored assessment as returned by the service.
///
/// Created only on a successful exchange and discarded when the user starts
/// a new assessment. Recommendations keep the order the service sent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskAssessment {
    /// 10-year risk estimate in percent (0 to 100)
    pub risk_percentage: f64,

    /// Risk band
    pub risk_level: RiskLevel,

    /// Free-text band label, e.g. "Borderline Risk"
    pub risk_category: String,

    /// Personalized recommendations, in display order
    pub recommendations: Vec<String>,

    /// Server-side identifier for the stored assessment
    #[serde(default)]
    pub assessment_id: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_band_ordering() {
        assert!(RiskLevel::Low < RiskLevel::Borderline);
        assert!(RiskLevel::Borderline < RiskLevel::Intermediate);
        assert!(RiskLevel::Intermediate < RiskLevel::High);
    }

    #[test]
    fn test_band_labels() {
        assert_eq!(RiskLevel::Low.band_label(), "<5%");
        assert_eq!(RiskLevel::Borderline.band_label(), "5-10%");
        assert_eq!(RiskLevel::Intermediate.band_label(), "10-20%");
        assert_eq!(RiskLevel::High.band_label(), ">20%");
    }

    #[test]
    fn test_band_colors() {
        assert_eq!(RiskLevel::Low.color(), (16, 185, 129));
        assert_eq!(RiskLevel::Borderline.color(), (251, 191, 36));
        assert_eq!(RiskLevel::Intermediate.color(), (249, 115, 22));
        assert_eq!(RiskLevel::High.color(), (244, 63, 94));
    }

    #[test]
    fn test_deserialize_service_response() {
        let body = r#"{
            "risk_percentage": 8.2,
            "risk_level": "borderline",
            "risk_category": "Borderline Risk",
            "recommendations": ["Maintain healthy diet"],
            "assessment_id": "abc-123"
        }"#;
        let assessment: RiskAssessment = serde_json::from_str(body).expect("valid body");
        assert!((assessment.risk_percentage - 8.2).abs() < f64::EPSILON);
        assert_eq!(assessment.risk_level, RiskLevel::Borderline);
        assert_eq!(assessment.recommendations, vec!["Maintain healthy diet"]);
        assert_eq!(assessment.assessment_id.as_deref(), Some("abc-123"));
    }

    #[test]
    fn test_assessment_id_is_optional() {
        let body = r#"{
            "risk_percentage": 3.0,
            "risk_level": "low",
            "risk_category": "Low Risk",
            "recommendations": []
        }"#;
        let assessment: RiskAssessment = serde_json::from_str(body).expect("valid body");
        assert!(assessment.assessment_id.is_none());
    }

    #[test]
    fn test_unknown_band_is_rejected() {
        let body = r#"{
            "risk_percentage": 3.0,
            "risk_level": "extreme",
            "risk_category": "?",
            "recommendations": []
        }"#;
        assert!(serde_json::from_str::<RiskAssessment>(body).is_err());
    }
}
