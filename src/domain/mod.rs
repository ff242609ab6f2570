//! Domain layer: Core business types and logic.
//!
//! This module contains pure Rust types with no external collaborators.
//! Wire-facing types serialize to the scoring service's exact contract.

mod assessment;
mod risk;

pub use assessment::{
    AssessmentRequest, FieldId, FormData, FormError, FormPatch, Gender, PhysicalActivity,
};
pub use risk::{RiskAssessment, RiskLevel};
