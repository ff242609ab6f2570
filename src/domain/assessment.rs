//! Intake form state and the request payload sent to the scoring service.
//!
//! Numeric fields are kept as text buffers while the user edits them; they
//! are parsed into the typed `AssessmentRequest` only at submission time.

use serde::{Deserialize, Serialize};

/// Gender as accepted by the scoring service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
}

impl Gender {
    /// Human-readable label for display.
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            Self::Male => "Male",
            Self::Female => "Female",
        }
    }

    /// The other option (the form cycles between the two).
    #[must_use]
    pub fn toggled(self) -> Self {
        match self {
            Self::Male => Self::Female,
            Self::Female => Self::Male,
        }
    }
}

/// Physical activity level as accepted by the scoring service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PhysicalActivity {
    Sedentary,
    Light,
    Moderate,
    Vigorous,
}

impl PhysicalActivity {
    /// Human-readable label for display.
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            Self::Sedentary => "Sedentary",
            Self::Light => "Light",
            Self::Moderate => "Moderate",
            Self::Vigorous => "Vigorous",
        }
    }

    /// Next option, wrapping around.
    #[must_use]
    pub fn next(self) -> Self {
        match self {
            Self::Sedentary => Self::Light,
            Self::Light => Self::Moderate,
            Self::Moderate => Self::Vigorous,
            Self::Vigorous => Self::Sedentary,
        }
    }

    /// Previous option, wrapping around.
    #[must_use]
    pub fn prev(self) -> Self {
        match self {
            Self::Sedentary => Self::Vigorous,
            Self::Light => Self::Sedentary,
            Self::Moderate => Self::Light,
            Self::Vigorous => Self::Moderate,
        }
    }
}

/// Closed set of form field keys.
///
/// Every field the form knows about is named here, so code addressing a
/// field by key is checked by the compiler instead of failing at runtime.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldId {
    Age,
    Gender,
    SystolicBp,
    TotalCholesterol,
    HdlCholesterol,
    Bmi,
    PhysicalActivity,
    Smoker,
    Diabetes,
    FamilyHistory,
}

impl FieldId {
    /// Build a text-buffer update for this field, if it is a numeric field.
    #[must_use]
    pub fn text_patch(self, value: String) -> Option<FormPatch> {
        match self {
            Self::Age => Some(FormPatch::Age(value)),
            Self::SystolicBp => Some(FormPatch::SystolicBp(value)),
            Self::TotalCholesterol => Some(FormPatch::TotalCholesterol(value)),
            Self::HdlCholesterol => Some(FormPatch::HdlCholesterol(value)),
            Self::Bmi => Some(FormPatch::Bmi(value)),
            _ => None,
        }
    }
}

/// A typed single-field update.
///
/// This is the only way to mutate [`FormData`]: each variant carries the
/// value type its field accepts, so an invalid key/value pairing cannot be
/// constructed.
#[derive(Debug, Clone, PartialEq)]
pub enum FormPatch {
    Age(String),
    Gender(Gender),
    SystolicBp(String),
    TotalCholesterol(String),
    HdlCholesterol(String),
    Smoker(bool),
    Diabetes(bool),
    FamilyHistory(bool),
    Bmi(String),
    PhysicalActivity(PhysicalActivity),
}

/// Current state of the intake form.
///
/// All fields start empty/false. A field counts as "set" once it holds a
/// non-empty value; booleans are always set (false is a valid answer).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FormData {
    age: String,
    gender: Option<Gender>,
    systolic_bp: String,
    total_cholesterol: String,
    hdl_cholesterol: String,
    is_smoker: bool,
    has_diabetes: bool,
    family_history: bool,
    bmi: String,
    physical_activity: Option<PhysicalActivity>,
}

impl FormData {
    /// Apply a single-field update.
    pub fn apply(&mut self, patch: FormPatch) {
        match patch {
            FormPatch::Age(v) => self.age = v,
            FormPatch::Gender(v) => self.gender = Some(v),
            FormPatch::SystolicBp(v) => self.systolic_bp = v,
            FormPatch::TotalCholesterol(v) => self.total_cholesterol = v,
            FormPatch::HdlCholesterol(v) => self.hdl_cholesterol = v,
            FormPatch::Smoker(v) => self.is_smoker = v,
            FormPatch::Diabetes(v) => self.has_diabetes = v,
            FormPatch::FamilyHistory(v) => self.family_history = v,
            FormPatch::Bmi(v) => self.bmi = v,
            FormPatch::PhysicalActivity(v) => self.physical_activity = Some(v),
        }
    }

    #[must_use]
    pub fn gender(&self) -> Option<Gender> {
        self.gender
    }

    #[must_use]
    pub fn physical_activity(&self) -> Option<PhysicalActivity> {
        self.physical_activity
    }

    /// Text buffer for a numeric field; `None` for non-numeric fields.
    #[must_use]
    pub fn text(&self, field: FieldId) -> Option<&str> {
        match field {
            FieldId::Age => Some(&self.age),
            FieldId::SystolicBp => Some(&self.systolic_bp),
            FieldId::TotalCholesterol => Some(&self.total_cholesterol),
            FieldId::HdlCholesterol => Some(&self.hdl_cholesterol),
            FieldId::Bmi => Some(&self.bmi),
            _ => None,
        }
    }

    /// Boolean value for a toggle field; `None` for non-toggle fields.
    #[must_use]
    pub fn flag(&self, field: FieldId) -> Option<bool> {
        match field {
            FieldId::Smoker => Some(self.is_smoker),
            FieldId::Diabetes => Some(self.has_diabetes),
            FieldId::FamilyHistory => Some(self.family_history),
            _ => None,
        }
    }

    /// Whether a field has been given a value.
    #[must_use]
    pub fn is_set(&self, field: FieldId) -> bool {
        match field {
            FieldId::Age => !self.age.is_empty(),
            FieldId::Gender => self.gender.is_some(),
            FieldId::SystolicBp => !self.systolic_bp.is_empty(),
            FieldId::TotalCholesterol => !self.total_cholesterol.is_empty(),
            FieldId::HdlCholesterol => !self.hdl_cholesterol.is_empty(),
            FieldId::Bmi => !self.bmi.is_empty(),
            FieldId::PhysicalActivity => self.physical_activity.is_some(),
            // Checkbox defaults are valid answers.
            FieldId::Smoker | FieldId::Diabetes | FieldId::FamilyHistory => true,
        }
    }

    /// Parse the buffers into the typed request payload.
    ///
    /// # Errors
    /// Returns an error naming the first field that is missing or does not
    /// parse as a number. The form itself is left untouched.
    pub fn to_request(&self) -> Result<AssessmentRequest, FormError> {
        let gender = self.gender.ok_or(FormError::Missing("gender"))?;
        let physical_activity = self
            .physical_activity
            .ok_or(FormError::Missing("physical activity"))?;

        Ok(AssessmentRequest {
            age: parse_int("age", &self.age)?,
            gender,
            systolic_bp: parse_int("systolic blood pressure", &self.systolic_bp)?,
            total_cholesterol: parse_int("total cholesterol", &self.total_cholesterol)?,
            hdl_cholesterol: parse_int("HDL cholesterol", &self.hdl_cholesterol)?,
            is_smoker: self.is_smoker,
            has_diabetes: self.has_diabetes,
            family_history: self.family_history,
            bmi: parse_decimal("BMI", &self.bmi)?,
            physical_activity,
        })
    }
}

fn parse_int(field: &'static str, raw: &str) -> Result<u32, FormError> {
    if raw.is_empty() {
        return Err(FormError::Missing(field));
    }
    raw.trim().parse().map_err(|_| FormError::InvalidNumber(field))
}

fn parse_decimal(field: &'static str, raw: &str) -> Result<f64, FormError> {
    if raw.is_empty() {
        return Err(FormError::Missing(field));
    }
    raw.trim().parse().map_err(|_| FormError::InvalidNumber(field))
}

/// Error turning the form buffers into a request payload.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FormError {
    #[error("{0} must be a number")]
    InvalidNumber(&'static str),

    #[error("{0} is required")]
    Missing(&'static str),
}

/// Typed payload for the scoring service.
///
/// Field names and types match the service contract exactly; enums are
/// serialized as the lowercase strings it expects.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AssessmentRequest {
    pub age: u32,
    pub gender: Gender,
    pub systolic_bp: u32,
    pub total_cholesterol: u32,
    pub hdl_cholesterol: u32,
    pub is_smoker: bool,
    pub has_diabetes: bool,
    pub family_history: bool,
    pub bmi: f64,
    pub physical_activity: PhysicalActivity,
}
