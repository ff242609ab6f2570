//! Wizard controller: step sequencing and per-step validation gating.
//!
//! The wizard owns the form state and the (eventual) scored result. Forward
//! movement is gated by [`step_complete`]; backward movement and reset are
//! unconditional. Submission itself is driven by the caller through the
//! scoring port, with [`Wizard::complete`] recording a successful outcome.

use crate::domain::{FieldId, FormData, FormPatch, RiskAssessment};

/// Steps of the intake wizard, in order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    Demographics,
    Vitals,
    Lifestyle,
    History,
    Results,
}

impl Step {
    /// 1-based position of the step (Results is 5).
    #[must_use]
    pub fn number(self) -> u8 {
        match self {
            Self::Demographics => 1,
            Self::Vitals => 2,
            Self::Lifestyle => 3,
            Self::History => 4,
            Self::Results => 5,
        }
    }

    /// Title shown in the step header.
    #[must_use]
    pub fn title(self) -> &'static str {
        match self {
            Self::Demographics => "Demographics",
            Self::Vitals => "Blood Pressure & Cholesterol",
            Self::Lifestyle => "Body & Activity",
            Self::History => "Medical History",
            Self::Results => "Assessment Results",
        }
    }

    /// Fields collected on this step, in display order.
    #[must_use]
    pub fn fields(self) -> &'static [FieldId] {
        match self {
            Self::Demographics => &[FieldId::Age, FieldId::Gender],
            Self::Vitals => &[
                FieldId::SystolicBp,
                FieldId::TotalCholesterol,
                FieldId::HdlCholesterol,
            ],
            Self::Lifestyle => &[FieldId::Bmi, FieldId::PhysicalActivity],
            Self::History => &[FieldId::Smoker, FieldId::Diabetes, FieldId::FamilyHistory],
            Self::Results => &[],
        }
    }
}

/// Whether every field required on a step has been given a value.
///
/// Pure function of (step, form). History is always complete because its
/// checkboxes default to a valid answer; no cross-field validation happens
/// here.
#[must_use]
pub fn step_complete(step: Step, form: &FormData) -> bool {
    step.fields().iter().all(|&field| form.is_set(field))
}

/// The wizard state machine.
///
/// States: Demographics → Vitals → Lifestyle → History → Results, with no
/// skippable steps and no jumps. Results is not terminal; `reset` loops
/// back to a fresh Demographics.
#[derive(Debug, Default)]
pub struct Wizard {
    step: Step,
    form: FormData,
    outcome: Option<RiskAssessment>,
}

impl Default for Step {
    fn default() -> Self {
        Self::Demographics
    }
}

impl Wizard {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn step(&self) -> Step {
        self.step
    }

    #[must_use]
    pub fn form(&self) -> &FormData {
        &self.form
    }

    #[must_use]
    pub fn outcome(&self) -> Option<&RiskAssessment> {
        self.outcome.as_ref()
    }

    /// Apply a single-field update to the form.
    ///
    /// This is the only mutation path for form state; views never write.
    pub fn apply(&mut self, patch: FormPatch) {
        self.form.apply(patch);
    }

    /// Whether the current step's required fields are all set.
    #[must_use]
    pub fn can_advance(&self) -> bool {
        step_complete(self.step, &self.form)
    }

    /// Advance one step, if permitted.
    ///
    /// Only valid from the first three steps and only when the validator
    /// passes. History submits instead of advancing, and Results resets.
    pub fn next(&mut self) -> bool {
        if !self.can_advance() {
            return false;
        }

        let next = match self.step {
            Step::Demographics => Step::Vitals,
            Step::Vitals => Step::Lifestyle,
            Step::Lifestyle => Step::History,
            Step::History | Step::Results => return false,
        };

        self.step = next;
        true
    }

    /// Go back one step. Unconditional for steps 2 through 4.
    pub fn previous(&mut self) -> bool {
        let previous = match self.step {
            Step::Vitals => Step::Demographics,
            Step::Lifestyle => Step::Vitals,
            Step::History => Step::Lifestyle,
            Step::Demographics | Step::Results => return false,
        };

        self.step = previous;
        true
    }

    /// Record a successful submission and move to the results state.
    ///
    /// Ignored unless the wizard is on the submission step, so a stray
    /// worker result cannot jump the state machine.
    pub fn complete(&mut self, outcome: RiskAssessment) {
        if self.step == Step::History {
            self.outcome = Some(outcome);
            self.step = Step::Results;
        }
    }

    /// Discard the form and any result, returning to the first step.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
