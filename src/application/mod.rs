//! Application layer: Use cases and services.
//!
//! This module orchestrates domain state with the scoring port to implement
//! the step-gated intake flow.

mod wizard;

pub use wizard::{step_complete, Step, Wizard};
