//! TUI module: Terminal User Interface using Ratatui.
//!
//! Provides a medical-themed interface for:
//! - Step-gated intake of demographic and clinical inputs
//! - Submission to the remote scoring service
//! - Risk band and recommendation display

mod app;
mod styles;
mod ui;
mod worker;

pub use app::App;
pub use styles::MedicalTheme;
pub use worker::{SubmitProgress, SubmitWorker, SubmitWorkerHandle};
