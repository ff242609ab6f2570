//! # cardioscan
//!
//! Terminal client for cardiovascular disease (CVD) risk assessment.
//!
//! This crate provides:
//! - A step-gated intake wizard for demographic and clinical inputs
//! - Submission to a remote Framingham-scoring service over HTTP
//! - Risk band and recommendation rendering in the terminal
//!
//! ## Architecture
//!
//! The crate follows Hexagonal Architecture:
//! - `domain`: Core business types (form state, request payload, risk result)
//! - `ports`: Trait definitions for the scoring exchange
//! - `adapters`: Concrete implementations (reqwest HTTP client)
//! - `application`: The wizard state machine and step validation
//! - `tui`: Terminal user interface

pub mod adapters;
pub mod application;
pub mod domain;
pub mod ports;
pub mod tui;

pub use domain::{FormData, RiskAssessment, RiskLevel};
