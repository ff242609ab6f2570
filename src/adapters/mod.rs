//! Adapters layer: Concrete implementations of ports.
//!
//! - `http`: reqwest-based client for the remote scoring service

pub mod http;

pub use http::{HttpScoringService, ScoringError};
