//! Ports layer: Trait definitions for external operations.
//!
//! Following Hexagonal Architecture, these traits define the boundary
//! between the application and the remote scoring service.

mod scoring;

pub use scoring::RiskScorer;
