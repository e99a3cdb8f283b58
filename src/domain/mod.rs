//! Domain types used throughout the service and the trainer.
//!
//! This module defines:
//!
//! - the scoring contract (`ScoringInput`, `ScoringResult`, `RiskLevel`)
//! - run configuration for the trainer and the HTTP service

pub mod types;

pub use types::*;
