//! `altcredit` library crate.
//!
//! The binary (`altcredit`) is a thin wrapper around this library so that:
//!
//! - the scoring contract and the training pipeline are testable without spawning processes
//! - the HTTP layer stays a marshalling shim over `scoring`
//! - the two entry points (heuristic scoring, offline model fitting) stay independent

pub mod app;
pub mod cli;
pub mod data;
pub mod domain;
pub mod error;
pub mod fit;
pub mod io;
pub mod logging;
pub mod math;
pub mod report;
pub mod scoring;
pub mod server;
