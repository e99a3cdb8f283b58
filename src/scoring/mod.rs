//! Heuristic credit scoring.
//!
//! The live service scores requests with a fixed formula over four alternative
//! signals. Everything that can vary between callers is pulled out as an
//! explicit input:
//!
//! - request coercion (`coerce`): lenient, unparseable values become `0`
//! - the jitter term (`jitter`): entropy in production, fixed or disabled in tests
//! - the strategy (`ScoringStrategy`): the heuristic is one implementation
//!
//! Model-based inference is not wired in; `io::ModelArtifact` can be loaded by a
//! future strategy once its input contract is settled.

pub mod coerce;
pub mod heuristic;
pub mod jitter;

pub use coerce::*;
pub use heuristic::*;
pub use jitter::*;

use crate::domain::{ScoringInput, ScoringResult};

/// Failure inside score computation.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ScoreError {
    /// An intermediate value overflowed or became NaN.
    #[error("non-finite {stage} while scoring: {value}")]
    NonFinite { stage: &'static str, value: f64 },
}

/// Anything that can turn a `ScoringInput` into a `ScoringResult`.
///
/// Implementations must be safe to call concurrently from request handlers.
pub trait ScoringStrategy: Send + Sync {
    fn name(&self) -> &'static str;

    fn score(&self, input: &ScoringInput) -> Result<ScoringResult, ScoreError>;
}
