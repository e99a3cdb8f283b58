//! Model fitting.
//!
//! Responsibilities:
//!
//! - standardize features (`scaler`)
//! - seeded train/test split (`split`)
//! - L2-regularized logistic regression by Newton iterations (`logistic`)

pub mod logistic;
pub mod scaler;
pub mod split;

pub use logistic::*;
pub use scaler::*;
pub use split::*;
