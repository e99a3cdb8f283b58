//! Mathematical utilities: linear solves, numerically stable logistic helpers,
//! and exact decimal rounding.

pub mod link;
pub mod linalg;
pub mod round;

pub use link::*;
pub use linalg::*;
pub use round::*;
