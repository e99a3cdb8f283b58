//! Training data ingest.
//!
//! - named column schema for the credit dataset (`schema`)
//! - whitespace-delimited loader with row validation (`dataset`)
//! - feature extraction with mean imputation (`features`)

pub mod dataset;
pub mod features;
pub mod schema;

pub use dataset::*;
pub use features::*;
pub use schema::*;
