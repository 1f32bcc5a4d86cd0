//! Adapters layer: Concrete implementations of ports.
//!
//! These modules contain the actual integration with external artifacts:
//! - `logistic`: JSON-exported multinomial logistic regression (the `Classifier`)
//! - `sanitize`: PII filtering for logs

pub mod logistic;
pub mod sanitize;

// Re-export model error for lib.rs
pub use logistic::ModelError;
