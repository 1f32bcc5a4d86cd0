//! Application layer: Use cases and services.
//!
//! This module orchestrates domain logic with the classifier port to
//! implement the form submission use case.

mod assessment;
mod report;

pub use assessment::AssessmentService;
pub use report::{Advisory, AssessmentReport};
