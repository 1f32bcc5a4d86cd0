//! # Childrisk
//!
//! Child illness risk checker.
//!
//! This crate provides:
//! - A bilingual (English/Swahili) terminal form collecting a child's age and symptoms
//! - Risk classification against a pre-trained, load-once model artifact
//! - Localized rendering of the predicted tier, class probabilities and guidance
//!
//! ## Architecture
//!
//! The crate follows Hexagonal Architecture:
//! - `domain`: Core types (Assessment input, Risk level, Localization table)
//! - `ports`: Trait definitions for external operations (the classifier)
//! - `adapters`: Concrete implementations (JSON logistic model, log sanitization)
//! - `application`: The submission use case and report composition
//! - `tui`: Terminal user interface
//! - `config`: Environment-driven configuration

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
pub mod tui;

#[cfg(test)]
mod test_support;

pub use domain::{AssessmentInput, DecodedRisk, Language, RiskLevel, Symptom};

/// Result type for Childrisk operations
pub type Result<T> = std::result::Result<T, ChildriskError>;

/// Main error type for Childrisk
#[derive(Debug, thiserror::Error)]
pub enum ChildriskError {
    #[error("Invalid assessment input: {0}")]
    Validation(#[from] domain::ValidationError),

    #[error("Model unavailable: {0}")]
    ModelUnavailable(#[from] adapters::ModelError),

    #[error("Prediction failed: {0}")]
    Prediction(#[from] ports::ClassifierError),
}
