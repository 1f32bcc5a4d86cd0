//! Domain layer: Core business types and logic.
//!
//! Pure Rust types with no I/O. The feature order, class mapping and
//! localization table live here so every other layer shares one definition.

mod assessment;
mod i18n;
mod risk;

pub use assessment::{AssessmentInput, FeatureVector, Symptom, ValidationError, FEATURE_NAMES, MAX_AGE, MIN_AGE};
pub use i18n::{translate, Language, MessageKey, LANGUAGE_SELECTOR_CAPTION};
pub use risk::{ClassProbabilities, DecodedRisk, RiskLevel, EXPECTED_CLASSES};
