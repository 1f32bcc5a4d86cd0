//! Assessment service: Orchestrates one form submission.
//!
//! This service coordinates:
//! - Input validation (blank names never reach the classifier)
//! - Feature vector construction
//! - Class and probability prediction on the same row
//! - Class decoding and report assembly

use std::sync::Arc;

use crate::domain::{AssessmentInput, DecodedRisk, RiskLevel, Symptom};
use crate::ports::Classifier;
use crate::Result;

use super::AssessmentReport;

/// Service for running risk assessments against a loaded classifier.
///
/// The classifier is shared read-only; the service holds no per-submission
/// state, so each call is independent.
pub struct AssessmentService<C>
where
    C: Classifier,
{
    classifier: Arc<C>,
}

impl<C> Clone for AssessmentService<C>
where
    C: Classifier,
{
    fn clone(&self) -> Self {
        Self {
            classifier: Arc::clone(&self.classifier),
        }
    }
}

impl<C> AssessmentService<C>
where
    C: Classifier,
{
    /// Create a new assessment service.
    pub fn new(classifier: Arc<C>) -> Self {
        Self { classifier }
    }

    /// The shared classifier.
    #[must_use]
    pub fn classifier(&self) -> &Arc<C> {
        &self.classifier
    }

    /// Validate raw form values and assess them.
    ///
    /// # Errors
    /// Returns `ChildriskError::Validation` for a blank name (the classifier
    /// is not called) and `ChildriskError::Prediction` if the classifier fails.
    pub fn submit(
        &self,
        name: &str,
        age: u8,
        symptoms: impl IntoIterator<Item = Symptom>,
    ) -> Result<AssessmentReport> {
        let input = AssessmentInput::new(name, age, symptoms).map_err(|e| {
            tracing::debug!("Submission rejected: {e}");
            e
        })?;
        self.assess(&input)
    }

    /// Run the classifier on a validated input.
    ///
    /// Performs the full pipeline:
    /// 1. Build the feature vector once
    /// 2. Predict the class
    /// 3. Predict class probabilities on the same vector
    /// 4. Decode the class (unmapped values become `Unknown`)
    ///
    /// # Errors
    /// Returns `ChildriskError::Prediction` if either classifier call fails.
    pub fn assess(&self, input: &AssessmentInput) -> Result<AssessmentReport> {
        let features = input.to_features();
        tracing::debug!(
            "Assessing {} features ({} symptom(s) reported)",
            features.as_slice().len(),
            input.symptoms().count()
        );

        let class = self.classifier.predict(&features)?;
        let probabilities = self.classifier.predict_proba(&features)?;

        let risk = DecodedRisk::decode(class);
        if risk == DecodedRisk::Unknown {
            tracing::warn!("Classifier returned unmapped class {class}; reporting Unknown");
        }

        tracing::info!(
            "Assessment complete: risk={}, low={}, medium={}, high={}",
            risk,
            probabilities.format_percent(RiskLevel::Low),
            probabilities.format_percent(RiskLevel::Medium),
            probabilities.format_percent(RiskLevel::High)
        );

        Ok(AssessmentReport {
            child_name: input.name().to_string(),
            age: input.age(),
            class,
            risk,
            probabilities,
            assessed_at: chrono::Utc::now(),
        })
    }
}
