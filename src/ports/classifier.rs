//! Classifier port: Trait for the pre-trained risk model.
//!
//! This trait abstracts the model artifact from the application logic.

use std::sync::Arc;

use crate::domain::{ClassProbabilities, FeatureVector};

/// Error raised by a single prediction call.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ClassifierError {
    #[error("Non-finite model output")]
    NonFinite,

    #[error("Classifier failure: {0}")]
    Internal(String),
}

/// Trait for risk classifiers.
///
/// Implementations are loaded once at startup and only read afterwards, so
/// they must be shareable across threads.
pub trait Classifier: Send + Sync {
    /// Predict the class index for one feature row.
    ///
    /// Trained models return `0`, `1` or `2`; callers must still tolerate
    /// any other value.
    ///
    /// # Errors
    /// Returns `ClassifierError` if the model cannot evaluate the row.
    fn predict(&self, features: &FeatureVector) -> Result<i64, ClassifierError>;

    /// Class probabilities `[p_low, p_medium, p_high]` for one feature row.
    ///
    /// # Errors
    /// Returns `ClassifierError` if the model cannot evaluate the row.
    fn predict_proba(&self, features: &FeatureVector) -> Result<ClassProbabilities, ClassifierError>;
}

impl<C: Classifier + ?Sized> Classifier for Arc<C> {
    fn predict(&self, features: &FeatureVector) -> Result<i64, ClassifierError> {
        (**self).predict(features)
    }

    fn predict_proba(&self, features: &FeatureVector) -> Result<ClassProbabilities, ClassifierError> {
        (**self).predict_proba(features)
    }
}

impl<C: Classifier + ?Sized> Classifier for Box<C> {
    fn predict(&self, features: &FeatureVector) -> Result<i64, ClassifierError> {
        (**self).predict(features)
    }

    fn predict_proba(&self, features: &FeatureVector) -> Result<ClassProbabilities, ClassifierError> {
        (**self).predict_proba(features)
    }
}
