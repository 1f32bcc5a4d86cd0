//! Shared test doubles.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use crate::domain::{ClassProbabilities, FeatureVector, Symptom};
use crate::ports::{Classifier, ClassifierError};

pub(crate) const NO_SYMPTOMS: [Symptom; 0] = [];

/// Classifier returning canned answers and recording every row it sees.
pub(crate) struct StubClassifier {
    class: i64,
    probabilities: [f64; 3],
    fail: bool,
    pub predict_calls: AtomicUsize,
    pub proba_calls: AtomicUsize,
    pub seen: Mutex<Vec<[f64; 8]>>,
}

impl StubClassifier {
    pub(crate) fn new(class: i64, probabilities: [f64; 3]) -> Self {
        Self {
            class,
            probabilities,
            fail: false,
            predict_calls: AtomicUsize::new(0),
            proba_calls: AtomicUsize::new(0),
            seen: Mutex::new(Vec::new()),
        }
    }

    pub(crate) fn failing() -> Self {
        Self {
            fail: true,
            ..Self::new(0, [1.0, 0.0, 0.0])
        }
    }

    pub(crate) fn calls(&self) -> usize {
        self.predict_calls.load(Ordering::SeqCst) + self.proba_calls.load(Ordering::SeqCst)
    }
}

impl Classifier for StubClassifier {
    fn predict(&self, features: &FeatureVector) -> Result<i64, ClassifierError> {
        self.predict_calls.fetch_add(1, Ordering::SeqCst);
        self.seen.lock().expect("seen lock").push(features.into_array());
        if self.fail {
            return Err(ClassifierError::Internal("stub failure".into()));
        }
        Ok(self.class)
    }

    fn predict_proba(
        &self,
        features: &FeatureVector,
    ) -> Result<ClassProbabilities, ClassifierError> {
        self.proba_calls.fetch_add(1, Ordering::SeqCst);
        self.seen.lock().expect("seen lock").push(features.into_array());
        if self.fail {
            return Err(ClassifierError::Internal("stub failure".into()));
        }
        Ok(ClassProbabilities::from(self.probabilities))
    }
}
