//! Logistic adapter: Implementation of `Classifier` backed by a JSON model export.
//!
//! The artifact is a multinomial logistic regression with a standard scaler:
//!
//! ```text
//! z_i      = (x_i - scaler_mean_i) / scaler_scale_i
//! score_k  = intercept_k + Σ_i coefficients[k][i] * z_i
//! p        = softmax(score)
//! class    = argmax(p)
//! ```
//!
//! # Load-time checks
//!
//! Nothing at runtime can tell whether the artifact's class order matches the
//! `Low/Medium/High` mapping, so loading refuses any model that does not
//! declare exactly the expected feature names (in order) and the class labels
//! `[0, 1, 2]`.
//!
//! If a `manifest.json` sits next to the model, the model file must be bound
//! by it and every bound file must match its SHA-256 digest.

mod manifest;

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::domain::{ClassProbabilities, FeatureVector, EXPECTED_CLASSES, FEATURE_NAMES};
use crate::ports::{Classifier, ClassifierError};

pub use manifest::{sha256_hex, ModelManifest, MANIFEST_FILE_NAME};

/// Default model file name inside the model directory.
pub const MODEL_FILE_NAME: &str = "childrisklevel.json";

/// Only supported export format.
const FORMAT_VERSION: u32 = 1;

/// Error type for loading the model artifact.
#[derive(Debug, thiserror::Error)]
pub enum ModelError {
    #[error("Model not found at {0:?}")]
    NotFound(PathBuf),

    #[error("Failed to read {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid model format: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Model rejected: {0}")]
    Invalid(String),

    #[error("Model integrity check failed: {0}")]
    Integrity(String),
}

/// Model parameters as exported by the training pipeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportedLogisticModel {
    pub format_version: u32,
    pub feature_names: Vec<String>,
    pub classes: Vec<i64>,
    pub scaler_mean: Vec<f64>,
    pub scaler_scale: Vec<f64>,
    pub coefficients: Vec<Vec<f64>>,
    pub intercepts: Vec<f64>,
}

impl ExportedLogisticModel {
    /// Check the export against the fixed feature order and class mapping.
    ///
    /// # Errors
    /// Returns `ModelError::Invalid` describing the first problem found.
    pub fn validate(&self) -> Result<(), ModelError> {
        if self.format_version != FORMAT_VERSION {
            return Err(ModelError::Invalid(format!(
                "Unsupported format_version {} (expected {FORMAT_VERSION})",
                self.format_version
            )));
        }

        if self.feature_names.len() != FEATURE_NAMES.len()
            || self
                .feature_names
                .iter()
                .zip(FEATURE_NAMES.iter())
                .any(|(got, want)| got != want)
        {
            return Err(ModelError::Invalid(format!(
                "Feature names {:?} do not match expected order {:?}",
                self.feature_names, FEATURE_NAMES
            )));
        }

        if self.classes != EXPECTED_CLASSES {
            return Err(ModelError::Invalid(format!(
                "Class labels {:?} do not match expected {:?}",
                self.classes, EXPECTED_CLASSES
            )));
        }

        let n_features = FEATURE_NAMES.len();
        let n_classes = EXPECTED_CLASSES.len();

        if self.scaler_mean.len() != n_features || self.scaler_scale.len() != n_features {
            return Err(ModelError::Invalid(
                "Scaler parameter lengths do not match feature_names length".into(),
            ));
        }
        if self.intercepts.len() != n_classes || self.coefficients.len() != n_classes {
            return Err(ModelError::Invalid(
                "Intercept/coefficient rows do not match classes length".into(),
            ));
        }
        if self.coefficients.iter().any(|row| row.len() != n_features) {
            return Err(ModelError::Invalid(
                "Coefficient row length does not match feature_names length".into(),
            ));
        }

        let mut all_values = self
            .scaler_mean
            .iter()
            .chain(&self.scaler_scale)
            .chain(&self.intercepts)
            .chain(self.coefficients.iter().flatten());
        if all_values.any(|v| !v.is_finite()) {
            return Err(ModelError::Invalid("Model contains non-finite values".into()));
        }
        if self.scaler_scale.iter().any(|s| *s <= 0.0) {
            return Err(ModelError::Invalid(
                "scaler_scale values must be > 0".into(),
            ));
        }

        Ok(())
    }
}

/// Multinomial logistic classifier loaded from the JSON export.
#[derive(Debug, Clone)]
pub struct LogisticModel {
    model: ExportedLogisticModel,
    source: Option<PathBuf>,
}

impl LogisticModel {
    /// Build a classifier from already-parsed parameters.
    ///
    /// # Errors
    /// Returns `ModelError::Invalid` if the parameters fail validation.
    pub fn from_exported(model: ExportedLogisticModel) -> Result<Self, ModelError> {
        model.validate()?;
        Ok(Self {
            model,
            source: None,
        })
    }

    /// Load the model from a file, or from `MODEL_FILE_NAME` inside a directory.
    /// A directory without `MODEL_FILE_NAME` whose manifest binds exactly one
    /// file loads that file instead.
    ///
    /// With `require_manifest`, loading fails unless a `manifest.json` binds
    /// the model file.
    ///
    /// # Errors
    /// Returns `ModelError` if the artifact is missing, unreadable, corrupt,
    /// mismatched with the expected schema, or fails integrity checks.
    pub fn load(path: &Path, require_manifest: bool) -> Result<Self, ModelError> {
        if !path.exists() {
            return Err(ModelError::NotFound(path.to_path_buf()));
        }

        let base_dir = if path.is_dir() {
            path.to_path_buf()
        } else {
            path.parent()
                .filter(|p| !p.as_os_str().is_empty())
                .unwrap_or_else(|| Path::new("."))
                .to_path_buf()
        };

        let manifest = ModelManifest::load_and_verify(&base_dir)?;

        let model_path = if path.is_dir() {
            let default_path = base_dir.join(MODEL_FILE_NAME);
            match manifest.as_ref().and_then(ModelManifest::sole_file) {
                Some(bound) if !default_path.exists() => base_dir.join(bound),
                _ => default_path,
            }
        } else {
            path.to_path_buf()
        };

        if !model_path.exists() {
            return Err(ModelError::NotFound(model_path));
        }

        let file_name = model_path
            .file_name()
            .and_then(|n| n.to_str())
            .ok_or_else(|| ModelError::Invalid(format!("Invalid model path {:?}", model_path)))?
            .to_string();

        match manifest {
            Some(manifest) => {
                if !manifest.binds(&file_name) {
                    return Err(ModelError::Integrity(format!(
                        "manifest.json does not bind {file_name}"
                    )));
                }
            }
            None if require_manifest => {
                tracing::error!(
                    "Model manifest not found in {:?} and a manifest is required",
                    base_dir
                );
                return Err(ModelError::Integrity(format!(
                    "{MANIFEST_FILE_NAME} required but not found in {:?}",
                    base_dir
                )));
            }
            None => {
                tracing::warn!("Loading model without integrity manifest from {:?}", model_path);
            }
        }

        let content = fs::read_to_string(&model_path).map_err(|source| ModelError::Io {
            path: model_path.clone(),
            source,
        })?;
        let exported: ExportedLogisticModel = serde_json::from_str(&content)?;

        let mut model = Self::from_exported(exported)?;
        model.source = Some(model_path.clone());

        tracing::info!(
            "Loaded model from {:?} (n_features={}, n_classes={})",
            model_path,
            model.model.feature_names.len(),
            model.model.classes.len()
        );

        Ok(model)
    }

    /// Path the model was loaded from, if it came from disk.
    #[must_use]
    pub fn source(&self) -> Option<&Path> {
        self.source.as_deref()
    }

    /// Exported parameters.
    #[must_use]
    pub fn parameters(&self) -> &ExportedLogisticModel {
        &self.model
    }

    fn decision_scores(&self, features: &FeatureVector) -> [f64; 3] {
        let x = features.as_slice();
        let mut scores = [0.0; 3];

        for (k, score) in scores.iter_mut().enumerate() {
            let mut acc = self.model.intercepts[k];
            for (i, value) in x.iter().enumerate() {
                let z = (value - self.model.scaler_mean[i]) / self.model.scaler_scale[i];
                acc += self.model.coefficients[k][i] * z;
            }
            *score = acc;
        }

        scores
    }
}

/// Numerically stable softmax.
#[must_use]
pub fn softmax(scores: [f64; 3]) -> [f64; 3] {
    let max = scores.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let exps = scores.map(|s| (s - max).exp());
    let total: f64 = exps.iter().sum();
    exps.map(|e| e / total)
}

impl Classifier for LogisticModel {
    fn predict(&self, features: &FeatureVector) -> Result<i64, ClassifierError> {
        let probabilities = self.predict_proba(features)?;
        Ok(probabilities.most_likely().class_index())
    }

    fn predict_proba(&self, features: &FeatureVector) -> Result<ClassProbabilities, ClassifierError> {
        if features.as_slice().iter().any(|v| !v.is_finite()) {
            return Err(ClassifierError::NonFinite);
        }

        let probabilities = softmax(self.decision_scores(features));
        if probabilities.iter().any(|p| !p.is_finite()) {
            return Err(ClassifierError::NonFinite);
        }

        Ok(ClassProbabilities::from(probabilities))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{AssessmentInput, RiskLevel, Symptom};
    use tempfile::tempdir;

    const NO_SYMPTOMS: [Symptom; 0] = [];

    fn bundled_model_dir() -> PathBuf {
        Path::new(env!("CARGO_MANIFEST_DIR")).join("models")
    }

    fn test_export() -> ExportedLogisticModel {
        ExportedLogisticModel {
            format_version: 1,
            feature_names: FEATURE_NAMES.iter().map(|s| s.to_string()).collect(),
            classes: vec![0, 1, 2],
            scaler_mean: vec![0.0; 8],
            scaler_scale: vec![1.0; 8],
            // Fever pushes towards High, age pushes towards Low.
            coefficients: vec![
                vec![0.5, -2.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0],
                vec![0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0],
                vec![-0.5, 2.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0],
            ],
            intercepts: vec![0.0, 0.5, 0.0],
        }
    }

    fn write_model(dir: &Path, model: &ExportedLogisticModel) -> PathBuf {
        let path = dir.join(MODEL_FILE_NAME);
        fs::write(&path, serde_json::to_vec_pretty(model).expect("serialize model"))
            .expect("write model");
        path
    }

    #[test]
    fn test_softmax_sums_to_one() {
        let p = softmax([1000.0, 999.0, -1000.0]);
        assert!((p.iter().sum::<f64>() - 1.0).abs() < 1e-12);
        assert!(p[0] > p[1] && p[1] > p[2]);
    }

    #[test]
    fn test_predict_matches_predict_proba() {
        let model = LogisticModel::from_exported(test_export()).expect("valid model");
        let features = FeatureVector::from([1.0, 1.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0]);

        let proba = model.predict_proba(&features).expect("proba");
        let class = model.predict(&features).expect("class");
        assert_eq!(class, RiskLevel::High.class_index());
        assert_eq!(proba.most_likely(), RiskLevel::High);
        assert!((proba.sum() - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_rejects_reordered_features() {
        let mut export = test_export();
        export.feature_names.swap(1, 2);
        let err = LogisticModel::from_exported(export).expect_err("must reject");
        assert!(matches!(err, ModelError::Invalid(msg) if msg.contains("Feature names")));
    }

    #[test]
    fn test_rejects_reordered_classes() {
        let mut export = test_export();
        export.classes = vec![2, 1, 0];
        let err = LogisticModel::from_exported(export).expect_err("must reject");
        assert!(matches!(err, ModelError::Invalid(msg) if msg.contains("Class labels")));
    }

    #[test]
    fn test_rejects_bad_shapes_and_values() {
        let mut export = test_export();
        export.coefficients[1].pop();
        assert!(LogisticModel::from_exported(export).is_err());

        let mut export = test_export();
        export.scaler_scale[3] = 0.0;
        assert!(LogisticModel::from_exported(export).is_err());

        let mut export = test_export();
        export.intercepts[0] = f64::NAN;
        assert!(LogisticModel::from_exported(export).is_err());

        let mut export = test_export();
        export.format_version = 2;
        assert!(LogisticModel::from_exported(export).is_err());
    }

    #[test]
    fn test_load_missing_path() {
        let temp = tempdir().expect("tempdir");
        let err = LogisticModel::load(&temp.path().join("nope"), false).expect_err("missing");
        assert!(matches!(err, ModelError::NotFound(_)));

        let err = LogisticModel::load(temp.path(), false).expect_err("empty dir");
        assert!(matches!(err, ModelError::NotFound(_)));
    }

    #[test]
    fn test_load_corrupt_file() {
        let temp = tempdir().expect("tempdir");
        fs::write(temp.path().join(MODEL_FILE_NAME), b"not json").expect("write");
        let err = LogisticModel::load(temp.path(), false).expect_err("corrupt");
        assert!(matches!(err, ModelError::Parse(_)));
    }

    #[test]
    fn test_load_from_file_path() {
        let temp = tempdir().expect("tempdir");
        let path = write_model(temp.path(), &test_export());

        let model = LogisticModel::load(&path, false).expect("load");
        assert_eq!(model.source(), Some(path.as_path()));
        assert_eq!(model.parameters(), &test_export());
    }

    #[test]
    fn test_require_manifest() {
        let temp = tempdir().expect("tempdir");
        write_model(temp.path(), &test_export());

        let err = LogisticModel::load(temp.path(), true).expect_err("manifest required");
        assert!(matches!(err, ModelError::Integrity(_)));

        let manifest =
            ModelManifest::for_files(temp.path(), [MODEL_FILE_NAME]).expect("build manifest");
        fs::write(
            temp.path().join(MANIFEST_FILE_NAME),
            serde_json::to_vec(&manifest).expect("serialize"),
        )
        .expect("write manifest");

        LogisticModel::load(temp.path(), true).expect("manifest present");
    }

    #[test]
    fn test_manifest_must_bind_model() {
        let temp = tempdir().expect("tempdir");
        write_model(temp.path(), &test_export());
        fs::write(temp.path().join("notes.json"), b"{}").expect("write");

        let manifest = ModelManifest::for_files(temp.path(), ["notes.json"]).expect("build");
        fs::write(
            temp.path().join(MANIFEST_FILE_NAME),
            serde_json::to_vec(&manifest).expect("serialize"),
        )
        .expect("write manifest");

        let err = LogisticModel::load(temp.path(), false).expect_err("unbound model");
        assert!(matches!(err, ModelError::Integrity(msg) if msg.contains("does not bind")));
    }

    #[test]
    fn test_directory_loads_sole_manifest_file() {
        let temp = tempdir().expect("tempdir");
        let path = temp.path().join("model_v2.json");
        fs::write(&path, serde_json::to_vec(&test_export()).expect("serialize"))
            .expect("write model");

        let manifest =
            ModelManifest::for_files(temp.path(), ["model_v2.json"]).expect("build manifest");
        fs::write(
            temp.path().join(MANIFEST_FILE_NAME),
            serde_json::to_vec(&manifest).expect("serialize"),
        )
        .expect("write manifest");

        let model = LogisticModel::load(temp.path(), true).expect("bound model");
        assert_eq!(model.source(), Some(path.as_path()));

        // Ambiguous manifests fall back to the default name.
        fs::write(temp.path().join("notes.json"), b"{}").expect("write");
        let manifest = ModelManifest::for_files(temp.path(), ["model_v2.json", "notes.json"])
            .expect("build manifest");
        fs::write(
            temp.path().join(MANIFEST_FILE_NAME),
            serde_json::to_vec(&manifest).expect("serialize"),
        )
        .expect("write manifest");
        let err = LogisticModel::load(temp.path(), true).expect_err("no default model");
        assert!(matches!(err, ModelError::NotFound(_)));
    }

    #[test]
    fn test_bundled_model_loads_with_manifest() {
        let model = LogisticModel::load(&bundled_model_dir(), true).expect("bundled model");
        assert_eq!(model.parameters().classes, EXPECTED_CLASSES.to_vec());
    }

    #[test]
    fn test_bundled_model_behaviour() {
        let model = LogisticModel::load(&bundled_model_dir(), false).expect("bundled model");

        let healthy = AssessmentInput::new("a", 10, NO_SYMPTOMS).expect("valid").to_features();
        assert_eq!(model.predict(&healthy).expect("predict"), 0);

        let all = AssessmentInput::new("a", 1, Symptom::ALL).expect("valid").to_features();
        assert_eq!(model.predict(&all).expect("predict"), 2);

        for age in 0..=18 {
            for symptom in Symptom::ALL {
                let features = AssessmentInput::new("a", age, [symptom])
                    .expect("valid")
                    .to_features();
                let proba = model.predict_proba(&features).expect("proba");
                assert!((proba.sum() * 100.0 - 100.0).abs() < 0.1);
            }
        }
    }
}
