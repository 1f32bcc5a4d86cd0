//! Integrity manifest binding model files to their SHA-256 digests.
//!
//! `manifest.json` lives next to the model artifact:
//!
//! ```json
//! { "version": 1, "created_at": 1760832000, "files": { "childrisklevel.json": "<sha256 hex>" } }
//! ```

use std::collections::BTreeMap;
use std::fs;
use std::path::{Component, Path};

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use super::ModelError;

/// File name of the manifest inside the model directory.
pub const MANIFEST_FILE_NAME: &str = "manifest.json";

const MANIFEST_VERSION: u32 = 1;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelManifest {
    pub version: u32,
    #[serde(default)]
    pub created_at: Option<i64>,
    pub files: BTreeMap<String, String>,
}

impl ModelManifest {
    /// Build a manifest binding `files` (relative to `base_dir`).
    ///
    /// # Errors
    /// Returns `ModelError::Io` if a file cannot be read.
    pub fn for_files<'a>(
        base_dir: &Path,
        files: impl IntoIterator<Item = &'a str>,
    ) -> Result<Self, ModelError> {
        let mut map = BTreeMap::new();
        for rel in files {
            let path = base_dir.join(rel);
            let bytes = fs::read(&path).map_err(|source| ModelError::Io {
                path: path.clone(),
                source,
            })?;
            map.insert(rel.to_string(), sha256_hex(&bytes));
        }

        Ok(Self {
            version: MANIFEST_VERSION,
            created_at: Some(chrono::Utc::now().timestamp()),
            files: map,
        })
    }

    /// Whether the manifest lists `file_name`.
    #[must_use]
    pub fn binds(&self, file_name: &str) -> bool {
        self.files.contains_key(file_name)
    }

    /// The bound file, when the manifest lists exactly one.
    #[must_use]
    pub fn sole_file(&self) -> Option<&str> {
        match self.files.len() {
            1 => self.files.keys().next().map(String::as_str),
            _ => None,
        }
    }

    /// Read `manifest.json` from `base_dir`, if present, and check every
    /// listed file against its digest.
    ///
    /// # Errors
    /// Returns `ModelError::Integrity` on an unsupported version, an empty
    /// file list, a missing file or a digest mismatch.
    pub fn load_and_verify(base_dir: &Path) -> Result<Option<Self>, ModelError> {
        let manifest_path = base_dir.join(MANIFEST_FILE_NAME);
        if !manifest_path.exists() {
            return Ok(None);
        }

        let content = fs::read(&manifest_path).map_err(|source| ModelError::Io {
            path: manifest_path.clone(),
            source,
        })?;
        let manifest: Self = serde_json::from_slice(&content)
            .map_err(|e| ModelError::Integrity(format!("Invalid manifest.json format: {e}")))?;

        if manifest.version != MANIFEST_VERSION {
            return Err(ModelError::Integrity(format!(
                "Unsupported manifest version: {}",
                manifest.version
            )));
        }
        if manifest.files.is_empty() {
            return Err(ModelError::Integrity(
                "manifest.json contains no files".into(),
            ));
        }

        for (rel, expected_hex) in &manifest.files {
            // Entries are plain names inside the model directory.
            if !Path::new(rel)
                .components()
                .all(|c| matches!(c, Component::Normal(_)))
            {
                return Err(ModelError::Integrity(format!(
                    "Manifest entry {rel:?} escapes the model directory"
                )));
            }
            let path = base_dir.join(rel);
            let bytes = fs::read(&path).map_err(|e| {
                ModelError::Integrity(format!(
                    "Manifest references missing/unreadable file {:?}: {e}",
                    path
                ))
            })?;

            if !constant_time_eq_str(&sha256_hex(&bytes), expected_hex.trim()) {
                return Err(ModelError::Integrity(format!("File hash mismatch for {rel}")));
            }
        }

        tracing::info!(
            "Model manifest verified ({} file(s) bound)",
            manifest.files.len()
        );
        Ok(Some(manifest))
    }
}

#[must_use]
pub fn sha256_hex(bytes: &[u8]) -> String {
    Sha256::digest(bytes)
        .iter()
        .map(|b| format!("{b:02x}"))
        .collect()
}

// Constant-time compare for ASCII strings (used for SHA-256 hex digests).
fn constant_time_eq_str(a: &str, b: &str) -> bool {
    if a.len() != b.len() {
        return false;
    }
    let mut diff: u8 = 0;
    for (x, y) in a.as_bytes().iter().zip(b.as_bytes().iter()) {
        diff |= x ^ y;
    }
    diff == 0
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_missing_manifest_is_none() {
        let temp = tempdir().expect("tempdir");
        assert!(ModelManifest::load_and_verify(temp.path())
            .expect("no manifest is fine")
            .is_none());
    }

    #[test]
    fn test_manifest_round_trip_verifies() {
        let temp = tempdir().expect("tempdir");
        let dir = temp.path();
        fs::write(dir.join("model.json"), b"{}").expect("write model");

        let manifest = ModelManifest::for_files(dir, ["model.json"]).expect("build manifest");
        fs::write(
            dir.join(MANIFEST_FILE_NAME),
            serde_json::to_vec_pretty(&manifest).expect("serialize"),
        )
        .expect("write manifest");

        let loaded = ModelManifest::load_and_verify(dir)
            .expect("verifies")
            .expect("present");
        assert!(loaded.binds("model.json"));
        assert!(!loaded.binds("other.json"));
    }

    #[test]
    fn test_tampered_file_rejected() {
        let temp = tempdir().expect("tempdir");
        let dir = temp.path();
        fs::write(dir.join("model.json"), b"{}").expect("write model");
        let manifest = ModelManifest::for_files(dir, ["model.json"]).expect("build manifest");
        fs::write(
            dir.join(MANIFEST_FILE_NAME),
            serde_json::to_vec(&manifest).expect("serialize"),
        )
        .expect("write manifest");

        fs::write(dir.join("model.json"), b"{\"tampered\":true}").expect("tamper");

        let err = ModelManifest::load_and_verify(dir).expect_err("must reject");
        assert!(matches!(err, ModelError::Integrity(msg) if msg.contains("hash mismatch")));
    }

    #[test]
    fn test_entries_outside_model_dir_rejected() {
        let temp = tempdir().expect("tempdir");
        let dir = temp.path().join("models");
        fs::create_dir(&dir).expect("mkdir");
        fs::write(temp.path().join("outside.json"), b"{}").expect("write outside");

        let outside = sha256_hex(b"{}");
        for rel in ["../outside.json", "/etc/hostname", "./outside.json"] {
            let manifest = ModelManifest {
                version: MANIFEST_VERSION,
                created_at: None,
                files: BTreeMap::from([(rel.to_string(), outside.clone())]),
            };
            fs::write(
                dir.join(MANIFEST_FILE_NAME),
                serde_json::to_vec(&manifest).expect("serialize"),
            )
            .expect("write manifest");

            let err = ModelManifest::load_and_verify(&dir).expect_err("must reject");
            assert!(
                matches!(&err, ModelError::Integrity(msg) if msg.contains("escapes")),
                "{rel}: {err}"
            );
        }
    }

    #[test]
    fn test_sole_file() {
        let mut manifest = ModelManifest {
            version: MANIFEST_VERSION,
            created_at: None,
            files: BTreeMap::from([("model_v2.json".to_string(), "00".to_string())]),
        };
        assert_eq!(manifest.sole_file(), Some("model_v2.json"));

        manifest.files.insert("other.json".to_string(), "11".to_string());
        assert_eq!(manifest.sole_file(), None);
    }

    #[test]
    fn test_sha256_hex_known_vector() {
        assert_eq!(
            sha256_hex(b"abc"),
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
    }

    #[test]
    fn test_constant_time_eq() {
        assert!(constant_time_eq_str("abcd", "abcd"));
        assert!(!constant_time_eq_str("abcd", "abce"));
        assert!(!constant_time_eq_str("abc", "abcd"));
    }
}
