//! Manifest utility for Childrisk model artifacts.
//!
//! Writes `manifest.json` binding every model JSON file in a directory to its
//! SHA-256 digest, so the application can verify the artifact at startup.
//!
//! # Usage
//!
//! ```bash
//! cargo run --bin hash_model -- <model_dir>
//! ```
//!
//! Each file is parsed and validated as a model before it is bound; a corrupt
//! artifact is never written into a manifest.

use std::env;
use std::fs;
use std::path::PathBuf;

use anyhow::{anyhow, bail, Context, Result};

use childrisk::adapters::logistic::{
    ExportedLogisticModel, LogisticModel, ModelManifest, MANIFEST_FILE_NAME,
};

fn usage() -> String {
    "Usage: hash_model <model_dir>".to_string()
}

fn parse_args() -> Result<PathBuf> {
    let mut args = env::args().skip(1);
    let mut model_dir: Option<PathBuf> = None;

    for arg in args.by_ref() {
        match arg.as_str() {
            "-h" | "--help" => bail!(usage()),
            _ => {
                if model_dir.is_some() {
                    bail!(usage());
                }
                model_dir = Some(PathBuf::from(arg));
            }
        }
    }

    model_dir.ok_or_else(|| anyhow!(usage()))
}

fn main() -> Result<()> {
    let model_dir = parse_args()?;

    let model_dir = if model_dir.is_file() {
        model_dir
            .parent()
            .ok_or_else(|| anyhow!("Model path has no parent directory"))?
            .to_path_buf()
    } else {
        model_dir
    };

    let mut names: Vec<String> = Vec::new();
    for entry in fs::read_dir(&model_dir)
        .with_context(|| format!("Failed to read directory {}", model_dir.display()))?
    {
        let path = entry?.path();
        let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
            continue;
        };
        if !name.ends_with(".json") || name == MANIFEST_FILE_NAME || !path.is_file() {
            continue;
        }

        // Parse directly: a stale manifest must not block re-hashing.
        let content = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let exported: ExportedLogisticModel = serde_json::from_str(&content)
            .with_context(|| format!("{name} is not a valid model artifact"))?;
        LogisticModel::from_exported(exported)
            .with_context(|| format!("{name} is not a valid model artifact"))?;
        names.push(name.to_string());
    }

    if names.is_empty() {
        bail!("No model JSON found in {}", model_dir.display());
    }
    names.sort();

    let manifest = ModelManifest::for_files(&model_dir, names.iter().map(String::as_str))?;
    let out_path = model_dir.join(MANIFEST_FILE_NAME);
    let mut json = serde_json::to_string_pretty(&manifest)?;
    json.push('\n');
    fs::write(&out_path, json)
        .with_context(|| format!("Failed to write {}", out_path.display()))?;

    println!("Wrote {}", out_path.display());
    for (name, digest) in &manifest.files {
        println!("  {name}  {digest}");
    }

    Ok(())
}
