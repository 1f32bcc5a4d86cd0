//! Environment-driven configuration.
//!
//! | Variable | Default | Meaning |
//! |----------|---------|---------|
//! | `CHILDRISK_MODEL_PATH` | `models` | Model file, or directory containing `childrisklevel.json` |
//! | `CHILDRISK_REQUIRE_MODEL_MANIFEST` | `false` | Refuse to start without a `manifest.json` binding the model |
//! | `CHILDRISK_LANGUAGE` | `English` | Initial value of the language selector |
//! | `CHILDRISK_LOG_MODE` | `auto` | `auto`, `file` or `stdout` |
//! | `CHILDRISK_LOG_FILE` | `childrisk.log` | Log file used in `file` mode |

use std::path::PathBuf;

use crate::domain::Language;

const MODEL_PATH_ENV: &str = "CHILDRISK_MODEL_PATH";
const REQUIRE_MANIFEST_ENV: &str = "CHILDRISK_REQUIRE_MODEL_MANIFEST";
const LANGUAGE_ENV: &str = "CHILDRISK_LANGUAGE";
const LOG_MODE_ENV: &str = "CHILDRISK_LOG_MODE";
const LOG_FILE_ENV: &str = "CHILDRISK_LOG_FILE";

/// Where log output goes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogMode {
    /// File when stdout is a terminal (the TUI owns it), stdout otherwise.
    #[default]
    Auto,
    File,
    Stdout,
}

impl LogMode {
    fn parse(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "file" => Self::File,
            "stdout" => Self::Stdout,
            _ => Self::Auto,
        }
    }

    /// Resolve `Auto` against whether stdout is interactive.
    #[must_use]
    pub fn use_file(self, interactive: bool) -> bool {
        match self {
            Self::File => true,
            Self::Stdout => false,
            Self::Auto => interactive,
        }
    }
}

/// Application configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub model_path: PathBuf,
    pub require_manifest: bool,
    pub language: Language,
    pub log_mode: LogMode,
    pub log_file: PathBuf,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            model_path: PathBuf::from("models"),
            require_manifest: false,
            language: Language::English,
            log_mode: LogMode::Auto,
            log_file: PathBuf::from("childrisk.log"),
        }
    }
}

impl AppConfig {
    /// Read configuration from the process environment.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build configuration from an arbitrary variable lookup.
    ///
    /// Unparseable values fall back to their defaults with a warning.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();

        let language = match lookup(LANGUAGE_ENV) {
            Some(value) => value.parse().unwrap_or_else(|e| {
                tracing::warn!("{LANGUAGE_ENV}: {e}; using {}", defaults.language);
                defaults.language
            }),
            None => defaults.language,
        };

        Self {
            model_path: lookup(MODEL_PATH_ENV)
                .map(PathBuf::from)
                .unwrap_or(defaults.model_path),
            require_manifest: lookup(REQUIRE_MANIFEST_ENV)
                .map(|v| parse_bool(&v))
                .unwrap_or(defaults.require_manifest),
            language,
            log_mode: lookup(LOG_MODE_ENV)
                .map(|v| LogMode::parse(&v))
                .unwrap_or(defaults.log_mode),
            log_file: lookup(LOG_FILE_ENV)
                .map(PathBuf::from)
                .unwrap_or(defaults.log_file),
        }
    }
}

fn parse_bool(value: &str) -> bool {
    matches!(value, "1" | "true" | "TRUE" | "yes" | "YES")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = AppConfig::from_lookup(|_| None);
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.model_path, PathBuf::from("models"));
        assert!(!config.require_manifest);
    }

    #[test]
    fn test_overrides() {
        let config = AppConfig::from_lookup(lookup_from(&[
            ("CHILDRISK_MODEL_PATH", "/srv/models/childrisklevel.json"),
            ("CHILDRISK_REQUIRE_MODEL_MANIFEST", "yes"),
            ("CHILDRISK_LANGUAGE", "Swahili"),
            ("CHILDRISK_LOG_MODE", "stdout"),
            ("CHILDRISK_LOG_FILE", "/tmp/cr.log"),
        ]));

        assert_eq!(
            config.model_path,
            PathBuf::from("/srv/models/childrisklevel.json")
        );
        assert!(config.require_manifest);
        assert_eq!(config.language, Language::Swahili);
        assert_eq!(config.log_mode, LogMode::Stdout);
        assert_eq!(config.log_file, PathBuf::from("/tmp/cr.log"));
    }

    #[test]
    fn test_bad_values_fall_back() {
        let config = AppConfig::from_lookup(lookup_from(&[
            ("CHILDRISK_LANGUAGE", "Klingon"),
            ("CHILDRISK_REQUIRE_MODEL_MANIFEST", "maybe"),
            ("CHILDRISK_LOG_MODE", "syslog"),
        ]));
        assert_eq!(config.language, Language::English);
        assert!(!config.require_manifest);
        assert_eq!(config.log_mode, LogMode::Auto);
    }

    #[test]
    fn test_log_mode_resolution() {
        assert!(LogMode::Auto.use_file(true));
        assert!(!LogMode::Auto.use_file(false));
        assert!(LogMode::File.use_file(false));
        assert!(!LogMode::Stdout.use_file(true));
    }
}
