//! Runtime configuration
//!
//! Every behavior toggle lives in one explicit struct handed to the
//! translator at construction; the engine never reads ambient global
//! state. Configuration can be built in code, parsed from a JSON
//! document, or read from the environment.

use serde::Deserialize;
use serde_json::Value;
use std::env;
use std::path::PathBuf;

use crate::error::{TranslationError, TranslationResult};

/// Configuration for translation resolution and missing-key reporting
///
/// # Example
///
/// ```ignore
/// use lost_in_translation::TranslationConfig;
///
/// let config = TranslationConfig {
///     throw_exceptions: true,
///     ..TranslationConfig::default()
/// };
/// ```
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct TranslationConfig {
    /// Log instances of missing translations
    pub log: bool,
    /// Turn unresolved lookups into a hard
    /// [`MissingTranslation`](TranslationError::MissingTranslation) failure
    pub throw_exceptions: bool,
    /// Root of the brand override catalog; `None` skips the brand tier
    /// entirely
    pub translation_brand_path: Option<PathBuf>,
    /// Plain-text log of missing keys, appended to on every report
    pub log_file: Option<PathBuf>,
    /// Common-attribute table: a mapping of attribute name to the
    /// translation key that produces its value. Carried as a raw JSON
    /// value and validated when common attributes are first resolved,
    /// so a bad value fails the lookup that needs it, not startup.
    pub common_translations: Option<Value>,
    /// Key substrings whose misses are never reported
    pub ignore_missing: Vec<String>,
}

impl Default for TranslationConfig {
    fn default() -> Self {
        Self {
            log: true,
            throw_exceptions: false,
            translation_brand_path: None,
            log_file: None,
            common_translations: None,
            // validation.custom.document_number.required and friends are
            // produced from customer-uploaded input
            ignore_missing: vec!["validation.custom.".to_string()],
        }
    }
}

impl TranslationConfig {
    /// Parse a configuration document from JSON
    ///
    /// Unknown fields are ignored; absent fields keep their defaults.
    pub fn from_json_str(json: &str) -> TranslationResult<Self> {
        serde_json::from_str(json).map_err(|e| {
            TranslationError::InvalidConfig(format!("configuration is not valid JSON: {}", e))
        })
    }

    /// Read configuration from the environment
    ///
    /// | variable | option |
    /// |---|---|
    /// | `TRANS_LOG_MISSING` | `log` |
    /// | `TRANS_ERROR_ON_MISSING` | `throw_exceptions` |
    /// | `TRANS_BRAND_PATH` | `translation_brand_path` |
    /// | `TRANS_LOG_FILE` | `log_file` |
    ///
    /// Unset variables keep their defaults. The common-attribute table
    /// has no environment form; set it on the struct directly.
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(value) = env::var("TRANS_LOG_MISSING") {
            config.log = parse_bool(&value, config.log);
        }
        if let Ok(value) = env::var("TRANS_ERROR_ON_MISSING") {
            config.throw_exceptions = parse_bool(&value, config.throw_exceptions);
        }
        if let Ok(value) = env::var("TRANS_BRAND_PATH") {
            if !value.is_empty() {
                config.translation_brand_path = Some(PathBuf::from(value));
            }
        }
        if let Ok(value) = env::var("TRANS_LOG_FILE") {
            if !value.is_empty() {
                config.log_file = Some(PathBuf::from(value));
            }
        }

        config
    }
}

fn parse_bool(value: &str, default: bool) -> bool {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "on" | "yes" => true,
        "0" | "false" | "off" | "no" | "" => false,
        _ => default,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = TranslationConfig::default();
        assert!(config.log);
        assert!(!config.throw_exceptions);
        assert!(config.translation_brand_path.is_none());
        assert!(config.log_file.is_none());
        assert!(config.common_translations.is_none());
        assert_eq!(config.ignore_missing, vec!["validation.custom.".to_string()]);
    }

    #[test]
    fn test_from_json_str() {
        let config = TranslationConfig::from_json_str(
            r#"{
                "log": false,
                "throw_exceptions": true,
                "translation_brand_path": "/app/branding/rob/lang",
                "log_file": "/var/log/missing-translations.log",
                "common_translations": {"xxx": "service/branding.name"},
                "ignore_missing": ["validation.custom.", "emails.internal."]
            }"#,
        )
        .unwrap();

        assert!(!config.log);
        assert!(config.throw_exceptions);
        assert_eq!(
            config.translation_brand_path,
            Some(PathBuf::from("/app/branding/rob/lang"))
        );
        assert_eq!(
            config.log_file,
            Some(PathBuf::from("/var/log/missing-translations.log"))
        );
        assert_eq!(config.ignore_missing.len(), 2);
        assert!(config.common_translations.is_some());
    }

    #[test]
    fn test_from_json_str_partial_keeps_defaults() {
        let config = TranslationConfig::from_json_str(r#"{"throw_exceptions": true}"#).unwrap();
        assert!(config.log);
        assert!(config.throw_exceptions);
        assert_eq!(config.ignore_missing, vec!["validation.custom.".to_string()]);
    }

    #[test]
    fn test_from_json_str_rejects_garbage() {
        match TranslationConfig::from_json_str("{not json") {
            Err(TranslationError::InvalidConfig(msg)) => {
                assert!(msg.contains("not valid JSON"));
            }
            other => panic!("Expected InvalidConfig, got {:?}", other),
        }
    }

    #[test]
    fn test_from_json_str_accepts_non_mapping_common_translations() {
        // Validation of the table itself is deferred to resolution time
        let config =
            TranslationConfig::from_json_str(r#"{"common_translations": "oops"}"#).unwrap();
        assert_eq!(config.common_translations, Some(Value::from("oops")));
    }

    #[test]
    fn test_from_env() {
        temp_env::with_vars(
            [
                ("TRANS_LOG_MISSING", Some("0")),
                ("TRANS_ERROR_ON_MISSING", Some("true")),
                ("TRANS_BRAND_PATH", Some("/app/branding/rob/lang")),
                ("TRANS_LOG_FILE", Some("/var/log/missing.log")),
            ],
            || {
                let config = TranslationConfig::from_env();
                assert!(!config.log);
                assert!(config.throw_exceptions);
                assert_eq!(
                    config.translation_brand_path,
                    Some(PathBuf::from("/app/branding/rob/lang"))
                );
                assert_eq!(config.log_file, Some(PathBuf::from("/var/log/missing.log")));
            },
        );
    }

    #[test]
    fn test_from_env_empty_paths_stay_unset() {
        temp_env::with_vars(
            [
                ("TRANS_BRAND_PATH", Some("")),
                ("TRANS_LOG_FILE", Some("")),
            ],
            || {
                let config = TranslationConfig::from_env();
                assert!(config.translation_brand_path.is_none());
                assert!(config.log_file.is_none());
            },
        );
    }

    #[test]
    fn test_parse_bool_forms() {
        assert!(parse_bool("1", false));
        assert!(parse_bool("Yes", false));
        assert!(parse_bool("TRUE", false));
        assert!(!parse_bool("0", true));
        assert!(!parse_bool("off", true));
        assert!(parse_bool("gibberish", true));
        assert!(!parse_bool("gibberish", false));
    }
}
