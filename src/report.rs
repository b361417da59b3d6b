//! Missing-translation reporting
//!
//! When a key misses every configured catalog tier, the reporter
//! decides what happens: silent suppression for ignorable keys, a log
//! record, a hard failure, or a [`MissingTranslationFound`] event for
//! external subscribers. Suppression is checked first; a hard failure
//! short-circuits event dispatch.

use std::collections::HashMap;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;

use crate::config::TranslationConfig;
use crate::error::{TranslationError, TranslationResult};
use crate::replace::Replacements;

/// Keys of this shape come from translatable custom validation values
/// (`validation.values.<attribute>.<value>`). The value part is user
/// input and may be empty, leaving a trailing dot as in
/// `validation.values.iban.` — these keys are expected to miss.
const CUSTOM_VALUES_PATTERN: &str = "validation.values.";

/// Event emitted when a key misses every configured catalog
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MissingTranslationFound {
    pub key: String,
    pub replacements: HashMap<String, String>,
    pub locale: String,
    /// The fallback locale when the lookup asked for fallback, empty
    /// otherwise
    pub fallback_locale: String,
}

/// Subscriber notified of every reportable missing translation
///
/// Dispatch is fire-and-forget; nothing is consumed from the observer.
/// Typical subscribers persist missing keys for later translation.
pub trait MissingTranslationObserver: Send + Sync {
    fn missing_translation_found(&self, event: &MissingTranslationFound);
}

pub(crate) struct Reporter {
    log: bool,
    log_file: Option<PathBuf>,
    throw_exceptions: bool,
    ignore_missing: Vec<String>,
    observers: Vec<Box<dyn MissingTranslationObserver>>,
}

impl Reporter {
    pub(crate) fn new(config: &TranslationConfig) -> Self {
        Self {
            log: config.log,
            log_file: config.log_file.clone(),
            throw_exceptions: config.throw_exceptions,
            ignore_missing: config.ignore_missing.clone(),
            observers: Vec::new(),
        }
    }

    pub(crate) fn subscribe(&mut self, observer: Box<dyn MissingTranslationObserver>) {
        self.observers.push(observer);
    }

    /// Run the missing-key policy; returns the key verbatim unless hard
    /// failure is enabled
    pub(crate) fn report(
        &self,
        key: &str,
        replacements: &Replacements,
        locale: &str,
        fallback_locale: Option<&str>,
    ) -> TranslationResult<String> {
        if self.should_ignore(key) {
            return Ok(key.to_owned());
        }

        if self.log {
            self.log_missing(key, replacements, locale, fallback_locale);
        }

        if self.throw_exceptions {
            return Err(TranslationError::MissingTranslation(key.to_owned()));
        }

        let event = MissingTranslationFound {
            key: key.to_owned(),
            replacements: replacements.as_map().clone(),
            locale: locale.to_owned(),
            fallback_locale: fallback_locale.unwrap_or("").to_owned(),
        };
        for observer in &self.observers {
            observer.missing_translation_found(&event);
        }

        Ok(key.to_owned())
    }

    fn should_ignore(&self, key: &str) -> bool {
        key.contains(CUSTOM_VALUES_PATTERN)
            || self.ignore_missing.iter().any(|pattern| key.contains(pattern))
    }

    fn log_missing(
        &self,
        key: &str,
        replacements: &Replacements,
        locale: &str,
        fallback_locale: Option<&str>,
    ) {
        log::info!(
            target: "lost_in_translation",
            "Missing translation: {} (locale: {}, fallback: {}, replacements: {:?})",
            key,
            locale,
            fallback_locale.unwrap_or(""),
            replacements.as_map()
        );

        if let Some(path) = &self.log_file {
            if let Err(e) = append_log_line(path, key) {
                log::warn!(
                    "Failed to write missing-translation log '{}': {}",
                    path.display(),
                    e
                );
            }
        }
    }
}

fn append_log_line(path: &Path, key: &str) -> std::io::Result<()> {
    let timestamp = OffsetDateTime::now_utc()
        .format(&Rfc3339)
        .map_err(std::io::Error::other)?;
    let mut file = OpenOptions::new().create(true).append(true).open(path)?;
    writeln!(file, "{} {}", timestamp, key)
}
