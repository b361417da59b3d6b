//! Common-attribute resolution
//!
//! Some placeholder values appear in many templates but come from the
//! catalogs themselves — a brand name, a support address. The
//! configuration maps attribute names to translation keys; each key is
//! resolved through the translator and the resulting values are
//! injected into every lookup's replacement set. Resolved values are
//! cached for a short window so repeated lookups do not re-resolve
//! them.

use serde_json::Value;
use std::collections::HashMap;
use std::sync::Mutex;
use std::time::{Duration, Instant};

use crate::Translator;
use crate::error::{TranslationError, TranslationResult};

/// How long resolved common attributes stay cached
const COMMON_TTL: Duration = Duration::from_secs(300);

struct Computed {
    at: Instant,
    values: HashMap<String, String>,
}

/// TTL-cached resolver for the configured common-attribute table
pub struct CommonTranslations {
    ttl: Duration,
    computed: Mutex<Option<Computed>>,
}

impl CommonTranslations {
    pub fn new() -> Self {
        Self::with_ttl(COMMON_TTL)
    }

    pub fn with_ttl(ttl: Duration) -> Self {
        Self {
            ttl,
            computed: Mutex::new(None),
        }
    }

    /// Resolve the configured attributes, reusing the cached values
    /// while they are younger than the TTL
    ///
    /// With no `common_translations` configured this is a no-op that
    /// returns an empty map. A configured value that is not a mapping
    /// of attribute names to translation keys fails with
    /// [`TranslationError::InvalidConfig`] before any catalog lookup.
    ///
    /// Concurrent callers during a recomputation may briefly duplicate
    /// the work; the last finished computation is kept.
    pub fn attributes(&self, translator: &Translator) -> TranslationResult<HashMap<String, String>> {
        {
            let computed = self.computed.lock().unwrap_or_else(|e| e.into_inner());
            if let Some(computed) = computed.as_ref() {
                if computed.at.elapsed() < self.ttl {
                    return Ok(computed.values.clone());
                }
            }
        }

        // Computed outside the lock: each attribute resolves through the
        // translator, which must stay reachable for other callers.
        let values = self.compute(translator)?;

        let mut computed = self.computed.lock().unwrap_or_else(|e| e.into_inner());
        *computed = Some(Computed {
            at: Instant::now(),
            values: values.clone(),
        });
        Ok(values)
    }

    fn compute(&self, translator: &Translator) -> TranslationResult<HashMap<String, String>> {
        let Some(configured) = translator.config().common_translations.as_ref() else {
            return Ok(HashMap::new());
        };

        let Some(pairs) = configured.as_object() else {
            return Err(TranslationError::InvalidConfig(
                "common_translations must be a mapping of attribute names to translation keys"
                    .to_string(),
            ));
        };

        let mut values = HashMap::new();
        for (attribute, key) in pairs {
            let Value::String(key) = key else {
                return Err(TranslationError::InvalidConfig(format!(
                    "common_translations entry '{}' is not a translation key",
                    attribute
                )));
            };
            // Resolved without common-attribute injection: a common key
            // must not trigger another round of common resolution.
            values.insert(attribute.clone(), translator.resolve_plain(key)?);
        }
        Ok(values)
    }
}

impl Default for CommonTranslations {
    fn default() -> Self {
        Self::new()
    }
}
