//! Brand-aware translation resolution
//!
//! Looks up translation keys across two catalog tiers — an optional
//! brand override catalog consulted first, and a default catalog —
//! substitutes named placeholders (including configured "common"
//! attributes such as a brand name), and reports keys that resolve
//! nowhere. A key that misses every tier is echoed back verbatim, so
//! missing translations are self-evident in rendered output.
//!
//! # Example
//!
//! ```ignore
//! use lost_in_translation::{MemoryLoader, Replacements, TranslationConfig, Translator};
//!
//! let loader = MemoryLoader::new()
//!     .with_line("en", "greeting", "hello", "Hello, :name!");
//! let translator = Translator::new(loader, "en", TranslationConfig::default());
//!
//! let replacements = Replacements::new().with("name", "World");
//! let line = translator.resolve("greeting.hello", &replacements, None, true)?;
//! assert_eq!(line, "Hello, World!");
//! ```

use std::collections::HashMap;
use std::path::PathBuf;
use std::time::Duration;

pub mod catalog;
pub mod common;
pub mod config;
pub mod error;
pub mod key;
pub mod loader;
pub mod replace;
pub mod report;

pub use catalog::{Catalog, CatalogCache};
pub use common::CommonTranslations;
pub use config::TranslationConfig;
pub use error::{TranslationError, TranslationResult};
pub use loader::{CatalogLoader, FileLoader, MemoryLoader};
pub use replace::Replacements;
pub use report::{MissingTranslationFound, MissingTranslationObserver};

use key::ParsedKey;
use report::Reporter;

/// Two-tier translation resolver
///
/// Holds the default catalog, the optional brand override catalog, the
/// current and fallback locales, and the missing-key policy. All
/// configuration is passed in at construction; nothing is read from
/// ambient state. The catalog for each lookup is selected per call,
/// never by swapping engine-wide state, so a `Translator` can be shared
/// across threads.
pub struct Translator {
    default_catalog: Catalog,
    brand_catalog: Option<Catalog>,
    locale: String,
    fallback_locale: Option<String>,
    config: TranslationConfig,
    common: CommonTranslations,
    reporter: Reporter,
}

impl Translator {
    /// Create a translator over an injected default-catalog loader
    ///
    /// The brand tier starts disabled; enable it with
    /// [`with_brand_loader`](Self::with_brand_loader), or use
    /// [`from_path`](Self::from_path) to wire both tiers from
    /// filesystem catalogs.
    pub fn new(
        loader: impl CatalogLoader + 'static,
        locale: impl Into<String>,
        config: TranslationConfig,
    ) -> Self {
        let reporter = Reporter::new(&config);
        Self {
            default_catalog: Catalog::new(Box::new(loader)),
            brand_catalog: None,
            locale: locale.into(),
            fallback_locale: None,
            common: CommonTranslations::new(),
            reporter,
            config,
        }
    }

    /// Build both tiers from filesystem catalogs: the default tier
    /// rooted at `path`, the brand tier rooted at the configured
    /// `translation_brand_path` when set
    pub fn from_path(
        path: impl Into<PathBuf>,
        locale: impl Into<String>,
        config: TranslationConfig,
    ) -> Self {
        let brand_catalog = config
            .translation_brand_path
            .clone()
            .map(|brand_path| Catalog::new(Box::new(FileLoader::new(brand_path))));
        let mut translator = Self::new(FileLoader::new(path), locale, config);
        translator.brand_catalog = brand_catalog;
        translator
    }

    /// Enable the brand tier with an injected loader, builder style
    pub fn with_brand_loader(mut self, loader: impl CatalogLoader + 'static) -> Self {
        self.brand_catalog = Some(Catalog::new(Box::new(loader)));
        self
    }

    /// Set the fallback locale, builder style
    pub fn with_fallback(mut self, locale: impl Into<String>) -> Self {
        self.fallback_locale = Some(locale.into());
        self
    }

    /// Override the common-attribute cache TTL, builder style
    pub fn with_common_ttl(mut self, ttl: Duration) -> Self {
        self.common = CommonTranslations::with_ttl(ttl);
        self
    }

    /// Register a subscriber for missing-translation events
    pub fn subscribe(&mut self, observer: Box<dyn MissingTranslationObserver>) {
        self.reporter.subscribe(observer);
    }

    pub fn locale(&self) -> &str {
        &self.locale
    }

    pub fn fallback_locale(&self) -> Option<&str> {
        self.fallback_locale.as_deref()
    }

    pub fn config(&self) -> &TranslationConfig {
        &self.config
    }

    pub fn default_catalog(&self) -> &Catalog {
        &self.default_catalog
    }

    pub fn brand_catalog(&self) -> Option<&Catalog> {
        self.brand_catalog.as_ref()
    }

    /// Resolve a translation key
    ///
    /// Common attributes are merged into the replacement set first
    /// (caller-supplied values win on a name collision). The brand
    /// catalog, when configured, is consulted before the default
    /// catalog and a brand match wins unconditionally; partial results
    /// are never merged between tiers. When both tiers miss, the
    /// missing-key policy runs and the key itself is returned, unless
    /// hard failure is enabled.
    ///
    /// # Arguments
    ///
    /// * `key` - Translation key, e.g. `greeting.hello`
    /// * `replacements` - Placeholder values substituted into the match
    /// * `locale` - Locale override for this lookup; `None` uses the
    ///   translator's current locale
    /// * `fallback` - Whether a per-tier miss may retry with the
    ///   configured fallback locale
    ///
    /// # Returns
    ///
    /// * `Ok(String)` - The resolved line, or the key verbatim when
    ///   nothing resolves
    /// * `Err(TranslationError::MissingTranslation)` - Unresolved key
    ///   with `throw_exceptions` enabled
    /// * `Err(TranslationError::InvalidConfig)` - Unusable
    ///   `common_translations` configuration
    pub fn resolve(
        &self,
        key: &str,
        replacements: &Replacements,
        locale: Option<&str>,
        fallback: bool,
    ) -> TranslationResult<String> {
        self.resolve_inner(key, replacements, locale, fallback, true)
    }

    /// Resolve with the current locale and no replacements
    pub fn get(&self, key: &str) -> TranslationResult<String> {
        self.resolve(key, &Replacements::new(), None, true)
    }

    /// Resolve with the current locale
    pub fn get_with(&self, key: &str, replacements: &Replacements) -> TranslationResult<String> {
        self.resolve(key, replacements, None, true)
    }

    /// Whether the key resolves in any configured tier, without running
    /// the missing-key policy
    pub fn has(&self, key: &str) -> bool {
        self.lookup(key, &Replacements::new(), &self.locale, true)
            .is_some()
    }

    /// The resolved common-attribute table (possibly cached)
    pub fn common_attributes(&self) -> TranslationResult<HashMap<String, String>> {
        self.common.attributes(self)
    }

    /// Resolution without common-attribute injection, used to resolve
    /// the common-attribute keys themselves
    pub(crate) fn resolve_plain(&self, key: &str) -> TranslationResult<String> {
        self.resolve_inner(key, &Replacements::new(), None, true, false)
    }

    fn resolve_inner(
        &self,
        key: &str,
        replacements: &Replacements,
        locale: Option<&str>,
        fallback: bool,
        inject_common: bool,
    ) -> TranslationResult<String> {
        let effective = locale.unwrap_or(&self.locale);

        let merged: Replacements;
        let replacements = if inject_common {
            let common = self.common.attributes(self)?;
            if common.is_empty() {
                replacements
            } else {
                let mut with_common = replacements.clone();
                with_common.merge_defaults(&common);
                merged = with_common;
                &merged
            }
        } else {
            replacements
        };

        if let Some(line) = self.lookup(key, replacements, effective, fallback) {
            return Ok(line);
        }

        let fallback_locale = if fallback {
            self.fallback_locale.as_deref()
        } else {
            None
        };
        self.reporter
            .report(key, replacements, effective, fallback_locale)
    }

    /// Query the tiers in order: brand (when configured), then default
    fn lookup(
        &self,
        key: &str,
        replacements: &Replacements,
        locale: &str,
        fallback: bool,
    ) -> Option<String> {
        if let Some(brand) = &self.brand_catalog {
            if let Some(line) = self.catalog_line(brand, key, locale, fallback) {
                return Some(replace::apply(&line, replacements));
            }
        }
        self.catalog_line(&self.default_catalog, key, locale, fallback)
            .map(|line| replace::apply(&line, replacements))
    }

    /// A single-tier lookup: the requested locale first, then the
    /// fallback locale once, when asked for and different
    fn catalog_line(
        &self,
        catalog: &Catalog,
        key: &str,
        locale: &str,
        fallback: bool,
    ) -> Option<String> {
        let parsed = ParsedKey::parse(key);
        let item = parsed.item?;

        if let Some(line) = catalog.line(parsed.namespace, parsed.group, item, locale) {
            return Some(line);
        }

        if fallback {
            if let Some(fallback_locale) = self.fallback_locale.as_deref() {
                if fallback_locale != locale {
                    return catalog.line(parsed.namespace, parsed.group, item, fallback_locale);
                }
            }
        }
        None
    }
}
