//! Catalog loading
//!
//! A [`CatalogLoader`] turns a (locale, group, namespace) address into a
//! flat map of item paths to templates. The resolution engine never
//! interprets loader failures: a partition that cannot be produced is an
//! empty map, indistinguishable from a group with no entries.

use serde_json::Value;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use crate::key::GLOBAL_NAMESPACE;

/// Source of catalog partitions
///
/// Implementations return every line for the given locale, group and
/// namespace, keyed by the dot-joined item path. An address with no
/// backing data yields an empty map.
pub trait CatalogLoader: Send + Sync {
    fn load(&self, locale: &str, group: &str, namespace: &str) -> HashMap<String, String>;
}

/// Filesystem-backed catalog loader
///
/// Directory layout, rooted at the path given to [`FileLoader::new`]:
///
/// ```text
/// <root>/<locale>/<group>.json                       global namespace
/// <root>/vendor/<namespace>/<locale>/<group>.json    namespaced keys
/// ```
///
/// Groups may contain `/` subpaths, so `account/signup/general` maps to
/// `<root>/<locale>/account/signup/general.json`. Files are JSON
/// objects; nested objects are flattened into dot-joined item paths:
///
/// ```json
/// {
///     "hello": "Hello",
///     "custom": {
///         "document_number": {
///             "required": "The document number is required."
///         }
///     }
/// }
/// ```
///
/// yields the items `hello` and `custom.document_number.required`.
/// Non-string leaves are skipped with a warning. A missing or malformed
/// file yields an empty map.
#[derive(Debug, Clone)]
pub struct FileLoader {
    root: PathBuf,
}

impl FileLoader {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn group_path(&self, locale: &str, group: &str, namespace: &str) -> PathBuf {
        let base = if namespace == GLOBAL_NAMESPACE {
            self.root.clone()
        } else {
            self.root.join("vendor").join(namespace)
        };
        base.join(locale).join(format!("{}.json", group))
    }
}

impl CatalogLoader for FileLoader {
    fn load(&self, locale: &str, group: &str, namespace: &str) -> HashMap<String, String> {
        let path = self.group_path(locale, group, namespace);

        let content = match fs::read_to_string(&path) {
            Ok(content) => content,
            Err(_) => {
                log::debug!("No catalog file at '{}'", path.display());
                return HashMap::new();
            }
        };

        let json: Value = match serde_json::from_str(&content) {
            Ok(json) => json,
            Err(e) => {
                log::warn!("Failed to parse catalog file '{}': {}", path.display(), e);
                return HashMap::new();
            }
        };

        let Some(object) = json.as_object() else {
            log::warn!(
                "Invalid catalog file '{}': root must be an object",
                path.display()
            );
            return HashMap::new();
        };

        let mut lines = HashMap::new();
        flatten_into(&mut lines, "", object, &path);
        lines
    }
}

fn flatten_into(
    lines: &mut HashMap<String, String>,
    prefix: &str,
    object: &serde_json::Map<String, Value>,
    path: &Path,
) {
    for (key, value) in object {
        let item = if prefix.is_empty() {
            key.clone()
        } else {
            format!("{}.{}", prefix, key)
        };

        match value {
            Value::String(line) => {
                lines.insert(item, line.clone());
            }
            Value::Object(nested) => flatten_into(lines, &item, nested, path),
            _ => {
                log::warn!(
                    "Line '{}' in '{}' is not a string, skipping",
                    item,
                    path.display()
                );
            }
        }
    }
}

/// In-memory catalog loader for tests and embedded catalogs
///
/// # Example
///
/// ```ignore
/// use lost_in_translation::MemoryLoader;
///
/// let loader = MemoryLoader::new()
///     .with_line("en", "greeting", "hello", "Hello, :name!")
///     .with_line("nl", "greeting", "hello", "Hallo, :name!");
/// ```
#[derive(Debug, Clone, Default)]
pub struct MemoryLoader {
    groups: HashMap<(String, String, String), HashMap<String, String>>,
}

impl MemoryLoader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a line in the global namespace, builder style
    pub fn with_line(self, locale: &str, group: &str, item: &str, template: &str) -> Self {
        self.with_namespaced_line(GLOBAL_NAMESPACE, locale, group, item, template)
    }

    /// Add a line under a vendor namespace, builder style
    pub fn with_namespaced_line(
        mut self,
        namespace: &str,
        locale: &str,
        group: &str,
        item: &str,
        template: &str,
    ) -> Self {
        self.groups
            .entry((locale.to_owned(), group.to_owned(), namespace.to_owned()))
            .or_default()
            .insert(item.to_owned(), template.to_owned());
        self
    }
}

impl CatalogLoader for MemoryLoader {
    fn load(&self, locale: &str, group: &str, namespace: &str) -> HashMap<String, String> {
        self.groups
            .get(&(locale.to_owned(), group.to_owned(), namespace.to_owned()))
            .cloned()
            .unwrap_or_default()
    }
}
