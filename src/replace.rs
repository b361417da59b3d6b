//! Placeholder substitution
//!
//! Templates mark placeholders with a leading colon (`"Welcome to
//! :brand"`). Each replacement is applied in three case forms so that
//! templates can ask for a cased variant of the value: `:name` inserts
//! the value as given, `:Name` upcases its first letter, and `:NAME`
//! upcases it entirely.

use std::collections::HashMap;

/// A set of named placeholder values applied to a matched template
///
/// # Example
///
/// ```ignore
/// use lost_in_translation::Replacements;
///
/// let replacements = Replacements::new()
///     .with("name", "World")
///     .with("count", "3");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Replacements(HashMap<String, String>);

impl Replacements {
    pub fn new() -> Self {
        Replacements(HashMap::new())
    }

    /// Add a replacement, builder style
    pub fn with(mut self, name: &str, value: &str) -> Self {
        self.insert(name, value);
        self
    }

    pub fn insert(&mut self, name: &str, value: &str) {
        self.0.insert(name.to_owned(), value.to_owned());
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.0.get(name).map(|value| value.as_str())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.0.contains_key(name)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn as_map(&self) -> &HashMap<String, String> {
        &self.0
    }

    /// Add every entry from `defaults` that is not already present.
    /// Existing entries are kept, so caller-supplied values win over
    /// injected ones.
    pub fn merge_defaults(&mut self, defaults: &HashMap<String, String>) {
        for (name, value) in defaults {
            self.0
                .entry(name.clone())
                .or_insert_with(|| value.clone());
        }
    }
}

impl From<HashMap<String, String>> for Replacements {
    fn from(map: HashMap<String, String>) -> Self {
        Replacements(map)
    }
}

/// Substitute every replacement into `template`
///
/// Longer placeholder names are applied first so that a name which is a
/// prefix of another (`:brand` vs `:brandname`) cannot clobber it.
/// Placeholders with no matching replacement are left verbatim.
pub fn apply(template: &str, replacements: &Replacements) -> String {
    if replacements.is_empty() || !template.contains(':') {
        return template.to_owned();
    }

    let mut names: Vec<&String> = replacements.0.keys().collect();
    names.sort_by(|a, b| b.len().cmp(&a.len()).then_with(|| a.cmp(b)));

    let mut result = template.to_owned();
    for name in names {
        if name.is_empty() {
            continue;
        }
        let value = &replacements.0[name];
        result = result.replace(&format!(":{}", name), value);
        result = result.replace(&format!(":{}", ucfirst(name)), &ucfirst(value));
        result = result.replace(&format!(":{}", name.to_uppercase()), &value.to_uppercase());
    }
    result
}

fn ucfirst(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}
