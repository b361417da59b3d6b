//! Translation key parsing
//!
//! A key addresses a single line in a catalog. The segment before the
//! first `.` is the group, which may contain `/` subpaths; the rest is
//! the item path inside the group's file:
//!
//! - `greeting.hello` → group `greeting`, item `hello`
//! - `validation.custom.document_number.required` → group `validation`,
//!   item `custom.document_number.required`
//! - `account/signup/general.welcome` → group `account/signup/general`,
//!   item `welcome`
//!
//! A `namespace::` prefix selects a vendor namespace; without one the
//! key lives in the global namespace.

/// The global (unprefixed) namespace
pub const GLOBAL_NAMESPACE: &str = "*";

/// A translation key split into its addressing parts
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedKey<'a> {
    /// Vendor namespace, or [`GLOBAL_NAMESPACE`] for unprefixed keys
    pub namespace: &'a str,
    /// Group name; selects the catalog file
    pub group: &'a str,
    /// Dot-joined path inside the group; `None` when the key names a
    /// whole group and cannot resolve to a single line
    pub item: Option<&'a str>,
}

impl<'a> ParsedKey<'a> {
    /// Split a raw key into namespace, group and item
    pub fn parse(key: &'a str) -> Self {
        let (namespace, rest) = match key.split_once("::") {
            Some((namespace, rest)) if !namespace.is_empty() => (namespace, rest),
            _ => (GLOBAL_NAMESPACE, key),
        };

        match rest.split_once('.') {
            Some((group, item)) => ParsedKey {
                namespace,
                group,
                item: Some(item),
            },
            None => ParsedKey {
                namespace,
                group: rest,
                item: None,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_simple_key() {
        let parsed = ParsedKey::parse("greeting.hello");
        assert_eq!(parsed.namespace, GLOBAL_NAMESPACE);
        assert_eq!(parsed.group, "greeting");
        assert_eq!(parsed.item, Some("hello"));
    }

    #[test]
    fn test_parse_nested_item_path() {
        let parsed = ParsedKey::parse("validation.custom.document_number.required");
        assert_eq!(parsed.group, "validation");
        assert_eq!(parsed.item, Some("custom.document_number.required"));
    }

    #[test]
    fn test_parse_group_with_subpath() {
        let parsed = ParsedKey::parse("account/signup/general.welcome_to_platform");
        assert_eq!(parsed.group, "account/signup/general");
        assert_eq!(parsed.item, Some("welcome_to_platform"));
    }

    #[test]
    fn test_parse_namespaced_key() {
        let parsed = ParsedKey::parse("vendorpkg::messages.greeting");
        assert_eq!(parsed.namespace, "vendorpkg");
        assert_eq!(parsed.group, "messages");
        assert_eq!(parsed.item, Some("greeting"));
    }

    #[test]
    fn test_parse_group_only_key() {
        let parsed = ParsedKey::parse("validation");
        assert_eq!(parsed.group, "validation");
        assert_eq!(parsed.item, None);
    }

    #[test]
    fn test_parse_trailing_dot() {
        // Translatable custom validation values can produce keys with an
        // empty value part, e.g. "validation.values.iban."
        let parsed = ParsedKey::parse("validation.values.iban.");
        assert_eq!(parsed.group, "validation");
        assert_eq!(parsed.item, Some("values.iban."));
    }

    #[test]
    fn test_parse_empty_namespace_prefix() {
        let parsed = ParsedKey::parse("::messages.greeting");
        assert_eq!(parsed.namespace, GLOBAL_NAMESPACE);
        assert_eq!(parsed.group, "::messages");
    }
}
