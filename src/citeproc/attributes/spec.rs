//! Field specifications and descriptors.
//!
//! A [`FieldSpec`] is what a type writes when it declares a field: a name and,
//! optionally, a default. Declaring turns it into a [`FieldDescriptor`], the
//! immutable per-type record the generated operations are built from.

use serde_json::Value;

use super::Key;

/// A field as written in a declaration.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldSpec {
    /// Field name as spelled by the citation data (e.g. "container-title")
    pub name: String,

    /// Value a reader materializes when the field is unset
    pub default: Option<Value>,
}

impl FieldSpec {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            default: None,
        }
    }

    pub fn with_default(name: impl Into<String>, default: impl Into<Value>) -> Self {
        Self {
            name: name.into(),
            default: Some(default.into()),
        }
    }
}

impl From<&str> for FieldSpec {
    fn from(name: &str) -> Self {
        FieldSpec::new(name)
    }
}

impl From<String> for FieldSpec {
    fn from(name: String) -> Self {
        FieldSpec::new(name)
    }
}

impl<V: Into<Value>> From<(&str, V)> for FieldSpec {
    fn from((name, default): (&str, V)) -> Self {
        FieldSpec::with_default(name, default)
    }
}

/// Type-level metadata for one declared field.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldDescriptor {
    key: Key,
    method: String,
    default: Option<Value>,
    predicate: bool,
}

impl FieldDescriptor {
    /// # Panics
    ///
    /// If the spec's name yields no method name (empty or whitespace-only).
    pub fn new(spec: FieldSpec, predicate: bool) -> Self {
        let method = method_name(&spec.name);
        assert!(
            !method.is_empty() && method != "_",
            "field specification {:?} does not yield a method name",
            spec.name
        );

        Self {
            key: Key::from(spec.name),
            method,
            default: spec.default,
            predicate,
        }
    }

    /// Key the field reads and writes.
    pub fn key(&self) -> &Key {
        &self.key
    }

    /// Reader name; the writer is `<method>=`, the predicate `<method>?`.
    pub fn method(&self) -> &str {
        &self.method
    }

    pub fn default(&self) -> Option<&Value> {
        self.default.as_ref()
    }

    pub fn has_predicate(&self) -> bool {
        self.predicate
    }

    pub(crate) fn enable_predicate(&mut self) {
        self.predicate = true;
    }
}

/// Operation name for a field: lower-cased, with every run of hyphens and
/// whitespace collapsed into one underscore.
pub fn method_name(field: &str) -> String {
    let mut method = String::with_capacity(field.len());
    let mut in_separator = false;

    for ch in field.to_lowercase().chars() {
        if ch == '-' || ch.is_ascii_whitespace() {
            if !in_separator {
                method.push('_');
            }
            in_separator = true;
        } else {
            method.push(ch);
            in_separator = false;
        }
    }

    method
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn method_name_lowercases() {
        assert_eq!(method_name("URL"), "url");
        assert_eq!(method_name("title"), "title");
    }

    #[test]
    fn method_name_collapses_separators() {
        assert_eq!(method_name("container-title"), "container_title");
        assert_eq!(method_name("non-dropping-particle"), "non_dropping_particle");
        assert_eq!(method_name("collection  -- number"), "collection_number");
        assert_eq!(method_name("Date\tParts"), "date_parts");
    }

    #[test]
    fn method_name_keeps_underscores() {
        assert_eq!(method_name("comma_suffix"), "comma_suffix");
        assert_eq!(method_name("a_-b"), "a__b");
    }

    #[test]
    fn spec_conversions() {
        assert_eq!(FieldSpec::from("family"), FieldSpec::new("family"));
        assert_eq!(
            FieldSpec::from(("static-ordering", "false")),
            FieldSpec::with_default("static-ordering", "false")
        );
        assert_eq!(FieldSpec::from(("season", 1)).default, Some(json!(1)));
    }

    #[test]
    fn descriptor_keeps_the_raw_key() {
        let descriptor = FieldDescriptor::new(FieldSpec::new("Container-Title"), true);

        assert_eq!(descriptor.key().as_str(), "Container-Title");
        assert_eq!(descriptor.method(), "container_title");
        assert!(descriptor.has_predicate());
        assert_eq!(descriptor.default(), None);
    }

    #[test]
    #[should_panic(expected = "does not yield a method name")]
    fn empty_name_fails_fast() {
        FieldDescriptor::new(FieldSpec::new(""), false);
    }

    #[test]
    #[should_panic(expected = "does not yield a method name")]
    fn separator_only_name_fails_fast() {
        FieldDescriptor::new(FieldSpec::new(" - "), false);
    }
}
