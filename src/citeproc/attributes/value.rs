//! Value capabilities.
//!
//! Attribute values are plain [`serde_json::Value`]s. What a value can do is
//! decided by its variant: only mappings and sequences are deep-copied, only
//! text, mappings and sequences answer an emptiness query, and booleans and
//! numbers have no projection of their own and are rendered as text.

use serde_json::Value;

use crate::error::Result;
use crate::ext::DeepCopy;

/// Tokens a predicate treats as false, compared case-insensitively.
pub const FALSE_PATTERN: [&str; 3] = ["false", "no", "never"];

/// Capabilities every attribute value variant may or may not support.
pub trait AttributeValue: Sized {
    /// Name of the variant, used in error messages.
    fn kind(&self) -> &'static str;

    fn supports_deep_copy(&self) -> bool;

    /// Recursive copy, for variants where [`supports_deep_copy`] holds.
    ///
    /// [`supports_deep_copy`]: AttributeValue::supports_deep_copy
    fn deep_copy_value(&self, max_depth: usize) -> Result<Self>;

    /// Plain duplicate for the scalar variants.
    fn duplicate(&self) -> Self;

    /// `Some(empty?)` for variants with a notion of emptiness.
    fn is_empty(&self) -> Option<bool>;

    /// The variant's own external projection, if it has one. Containers
    /// project to themselves, so nested scalars keep their JSON type.
    fn to_citeproc(&self) -> Option<Value>;

    /// Default text rendering.
    fn to_text(&self) -> String;

    /// Projection used by serialization: the value's own projection, or its
    /// text rendering when it has none.
    fn project(&self) -> Value {
        self.to_citeproc()
            .unwrap_or_else(|| Value::String(self.to_text()))
    }

    /// Absent, empty, or one of the [`FALSE_PATTERN`] tokens.
    fn is_falsy(&self) -> bool;
}

impl AttributeValue for Value {
    fn kind(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "boolean",
            Value::Number(_) => "number",
            Value::String(_) => "string",
            Value::Array(_) => "array",
            Value::Object(_) => "object",
        }
    }

    fn supports_deep_copy(&self) -> bool {
        matches!(self, Value::Array(_) | Value::Object(_))
    }

    fn deep_copy_value(&self, max_depth: usize) -> Result<Self> {
        self.deep_copy_within(max_depth)
    }

    fn duplicate(&self) -> Self {
        self.clone()
    }

    fn is_empty(&self) -> Option<bool> {
        match self {
            Value::String(text) => Some(text.is_empty()),
            Value::Array(items) => Some(items.is_empty()),
            Value::Object(map) => Some(map.is_empty()),
            Value::Null | Value::Bool(_) | Value::Number(_) => None,
        }
    }

    fn to_citeproc(&self) -> Option<Value> {
        match self {
            Value::Null => Some(Value::Null),
            Value::String(_) | Value::Array(_) | Value::Object(_) => Some(self.clone()),
            Value::Bool(_) | Value::Number(_) => None,
        }
    }

    fn to_text(&self) -> String {
        match self {
            Value::Null => String::new(),
            Value::Bool(flag) => flag.to_string(),
            Value::Number(number) => number.to_string(),
            Value::String(text) => text.clone(),
            // Compact JSON
            Value::Array(_) | Value::Object(_) => self.to_string(),
        }
    }

    fn is_falsy(&self) -> bool {
        if self.is_null() || AttributeValue::is_empty(self) == Some(true) {
            return true;
        }
        let text = self.to_text();
        FALSE_PATTERN
            .iter()
            .any(|token| text.eq_ignore_ascii_case(token))
    }
}
