//! Inputs accepted by `merge`.

use indexmap::IndexMap;
use serde_json::{Map, Value};

use super::{AttributeValue, Attributes, Key};
use crate::config::JsonDetection;
use crate::error::{AttributeError, Result};

/// Something that can be merged into an [`Attributes`] container.
///
/// Conversions exist for every shape a caller may hand over. Shapes that are
/// not a mapping, JSON text, `null` or another container end up as
/// [`MergeSource::Invalid`] and are rejected when merged.
#[derive(Debug, Clone, PartialEq)]
pub enum MergeSource {
    /// Nothing to merge.
    Null,
    /// A plain mapping.
    Map(Map<String, Value>),
    /// Text expected to hold a JSON object.
    Text(String),
    /// The externalizable mapping of another container.
    Attributes(IndexMap<Key, Value>),
    /// Any other value.
    Invalid(Value),
}

impl MergeSource {
    /// Turn the source into canonical pairs without touching any container.
    pub(crate) fn normalize(self, detection: JsonDetection) -> Result<Vec<(Key, Value)>> {
        match self {
            MergeSource::Null => Ok(Vec::new()),
            MergeSource::Map(map) => Ok(map.into_iter().map(|(k, v)| (Key::from(k), v)).collect()),
            MergeSource::Text(text) => {
                let map = decode(&text, detection)?;
                Ok(map.into_iter().map(|(k, v)| (Key::from(k), v)).collect())
            }
            MergeSource::Attributes(map) => Ok(map.into_iter().collect()),
            MergeSource::Invalid(value) => Err(AttributeError::Parse {
                value: value.to_string(),
            }),
        }
    }
}

fn decode(text: &str, detection: JsonDetection) -> Result<Map<String, Value>> {
    if detection == JsonDetection::LeadingBrace && !text.trim_start().starts_with('{') {
        return Err(AttributeError::Parse {
            value: format!("{text:?}"),
        });
    }

    match serde_json::from_str::<Value>(text)? {
        Value::Object(map) => Ok(map),
        other => Err(AttributeError::NotAnObject { kind: other.kind() }),
    }
}

impl From<Value> for MergeSource {
    fn from(value: Value) -> Self {
        match value {
            Value::Null => MergeSource::Null,
            Value::Object(map) => MergeSource::Map(map),
            Value::String(text) => MergeSource::Text(text),
            other => MergeSource::Invalid(other),
        }
    }
}

impl From<&Value> for MergeSource {
    fn from(value: &Value) -> Self {
        MergeSource::from(value.clone())
    }
}

impl From<Map<String, Value>> for MergeSource {
    fn from(map: Map<String, Value>) -> Self {
        MergeSource::Map(map)
    }
}

impl From<&str> for MergeSource {
    fn from(text: &str) -> Self {
        MergeSource::Text(text.to_owned())
    }
}

impl From<String> for MergeSource {
    fn from(text: String) -> Self {
        MergeSource::Text(text)
    }
}

impl From<IndexMap<Key, Value>> for MergeSource {
    fn from(map: IndexMap<Key, Value>) -> Self {
        MergeSource::Attributes(map)
    }
}

impl From<&Attributes> for MergeSource {
    fn from(attributes: &Attributes) -> Self {
        MergeSource::Attributes(attributes.to_hash())
    }
}

impl From<Attributes> for MergeSource {
    fn from(attributes: Attributes) -> Self {
        MergeSource::Attributes(attributes.into_inner())
    }
}

impl<T: Into<MergeSource>> From<Option<T>> for MergeSource {
    fn from(source: Option<T>) -> Self {
        source.map_or(MergeSource::Null, Into::into)
    }
}

macro_rules! invalid_source_from {
    ($($ty:ty),* $(,)?) => {
        $(
            impl From<$ty> for MergeSource {
                fn from(value: $ty) -> Self {
                    MergeSource::Invalid(Value::from(value))
                }
            }
        )*
    };
}

invalid_source_from!(bool, i32, i64, u32, u64, f64, Vec<Value>);

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn keys(pairs: &[(Key, Value)]) -> Vec<&str> {
        pairs.iter().map(|(k, _)| k.as_str()).collect()
    }

    #[test]
    fn null_normalizes_to_nothing() {
        let pairs = MergeSource::from(Value::Null)
            .normalize(JsonDetection::LeadingBrace)
            .unwrap();
        assert!(pairs.is_empty());
        assert_eq!(MergeSource::from(None::<&str>), MergeSource::Null);
    }

    #[test]
    fn map_keeps_order_and_keys() {
        let source = MergeSource::from(json!({ "title": "A", "author": [] }));
        let pairs = source.normalize(JsonDetection::LeadingBrace).unwrap();
        assert_eq!(keys(&pairs), ["title", "author"]);
    }

    #[test]
    fn json_text_with_leading_whitespace() {
        let pairs = MergeSource::from("  \n {\"issued\": {\"year\": 2001}}")
            .normalize(JsonDetection::LeadingBrace)
            .unwrap();
        assert_eq!(pairs, vec![(Key::from("issued"), json!({ "year": 2001 }))]);
    }

    #[test]
    fn text_without_brace_is_rejected_before_parsing() {
        let err = MergeSource::from("[1, 2]")
            .normalize(JsonDetection::LeadingBrace)
            .unwrap_err();
        assert!(matches!(err, AttributeError::Parse { .. }));
        assert!(err.to_string().contains("[1, 2]"));
    }

    #[test]
    fn full_parse_rejects_non_objects_by_kind() {
        let err = MergeSource::from("[1, 2]")
            .normalize(JsonDetection::FullParse)
            .unwrap_err();
        assert!(matches!(err, AttributeError::NotAnObject { kind: "array" }));
    }

    #[test]
    fn malformed_json_is_a_parse_error() {
        let err = MergeSource::from("{ title: ")
            .normalize(JsonDetection::LeadingBrace)
            .unwrap_err();
        assert!(matches!(err, AttributeError::Json(_)));
        assert!(err.is_parse_error());
    }

    #[test]
    fn scalars_and_sequences_are_invalid() {
        assert_eq!(MergeSource::from(42), MergeSource::Invalid(json!(42)));
        assert_eq!(MergeSource::from(json!(true)), MergeSource::Invalid(json!(true)));

        let err = MergeSource::from(vec![json!(1)])
            .normalize(JsonDetection::LeadingBrace)
            .unwrap_err();
        assert_eq!(err.to_string(), "failed to merge attributes and [1]");
    }
}
