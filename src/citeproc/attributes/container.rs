//! The attribute container.

use indexmap::IndexMap;
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};
use std::fmt;
use std::str::FromStr;
use tracing::{debug, trace};

use super::{AttributeValue, Key, MergeSource};
use crate::config::AttributesConfig;
use crate::error::{AttributeError, Result};
use crate::ext::{DeepCopy, DeepFetch};

/// A symbol-keyed store of attribute values.
///
/// Every value that enters through [`set`](Attributes::set) or
/// [`merge`](Attributes::merge) is copied first, so nothing the caller still
/// holds can reach into the container. Mutation needs `&mut self`; share a
/// container across threads only behind a lock.
#[derive(Debug, Clone, Default)]
pub struct Attributes {
    attributes: IndexMap<Key, Value>,
    config: AttributesConfig,
}

impl Attributes {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: AttributesConfig) -> Self {
        Self {
            attributes: IndexMap::new(),
            config,
        }
    }

    pub fn config(&self) -> &AttributesConfig {
        &self.config
    }

    /// Build a container from `parameters`, or `None` if they can't be merged.
    pub fn create(parameters: impl Into<MergeSource>) -> Option<Self> {
        match Self::try_create(parameters) {
            Ok(attributes) => Some(attributes),
            Err(err) => {
                debug!(error = %err, "discarding attributes that failed to merge");
                None
            }
        }
    }

    /// Build a container from `parameters`, propagating merge failures.
    pub fn try_create(parameters: impl Into<MergeSource>) -> Result<Self> {
        let mut attributes = Self::new();
        attributes.merge(parameters)?;
        Ok(attributes)
    }

    pub fn get(&self, key: impl Into<Key>) -> Option<&Value> {
        self.attributes.get(&filter_key(key))
    }

    pub fn set(&mut self, key: impl Into<Key>, value: impl Into<Value>) {
        let value = self.filter_value(value.into());
        self.attributes.insert(filter_key(key), value);
    }

    pub fn contains_key(&self, key: impl Into<Key>) -> bool {
        self.attributes.contains_key(&filter_key(key))
    }

    pub fn len(&self) -> usize {
        self.attributes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.attributes.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &Key> {
        self.attributes.keys()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Key, &Value)> {
        self.attributes.iter()
    }

    /// Resolve a path whose first step is an attribute key.
    ///
    /// See [`DeepFetch`] for how missing steps and `null` are reported.
    pub fn deep_fetch<K: AsRef<str>>(&self, path: &[K]) -> Option<&Value> {
        let (first, rest) = path.split_first()?;
        let value = self.get(first.as_ref())?;
        if rest.is_empty() {
            return (!value.is_null()).then_some(value);
        }
        value.deep_fetch(rest)
    }

    /// Merge `source` into the container, overwriting existing keys.
    ///
    /// The whole source is normalized before the first write, so a source
    /// that fails to parse leaves the container untouched.
    pub fn merge(&mut self, source: impl Into<MergeSource>) -> Result<&mut Self> {
        let pairs = source.into().normalize(self.config.json_detection)?;
        trace!(pairs = pairs.len(), "merging attributes");

        for (key, value) in pairs {
            let value = self.filter_value(value);
            self.attributes.insert(key, value);
        }

        Ok(self)
    }

    /// Alias for [`merge`](Attributes::merge).
    pub fn update(&mut self, source: impl Into<MergeSource>) -> Result<&mut Self> {
        self.merge(source)
    }

    /// Merge keeping existing values. Not implemented.
    ///
    /// # Panics
    ///
    /// Always.
    pub fn reverse_merge(&mut self, _source: impl Into<MergeSource>) -> Result<&mut Self> {
        unimplemented!("reverse_merge is not implemented yet")
    }

    /// A copy of the stored mapping, keys still canonical.
    pub fn to_hash(&self) -> IndexMap<Key, Value> {
        self.attributes
            .deep_copy_within(self.config.max_copy_depth)
            .unwrap_or_else(|err| {
                debug!(error = %err, "cloning attributes past the copy depth limit");
                self.attributes.clone()
            })
    }

    /// Plain text-keyed mapping handed to the renderer and to serialization.
    pub fn to_citeproc(&self) -> Map<String, Value> {
        self.attributes
            .iter()
            .map(|(key, value)| (key.to_string(), value.project()))
            .collect()
    }

    pub fn to_json(&self) -> Result<String> {
        let citeproc = self.to_citeproc();
        let json = if self.config.pretty {
            serde_json::to_string_pretty(&citeproc)?
        } else {
            serde_json::to_string(&citeproc)?
        };
        Ok(json)
    }

    pub(crate) fn into_inner(self) -> IndexMap<Key, Value> {
        self.attributes
    }

    /// Store `value` exactly as given, skipping [`filter_value`](Self::filter_value).
    pub(crate) fn store(&mut self, key: Key, value: Value) {
        self.attributes.insert(key, value);
    }

    /// The value at `key`, storing `default()` there first if it is missing or `null`.
    pub(crate) fn fetch_or_store(&mut self, key: Key, default: impl FnOnce() -> Value) -> &Value {
        let slot = self.attributes.entry(key).or_insert(Value::Null);
        if slot.is_null() {
            *slot = default();
        }
        slot
    }

    /// Detach `value` from anything else before it is stored.
    ///
    /// Containers are deep-copied, scalars duplicated. A copy that fails is
    /// not an error: the value is stored as given.
    fn filter_value(&self, value: Value) -> Value {
        let copied = if value.supports_deep_copy() {
            value.deep_copy_value(self.config.max_copy_depth)
        } else {
            Ok(value.duplicate())
        };

        match copied {
            Ok(copy) => copy,
            Err(err) => {
                debug!(error = %err, kind = value.kind(), "storing attribute value as given");
                value
            }
        }
    }
}

fn filter_key(key: impl Into<Key>) -> Key {
    key.into()
}

impl PartialEq for Attributes {
    fn eq(&self, other: &Self) -> bool {
        self.attributes == other.attributes
    }
}

impl Eq for Attributes {}

impl<K, V> FromIterator<(K, V)> for Attributes
where
    K: Into<Key>,
    V: Into<Value>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut attributes = Self::new();
        attributes.extend(iter);
        attributes
    }
}

impl<K, V> Extend<(K, V)> for Attributes
where
    K: Into<Key>,
    V: Into<Value>,
{
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (key, value) in iter {
            self.set(key, value);
        }
    }
}

impl FromStr for Attributes {
    type Err = AttributeError;

    fn from_str(text: &str) -> Result<Self> {
        Self::try_create(text)
    }
}

impl fmt::Display for Attributes {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let json = self.to_json().map_err(|_| fmt::Error)?;
        f.write_str(&json)
    }
}

impl Serialize for Attributes {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        self.to_citeproc().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Attributes {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let map = Map::<String, Value>::deserialize(deserializer)?;
        Self::try_create(map).map_err(D::Error::custom)
    }
}
