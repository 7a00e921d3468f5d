//! Deep copy and deep fetch over nested JSON-shaped data.
//!
//! These are the two container extensions the attribute system relies on:
//!
//! - [`DeepCopy`]: a recursive clone that refuses to descend past a nesting
//!   limit instead of exhausting the stack.
//! - [`DeepFetch`]: `root[k1][k2]...[kn]` lookup that yields `None` as soon as
//!   a step is not a mapping or lacks the key.

use indexmap::IndexMap;
use serde_json::{Map, Value};
use std::hash::Hash;

use crate::error::{AttributeError, Result};

/// Nesting depth used by [`DeepCopy::deep_copy`].
pub const DEFAULT_MAX_DEPTH: usize = 128;

/// A recursive copy sharing no mapping or sequence with its source.
pub trait DeepCopy: Sized {
    /// Copy with the default nesting limit.
    fn deep_copy(&self) -> Result<Self> {
        self.deep_copy_within(DEFAULT_MAX_DEPTH)
    }

    /// Copy, failing with [`AttributeError::CopyDepthExceeded`] once more than
    /// `max_depth` mappings/sequences are nested.
    fn deep_copy_within(&self, max_depth: usize) -> Result<Self>;
}

impl DeepCopy for Value {
    fn deep_copy_within(&self, max_depth: usize) -> Result<Self> {
        copy_value(self, 0, max_depth)
    }
}

impl DeepCopy for Map<String, Value> {
    fn deep_copy_within(&self, max_depth: usize) -> Result<Self> {
        copy_map(self, 0, max_depth)
    }
}

impl<K> DeepCopy for IndexMap<K, Value>
where
    K: Clone + Hash + Eq,
{
    fn deep_copy_within(&self, max_depth: usize) -> Result<Self> {
        let depth = enter(0, max_depth)?;
        self.iter()
            .map(|(key, value)| Ok((key.clone(), copy_value(value, depth, max_depth)?)))
            .collect()
    }
}

fn enter(depth: usize, max_depth: usize) -> Result<usize> {
    if depth >= max_depth {
        return Err(AttributeError::CopyDepthExceeded { limit: max_depth });
    }
    Ok(depth + 1)
}

fn copy_value(value: &Value, depth: usize, max_depth: usize) -> Result<Value> {
    match value {
        Value::Array(items) => {
            let depth = enter(depth, max_depth)?;
            items
                .iter()
                .map(|item| copy_value(item, depth, max_depth))
                .collect::<Result<Vec<_>>>()
                .map(Value::Array)
        }
        Value::Object(map) => copy_map(map, depth, max_depth).map(Value::Object),
        scalar => Ok(scalar.clone()),
    }
}

fn copy_map(map: &Map<String, Value>, depth: usize, max_depth: usize) -> Result<Map<String, Value>> {
    let depth = enter(depth, max_depth)?;
    map.iter()
        .map(|(key, value)| Ok((key.clone(), copy_value(value, depth, max_depth)?)))
        .collect()
}

/// Path lookup through nested mappings.
pub trait DeepFetch {
    /// Resolve `path` one key at a time.
    ///
    /// Returns `None` when any step is missing or not a mapping, when `path`
    /// is empty, and when the final value is `null`.
    fn deep_fetch<K: AsRef<str>>(&self, path: &[K]) -> Option<&Value>;
}

impl DeepFetch for Map<String, Value> {
    fn deep_fetch<K: AsRef<str>>(&self, path: &[K]) -> Option<&Value> {
        let (first, rest) = path.split_first()?;
        let mut current = self.get(first.as_ref())?;
        for key in rest {
            current = current.as_object()?.get(key.as_ref())?;
        }
        (!current.is_null()).then_some(current)
    }
}

impl DeepFetch for Value {
    fn deep_fetch<K: AsRef<str>>(&self, path: &[K]) -> Option<&Value> {
        self.as_object()?.deep_fetch(path)
    }
}
