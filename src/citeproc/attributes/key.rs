//! Canonical attribute keys.

use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::fmt;

/// The symbolic identifier an attribute is stored under.
///
/// Keys are case-sensitive and are not reformatted: `"container-title"` and
/// `Key::from("container-title")` name the same slot, `"Container-Title"` a
/// different one.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Key(Box<str>);

impl Key {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for Key {
    fn from(key: &str) -> Self {
        Key(key.into())
    }
}

impl From<String> for Key {
    fn from(key: String) -> Self {
        Key(key.into_boxed_str())
    }
}

impl From<&String> for Key {
    fn from(key: &String) -> Self {
        Key(key.as_str().into())
    }
}

impl From<&Key> for Key {
    fn from(key: &Key) -> Self {
        key.clone()
    }
}

impl Borrow<str> for Key {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for Key {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn string_and_symbol_spellings_are_equivalent() {
        let owned = String::from("title");
        assert_eq!(Key::from("title"), Key::from(owned.clone()));
        assert_eq!(Key::from(&owned), Key::from(&Key::from("title")));
    }

    #[test]
    fn keys_are_case_sensitive_and_unformatted() {
        assert_ne!(Key::from("Title"), Key::from("title"));
        assert_eq!(Key::from("container-title").as_str(), "container-title");
    }

    #[test]
    fn key_serializes_as_plain_string() {
        let json = serde_json::to_string(&Key::from("issued")).unwrap();
        assert_eq!(json, "\"issued\"");
    }
}
