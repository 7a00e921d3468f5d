use serde::{Deserialize, Serialize};

const DEFAULT_MAX_COPY_DEPTH: usize = 128;

/// How `merge` decides whether a text source is JSON.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JsonDetection {
    /// Only text whose first non-whitespace character is `{` is decoded.
    #[default]
    LeadingBrace,
    /// Every text source is handed to the JSON parser.
    FullParse,
}

/// Behavior knobs for an attribute container.
///
/// Deserializable so a host application can embed it in its own settings.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct AttributesConfig {
    #[serde(default)]
    pub json_detection: JsonDetection,

    /// Pretty-print the serialized text form
    #[serde(default)]
    pub pretty: bool,

    /// Nesting depth at which deep copies give up (the value is then stored as given)
    #[serde(default = "default_max_copy_depth")]
    pub max_copy_depth: usize,
}

fn default_max_copy_depth() -> usize {
    DEFAULT_MAX_COPY_DEPTH
}

impl Default for AttributesConfig {
    fn default() -> Self {
        Self {
            json_detection: JsonDetection::default(),
            pretty: false,
            max_copy_depth: DEFAULT_MAX_COPY_DEPTH,
        }
    }
}
