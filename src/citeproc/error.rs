use thiserror::Error;

#[derive(Error, Debug)]
pub enum AttributeError {
    #[error("failed to merge attributes and {value}")]
    Parse { value: String },

    #[error("failed to decode attributes: {0}")]
    Json(#[from] serde_json::Error),

    #[error("failed to merge attributes and a JSON {kind}: expected an object")]
    NotAnObject { kind: &'static str },

    #[error("deep copy exceeded the maximum nesting depth of {limit}")]
    CopyDepthExceeded { limit: usize },

    #[error("undefined field operation `{name}`")]
    UnknownOperation { name: String },
}

impl AttributeError {
    /// Whether this error means a merge source could not be normalized.
    pub fn is_parse_error(&self) -> bool {
        matches!(
            self,
            AttributeError::Parse { .. }
                | AttributeError::Json(_)
                | AttributeError::NotAnObject { .. }
        )
    }
}

pub type Result<T> = std::result::Result<T, AttributeError>;
