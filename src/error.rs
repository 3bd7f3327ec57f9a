//! Error types for preview operations.

use thiserror::Error;

/// Errors that can occur while mounting the preview or reading a file.
#[derive(Error, Debug)]
pub enum PreviewError {
    /// No element with the configured id exists in the document
    #[error("Element not found: #{id}")]
    ElementNotFound {
        /// The id that was looked up
        id: String,
    },

    /// An element exists but is not of the expected kind
    #[error("Element #{id} is not a {expected}")]
    UnexpectedElement {
        /// The id that was looked up
        id: String,
        /// The element kind that was expected
        expected: &'static str,
    },

    /// Neither a file input nor a drop zone could be found
    #[error("No file input or drop zone found to listen on")]
    NoTriggers,

    /// A browser global (window, document) is missing
    #[error("DOM unavailable: {0}")]
    DomUnavailable(&'static str),

    /// A JavaScript exception surfaced through wasm-bindgen
    #[error("JavaScript error: {0}")]
    Js(String),

    /// The file reader reported an error
    #[error("Failed to read '{name}': {reason}")]
    ReadFailed {
        /// Name of the file being read
        name: String,
        /// Reason reported by the reader
        reason: String,
    },

    /// The read finished but did not produce a string
    #[error("Reading '{name}' did not produce a data URI")]
    UnexpectedReadResult {
        /// Name of the file being read
        name: String,
    },

    /// String is not a well-formed data URI
    #[error("Invalid data URI: {0}")]
    InvalidDataUri(String),

    /// Configuration JSON could not be parsed
    #[error("Config error: {0}")]
    Config(#[from] serde_json::Error),

    /// I/O error on native builds
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

#[cfg(target_arch = "wasm32")]
impl From<wasm_bindgen::JsValue> for PreviewError {
    fn from(value: wasm_bindgen::JsValue) -> Self {
        PreviewError::Js(value.as_string().unwrap_or_else(|| format!("{:?}", value)))
    }
}

/// Result alias for preview operations.
pub type Result<T> = std::result::Result<T, PreviewError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = PreviewError::ElementNotFound {
            id: "upload".to_string(),
        };
        assert_eq!(err.to_string(), "Element not found: #upload");

        let err = PreviewError::ReadFailed {
            name: "cat.png".to_string(),
            reason: "NotReadableError".to_string(),
        };
        assert_eq!(err.to_string(), "Failed to read 'cat.png': NotReadableError");
    }

    #[test]
    fn test_config_error_conversion() {
        let json_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err: PreviewError = json_err.into();
        assert!(matches!(err, PreviewError::Config(_)));
    }
}
