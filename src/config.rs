//! Preview configuration.
//!
//! Element ids, label text and logging are configurable so the preview can be
//! dropped into pages other than the stock upload form. Every field has a
//! default, so an empty JSON object is a valid config.

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Log level setting for the preview.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// Show only errors
    Error,
    /// Show errors and warnings
    Warn,
    /// Show errors, warnings, and info messages
    #[default]
    Info,
    /// Show debug-level logging
    Debug,
    /// Show all log messages including trace
    Trace,
}

impl LogLevel {
    /// Convert to log crate's LevelFilter.
    pub fn to_level_filter(&self) -> log::LevelFilter {
        match self {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }

    /// Convert to log crate's Level (for loggers that take a single level).
    pub fn to_level(&self) -> log::Level {
        match self {
            LogLevel::Error => log::Level::Error,
            LogLevel::Warn => log::Level::Warn,
            LogLevel::Info => log::Level::Info,
            LogLevel::Debug => log::Level::Debug,
            LogLevel::Trace => log::Level::Trace,
        }
    }
}

/// Id of the `<script type="application/json">` element holding the config.
pub const CONFIG_ELEMENT_ID: &str = "image-preview-config";

/// Environment variable naming a JSON config file (native only).
pub const CONFIG_ENV_VAR: &str = "IMAGE_PREVIEW_CONFIG";

/// Configuration for wiring the preview to a page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PreviewConfig {
    /// Ids of file inputs; each gets one `change` listener
    pub file_input_ids: Vec<String>,

    /// Id of the element whose text shows the file name
    pub label_id: String,

    /// Id of the `<img>` that shows the preview
    pub image_id: String,

    /// Id of the drag-and-drop zone
    pub drop_zone_id: String,

    /// Class toggled on the drop zone while a drag hovers it
    pub active_class: String,

    /// Text placed before the file name in the label
    pub label_prefix: String,

    /// Log verbosity level
    pub log_level: LogLevel,
}

impl Default for PreviewConfig {
    fn default() -> Self {
        Self {
            file_input_ids: vec!["upload".to_string(), "uploadInput".to_string()],
            label_id: "upload-label".to_string(),
            image_id: "imageResult".to_string(),
            drop_zone_id: "dragArea".to_string(),
            active_class: "active".to_string(),
            label_prefix: "File name: ".to_string(),
            log_level: LogLevel::default(),
        }
    }
}

impl PreviewConfig {
    /// Parse a config from JSON, filling missing fields with defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Label text for a selected file.
    pub fn label_for(&self, file_name: &str) -> String {
        format!("{}{}", self.label_prefix, file_name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PreviewError;

    #[test]
    fn test_default_matches_upload_form() {
        let config = PreviewConfig::default();
        assert_eq!(config.file_input_ids, vec!["upload", "uploadInput"]);
        assert_eq!(config.label_id, "upload-label");
        assert_eq!(config.image_id, "imageResult");
        assert_eq!(config.drop_zone_id, "dragArea");
        assert_eq!(config.active_class, "active");
        assert_eq!(config.log_level, LogLevel::Info);
    }

    #[test]
    fn test_label_for() {
        let config = PreviewConfig::default();
        assert_eq!(config.label_for("cat.png"), "File name: cat.png");
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config =
            PreviewConfig::from_json(r#"{"image_id": "thumb", "log_level": "debug"}"#).unwrap();
        assert_eq!(config.image_id, "thumb");
        assert_eq!(config.log_level, LogLevel::Debug);
        assert_eq!(config.label_id, "upload-label");
        assert_eq!(config.label_prefix, "File name: ");
    }

    #[test]
    fn test_empty_json_is_default() {
        let config = PreviewConfig::from_json("{}").unwrap();
        assert_eq!(config, PreviewConfig::default());
    }

    #[test]
    fn test_unknown_field_rejected() {
        let result = PreviewConfig::from_json(r#"{"imageId": "thumb"}"#);
        assert!(matches!(result, Err(PreviewError::Config(_))));
    }

    #[test]
    fn test_log_level_conversion() {
        assert_eq!(LogLevel::Warn.to_level_filter(), log::LevelFilter::Warn);
        assert_eq!(LogLevel::Trace.to_level(), log::Level::Trace);
    }
}
