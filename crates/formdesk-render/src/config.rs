//! Renderer configuration

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Presentation settings shared by the renderer and painters
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RenderConfig {
    /// Text shown for `null` values
    pub null_placeholder: String,
    /// Text shown for values that have no form representation
    pub unsupported_placeholder: String,
    /// Joins a list's label and the 1-based element position
    pub list_label_separator: String,
    /// Spaces per nesting level in the text painter
    pub indent: usize,
}

impl RenderConfig {
    /// Create default configuration
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// With null placeholder
    #[inline]
    #[must_use]
    pub fn with_null_placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.null_placeholder = placeholder.into();
        self
    }

    /// With unsupported-value placeholder
    #[inline]
    #[must_use]
    pub fn with_unsupported_placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.unsupported_placeholder = placeholder.into();
        self
    }

    /// With list label separator
    #[inline]
    #[must_use]
    pub fn with_list_label_separator(mut self, separator: impl Into<String>) -> Self {
        self.list_label_separator = separator.into();
        self
    }

    /// With indent width
    #[inline]
    #[must_use]
    pub fn with_indent(mut self, indent: usize) -> Self {
        self.indent = indent;
        self
    }

    /// Parse from TOML text; missing keys keep their defaults
    ///
    /// # Errors
    /// Returns error if the text is not valid TOML for this structure
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(text)?)
    }

    /// Load from a TOML file
    ///
    /// # Errors
    /// Returns error if the file cannot be read or parsed
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text)
    }
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            null_placeholder: String::new(),
            unsupported_placeholder: "<unsupported>".to_string(),
            list_label_separator: " - ".to_string(),
            indent: 2,
        }
    }
}

/// Errors loading configuration
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// IO error during file read
    #[error("io error reading {path}: {source}")]
    Io {
        /// File that failed
        path: PathBuf,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },

    /// Malformed TOML
    #[error("invalid configuration: {0}")]
    Toml(#[from] toml::de::Error),
}
