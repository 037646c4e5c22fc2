//! Review configuration
//!
//! ```toml
//! validator = "validator001"
//!
//! [render]
//! null_placeholder = "--"
//! ```

use formdesk_render::{ConfigError, RenderConfig};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Settings for a validator's review sessions
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ReviewConfig {
    /// Validator id stamped on decisions
    pub validator: String,
    /// Renderer settings
    pub render: RenderConfig,
}

impl ReviewConfig {
    /// Create default configuration
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// With validator id
    #[inline]
    #[must_use]
    pub fn with_validator(mut self, validator: impl Into<String>) -> Self {
        self.validator = validator.into();
        self
    }

    /// With renderer settings
    #[inline]
    #[must_use]
    pub fn with_render(mut self, render: RenderConfig) -> Self {
        self.render = render;
        self
    }

    /// Parse from TOML text
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

impl Default for ReviewConfig {
    fn default() -> Self {
        Self {
            validator: "validator".to_string(),
            render: RenderConfig::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nested_render_table() {
        let config = ReviewConfig::from_toml_str(
            "validator = \"validator001\"\n\n[render]\nnull_placeholder = \"--\"\n",
        )
        .unwrap();
        assert_eq!(config.validator, "validator001");
        assert_eq!(config.render.null_placeholder, "--");
        assert_eq!(config.render.indent, 2);
    }

    #[test]
    fn empty_toml_is_default() {
        assert_eq!(ReviewConfig::from_toml_str("").unwrap(), ReviewConfig::default());
    }
}
