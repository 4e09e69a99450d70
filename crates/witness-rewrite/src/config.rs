//! Rewriter configuration

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Names and constants used by the Flickr rewriter
///
/// Every field has a default, so partial TOML/JSON documents are accepted.
/// Parsed configs are validated; the `with_*` builders are not, so call
/// [`RewriterConfig::validate`] (or `FlickrRewriter::try_with_config`)
/// before using a hand-built one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RewriterConfig {
    /// Substring the witness host must contain
    pub target_host: String,
    /// Prefix of the synthesized path template
    pub path_prefix: String,
    /// Parameter selecting the API method
    pub method_param: String,
    /// Parameter carrying the API key
    pub api_key_param: String,
    /// Top-level response body field reporting success/failure
    pub failure_field: String,
    /// Value of `failure_field` that indicates failure
    pub failure_value: String,
    /// Response code written when failure is indicated
    pub failure_code: i32,
    /// Format kind set on tagged primitives
    pub format_kind: String,
    /// Format flag set on NSID primitives
    pub nsid_format: String,
}

impl Default for RewriterConfig {
    fn default() -> Self {
        Self {
            target_host: "api.flickr.com".to_string(),
            path_prefix: "/services/awesome".to_string(),
            method_param: "method".to_string(),
            api_key_param: "api_key".to_string(),
            failure_field: "stat".to_string(),
            failure_value: "fail".to_string(),
            failure_code: 400,
            format_kind: "flickr_data".to_string(),
            nsid_format: "flickr_nsid".to_string(),
        }
    }
}

impl RewriterConfig {
    /// Create default configuration
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// With target host
    #[inline]
    #[must_use]
    pub fn with_target_host(mut self, host: impl Into<String>) -> Self {
        self.target_host = host.into();
        self
    }

    /// With path prefix
    #[inline]
    #[must_use]
    pub fn with_path_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.path_prefix = prefix.into();
        self
    }

    /// With failure code
    #[inline]
    #[must_use]
    pub fn with_failure_code(mut self, code: i32) -> Self {
        self.failure_code = code;
        self
    }

    /// Parse from TOML
    ///
    /// # Errors
    /// Returns error if TOML is invalid or a value is out of range
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// Parse from JSON
    ///
    /// # Errors
    /// Returns error if JSON is invalid or a value is out of range
    pub fn from_json_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// Check value ranges
    ///
    /// # Errors
    /// Returns the first invalid field
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.target_host.is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "target_host",
                message: "must not be empty".to_string(),
            });
        }
        if !self.path_prefix.starts_with('/') {
            return Err(ConfigError::InvalidValue {
                field: "path_prefix",
                message: format!("must start with '/', got {:?}", self.path_prefix),
            });
        }
        if !(100..=599).contains(&self.failure_code) {
            return Err(ConfigError::InvalidValue {
                field: "failure_code",
                message: format!("not an HTTP status: {}", self.failure_code),
            });
        }
        Ok(())
    }

    /// Path template for API method `name`
    #[inline]
    #[must_use]
    pub fn path_for(&self, name: &str) -> String {
        format!("{}/{}", self.path_prefix, name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_flickr() {
        let c = RewriterConfig::new();
        assert_eq!(c.target_host, "api.flickr.com");
        assert_eq!(c.failure_code, 400);
        assert_eq!(c.path_for("flickr.photos.search"), "/services/awesome/flickr.photos.search");
    }

    #[test]
    fn partial_toml_keeps_defaults() {
        let c = RewriterConfig::from_toml_str("target_host = \"www.flickr.com\"\n").unwrap();
        assert_eq!(c.target_host, "www.flickr.com");
        assert_eq!(c.api_key_param, "api_key");
    }

    #[test]
    fn json_config() {
        let c = RewriterConfig::from_json_str(r#"{"failure_code": 422}"#).unwrap();
        assert_eq!(c.failure_code, 422);
    }

    #[test]
    fn rejects_bad_values() {
        assert!(matches!(
            RewriterConfig::from_toml_str("failure_code = 0"),
            Err(ConfigError::InvalidValue { field: "failure_code", .. })
        ));
        assert!(matches!(
            RewriterConfig::from_toml_str("path_prefix = \"services\""),
            Err(ConfigError::InvalidValue { field: "path_prefix", .. })
        ));
        assert!(matches!(RewriterConfig::from_toml_str("= ="), Err(ConfigError::Toml(_))));
    }
}
