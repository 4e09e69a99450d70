//! Error types for witness rewriting
//!
//! Every error means "abandon this witness". The variants differ only in how
//! loudly the caller should report them:
//! - Discard-class: expected input noise (foreign host, broken capture)
//! - Internal: an invariant of the engine itself was violated

use witness_ir::HashError;

/// Errors returned by a rewrite
#[derive(Debug, thiserror::Error)]
pub enum RewriteError {
    /// Witness is not traffic to the target API
    ///
    /// `host` is `None` when the witness carries no HTTP metadata at all.
    #[error("{}", not_applicable_message(.host.as_deref()))]
    NotApplicable { host: Option<String> },

    /// Response code resolved to zero
    #[error("discarding request/response with 0 status")]
    CorruptCapture,

    /// Synthesized node's key is already present in the args map
    #[error("detected collision in data map key during transform: {key}")]
    KeyCollision { key: String },

    /// Synthesized node could not be hashed
    #[error("hashing synthesized node failed: {0}")]
    Hash(#[from] HashError),
}

impl RewriteError {
    /// Create not-applicable error for `host`
    pub fn not_applicable(host: impl Into<String>) -> Self {
        Self::NotApplicable {
            host: Some(host.into()),
        }
    }

    /// Create not-applicable error for a witness without HTTP metadata
    #[must_use]
    pub fn missing_http_meta() -> Self {
        Self::NotApplicable { host: None }
    }

    /// Expected input noise; drop the witness quietly
    #[inline]
    #[must_use]
    pub fn is_discard(&self) -> bool {
        matches!(self, Self::NotApplicable { .. } | Self::CorruptCapture)
    }

    /// Engine invariant violation; worth surfacing loudly
    #[inline]
    #[must_use]
    pub fn is_internal(&self) -> bool {
        matches!(self, Self::KeyCollision { .. } | Self::Hash(_))
    }
}

fn not_applicable_message(host: Option<&str>) -> String {
    match host {
        Some(host) => format!("discarding request not to target API: {host}"),
        None => "discarding request without HTTP metadata".to_string(),
    }
}

/// Errors loading a rewriter configuration
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid TOML config: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("invalid JSON config: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid config value for {field}: {message}")]
    InvalidValue { field: &'static str, message: String },
}

/// Result type alias for rewrite operations
pub type RewriteResult<T> = Result<T, RewriteError>;
