//! Witness rewriters
//!
//! A [`WitnessRewriter`] is handed one witness at a time by the host runtime,
//! mutates it in place and reports whether it should be kept.

use witness_ir::{ApiType, HttpMethodMeta, Witness};

use crate::auth::relocate_auth;
use crate::config::RewriterConfig;
use crate::error::{ConfigError, RewriteError, RewriteResult};
use crate::nsid::detect_nsids;
use crate::path::extract_path;
use crate::response_code::normalize_response_code;

/// In-place transformation of captured witnesses
pub trait WitnessRewriter {
    /// Constant identifier of this rewriter
    fn name(&self) -> &'static str;

    /// Whether this rewriter targets the witness described by `meta`
    fn is_applicable(&self, meta: &HttpMethodMeta) -> bool;

    /// Rewrite `witness` in place
    ///
    /// # Errors
    /// Any error means the witness should be dropped by the caller. The
    /// witness may be partially mutated when an error is returned.
    fn transform(&self, witness: &mut Witness) -> RewriteResult<()>;
}

/// Bridges Flickr's REST API conventions to route-based witnesses
///
/// # Passes
/// 1. `method` parameter becomes the path template
/// 2. `"stat": "fail"` bodies override the response code
/// 3. `api_key` parameter becomes a redacted bearer auth arg
/// 4. NSID strings are tagged with a custom format
///
/// Passes run in this order on every applicable witness.
#[derive(Debug, Clone, Default)]
pub struct FlickrRewriter {
    config: RewriterConfig,
}

impl FlickrRewriter {
    /// Identifier reported by [`WitnessRewriter::name`]
    pub const NAME: &'static str = "FlickrRewriter";

    /// Create rewriter with default configuration
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create rewriter with `config`, unchecked
    ///
    /// `config` is used as given. Configs assembled with the `with_*`
    /// builders skip [`RewriterConfig::validate`]; prefer
    /// [`Self::try_with_config`] for those.
    #[inline]
    #[must_use]
    pub fn with_config(config: RewriterConfig) -> Self {
        Self { config }
    }

    /// Create rewriter with a validated `config`
    ///
    /// # Errors
    /// Returns [`ConfigError::InvalidValue`] for the first out-of-range field
    pub fn try_with_config(config: RewriterConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self { config })
    }

    #[inline]
    #[must_use]
    pub fn config(&self) -> &RewriterConfig {
        &self.config
    }
}

impl WitnessRewriter for FlickrRewriter {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn is_applicable(&self, meta: &HttpMethodMeta) -> bool {
        meta.host.contains(&self.config.target_host)
    }

    fn transform(&self, witness: &mut Witness) -> RewriteResult<()> {
        tracing::debug!(method = %witness.id.name, "flickr transform called");

        if witness.api_type() != ApiType::HttpRest {
            return Ok(());
        }

        let Some(meta) = witness.http_meta() else {
            return Err(RewriteError::missing_http_meta());
        };

        if !self.is_applicable(meta) {
            return Err(RewriteError::not_applicable(meta.host.clone()));
        }

        tracing::debug!(path_template = %meta.path_template, "original path template");

        extract_path(witness, &self.config);
        normalize_response_code(witness, &self.config)?;
        relocate_auth(witness, &self.config)?;
        let nsids = detect_nsids(witness, &self.config);

        tracing::debug!(
            path_template = witness.http_meta().map_or("", |m| m.path_template.as_str()),
            nsids,
            "flickr transform done"
        );

        Ok(())
    }
}
