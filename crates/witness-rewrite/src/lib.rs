//! Witness Rewrite
//!
//! Targeted, idempotent edits of captured Flickr API witnesses so that they
//! read like conventional route-based REST traffic.
//!
//! # Core Operations
//!
//! - **Path extraction**: `method` parameter → path template
//! - **Response code normalization**: `"stat": "fail"` → 400 on every fragment
//! - **Auth relocation**: `api_key` parameter → redacted bearer auth arg
//! - **Format tagging**: NSID strings → `flickr_data` / `flickr_nsid`
//!
//! # Example
//!
//! ```rust,ignore
//! use witness_rewrite::{FlickrRewriter, WitnessRewriter};
//!
//! let rewriter = FlickrRewriter::new();
//! match rewriter.transform(&mut witness) {
//!     Ok(()) => keep(witness),
//!     Err(e) if e.is_internal() => report(e),
//!     Err(_) => {} // drop quietly
//! }
//! ```

#![warn(unreachable_pub)]
#![allow(missing_docs)]

pub mod auth;
pub mod batch;
pub mod config;
pub mod error;
pub mod locator;
pub mod nsid;
pub mod path;
pub mod response_code;
pub mod rewriter;

// Re-exports for convenience
pub use batch::{rewrite_batch, BatchOutcome, BatchReport};
pub use config::RewriterConfig;
pub use error::{ConfigError, RewriteError, RewriteResult};
pub use rewriter::{FlickrRewriter, WitnessRewriter};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
