//! Deterministic node hashing
//!
//! Provides [`DataHash`], a 32-byte Blake3 digest of a [`Data`] node used to
//! derive stable map keys for nodes inserted into a witness.

use std::fmt::{self, Display, Formatter};

use crate::value::Data;

/// A 32-byte content hash of a witness node
///
/// Computed over the canonical JSON encoding of the node. All maps in the
/// tree are ordered, so equal nodes always hash equally.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DataHash([u8; 32]);

impl DataHash {
    /// Wrap raw digest bytes
    #[inline]
    #[must_use]
    pub const fn new(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    /// Raw digest bytes
    #[inline]
    #[must_use]
    pub const fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// Hash arbitrary bytes
    #[inline]
    #[must_use]
    pub fn compute(data: &[u8]) -> Self {
        Self::new(*blake3::hash(data).as_bytes())
    }

    /// Hash a witness node
    ///
    /// # Errors
    /// Returns error if the node cannot be serialized
    pub fn of_data(data: &Data) -> Result<Self, HashError> {
        let json = serde_json::to_vec(data)?;
        Ok(Self::compute(&json))
    }

    /// Short string representation (first 16 hex chars)
    #[inline]
    #[must_use]
    pub fn short(&self) -> String {
        hex::encode(&self.0[..8])
    }
}

impl Display for DataHash {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", hex::encode(self.0))
    }
}

/// Compute the map key for `data`
///
/// # Errors
/// Returns error if the node cannot be serialized
#[inline]
pub fn hash_data_to_string(data: &Data) -> Result<String, HashError> {
    DataHash::of_data(data).map(|h| h.to_string())
}

/// Errors that can occur while hashing nodes
#[derive(Debug, thiserror::Error)]
pub enum HashError {
    /// Serialization error
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
