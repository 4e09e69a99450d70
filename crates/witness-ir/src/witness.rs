//! Captured method calls

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::http::HttpMethodMeta;
use crate::value::Data;

/// Protocol classification of a witness
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ApiType {
    #[default]
    Unknown,
    HttpRest,
    Grpc,
    Graphql,
}

/// Method identity
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MethodId {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub api_type: ApiType,
}

impl MethodId {
    /// Create an identity for a method of `api_type`
    #[inline]
    #[must_use]
    pub fn new(name: impl Into<String>, api_type: ApiType) -> Self {
        Self {
            name: name.into(),
            api_type,
        }
    }
}

/// One captured request/response exchange
///
/// Map keys of `args` and `responses` are opaque and content-derived; two
/// distinct nodes never share a key.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Witness {
    /// Protocol and method identity
    pub id: MethodId,

    /// Request parameters (query, body, path, header, auth)
    #[serde(default)]
    pub args: BTreeMap<String, Data>,

    /// Response fragments (status, headers, body)
    #[serde(default)]
    pub responses: BTreeMap<String, Data>,

    /// Method-level HTTP facts
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub http: Option<HttpMethodMeta>,
}

impl Witness {
    /// Create an empty witness
    #[inline]
    #[must_use]
    pub fn new(id: MethodId) -> Self {
        Self {
            id,
            ..Self::default()
        }
    }

    /// Protocol classification
    #[inline]
    #[must_use]
    pub fn api_type(&self) -> ApiType {
        self.id.api_type
    }

    /// HTTP facts, if this witness has any
    #[inline]
    #[must_use]
    pub fn http_meta(&self) -> Option<&HttpMethodMeta> {
        self.http.as_ref()
    }

    /// Mutable HTTP facts
    #[inline]
    pub fn http_meta_mut(&mut self) -> Option<&mut HttpMethodMeta> {
        self.http.as_mut()
    }

    /// Decode from JSON
    ///
    /// # Errors
    /// Returns error if `json` is not a valid witness encoding
    pub fn from_json_str(json: &str) -> Result<Self, WitnessError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Encode as pretty JSON
    ///
    /// # Errors
    /// Returns error if serialization fails
    pub fn to_json_string(&self) -> Result<String, WitnessError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Errors decoding or encoding witnesses
#[derive(Debug, thiserror::Error)]
pub enum WitnessError {
    /// JSON encoding error
    #[error("witness json error: {0}")]
    Json(#[from] serde_json::Error),
}
