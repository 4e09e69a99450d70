//! HTTP metadata attached to witnesses and their fragments

use serde::{Deserialize, Serialize};

use crate::value::Data;

/// Where a fragment was observed in the HTTP exchange
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind")]
pub enum HttpLocation {
    /// Path parameter
    Path { key: String },
    /// Query-string parameter
    Query { key: String },
    /// Request or response header
    Header { key: String },
    /// Cookie
    Cookie { key: String },
    /// Request or response body
    Body {
        #[serde(default)]
        content_type: String,
    },
    /// Multipart form body; fields of the node are the parts
    Multipart {
        #[serde(default)]
        multipart_type: String,
    },
    /// Authentication artifact
    Auth { auth_type: HttpAuthType },
    /// Fragment with no payload (e.g. a bare response code)
    Empty,
}

impl HttpLocation {
    /// Query-string location
    #[inline]
    #[must_use]
    pub fn query(key: impl Into<String>) -> Self {
        Self::Query { key: key.into() }
    }

    /// Body location
    #[inline]
    #[must_use]
    pub fn body(content_type: impl Into<String>) -> Self {
        Self::Body {
            content_type: content_type.into(),
        }
    }

    /// Multipart location
    #[inline]
    #[must_use]
    pub fn multipart(multipart_type: impl Into<String>) -> Self {
        Self::Multipart {
            multipart_type: multipart_type.into(),
        }
    }
}

/// Authentication scheme
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HttpAuthType {
    Basic,
    Bearer,
    ProxyBasic,
    ProxyBearer,
}

/// Per-fragment HTTP metadata
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HttpMeta {
    /// Location discriminator
    pub location: HttpLocation,

    /// Response code, denormalized onto every response fragment
    #[serde(default)]
    pub response_code: i32,
}

impl HttpMeta {
    /// Metadata for `location` with no response code
    #[inline]
    #[must_use]
    pub fn new(location: HttpLocation) -> Self {
        Self {
            location,
            response_code: 0,
        }
    }

    /// Set the response code
    #[inline]
    #[must_use]
    pub fn with_response_code(mut self, code: i32) -> Self {
        self.response_code = code;
        self
    }

    /// Declared key when this fragment is a query-string parameter
    #[inline]
    #[must_use]
    pub fn query_key(&self) -> Option<&str> {
        match &self.location {
            HttpLocation::Query { key } => Some(key),
            _ => None,
        }
    }

    #[inline]
    #[must_use]
    pub fn is_body(&self) -> bool {
        matches!(self.location, HttpLocation::Body { .. })
    }

    #[inline]
    #[must_use]
    pub fn is_multipart(&self) -> bool {
        matches!(self.location, HttpLocation::Multipart { .. })
    }
}

/// Method-level HTTP facts
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HttpMethodMeta {
    /// Request verb
    #[serde(default)]
    pub method: String,

    /// Normalized route pattern
    #[serde(default)]
    pub path_template: String,

    /// Request host
    #[serde(default)]
    pub host: String,
}

impl HttpMethodMeta {
    /// Create metadata for `verb` on `host` at `path_template`
    #[must_use]
    pub fn new(
        method: impl Into<String>,
        host: impl Into<String>,
        path_template: impl Into<String>,
    ) -> Self {
        Self {
            method: method.into(),
            path_template: path_template.into(),
            host: host.into(),
        }
    }
}

/// Query-string key of `data`, if it is a query parameter
#[inline]
#[must_use]
pub fn query_from_data(data: &Data) -> Option<&str> {
    data.http_meta().and_then(HttpMeta::query_key)
}

/// True when `data` carries the HTTP body
#[inline]
#[must_use]
pub fn body_from_data(data: &Data) -> bool {
    data.http_meta().is_some_and(HttpMeta::is_body)
}

/// True when `data` carries a multipart form body
#[inline]
#[must_use]
pub fn multipart_from_data(data: &Data) -> bool {
    data.http_meta().is_some_and(HttpMeta::is_multipart)
}
