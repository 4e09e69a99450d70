//! Testing utilities for the witness rewriter workspace
//!
//! Shared witness builders, fragment helpers and fixture loading.

#![allow(missing_docs)]

use std::path::Path;

use witness_ir::{hash_data_to_string, ApiType, Data, HttpLocation, HttpMeta, HttpMethodMeta, MethodId, Witness};

pub const FLICKR_HOST: &str = "api.flickr.com";

#[derive(Debug, Clone)]
pub struct WitnessBuilder {
    witness: Witness,
}

impl WitnessBuilder {
    /// REST witness to the Flickr API at `/services/rest`
    pub fn flickr() -> Self {
        let mut witness = Witness::new(MethodId::new("flickr_call", ApiType::HttpRest));
        witness.http = Some(HttpMethodMeta::new("GET", FLICKR_HOST, "/services/rest"));
        Self { witness }
    }

    pub fn api_type(mut self, api_type: ApiType) -> Self {
        self.witness.id.api_type = api_type;
        self
    }

    pub fn host(mut self, host: &str) -> Self {
        self.http_meta().host = host.to_string();
        self
    }

    pub fn path_template(mut self, path: &str) -> Self {
        self.http_meta().path_template = path.to_string();
        self
    }

    pub fn without_http_meta(mut self) -> Self {
        self.witness.http = None;
        self
    }

    /// Insert an arg under its content-derived key
    pub fn arg(self, data: Data) -> Self {
        let key = hash_data_to_string(&data).unwrap();
        self.arg_with_key(&key, data)
    }

    pub fn arg_with_key(mut self, key: &str, data: Data) -> Self {
        self.witness.args.insert(key.to_string(), data);
        self
    }

    /// Insert a response fragment under its content-derived key
    pub fn response(self, data: Data) -> Self {
        let key = hash_data_to_string(&data).unwrap();
        self.response_with_key(&key, data)
    }

    pub fn response_with_key(mut self, key: &str, data: Data) -> Self {
        self.witness.responses.insert(key.to_string(), data);
        self
    }

    pub fn build(self) -> Witness {
        self.witness
    }

    fn http_meta(&mut self) -> &mut HttpMethodMeta {
        self.witness.http.get_or_insert_with(HttpMethodMeta::default)
    }
}

pub fn query_param(name: &str, value: &str) -> Data {
    Data::string(value).with_meta(HttpMeta::new(HttpLocation::query(name)))
}

fn string_fields<'a>(fields: impl IntoIterator<Item = (&'a str, &'a str)>) -> Data {
    Data::structure(fields.into_iter().map(|(k, v)| (k, Data::string(v))))
}

/// Form-encoded request body with string fields
pub fn body_struct<'a>(fields: impl IntoIterator<Item = (&'a str, &'a str)>) -> Data {
    string_fields(fields).with_meta(HttpMeta::new(HttpLocation::body(
        "application/x-www-form-urlencoded",
    )))
}

/// Multipart form request body with string parts
pub fn multipart_struct<'a>(fields: impl IntoIterator<Item = (&'a str, &'a str)>) -> Data {
    string_fields(fields).with_meta(HttpMeta::new(HttpLocation::multipart("form-data")))
}

/// JSON response body with string fields, observed with `code`
pub fn response_body<'a>(code: i32, fields: impl IntoIterator<Item = (&'a str, &'a str)>) -> Data {
    string_fields(fields)
        .with_meta(HttpMeta::new(HttpLocation::body("application/json")).with_response_code(code))
}

pub fn response_header(name: &str, value: &str, code: i32) -> Data {
    Data::string(value).with_meta(
        HttpMeta::new(HttpLocation::Header {
            key: name.to_string(),
        })
        .with_response_code(code),
    )
}

/// Load a JSON witness fixture, panicking on failure
pub fn load_witness(path: impl AsRef<Path>) -> Witness {
    let path = path.as_ref();
    let json = std::fs::read_to_string(path)
        .unwrap_or_else(|e| panic!("reading fixture {}: {e}", path.display()));
    Witness::from_json_str(&json).unwrap_or_else(|e| panic!("decoding fixture {}: {e}", path.display()))
}
