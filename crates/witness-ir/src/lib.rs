//! Witness IR
//!
//! Schema-free, in-memory representation of captured HTTP request/response
//! exchanges ("witnesses").
//!
//! # Core Concepts
//!
//! - [`Witness`]: One captured method call with its args, responses and HTTP facts
//! - [`Data`]: A tree node; a [`Value`] plus optional per-fragment [`HttpMeta`]
//! - [`Value`]: Closed sum of `Primitive`, `Struct`, `List`, `Optional`, `Oneof`
//! - [`DataHash`]: Blake3 digest used to derive content-addressed map keys
//! - [`categorize_string`]: Classification and redaction of credential strings
//!
//! # Example
//!
//! ```rust
//! use witness_ir::{ApiType, Data, HttpLocation, HttpMeta, MethodId, Witness};
//!
//! let mut witness = Witness::new(MethodId::new("call", ApiType::HttpRest));
//! let arg = Data::string("flickr.test.echo").with_meta(HttpMeta::new(HttpLocation::query("method")));
//! let key = witness_ir::hash_data_to_string(&arg).unwrap();
//! witness.args.insert(key, arg);
//! assert_eq!(witness.args.len(), 1);
//! ```

#![warn(unreachable_pub)]
#![allow(missing_docs)]

mod categorize;
mod hash;
mod http;
mod value;
mod witness;

pub use categorize::{categorize_string, CategorizedString, Obfuscated, StringCategory};
pub use hash::{hash_data_to_string, DataHash, HashError};
pub use http::{
    body_from_data, multipart_from_data, query_from_data, HttpAuthType, HttpLocation, HttpMeta,
    HttpMethodMeta,
};
pub use value::{Data, List, Oneof, Optional, Primitive, PrimitiveValue, Struct, Value};
pub use witness::{ApiType, MethodId, Witness, WitnessError};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
