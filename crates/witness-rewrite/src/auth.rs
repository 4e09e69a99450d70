//! API key relocation
//!
//! Flickr passes its API key as an ordinary parameter. It is removed from
//! every location and replaced with a single redacted bearer auth entry.

use std::collections::btree_map::Entry;

use witness_ir::{categorize_string, hash_data_to_string, Data, HttpAuthType, HttpLocation, HttpMeta, Witness};

use crate::config::RewriterConfig;
use crate::error::{RewriteError, RewriteResult};
use crate::locator::{pop_body_element_by_name, pop_query_param_by_name};

/// Build the bearer auth node for a raw API key
#[must_use]
pub fn create_auth_header(api_key: &str) -> Data {
    let prim = categorize_string(api_key).obfuscate().to_primitive();
    Data::primitive(prim).with_meta(HttpMeta::new(HttpLocation::Auth {
        auth_type: HttpAuthType::Bearer,
    }))
}

/// Replace the API key parameter with a bearer auth arg
///
/// The key is removed from both the query string and the body; when both
/// carry it the body value wins. No key anywhere is a no-op.
///
/// # Errors
/// Returns [`RewriteError::KeyCollision`] if the new node's key already
/// exists in the args map. Parameters popped before the check stay removed.
pub fn relocate_auth(witness: &mut Witness, config: &RewriterConfig) -> RewriteResult<()> {
    let mut api_key = pop_query_param_by_name(witness, &config.api_key_param);

    if let Some(from_body) = pop_body_element_by_name(witness, &config.api_key_param) {
        api_key = Some(from_body);
    }

    let Some(api_key) = api_key else {
        return Ok(());
    };

    let auth = create_auth_header(&api_key);
    let key = hash_data_to_string(&auth)?;

    match witness.args.entry(key) {
        Entry::Occupied(entry) => Err(RewriteError::KeyCollision {
            key: entry.key().clone(),
        }),
        Entry::Vacant(entry) => {
            tracing::debug!(key = %entry.key(), "inserted bearer auth arg");
            entry.insert(auth);
            Ok(())
        }
    }
}
