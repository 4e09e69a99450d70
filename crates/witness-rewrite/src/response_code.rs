//! Response code normalization
//!
//! Flickr answers failed calls with HTTP 200 and `"stat": "fail"` in the
//! body. Such responses are rewritten to the configured failure code.

use witness_ir::{Data, Witness};

use crate::config::RewriterConfig;
use crate::error::{RewriteError, RewriteResult};

/// Override the response code when the body reports failure
///
/// The baseline code comes from the last body fragment scanned, in key
/// order. Once any body reports failure the override stays armed, but a
/// later non-failing body resets the code that gets written to its own. A
/// baseline of 0 (no body, or a body captured with status 0) discards the
/// witness.
/// The response code is denormalized onto every response fragment, so an
/// override is written to all of them.
///
/// # Errors
/// Returns [`RewriteError::CorruptCapture`] when the effective code is 0
pub fn normalize_response_code(witness: &mut Witness, config: &RewriterConfig) -> RewriteResult<()> {
    let mut replace_codes = false;
    let mut resp_code = 0;
    let mut max_code = 0;

    for data in witness.responses.values() {
        let Some(meta) = data.http_meta() else {
            continue;
        };

        max_code = max_code.max(meta.response_code);

        if !meta.is_body() {
            continue;
        }

        resp_code = meta.response_code;

        let Some(body) = data.as_struct() else {
            continue;
        };

        let failed = body
            .fields
            .get(&config.failure_field)
            .and_then(Data::as_str)
            .is_some_and(|stat| stat == config.failure_value);

        if failed {
            replace_codes = true;
            resp_code = config.failure_code;
        }
    }

    tracing::debug!(max_code, resp_code, replace_codes, "scanned response fragments");

    if resp_code == 0 {
        return Err(RewriteError::CorruptCapture);
    }

    if replace_codes {
        for meta in witness.responses.values_mut().filter_map(Data::http_meta_mut) {
            meta.response_code = resp_code;
        }
    }

    Ok(())
}
