//! Path extraction
//!
//! Flickr selects the API method with a `method` parameter instead of a
//! route. The value is promoted into the witness path template.

use witness_ir::Witness;

use crate::config::RewriterConfig;
use crate::locator::{pop_body_element_by_name, pop_query_param_by_name};

/// Move the method selector into the path template
///
/// Both the query string and the body are consumed. When both carry the
/// selector the body value is written last and wins.
pub fn extract_path(witness: &mut Witness, config: &RewriterConfig) {
    if let Some(name) = pop_query_param_by_name(witness, &config.method_param) {
        set_path_template(witness, config, &name);
    }

    if let Some(name) = pop_body_element_by_name(witness, &config.method_param) {
        set_path_template(witness, config, &name);
    }
}

fn set_path_template(witness: &mut Witness, config: &RewriterConfig, name: &str) {
    if let Some(meta) = witness.http_meta_mut() {
        meta.path_template = config.path_for(name);
        tracing::debug!(path_template = %meta.path_template, "updated path template");
    }
}
