//! Named-value locator
//!
//! Finds a parameter by name in the places a captured request may carry it,
//! removes every match and returns the first string value seen. "Not found"
//! is the common case and is reported as `None`, never as an error.

use witness_ir::{body_from_data, multipart_from_data, query_from_data, Data, Struct, Witness};

/// Pop every query-string parameter named `name` from the witness args
///
/// Matching is by the parameter's declared key, not the map key. Captured
/// traffic may repeat a parameter; all copies are removed and the first
/// string value in scan order is returned. Non-string matches are removed
/// but never returned.
pub fn pop_query_param_by_name(witness: &mut Witness, name: &str) -> Option<String> {
    let mut found: Option<String> = None;
    let mut keys_to_delete = Vec::with_capacity(1);

    for (key, data) in &witness.args {
        if query_from_data(data) != Some(name) {
            continue;
        }

        keys_to_delete.push(key.clone());

        if found.is_none() {
            found = data.as_str().map(str::to_string);
        }
    }

    for key in &keys_to_delete {
        witness.args.remove(key);
    }

    found
}

/// Pop a string field named `name` from a multipart form struct
///
/// A non-string field is left in place.
pub fn pop_multipart_element_by_name(parts: Option<&mut Struct>, name: &str) -> Option<String> {
    pop_struct_field_by_name(parts?, name)
}

/// Pop a string field named `name` from the request body
///
/// A multipart fragment, if the args hold one, restricts the search to its
/// parts: any plain body fragment in the same witness is ignored. Otherwise
/// the first plain struct body holding a string field `name` yields it.
pub fn pop_body_element_by_name(witness: &mut Witness, name: &str) -> Option<String> {
    if let Some(parts) = witness.args.values_mut().find(|d| multipart_from_data(d)) {
        return pop_multipart_element_by_name(parts.as_struct_mut(), name);
    }

    witness
        .args
        .values_mut()
        .filter(|d| body_from_data(d))
        .find_map(|d| d.as_struct_mut().and_then(|s| pop_struct_field_by_name(s, name)))
}

fn pop_struct_field_by_name(s: &mut Struct, name: &str) -> Option<String> {
    let value = s.fields.get(name).and_then(Data::as_str)?.to_string();
    s.fields.remove(name);
    Some(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use witness_ir::{HttpLocation, HttpMeta, Primitive, PrimitiveValue};
    use witness_test_utils::{body_struct, multipart_struct, query_param, WitnessBuilder};

    #[test]
    fn query_param_is_popped() {
        let mut w = WitnessBuilder::flickr().arg(query_param("method", "flickr.test.echo")).build();
        assert_eq!(pop_query_param_by_name(&mut w, "method").as_deref(), Some("flickr.test.echo"));
        assert!(w.args.is_empty());
    }

    #[test]
    fn duplicate_query_params_all_removed() {
        let mut w = WitnessBuilder::flickr()
            .arg_with_key("a", query_param("method", "first"))
            .arg_with_key("b", query_param("method", "second"))
            .arg_with_key("c", query_param("format", "json"))
            .build();
        assert_eq!(pop_query_param_by_name(&mut w, "method").as_deref(), Some("first"));
        assert_eq!(w.args.len(), 1);
        assert!(w.args.contains_key("c"));
    }

    #[test]
    fn non_string_query_param_removed_not_returned() {
        let numeric = Data::primitive(Primitive::new(PrimitiveValue::Int64(3)))
            .with_meta(HttpMeta::new(HttpLocation::query("method")));
        let mut w = WitnessBuilder::flickr().arg(numeric).build();
        assert_eq!(pop_query_param_by_name(&mut w, "method"), None);
        assert!(w.args.is_empty());
    }

    #[test]
    fn missing_query_param_is_none() {
        let mut w = WitnessBuilder::flickr().arg(query_param("format", "json")).build();
        assert_eq!(pop_query_param_by_name(&mut w, "method"), None);
        assert_eq!(w.args.len(), 1);
    }

    #[test]
    fn body_field_is_popped() {
        let mut w = WitnessBuilder::flickr()
            .arg(body_struct([("method", "flickr.people.getInfo"), ("user_id", "1@N01")]))
            .build();
        assert_eq!(
            pop_body_element_by_name(&mut w, "method").as_deref(),
            Some("flickr.people.getInfo")
        );
        let body = w.args.values().next().unwrap().as_struct().unwrap();
        assert!(!body.fields.contains_key("method"));
        assert!(body.fields.contains_key("user_id"));
    }

    #[test]
    fn multipart_stops_search() {
        let mut w = WitnessBuilder::flickr()
            .arg_with_key("1", body_struct([("method", "from_body")]))
            .arg_with_key("2", multipart_struct([("title", "x")]))
            .build();
        assert_eq!(pop_body_element_by_name(&mut w, "method"), None);
        assert!(w.args["1"].as_struct().unwrap().fields.contains_key("method"));
    }

    #[test]
    fn multipart_field_is_popped() {
        let mut w = WitnessBuilder::flickr()
            .arg(multipart_struct([("method", "flickr.photos.upload")]))
            .build();
        assert_eq!(
            pop_body_element_by_name(&mut w, "method").as_deref(),
            Some("flickr.photos.upload")
        );
    }

    #[test]
    fn non_string_body_field_is_kept() {
        let body = Data::structure([("method", Data::list(vec![]))])
            .with_meta(HttpMeta::new(HttpLocation::body("application/x-www-form-urlencoded")));
        let mut w = WitnessBuilder::flickr().arg(body).build();
        assert_eq!(pop_body_element_by_name(&mut w, "method"), None);
        assert!(w.args.values().next().unwrap().as_struct().unwrap().fields.contains_key("method"));
    }

    #[test]
    fn multipart_none_struct() {
        assert_eq!(pop_multipart_element_by_name(None, "method"), None);
    }
}
