//! NSID format tagging
//!
//! Flickr account ids ("NSIDs") look like `12345678@N01`. Every string
//! primitive of that shape anywhere in a witness is tagged with a custom
//! format.

use once_cell::sync::Lazy;
use regex::Regex;
use witness_ir::{Data, Value, Witness};

use crate::config::RewriterConfig;

static NSID_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[0-9]+@N[0-9]+$").expect("NSID pattern is a valid regex"));

/// Check whether `s` has the NSID shape
#[inline]
#[must_use]
pub fn is_nsid(s: &str) -> bool {
    NSID_RE.is_match(s)
}

/// Tag every NSID string under args and responses
///
/// Returns the number of primitives that matched. Tagging only sets the
/// format kind and adds a flag, so running it again changes nothing.
pub fn detect_nsids(witness: &mut Witness, config: &RewriterConfig) -> usize {
    let mut tagged = 0;
    for data in witness.args.values_mut().chain(witness.responses.values_mut()) {
        tagged += detect_nsids_data(data, config);
    }
    tagged
}

/// Tag every NSID string reachable from `data`
pub fn detect_nsids_data(data: &mut Data, config: &RewriterConfig) -> usize {
    match &mut data.value {
        Value::Primitive(prim) => {
            // non-strings can't be NSIDs; leaves end the walk either way
            let Some(s) = prim.as_str() else {
                return 0;
            };
            if !is_nsid(s) {
                return 0;
            }
            tracing::debug!(nsid = s, "NSID found");
            prim.format_kind.clone_from(&config.format_kind);
            prim.formats.insert(config.nsid_format.clone(), true);
            1
        }
        Value::Struct(s) => s.fields.values_mut().map(|d| detect_nsids_data(d, config)).sum(),
        Value::List(list) => list.elems.iter_mut().map(|d| detect_nsids_data(d, config)).sum(),
        Value::Optional(opt) => opt
            .value
            .as_deref_mut()
            .map_or(0, |d| detect_nsids_data(d, config)),
        Value::Oneof(oneof) => oneof
            .options
            .values_mut()
            .map(|d| detect_nsids_data(d, config))
            .sum(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use witness_ir::{Primitive, PrimitiveValue};

    fn tagged(data: &Data) -> bool {
        data.as_primitive().is_some_and(|p| p.format_kind == "flickr_data" && p.has_format("flickr_nsid"))
    }

    #[test]
    fn nsid_shapes() {
        assert!(is_nsid("12345678@N01"));
        assert!(is_nsid("1@N0"));
        assert!(!is_nsid("hello@Nx"));
        assert!(!is_nsid("abc@N12"));
        assert!(!is_nsid("123@N"));
        assert!(!is_nsid("123@n01"));
        assert!(!is_nsid(" 123@N01"));
    }

    #[test]
    fn tags_nested_values() {
        let config = RewriterConfig::default();
        let mut data = Data::structure([
            ("owner", Data::string("12345678@N01")),
            ("title", Data::string("sunset")),
            (
                "people",
                Data::list(vec![Data::some(Data::string("1@N02")), Data::none()]),
            ),
            ("union", Data::oneof([("a", Data::string("99@N00"))])),
        ]);
        assert_eq!(detect_nsids_data(&mut data, &config), 3);

        let s = data.as_struct().unwrap();
        assert!(tagged(&s.fields["owner"]));
        assert!(!tagged(&s.fields["title"]));
        assert_eq!(s.fields["title"].as_primitive().unwrap(), &Primitive::string("sunset"));
    }

    #[test]
    fn non_string_primitive_ignored() {
        let mut data = Data::primitive(Primitive::new(PrimitiveValue::Uint64(12_345)));
        assert_eq!(detect_nsids_data(&mut data, &RewriterConfig::default()), 0);
        assert!(data.as_primitive().unwrap().formats.is_empty());
    }

    #[test]
    fn existing_flags_are_kept() {
        let mut prim = Primitive::string("5@N5");
        prim.formats.insert("other".to_string(), true);
        let mut data = Data::primitive(prim);
        detect_nsids_data(&mut data, &RewriterConfig::default());
        let p = data.as_primitive().unwrap();
        assert!(p.has_format("other"));
        assert!(p.has_format("flickr_nsid"));
    }

    fn arb_data() -> impl Strategy<Value = Data> {
        let leaf = prop_oneof![
            "[0-9]{1,8}@N[0-9]{1,2}".prop_map(|s| Data::string(s)),
            "[a-zA-Z0-9@]{0,10}".prop_map(|s| Data::string(s)),
            any::<i64>().prop_map(|n| Data::primitive(Primitive::new(PrimitiveValue::Int64(n)))),
            Just(Data::none()),
        ];
        leaf.prop_recursive(4, 32, 4, |inner| {
            prop_oneof![
                prop::collection::vec(inner.clone(), 0..4).prop_map(Data::list),
                prop::collection::btree_map("[a-z]{1,4}", inner.clone(), 0..4).prop_map(|m| Data::structure(m)),
                inner.clone().prop_map(Data::some),
                prop::collection::btree_map("[a-z]{1,4}", inner, 0..3).prop_map(|m| Data::oneof(m)),
            ]
        })
    }

    proptest! {
        #[test]
        fn prop_tagging_is_idempotent(data in arb_data()) {
            let config = RewriterConfig::default();
            let mut once = data;
            let first = detect_nsids_data(&mut once, &config);
            let mut twice = once.clone();
            let second = detect_nsids_data(&mut twice, &config);
            prop_assert_eq!(first, second);
            prop_assert_eq!(once, twice);
        }

        #[test]
        fn prop_nsid_strings_always_tagged(a in "[0-9]{1,12}", b in "[0-9]{1,4}") {
            let mut data = Data::string(format!("{a}@N{b}"));
            prop_assert_eq!(detect_nsids_data(&mut data, &RewriterConfig::default()), 1);
            prop_assert!(tagged(&data));
        }

        #[test]
        fn prop_letter_prefix_never_tagged(a in "[a-z]{1,6}", b in "[0-9]{1,4}") {
            let mut data = Data::string(format!("{a}@N{b}"));
            prop_assert_eq!(detect_nsids_data(&mut data, &RewriterConfig::default()), 0);
        }
    }
}
