//! Property-based tests for provider validation and fingerprinting
//! (spec §4.1: fingerprinting doubles as validation; equal bytes imply
//! semantic identity within a dialect).

use proptest::prelude::*;
use schema_registry_providers::{AvroProvider, SchemaProvider};

fn record(fields: &[(&str, &str)]) -> String {
    let body = fields
        .iter()
        .map(|(name, ty)| format!("{{\"name\":\"{name}\",\"type\":\"{ty}\"}}"))
        .collect::<Vec<_>>()
        .join(",");
    format!(r#"{{"type":"record","name":"Order","fields":[{body}]}}"#)
}

fn distinct_field_names() -> impl Strategy<Value = Vec<String>> {
    proptest::collection::vec("[a-z][a-z0-9]{0,6}", 0..6).prop_map(|mut names| {
        names.sort();
        names.dedup();
        names
    })
}

// Fingerprinting is deterministic: the same text always digests to the same
// bytes, regardless of how many times it's asked.
proptest! {
    #[test]
    fn fingerprint_is_deterministic(extra_fields in distinct_field_names()) {
        let provider = AvroProvider::new();
        let fields: Vec<(&str, &str)> = extra_fields.iter().map(|n| (n.as_str(), "long")).collect();
        let text = record(&fields);

        let first = provider.fingerprint(&text).unwrap();
        let second = provider.fingerprint(&text).unwrap();
        prop_assert_eq!(first, second);
    }
}

// Adding, removing, or renaming a field always changes the fingerprint:
// no two distinct field sets collide.
proptest! {
    #[test]
    fn distinct_field_sets_never_collide(
        base_fields in distinct_field_names(),
        extra_field in "[a-z][a-z0-9]{0,6}",
    ) {
        prop_assume!(!base_fields.contains(&extra_field));

        let provider = AvroProvider::new();
        let base_pairs: Vec<(&str, &str)> = base_fields.iter().map(|n| (n.as_str(), "long")).collect();
        let base_text = record(&base_pairs);

        let mut extended_pairs = base_pairs.clone();
        extended_pairs.push((extra_field.as_str(), "long"));
        let extended_text = record(&extended_pairs);

        prop_assert_ne!(provider.fingerprint(&base_text).unwrap(), provider.fingerprint(&extended_text).unwrap());
    }
}

// Any syntactically valid field-name sequence parses and extracts exactly
// one field descriptor per field, with no panics — including the empty
// field list (spec §4.3's "empty field list is allowed" edge case).
proptest! {
    #[test]
    fn generate_fields_extracts_one_descriptor_per_field(extra_fields in distinct_field_names()) {
        let provider = AvroProvider::new();
        let fields: Vec<(&str, &str)> = extra_fields.iter().map(|n| (n.as_str(), "long")).collect();
        let text = record(&fields);

        let descriptors = provider.generate_fields(&text).unwrap();
        prop_assert_eq!(descriptors.len(), extra_fields.len());
        for name in &extra_fields {
            prop_assert!(descriptors.iter().any(|d| &d.name == name && d.field_type == "long"));
        }
    }
}

// Text that cannot be parsed as the dialect's wire format always fails with
// `InvalidSchema`, never a panic, regardless of how the garbage is shaped.
proptest! {
    #[test]
    fn unparseable_text_is_always_invalid_schema(garbage in "[^{}\"]{0,40}") {
        // "null" is valid JSON and Avro's own encoding of the null type; every
        // other string this strategy can produce (braces and quotes are
        // excluded, so no valid record or primitive-type-name literal can
        // form) is neither a valid Avro object schema nor a quoted type name.
        prop_assume!(garbage != "null");

        let provider = AvroProvider::new();
        let err = provider.fingerprint(&garbage).unwrap_err();
        prop_assert!(err.is_invalid_schema());
    }
}
