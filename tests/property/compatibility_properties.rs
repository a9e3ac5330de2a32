//! Property-based tests for compatibility enforcement (spec §8: P6, plus the
//! directional properties §4.1/§4.3 step 4 rest on), driven against the real
//! `AvroProvider` and `LifecycleEngine` — no mocks.

use proptest::prelude::*;
use schema_registry_core::types::CompatibilityPolicy;
use schema_registry_providers::{AvroProvider, SchemaProvider};

use crate::block_on;
use crate::support::{avro_meta, engine};

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

// A schema text is always backward-, forward-, and fully-compatible with
// itself: appending the same field set to the same field set changes
// nothing in either direction.
proptest! {
    #[test]
    fn schema_is_compatible_with_itself_under_every_policy(extra_fields in distinct_field_names()) {
        let provider = AvroProvider::new();
        let fields: Vec<(&str, &str)> = extra_fields.iter().map(|n| (n.as_str(), "long")).collect();
        let text = record(&fields);

        for policy in [
            CompatibilityPolicy::None,
            CompatibilityPolicy::Backward,
            CompatibilityPolicy::Forward,
            CompatibilityPolicy::Full,
            CompatibilityPolicy::Both,
        ] {
            prop_assert!(provider.is_compatible(&text, &[text.clone()], policy).unwrap());
        }
    }
}

// Adding a field is backward compatible (every existing field survives) but
// not forward compatible (the candidate has a field the existing text never
// had), for any field name not already present.
proptest! {
    #[test]
    fn adding_a_field_is_backward_but_not_forward_compatible(
        existing_fields in distinct_field_names(),
        new_field in "[a-z][a-z0-9]{0,6}",
    ) {
        prop_assume!(!existing_fields.contains(&new_field));

        let provider = AvroProvider::new();
        let existing_pairs: Vec<(&str, &str)> = existing_fields.iter().map(|n| (n.as_str(), "long")).collect();
        let existing_text = record(&existing_pairs);

        let mut candidate_pairs = existing_pairs.clone();
        candidate_pairs.push((new_field.as_str(), "long"));
        let candidate_text = record(&candidate_pairs);

        prop_assert!(provider
            .is_compatible(&candidate_text, &[existing_text.clone()], CompatibilityPolicy::Backward)
            .unwrap());
        prop_assert!(!provider
            .is_compatible(&candidate_text, &[existing_text], CompatibilityPolicy::Forward)
            .unwrap());
    }
}

// Dropping a field is never backward compatible, and `NONE` accepts it
// regardless.
proptest! {
    #[test]
    fn dropping_a_field_breaks_backward_compatibility(
        surviving_fields in distinct_field_names(),
        dropped_field in "[a-z][a-z0-9]{0,6}",
    ) {
        prop_assume!(!surviving_fields.contains(&dropped_field));

        let provider = AvroProvider::new();
        let mut existing_pairs: Vec<(&str, &str)> = surviving_fields.iter().map(|n| (n.as_str(), "long")).collect();
        existing_pairs.push((dropped_field.as_str(), "long"));
        let existing_text = record(&existing_pairs);

        let candidate_pairs: Vec<(&str, &str)> = surviving_fields.iter().map(|n| (n.as_str(), "long")).collect();
        let candidate_text = record(&candidate_pairs);

        prop_assert!(!provider
            .is_compatible(&candidate_text, &[existing_text.clone()], CompatibilityPolicy::Backward)
            .unwrap());
        prop_assert!(provider
            .is_compatible(&candidate_text, &[existing_text], CompatibilityPolicy::None)
            .unwrap());
    }
}

// P6: if the read-path `isCompatible` reports `false` for a candidate text
// against all existing versions, a subsequent `addSchemaVersion` call with
// that exact text fails with `IncompatibleSchema` and leaves the version
// history untouched.
proptest! {
    #[test]
    fn predicted_incompatibility_is_enforced_on_write(
        surviving_fields in distinct_field_names(),
        dropped_field in "[a-z][a-z0-9]{0,6}",
    ) {
        prop_assume!(!surviving_fields.contains(&dropped_field));

        block_on(async {
            let engine = engine();
            let mut existing_pairs: Vec<(&str, &str)> = surviving_fields.iter().map(|n| (n.as_str(), "long")).collect();
            existing_pairs.push((dropped_field.as_str(), "long"));
            let existing_text = record(&existing_pairs);

            engine
                .add_schema_version_for_metadata(avro_meta("Order", CompatibilityPolicy::Backward), &existing_text, "initial")
                .await
                .unwrap();

            let candidate_pairs: Vec<(&str, &str)> = surviving_fields.iter().map(|n| (n.as_str(), "long")).collect();
            let candidate_text = record(&candidate_pairs);

            let predicted_compatible = engine.is_compatible_with_all("Order", &candidate_text).await.unwrap();
            prop_assert!(!predicted_compatible);

            let before = engine.find_all_versions("Order").await.unwrap();
            let err = engine.add_schema_version("Order", &candidate_text, "drop").await.unwrap_err();
            prop_assert!(err.is_incompatible());
            let after = engine.find_all_versions("Order").await.unwrap();
            prop_assert_eq!(before.len(), after.len());
            Ok(())
        })?;
    }
}
