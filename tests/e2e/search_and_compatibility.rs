//! Read-path behavior: field search, per-version compatibility checks, and
//! metadata summaries.

use schema_registry_core::types::CompatibilityPolicy;
use schema_registry_engine::FieldSearchQuery;

use crate::support::{avro_meta, engine, ORDER_V1, ORDER_V2};

#[tokio::test]
async fn field_search_resolves_back_to_owning_schema_and_version() {
    let engine = engine();
    engine
        .add_schema_version_for_metadata(avro_meta("Order", CompatibilityPolicy::Backward), ORDER_V1, "initial")
        .await
        .unwrap();
    engine.add_schema_version("Order", ORDER_V2, "adds total").await.unwrap();

    let hits = engine
        .find_schemas_with_fields(FieldSearchQuery {
            name: Some("total".to_string()),
            namespace: None,
            field_type: Some("double".to_string()),
        })
        .await
        .unwrap();

    assert_eq!(hits, vec![("Order".to_string(), 2)]);
}

#[tokio::test]
async fn field_search_with_no_filters_matches_every_indexed_field() {
    let engine = engine();
    engine
        .add_schema_version_for_metadata(avro_meta("Order", CompatibilityPolicy::Backward), ORDER_V1, "initial")
        .await
        .unwrap();

    let hits = engine.find_schemas_with_fields(FieldSearchQuery::default()).await.unwrap();
    assert!(hits.contains(&("Order".to_string(), 1)));
}

#[tokio::test]
async fn find_schema_metadata_lists_registered_schemas() {
    let engine = engine();
    engine.add_schema_metadata(avro_meta("Order", CompatibilityPolicy::Backward)).await.unwrap();
    engine.add_schema_metadata(avro_meta("Customer", CompatibilityPolicy::Full)).await.unwrap();

    let all = engine.find_schema_metadata(&[]).await.unwrap();
    assert_eq!(all.len(), 2);

    let filtered = engine
        .find_schema_metadata(&[("name", serde_json::json!("Order"))])
        .await
        .unwrap();
    assert_eq!(filtered.len(), 1);
    assert_eq!(filtered[0].name, "Order");
}

#[tokio::test]
async fn is_compatible_with_all_checks_every_stored_version_not_just_the_latest() {
    let engine = engine();
    engine
        .add_schema_version_for_metadata(avro_meta("Order", CompatibilityPolicy::Backward), ORDER_V1, "initial")
        .await
        .unwrap();
    engine.add_schema_version("Order", ORDER_V2, "adds total").await.unwrap();

    assert!(engine.is_compatible_with_all("Order", ORDER_V2).await.unwrap());

    let drops_total = r#"{"type":"record","name":"Order","fields":[{"name":"id","type":"long"}]}"#;
    // Still carries every field of v1, so compatible with all existing versions.
    assert!(engine.is_compatible_with_all("Order", drops_total).await.unwrap());

    let drops_id = r#"{"type":"record","name":"Order","fields":[{"name":"total","type":"double"}]}"#;
    assert!(!engine.is_compatible_with_all("Order", drops_id).await.unwrap());
}

#[tokio::test]
async fn is_compatible_with_version_checks_exactly_one_prior_version() {
    let engine = engine();
    engine
        .add_schema_version_for_metadata(avro_meta("Order", CompatibilityPolicy::Backward), ORDER_V1, "initial")
        .await
        .unwrap();
    engine.add_schema_version("Order", ORDER_V2, "adds total").await.unwrap();

    assert!(engine.is_compatible_with_version("Order", 1, ORDER_V2).await.unwrap());

    let unrelated = r#"{"type":"record","name":"Order","fields":[{"name":"total","type":"double"}]}"#;
    assert!(!engine.is_compatible_with_version("Order", 1, unrelated).await.unwrap());
}

#[tokio::test]
async fn get_schema_version_info_is_cached_across_repeated_lookups() {
    let engine = engine();
    engine
        .add_schema_version_for_metadata(avro_meta("Order", CompatibilityPolicy::Backward), ORDER_V1, "initial")
        .await
        .unwrap();

    let first = engine.get_schema_version_info("Order", 1).await.unwrap();
    let second = engine.get_schema_version_info("Order", 1).await.unwrap();
    assert_eq!(first, second);
}
