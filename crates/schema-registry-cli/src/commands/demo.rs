//! Runs the canonical end-to-end lifecycle scenario against one throwaway
//! session: register, evolve compatibly, reject an incompatible candidate,
//! dedup a resubmission, search by field, and bind a serializer.

use schema_registry_core::types::CompatibilityPolicy;
use schema_registry_engine::{FieldSearchQuery, NewSchemaMetadata};
use schema_registry_serdes::NewSerDesInfo;

use super::session::Session;
use crate::error::Result;
use crate::output;

const ORDER_V1: &str = r#"{"type":"record","name":"Order","fields":[{"name":"id","type":"long"}]}"#;
const ORDER_V2: &str =
    r#"{"type":"record","name":"Order","fields":[{"name":"id","type":"long"},{"name":"total","type":"double"}]}"#;
const ORDER_DROPPED_ID: &str = r#"{"type":"record","name":"Order","fields":[{"name":"total","type":"double"}]}"#;

pub async fn run() -> Result<()> {
    let session = Session::new();

    output::print_info("registering Order metadata and its first version");
    let meta = NewSchemaMetadata {
        name: "Order".to_string(),
        schema_type: "avro".to_string(),
        group: "orders".to_string(),
        compatibility: CompatibilityPolicy::Backward,
        description: "an order placed by a customer".to_string(),
    };
    let v1 = session.engine.add_schema_version_for_metadata(meta, ORDER_V1, "initial").await?;
    output::print_success(&format!("Order v{v1} registered"));

    output::print_info("resubmitting the identical text");
    let dedup = session.engine.add_schema_version("Order", ORDER_V1, "resubmit").await?;
    output::print_success(&format!("dedup returned v{dedup} (no new row written)"));

    output::print_info("evolving with a compatible addition");
    let v2 = session.engine.add_schema_version("Order", ORDER_V2, "adds total").await?;
    output::print_success(&format!("Order v{v2} registered"));

    output::print_info("attempting an incompatible evolution (drops a required field)");
    match session.engine.add_schema_version("Order", ORDER_DROPPED_ID, "drops id").await {
        Ok(v) => output::print_warning(&format!("expected rejection but got v{v}")),
        Err(e) => output::print_success(&format!("rejected as expected: {e}")),
    }

    output::print_info("searching for schemas indexing a long-typed field named id");
    let hits = session
        .engine
        .find_schemas_with_fields(FieldSearchQuery {
            name: Some("id".to_string()),
            namespace: None,
            field_type: Some("long".to_string()),
        })
        .await?;
    output::print_table(
        vec!["Name", "Version"],
        hits.into_iter().map(|(name, version)| vec![name, version.to_string()]).collect(),
    );

    output::print_info("uploading and binding a serializer");
    let meta_row = session
        .engine
        .get_schema_metadata("Order")
        .await?
        .expect("Order metadata was just registered");
    let file_id = session.serdes.upload_file(b"compiled-serializer-bytes".to_vec()).await?;
    let serdes_id = session
        .serdes
        .add_serdes_info(NewSerDesInfo {
            name: "OrderSerializer".to_string(),
            class_name: "com.example.OrderSerializer".to_string(),
            file_id,
            is_serializer: true,
        })
        .await?;
    session.serdes.map_serdes_with_schema(meta_row.id, serdes_id).await?;
    let serializers = session.serdes.get_schema_serializers(meta_row.id).await?;
    output::print_success(&format!("{} serializer(s) bound to Order", serializers.len()));

    output::print_info("final version history");
    let versions = session.engine.find_all_versions("Order").await?;
    output::print_table(
        vec!["Version", "Fingerprint", "Description"],
        versions
            .into_iter()
            .map(|v| vec![v.version.to_string(), v.fingerprint, v.description])
            .collect(),
    );

    Ok(())
}
