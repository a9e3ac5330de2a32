//! Binding a serializer/deserializer pair to a schema registered through the
//! same lifecycle engine.

use schema_registry_core::types::CompatibilityPolicy;
use schema_registry_serdes::NewSerDesInfo;

use crate::support::{avro_meta, engine_and_serdes, ORDER_V1};

#[tokio::test]
async fn binds_serializer_and_deserializer_to_a_registered_schema() {
    let (engine, serdes) = engine_and_serdes();

    engine
        .add_schema_version_for_metadata(avro_meta("Order", CompatibilityPolicy::Backward), ORDER_V1, "initial")
        .await
        .unwrap();

    // The write path returns a version number, not a metadata id; resolve it
    // back through the metadata row the way a real caller would.
    let metadata = engine.get_schema_metadata("Order").await.unwrap().expect("just registered");

    let serializer_file = serdes.upload_file(b"serializer.jar".to_vec()).await.unwrap();
    let deserializer_file = serdes.upload_file(b"deserializer.jar".to_vec()).await.unwrap();

    let serializer_id = serdes
        .add_serdes_info(NewSerDesInfo {
            name: "OrderSerializer".to_string(),
            class_name: "com.example.OrderSerializer".to_string(),
            file_id: serializer_file,
            is_serializer: true,
        })
        .await
        .unwrap();
    let deserializer_id = serdes
        .add_serdes_info(NewSerDesInfo {
            name: "OrderDeserializer".to_string(),
            class_name: "com.example.OrderDeserializer".to_string(),
            file_id: deserializer_file,
            is_serializer: false,
        })
        .await
        .unwrap();

    serdes.map_serdes_with_schema(metadata.id, serializer_id).await.unwrap();
    serdes.map_serdes_with_schema(metadata.id, deserializer_id).await.unwrap();

    let serializers = serdes.get_schema_serializers(metadata.id).await.unwrap();
    let deserializers = serdes.get_schema_deserializers(metadata.id).await.unwrap();

    assert_eq!(serializers.len(), 1);
    assert_eq!(serializers[0].id, serializer_id);
    assert_eq!(deserializers.len(), 1);
    assert_eq!(deserializers[0].id, deserializer_id);
}

#[tokio::test]
async fn downloaded_jar_bytes_match_what_was_uploaded() {
    let (_, serdes) = engine_and_serdes();
    let file_id = serdes.upload_file(b"the actual bytes".to_vec()).await.unwrap();
    let id = serdes
        .add_serdes_info(NewSerDesInfo {
            name: "X".to_string(),
            class_name: "com.example.X".to_string(),
            file_id,
            is_serializer: true,
        })
        .await
        .unwrap();

    assert_eq!(serdes.download_jar(id).await.unwrap(), b"the actual bytes".to_vec());
}

#[tokio::test]
async fn binding_an_unknown_serdes_id_fails_without_creating_a_mapping() {
    let (_, serdes) = engine_and_serdes();
    let err = serdes.map_serdes_with_schema(1, 999).await.unwrap_err();
    assert!(matches!(err, schema_registry_core::error::Error::SerDesNotFound(_)));
    assert!(serdes.list_bindings(1).await.unwrap().is_empty());
}
