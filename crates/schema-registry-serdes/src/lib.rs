//! # Schema Registry SerDes
//!
//! The SerDes Binding Manager (spec §4.5): associates uploaded
//! serializer/deserializer artifacts with schema identities, classifies
//! them as serializer vs. deserializer, and streams artifact bytes back
//! through the file store.

use std::sync::Arc;

use chrono::Utc;
use serde_json::json;
use uuid::Uuid;

use schema_registry_core::error::{Error, Result};
use schema_registry_core::model::{SchemaSerDesMapping, SerDesInfo};
use schema_registry_storage::namespace::{SCHEMA_SERDES_MAPPING, SERDES_INFO};
use schema_registry_storage::port::{FileStorePort, StoragePort, TypedStoragePort};

/// Input to [`SerDesBindingManager::add_serdes_info`].
#[derive(Debug, Clone)]
pub struct NewSerDesInfo {
    pub name: String,
    pub class_name: String,
    /// File id returned by a prior [`SerDesBindingManager::upload_file`] call.
    pub file_id: String,
    pub is_serializer: bool,
}

pub struct SerDesBindingManager {
    storage: Arc<dyn StoragePort>,
    file_store: Arc<dyn FileStorePort>,
}

impl SerDesBindingManager {
    pub fn new(storage: Arc<dyn StoragePort>, file_store: Arc<dyn FileStorePort>) -> Self {
        Self { storage, file_store }
    }

    /// `uploadFile`: generate a fresh opaque id, stream `bytes` to the file
    /// store under that id, return it. The returned id is the generated
    /// name, not a path — callers resolve by name on download (spec §9's
    /// "uploadFile discards the returned path" note).
    pub async fn upload_file(&self, bytes: Vec<u8>) -> Result<String> {
        let name = Uuid::new_v4().to_string();
        self.file_store.upload(bytes, &name).await
    }

    /// `downloadFile`.
    pub async fn download_file(&self, file_id: &str) -> Result<Vec<u8>> {
        self.file_store.download(file_id).await
    }

    /// `downloadJar`: resolve the serdes record, then stream its artifact
    /// from the file store.
    pub async fn download_jar(&self, serdes_id: i64) -> Result<Vec<u8>> {
        let info = self.get_serdes_info(serdes_id).await?;
        self.file_store.download(&info.file_id).await
    }

    /// `addSerDesInfo`: allocate an id, stamp a timestamp, persist.
    pub async fn add_serdes_info(&self, info: NewSerDesInfo) -> Result<i64> {
        let id = self.storage.next_id(SERDES_INFO).await?;
        let row = SerDesInfo {
            id,
            name: info.name,
            class_name: info.class_name,
            file_id: info.file_id,
            is_serializer: info.is_serializer,
            created_at: Utc::now(),
        };
        self.storage.add_typed(SERDES_INFO, id, &row).await?;
        Ok(id)
    }

    /// `getSerDesInfo`: primary-key lookup.
    pub async fn get_serdes_info(&self, id: i64) -> Result<SerDesInfo> {
        self.storage
            .get_typed(SERDES_INFO, id)
            .await?
            .ok_or_else(|| Error::SerDesNotFound(id.to_string()))
    }

    /// `mapSerDesWithSchema`: fails with [`Error::SerDesNotFound`] if
    /// `serdes_id` does not exist; otherwise persists the mapping row.
    pub async fn map_serdes_with_schema(&self, schema_metadata_id: i64, serdes_id: i64) -> Result<()> {
        self.get_serdes_info(serdes_id).await?;

        let id = self.storage.next_id(SCHEMA_SERDES_MAPPING).await?;
        let mapping = SchemaSerDesMapping {
            schema_metadata_id,
            serdes_id,
        };
        self.storage.add_typed(SCHEMA_SERDES_MAPPING, id, &mapping).await
    }

    /// The natural inverse of `getSchemaSerializers`/`getSchemaDeserializers`
    /// (SPEC_FULL §3 supplement): every serdes bound to `schema_metadata_id`
    /// regardless of serializer/deserializer classification.
    pub async fn list_bindings(&self, schema_metadata_id: i64) -> Result<Vec<SerDesInfo>> {
        let mappings: Vec<SchemaSerDesMapping> = self
            .storage
            .find_typed(SCHEMA_SERDES_MAPPING, &[("schema_metadata_id", json!(schema_metadata_id))])
            .await?;

        let mut out = Vec::with_capacity(mappings.len());
        for mapping in mappings {
            if let Some(info) = self.storage.get_typed::<SerDesInfo>(SERDES_INFO, mapping.serdes_id).await? {
                out.push(info);
            }
        }
        Ok(out)
    }

    /// `getSchemaSerializers`.
    pub async fn get_schema_serializers(&self, schema_metadata_id: i64) -> Result<Vec<SerDesInfo>> {
        Ok(self
            .list_bindings(schema_metadata_id)
            .await?
            .into_iter()
            .filter(|s| s.is_serializer)
            .collect())
    }

    /// `getSchemaDeserializers`. Spec §9 flags the source's selection
    /// predicate here as a brittle `(isSerializer && s.is_serializer) ||
    /// !s.is_serializer` construction that happens to reduce to "not a
    /// serializer"; this reimplements it directly as `!s.is_serializer`.
    pub async fn get_schema_deserializers(&self, schema_metadata_id: i64) -> Result<Vec<SerDesInfo>> {
        Ok(self
            .list_bindings(schema_metadata_id)
            .await?
            .into_iter()
            .filter(|s| !s.is_serializer)
            .collect())
    }
}
