//! Entities of the schema registry data model (spec §3).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::types::CompatibilityPolicy;

/// A logical schema: the "topic" of evolution that versions accumulate
/// under. Unique by `name` (I1); `id` is the storage-assigned surrogate key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SchemaMetadata {
    pub id: i64,
    pub name: String,
    /// Dialect tag routed to the provider registry, e.g. `"avro"`.
    pub schema_type: String,
    pub group: String,
    pub compatibility: CompatibilityPolicy,
    pub description: String,
    pub created_at: DateTime<Utc>,
}

/// An immutable revision of a logical schema. Never mutated once written
/// (I6); natural key is `(schema_metadata_id, version)`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SchemaVersionInfo {
    pub id: i64,
    pub schema_metadata_id: i64,
    /// Denormalized for convenient display; always equal to the owning
    /// metadata's `name`.
    pub name: String,
    pub version: i64,
    pub text: String,
    /// Hex-encoded provider fingerprint.
    pub fingerprint: String,
    pub description: String,
    pub created_at: DateTime<Utc>,
}

/// A row enabling structural field search. Every row references an
/// existing `SchemaVersionInfo` and is inserted in the same critical
/// section as that version row (I5).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SchemaFieldIndex {
    pub id: i64,
    pub schema_version_id: i64,
    pub field_name: String,
    pub field_namespace: Option<String>,
    pub field_type: String,
}

/// An uploaded serializer/deserializer descriptor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SerDesInfo {
    pub id: i64,
    pub name: String,
    pub class_name: String,
    /// Opaque id under which the artifact bytes are stored in the file
    /// store; resolved by name on download (the stored path is never
    /// surfaced to callers).
    pub file_id: String,
    pub is_serializer: bool,
    pub created_at: DateTime<Utc>,
}

/// N:M link between a logical schema and a serdes descriptor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchemaSerDesMapping {
    pub schema_metadata_id: i64,
    pub serdes_id: i64,
}
