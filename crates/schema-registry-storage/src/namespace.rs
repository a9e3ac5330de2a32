//! Namespace constants — every entity type owns exactly one.

/// `SchemaMetadata` rows.
pub const SCHEMA_METADATA: &str = "schema_metadata";
/// `SchemaVersionInfo` rows.
pub const SCHEMA_VERSION: &str = "schema_version";
/// `SchemaFieldIndex` rows.
pub const SCHEMA_FIELD_INDEX: &str = "schema_field_index";
/// `SerDesInfo` rows.
pub const SERDES_INFO: &str = "serdes_info";
/// `SchemaSerDesMapping` rows.
pub const SCHEMA_SERDES_MAPPING: &str = "schema_serdes_mapping";
