//! Read-path DTOs for the lifecycle engine.

/// Projection returned by `findSchemaMetadata` (spec §4.4): `(name, type,
/// group)`, never the full metadata row.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct SchemaMetadataSummary {
    pub name: String,
    pub schema_type: String,
    pub group: String,
}

/// Query for `findSchemasWithFields`: filters drawn from the non-null
/// members of `{name, namespace, type}` (spec §4.4).
#[derive(Debug, Clone, Default)]
pub struct FieldSearchQuery {
    pub name: Option<String>,
    pub namespace: Option<String>,
    pub field_type: Option<String>,
}

impl FieldSearchQuery {
    pub(crate) fn as_filters(&self) -> Vec<(&str, serde_json::Value)> {
        let mut filters = Vec::new();
        if let Some(name) = &self.name {
            filters.push(("field_name", serde_json::json!(name)));
        }
        if let Some(namespace) = &self.namespace {
            filters.push(("field_namespace", serde_json::json!(namespace)));
        }
        if let Some(field_type) = &self.field_type {
            filters.push(("field_type", serde_json::json!(field_type)));
        }
        filters
    }
}
