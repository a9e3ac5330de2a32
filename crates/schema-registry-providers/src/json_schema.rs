//! JSON Schema dialect provider, grounded in `serde_json` for canonical
//! re-serialization and the `jsonschema` crate for structural validation.

use sha2::{Digest, Sha256};

use schema_registry_core::error::{Error, Result};
use schema_registry_core::types::{CompatibilityPolicy, FieldDescriptor};

use crate::compat::fields_compatible;
use crate::provider::SchemaProvider;
use crate::JSON_SCHEMA;

/// Built-in JSON Schema provider. `serde_json::Value`'s default map
/// representation stores keys in sorted order (the `preserve_order`
/// feature is not enabled anywhere in this workspace), so re-serializing a
/// parsed value already canonicalizes key ordering for the fingerprint.
#[derive(Debug, Default)]
pub struct JsonSchemaProvider;

impl JsonSchemaProvider {
    pub fn new() -> Self {
        Self
    }

    fn parse(text: &str) -> Result<serde_json::Value> {
        let value: serde_json::Value =
            serde_json::from_str(text).map_err(|e| Error::InvalidSchema(format!("json-schema: {e}")))?;
        jsonschema::JSONSchema::compile(&value).map_err(|e| Error::InvalidSchema(format!("json-schema: {e}")))?;
        Ok(value)
    }
}

impl SchemaProvider for JsonSchemaProvider {
    fn schema_type(&self) -> &str {
        JSON_SCHEMA
    }

    fn fingerprint(&self, text: &str) -> Result<Vec<u8>> {
        let value = Self::parse(text)?;
        let canonical = serde_json::to_vec(&value)?;
        let mut hasher = Sha256::new();
        hasher.update(&canonical);
        Ok(hasher.finalize().to_vec())
    }

    fn generate_fields(&self, text: &str) -> Result<Vec<FieldDescriptor>> {
        let value = Self::parse(text)?;
        let mut fields = Vec::new();
        walk(&value, None, &mut fields);
        Ok(fields)
    }

    fn is_compatible(&self, candidate: &str, existing: &[String], policy: CompatibilityPolicy) -> Result<bool> {
        let candidate_fields = self.generate_fields(candidate)?;
        for text in existing {
            let existing_fields = self.generate_fields(text)?;
            if !fields_compatible(&candidate_fields, &existing_fields, policy) {
                return Ok(false);
            }
        }
        Ok(true)
    }
}

fn walk(value: &serde_json::Value, namespace: Option<String>, out: &mut Vec<FieldDescriptor>) {
    let Some(properties) = value.get("properties").and_then(|p| p.as_object()) else {
        return;
    };

    for (name, prop) in properties {
        let field_type = prop
            .get("type")
            .and_then(|t| t.as_str())
            .map(str::to_string)
            .unwrap_or_else(|| "any".to_string());

        out.push(FieldDescriptor {
            name: name.clone(),
            namespace: namespace.clone(),
            field_type,
        });

        let nested_namespace = Some(match &namespace {
            Some(parent) => format!("{parent}.{name}"),
            None => name.clone(),
        });
        walk(prop, nested_namespace, out);
    }
}
