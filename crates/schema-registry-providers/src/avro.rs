//! Apache Avro dialect provider, grounded in `apache-avro`'s parser and
//! canonical-form fingerprinting.

use apache_avro::schema::{RecordSchema, Schema as AvroSchema};
use sha2::{Digest, Sha256};

use schema_registry_core::error::{Error, Result};
use schema_registry_core::types::{CompatibilityPolicy, FieldDescriptor};

use crate::compat::fields_compatible;
use crate::provider::SchemaProvider;
use crate::AVRO;

/// Built-in Avro provider. Parsing failures surface as
/// [`Error::InvalidSchema`]; the digest is a SHA-256 of the schema's
/// canonical form, so whitespace/key-order differences in equivalent
/// schemas still fingerprint identically.
#[derive(Debug, Default)]
pub struct AvroProvider;

impl AvroProvider {
    pub fn new() -> Self {
        Self
    }

    fn parse(text: &str) -> Result<AvroSchema> {
        AvroSchema::parse_str(text).map_err(|e| Error::InvalidSchema(format!("avro: {e}")))
    }
}

impl SchemaProvider for AvroProvider {
    fn schema_type(&self) -> &str {
        AVRO
    }

    fn fingerprint(&self, text: &str) -> Result<Vec<u8>> {
        let schema = Self::parse(text)?;
        let mut hasher = Sha256::new();
        hasher.update(schema.canonical_form().as_bytes());
        Ok(hasher.finalize().to_vec())
    }

    fn generate_fields(&self, text: &str) -> Result<Vec<FieldDescriptor>> {
        let schema = Self::parse(text)?;
        let mut fields = Vec::new();
        walk(&schema, None, &mut fields);
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

fn walk(schema: &AvroSchema, namespace: Option<String>, out: &mut Vec<FieldDescriptor>) {
    match schema {
        AvroSchema::Record(record) => walk_record(record, out),
        AvroSchema::Array(inner) | AvroSchema::Map(inner) => walk(inner, namespace, out),
        AvroSchema::Union(union) => {
            for variant in union.variants() {
                walk(variant, namespace.clone(), out);
            }
        }
        _ => {}
    }
}

fn walk_record(record: &RecordSchema, out: &mut Vec<FieldDescriptor>) {
    let namespace = Some(record.name.fullname(None));
    for field in &record.fields {
        out.push(FieldDescriptor {
            name: field.name.clone(),
            namespace: namespace.clone(),
            field_type: type_name(&field.schema),
        });
        walk(&field.schema, namespace.clone(), out);
    }
}

fn type_name(schema: &AvroSchema) -> String {
    match schema {
        AvroSchema::Null => "null".to_string(),
        AvroSchema::Boolean => "boolean".to_string(),
        AvroSchema::Int => "int".to_string(),
        AvroSchema::Long => "long".to_string(),
        AvroSchema::Float => "float".to_string(),
        AvroSchema::Double => "double".to_string(),
        AvroSchema::Bytes => "bytes".to_string(),
        AvroSchema::String => "string".to_string(),
        AvroSchema::Array(inner) => format!("array<{}>", type_name(inner)),
        AvroSchema::Map(inner) => format!("map<{}>", type_name(inner)),
        AvroSchema::Union(union) => union.variants().iter().map(type_name).collect::<Vec<_>>().join("|"),
        AvroSchema::Record(record) => record.name.fullname(None),
        AvroSchema::Enum(e) => e.name.fullname(None),
        AvroSchema::Fixed(f) => format!("fixed({})", f.size),
        other => format!("{other:?}").split_whitespace().next().unwrap_or("unknown").to_string(),
    }
}
