//! # Schema Registry Providers
//!
//! The pluggable dialect layer (spec §4.1, §6): a `SchemaProvider` knows how
//! to fingerprint, extract fields from, and check compatibility for schemas
//! of one dialect. `ProviderRegistry` is the in-memory, read-only-after-init
//! mapping from dialect tag to provider the engine looks up against.

pub mod avro;
mod compat;
pub mod json_schema;
pub mod provider;
pub mod registry;

pub use avro::AvroProvider;
pub use json_schema::JsonSchemaProvider;
pub use provider::SchemaProvider;
pub use registry::ProviderRegistry;

/// Dialect tag for Apache Avro schemas.
pub const AVRO: &str = "avro";
/// Dialect tag for JSON Schema.
pub const JSON_SCHEMA: &str = "json-schema";
