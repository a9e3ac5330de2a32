//! # Schema Registry Core
//!
//! Domain types shared by every other crate in the workspace: the data
//! model (`SchemaMetadata`, `SchemaVersionInfo`, `SchemaFieldIndex`,
//! `SerDesInfo`, `SchemaSerDesMapping`), the error taxonomy, the
//! compatibility-policy and field-descriptor value types, and the typed
//! configuration view. Nothing here talks to storage, a provider, or a
//! network — those are the concerns of the sibling crates.

pub mod config;
pub mod error;
pub mod model;
pub mod types;

pub use config::RegistryConfig;
pub use error::{Error, Result};
pub use model::{SchemaFieldIndex, SchemaMetadata, SchemaSerDesMapping, SchemaVersionInfo, SerDesInfo};
pub use types::{CompatibilityPolicy, FieldDescriptor};
