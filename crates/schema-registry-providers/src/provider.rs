//! Schema Dialect Provider contract (spec §4.1, §6).
//!
//! A provider owns everything dialect-specific: parsing, fingerprinting,
//! field extraction, and the compatibility predicate for one compatibility
//! policy routed through unchanged from the caller. The engine never
//! interprets schema text itself — it only ever asks a provider.

use schema_registry_core::error::Result;
use schema_registry_core::types::{CompatibilityPolicy, FieldDescriptor};

/// A pluggable schema dialect: Avro, JSON Schema, or any other format the
/// registry is extended with. Implementations must be deterministic —
/// `fingerprint` in particular is relied on for content-identity dedup (I3).
pub trait SchemaProvider: Send + Sync {
    /// Stable dialect tag, e.g. `"avro"`. Matches the key it is registered
    /// under in the [`ProviderRegistry`](crate::registry::ProviderRegistry).
    fn schema_type(&self) -> &str;

    /// Deterministic digest of `text`. Equal bytes imply semantic identity
    /// within this dialect. Doubles as text validation: a text that fails
    /// to parse must return `Err(Error::InvalidSchema(_))`, never a panic.
    fn fingerprint(&self, text: &str) -> Result<Vec<u8>>;

    /// Extract `(name, namespace, type)` triples for structural indexing.
    /// An empty schema (no fields) is valid and yields an empty list.
    fn generate_fields(&self, text: &str) -> Result<Vec<FieldDescriptor>>;

    /// Evaluate whether `candidate` is an acceptable successor to every text
    /// in `existing` under `policy`. The engine passes exactly one element
    /// in `existing` on the write path (the latest version) and the full
    /// history on the read-path "compatible with all versions" query
    /// (spec §4.4); the provider does not need to know which case it is in.
    fn is_compatible(&self, candidate: &str, existing: &[String], policy: CompatibilityPolicy) -> Result<bool>;
}
