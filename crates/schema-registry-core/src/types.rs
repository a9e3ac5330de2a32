//! Shared value types: compatibility policy and field descriptors.

use serde::{Deserialize, Serialize};

/// Compatibility policy under which a candidate schema text is accepted as a
/// successor to prior versions. The exact predicate each variant implies is
/// dialect-defined (see `schema-registry-providers`); the engine only routes
/// the policy through to the provider unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CompatibilityPolicy {
    /// No compatibility is enforced.
    None,
    /// New schema can read data written with the prior schema.
    Backward,
    /// Prior schema can read data written with the new schema.
    Forward,
    /// Backward and forward compatible independently, via full schema
    /// resolution.
    Full,
    /// Backward and forward compatible (alias accepted by some dialects
    /// alongside `Full`).
    Both,
}

impl std::fmt::Display for CompatibilityPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            CompatibilityPolicy::None => "NONE",
            CompatibilityPolicy::Backward => "BACKWARD",
            CompatibilityPolicy::Forward => "FORWARD",
            CompatibilityPolicy::Full => "FULL",
            CompatibilityPolicy::Both => "BOTH",
        };
        write!(f, "{s}")
    }
}

impl Default for CompatibilityPolicy {
    fn default() -> Self {
        CompatibilityPolicy::Backward
    }
}

/// A single `(name, namespace, type)` triple extracted from a schema's
/// fields, used to populate the field index for structural search.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldDescriptor {
    /// Field name.
    pub name: String,
    /// Field namespace, when the dialect has one (e.g. a nested Avro record
    /// name). `None` for flat/top-level fields.
    pub namespace: Option<String>,
    /// Field type as a dialect-native string (e.g. `"long"`, `"string"`,
    /// `"array<string>"`).
    pub field_type: String,
}
