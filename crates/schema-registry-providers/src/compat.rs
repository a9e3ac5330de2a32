//! Shared field-based compatibility heuristic used by the built-in
//! providers (spec §4.1's `isCompatible`).
//!
//! Both built-in dialects reduce a schema to its `(name, type)` field set
//! and compare sets rather than implementing full dialect-native schema
//! resolution: backward compatibility requires every field the existing
//! text carries to still be present, identically typed, in the candidate;
//! forward compatibility is the mirror check. `FULL`/`BOTH` require both.

use schema_registry_core::types::{CompatibilityPolicy, FieldDescriptor};

pub(crate) fn fields_compatible(
    candidate: &[FieldDescriptor],
    existing: &[FieldDescriptor],
    policy: CompatibilityPolicy,
) -> bool {
    let field_present = |needle: &FieldDescriptor, haystack: &[FieldDescriptor]| {
        haystack
            .iter()
            .any(|f| f.name == needle.name && f.namespace == needle.namespace && f.field_type == needle.field_type)
    };

    let backward = || existing.iter().all(|e| field_present(e, candidate));
    let forward = || candidate.iter().all(|c| field_present(c, existing));

    match policy {
        CompatibilityPolicy::None => true,
        CompatibilityPolicy::Backward => backward(),
        CompatibilityPolicy::Forward => forward(),
        CompatibilityPolicy::Full | CompatibilityPolicy::Both => backward() && forward(),
    }
}
