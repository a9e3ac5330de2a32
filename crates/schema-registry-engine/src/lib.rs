//! # Schema Registry Engine
//!
//! The schema lifecycle engine (spec §4.3, §4.4): the write path (dedup by
//! fingerprint, version assignment, compatibility enforcement, field
//! indexing) and the read path (metadata/version/search lookups) that
//! together are the hard part of this spec. Every write operation
//! serializes on a single process-wide gate (spec §5) so versioning (I2)
//! and dedup (I3) hold under concurrent callers; reads take no lock and go
//! through the version cache for the single `(name, version)` lookup that
//! benefits from it.

mod query;

use std::sync::Arc;

use chrono::Utc;
use serde_json::json;
use tracing::{debug, info, warn};

use schema_registry_cache::SchemaVersionCache;
use schema_registry_core::config::RegistryConfig;
use schema_registry_core::error::{Error, Result};
use schema_registry_core::model::{SchemaFieldIndex, SchemaMetadata, SchemaVersionInfo};
use schema_registry_core::types::CompatibilityPolicy;
use schema_registry_providers::{ProviderRegistry, SchemaProvider};
use schema_registry_storage::namespace::{SCHEMA_FIELD_INDEX, SCHEMA_METADATA, SCHEMA_VERSION};
use schema_registry_storage::port::{StoragePort, TypedStoragePort};

pub use query::{FieldSearchQuery, SchemaMetadataSummary};

/// Input to [`LifecycleEngine::add_schema_metadata`] and to the
/// metadata-upserting overload of `add_schema_version`.
#[derive(Debug, Clone)]
pub struct NewSchemaMetadata {
    pub name: String,
    /// Dialect tag routed to the [`ProviderRegistry`].
    pub schema_type: String,
    pub group: String,
    pub compatibility: CompatibilityPolicy,
    pub description: String,
}

/// The schema lifecycle engine. Cheap to clone (every field is an `Arc` or
/// copy-cheap), so a single instance is typically shared behind an `Arc`
/// across request handlers.
pub struct LifecycleEngine {
    storage: Arc<dyn StoragePort>,
    providers: Arc<ProviderRegistry>,
    cache: SchemaVersionCache,
    /// Serializes the entire write path (spec §5). Held across storage
    /// reads *and* writes within one call so dedup (I3) and version
    /// assignment (I2) are observed under a single critical section.
    write_gate: tokio::sync::Mutex<()>,
}

impl LifecycleEngine {
    pub fn new(storage: Arc<dyn StoragePort>, providers: Arc<ProviderRegistry>, config: &RegistryConfig) -> Self {
        Self {
            storage,
            providers,
            cache: SchemaVersionCache::new(config.cache_size(), config.cache_expiry()),
            write_gate: tokio::sync::Mutex::new(()),
        }
    }

    // ---------------------------------------------------------------
    // Write path (spec §4.3)
    // ---------------------------------------------------------------

    /// `addSchemaMetadata`: idempotent — returns the existing id if `name`
    /// is already registered, otherwise allocates and persists a new row.
    pub async fn add_schema_metadata(&self, meta: NewSchemaMetadata) -> Result<i64> {
        let _gate = self.write_gate.lock().await;
        self.upsert_metadata_locked(meta).await
    }

    /// `addSchemaVersion` (metadata-accepting overload): upserts the
    /// metadata row, then runs the shared version-creation procedure.
    pub async fn add_schema_version_for_metadata(
        &self,
        meta: NewSchemaMetadata,
        text: &str,
        description: &str,
    ) -> Result<i64> {
        let _gate = self.write_gate.lock().await;
        let name = meta.name.clone();
        let schema_type = meta.schema_type.clone();
        let policy = meta.compatibility;
        let schema_metadata_id = self.upsert_metadata_locked(meta).await?;
        self.create_version_locked(schema_metadata_id, &name, &schema_type, policy, text, description)
            .await
    }

    /// `addSchemaVersion` (name-only overload): fails with
    /// [`Error::SchemaNotFound`] if no metadata is registered under `name`.
    pub async fn add_schema_version(&self, name: &str, text: &str, description: &str) -> Result<i64> {
        let _gate = self.write_gate.lock().await;
        let meta = self
            .find_metadata_by_name(name)
            .await?
            .ok_or_else(|| Error::SchemaNotFound(name.to_string()))?;
        self.create_version_locked(meta.id, name, &meta.schema_type, meta.compatibility, text, description)
            .await
    }

    /// Must only be called while holding `write_gate`.
    async fn upsert_metadata_locked(&self, meta: NewSchemaMetadata) -> Result<i64> {
        if let Some(existing) = self.find_metadata_by_name(&meta.name).await? {
            return Ok(existing.id);
        }
        let id = self.storage.next_id(SCHEMA_METADATA).await?;
        let row = SchemaMetadata {
            id,
            name: meta.name,
            schema_type: meta.schema_type,
            group: meta.group,
            compatibility: meta.compatibility,
            description: meta.description,
            created_at: Utc::now(),
        };
        self.storage.add_typed(SCHEMA_METADATA, id, &row).await?;
        Ok(id)
    }

    /// The shared version-creation procedure of spec §4.3 steps 2-7. Must
    /// only be called while holding `write_gate`.
    ///
    /// Per the redesign note in spec §9, dedup is checked *before* a
    /// version id is allocated, so a duplicate submission never burns an
    /// id in the version namespace.
    async fn create_version_locked(
        &self,
        schema_metadata_id: i64,
        name: &str,
        schema_type: &str,
        policy: CompatibilityPolicy,
        text: &str,
        description: &str,
    ) -> Result<i64> {
        let provider = self.providers.get(schema_type)?;

        // Step 2: fingerprint (also validates the text).
        let fingerprint = hex::encode(provider.fingerprint(text)?);

        // Step 3: dedup by fingerprint (I3).
        let dedup_matches: Vec<SchemaVersionInfo> = self
            .storage
            .find_typed(
                SCHEMA_VERSION,
                &[
                    ("schema_metadata_id", json!(schema_metadata_id)),
                    ("fingerprint", json!(fingerprint)),
                ],
            )
            .await?;
        if !dedup_matches.is_empty() {
            if dedup_matches.len() > 1 {
                warn!(
                    name,
                    fingerprint, "multiple schema versions share a fingerprint (I3 should have prevented this); returning the first"
                );
            }
            debug!(name, version = dedup_matches[0].version, fingerprint, "dedup hit, returning existing version");
            return Ok(dedup_matches[0].version);
        }

        // Step 4: latest version + compatibility (I4).
        let all_versions: Vec<SchemaVersionInfo> = self
            .storage
            .find_typed(SCHEMA_VERSION, &[("schema_metadata_id", json!(schema_metadata_id))])
            .await?;
        let latest = all_versions.iter().max_by_key(|v| v.version);

        if let Some(latest) = latest {
            let compatible = provider.is_compatible(text, &[latest.text.clone()], policy)?;
            if !compatible {
                warn!(name, latest_version = latest.version, %policy, "candidate rejected: incompatible with latest version");
                return Err(Error::IncompatibleSchema(format!(
                    "{name} v{} is not compatible with the candidate under {policy}",
                    latest.version
                )));
            }
        }

        // Step 5: allocate + persist the version row.
        let version = latest.map(|l| l.version).unwrap_or(0) + 1;
        let version_id = self.storage.next_id(SCHEMA_VERSION).await?;
        let row = SchemaVersionInfo {
            id: version_id,
            schema_metadata_id,
            name: name.to_string(),
            version,
            text: text.to_string(),
            fingerprint,
            description: description.to_string(),
            created_at: Utc::now(),
        };
        self.storage.add_typed(SCHEMA_VERSION, version_id, &row).await?;
        info!(name, version, fingerprint = %row.fingerprint, "allocated new schema version");

        // Step 6: field index, co-committed with the version row (I5).
        for field in provider.generate_fields(text)? {
            let field_id = self.storage.next_id(SCHEMA_FIELD_INDEX).await?;
            let index_row = SchemaFieldIndex {
                id: field_id,
                schema_version_id: version_id,
                field_name: field.name,
                field_namespace: field.namespace,
                field_type: field.field_type,
            };
            self.storage.add_typed(SCHEMA_FIELD_INDEX, field_id, &index_row).await?;
        }

        Ok(version)
    }

    // ---------------------------------------------------------------
    // Read path (spec §4.4)
    // ---------------------------------------------------------------

    pub async fn get_schema_metadata(&self, name: &str) -> Result<Option<SchemaMetadata>> {
        self.find_metadata_by_name(name).await
    }

    /// Internal convenience used by the SerDes Binding Manager and
    /// field-search resolution to avoid a second name-based round trip
    /// (SPEC_FULL §3); not part of the spec's named public contract.
    pub async fn get_schema_metadata_by_id(&self, id: i64) -> Result<Option<SchemaMetadata>> {
        self.storage.get_typed(SCHEMA_METADATA, id).await
    }

    /// `findSchemaMetadata`: lists the metadata namespace when `filters` is
    /// empty, otherwise queries it directly. Spec §9 flags the source as
    /// querying the *version* namespace here as a probable bug; this is
    /// the faithful reimplementation that queries metadata instead.
    pub async fn find_schema_metadata(&self, filters: &[(&str, serde_json::Value)]) -> Result<Vec<SchemaMetadataSummary>> {
        let rows: Vec<SchemaMetadata> = if filters.is_empty() {
            self.storage.list_typed(SCHEMA_METADATA).await?
        } else {
            self.storage.find_typed(SCHEMA_METADATA, filters).await?
        };
        Ok(rows
            .into_iter()
            .map(|m| SchemaMetadataSummary {
                name: m.name,
                schema_type: m.schema_type,
                group: m.group,
            })
            .collect())
    }

    /// `findAllVersions`.
    pub async fn find_all_versions(&self, name: &str) -> Result<Vec<SchemaVersionInfo>> {
        self.storage.find_typed(SCHEMA_VERSION, &[("name", json!(name))]).await
    }

    /// `getLatestSchemaVersionInfo`.
    pub async fn get_latest_schema_version_info(&self, name: &str) -> Result<Option<SchemaVersionInfo>> {
        let versions = self.find_all_versions(name).await?;
        Ok(versions.into_iter().max_by_key(|v| v.version))
    }

    /// `getSchemaVersion`: fingerprints `text` and looks up the version
    /// carrying that fingerprint under `name`'s metadata.
    pub async fn get_schema_version(&self, name: &str, text: &str) -> Result<i64> {
        let meta = self
            .find_metadata_by_name(name)
            .await?
            .ok_or_else(|| Error::SchemaNotFound(name.to_string()))?;
        let provider = self.providers.get(&meta.schema_type)?;
        let fingerprint = hex::encode(provider.fingerprint(text)?);

        let matches: Vec<SchemaVersionInfo> = self
            .storage
            .find_typed(
                SCHEMA_VERSION,
                &[("schema_metadata_id", json!(meta.id)), ("fingerprint", json!(fingerprint))],
            )
            .await?;
        matches
            .into_iter()
            .next()
            .map(|v| v.version)
            .ok_or_else(|| Error::SchemaNotFound(format!("{name}: no version matches the given text")))
    }

    /// `getSchemaVersionInfo`: read-through the version cache (spec §4.2).
    pub async fn get_schema_version_info(&self, name: &str, version: i64) -> Result<SchemaVersionInfo> {
        let key = (name.to_string(), version);
        let name_owned = name.to_string();
        let storage = self.storage.clone();
        self.cache
            .get_with(key, || async move {
                let matches: Vec<SchemaVersionInfo> = storage
                    .find_typed(SCHEMA_VERSION, &[("name", json!(name_owned)), ("version", json!(version))])
                    .await?;
                matches
                    .into_iter()
                    .next()
                    .ok_or_else(|| Error::SchemaNotFound(format!("{name_owned} v{version}")))
            })
            .await
    }

    /// `findSchemasWithFields`: resolves matching field-index rows back to
    /// their owning `(name, version)` pair, deduplicated.
    pub async fn find_schemas_with_fields(&self, query: FieldSearchQuery) -> Result<Vec<(String, i64)>> {
        let filters = query.as_filters();
        let rows: Vec<SchemaFieldIndex> = self.storage.find_typed(SCHEMA_FIELD_INDEX, &filters).await?;

        let mut seen = std::collections::HashSet::new();
        let mut out = Vec::new();
        for row in rows {
            let version: Option<SchemaVersionInfo> = self.storage.get_typed(SCHEMA_VERSION, row.schema_version_id).await?;
            if let Some(version) = version {
                let key = (version.name.clone(), version.version);
                if seen.insert(key.clone()) {
                    out.push(key);
                }
            }
        }
        Ok(out)
    }

    /// `isCompatible(name, text)`: compatibility against *every* existing
    /// version of `name`, under its stored policy. Contrast with the write
    /// path, which checks only the latest version.
    pub async fn is_compatible_with_all(&self, name: &str, text: &str) -> Result<bool> {
        let meta = self
            .find_metadata_by_name(name)
            .await?
            .ok_or_else(|| Error::SchemaNotFound(name.to_string()))?;
        let provider = self.providers.get(&meta.schema_type)?;
        let texts: Vec<String> = self.find_all_versions(name).await?.into_iter().map(|v| v.text).collect();
        provider.is_compatible(text, &texts, meta.compatibility)
    }

    /// `isCompatible((name, version), text)`: compatibility against exactly
    /// one prior version.
    pub async fn is_compatible_with_version(&self, name: &str, version: i64, text: &str) -> Result<bool> {
        let meta = self
            .find_metadata_by_name(name)
            .await?
            .ok_or_else(|| Error::SchemaNotFound(name.to_string()))?;
        let info = self.get_schema_version_info(name, version).await?;
        let provider = self.providers.get(&meta.schema_type)?;
        provider.is_compatible(text, &[info.text], meta.compatibility)
    }

    async fn find_metadata_by_name(&self, name: &str) -> Result<Option<SchemaMetadata>> {
        let matches: Vec<SchemaMetadata> = self.storage.find_typed(SCHEMA_METADATA, &[("name", json!(name))]).await?;
        Ok(matches.into_iter().next())
    }
}
