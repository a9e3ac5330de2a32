//! Storage Port and File Store Port contracts (spec §6).

use async_trait::async_trait;
use schema_registry_core::error::{Error, Result};
use serde::de::DeserializeOwned;
use serde::Serialize;

/// An equality predicate on a named column; an ordered list of these is
/// conjoined with AND by `StoragePort::find`.
pub type Filter<'a> = (&'a str, serde_json::Value);

/// A generic, namespaced record store.
///
/// All operations are synchronous-and-durable-on-return from the caller's
/// point of view (the `async` signature only reflects that a real backend
/// does I/O); the engine never observes a write that hasn't already landed.
#[async_trait]
pub trait StoragePort: Send + Sync {
    /// Allocate the next monotonically increasing id within `namespace`.
    /// Ids are unique for the process lifetime of the registry.
    async fn next_id(&self, namespace: &str) -> Result<i64>;

    /// Fetch a single record by id. Returns `Ok(None)` rather than an error
    /// when nothing matches — "not found" is never an exceptional path at
    /// this layer.
    async fn get(&self, namespace: &str, id: i64) -> Result<Option<serde_json::Value>>;

    /// Records in `namespace` matching every filter (AND), in unspecified
    /// order.
    async fn find(&self, namespace: &str, filters: &[Filter<'_>]) -> Result<Vec<serde_json::Value>>;

    /// Every record in `namespace`, in unspecified order.
    async fn list(&self, namespace: &str) -> Result<Vec<serde_json::Value>>;

    /// Insert a record under `id`. Duplicate-id semantics are delegated to
    /// the backend; the engine only ever calls this with an id it has just
    /// allocated from the same namespace.
    async fn add(&self, namespace: &str, id: i64, record: serde_json::Value) -> Result<()>;
}

/// Typed convenience wrapper over a raw [`StoragePort`], so call sites work
/// in terms of `SchemaMetadata`/`SchemaVersionInfo`/etc. rather than raw
/// JSON values.
#[async_trait]
pub trait TypedStoragePort: StoragePort {
    async fn get_typed<T: DeserializeOwned>(&self, namespace: &str, id: i64) -> Result<Option<T>> {
        match self.get(namespace, id).await? {
            Some(value) => Ok(Some(serde_json::from_value(value)?)),
            None => Ok(None),
        }
    }

    async fn find_typed<T: DeserializeOwned>(
        &self,
        namespace: &str,
        filters: &[Filter<'_>],
    ) -> Result<Vec<T>> {
        self.find(namespace, filters)
            .await?
            .into_iter()
            .map(|v| serde_json::from_value(v).map_err(Error::from))
            .collect()
    }

    async fn list_typed<T: DeserializeOwned>(&self, namespace: &str) -> Result<Vec<T>> {
        self.list(namespace)
            .await?
            .into_iter()
            .map(|v| serde_json::from_value(v).map_err(Error::from))
            .collect()
    }

    async fn add_typed<T: Serialize + Sync>(&self, namespace: &str, id: i64, record: &T) -> Result<()> {
        self.add(namespace, id, serde_json::to_value(record)?).await
    }
}

impl<S: StoragePort + ?Sized> TypedStoragePort for S {}

/// Storage for serializer/deserializer artifact bytes, keyed by opaque
/// generated name. `upload` returns the generated name (not a path the
/// caller should attempt to interpret); `download` resolves by that same
/// name.
#[async_trait]
pub trait FileStorePort: Send + Sync {
    /// Store `bytes` under a freshly generated name, returning that name.
    async fn upload(&self, bytes: Vec<u8>, name: &str) -> Result<String>;

    /// Retrieve the bytes stored under `name`.
    async fn download(&self, name: &str) -> Result<Vec<u8>>;
}
