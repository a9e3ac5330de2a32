//! # Schema Registry Cache
//!
//! The bounded, single-flight version cache of spec §4.2: a size- and
//! time-bounded `(schema_name, version) -> SchemaVersionInfo` map sitting in
//! front of storage reads. Built on `moka::future::Cache`, whose
//! `try_get_with` already gives exactly the semantics the spec calls for —
//! concurrent misses on the same key share one loader call, and a failed
//! load is never cached (so a transient `SchemaNotFound` doesn't poison
//! later lookups for the same key).

use std::future::Future;
use std::time::Duration;

use moka::future::Cache;
use schema_registry_core::error::{Error, Result};
use schema_registry_core::model::SchemaVersionInfo;

/// `(schema_name, version)` — the cache's key shape per spec §4.2.
pub type CacheKey = (String, i64);

/// Bounded, expiring, single-flight cache of [`SchemaVersionInfo`] keyed by
/// `(schema_name, version)`.
#[derive(Clone)]
pub struct SchemaVersionCache {
    inner: Cache<CacheKey, SchemaVersionInfo>,
}

impl SchemaVersionCache {
    /// Build a cache with the given capacity and per-entry TTL, typically
    /// sourced from `RegistryConfig::cache_size` / `RegistryConfig::cache_expiry`.
    pub fn new(max_capacity: u64, ttl: Duration) -> Self {
        let inner = Cache::builder().max_capacity(max_capacity).time_to_live(ttl).build();
        Self { inner }
    }

    /// Read-through lookup: return the cached value for `key`, or run
    /// `loader` exactly once among any number of concurrent callers racing
    /// on the same key and cache its result. A loader error is propagated
    /// to every waiter but never stored, so the next call retries.
    pub async fn get_with<F, Fut>(&self, key: CacheKey, loader: F) -> Result<SchemaVersionInfo>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<SchemaVersionInfo>>,
    {
        self.inner
            .try_get_with(key, loader())
            .await
            .map_err(|arc_err| match Error::try_unwrap(arc_err) {
                Ok(err) => err,
                Err(arc_err) => Error::IOFailure(arc_err.to_string()),
            })
    }

    /// Entries currently resident (approximate — moka evicts lazily).
    pub fn entry_count(&self) -> u64 {
        self.inner.entry_count()
    }
}

/// Best-effort unwrap of the `Arc<Error>` moka hands back from
/// `try_get_with`, so a single-waiter miss doesn't have to pay for an
/// `Arc::clone`'d error chain when it's the only holder.
trait TryUnwrapArc: Sized {
    fn try_unwrap(arc: std::sync::Arc<Error>) -> std::result::Result<Error, std::sync::Arc<Error>>;
}

impl TryUnwrapArc for Error {
    fn try_unwrap(arc: std::sync::Arc<Error>) -> std::result::Result<Error, std::sync::Arc<Error>> {
        std::sync::Arc::try_unwrap(arc)
    }
}
