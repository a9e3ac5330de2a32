//! Reference in-memory implementations of [`StoragePort`] and
//! [`FileStorePort`].
//!
//! Not a production backend — the storage layer proper is explicitly out of
//! scope for this crate (spec §1) — but a real, durable-within-process
//! implementation so the lifecycle engine has something to run against in
//! tests and via the CLI. A production deployment swaps this out behind the
//! same trait without touching the engine.

use std::collections::HashMap;

use async_trait::async_trait;
use parking_lot::Mutex;
use schema_registry_core::error::Result;

use crate::port::{Filter, FileStorePort, StoragePort};

#[derive(Default)]
struct NamespaceTable {
    next_id: i64,
    rows: Vec<(i64, serde_json::Value)>,
}

/// In-memory, mutex-guarded [`StoragePort`]. Id allocation and row storage
/// share one lock per namespace table, so `next_id` followed by `add` from
/// the same caller never races another caller's allocation — callers still
/// need their own coordination if they want "allocate + check + insert" to
/// be atomic across multiple namespaces (that's what the lifecycle engine's
/// write gate is for).
#[derive(Default)]
pub struct InMemoryStorage {
    namespaces: Mutex<HashMap<String, NamespaceTable>>,
}

impl InMemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl StoragePort for InMemoryStorage {
    async fn next_id(&self, namespace: &str) -> Result<i64> {
        let mut namespaces = self.namespaces.lock();
        let table = namespaces.entry(namespace.to_string()).or_default();
        table.next_id += 1;
        Ok(table.next_id)
    }

    async fn get(&self, namespace: &str, id: i64) -> Result<Option<serde_json::Value>> {
        let namespaces = self.namespaces.lock();
        Ok(namespaces
            .get(namespace)
            .and_then(|table| table.rows.iter().find(|(row_id, _)| *row_id == id))
            .map(|(_, value)| value.clone()))
    }

    async fn find(&self, namespace: &str, filters: &[Filter<'_>]) -> Result<Vec<serde_json::Value>> {
        let namespaces = self.namespaces.lock();
        let Some(table) = namespaces.get(namespace) else {
            return Ok(Vec::new());
        };
        Ok(table
            .rows
            .iter()
            .filter(|(_, value)| {
                filters.iter().all(|(column, expected)| {
                    value.get(column).map(|actual| actual == expected).unwrap_or(false)
                })
            })
            .map(|(_, value)| value.clone())
            .collect())
    }

    async fn list(&self, namespace: &str) -> Result<Vec<serde_json::Value>> {
        let namespaces = self.namespaces.lock();
        Ok(namespaces
            .get(namespace)
            .map(|table| table.rows.iter().map(|(_, value)| value.clone()).collect())
            .unwrap_or_default())
    }

    async fn add(&self, namespace: &str, id: i64, record: serde_json::Value) -> Result<()> {
        let mut namespaces = self.namespaces.lock();
        let table = namespaces.entry(namespace.to_string()).or_default();
        table.rows.push((id, record));
        Ok(())
    }
}

/// In-memory [`FileStorePort`], keyed by the caller-supplied name.
#[derive(Default)]
pub struct InMemoryFileStore {
    blobs: Mutex<HashMap<String, Vec<u8>>>,
}

impl InMemoryFileStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl FileStorePort for InMemoryFileStore {
    async fn upload(&self, bytes: Vec<u8>, name: &str) -> Result<String> {
        self.blobs.lock().insert(name.to_string(), bytes);
        Ok(name.to_string())
    }

    async fn download(&self, name: &str) -> Result<Vec<u8>> {
        self.blobs
            .lock()
            .get(name)
            .cloned()
            .ok_or_else(|| schema_registry_core::error::Error::IOFailure(format!("no such blob: {name}")))
    }
}
