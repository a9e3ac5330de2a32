//! Wires a fresh in-memory lifecycle engine for the process lifetime of one
//! CLI invocation. There is no backing store in scope here (spec §1), so a
//! `Session` holds no state across invocations — `demo` is the command that
//! shows the full write/read lifecycle in one sitting; the other subcommands
//! are single-shot operations against a provider or a throwaway session.

use std::sync::Arc;

use schema_registry_core::config::RegistryConfig;
use schema_registry_engine::LifecycleEngine;
use schema_registry_providers::ProviderRegistry;
use schema_registry_serdes::SerDesBindingManager;
use schema_registry_storage::memory::{InMemoryFileStore, InMemoryStorage};
use schema_registry_storage::port::{FileStorePort, StoragePort};

pub struct Session {
    pub engine: LifecycleEngine,
    pub serdes: SerDesBindingManager,
}

impl Session {
    pub fn new() -> Self {
        let storage: Arc<dyn StoragePort> = Arc::new(InMemoryStorage::new());
        let file_store: Arc<dyn FileStorePort> = Arc::new(InMemoryFileStore::new());
        let providers = Arc::new(ProviderRegistry::with_builtins());
        let config = RegistryConfig::from_env().unwrap_or_else(|_| RegistryConfig::defaults());

        let engine = LifecycleEngine::new(storage.clone(), providers, &config);
        let serdes = SerDesBindingManager::new(storage, file_store);
        Self { engine, serdes }
    }
}

/// A bare provider registry, for commands that validate or compare schema
/// text without needing a registered schema identity.
pub fn providers() -> ProviderRegistry {
    ProviderRegistry::with_builtins()
}
