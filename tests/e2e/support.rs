use std::sync::Arc;

use schema_registry_core::config::RegistryConfig;
use schema_registry_core::types::CompatibilityPolicy;
use schema_registry_engine::{LifecycleEngine, NewSchemaMetadata};
use schema_registry_providers::ProviderRegistry;
use schema_registry_serdes::SerDesBindingManager;
use schema_registry_storage::memory::{InMemoryFileStore, InMemoryStorage};
use schema_registry_storage::port::{FileStorePort, StoragePort};

pub fn engine() -> LifecycleEngine {
    LifecycleEngine::new(
        Arc::new(InMemoryStorage::new()),
        Arc::new(ProviderRegistry::with_builtins()),
        &RegistryConfig::defaults(),
    )
}

/// An engine and a serdes manager sharing one storage backend, the way the
/// CLI and a real deployment would wire them.
pub fn engine_and_serdes() -> (LifecycleEngine, SerDesBindingManager) {
    let storage: Arc<dyn StoragePort> = Arc::new(InMemoryStorage::new());
    let file_store: Arc<dyn FileStorePort> = Arc::new(InMemoryFileStore::new());
    let providers = Arc::new(ProviderRegistry::with_builtins());
    let engine = LifecycleEngine::new(storage.clone(), providers, &RegistryConfig::defaults());
    let serdes = SerDesBindingManager::new(storage, file_store);
    (engine, serdes)
}

pub fn avro_meta(name: &str, policy: CompatibilityPolicy) -> NewSchemaMetadata {
    NewSchemaMetadata {
        name: name.to_string(),
        schema_type: "avro".to_string(),
        group: "default".to_string(),
        compatibility: policy,
        description: String::new(),
    }
}

pub const ORDER_V1: &str = r#"{"type":"record","name":"Order","fields":[{"name":"id","type":"long"}]}"#;
pub const ORDER_V2: &str =
    r#"{"type":"record","name":"Order","fields":[{"name":"id","type":"long"},{"name":"total","type":"double"}]}"#;
pub const ORDER_DROPPED_ID: &str = r#"{"type":"record","name":"Order","fields":[{"name":"total","type":"double"}]}"#;
