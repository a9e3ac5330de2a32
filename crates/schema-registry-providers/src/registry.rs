//! In-memory, read-only-after-init mapping from dialect tag to provider
//! (spec §4.1).

use std::collections::HashMap;
use std::sync::Arc;

use schema_registry_core::error::{Error, Result};

use crate::avro::AvroProvider;
use crate::json_schema::JsonSchemaProvider;
use crate::provider::SchemaProvider;
use crate::{AVRO, JSON_SCHEMA};

/// Dialect tag → provider. Built once at startup and never mutated
/// afterward; lookups never block on a lock the way the write gate does.
pub struct ProviderRegistry {
    providers: HashMap<String, Arc<dyn SchemaProvider>>,
}

impl ProviderRegistry {
    /// Empty registry with no dialects registered.
    pub fn empty() -> Self {
        Self {
            providers: HashMap::new(),
        }
    }

    /// Registry pre-populated with the two built-in dialects (Avro,
    /// JSON Schema). Callers needing a custom dialect start from
    /// [`ProviderRegistry::empty`] and call [`with_provider`](Self::with_provider).
    pub fn with_builtins() -> Self {
        Self::empty()
            .with_provider(Arc::new(AvroProvider::new()))
            .with_provider(Arc::new(JsonSchemaProvider::new()))
    }

    /// Register (or replace) the provider for its own `schema_type()` tag.
    pub fn with_provider(mut self, provider: Arc<dyn SchemaProvider>) -> Self {
        self.providers.insert(provider.schema_type().to_string(), provider);
        self
    }

    /// Look up the provider for `schema_type`.
    ///
    /// **Failure**: unknown dialect tag is a [`Error::ConfigurationError`] —
    /// fatal to the calling request, not to the process (spec §4.1).
    pub fn get(&self, schema_type: &str) -> Result<Arc<dyn SchemaProvider>> {
        self.providers
            .get(schema_type)
            .cloned()
            .ok_or_else(|| Error::ConfigurationError(format!("unknown schema dialect: {schema_type}")))
    }
}

impl Default for ProviderRegistry {
    fn default() -> Self {
        Self::with_builtins()
    }
}
