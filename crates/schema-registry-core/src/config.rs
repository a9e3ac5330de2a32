//! Typed view over the registry's property map (spec §4.2, §6).
//!
//! The engine only ever asks for two enumerated keys today
//! (`schema.cache.size`, `schema.cache.expiry.interval`); everything else in
//! the backing map is carried through untouched and ignored, exactly as
//! spec.md's Configuration surface requires: unknown keys are ignored,
//! missing keys fall back to defaults.

use std::collections::HashMap;
use std::time::Duration;

use crate::error::{Error, Result};

/// Key for the version cache's maximum entry count.
pub const KEY_CACHE_SIZE: &str = "schema.cache.size";
/// Key for the version cache's per-entry TTL, in seconds.
pub const KEY_CACHE_EXPIRY_INTERVAL: &str = "schema.cache.expiry.interval";

const DEFAULT_CACHE_SIZE: u64 = 10_000;
const DEFAULT_CACHE_EXPIRY_SECS: u64 = 3_600;

/// A typed view over a `String -> serde_json::Value` property map, with
/// defaults for the keys the registry understands.
#[derive(Debug, Clone, Default)]
pub struct RegistryConfig {
    properties: HashMap<String, serde_json::Value>,
}

impl RegistryConfig {
    /// An empty property map; every accessor falls back to its default.
    pub fn defaults() -> Self {
        Self {
            properties: HashMap::new(),
        }
    }

    /// Build a config from a loaded `config::Config`, keeping only the keys
    /// this registry enumerates plus whatever else the caller staged —
    /// unknown keys are kept but never interpreted.
    pub fn from_source(source: config::Config) -> Result<Self> {
        let map = source
            .try_deserialize::<HashMap<String, serde_json::Value>>()
            .map_err(|e| Error::ConfigurationError(e.to_string()))?;
        Ok(Self { properties: map })
    }

    /// Load from environment variables prefixed `SCHEMA_REGISTRY__`, e.g.
    /// `SCHEMA_REGISTRY__SCHEMA__CACHE__SIZE=20000`, falling back to
    /// defaults for anything unset. Matches the teacher's own convention of
    /// loading ambient configuration through the `config` crate rather than
    /// hand-rolled env parsing.
    pub fn from_env() -> Result<Self> {
        let source = config::Config::builder()
            .add_source(
                config::Environment::with_prefix("SCHEMA_REGISTRY")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .map_err(|e| Error::ConfigurationError(e.to_string()))?;
        Self::from_source(source)
    }

    /// Set a property explicitly (used by tests and the CLI to override a
    /// single key without going through the environment).
    pub fn with_property(mut self, key: impl Into<String>, value: serde_json::Value) -> Self {
        self.properties.insert(key.into(), value);
        self
    }

    fn get_u64(&self, key: &str, default: u64) -> u64 {
        self.properties
            .get(key)
            .and_then(|v| v.as_u64())
            .unwrap_or(default)
    }

    /// Maximum entries in the schema version cache. Default 10 000.
    pub fn cache_size(&self) -> u64 {
        self.get_u64(KEY_CACHE_SIZE, DEFAULT_CACHE_SIZE)
    }

    /// Per-entry TTL for the schema version cache. Default 3600s.
    pub fn cache_expiry(&self) -> Duration {
        Duration::from_secs(self.get_u64(KEY_CACHE_EXPIRY_INTERVAL, DEFAULT_CACHE_EXPIRY_SECS))
    }

    /// Raw lookup for any property, enumerated or not.
    pub fn get_raw(&self, key: &str) -> Option<&serde_json::Value> {
        self.properties.get(key)
    }
}
