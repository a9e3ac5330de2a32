//! Error types for the schema registry

use thiserror::Error;

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for schema registry operations.
///
/// Mirrors the taxonomy of kinds the lifecycle engine and its collaborators
/// can surface to callers; none of these are retried internally (retry is a
/// transport-layer concern).
#[derive(Error, Debug)]
pub enum Error {
    /// No metadata exists for the given name, or no version matches the
    /// requested key/text.
    #[error("schema not found: {0}")]
    SchemaNotFound(String),

    /// The candidate text failed dialect parsing/fingerprinting.
    #[error("invalid schema: {0}")]
    InvalidSchema(String),

    /// The compatibility predicate rejected the candidate. No storage
    /// side effects are committed when this is returned.
    #[error("incompatible schema: {0}")]
    IncompatibleSchema(String),

    /// The referenced serdes id does not exist.
    #[error("serdes not found: {0}")]
    SerDesNotFound(String),

    /// Unknown dialect tag, or another configuration value the engine
    /// cannot proceed without.
    #[error("configuration error: {0}")]
    ConfigurationError(String),

    /// Storage or file-store error, wrapping the underlying cause.
    #[error("io failure: {0}")]
    IOFailure(String),

    /// IO error from the standard library, wrapped for storage/file-store
    /// backends that surface one directly.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON (de)serialization error.
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    /// Catch-all for collaborator errors that don't fit the taxonomy above.
    #[error("{0}")]
    Other(#[from] anyhow::Error),
}

impl Error {
    /// True for `SchemaNotFound`.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Error::SchemaNotFound(_))
    }

    /// True for `InvalidSchema`.
    pub fn is_invalid_schema(&self) -> bool {
        matches!(self, Error::InvalidSchema(_))
    }

    /// True for `IncompatibleSchema`.
    pub fn is_incompatible(&self) -> bool {
        matches!(self, Error::IncompatibleSchema(_))
    }
}
