//! # Schema Registry Storage
//!
//! Defines the two storage contracts the lifecycle engine is written
//! against — `StoragePort` (namespaced record collections with monotonic
//! id allocation) and `FileStorePort` (serializer/deserializer blob bodies)
//! — plus a reference in-memory implementation of each. A production
//! deployment substitutes a real database/object-store implementation
//! behind the same traits; the engine never depends on which one is wired
//! in.

pub mod memory;
pub mod namespace;
pub mod port;

pub use memory::{InMemoryFileStore, InMemoryStorage};
pub use port::{FileStorePort, StoragePort};
