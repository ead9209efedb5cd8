//! # Schema Module
//!
//! The connection-scoped type map: catalog contract, discovery snapshots
//! and the name -> codec registry.

pub mod catalog;
pub mod discovery;
pub mod registry;

pub use catalog::{builtin_type_name, CatalogReader, MemoryCatalog, TypeKind, TypeRow};
pub use discovery::{DiscoveredTypes, TypeDiscovery};
pub use registry::TypeRegistry;
