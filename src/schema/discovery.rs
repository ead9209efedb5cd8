//! # Type Discovery
//!
//! Snapshot of the catalog's user-defined type names. The snapshot is an
//! immutable `Arc`; `refresh` builds a complete replacement and swaps it in
//! one store, so concurrent membership tests see either the old set or the
//! new set, never a torn mix. A failed catalog query propagates to the
//! caller and leaves the previous snapshot installed — masking existing
//! user types as unsupported would be worse than surfacing the error.

use super::catalog::{CatalogReader, TypeKind, TypeRow};
use eyre::Result;
use parking_lot::RwLock;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;

/// Immutable catalog snapshot: the three name sets plus the indexes domain
/// registration needs.
#[derive(Debug, Default)]
pub struct DiscoveredTypes {
    enums: HashSet<String>,
    composites: HashSet<String>,
    domains: HashSet<String>,
    names_by_oid: HashMap<u32, String>,
    domain_bases: HashMap<String, u32>,
}

impl DiscoveredTypes {
    pub fn from_rows(rows: &[TypeRow]) -> Self {
        let mut snapshot = DiscoveredTypes::default();
        for row in rows {
            snapshot.names_by_oid.insert(row.oid, row.name.clone());
            match row.kind {
                TypeKind::Enum => {
                    snapshot.enums.insert(row.name.clone());
                }
                TypeKind::Composite => {
                    snapshot.composites.insert(row.name.clone());
                }
                TypeKind::Domain => {
                    snapshot.domains.insert(row.name.clone());
                    if let Some(base) = row.base_oid {
                        snapshot.domain_bases.insert(row.name.clone(), base);
                    }
                }
            }
        }
        snapshot
    }

    pub fn enum_type_exists(&self, name: &str) -> bool {
        self.enums.contains(name)
    }

    pub fn composite_type_exists(&self, name: &str) -> bool {
        self.composites.contains(name)
    }

    pub fn domain_type_exists(&self, name: &str) -> bool {
        self.domains.contains(name)
    }

    /// Enum name set, the membership table behind the default-literal
    /// parser's fallback rule.
    pub fn enum_names(&self) -> &HashSet<String> {
        &self.enums
    }

    pub fn domain_names(&self) -> impl Iterator<Item = &str> {
        self.domains.iter().map(String::as_str)
    }

    pub fn type_name_for_oid(&self, oid: u32) -> Option<&str> {
        self.names_by_oid.get(&oid).map(String::as_str)
    }

    pub fn domain_base_oid(&self, name: &str) -> Option<u32> {
        self.domain_bases.get(name).copied()
    }
}

/// Connection-scoped discovery cache. One instance per connection; not a
/// process-wide singleton.
pub struct TypeDiscovery {
    snapshot: RwLock<Arc<DiscoveredTypes>>,
}

impl TypeDiscovery {
    /// Starts with an empty snapshot; nothing is discovered until the first
    /// [`refresh`](Self::refresh), which the caller triggers explicitly (it
    /// is an I/O operation).
    pub fn empty() -> Self {
        TypeDiscovery {
            snapshot: RwLock::new(Arc::new(DiscoveredTypes::default())),
        }
    }

    /// Re-queries the catalog and atomically installs the new snapshot.
    pub fn refresh(&self, catalog: &dyn CatalogReader) -> Result<()> {
        let rows = catalog.user_defined_types()?;
        let next = Arc::new(DiscoveredTypes::from_rows(&rows));
        *self.snapshot.write() = next;
        Ok(())
    }

    /// Current snapshot. Cheap to clone; safe to hold across a concurrent
    /// refresh (the holder just keeps reading the old set).
    pub fn snapshot(&self) -> Arc<DiscoveredTypes> {
        Arc::clone(&self.snapshot.read())
    }

    pub fn enum_type_exists(&self, name: &str) -> bool {
        self.snapshot().enum_type_exists(name)
    }

    pub fn composite_type_exists(&self, name: &str) -> bool {
        self.snapshot().composite_type_exists(name)
    }

    pub fn domain_type_exists(&self, name: &str) -> bool {
        self.snapshot().domain_type_exists(name)
    }
}
