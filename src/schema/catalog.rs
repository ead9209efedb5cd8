//! # Catalog Contract
//!
//! The minimal surface the codec layer needs from the store's catalog: one
//! row per user-defined type carrying its OID, name, classification and,
//! for domain types, the OID of the base type. A live adapter typically
//! fills this from `pg_type`/`pg_enum` joins; tests and embedders without
//! a connection use [`MemoryCatalog`].

use eyre::Result;

/// Classification of a user-defined type in the catalog snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypeKind {
    Enum,
    Composite,
    Domain,
}

/// One catalog row of the discovery query contract.
#[derive(Debug, Clone, PartialEq)]
pub struct TypeRow {
    pub oid: u32,
    pub name: String,
    pub kind: TypeKind,
    /// Base type OID; present for domain types only.
    pub base_oid: Option<u32>,
}

/// Read side of the catalog. Implementations perform synchronous,
/// potentially slow I/O; callers treat a failure as retryable and must not
/// replace a previous snapshot with an empty set on error.
pub trait CatalogReader: Send + Sync {
    fn user_defined_types(&self) -> Result<Vec<TypeRow>>;
}

/// In-memory catalog used by tests and connectionless embedders.
#[derive(Debug, Default, Clone)]
pub struct MemoryCatalog {
    rows: Vec<TypeRow>,
}

impl MemoryCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_enum(&mut self, oid: u32, name: &str) -> &mut Self {
        self.rows.push(TypeRow {
            oid,
            name: name.to_string(),
            kind: TypeKind::Enum,
            base_oid: None,
        });
        self
    }

    pub fn add_composite(&mut self, oid: u32, name: &str) -> &mut Self {
        self.rows.push(TypeRow {
            oid,
            name: name.to_string(),
            kind: TypeKind::Composite,
            base_oid: None,
        });
        self
    }

    pub fn add_domain(&mut self, oid: u32, name: &str, base_oid: u32) -> &mut Self {
        self.rows.push(TypeRow {
            oid,
            name: name.to_string(),
            kind: TypeKind::Domain,
            base_oid: Some(base_oid),
        });
        self
    }
}

impl CatalogReader for MemoryCatalog {
    fn user_defined_types(&self) -> Result<Vec<TypeRow>> {
        Ok(self.rows.clone())
    }
}

/// Well-known OIDs of built-in scalar types a domain may sit on. Domains
/// over these round-trip as their base scalar's text form.
pub fn builtin_type_name(oid: u32) -> Option<&'static str> {
    Some(match oid {
        16 => "bool",
        17 => "bytea",
        18 => "char",
        19 => "name",
        20 => "int8",
        21 => "int2",
        23 => "int4",
        25 => "text",
        26 => "oid",
        114 => "json",
        700 => "float4",
        701 => "float8",
        1042 => "bpchar",
        1043 => "varchar",
        1082 => "date",
        1083 => "time",
        1114 => "timestamp",
        1184 => "timestamptz",
        1186 => "interval",
        1700 => "numeric",
        2950 => "uuid",
        3802 => "jsonb",
        _ => return None,
    })
}
