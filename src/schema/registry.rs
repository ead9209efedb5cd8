//! # Type Registry
//!
//! Maps a storage-side type name to the codec that handles it. One
//! registry per connection, rebuilt whenever the catalog's type map is
//! reloaded. Construction via [`TypeRegistry::load`] queries the live
//! catalog and is the only I/O path in this module; plain `new` +
//! `register` never touch the store.

use super::catalog::{builtin_type_name, CatalogReader};
use super::discovery::TypeDiscovery;
use crate::codec::{
    Codec, CodecConfig, CurrencyCodec, GeographyCodec, GeometryCodec, MeterCodec,
    PassthroughDomain,
};
use eyre::Result;
use std::collections::HashMap;
use std::sync::Arc;

#[derive(Default)]
pub struct TypeRegistry {
    codecs: HashMap<String, Arc<dyn Codec>>,
    aliases: HashMap<String, String>,
}

impl TypeRegistry {
    /// Empty registry; registers nothing and performs no I/O.
    pub fn new() -> Self {
        Self::default()
    }

    /// Queries the catalog and builds the full per-connection type map:
    /// built-in codecs, the `regclass` alias, a fresh discovery snapshot,
    /// and inherited codecs for every resolvable domain type.
    ///
    /// This is an explicit, potentially slow I/O call. Re-invoke it to
    /// rebuild after the catalog changes (e.g. an extension was enabled).
    pub fn load(
        catalog: &dyn CatalogReader,
        config: &CodecConfig,
    ) -> Result<(TypeRegistry, TypeDiscovery)> {
        let mut registry = TypeRegistry::new();
        registry.register("meter", Arc::new(MeterCodec::new()));
        registry.register("currency", Arc::new(CurrencyCodec::new(config)));
        registry.register("geometry", Arc::new(GeometryCodec::new()));
        registry.register("geography", Arc::new(GeographyCodec::new()));
        // OID-reference defaults read back as plain strings.
        registry.alias("regclass", "varchar");

        let discovery = TypeDiscovery::empty();
        discovery.refresh(catalog)?;
        registry.register_domains(&discovery);

        Ok((registry, discovery))
    }

    /// Inserts or overwrites the codec for `type_name`. Overwriting is
    /// intentional: the last registration wins, which is how a reload
    /// replaces stale codecs without clearing the map first.
    pub fn register(&mut self, type_name: &str, codec: Arc<dyn Codec>) {
        self.codecs.insert(type_name.to_string(), codec);
    }

    /// Declares `type_name` to be handled as `target_type_name` without a
    /// codec of its own.
    pub fn alias(&mut self, type_name: &str, target_type_name: &str) {
        self.aliases
            .insert(type_name.to_string(), target_type_name.to_string());
    }

    /// Codec for a type name, chasing aliases. `None` means the caller
    /// should consult discovery for enum/composite/domain classification
    /// before treating the type as unsupported.
    pub fn lookup(&self, type_name: &str) -> Option<Arc<dyn Codec>> {
        let mut name = type_name;
        for _ in 0..8 {
            if let Some(codec) = self.codecs.get(name) {
                return Some(Arc::clone(codec));
            }
            match self.aliases.get(name) {
                Some(target) => name = target,
                None => return None,
            }
        }
        None
    }

    pub fn contains(&self, type_name: &str) -> bool {
        self.codecs.contains_key(type_name) || self.aliases.contains_key(type_name)
    }

    /// Alias target, if `type_name` is a registered alias.
    pub fn resolve_alias(&self, type_name: &str) -> Option<&str> {
        self.aliases.get(type_name).map(String::as_str)
    }

    /// Registers inherited codecs for the snapshot's domain types. A codec
    /// already present under the domain's own name is never overridden. A
    /// domain whose base type OID cannot be resolved is left without a
    /// codec (it round-trips as raw text) and only warned about; discovery
    /// of the remaining types continues.
    pub fn register_domains(&mut self, discovery: &TypeDiscovery) {
        let snapshot = discovery.snapshot();
        let mut domains: Vec<&str> = snapshot.domain_names().collect();
        domains.sort_unstable();

        for domain in domains {
            if self.codecs.contains_key(domain) {
                continue;
            }
            let base_oid = snapshot.domain_base_oid(domain);
            let base_name = base_oid.and_then(|oid| {
                snapshot
                    .type_name_for_oid(oid)
                    .or_else(|| builtin_type_name(oid))
            });
            match base_name {
                Some(base) => {
                    let codec: Arc<dyn Codec> = match self.lookup(base) {
                        Some(inherited) => inherited,
                        None => Arc::new(PassthroughDomain::new(domain, base)),
                    };
                    self.codecs.insert(domain.to_string(), codec);
                }
                None => {
                    log::warn!(
                        "unknown base type (OID: {}) for domain {domain}",
                        base_oid.map_or_else(|| "none".to_string(), |oid| oid.to_string())
                    );
                }
            }
        }
    }
}
