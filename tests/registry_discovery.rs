//! Registry bootstrap and discovery snapshot behavior, including the
//! reader/refresh discipline under concurrency.

use pgcodec::{
    CatalogReader, CodecConfig, CodecValue, MemoryCatalog, TypeDiscovery, TypeRegistry,
};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;

fn sample_catalog() -> MemoryCatalog {
    let mut catalog = MemoryCatalog::new();
    catalog
        .add_enum(16384, "mood")
        .add_enum(16385, "status")
        .add_composite(16390, "address")
        .add_domain(16395, "email", 25) // over text
        .add_domain(16396, "mystery", 99999); // unresolvable base
    catalog
}

// ============================================================================
// BOOTSTRAP
// ============================================================================

#[test]
fn load_wires_builtins_discovery_and_domains() {
    let (registry, discovery) =
        TypeRegistry::load(&sample_catalog(), &CodecConfig::new()).unwrap();

    assert!(registry.lookup("currency").is_some());
    assert!(registry.lookup("geometry").is_some());
    assert!(registry.lookup("geography").is_some());
    assert!(registry.lookup("meter").is_some());

    assert!(discovery.enum_type_exists("mood"));
    assert!(discovery.composite_type_exists("address"));
    assert!(discovery.domain_type_exists("email"));

    // email resolved to a passthrough over text; mystery stayed uncodec'd.
    let email = registry.lookup("email").unwrap();
    assert_eq!(
        email.deserialize("a@b.example").unwrap(),
        Some(CodecValue::Text("a@b.example".into()))
    );
    assert!(registry.lookup("mystery").is_none());
    assert!(discovery.domain_type_exists("mystery"));
}

#[test]
fn unknown_type_lookup_defers_to_discovery_classification() {
    let (registry, discovery) =
        TypeRegistry::load(&sample_catalog(), &CodecConfig::new()).unwrap();

    // The column DSL's path: no codec, but the name is a discovered enum,
    // so the column type is still accepted.
    assert!(registry.lookup("mood").is_none());
    assert!(discovery.enum_type_exists("mood"));

    // Truly unknown names fail both checks.
    assert!(registry.lookup("no_such_type").is_none());
    assert!(!discovery.enum_type_exists("no_such_type"));
    assert!(!discovery.composite_type_exists("no_such_type"));
    assert!(!discovery.domain_type_exists("no_such_type"));
}

#[test]
fn reload_rebuilds_the_type_map() {
    let catalog = sample_catalog();
    let config = CodecConfig::new();
    let (_registry, discovery) = TypeRegistry::load(&catalog, &config).unwrap();
    assert!(discovery.enum_type_exists("mood"));

    // Catalog changed (extension enabled, types dropped); a fresh load
    // reflects the new state and nothing from the old one.
    let mut changed = MemoryCatalog::new();
    changed.add_enum(16500, "severity");
    let (registry, discovery) = TypeRegistry::load(&changed, &config).unwrap();
    assert!(discovery.enum_type_exists("severity"));
    assert!(!discovery.enum_type_exists("mood"));
    assert!(registry.lookup("email").is_none());
}

#[test]
fn discovery_failure_propagates_instead_of_masking_types() {
    struct Broken;
    impl CatalogReader for Broken {
        fn user_defined_types(&self) -> eyre::Result<Vec<pgcodec::schema::TypeRow>> {
            eyre::bail!("server closed the connection unexpectedly");
        }
    }

    assert!(TypeRegistry::load(&Broken, &CodecConfig::new()).is_err());
}

// ============================================================================
// SNAPSHOT CONSISTENCY
// ============================================================================

#[test]
fn refresh_is_atomic_under_concurrent_readers() {
    // Old catalog: {mood, status}. New catalog: {grade, level}. A reader
    // must always see exactly one of the two sets, never a mix.
    let mut old_catalog = MemoryCatalog::new();
    old_catalog.add_enum(1, "mood").add_enum(2, "status");
    let mut new_catalog = MemoryCatalog::new();
    new_catalog.add_enum(3, "grade").add_enum(4, "level");

    let discovery = Arc::new(TypeDiscovery::empty());
    discovery.refresh(&old_catalog).unwrap();

    let stop = Arc::new(AtomicBool::new(false));
    let mut readers = Vec::new();
    for _ in 0..4 {
        let discovery = Arc::clone(&discovery);
        let stop = Arc::clone(&stop);
        readers.push(thread::spawn(move || {
            while !stop.load(Ordering::Relaxed) {
                let snap = discovery.snapshot();
                let old = snap.enum_type_exists("mood") && snap.enum_type_exists("status");
                let new = snap.enum_type_exists("grade") && snap.enum_type_exists("level");
                assert!(
                    old != new,
                    "torn snapshot: mood={} status={} grade={} level={}",
                    snap.enum_type_exists("mood"),
                    snap.enum_type_exists("status"),
                    snap.enum_type_exists("grade"),
                    snap.enum_type_exists("level")
                );
            }
        }));
    }

    for _ in 0..200 {
        discovery.refresh(&new_catalog).unwrap();
        discovery.refresh(&old_catalog).unwrap();
    }
    discovery.refresh(&new_catalog).unwrap();
    stop.store(true, Ordering::Relaxed);
    for reader in readers {
        reader.join().unwrap();
    }

    assert!(discovery.enum_type_exists("grade"));
    assert!(!discovery.enum_type_exists("mood"));
}
