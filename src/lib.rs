//! # pgcodec - PostgreSQL Type-Codec Layer
//!
//! pgcodec lets application code exchange richly-typed values (geographic
//! points, currency amounts, unit-tagged quantities, server-defined
//! enum/composite/domain types) with a relational store that only speaks
//! text and binary wire formats.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────┐
//! │   Embedder (column DSL, row materialization) │
//! ├───────────────────────┬──────────────────────┤
//! │     TypeRegistry      │    TypeDiscovery     │
//! │  name -> Arc<Codec>   │  catalog snapshots   │
//! ├───────────────────────┴──────────────────────┤
//! │  Codecs: geometry · geography · currency ·   │
//! │          meter · passthrough domains         │
//! ├──────────────────────────────────────────────┤
//! │  encoding (EWKB, mercator) · parsing         │
//! │  (default literals) · types (value objects)  │
//! └──────────────────────────────────────────────┘
//! ```
//!
//! ## Quick Start
//!
//! ```ignore
//! use pgcodec::{CodecConfig, CodecValue, TypeRegistry};
//!
//! let config = CodecConfig::new().default_currency("USD");
//! let (registry, discovery) = TypeRegistry::load(&catalog, &config)?;
//!
//! let codec = registry.lookup("geography").unwrap();
//! let point = codec.cast(serde_json::json!({
//!     "latitude": 48.8566, "longitude": 2.3522
//! }).into())?;
//! let wire = codec.serialize(&point)?;         // hex EWKB
//! let back = codec.deserialize(&wire.unwrap())?;
//! ```
//!
//! ## Ownership and concurrency
//!
//! One `TypeRegistry` and one `TypeDiscovery` per connection; neither is a
//! process-wide singleton. Discovery snapshots are immutable `Arc`s swapped
//! atomically on refresh, so concurrent lookups never observe a torn set.
//! The only blocking call is `TypeRegistry::load` / `TypeDiscovery::refresh`
//! (a synchronous catalog query); encode/decode paths never do I/O.
//!
//! ## Module Overview
//!
//! - [`types`]: `Point`, `Money`, `Quantity` value objects and `CodecValue`
//! - [`codec`]: the `Codec` trait and its implementations
//! - [`encoding`]: hex EWKB point format and the mercator projection pair
//! - [`parsing`]: default-literal extraction from catalog metadata
//! - [`schema`]: catalog contract, discovery snapshots, type registry
//! - [`error`]: the named error taxonomy (`CodecError`)

pub mod codec;
pub mod encoding;
pub mod error;
pub mod parsing;
pub mod schema;
pub mod types;

pub use codec::{
    Codec, CodecConfig, CurrencyCodec, GeographyCodec, GeometryCodec, MeterCodec,
    PassthroughDomain,
};
pub use error::CodecError;
pub use parsing::{extract_default, DefaultValue};
pub use schema::{CatalogReader, DiscoveredTypes, MemoryCatalog, TypeDiscovery, TypeRegistry};
pub use types::{
    is_known_currency, CodecValue, CurrencyConverter, Money, Point, Quantity, CURRENCY_CODES,
    METER, SRID_WEB_MERCATOR, SRID_WGS84,
};
