//! # Codec Layer
//!
//! A `Codec` owns the three-way conversion for one storage type name:
//!
//! ```text
//! user input --cast--> domain value --serialize--> storage text
//!                      domain value <--deserialize-- storage text
//! ```
//!
//! Codecs are stateless apart from immutable configuration and are shared
//! behind `Arc` by the registry. Every `deserialize`/`serialize` returns
//! `Ok(None)` for blank input rather than failing, and `cast` passes
//! unrecognized input shapes through unchanged — an already-cast domain
//! value casts to itself.

mod geography;
mod geometry;
mod money;
mod passthrough;
mod quantity;

pub use geography::GeographyCodec;
pub use geometry::GeometryCodec;
pub use money::CurrencyCodec;
pub use passthrough::PassthroughDomain;
pub use quantity::MeterCodec;

use crate::types::{CodecValue, CurrencyConverter, Point};
use eyre::Result;
use std::sync::Arc;

pub trait Codec: Send + Sync {
    /// Storage-side type name this codec is registered under.
    fn type_name(&self) -> &str;

    /// User input -> domain value. Tolerant of input shape; never performs
    /// I/O.
    fn cast(&self, input: CodecValue) -> Result<CodecValue>;

    /// Storage text -> domain value. Blank input is `Ok(None)`.
    fn deserialize(&self, raw: &str) -> Result<Option<CodecValue>>;

    /// Domain value -> storage text. Blank input is `Ok(None)`.
    fn serialize(&self, value: &CodecValue) -> Result<Option<String>>;

    /// JSON-schema shape consumed by external documentation generators.
    fn json_schema(&self) -> serde_json::Value;
}

/// Per-connection codec configuration, passed in explicitly at bootstrap.
/// There is deliberately no process-global default currency.
#[derive(Clone, Default)]
pub struct CodecConfig {
    default_currency: Option<String>,
    converter: Option<Arc<dyn CurrencyConverter>>,
}

impl CodecConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Currency surfaced as the schema default for money columns. Purely
    /// advisory; validation never consults it.
    pub fn default_currency(mut self, code: &str) -> Self {
        self.default_currency = Some(code.to_ascii_uppercase());
        self
    }

    pub fn converter(mut self, converter: Arc<dyn CurrencyConverter>) -> Self {
        self.converter = Some(converter);
        self
    }

    pub(crate) fn default_currency_or_usd(&self) -> String {
        self.default_currency.clone().unwrap_or_else(|| "USD".to_string())
    }

    pub(crate) fn converter_ref(&self) -> Option<Arc<dyn CurrencyConverter>> {
        self.converter.clone()
    }
}

/// Shared tolerant point extraction used by both geo codecs.
///
/// Accepts a mapping under aliased keys (`lat`/`latitude`,
/// `lon`/`longitude`/`lng`, `alt`/`altitude`) or an ordered
/// `[longitude, latitude, altitude?]` triple; altitude defaults to 0.
/// Anything else yields `None` and the caller passes the input through.
pub(crate) fn point_from_input(input: &CodecValue) -> Option<Point> {
    match input {
        CodecValue::Map(fields) => {
            let field = |keys: &[&str]| {
                keys.iter()
                    .find_map(|k| fields.get(*k))
                    .and_then(CodecValue::as_f64)
            };
            let lat = field(&["lat", "latitude"])?;
            let lon = field(&["lon", "longitude", "lng"])?;
            let alt = field(&["alt", "altitude"]).unwrap_or(0.0);
            Some(Point::with_altitude(lat, lon, alt))
        }
        CodecValue::List(items) => {
            let lon = items.first().and_then(CodecValue::as_f64)?;
            let lat = items.get(1).and_then(CodecValue::as_f64)?;
            let alt = items.get(2).and_then(CodecValue::as_f64).unwrap_or(0.0);
            Some(Point::with_altitude(lat, lon, alt))
        }
        _ => None,
    }
}

/// The point schema shape shared by the geometry and geography codecs.
pub(crate) fn point_json_schema() -> serde_json::Value {
    serde_json::json!({
        "properties": {
            "latitude": {"type": "number"},
            "longitude": {"type": "number"},
            "altitude": {"type": "number", "default": 0}
        },
        "required": ["latitude", "longitude"]
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    #[test]
    fn map_input_honors_key_aliases() {
        let mut fields = BTreeMap::new();
        fields.insert("lat".to_string(), CodecValue::Int(10));
        fields.insert("lng".to_string(), CodecValue::Float(20.5));
        let p = point_from_input(&CodecValue::Map(fields)).unwrap();
        assert_eq!((p.latitude, p.longitude, p.altitude), (10.0, 20.5, 0.0));
    }

    #[test]
    fn list_input_is_lon_lat_alt() {
        let p = point_from_input(&CodecValue::List(vec![
            CodecValue::Int(20),
            CodecValue::Int(10),
            CodecValue::Int(5),
        ]))
        .unwrap();
        assert_eq!((p.latitude, p.longitude, p.altitude), (10.0, 20.0, 5.0));
    }

    #[test]
    fn incomplete_input_is_rejected() {
        let mut fields = BTreeMap::new();
        fields.insert("latitude".to_string(), CodecValue::Int(10));
        assert!(point_from_input(&CodecValue::Map(fields)).is_none());
        assert!(point_from_input(&CodecValue::Text("POINT(1 2)".into())).is_none());
    }
}
