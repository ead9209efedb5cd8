//! Geography codec: spherical coordinates stored as-is, SRID 4326 on the
//! wire. No projection step — latitude/longitude go straight into the EWKB
//! payload.

use super::{point_from_input, point_json_schema, Codec};
use crate::encoding::ewkb::{self, WkbPoint};
use crate::types::{CodecValue, Point, SRID_WGS84};
use eyre::{bail, Result};

#[derive(Debug, Default)]
pub struct GeographyCodec;

impl GeographyCodec {
    pub fn new() -> Self {
        GeographyCodec
    }
}

impl Codec for GeographyCodec {
    fn type_name(&self) -> &str {
        "geography"
    }

    fn cast(&self, input: CodecValue) -> Result<CodecValue> {
        if input.is_blank() {
            return Ok(input);
        }
        match point_from_input(&input) {
            Some(point) => Ok(CodecValue::Point(point.with_srid(SRID_WGS84))),
            None => Ok(input),
        }
    }

    fn deserialize(&self, raw: &str) -> Result<Option<CodecValue>> {
        if raw.trim().is_empty() {
            return Ok(None);
        }
        let wkb = ewkb::parse_hex(raw)?;
        let mut point = Point::with_altitude(wkb.y, wkb.x, wkb.z);
        point.srid = wkb.srid;
        Ok(Some(CodecValue::Point(point)))
    }

    fn serialize(&self, value: &CodecValue) -> Result<Option<String>> {
        if value.is_blank() {
            return Ok(None);
        }
        let CodecValue::Point(point) = value else {
            bail!("geography codec cannot serialize {value:?}");
        };
        let wkb = WkbPoint {
            x: point.longitude,
            y: point.latitude,
            z: point.altitude,
            srid: Some(point.srid.unwrap_or(SRID_WGS84)),
        };
        Ok(Some(ewkb::encode_hex(&wkb)))
    }

    fn json_schema(&self) -> serde_json::Value {
        point_json_schema()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Point;

    #[test]
    fn round_trip_preserves_coordinates_exactly() {
        let codec = GeographyCodec::new();
        let point = Point::with_altitude(37.77, -122.42, 16.0).with_srid(SRID_WGS84);
        let wire = codec
            .serialize(&CodecValue::Point(point))
            .unwrap()
            .unwrap();
        let back = codec.deserialize(&wire).unwrap().unwrap();
        assert_eq!(back, CodecValue::Point(point));
    }

    #[test]
    fn blank_input_round_trips_as_none() {
        let codec = GeographyCodec::new();
        assert_eq!(codec.deserialize("").unwrap(), None);
        assert_eq!(codec.serialize(&CodecValue::Null).unwrap(), None);
        assert_eq!(codec.serialize(&CodecValue::Text("  ".into())).unwrap(), None);
    }

    #[test]
    fn cast_passes_foreign_shapes_through() {
        let codec = GeographyCodec::new();
        let text = CodecValue::Text("POINT(1 2)".into());
        assert_eq!(codec.cast(text.clone()).unwrap(), text);
    }

    #[test]
    fn cast_is_idempotent_on_points() {
        let codec = GeographyCodec::new();
        let cast_once = codec
            .cast(CodecValue::from(serde_json::json!({"latitude": 10, "longitude": 20})))
            .unwrap();
        let cast_twice = codec.cast(cast_once.clone()).unwrap();
        assert_eq!(cast_once, cast_twice);
    }
}
