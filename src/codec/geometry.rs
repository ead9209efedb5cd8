//! Geometry codec: the store keeps planar web-mercator coordinates, the
//! domain value stays geographic. Serialization projects onto the mercator
//! plane first; deserialization parses the planar payload and unprojects
//! back to latitude/longitude.

use super::{point_from_input, point_json_schema, Codec};
use crate::encoding::ewkb::{self, WkbPoint};
use crate::encoding::mercator::{self, ProjectedPoint};
use crate::types::{CodecValue, SRID_WEB_MERCATOR, SRID_WGS84};
use eyre::{bail, Result};

#[derive(Debug, Default)]
pub struct GeometryCodec;

impl GeometryCodec {
    pub fn new() -> Self {
        GeometryCodec
    }
}

impl Codec for GeometryCodec {
    fn type_name(&self) -> &str {
        "geometry"
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
        let planar = ProjectedPoint {
            x: wkb.x,
            y: wkb.y,
            z: wkb.z,
            srid: wkb.srid,
        };
        Ok(Some(CodecValue::Point(mercator::unproject(&planar))))
    }

    fn serialize(&self, value: &CodecValue) -> Result<Option<String>> {
        if value.is_blank() {
            return Ok(None);
        }
        let CodecValue::Point(point) = value else {
            bail!("geometry codec cannot serialize {value:?}");
        };
        let planar = mercator::project(point);
        let wkb = WkbPoint {
            x: planar.x,
            y: planar.y,
            z: planar.z,
            srid: Some(planar.srid.unwrap_or(SRID_WEB_MERCATOR)),
        };
        Ok(Some(ewkb::encode_hex(&wkb)))
    }

    fn json_schema(&self) -> serde_json::Value {
        point_json_schema()
    }
}
