//! # Hex EWKB Point Codec
//!
//! Extended well-known binary for points, hex-encoded the way the store
//! reports geometry columns:
//!
//! ```text
//! +------+------------+------------+---------+---------+---------+
//! | BOM  | type flags | srid (opt) |    x    |    y    | z (opt) |
//! | 1 B  | u32        | u32        | f64     | f64     | f64     |
//! +------+------------+------------+---------+---------+---------+
//! ```
//!
//! The type word carries the geometry kind in the low bits and the
//! Z/M/SRID presence flags in the high bits. Emission is always
//! little-endian with the Z and SRID flags set; parsing accepts either
//! byte order, 2D payloads (altitude 0) and a missing SRID flag. An M
//! ordinate is read and dropped.

use crate::error::CodecError;
use eyre::Result;

const FLAG_Z: u32 = 0x8000_0000;
const FLAG_M: u32 = 0x4000_0000;
const FLAG_SRID: u32 = 0x2000_0000;
const GEOMETRY_POINT: u32 = 1;

/// Raw point payload at the wire layer: x/y in whatever coordinate system
/// the SRID designates. The codecs decide whether x/y mean lon/lat degrees
/// or mercator meters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WkbPoint {
    pub x: f64,
    pub y: f64,
    pub z: f64,
    pub srid: Option<i32>,
}

/// Encodes as lowercase hex, little-endian, Z flag set, SRID flag set when
/// an SRID is present.
pub fn encode_hex(point: &WkbPoint) -> String {
    let mut buf = Vec::with_capacity(33);
    buf.push(1u8); // NDR
    let mut type_word = GEOMETRY_POINT | FLAG_Z;
    if point.srid.is_some() {
        type_word |= FLAG_SRID;
    }
    buf.extend_from_slice(&type_word.to_le_bytes());
    if let Some(srid) = point.srid {
        buf.extend_from_slice(&(srid as u32).to_le_bytes());
    }
    buf.extend_from_slice(&point.x.to_le_bytes());
    buf.extend_from_slice(&point.y.to_le_bytes());
    buf.extend_from_slice(&point.z.to_le_bytes());
    hex::encode(buf)
}

/// Parses a hex EWKB point in either byte order.
pub fn parse_hex(text: &str) -> Result<WkbPoint> {
    let bytes = hex::decode(text.trim())
        .map_err(|e| CodecError::InvalidWkb(format!("bad hex: {e}")))?;
    let mut cursor = Cursor::new(&bytes);

    let little_endian = match cursor.take_u8()? {
        0 => false,
        1 => true,
        other => {
            return Err(CodecError::InvalidWkb(format!("unknown byte order marker {other}")).into())
        }
    };

    let type_word = cursor.take_u32(little_endian)?;
    let geometry = type_word & !(FLAG_Z | FLAG_M | FLAG_SRID);
    if geometry != GEOMETRY_POINT {
        return Err(CodecError::UnsupportedGeometry(geometry).into());
    }

    let srid = if type_word & FLAG_SRID != 0 {
        Some(cursor.take_u32(little_endian)? as i32)
    } else {
        None
    };

    let x = cursor.take_f64(little_endian)?;
    let y = cursor.take_f64(little_endian)?;
    let z = if type_word & FLAG_Z != 0 {
        cursor.take_f64(little_endian)?
    } else {
        0.0
    };
    if type_word & FLAG_M != 0 {
        cursor.take_f64(little_endian)?; // measure ordinate, not modeled
    }
    cursor.expect_end()?;

    Ok(WkbPoint { x, y, z, srid })
}

struct Cursor<'a> {
    bytes: &'a [u8],
    pos: usize,
}

impl<'a> Cursor<'a> {
    fn new(bytes: &'a [u8]) -> Self {
        Cursor { bytes, pos: 0 }
    }

    fn take(&mut self, len: usize) -> Result<&'a [u8]> {
        let end = self.pos + len;
        if end > self.bytes.len() {
            return Err(CodecError::InvalidWkb(format!(
                "truncated payload: wanted {len} bytes at offset {}, have {}",
                self.pos,
                self.bytes.len() - self.pos
            ))
            .into());
        }
        let slice = &self.bytes[self.pos..end];
        self.pos = end;
        Ok(slice)
    }

    fn take_u8(&mut self) -> Result<u8> {
        Ok(self.take(1)?[0])
    }

    fn take_u32(&mut self, little_endian: bool) -> Result<u32> {
        let raw: [u8; 4] = self.take(4)?.try_into().unwrap();
        Ok(if little_endian {
            u32::from_le_bytes(raw)
        } else {
            u32::from_be_bytes(raw)
        })
    }

    fn take_f64(&mut self, little_endian: bool) -> Result<f64> {
        let raw: [u8; 8] = self.take(8)?.try_into().unwrap();
        Ok(if little_endian {
            f64::from_le_bytes(raw)
        } else {
            f64::from_be_bytes(raw)
        })
    }

    fn expect_end(&self) -> Result<()> {
        if self.pos != self.bytes.len() {
            return Err(CodecError::InvalidWkb(format!(
                "{} trailing bytes after point payload",
                self.bytes.len() - self.pos
            ))
            .into());
        }
        Ok(())
    }
}
