//! # Wire Encoding
//!
//! Binary/planar forms that never leave the codec layer:
//!
//! - `ewkb`: hex-encoded extended well-known binary for points
//! - `mercator`: spherical web-mercator projection pair used by the
//!   geometry codec

pub mod ewkb;
pub mod mercator;

pub use ewkb::{encode_hex, parse_hex, WkbPoint};
pub use mercator::{project, unproject, ProjectedPoint, EARTH_RADIUS_M};
