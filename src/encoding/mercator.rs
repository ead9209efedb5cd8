//! Spherical web-mercator projection (EPSG:3857) over a sphere of radius
//! 6378137 m. The geometry codec projects geographic points onto this plane
//! before encoding and unprojects after decoding; altitude passes through
//! untouched.

use crate::types::{Point, SRID_WEB_MERCATOR, SRID_WGS84};
use std::f64::consts::{FRAC_PI_2, FRAC_PI_4};

/// Sphere radius shared by the forward and inverse transforms.
pub const EARTH_RADIUS_M: f64 = 6_378_137.0;

/// Planar point in mercator meters. Only the geometry codec and the EWKB
/// layer see this form.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProjectedPoint {
    pub x: f64,
    pub y: f64,
    pub z: f64,
    pub srid: Option<i32>,
}

/// Geographic degrees -> mercator meters.
pub fn project(point: &Point) -> ProjectedPoint {
    let lat = point.latitude.to_radians();
    let lon = point.longitude.to_radians();
    ProjectedPoint {
        x: EARTH_RADIUS_M * lon,
        y: EARTH_RADIUS_M * (FRAC_PI_4 + lat / 2.0).tan().ln(),
        z: point.altitude,
        srid: Some(SRID_WEB_MERCATOR),
    }
}

/// Mercator meters -> geographic degrees.
pub fn unproject(point: &ProjectedPoint) -> Point {
    let lon = (point.x / EARTH_RADIUS_M).to_degrees();
    let lat = (2.0 * (point.y / EARTH_RADIUS_M).exp().atan() - FRAC_PI_2).to_degrees();
    Point {
        latitude: lat,
        longitude: lon,
        altitude: point.z,
        srid: Some(SRID_WGS84),
    }
}
