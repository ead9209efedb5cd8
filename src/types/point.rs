//! Geographic point value: latitude/longitude degrees on WGS84, optional
//! altitude (defaults to 0) and spatial-reference id. The planar
//! (projected) form only exists transiently inside the geometry codec, see
//! `encoding::mercator`.

use serde::ser::{Serialize, SerializeMap, SerializeStruct, Serializer};

/// WGS84 geographic coordinates, the SRID the geography codec stores.
pub const SRID_WGS84: i32 = 4326;

/// Spherical web-mercator, the SRID the geometry codec stores.
pub const SRID_WEB_MERCATOR: i32 = 3857;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub latitude: f64,
    pub longitude: f64,
    pub altitude: f64,
    pub srid: Option<i32>,
}

impl Point {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Point {
            latitude,
            longitude,
            altitude: 0.0,
            srid: None,
        }
    }

    pub fn with_altitude(latitude: f64, longitude: f64, altitude: f64) -> Self {
        Point {
            latitude,
            longitude,
            altitude,
            srid: None,
        }
    }

    pub fn with_srid(mut self, srid: i32) -> Self {
        self.srid = Some(srid);
        self
    }

    /// Coordinate-wise comparison within `tolerance`, ignoring the SRID tag.
    /// Projection round-trips carry inherent numeric error, so exact float
    /// equality is the wrong test for decoded points.
    pub fn approx_eq(&self, other: &Point, tolerance: f64) -> bool {
        (self.latitude - other.latitude).abs() <= tolerance
            && (self.longitude - other.longitude).abs() <= tolerance
            && (self.altitude - other.altitude).abs() <= tolerance
    }
}

impl Serialize for Point {
    // {"point": {"latitude": .., "longitude": .., "altitude": ..}}
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        struct Coords<'a>(&'a Point);

        impl Serialize for Coords<'_> {
            fn serialize<S: Serializer>(
                &self,
                serializer: S,
            ) -> std::result::Result<S::Ok, S::Error> {
                let mut s = serializer.serialize_struct("Coords", 3)?;
                s.serialize_field("latitude", &self.0.latitude)?;
                s.serialize_field("longitude", &self.0.longitude)?;
                s.serialize_field("altitude", &self.0.altitude)?;
                s.end()
            }
        }

        let mut map = serializer.serialize_map(Some(1))?;
        map.serialize_entry("point", &Coords(self))?;
        map.end()
    }
}
