//! Continuous node coordinates.

use std::fmt;

use crate::geom::Point;

/// A node position in continuous space.
///
/// Planar graphs use `x`/`y` directly. Geographic graphs follow the
/// street-network convention: `x` is longitude and `y` latitude, both in
/// degrees.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Coord {
    pub x: f64,
    pub y: f64,
}

impl Coord {
    /// Create a new coordinate.
    #[inline]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Create a geographic coordinate from latitude and longitude in degrees.
    #[inline]
    pub const fn from_lat_lon(lat: f64, lon: f64) -> Self {
        Self { x: lon, y: lat }
    }

    /// Latitude in degrees (geographic reading of `y`).
    #[inline]
    pub fn lat(self) -> f64 {
        self.y
    }

    /// Longitude in degrees (geographic reading of `x`).
    #[inline]
    pub fn lon(self) -> f64 {
        self.x
    }
}

impl From<Point> for Coord {
    fn from(p: Point) -> Self {
        Self::new(p.x as f64, p.y as f64)
    }
}

impl fmt::Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:.6}, {:.6})", self.x, self.y)
    }
}
