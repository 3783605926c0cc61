use geo::Point;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Anything that sits at a latitude/longitude pair and can be indexed by the
/// reverse geocoder.
///
/// Coordinates are in degrees. The geocoder never mutates a record, it only
/// stores it next to its projected coordinate.
///
/// # Examples
///
/// ```
/// use revgeo_types::point::LocatedRecord;
///
/// struct Station {
///     code: &'static str,
///     lat: f64,
///     lon: f64,
/// }
///
/// impl LocatedRecord for Station {
///     fn latitude(&self) -> f64 {
///         self.lat
///     }
///
///     fn longitude(&self) -> f64 {
///         self.lon
///     }
/// }
///
/// let utrecht = Station { code: "UT", lat: 52.0894, lon: 5.1101 };
/// assert_eq!(utrecht.latitude(), 52.0894);
/// ```
pub trait LocatedRecord {
    /// Latitude in degrees.
    fn latitude(&self) -> f64;

    /// Longitude in degrees.
    fn longitude(&self) -> f64;
}

/// `geo::Point` follows the x = longitude, y = latitude convention.
impl LocatedRecord for Point<f64> {
    fn latitude(&self) -> f64 {
        self.y()
    }

    fn longitude(&self) -> f64 {
        self.x()
    }
}

impl<R: LocatedRecord + ?Sized> LocatedRecord for &R {
    fn latitude(&self) -> f64 {
        (**self).latitude()
    }

    fn longitude(&self) -> f64 {
        (**self).longitude()
    }
}

impl<R: LocatedRecord + ?Sized> LocatedRecord for Box<R> {
    fn latitude(&self) -> f64 {
        (**self).latitude()
    }

    fn longitude(&self) -> f64 {
        (**self).longitude()
    }
}

impl<R: LocatedRecord + ?Sized> LocatedRecord for Arc<R> {
    fn latitude(&self) -> f64 {
        (**self).latitude()
    }

    fn longitude(&self) -> f64 {
        (**self).longitude()
    }
}

/// Build a bare query point from a latitude/longitude pair.
///
/// Argument order is latitude first, which is the reverse of `geo::Point::new`.
///
/// ```
/// use revgeo_types::point::{LocatedRecord, lat_lng};
///
/// let berlin = lat_lng(52.52, 13.405);
/// assert_eq!(berlin.x(), 13.405);
/// assert_eq!(berlin.latitude(), 52.52);
/// ```
pub fn lat_lng(latitude: f64, longitude: f64) -> Point<f64> {
    Point::new(longitude, latitude)
}

/// A point in 3D Cartesian space, produced by projecting a geographic
/// coordinate onto the unit sphere.
///
/// Axis 0 is `x`, axis 1 is `y`, axis 2 is `z`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CartesianPoint {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl CartesianPoint {
    /// Number of axes.
    pub const DIMENSIONS: usize = 3;

    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// Coordinate along `axis` (0, 1 or 2).
    ///
    /// # Panics
    ///
    /// Panics if `axis` is not below [`Self::DIMENSIONS`].
    #[inline]
    pub fn coord(&self, axis: usize) -> f64 {
        match axis {
            0 => self.x,
            1 => self.y,
            2 => self.z,
            _ => panic!("axis {axis} out of range for a 3D point"),
        }
    }

    /// Squared Euclidean distance to another point.
    ///
    /// ```
    /// use revgeo_types::point::CartesianPoint;
    ///
    /// let a = CartesianPoint::new(0.0, 0.0, 0.0);
    /// let b = CartesianPoint::new(1.0, 2.0, 2.0);
    /// assert_eq!(a.distance_squared(&b), 9.0);
    /// ```
    #[inline]
    pub fn distance_squared(&self, other: &CartesianPoint) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        let dz = self.z - other.z;
        dx * dx + dy * dy + dz * dz
    }

    /// Whether all three coordinates are finite.
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.z.is_finite()
    }

    pub fn to_array(self) -> [f64; 3] {
        [self.x, self.y, self.z]
    }
}

impl From<[f64; 3]> for CartesianPoint {
    fn from(value: [f64; 3]) -> Self {
        Self::new(value[0], value[1], value[2])
    }
}
