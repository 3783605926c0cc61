//! Projection of geographic coordinates onto the unit sphere.
//!
//! Points are mapped to 3D Cartesian space so that nearest-neighbour ranking
//! can use plain squared Euclidean distance. The straight-line (chord) distance
//! between two projected points grows monotonically with their great-circle
//! separation, which keeps rankings exact:
//!
//! ```text
//! chord = 2 * sin(d / 2R)        d = 2R * asin(chord / 2)
//! ```
//!
//! where `d` is the great-circle distance on a sphere of radius `R`.

use crate::compute::validation::{validate_coordinate, validate_record};
use crate::error::{GeocodeError, Result};
use revgeo_types::point::{CartesianPoint, LocatedRecord};
use std::f64::consts::PI;

/// Project a latitude/longitude pair in degrees onto the unit sphere.
///
/// Non-finite input is rejected, so NaN never reaches a distance comparison.
///
/// # Examples
///
/// ```
/// use revgeo::compute::projection::project;
///
/// let p = project(0.0, 0.0).unwrap();
/// assert_eq!((p.x, p.y, p.z), (1.0, 0.0, 0.0));
///
/// let north_pole = project(90.0, 0.0).unwrap();
/// assert!((north_pole.z - 1.0).abs() < 1e-12);
///
/// assert!(project(f64::NAN, 0.0).is_err());
/// ```
pub fn project(latitude: f64, longitude: f64) -> Result<CartesianPoint> {
    validate_coordinate(latitude, longitude, false)?;
    Ok(project_unchecked(latitude, longitude))
}

/// Project a record, optionally enforcing strict latitude/longitude ranges.
pub fn project_record<R: LocatedRecord + ?Sized>(record: &R, strict: bool) -> Result<CartesianPoint> {
    validate_record(record, strict)?;
    Ok(project_unchecked(record.latitude(), record.longitude()))
}

#[inline]
fn project_unchecked(latitude: f64, longitude: f64) -> CartesianPoint {
    let (sin_lat, cos_lat) = latitude.to_radians().sin_cos();
    let (sin_lng, cos_lng) = longitude.to_radians().sin_cos();
    CartesianPoint::new(cos_lat * cos_lng, cos_lat * sin_lng, sin_lat)
}

/// Convert a great-circle distance to the chord length on the unit sphere.
///
/// Distances of half the circumference or more cover the whole sphere and map
/// to `f64::INFINITY`.
pub fn meters_to_chord(meters: f64, earth_radius_meters: f64) -> f64 {
    let angle = meters / earth_radius_meters;
    if angle >= PI {
        return f64::INFINITY;
    }
    2.0 * (angle / 2.0).sin()
}

/// Convert a unit-sphere chord length back to a great-circle distance in meters.
///
/// ```
/// use revgeo::compute::projection::{chord_to_meters, meters_to_chord};
///
/// let r = 6_371_008.8;
/// let chord = meters_to_chord(25_000.0, r);
/// assert!((chord_to_meters(chord, r) - 25_000.0).abs() < 1e-6);
/// ```
pub fn chord_to_meters(chord: f64, earth_radius_meters: f64) -> f64 {
    2.0 * earth_radius_meters * (chord / 2.0).clamp(0.0, 1.0).asin()
}

/// Squared chord bound for a radial query of `radius_meters`.
///
/// Returns `Ok(None)` for a negative radius, which can match nothing.
pub fn radius_to_squared_chord(radius_meters: f64, earth_radius_meters: f64) -> Result<Option<f64>> {
    if radius_meters.is_nan() {
        return Err(GeocodeError::InvalidRadius(radius_meters));
    }
    if radius_meters < 0.0 {
        return Ok(None);
    }
    let chord = meters_to_chord(radius_meters, earth_radius_meters);
    Ok(Some(chord * chord))
}
