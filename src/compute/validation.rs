//! Validation for geographic coordinates.

use crate::error::{GeocodeError, Result};
use revgeo_types::point::LocatedRecord;

fn invalid(latitude: f64, longitude: f64, reason: String) -> GeocodeError {
    GeocodeError::InvalidCoordinate {
        latitude,
        longitude,
        reason,
    }
}

/// Validates a latitude/longitude pair in degrees.
///
/// Non-finite values are always rejected. With `strict` set, latitude must also
/// lie in [-90.0, 90.0] and longitude in [-180.0, 180.0].
///
/// # Examples
///
/// ```
/// use revgeo::compute::validation::validate_coordinate;
///
/// assert!(validate_coordinate(52.3676, 4.9041, true).is_ok());
///
/// // Out of range, only rejected in strict mode
/// assert!(validate_coordinate(95.0, 4.9, false).is_ok());
/// assert!(validate_coordinate(95.0, 4.9, true).is_err());
///
/// // NaN is never accepted
/// assert!(validate_coordinate(f64::NAN, 4.9, false).is_err());
/// ```
pub fn validate_coordinate(latitude: f64, longitude: f64, strict: bool) -> Result<()> {
    if !latitude.is_finite() {
        return Err(invalid(
            latitude,
            longitude,
            format!("latitude must be finite, got: {}", latitude),
        ));
    }

    if !longitude.is_finite() {
        return Err(invalid(
            latitude,
            longitude,
            format!("longitude must be finite, got: {}", longitude),
        ));
    }

    if strict {
        if !(-90.0..=90.0).contains(&latitude) {
            return Err(invalid(
                latitude,
                longitude,
                format!("latitude out of range [-90.0, 90.0]: {}", latitude),
            ));
        }

        if !(-180.0..=180.0).contains(&longitude) {
            return Err(invalid(
                latitude,
                longitude,
                format!("longitude out of range [-180.0, 180.0]: {}", longitude),
            ));
        }
    }

    Ok(())
}

/// Validates the coordinate of a located record.
pub fn validate_record<R: LocatedRecord + ?Sized>(record: &R, strict: bool) -> Result<()> {
    validate_coordinate(record.latitude(), record.longitude(), strict)
}

/// Validates multiple records, reporting the index of the first bad one.
///
/// ```
/// use revgeo::compute::validation::validate_records;
/// use revgeo::lat_lng;
///
/// let points = vec![lat_lng(40.7, -74.0), lat_lng(f64::NAN, 0.0)];
/// let err = validate_records(&points, false).unwrap_err();
/// assert!(err.to_string().contains("index 1"));
/// ```
pub fn validate_records<R: LocatedRecord>(records: &[R], strict: bool) -> Result<()> {
    for (idx, record) in records.iter().enumerate() {
        validate_record(record, strict).map_err(|e| at_index(e, idx))?;
    }
    Ok(())
}

/// Prefix a coordinate error with the position of the offending record.
fn at_index(err: GeocodeError, idx: usize) -> GeocodeError {
    match err {
        GeocodeError::InvalidCoordinate {
            latitude,
            longitude,
            reason,
        } => invalid(
            latitude,
            longitude,
            format!("record at index {}: {}", idx, reason),
        ),
        other => other,
    }
}
