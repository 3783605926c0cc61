//! Distance helpers and a linear-scan nearest-neighbour search.

use crate::compute::projection::{chord_to_meters, project_record};
use crate::config::MEAN_EARTH_RADIUS_METERS;
use crate::error::Result;
use geo::{Distance, Haversine};
use revgeo_types::point::{LocatedRecord, lat_lng};

/// Great-circle distance in meters between two located records (haversine,
/// spherical Earth).
///
/// # Examples
///
/// ```rust
/// use revgeo::{lat_lng, compute::spatial::distance_between};
///
/// let amsterdam = lat_lng(52.3676, 4.9041);
/// let berlin = lat_lng(52.5200, 13.4050);
///
/// let dist = distance_between(&amsterdam, &berlin);
/// assert!(dist > 570_000.0 && dist < 580_000.0);
/// ```
pub fn distance_between<A, B>(a: &A, b: &B) -> f64
where
    A: LocatedRecord + ?Sized,
    B: LocatedRecord + ?Sized,
{
    Haversine.distance(
        lat_lng(a.latitude(), a.longitude()),
        lat_lng(b.latitude(), b.longitude()),
    )
}

/// K nearest records by linear scan. Returns `(record, meters)` pairs sorted
/// by distance, equal distances in input order.
///
/// Ranking uses the same unit-sphere projection as the spatial tree, so for
/// the same input order the result matches a tree query exactly. Useful for
/// small collections and for checking indexed results.
///
/// # Errors
///
/// Fails if the center or any record has a non-finite coordinate.
///
/// # Examples
///
/// ```rust
/// use revgeo::{Place, lat_lng, compute::spatial::knn};
///
/// let places = vec![
///     Place::new("Rotterdam", 51.9244, 4.4777),
///     Place::new("Berlin", 52.5200, 13.4050),
///     Place::new("Utrecht", 52.0907, 5.1214),
/// ];
///
/// let nearest = knn(&lat_lng(52.0, 4.8), &places, 2).unwrap();
/// assert_eq!(nearest[0].0.name, "Rotterdam");
/// assert_eq!(nearest[1].0.name, "Utrecht");
/// ```
pub fn knn<'a, C, T>(center: &C, records: &'a [T], k: usize) -> Result<Vec<(&'a T, f64)>>
where
    C: LocatedRecord + ?Sized,
    T: LocatedRecord,
{
    if k == 0 || records.is_empty() {
        return Ok(Vec::new());
    }

    let origin = project_record(center, false)?;
    let mut scored = Vec::with_capacity(records.len());
    for record in records {
        let point = project_record(record, false)?;
        scored.push((record, origin.distance_squared(&point)));
    }

    // Stable sort keeps input order for ties.
    scored.sort_by(|a, b| a.1.total_cmp(&b.1));
    scored.truncate(k);

    Ok(scored
        .into_iter()
        .map(|(record, d2)| (record, chord_to_meters(d2.sqrt(), MEAN_EARTH_RADIUS_METERS)))
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use revgeo_types::place::Place;

    fn cities() -> Vec<Place> {
        vec![
            Place::new("Amsterdam", 52.3676, 4.9041),
            Place::new("Rotterdam", 51.9244, 4.4777),
            Place::new("Utrecht", 52.0907, 5.1214),
            Place::new("Berlin", 52.5200, 13.4050),
        ]
    }

    #[test]
    fn test_distance_between() {
        let nyc = lat_lng(40.7128, -74.0060);
        let la = lat_lng(34.0522, -118.2437);

        // Approximately 3,944 km
        let dist = distance_between(&nyc, &la);
        assert!(dist > 3_900_000.0 && dist < 4_000_000.0);
        assert_eq!(distance_between(&nyc, &nyc), 0.0);
    }

    #[test]
    fn test_knn() {
        let places = cities();
        let nearest = knn(&lat_lng(52.37, 4.90), &places, 2).unwrap();

        assert_eq!(nearest.len(), 2);
        assert_eq!(nearest[0].0.name, "Amsterdam");
        assert_eq!(nearest[1].0.name, "Utrecht");
        assert!(nearest[0].1 < 1_000.0);
    }

    #[test]
    fn test_knn_distance_agrees_with_haversine() {
        let places = cities();
        let center = lat_lng(52.0, 4.8);

        for (place, meters) in knn(&center, &places, 4).unwrap() {
            let expected = distance_between(&center, place);
            assert!((meters - expected).abs() < 1.0, "{}: {meters} vs {expected}", place.name);
        }
    }

    #[test]
    fn test_knn_edge_cases() {
        let places = cities();
        assert!(knn(&lat_lng(0.0, 0.0), &places, 0).unwrap().is_empty());
        assert!(knn::<_, Place>(&lat_lng(0.0, 0.0), &[], 3).unwrap().is_empty());
        assert_eq!(knn(&lat_lng(0.0, 0.0), &places, 10).unwrap().len(), 4);
        assert!(knn(&lat_lng(f64::NAN, 0.0), &places, 1).is_err());
    }

    #[test]
    fn test_knn_ties_keep_input_order() {
        let places = vec![
            Place::new("north", 1.0, 0.0),
            Place::new("east", 0.0, 1.0),
            Place::new("south", -1.0, 0.0),
        ];
        let names: Vec<&str> = knn(&lat_lng(0.0, 0.0), &places, 3)
            .unwrap()
            .into_iter()
            .map(|(p, _)| p.name.as_str())
            .collect();

        // north/south are exactly symmetric, east is not guaranteed bit-equal.
        let north = names.iter().position(|n| *n == "north").unwrap();
        let south = names.iter().position(|n| *n == "south").unwrap();
        assert!(north < south);
    }
}
