//! Reverse geocoding engine.
//!
//! [`ReverseGeocoder`] owns a [`SpatialTree`] of projected records and answers
//! radial and nearest-neighbour queries in degrees and meters.
//!
//! # Lifecycle
//!
//! Bulk-load (either through [`ReverseGeocoder::from_records`] or
//! [`ReverseGeocoder::add_range`] followed by [`ReverseGeocoder::balance`]),
//! then query. Adding records after a balance is allowed and never affects
//! correctness, but the tree drifts out of balance until `balance` is called
//! again.
//!
//! The engine takes `&mut self` for writes and `&self` for queries, so a
//! balanced engine can be shared by reference between any number of reader
//! threads. See [`SharedReverseGeocoder`] for interleaved writes and reads.

pub mod sync;

pub use sync::SharedReverseGeocoder;

use crate::compute::projection::{chord_to_meters, project_record, radius_to_squared_chord};
use crate::compute::spatial::{InsertOutcome, SearchHit, SpatialTree};
use crate::compute::validation::validate_records;
use crate::config::{Config, DuplicatePolicy};
use crate::error::{GeocodeError, Result};
use revgeo_types::point::{CartesianPoint, LocatedRecord, lat_lng};
use serde::{Deserialize, Serialize};

/// Whether the tree is currently in its balanced shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GeocoderState {
    /// Built or rebalanced with no insertion since.
    Balanced,
    /// Records were added since the last balance; queries are still exact.
    Unbalanced,
}

/// Snapshot of index statistics.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeocoderStats {
    /// Number of indexed records
    pub points: usize,
    /// Longest root-to-leaf path of the tree
    pub height: usize,
    pub state: GeocoderState,
}

/// A query result together with its great-circle distance from the center.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Neighbor<'a, T> {
    pub record: &'a T,
    /// Great-circle distance in meters on a sphere of the configured radius.
    pub distance_meters: f64,
}

/// Reverse geocoder over records of type `T`.
///
/// # Examples
///
/// ```rust
/// use revgeo::{Place, ReverseGeocoder};
///
/// let geocoder = ReverseGeocoder::from_records(vec![
///     Place::new("Amsterdam", 52.3676, 4.9041),
///     Place::new("Rotterdam", 51.9244, 4.4777),
///     Place::new("Utrecht", 52.0907, 5.1214),
///     Place::new("Berlin", 52.5200, 13.4050),
/// ])?;
///
/// let nearest = geocoder.nearest_neighbour_search_lat_lng(52.37, 4.90, 1)?;
/// assert_eq!(nearest[0].name, "Amsterdam");
///
/// // Radii are great-circle meters.
/// let nearby = geocoder.radial_search_lat_lng(52.0, 4.8, 100_000.0, 10)?;
/// let names: Vec<&str> = nearby.iter().map(|p| p.name.as_str()).collect();
/// assert_eq!(names, ["Rotterdam", "Utrecht", "Amsterdam"]);
/// # Ok::<(), revgeo::GeocodeError>(())
/// ```
#[derive(Debug, Clone)]
pub struct ReverseGeocoder<T> {
    tree: SpatialTree<T>,
    config: Config,
    state: GeocoderState,
}

impl<T: LocatedRecord> ReverseGeocoder<T> {
    /// Create an empty geocoder with the default configuration.
    pub fn new() -> Self {
        Self {
            tree: SpatialTree::new(),
            config: Config::default(),
            state: GeocoderState::Balanced,
        }
    }

    /// Create an empty geocoder with a custom configuration.
    pub fn with_config(config: Config) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            tree: SpatialTree::new(),
            config,
            state: GeocoderState::Balanced,
        })
    }

    /// Index `records` and balance the tree once.
    ///
    /// Fails without building anything if any record has invalid geometry.
    pub fn from_records<I>(records: I) -> Result<Self>
    where
        I: IntoIterator<Item = T>,
    {
        Self::from_records_with_config(records, Config::default())
    }

    pub fn from_records_with_config<I>(records: I, config: Config) -> Result<Self>
    where
        I: IntoIterator<Item = T>,
    {
        let mut geocoder = Self::with_config(config)?;
        let added = geocoder.add_range(records)?;
        geocoder.balance();
        log::debug!("built reverse geocoder from {} records", added);
        Ok(geocoder)
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// The duplicate policy in effect.
    pub fn duplicate_policy(&self) -> DuplicatePolicy {
        self.config.duplicate_policy
    }

    /// Number of indexed records.
    pub fn len(&self) -> usize {
        self.tree.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tree.is_empty()
    }

    pub fn state(&self) -> GeocoderState {
        self.state
    }

    pub fn stats(&self) -> GeocoderStats {
        GeocoderStats {
            points: self.tree.len(),
            height: self.tree.height(),
            state: self.state,
        }
    }

    /// Indexed records, in no particular order.
    pub fn records(&self) -> impl Iterator<Item = &T> + '_ {
        self.tree.iter().map(|(_, record)| record)
    }

    /// Index one record without rebalancing.
    ///
    /// # Errors
    ///
    /// - [`GeocodeError::InvalidCoordinate`] for non-finite (or, in strict
    ///   mode, out of range) coordinates; nothing is inserted.
    /// - [`GeocodeError::DuplicatePoint`] when the duplicate policy is
    ///   `Reject` and a coincident record is already indexed.
    pub fn add(&mut self, record: T) -> Result<()> {
        let point = project_record(&record, self.config.strict_ranges).inspect_err(|e| {
            log::warn!("rejecting record: {}", e);
        })?;
        self.insert_projected(point, record)
    }

    /// Index a batch of records without rebalancing, returning how many were
    /// stored as new points.
    ///
    /// The whole batch is projected before anything is inserted, so invalid
    /// geometry anywhere in it leaves the index untouched. A duplicate under
    /// the `Reject` policy stops the batch at that record; earlier records
    /// stay indexed.
    pub fn add_range<I>(&mut self, records: I) -> Result<usize>
    where
        I: IntoIterator<Item = T>,
    {
        let strict = self.config.strict_ranges;
        let records: Vec<T> = records.into_iter().collect();
        validate_records(&records, strict).inspect_err(|e| log::warn!("rejecting batch: {}", e))?;
        let projected = records
            .into_iter()
            .map(|record| project_record(&record, strict).map(|point| (point, record)))
            .collect::<Result<Vec<_>>>()?;

        let before = self.tree.len();
        for (point, record) in projected {
            self.insert_projected(point, record)?;
        }
        Ok(self.tree.len() - before)
    }

    fn insert_projected(&mut self, point: CartesianPoint, record: T) -> Result<()> {
        match self
            .tree
            .insert_with_policy(point, record, self.config.duplicate_policy)
        {
            InsertOutcome::Inserted => {
                self.state = GeocoderState::Unbalanced;
                Ok(())
            }
            InsertOutcome::Replaced(_) => Ok(()),
            InsertOutcome::Skipped(record) => {
                log::debug!(
                    "skipping duplicate record at ({}, {})",
                    record.latitude(),
                    record.longitude()
                );
                Ok(())
            }
            InsertOutcome::Rejected(record) => {
                log::warn!(
                    "rejecting duplicate record at ({}, {})",
                    record.latitude(),
                    record.longitude()
                );
                Err(GeocodeError::DuplicatePoint {
                    latitude: record.latitude(),
                    longitude: record.longitude(),
                })
            }
        }
    }

    /// Rebuild the tree into its balanced shape. No-op on an empty index.
    pub fn balance(&mut self) {
        if !self.tree.is_empty() {
            self.tree.rebuild();
        }
        self.state = GeocoderState::Balanced;
    }

    /// Records within `radius_meters` (great-circle) of `center`, nearest
    /// first, at most `max_count` of them.
    ///
    /// `f64::INFINITY` lifts the radius limit and `usize::MAX` the count limit.
    /// A negative radius or a zero count returns nothing.
    ///
    /// # Errors
    ///
    /// Fails on a center with invalid geometry or a NaN radius.
    pub fn radial_search<C>(&self, center: &C, radius_meters: f64, max_count: usize) -> Result<Vec<&T>>
    where
        C: LocatedRecord + ?Sized,
    {
        Ok(records_of(self.radial_hits(center, radius_meters, max_count)?))
    }

    /// [`radial_search`](Self::radial_search) around a raw latitude/longitude.
    pub fn radial_search_lat_lng(
        &self,
        latitude: f64,
        longitude: f64,
        radius_meters: f64,
        max_count: usize,
    ) -> Result<Vec<&T>> {
        self.radial_search(&lat_lng(latitude, longitude), radius_meters, max_count)
    }

    /// [`radial_search`](Self::radial_search), keeping each result's distance.
    pub fn radial_search_with_distance<C>(
        &self,
        center: &C,
        radius_meters: f64,
        max_count: usize,
    ) -> Result<Vec<Neighbor<'_, T>>>
    where
        C: LocatedRecord + ?Sized,
    {
        let hits = self.radial_hits(center, radius_meters, max_count)?;
        Ok(self.neighbors_of(hits))
    }

    /// The `max_count` records nearest to `center`, nearest first.
    pub fn nearest_neighbour_search<C>(&self, center: &C, max_count: usize) -> Result<Vec<&T>>
    where
        C: LocatedRecord + ?Sized,
    {
        Ok(records_of(self.nearest_hits(center, max_count)?))
    }

    /// [`nearest_neighbour_search`](Self::nearest_neighbour_search) around a
    /// raw latitude/longitude.
    pub fn nearest_neighbour_search_lat_lng(
        &self,
        latitude: f64,
        longitude: f64,
        max_count: usize,
    ) -> Result<Vec<&T>> {
        self.nearest_neighbour_search(&lat_lng(latitude, longitude), max_count)
    }

    /// [`nearest_neighbour_search`](Self::nearest_neighbour_search), keeping
    /// each result's distance.
    pub fn nearest_neighbour_search_with_distance<C>(
        &self,
        center: &C,
        max_count: usize,
    ) -> Result<Vec<Neighbor<'_, T>>>
    where
        C: LocatedRecord + ?Sized,
    {
        let hits = self.nearest_hits(center, max_count)?;
        Ok(self.neighbors_of(hits))
    }

    /// Every indexed record, nearest to `center` first.
    pub fn sort_by_distance<C>(&self, center: &C) -> Result<Vec<&T>>
    where
        C: LocatedRecord + ?Sized,
    {
        self.nearest_neighbour_search(center, self.len())
    }

    fn radial_hits<C>(&self, center: &C, radius_meters: f64, max_count: usize) -> Result<Vec<SearchHit<'_, T>>>
    where
        C: LocatedRecord + ?Sized,
    {
        let query = project_record(center, self.config.strict_ranges)?;
        let hits = match radius_to_squared_chord(radius_meters, self.config.earth_radius_meters)? {
            Some(max_squared_chord) => self.tree.radial_search(&query, max_squared_chord, max_count),
            None => Vec::new(),
        };
        log::trace!(
            "radial search: radius {} m, max {}, {} hits",
            radius_meters,
            max_count,
            hits.len()
        );
        Ok(hits)
    }

    fn nearest_hits<C>(&self, center: &C, max_count: usize) -> Result<Vec<SearchHit<'_, T>>>
    where
        C: LocatedRecord + ?Sized,
    {
        let query = project_record(center, self.config.strict_ranges)?;
        let hits = self.tree.nearest_neighbours(&query, max_count);
        log::trace!("nearest search: max {}, {} hits", max_count, hits.len());
        Ok(hits)
    }

    fn neighbors_of<'a>(&self, hits: Vec<SearchHit<'a, T>>) -> Vec<Neighbor<'a, T>> {
        let radius = self.config.earth_radius_meters;
        hits.into_iter()
            .map(|hit| Neighbor {
                record: hit.value,
                distance_meters: chord_to_meters(hit.distance_squared.sqrt(), radius),
            })
            .collect()
    }
}

fn records_of<T>(hits: Vec<SearchHit<'_, T>>) -> Vec<&T> {
    hits.into_iter().map(|hit| hit.value).collect()
}

impl<T: LocatedRecord> Default for ReverseGeocoder<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: LocatedRecord> Extend<T> for ReverseGeocoder<T> {
    /// Adds every valid record and skips (with a warning) invalid ones.
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for record in iter {
            // Failures are logged by `add`.
            let _ = self.add(record);
        }
    }
}
