//! Builder for configuring and bulk-loading a geocoder.

use crate::config::{Config, DuplicatePolicy};
use crate::error::Result;
use crate::geocoder::{ReverseGeocoder, SharedReverseGeocoder};
use revgeo_types::point::LocatedRecord;

/// Builder for a [`ReverseGeocoder`] with custom settings and initial records.
///
/// ```rust
/// use revgeo::{DuplicatePolicy, GeocoderBuilder, Place};
///
/// let geocoder = GeocoderBuilder::new()
///     .duplicate_policy(DuplicatePolicy::Skip)
///     .strict_ranges(true)
///     .records(vec![
///         Place::new("Amsterdam", 52.3676, 4.9041),
///         Place::new("Amsterdam", 52.3676, 4.9041),
///     ])
///     .build()?;
///
/// assert_eq!(geocoder.len(), 1);
/// # Ok::<(), revgeo::GeocodeError>(())
/// ```
#[derive(Debug)]
pub struct GeocoderBuilder<T> {
    config: Config,
    records: Vec<T>,
}

impl<T: LocatedRecord> GeocoderBuilder<T> {
    /// Create a builder with the default configuration and no records.
    pub fn new() -> Self {
        Self {
            config: Config::default(),
            records: Vec::new(),
        }
    }

    /// Replace the whole configuration.
    pub fn config(mut self, config: Config) -> Self {
        self.config = config;
        self
    }

    pub fn duplicate_policy(mut self, policy: DuplicatePolicy) -> Self {
        self.config.duplicate_policy = policy;
        self
    }

    /// Reject latitudes and longitudes outside their geographic ranges.
    pub fn strict_ranges(mut self, strict: bool) -> Self {
        self.config.strict_ranges = strict;
        self
    }

    pub fn earth_radius_meters(mut self, radius: f64) -> Self {
        self.config.earth_radius_meters = radius;
        self
    }

    /// Queue records to index on build. Can be called repeatedly.
    pub fn records<I>(mut self, records: I) -> Self
    where
        I: IntoIterator<Item = T>,
    {
        self.records.extend(records);
        self
    }

    /// Validate the configuration, index the queued records and balance once.
    pub fn build(self) -> Result<ReverseGeocoder<T>> {
        ReverseGeocoder::from_records_with_config(self.records, self.config)
    }

    /// Like [`build`](Self::build), wrapped for shared access.
    pub fn build_shared(self) -> Result<SharedReverseGeocoder<T>> {
        Ok(SharedReverseGeocoder::new(self.build()?))
    }
}

impl<T: LocatedRecord> Default for GeocoderBuilder<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::GeocodeError;
    use crate::geocoder::GeocoderState;
    use revgeo_types::place::Place;

    #[test]
    fn test_builder_defaults() {
        let geocoder: ReverseGeocoder<Place> = GeocoderBuilder::new().build().unwrap();
        assert!(geocoder.is_empty());
        assert_eq!(geocoder.config(), &Config::default());
    }

    #[test]
    fn test_builder_records_accumulate() {
        let geocoder = GeocoderBuilder::new()
            .records(vec![Place::new("A", 1.0, 1.0)])
            .records(vec![Place::new("B", 2.0, 2.0), Place::new("C", 3.0, 3.0)])
            .build()
            .unwrap();

        assert_eq!(geocoder.len(), 3);
        assert_eq!(geocoder.state(), GeocoderState::Balanced);
        assert_eq!(geocoder.stats().height, 2);
    }

    #[test]
    fn test_builder_settings_apply() {
        let geocoder = GeocoderBuilder::<Place>::new()
            .config(Config::default().with_duplicate_policy(DuplicatePolicy::Reject))
            .strict_ranges(true)
            .earth_radius_meters(1.0)
            .build()
            .unwrap();

        let config = geocoder.config();
        assert_eq!(config.duplicate_policy, DuplicatePolicy::Reject);
        assert!(config.strict_ranges);
        assert_eq!(config.earth_radius_meters, 1.0);
    }

    #[test]
    fn test_builder_rejects_invalid() {
        let bad_config = GeocoderBuilder::<Place>::new().earth_radius_meters(-1.0).build();
        assert!(matches!(bad_config, Err(GeocodeError::InvalidConfig(_))));

        let bad_record = GeocoderBuilder::new()
            .strict_ranges(true)
            .records(vec![Place::new("X", 0.0, 181.0)])
            .build();
        assert!(matches!(bad_record, Err(GeocodeError::InvalidCoordinate { .. })));
    }

    #[test]
    fn test_build_shared() {
        let shared = GeocoderBuilder::new()
            .records(vec![Place::new("A", 1.0, 1.0)])
            .build_shared()
            .unwrap();
        assert_eq!(shared.len(), 1);
    }
}
