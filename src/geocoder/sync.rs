//! Thread-safe wrapper for interleaved writes and reads.
//!
//! [`SharedReverseGeocoder`] wraps a [`ReverseGeocoder`] in
//! `Arc<parking_lot::RwLock<_>>`: any number of queries run concurrently, and
//! `add`/`balance` take the write lock, so a reader never observes a partially
//! updated tree.
//!
//! With the `async` feature (on by default) every operation also has an
//! `_async` variant that runs the same synchronous code on tokio's blocking
//! pool. The variants change where the work runs, not what it computes; a
//! query that has started runs to completion even if the awaiting task is
//! dropped.
//!
//! # Examples
//!
//! ```rust
//! use revgeo::{Place, SharedReverseGeocoder};
//! use std::thread;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let geocoder = SharedReverseGeocoder::from_records(vec![
//!     Place::new("Amsterdam", 52.3676, 4.9041),
//!     Place::new("Utrecht", 52.0907, 5.1214),
//! ])?;
//!
//! let writer = geocoder.clone();
//! let handle = thread::spawn(move || {
//!     writer.add(Place::new("Rotterdam", 51.9244, 4.4777)).unwrap();
//!     writer.balance();
//! });
//!
//! let nearest = geocoder.nearest_neighbour_search_lat_lng(52.37, 4.90, 1)?;
//! assert_eq!(nearest[0].name, "Amsterdam");
//!
//! handle.join().unwrap();
//! assert_eq!(geocoder.len(), 3);
//! # Ok(())
//! # }
//! ```

use super::{GeocoderStats, Neighbor, ReverseGeocoder};
use crate::config::Config;
use crate::error::Result;
use parking_lot::{RwLock, RwLockReadGuard};
use revgeo_types::point::{LocatedRecord, lat_lng};
use std::sync::Arc;

/// Thread-safe handle to a [`ReverseGeocoder`]; clones share the same index.
#[derive(Debug)]
pub struct SharedReverseGeocoder<T> {
    inner: Arc<RwLock<ReverseGeocoder<T>>>,
}

impl<T> Clone for SharedReverseGeocoder<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<T: LocatedRecord> From<ReverseGeocoder<T>> for SharedReverseGeocoder<T> {
    fn from(geocoder: ReverseGeocoder<T>) -> Self {
        Self::new(geocoder)
    }
}

impl<T: LocatedRecord> SharedReverseGeocoder<T> {
    pub fn new(geocoder: ReverseGeocoder<T>) -> Self {
        Self {
            inner: Arc::new(RwLock::new(geocoder)),
        }
    }

    /// Index `records` and balance once, as [`ReverseGeocoder::from_records`].
    pub fn from_records<I>(records: I) -> Result<Self>
    where
        I: IntoIterator<Item = T>,
    {
        Ok(Self::new(ReverseGeocoder::from_records(records)?))
    }

    pub fn from_records_with_config<I>(records: I, config: Config) -> Result<Self>
    where
        I: IntoIterator<Item = T>,
    {
        Ok(Self::new(ReverseGeocoder::from_records_with_config(
            records, config,
        )?))
    }

    /// Hold the read lock for borrowing queries (`_with_distance` variants,
    /// `records`, ...). Writers wait until the guard is dropped.
    pub fn read(&self) -> RwLockReadGuard<'_, ReverseGeocoder<T>> {
        self.inner.read()
    }

    pub fn add(&self, record: T) -> Result<()> {
        self.inner.write().add(record)
    }

    pub fn add_range<I>(&self, records: I) -> Result<usize>
    where
        I: IntoIterator<Item = T>,
    {
        self.inner.write().add_range(records)
    }

    pub fn balance(&self) {
        self.inner.write().balance();
    }

    pub fn len(&self) -> usize {
        self.inner.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.read().is_empty()
    }

    pub fn stats(&self) -> GeocoderStats {
        self.inner.read().stats()
    }
}

impl<T: LocatedRecord + Clone> SharedReverseGeocoder<T> {
    /// Owned-result variant of [`ReverseGeocoder::radial_search`].
    pub fn radial_search<C>(&self, center: &C, radius_meters: f64, max_count: usize) -> Result<Vec<T>>
    where
        C: LocatedRecord + ?Sized,
    {
        let geocoder = self.inner.read();
        let hits = geocoder.radial_search(center, radius_meters, max_count)?;
        Ok(hits.into_iter().cloned().collect())
    }

    pub fn radial_search_lat_lng(
        &self,
        latitude: f64,
        longitude: f64,
        radius_meters: f64,
        max_count: usize,
    ) -> Result<Vec<T>> {
        self.radial_search(&lat_lng(latitude, longitude), radius_meters, max_count)
    }

    /// Owned-result variant of [`ReverseGeocoder::nearest_neighbour_search`].
    pub fn nearest_neighbour_search<C>(&self, center: &C, max_count: usize) -> Result<Vec<T>>
    where
        C: LocatedRecord + ?Sized,
    {
        let geocoder = self.inner.read();
        let hits = geocoder.nearest_neighbour_search(center, max_count)?;
        Ok(hits.into_iter().cloned().collect())
    }

    pub fn nearest_neighbour_search_lat_lng(
        &self,
        latitude: f64,
        longitude: f64,
        max_count: usize,
    ) -> Result<Vec<T>> {
        self.nearest_neighbour_search(&lat_lng(latitude, longitude), max_count)
    }

    /// Owned `(record, meters)` pairs, as
    /// [`ReverseGeocoder::radial_search_with_distance`].
    pub fn radial_search_with_distance<C>(
        &self,
        center: &C,
        radius_meters: f64,
        max_count: usize,
    ) -> Result<Vec<(T, f64)>>
    where
        C: LocatedRecord + ?Sized,
    {
        let geocoder = self.inner.read();
        let hits = geocoder.radial_search_with_distance(center, radius_meters, max_count)?;
        Ok(owned(hits))
    }

    /// Owned `(record, meters)` pairs, as
    /// [`ReverseGeocoder::nearest_neighbour_search_with_distance`].
    pub fn nearest_neighbour_search_with_distance<C>(&self, center: &C, max_count: usize) -> Result<Vec<(T, f64)>>
    where
        C: LocatedRecord + ?Sized,
    {
        let geocoder = self.inner.read();
        let hits = geocoder.nearest_neighbour_search_with_distance(center, max_count)?;
        Ok(owned(hits))
    }
}

fn owned<T: Clone>(hits: Vec<Neighbor<'_, T>>) -> Vec<(T, f64)> {
    hits.into_iter()
        .map(|hit| (hit.record.clone(), hit.distance_meters))
        .collect()
}

#[cfg(feature = "async")]
impl<T> SharedReverseGeocoder<T>
where
    T: LocatedRecord + Clone + Send + Sync + 'static,
{
    pub async fn add_async(&self, record: T) -> Result<()> {
        let inner = Arc::clone(&self.inner);
        tokio::task::spawn_blocking(move || inner.write().add(record)).await?
    }

    pub async fn add_range_async<I>(&self, records: I) -> Result<usize>
    where
        I: IntoIterator<Item = T> + Send + 'static,
    {
        let inner = Arc::clone(&self.inner);
        tokio::task::spawn_blocking(move || inner.write().add_range(records)).await?
    }

    pub async fn balance_async(&self) -> Result<()> {
        let inner = Arc::clone(&self.inner);
        tokio::task::spawn_blocking(move || inner.write().balance()).await?;
        Ok(())
    }

    pub async fn radial_search_async<C>(&self, center: C, radius_meters: f64, max_count: usize) -> Result<Vec<T>>
    where
        C: LocatedRecord + Send + 'static,
    {
        let shared = self.clone();
        tokio::task::spawn_blocking(move || shared.radial_search(&center, radius_meters, max_count)).await?
    }

    pub async fn radial_search_lat_lng_async(
        &self,
        latitude: f64,
        longitude: f64,
        radius_meters: f64,
        max_count: usize,
    ) -> Result<Vec<T>> {
        self.radial_search_async(lat_lng(latitude, longitude), radius_meters, max_count)
            .await
    }

    pub async fn nearest_neighbour_search_async<C>(&self, center: C, max_count: usize) -> Result<Vec<T>>
    where
        C: LocatedRecord + Send + 'static,
    {
        let shared = self.clone();
        tokio::task::spawn_blocking(move || shared.nearest_neighbour_search(&center, max_count)).await?
    }

    pub async fn nearest_neighbour_search_lat_lng_async(
        &self,
        latitude: f64,
        longitude: f64,
        max_count: usize,
    ) -> Result<Vec<T>> {
        self.nearest_neighbour_search_async(lat_lng(latitude, longitude), max_count)
            .await
    }

    pub async fn radial_search_with_distance_async<C>(
        &self,
        center: C,
        radius_meters: f64,
        max_count: usize,
    ) -> Result<Vec<(T, f64)>>
    where
        C: LocatedRecord + Send + 'static,
    {
        let shared = self.clone();
        tokio::task::spawn_blocking(move || {
            shared.radial_search_with_distance(&center, radius_meters, max_count)
        })
        .await?
    }

    pub async fn nearest_neighbour_search_with_distance_async<C>(
        &self,
        center: C,
        max_count: usize,
    ) -> Result<Vec<(T, f64)>>
    where
        C: LocatedRecord + Send + 'static,
    {
        let shared = self.clone();
        tokio::task::spawn_blocking(move || shared.nearest_neighbour_search_with_distance(&center, max_count))
            .await?
    }
}
