//! Reverse geocoding over a balanced 3D k-d tree.
//!
//! Records with a latitude and longitude are projected onto the unit sphere
//! and indexed in a k-d tree, which answers "what is near this point?" and
//! "which k known locations are closest?" with exact, deterministic rankings.
//!
//! ```rust
//! use revgeo::{Place, ReverseGeocoder};
//!
//! let geocoder = ReverseGeocoder::from_records(vec![
//!     Place::new("Amsterdam", 52.3676, 4.9041),
//!     Place::new("Rotterdam", 51.9244, 4.4777),
//!     Place::new("Berlin", 52.5200, 13.4050),
//! ])?;
//!
//! let nearest = geocoder.nearest_neighbour_search_lat_lng(52.37, 4.90, 1)?;
//! assert_eq!(nearest[0].name, "Amsterdam");
//!
//! let within_100km = geocoder.radial_search_lat_lng(52.0, 4.8, 100_000.0, 10)?;
//! assert_eq!(within_100km.len(), 2);
//! # Ok::<(), revgeo::GeocodeError>(())
//! ```

pub mod builder;
pub mod compute;
pub mod config;
pub mod error;
pub mod geocoder;

pub use builder::GeocoderBuilder;
pub use config::{Config, DuplicatePolicy, MEAN_EARTH_RADIUS_METERS};
pub use error::{GeocodeError, Result};
pub use geocoder::{GeocoderState, GeocoderStats, Neighbor, ReverseGeocoder, SharedReverseGeocoder};

pub use compute::spatial::SpatialTree;

pub use geo::Point;

pub use revgeo_types::place::Place;
pub use revgeo_types::point::{CartesianPoint, LocatedRecord, lat_lng};

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Common imports
pub mod prelude {

    pub use crate::{GeocodeError, GeocoderBuilder, Result, ReverseGeocoder, SharedReverseGeocoder};

    pub use crate::{Config, DuplicatePolicy};

    pub use crate::{LocatedRecord, Place, Point, lat_lng};
}
