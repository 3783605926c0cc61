//! # revgeo-types
//!
//! Core coordinate and record types for the revgeo reverse geocoder.
//!
//! - **Located records**: the [`LocatedRecord`](point::LocatedRecord) trait implemented by
//!   anything the engine can index, plus [`lat_lng`](point::lat_lng) for building bare
//!   query points.
//! - **Projection target**: [`CartesianPoint`](point::CartesianPoint), a point on the unit sphere.
//! - **Ready-made records**: [`Place`](place::Place), a named gazetteer entry.
//!
//! All types are serializable with Serde and built on top of the `geo` crate's
//! geometric primitives.
//!
//! ## Examples
//!
//! ```rust
//! use revgeo_types::point::{LocatedRecord, lat_lng};
//!
//! let amsterdam = lat_lng(52.3676, 4.9041);
//! assert_eq!(amsterdam.latitude(), 52.3676);
//! assert_eq!(amsterdam.longitude(), 4.9041);
//! ```

pub mod place;
pub mod point;
