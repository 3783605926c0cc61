//! Spatial index and distance helpers.

pub mod algorithms;
pub mod kdtree;

pub use algorithms::{distance_between, knn};
pub use kdtree::{InsertOutcome, SearchHit, SpatialTree};
