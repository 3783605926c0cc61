//! Compute layer: coordinate validation, projection and the spatial tree.
//!
//! Everything here is pure data-in/data-out and independent of how records are
//! loaded or stored.

pub mod projection;
pub mod spatial;
pub mod validation;
