//! Telescope mount alignment engine.
//!
//! A computerized mount never points exactly where it believes it does:
//! polar misalignment, cone error and flexure all bend the mapping between
//! the *celestial* frame (where a target really is, in right ascension and
//! declination) and the *apparent* frame (the direction the mount reports).
//! This crate learns that mapping from *sync points* (observations pairing a
//! known celestial position with the mount's reported direction) and then
//! converts in both directions.
//!
//! The model is piecewise exact through the sync points, not a fit:
//!
//! - With no sync points, queries pass through the plain coordinate
//!   conversions.
//! - With one to three sync points, a single 3×3 transform pair maps the
//!   whole sky, the basis completed with cross products where fewer than
//!   three real points exist.
//! - With four or more, the engine builds two parallel convex hulls (one per
//!   frame) over the sync directions plus a nadir sentinel, attaches a local
//!   transform to every facet, and resolves each query by shooting a ray
//!   from the origin through the query direction into the facets, falling
//!   back to the three nearest sync points when no facet is hit.
//!
//! See [`AlignmentEngine`] for the entry point.

pub mod convert;
pub mod engine;
pub mod error;
pub mod hull;
pub mod matrix;
pub mod sync_point;
pub mod transform;
pub mod triangle;

pub use engine::AlignmentEngine;
pub use error::{Error, Result};
pub use sync_point::{AlignmentDatabase, MountAlignment, SyncPoint};
pub use transform::TransformPair;
