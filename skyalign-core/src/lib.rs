//! Core primitives shared by the skyalign crates: typed angles, direction
//! vectors on the celestial sphere, and the observer's geographic location.

pub mod angle;
pub mod constants;
pub mod errors;
pub mod location;
pub mod vector3;

pub use angle::Angle;
pub use errors::{CoreError, CoreResult};
pub use location::Location;
pub use vector3::Vector3;
