//! Time handling for the skyalign crates: two-part Julian dates and mean
//! sidereal time. Deliberately small; the alignment engine needs a UT day
//! count and the sidereal rotation angle it implies, not a full set of
//! astronomical time scales.

pub mod constants;
pub mod julian;
pub mod sidereal;

pub use julian::JulianDate;
