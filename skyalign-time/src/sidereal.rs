//! Mean sidereal time.
//!
//! Greenwich mean sidereal time comes from the IAU 1982 polynomial in UT days
//! since J2000 (Meeus, *Astronomical Algorithms*, eq. 12.4); local mean
//! sidereal time adds the observer's east longitude. Apparent sidereal time
//! (the equation of the equinoxes) is intentionally omitted; the alignment
//! engine absorbs systematic offsets far larger than the ~1s difference.

use crate::JulianDate;
use skyalign_core::angle::wrap_0_2pi;
use skyalign_core::constants::{DAYS_PER_JULIAN_CENTURY, DEG_TO_RAD};
use skyalign_core::{Angle, Location};

/// Greenwich mean sidereal time for a UT Julian date.
pub fn greenwich_mean_sidereal_time(jd: &JulianDate) -> Angle {
    let d = jd.days_since_j2000();
    let t = d / DAYS_PER_JULIAN_CENTURY;
    let gmst_deg = 280.460_618_37 + 360.985_647_366_29 * d + t * t * (0.000_387_933 - t / 38_710_000.0);
    Angle::from_radians(wrap_0_2pi(gmst_deg * DEG_TO_RAD))
}

/// Local mean sidereal time: GMST plus the site's east longitude.
pub fn local_mean_sidereal_time(jd: &JulianDate, location: &Location) -> Angle {
    let lmst = greenwich_mean_sidereal_time(jd).radians() + location.longitude;
    Angle::from_radians(wrap_0_2pi(lmst))
}
