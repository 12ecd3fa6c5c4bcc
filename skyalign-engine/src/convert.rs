//! Coordinate conversions between equatorial, horizontal and direction-vector
//! form.
//!
//! One convention is used throughout the engine. A direction on the sphere
//! with azimuthal angle θ (azimuth from north through east, or right
//! ascension) and elevation φ (altitude, or declination) maps to the unit
//! vector
//!
//! ```text
//! (cos φ · sin θ,  cos φ · cos θ,  sin φ)
//! ```
//!
//! so (alt=90°, az=0°) and (α=0h, δ=+90°) both give (0, 0, 1): z points at
//! the zenith under the zenith hint and at the celestial pole under the polar
//! hints. The equatorial↔horizontal rotation runs through the local mean
//! sidereal time for the given UT Julian date and site.

use skyalign_core::angle::{wrap_0_2pi, wrap_pm_pi};
use skyalign_core::constants::PI;
use skyalign_core::{Angle, Location, Vector3};
use skyalign_time::{sidereal, JulianDate};

fn clamped_asin(x: f64) -> f64 {
    libm::asin(x.clamp(-1.0, 1.0))
}

/// Converts equatorial coordinates to horizontal ones for a site and time.
///
/// Returns `(altitude, azimuth)`, azimuth from north through east in
/// [0°, 360°).
pub fn equatorial_to_horizontal(
    ra: Angle,
    dec: Angle,
    site: &Location,
    jd: &JulianDate,
) -> (Angle, Angle) {
    let lst = sidereal::local_mean_sidereal_time(jd, site);
    let ha = wrap_pm_pi(lst.radians() - ra.radians());

    let (sin_ha, cos_ha) = libm::sincos(ha);
    let (sin_dec, cos_dec) = dec.sin_cos();
    let (sin_lat, cos_lat) = libm::sincos(site.latitude);

    let altitude = clamped_asin(sin_dec * sin_lat + cos_dec * cos_lat * cos_ha);
    // atan2 south-referenced, then rotated to the north-through-east convention.
    let azimuth = libm::atan2(
        sin_ha * cos_dec,
        cos_ha * cos_dec * sin_lat - sin_dec * cos_lat,
    ) + PI;

    (
        Angle::from_radians(altitude),
        Angle::from_radians(wrap_0_2pi(azimuth)),
    )
}

/// Inverse of [`equatorial_to_horizontal`] for the same site and time.
///
/// Returns `(right_ascension, declination)`, right ascension in [0h, 24h).
pub fn horizontal_to_equatorial(
    altitude: Angle,
    azimuth: Angle,
    site: &Location,
    jd: &JulianDate,
) -> (Angle, Angle) {
    let a = azimuth.radians() - PI;
    let (sin_a, cos_a) = libm::sincos(a);
    let (sin_alt, cos_alt) = altitude.sin_cos();
    let (sin_lat, cos_lat) = libm::sincos(site.latitude);

    let dec = clamped_asin(sin_lat * sin_alt - cos_lat * cos_alt * cos_a);
    let ha = libm::atan2(sin_a * cos_alt, cos_a * cos_alt * sin_lat + sin_alt * cos_lat);

    let lst = sidereal::local_mean_sidereal_time(jd, site);
    let ra = wrap_0_2pi(lst.radians() - ha);

    (Angle::from_radians(ra), Angle::from_radians(dec))
}

/// Direction cosines for a horizontal coordinate pair.
pub fn direction_from_altaz(altitude: Angle, azimuth: Angle) -> Vector3 {
    let (sin_alt, cos_alt) = altitude.sin_cos();
    let (sin_az, cos_az) = azimuth.sin_cos();
    Vector3::new(cos_alt * sin_az, cos_alt * cos_az, sin_alt)
}

/// Horizontal coordinates for a direction vector; `(altitude, azimuth)`.
pub fn altaz_from_direction(direction: &Vector3) -> (Angle, Angle) {
    let v = direction.normalize();
    let altitude = clamped_asin(v.z);
    let azimuth = wrap_0_2pi(libm::atan2(v.x, v.y));
    (Angle::from_radians(altitude), Angle::from_radians(azimuth))
}

/// Direction cosines for an equatorial coordinate pair, same convention as
/// [`direction_from_altaz`] with right ascension as the azimuthal angle.
pub fn direction_from_equatorial(ra: Angle, dec: Angle) -> Vector3 {
    let (sin_dec, cos_dec) = dec.sin_cos();
    let (sin_ra, cos_ra) = ra.sin_cos();
    Vector3::new(cos_dec * sin_ra, cos_dec * cos_ra, sin_dec)
}

/// Equatorial coordinates for a direction vector; `(right_ascension,
/// declination)`, right ascension in [0h, 24h).
pub fn equatorial_from_direction(direction: &Vector3) -> (Angle, Angle) {
    let v = direction.normalize();
    let dec = clamped_asin(v.z);
    let ra = wrap_0_2pi(libm::atan2(v.x, v.y));
    (Angle::from_radians(ra), Angle::from_radians(dec))
}
