//! Observer location on Earth.
//!
//! The alignment engine treats the site as a point on a sphere: latitude and
//! longitude feed the sidereal-time and horizontal-coordinate math, and the
//! height is carried through for callers that record it. Coordinates are
//! stored in radians (north and east positive), height in metres.

use crate::constants::{DEG_TO_RAD, HALF_PI, PI, RAD_TO_DEG};
use crate::errors::{CoreError, CoreResult};

#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Location {
    /// Latitude in radians. North is positive.
    pub latitude: f64,
    /// Longitude in radians. East is positive.
    pub longitude: f64,
    /// Height above the reference ellipsoid in metres.
    pub height: f64,
}

impl Location {
    /// Creates a location from coordinates in radians.
    ///
    /// # Errors
    ///
    /// Returns an error if a coordinate is non-finite, the latitude is
    /// outside [-pi/2, pi/2], the longitude is outside [-pi, pi], or the
    /// height is outside a plausible terrestrial range.
    pub fn new(latitude: f64, longitude: f64, height: f64) -> CoreResult<Self> {
        if !latitude.is_finite() || latitude.abs() > HALF_PI {
            return Err(CoreError::invalid_input(
                "latitude",
                format!("{latitude} rad outside [-pi/2, pi/2]"),
            ));
        }
        if !longitude.is_finite() || longitude.abs() > PI {
            return Err(CoreError::invalid_input(
                "longitude",
                format!("{longitude} rad outside [-pi, pi]"),
            ));
        }
        if !height.is_finite() || !(-12_000.0..=100_000.0).contains(&height) {
            return Err(CoreError::invalid_input(
                "height",
                format!("{height} m outside [-12000, 100000]"),
            ));
        }
        Ok(Self {
            latitude,
            longitude,
            height,
        })
    }

    /// Creates a location from coordinates in degrees, the usual input form.
    ///
    /// Ranges are checked in degrees before conversion so that ±90° and
    /// ±180° are accepted exactly, independent of rounding in the
    /// degree-to-radian factor.
    pub fn from_degrees(lat_deg: f64, lon_deg: f64, height_m: f64) -> CoreResult<Self> {
        if !lat_deg.is_finite() || lat_deg.abs() > 90.0 {
            return Err(CoreError::invalid_input(
                "latitude",
                format!("{lat_deg} deg outside [-90, 90]"),
            ));
        }
        if !lon_deg.is_finite() || lon_deg.abs() > 180.0 {
            return Err(CoreError::invalid_input(
                "longitude",
                format!("{lon_deg} deg outside [-180, 180]"),
            ));
        }
        if !height_m.is_finite() || !(-12_000.0..=100_000.0).contains(&height_m) {
            return Err(CoreError::invalid_input(
                "height",
                format!("{height_m} m outside [-12000, 100000]"),
            ));
        }
        Ok(Self {
            latitude: lat_deg * DEG_TO_RAD,
            longitude: lon_deg * DEG_TO_RAD,
            height: height_m,
        })
    }

    /// The Royal Observatory, Greenwich: the zero of longitude.
    pub fn greenwich() -> Self {
        Self {
            latitude: 51.4769 * DEG_TO_RAD,
            longitude: 0.0,
            height: 45.0,
        }
    }

    #[inline]
    pub fn latitude_degrees(&self) -> f64 {
        self.latitude * RAD_TO_DEG
    }

    #[inline]
    pub fn longitude_degrees(&self) -> f64 {
        self.longitude * RAD_TO_DEG
    }
}
