//! Angular measurement for right ascension, declination, altitude and azimuth.
//!
//! [`Angle`] stores radians internally, because that is what the trigonometric
//! functions consume, and offers constructors and accessors for the units
//! astronomy actually uses: degrees for declination and horizontal coordinates,
//! hours for right ascension (1h = 15 degrees), arcseconds for small offsets.
//!
//! The free functions [`wrap_0_2pi`], [`wrap_pm_pi`] and [`clamp_dec`]
//! implement the two distinct normalization policies: cyclic quantities
//! (right ascension, azimuth, hour angle) wrap, while declination and
//! altitude clamp at the poles, since there is nothing "past" a pole to
//! wrap to.

use crate::constants::{
    ARCSEC_TO_RAD, DEG_TO_RAD, HALF_PI, HOURS_TO_RAD, PI, RAD_TO_ARCSEC, RAD_TO_DEG, RAD_TO_HOURS,
    TWOPI,
};
use core::ops::{Add, Div, Mul, Neg, Sub};
use std::fmt;

/// An angle stored as radians.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Angle {
    radians: f64,
}

impl Angle {
    pub const ZERO: Self = Self { radians: 0.0 };

    #[inline]
    pub fn from_radians(radians: f64) -> Self {
        Self { radians }
    }

    #[inline]
    pub fn from_degrees(degrees: f64) -> Self {
        Self {
            radians: degrees * DEG_TO_RAD,
        }
    }

    /// Creates an angle from hours of right ascension (1h = 15 degrees).
    #[inline]
    pub fn from_hours(hours: f64) -> Self {
        Self {
            radians: hours * HOURS_TO_RAD,
        }
    }

    #[inline]
    pub fn from_arcseconds(arcseconds: f64) -> Self {
        Self {
            radians: arcseconds * ARCSEC_TO_RAD,
        }
    }

    #[inline]
    pub fn radians(self) -> f64 {
        self.radians
    }

    #[inline]
    pub fn degrees(self) -> f64 {
        self.radians * RAD_TO_DEG
    }

    #[inline]
    pub fn hours(self) -> f64 {
        self.radians * RAD_TO_HOURS
    }

    #[inline]
    pub fn arcseconds(self) -> f64 {
        self.radians * RAD_TO_ARCSEC
    }

    #[inline]
    pub fn sin_cos(self) -> (f64, f64) {
        libm::sincos(self.radians)
    }

    #[inline]
    pub fn sin(self) -> f64 {
        libm::sin(self.radians)
    }

    #[inline]
    pub fn cos(self) -> f64 {
        libm::cos(self.radians)
    }

    /// Returns the angle wrapped into [0, 2pi).
    pub fn wrapped_0_2pi(self) -> Self {
        Self::from_radians(wrap_0_2pi(self.radians))
    }

    /// Returns the angle wrapped into [-pi, +pi).
    pub fn wrapped_pm_pi(self) -> Self {
        Self::from_radians(wrap_pm_pi(self.radians))
    }

    /// Returns the angle clamped to [-pi/2, +pi/2].
    pub fn clamped_dec(self) -> Self {
        Self::from_radians(clamp_dec(self.radians))
    }
}

/// Wraps a cyclic angle into [0, 2pi). Used for right ascension and azimuth.
pub fn wrap_0_2pi(radians: f64) -> f64 {
    let r = libm::fmod(radians, TWOPI);
    if r < 0.0 {
        r + TWOPI
    } else {
        r
    }
}

/// Wraps a cyclic angle into [-pi, +pi). Used for hour angles.
pub fn wrap_pm_pi(radians: f64) -> f64 {
    let r = wrap_0_2pi(radians);
    if r >= PI {
        r - TWOPI
    } else {
        r
    }
}

/// Clamps declination or altitude to [-pi/2, +pi/2].
pub fn clamp_dec(radians: f64) -> f64 {
    radians.clamp(-HALF_PI, HALF_PI)
}

/// Angle + Angle
impl Add for Angle {
    type Output = Angle;
    #[inline]
    fn add(self, rhs: Self) -> Self {
        Self::from_radians(self.radians + rhs.radians)
    }
}

/// Angle - Angle
impl Sub for Angle {
    type Output = Angle;
    #[inline]
    fn sub(self, rhs: Self) -> Self {
        Self::from_radians(self.radians - rhs.radians)
    }
}

/// Angle * scalar
impl Mul<f64> for Angle {
    type Output = Angle;
    #[inline]
    fn mul(self, k: f64) -> Self {
        Self::from_radians(self.radians * k)
    }
}

/// Angle / scalar
impl Div<f64> for Angle {
    type Output = Angle;
    #[inline]
    fn div(self, k: f64) -> Self {
        Self::from_radians(self.radians / k)
    }
}

/// -Angle
impl Neg for Angle {
    type Output = Angle;
    #[inline]
    fn neg(self) -> Self {
        Self::from_radians(-self.radians)
    }
}

impl fmt::Display for Angle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.6}°", self.degrees())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unit_conversions() {
        let a = Angle::from_degrees(45.0);
        assert!((a.hours() - 3.0).abs() < 1e-12);
        assert!((a.radians() - std::f64::consts::FRAC_PI_4).abs() < 1e-15);

        let ra = Angle::from_hours(6.0);
        assert!((ra.degrees() - 90.0).abs() < 1e-12);

        let small = Angle::from_arcseconds(3600.0);
        assert!((small.degrees() - 1.0).abs() < 1e-12);
        assert!((small.arcseconds() - 3600.0).abs() < 1e-9);
    }

    #[test]
    fn arithmetic() {
        let a = Angle::from_degrees(30.0);
        let b = Angle::from_degrees(15.0);
        assert!(((a + b).degrees() - 45.0).abs() < 1e-12);
        assert!(((a - b).degrees() - 15.0).abs() < 1e-12);
        assert!(((a * 2.0).degrees() - 60.0).abs() < 1e-12);
        assert!(((a / 2.0).degrees() - 15.0).abs() < 1e-12);
        assert!(((-a).degrees() + 30.0).abs() < 1e-12);
    }

    #[test]
    fn wrap_positive() {
        assert!((wrap_0_2pi(-0.5) - (TWOPI - 0.5)).abs() < 1e-15);
        assert!((wrap_0_2pi(TWOPI + 0.25) - 0.25).abs() < 1e-15);
        assert_eq!(wrap_0_2pi(0.0), 0.0);
    }

    #[test]
    fn wrap_signed() {
        assert!((wrap_pm_pi(3.5) - (3.5 - TWOPI)).abs() < 1e-15);
        assert!((wrap_pm_pi(-0.5) + 0.5).abs() < 1e-15);
        assert!(wrap_pm_pi(PI) < PI);
    }

    #[test]
    fn clamp_at_poles() {
        assert_eq!(clamp_dec(2.0), HALF_PI);
        assert_eq!(clamp_dec(-2.0), -HALF_PI);
        assert_eq!(clamp_dec(0.3), 0.3);
    }

    #[test]
    fn wrapped_methods_match_free_functions() {
        let a = Angle::from_degrees(-10.0);
        assert!((a.wrapped_0_2pi().degrees() - 350.0).abs() < 1e-10);
        let b = Angle::from_degrees(190.0);
        assert!((b.wrapped_pm_pi().degrees() + 170.0).abs() < 1e-10);
        let c = Angle::from_degrees(100.0);
        assert!((c.clamped_dec().degrees() - 90.0).abs() < 1e-12);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn serde_round_trip() {
        let original = Angle::from_degrees(123.456);
        let json = serde_json::to_string(&original).unwrap();
        let back: Angle = serde_json::from_str(&json).unwrap();
        assert_eq!(original, back);
    }
}
