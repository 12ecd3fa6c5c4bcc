//! Two-part Julian dates.
//!
//! A Julian date near the present burns most of an f64's mantissa on the
//! seven-digit day number. Holding the date as an unevaluated sum of a large
//! part and a small remainder keeps full precision in the fraction-of-day
//! arithmetic, which is what the sidereal-time derivation consumes: a
//! microsecond of day fraction is already tens of microarcseconds of Earth
//! rotation.

use crate::constants::UNIX_EPOCH_JD;
use skyalign_core::constants::{J2000_JD, SECONDS_PER_DAY_F64};
use std::fmt;
use std::time::{SystemTime, UNIX_EPOCH};

/// A UT Julian date held as the unevaluated sum `jd1 + jd2`.
///
/// The split is arbitrary; the constructors here put an epoch-sized value in
/// `jd1` and keep running offsets in `jd2`.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct JulianDate {
    /// Large part of the date, typically a whole-day count or a fixed epoch.
    pub jd1: f64,
    /// Remainder in days.
    pub jd2: f64,
}

impl JulianDate {
    pub fn new(jd1: f64, jd2: f64) -> Self {
        Self { jd1, jd2 }
    }

    /// Splits a single-float Julian date at the day boundary, so whatever
    /// fractional precision the input still carries lands in `jd2`.
    pub fn from_f64(jd: f64) -> Self {
        let whole = jd.trunc();
        Self {
            jd1: whole,
            jd2: jd - whole,
        }
    }

    /// The J2000.0 epoch, JD 2451545.0 (2000-01-01T12:00:00 UT).
    pub fn j2000() -> Self {
        Self {
            jd1: J2000_JD,
            jd2: 0.0,
        }
    }

    /// The Unix epoch, 1970-01-01T00:00:00 UT.
    pub fn unix_epoch() -> Self {
        Self {
            jd1: UNIX_EPOCH_JD,
            jd2: 0.0,
        }
    }

    /// The current system clock: seconds since the Unix epoch, expressed as
    /// a day offset from [`unix_epoch`](Self::unix_epoch).
    pub fn now() -> Self {
        let elapsed = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default();
        Self {
            jd1: UNIX_EPOCH_JD,
            jd2: elapsed.as_secs_f64() / SECONDS_PER_DAY_F64,
        }
    }

    /// Collapses both parts into one float, giving up the split's precision.
    pub fn to_f64(&self) -> f64 {
        self.jd1 + self.jd2
    }

    /// Days since the J2000.0 epoch, differenced part-wise so nearby dates
    /// subtract without cancellation against the day count.
    pub fn days_since_j2000(&self) -> f64 {
        (self.jd1 - J2000_JD) + self.jd2
    }

    /// Offsets the date, folding whole days into `jd1` so that `jd2` stays
    /// small under repeated stepping.
    pub fn add_days(&self, days: f64) -> Self {
        Self {
            jd1: self.jd1 + days.trunc(),
            jd2: self.jd2 + days.fract(),
        }
    }

    pub fn add_seconds(&self, seconds: f64) -> Self {
        self.add_days(seconds / SECONDS_PER_DAY_F64)
    }
}

impl fmt::Display for JulianDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "JD {:.8}", self.to_f64())
    }
}

impl From<f64> for JulianDate {
    fn from(jd: f64) -> Self {
        Self::from_f64(jd)
    }
}
