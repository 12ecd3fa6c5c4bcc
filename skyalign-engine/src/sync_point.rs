use skyalign_core::angle::{clamp_dec, wrap_0_2pi};
use skyalign_core::{Angle, Location, Vector3};
use skyalign_time::JulianDate;

/// Coarse description of how the mount is set up, used to decide whether
/// "actual" direction vectors are built from horizontal coordinates (an
/// alt-az mount parked at the zenith) or straight from equatorial
/// coordinates (a polar-aligned mount).
///
/// The same hint must be in effect for building the model and for querying
/// it; [`crate::AlignmentEngine`] enforces this by owning the hint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MountAlignment {
    #[default]
    Zenith,
    NorthCelestialPole,
    SouthCelestialPole,
}

/// One alignment observation: where the target really was, and where the
/// mount reported pointing when centred on it.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SyncPoint {
    pub right_ascension: Angle,
    pub declination: Angle,
    pub observation_jd: JulianDate,
    pub telescope_direction: Vector3,
}

impl SyncPoint {
    /// Creates a sync point, normalizing the inputs: right ascension wraps
    /// into [0h, 24h), declination clamps to [-90°, +90°], and the telescope
    /// direction is scaled to unit length.
    pub fn new(
        right_ascension: Angle,
        declination: Angle,
        observation_jd: JulianDate,
        telescope_direction: Vector3,
    ) -> Self {
        Self {
            right_ascension: Angle::from_radians(wrap_0_2pi(right_ascension.radians())),
            declination: Angle::from_radians(clamp_dec(declination.radians())),
            observation_jd,
            telescope_direction: telescope_direction.normalize(),
        }
    }
}

/// In-memory sync-point store: entries in insertion order plus the site's
/// geographic reference position. The engine's hull path relies on the
/// ordering to match hull vertex labels back to entries, so entries are
/// append-only between [`clear`](Self::clear) calls.
#[derive(Debug, Clone, Default)]
pub struct AlignmentDatabase {
    points: Vec<SyncPoint>,
    reference_position: Option<Location>,
}

impl AlignmentDatabase {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_reference_position(&mut self, position: Location) {
        self.reference_position = Some(position);
    }

    pub fn reference_position(&self) -> Option<&Location> {
        self.reference_position.as_ref()
    }

    pub fn add(&mut self, point: SyncPoint) {
        self.points.push(point);
    }

    pub fn clear(&mut self) {
        self.points.clear();
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn entries(&self) -> &[SyncPoint] {
        &self.points
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn point(ra_hours: f64, dec_deg: f64) -> SyncPoint {
        SyncPoint::new(
            Angle::from_hours(ra_hours),
            Angle::from_degrees(dec_deg),
            JulianDate::j2000(),
            Vector3::z_axis(),
        )
    }

    #[test]
    fn new_wraps_right_ascension() {
        let p = point(25.5, 0.0);
        assert!((p.right_ascension.hours() - 1.5).abs() < 1e-10);

        let q = point(-2.0, 0.0);
        assert!((q.right_ascension.hours() - 22.0).abs() < 1e-10);
    }

    #[test]
    fn new_clamps_declination() {
        let p = point(0.0, 95.0);
        assert!((p.declination.degrees() - 90.0).abs() < 1e-12);

        let q = point(0.0, -100.0);
        assert!((q.declination.degrees() + 90.0).abs() < 1e-12);
    }

    #[test]
    fn new_normalises_telescope_direction() {
        let p = SyncPoint::new(
            Angle::ZERO,
            Angle::ZERO,
            JulianDate::j2000(),
            Vector3::new(0.0, 0.0, 3.0),
        );
        assert_eq!(p.telescope_direction, Vector3::z_axis());
    }

    #[test]
    fn database_keeps_insertion_order() {
        let mut db = AlignmentDatabase::new();
        assert!(db.is_empty());
        db.add(point(1.0, 10.0));
        db.add(point(2.0, 20.0));
        db.add(point(3.0, 30.0));
        assert_eq!(db.len(), 3);
        let hours: Vec<f64> = db.entries().iter().map(|p| p.right_ascension.hours()).collect();
        assert!((hours[0] - 1.0).abs() < 1e-10);
        assert!((hours[1] - 2.0).abs() < 1e-10);
        assert!((hours[2] - 3.0).abs() < 1e-10);
    }

    #[test]
    fn clear_keeps_reference_position() {
        let mut db = AlignmentDatabase::new();
        db.set_reference_position(Location::greenwich());
        db.add(point(1.0, 10.0));
        db.clear();
        assert!(db.is_empty());
        assert!(db.reference_position().is_some());
    }

    #[test]
    fn default_alignment_is_zenith() {
        assert_eq!(MountAlignment::default(), MountAlignment::Zenith);
    }
}
