//! The alignment engine: model construction and bidirectional queries.
//!
//! [`AlignmentEngine::initialise`] dispatches on the number of sync points.
//! Zero points installs a passthrough; one or two points complete a basis
//! with the mount-alignment axis and cross products before handing the
//! triples to the transform solver; three points go to the solver directly;
//! four or more build the dual faceted hulls. Queries replay the same
//! dispatch, using the single transform pair or a facet lookup with a
//! nearest-neighbour fallback.

use crate::convert;
use crate::error::{Error, Result};
use crate::hull::ConvexHull;
use crate::matrix::matvec3;
use crate::sync_point::{AlignmentDatabase, MountAlignment, SyncPoint};
use crate::transform::{calculate_transform_matrices, forward_transform, TransformPair};
use crate::triangle::ray_intersects_triangle;
use nalgebra::Matrix3;
use skyalign_core::angle::{clamp_dec, wrap_0_2pi};
use skyalign_core::{Angle, Location, Vector3};
use skyalign_time::JulianDate;
use tracing::{debug, trace};

/// Vertex label reserved for the nadir sentinel in both hulls. Facets
/// touching it are skirt facets: they exist so the hull stays a closed solid
/// with few sync points, and are never matrix-loaded or matched by queries.
const NADIR_VERTEX: usize = 0;

enum Model {
    Unbuilt,
    /// No sync points: queries go straight through the coordinate
    /// conversions.
    Passthrough { site: Location },
    /// One to three sync points: a single transform pair covers the sky.
    Single {
        site: Location,
        pair: TransformPair,
        point_count: usize,
    },
    /// Four or more sync points: dual faceted hulls over shared vertex
    /// labels (0 = nadir, k = sync point k-1 in insertion order).
    Faceted {
        site: Location,
        actual_cosines: Vec<Vector3>,
        apparent_cosines: Vec<Vector3>,
        actual_hull: ConvexHull,
        apparent_hull: ConvexHull,
    },
}

/// Bidirectional mapping between the celestial and telescope frames, learned
/// from a sync-point database.
///
/// The engine is single-threaded: callers wanting shared access must wrap it
/// in their own lock, and [`initialise`](Self::initialise) must not run
/// concurrently with queries. A query issued after a successful `initialise`
/// sees the complete new model; a failed `initialise` leaves the engine
/// unbuilt rather than half-built.
pub struct AlignmentEngine {
    mount_alignment: MountAlignment,
    jd_override: Option<JulianDate>,
    model: Model,
}

impl Default for AlignmentEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl AlignmentEngine {
    pub fn new() -> Self {
        Self {
            mount_alignment: MountAlignment::default(),
            jd_override: None,
            model: Model::Unbuilt,
        }
    }

    /// Sets the approximate mount alignment. Takes effect at the next
    /// [`initialise`](Self::initialise); the same hint then governs both
    /// model construction and queries.
    pub fn set_mount_alignment(&mut self, alignment: MountAlignment) {
        self.mount_alignment = alignment;
    }

    pub fn mount_alignment(&self) -> MountAlignment {
        self.mount_alignment
    }

    /// Pins "now" to a fixed Julian date. Queries normally read the system
    /// clock; tests and replay tooling set an override instead.
    pub fn set_julian_date_override(&mut self, jd: Option<JulianDate>) {
        self.jd_override = jd;
    }

    pub fn is_initialised(&self) -> bool {
        !matches!(self.model, Model::Unbuilt)
    }

    /// Number of sync points the current model was built from.
    pub fn sync_point_count(&self) -> usize {
        match &self.model {
            Model::Unbuilt | Model::Passthrough { .. } => 0,
            Model::Single { point_count, .. } => *point_count,
            Model::Faceted { actual_cosines, .. } => actual_cosines.len(),
        }
    }

    /// (Re)builds the transform model from the database.
    ///
    /// The previous model is discarded first; on any failure the engine is
    /// left unbuilt and queries return [`Error::NotInitialised`].
    pub fn initialise(&mut self, db: &AlignmentDatabase) -> Result<()> {
        self.model = Model::Unbuilt;
        let site = *db.reference_position().ok_or(Error::NoReferencePosition)?;
        let entries = db.entries();
        debug!(
            sync_points = entries.len(),
            alignment = ?self.mount_alignment,
            "building alignment model"
        );

        self.model = match entries {
            [] => Model::Passthrough { site },
            [entry] => {
                // Complete the basis: the alignment axis as a fictitious
                // second point, the cross product as the third.
                let a1 = self.actual_direction(entry, &site);
                let p1 = entry.telescope_direction;
                let axis = self.alignment_axis();
                let a3 = a1.cross(&axis).normalize();
                let p3 = p1.cross(&axis).normalize();
                let pair = calculate_transform_matrices([a1, axis, a3], [p1, axis, p3])?;
                Model::Single {
                    site,
                    pair,
                    point_count: 1,
                }
            }
            [e1, e2] => {
                let a1 = self.actual_direction(e1, &site);
                let a2 = self.actual_direction(e2, &site);
                let p1 = e1.telescope_direction;
                let p2 = e2.telescope_direction;
                let a3 = a1.cross(&a2).normalize();
                let p3 = p1.cross(&p2).normalize();
                let pair = calculate_transform_matrices([a1, a2, a3], [p1, p2, p3])?;
                Model::Single {
                    site,
                    pair,
                    point_count: 2,
                }
            }
            [e1, e2, e3] => {
                let actual = [
                    self.actual_direction(e1, &site),
                    self.actual_direction(e2, &site),
                    self.actual_direction(e3, &site),
                ];
                let apparent = [
                    e1.telescope_direction,
                    e2.telescope_direction,
                    e3.telescope_direction,
                ];
                let pair = calculate_transform_matrices(actual, apparent)?;
                Model::Single {
                    site,
                    pair,
                    point_count: 3,
                }
            }
            _ => self.build_faceted(&site, entries)?,
        };
        Ok(())
    }

    /// Maps a celestial position to the apparent telescope direction.
    ///
    /// `jd_offset_days` is added to "now" before the equatorial→horizontal
    /// conversion under the zenith hint, allowing slew-ahead queries.
    pub fn celestial_to_telescope(
        &self,
        ra: Angle,
        dec: Angle,
        jd_offset_days: f64,
    ) -> Result<Vector3> {
        let ra = Angle::from_radians(wrap_0_2pi(ra.radians()));
        let dec = Angle::from_radians(clamp_dec(dec.radians()));

        match &self.model {
            Model::Unbuilt => Err(Error::NotInitialised),
            Model::Passthrough { site } => {
                let jd = self.current_jd().add_days(jd_offset_days);
                Ok(self.actual_direction_at(ra, dec, &jd, site))
            }
            Model::Single { site, pair, .. } => {
                let jd = self.current_jd().add_days(jd_offset_days);
                let actual = self.actual_direction_at(ra, dec, &jd, site);
                Ok(matvec3(&pair.actual_to_apparent, &actual).normalize())
            }
            Model::Faceted {
                site,
                actual_cosines,
                apparent_cosines,
                actual_hull,
                ..
            } => {
                let jd = self.current_jd().add_days(jd_offset_days);
                let actual = self.actual_direction_at(ra, dec, &jd, site);
                let matrix = match Self::facet_transform(actual_hull, &actual) {
                    Some(m) => m,
                    None => {
                        debug!("no actual facet intersection, using nearest-neighbour fallback");
                        Self::nearest_transform(&actual, actual_cosines, apparent_cosines)?
                    }
                };
                Ok(matvec3(&matrix, &actual).normalize())
            }
        }
    }

    /// Maps an apparent telescope direction back to celestial coordinates,
    /// returned as `(right_ascension, declination)` with the right ascension
    /// wrapped into [0h, 24h).
    pub fn telescope_to_celestial(&self, apparent: &Vector3) -> Result<(Angle, Angle)> {
        match &self.model {
            Model::Unbuilt => Err(Error::NotInitialised),
            Model::Passthrough { site } => Ok(self.celestial_from_actual(apparent, site)),
            Model::Single { site, pair, .. } => {
                let actual = matvec3(&pair.apparent_to_actual, apparent).normalize();
                Ok(self.celestial_from_actual(&actual, site))
            }
            Model::Faceted {
                site,
                actual_cosines,
                apparent_cosines,
                apparent_hull,
                ..
            } => {
                let matrix = match Self::facet_transform(apparent_hull, apparent) {
                    Some(m) => m,
                    None => {
                        debug!("no apparent facet intersection, using nearest-neighbour fallback");
                        Self::nearest_transform(apparent, apparent_cosines, actual_cosines)?
                    }
                };
                let actual = matvec3(&matrix, apparent).normalize();
                Ok(self.celestial_from_actual(&actual, site))
            }
        }
    }

    fn current_jd(&self) -> JulianDate {
        self.jd_override.unwrap_or_else(JulianDate::now)
    }

    /// The fictitious second sync direction implied by the mount hint:
    /// the zenith, or the active celestial pole.
    fn alignment_axis(&self) -> Vector3 {
        match self.mount_alignment {
            MountAlignment::Zenith => Vector3::z_axis(),
            MountAlignment::NorthCelestialPole => {
                convert::direction_from_equatorial(Angle::ZERO, Angle::from_degrees(90.0))
            }
            MountAlignment::SouthCelestialPole => {
                convert::direction_from_equatorial(Angle::ZERO, Angle::from_degrees(-90.0))
            }
        }
    }

    /// Actual direction cosines for a sync point, following the hint: via
    /// horizontal coordinates at the observation time for an alt-az mount,
    /// straight from equatorial coordinates for a polar mount.
    fn actual_direction(&self, point: &SyncPoint, site: &Location) -> Vector3 {
        self.actual_direction_at(
            point.right_ascension,
            point.declination,
            &point.observation_jd,
            site,
        )
    }

    fn actual_direction_at(
        &self,
        ra: Angle,
        dec: Angle,
        jd: &JulianDate,
        site: &Location,
    ) -> Vector3 {
        match self.mount_alignment {
            MountAlignment::Zenith => {
                let (altitude, azimuth) = convert::equatorial_to_horizontal(ra, dec, site, jd);
                convert::direction_from_altaz(altitude, azimuth)
            }
            MountAlignment::NorthCelestialPole | MountAlignment::SouthCelestialPole => {
                convert::direction_from_equatorial(ra, dec)
            }
        }
    }

    /// Inverse of [`actual_direction_at`](Self::actual_direction_at) at the
    /// current time.
    fn celestial_from_actual(&self, actual: &Vector3, site: &Location) -> (Angle, Angle) {
        match self.mount_alignment {
            MountAlignment::Zenith => {
                let (altitude, azimuth) = convert::altaz_from_direction(actual);
                convert::horizontal_to_equatorial(altitude, azimuth, site, &self.current_jd())
            }
            MountAlignment::NorthCelestialPole | MountAlignment::SouthCelestialPole => {
                convert::equatorial_from_direction(actual)
            }
        }
    }

    fn build_faceted(&self, site: &Location, entries: &[SyncPoint]) -> Result<Model> {
        let mut actual_hull = ConvexHull::new();
        let mut apparent_hull = ConvexHull::new();
        let nadir = Vector3::new(0.0, 0.0, -1.0);
        actual_hull.add_vertex(nadir);
        apparent_hull.add_vertex(nadir);

        let mut actual_cosines = Vec::with_capacity(entries.len());
        let mut apparent_cosines = Vec::with_capacity(entries.len());
        for entry in entries {
            let actual = self.actual_direction(entry, site);
            actual_hull.add_vertex(actual);
            apparent_hull.add_vertex(entry.telescope_direction);
            actual_cosines.push(actual);
            apparent_cosines.push(entry.telescope_direction);
        }

        actual_hull.construct()?;
        apparent_hull.construct()?;
        debug!(
            actual_facets = actual_hull.facet_count(),
            apparent_facets = apparent_hull.facet_count(),
            "constructed dual hulls"
        );

        Self::load_facet_matrices(&mut actual_hull, &actual_cosines, &apparent_cosines)?;
        Self::load_facet_matrices(&mut apparent_hull, &apparent_cosines, &actual_cosines)?;

        Ok(Model::Faceted {
            site: *site,
            actual_cosines,
            apparent_cosines,
            actual_hull,
            apparent_hull,
        })
    }

    /// Attaches `target·source⁻¹` to every non-skirt facet, indexing the
    /// per-point cosine arrays through the shared vertex labels.
    fn load_facet_matrices(
        hull: &mut ConvexHull,
        source: &[Vector3],
        target: &[Vector3],
    ) -> Result<()> {
        for facet in hull.facets_mut() {
            if facet.touches(NADIR_VERTEX) {
                continue;
            }
            let [i, j, k] = facet.vertices;
            let m = forward_transform(
                [source[i - 1], source[j - 1], source[k - 1]],
                [target[i - 1], target[j - 1], target[k - 1]],
            )?;
            facet.matrix = Some(m);
        }
        Ok(())
    }

    /// Scans the hull's facets in arena order for one pierced by the query
    /// direction, skipping skirt facets. Returns its matrix, or `None` when
    /// the direction leaves the hull between facets.
    fn facet_transform(hull: &ConvexHull, direction: &Vector3) -> Option<Matrix3<f64>> {
        // Scaled by 2 so the ray fully traverses the unit-radius hull.
        let ray = *direction * 2.0;
        for facet in hull.facets() {
            if facet.touches(NADIR_VERTEX) {
                continue;
            }
            let [i, j, k] = facet.vertices;
            if ray_intersects_triangle(&ray, hull.vertex(i), hull.vertex(j), hull.vertex(k)) {
                trace!(vertices = ?facet.vertices, "facet hit");
                return facet.matrix;
            }
        }
        None
    }

    /// Builds a one-call transform from the three sync points nearest to
    /// `direction`. `source` supplies both the distance metric and the
    /// source triple, `target` the opposite frame's triple; the two query
    /// directions pass the arrays in opposite orders.
    fn nearest_transform(
        direction: &Vector3,
        source: &[Vector3],
        target: &[Vector3],
    ) -> Result<Matrix3<f64>> {
        let mut by_distance: Vec<usize> = (0..source.len()).collect();
        by_distance.sort_by(|&a, &b| {
            let da = (source[a] - *direction).magnitude();
            let db = (source[b] - *direction).magnitude();
            da.partial_cmp(&db).unwrap_or(std::cmp::Ordering::Equal)
        });
        let (i, j, k) = (by_distance[0], by_distance[1], by_distance[2]);
        forward_transform(
            [source[i], source[j], source[k]],
            [target[i], target[j], target[k]],
        )
        .map_err(|_| Error::NoTransform)
    }
}
