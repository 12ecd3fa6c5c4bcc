//! Incremental 3-D convex hull over an index arena.
//!
//! Vertices are appended in caller order and their arena index doubles as
//! their label; the engine reserves index 0 for the nadir sentinel. Facets
//! live in a tombstoned arena (`Vec<Option<Facet>>`), keep an outward
//! winding, and carry an optional 3×3 matrix payload that the engine attaches
//! after construction. Iteration order over live facets is arena order,
//! which plays the role of the face ring in classic pointer-based hull
//! implementations.
//!
//! Construction is beneath-beyond: seed a tetrahedron from the first four
//! affinely independent vertices, then for each remaining vertex delete the
//! facets it can see and stitch new facets along the horizon. A vertex
//! inside the current hull is absorbed without creating facets.

use crate::error::{Error, Result};
use nalgebra::Matrix3;
use skyalign_core::Vector3;
use std::collections::HashSet;

/// Visibility tolerance for the plane-side predicate, sized for vertices on
/// the unit sphere.
const EPSILON: f64 = 1e-7;

/// A triangular hull face: three vertex labels and the transform attached to
/// the facet, if any.
#[derive(Debug, Clone)]
pub struct Facet {
    pub vertices: [usize; 3],
    pub matrix: Option<Matrix3<f64>>,
}

impl Facet {
    fn new(vertices: [usize; 3]) -> Self {
        Self {
            vertices,
            matrix: None,
        }
    }

    /// True when the facet has the given vertex label as a corner.
    pub fn touches(&self, vertex: usize) -> bool {
        self.vertices.contains(&vertex)
    }
}

#[derive(Debug, Clone, Default)]
pub struct ConvexHull {
    vertices: Vec<Vector3>,
    facets: Vec<Option<Facet>>,
}

impl ConvexHull {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a vertex; the returned index is its permanent label.
    pub fn add_vertex(&mut self, v: Vector3) -> usize {
        self.vertices.push(v);
        self.vertices.len() - 1
    }

    pub fn vertex(&self, index: usize) -> &Vector3 {
        &self.vertices[index]
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Number of live facets.
    pub fn facet_count(&self) -> usize {
        self.facets.iter().filter(|f| f.is_some()).count()
    }

    pub fn facets(&self) -> impl Iterator<Item = &Facet> {
        self.facets.iter().filter_map(|f| f.as_ref())
    }

    pub fn facets_mut(&mut self) -> impl Iterator<Item = &mut Facet> {
        self.facets.iter_mut().filter_map(|f| f.as_mut())
    }

    /// Builds the hull over all vertices added so far, replacing any facets
    /// from an earlier construction.
    ///
    /// # Errors
    ///
    /// Fails when fewer than four vertices exist or when every vertex is
    /// coincident, collinear or coplanar within tolerance.
    pub fn construct(&mut self) -> Result<()> {
        self.facets.clear();
        let seed = self.seed_tetrahedron()?;
        for index in 0..self.vertices.len() {
            if !seed.contains(&index) {
                self.insert(index);
            }
        }
        Ok(())
    }

    /// Signed distance from a point to a facet's plane; positive on the
    /// outward side.
    fn signed_distance(&self, facet: &[usize; 3], point: &Vector3) -> f64 {
        let v0 = self.vertices[facet[0]];
        let normal = (self.vertices[facet[1]] - v0)
            .cross(&(self.vertices[facet[2]] - v0))
            .normalize();
        normal.dot(&(*point - v0))
    }

    /// Finds four affinely independent vertices and pushes the four outward
    /// oriented facets of their tetrahedron.
    fn seed_tetrahedron(&mut self) -> Result<[usize; 4]> {
        let n = self.vertices.len();
        if n < 4 {
            return Err(Error::Hull(format!("need at least 4 vertices, have {n}")));
        }

        let i0 = 0;
        let i1 = (1..n)
            .find(|&i| (self.vertices[i] - self.vertices[i0]).magnitude() > EPSILON)
            .ok_or_else(|| Error::Hull("all vertices coincident".into()))?;
        let edge = self.vertices[i1] - self.vertices[i0];

        let i2 = (1..n)
            .filter(|&i| i != i1)
            .find(|&i| {
                edge.cross(&(self.vertices[i] - self.vertices[i0]))
                    .magnitude()
                    > EPSILON
            })
            .ok_or_else(|| Error::Hull("all vertices collinear".into()))?;
        let normal = edge
            .cross(&(self.vertices[i2] - self.vertices[i0]))
            .normalize();

        let i3 = (1..n)
            .filter(|&i| i != i1 && i != i2)
            .find(|&i| normal.dot(&(self.vertices[i] - self.vertices[i0])).abs() > EPSILON)
            .ok_or_else(|| Error::Hull("all vertices coplanar".into()))?;

        let corners = [i0, i1, i2, i3];
        for skip in 0..4 {
            let mut face = [0usize; 3];
            let mut w = 0;
            for (c, &corner) in corners.iter().enumerate() {
                if c != skip {
                    face[w] = corner;
                    w += 1;
                }
            }
            // Orient the face so the remaining corner lies behind it.
            if self.signed_distance(&face, &self.vertices[corners[skip]]) > 0.0 {
                face.swap(1, 2);
            }
            self.facets.push(Some(Facet::new(face)));
        }
        Ok(corners)
    }

    /// Beneath-beyond insertion of one vertex into the current hull.
    fn insert(&mut self, point: usize) {
        let p = self.vertices[point];
        let visible: Vec<usize> = self
            .facets
            .iter()
            .enumerate()
            .filter_map(|(idx, f)| f.as_ref().map(|facet| (idx, facet)))
            .filter(|(_, facet)| self.signed_distance(&facet.vertices, &p) > EPSILON)
            .map(|(idx, _)| idx)
            .collect();
        if visible.is_empty() {
            // Inside (or on) the hull: absorbed, no facets.
            return;
        }

        let mut visible_edges: HashSet<(usize, usize)> = HashSet::new();
        for &idx in &visible {
            if let Some(facet) = &self.facets[idx] {
                let [a, b, c] = facet.vertices;
                visible_edges.insert((a, b));
                visible_edges.insert((b, c));
                visible_edges.insert((c, a));
            }
        }

        // The horizon: directed edges of visible facets whose twin belongs
        // to a facet the point cannot see. Stitching (a, b, point) along
        // each keeps the outward winding.
        let horizon: Vec<(usize, usize)> = visible_edges
            .iter()
            .copied()
            .filter(|&(a, b)| !visible_edges.contains(&(b, a)))
            .collect();

        for idx in visible {
            self.facets[idx] = None;
        }
        for (a, b) in horizon {
            self.facets.push(Some(Facet::new([a, b, point])));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hull_of(points: &[Vector3]) -> ConvexHull {
        let mut hull = ConvexHull::new();
        for &p in points {
            hull.add_vertex(p);
        }
        hull
    }

    fn octahedron() -> Vec<Vector3> {
        vec![
            Vector3::x_axis(),
            -Vector3::x_axis(),
            Vector3::y_axis(),
            -Vector3::y_axis(),
            Vector3::z_axis(),
            -Vector3::z_axis(),
        ]
    }

    /// Every directed edge of a closed orientable triangulation appears
    /// exactly once, with its twin on the neighbouring facet.
    fn assert_watertight(hull: &ConvexHull) {
        let mut edges = HashSet::new();
        for facet in hull.facets() {
            let [a, b, c] = facet.vertices;
            for edge in [(a, b), (b, c), (c, a)] {
                assert!(edges.insert(edge), "duplicate directed edge {edge:?}");
            }
        }
        for &(a, b) in &edges {
            assert!(edges.contains(&(b, a)), "unmatched edge ({a}, {b})");
        }
    }

    fn assert_outward(hull: &ConvexHull) {
        // All hull vertices must be on or behind every facet plane.
        for facet in hull.facets() {
            for i in 0..hull.vertex_count() {
                let d = hull.signed_distance(&facet.vertices, hull.vertex(i));
                assert!(d <= EPSILON, "vertex {i} in front of {:?}: {d}", facet.vertices);
            }
        }
    }

    #[test]
    fn tetrahedron_has_four_facets() {
        let mut hull = hull_of(&[
            Vector3::new(0.0, 0.0, -1.0),
            Vector3::x_axis(),
            Vector3::y_axis(),
            Vector3::z_axis(),
        ]);
        hull.construct().unwrap();
        assert_eq!(hull.facet_count(), 4);
        assert_watertight(&hull);
        assert_outward(&hull);
    }

    #[test]
    fn octahedron_has_eight_facets() {
        let mut hull = hull_of(&octahedron());
        hull.construct().unwrap();
        assert_eq!(hull.facet_count(), 8);
        assert_watertight(&hull);
        assert_outward(&hull);
    }

    #[test]
    fn facet_count_is_bounded_by_euler() {
        // 2V - 4 facets for a simplicial polytope on V vertices.
        let mut hull = hull_of(&octahedron());
        hull.add_vertex(Vector3::new(1.0, 1.0, 1.0).normalize());
        hull.add_vertex(Vector3::new(-1.0, 1.0, 1.0).normalize());
        hull.construct().unwrap();
        assert!(hull.facet_count() <= 2 * hull.vertex_count() - 4);
        assert_watertight(&hull);
        assert_outward(&hull);
    }

    #[test]
    fn interior_vertex_is_absorbed() {
        let mut hull = hull_of(&octahedron());
        let inside = hull.add_vertex(Vector3::new(0.1, 0.1, 0.1));
        hull.construct().unwrap();
        assert_eq!(hull.facet_count(), 8);
        for facet in hull.facets() {
            assert!(!facet.touches(inside));
        }
    }

    #[test]
    fn coplanar_point_splits_the_face() {
        // Nadir plus four points, one of them coplanar with two others and
        // the nadir: the quad face is triangulated, not lost.
        let mut hull = hull_of(&[
            Vector3::new(0.0, 0.0, -1.0),
            Vector3::x_axis(),
            Vector3::y_axis(),
            Vector3::z_axis(),
            -Vector3::x_axis(),
        ]);
        hull.construct().unwrap();
        assert_eq!(hull.facet_count(), 6);
        assert_watertight(&hull);
        assert_outward(&hull);
    }

    #[test]
    fn too_few_vertices_fails() {
        let mut hull = hull_of(&[Vector3::x_axis(), Vector3::y_axis(), Vector3::z_axis()]);
        assert!(matches!(hull.construct(), Err(Error::Hull(_))));
    }

    #[test]
    fn coplanar_input_fails() {
        let mut hull = hull_of(&[
            Vector3::new(0.0, 0.0, 0.0),
            Vector3::new(1.0, 0.0, 0.0),
            Vector3::new(0.0, 1.0, 0.0),
            Vector3::new(1.0, 1.0, 0.0),
        ]);
        assert!(matches!(hull.construct(), Err(Error::Hull(_))));
    }

    #[test]
    fn collinear_input_fails() {
        let mut hull = hull_of(&[
            Vector3::new(0.0, 0.0, 0.0),
            Vector3::new(1.0, 0.0, 0.0),
            Vector3::new(2.0, 0.0, 0.0),
            Vector3::new(3.0, 0.0, 0.0),
        ]);
        assert!(matches!(hull.construct(), Err(Error::Hull(_))));
    }

    #[test]
    fn construct_is_idempotent() {
        let mut hull = hull_of(&octahedron());
        hull.construct().unwrap();
        hull.construct().unwrap();
        assert_eq!(hull.facet_count(), 8);
    }

    #[test]
    fn matrix_payload_survives_iteration() {
        let mut hull = hull_of(&octahedron());
        hull.construct().unwrap();
        for facet in hull.facets_mut() {
            facet.matrix = Some(Matrix3::identity());
        }
        assert!(hull.facets().all(|f| f.matrix.is_some()));
    }
}
