//! Möller–Trumbore ray-triangle intersection.
//!
//! The ray starts at the origin, which is the centre of both hulls, so the
//! usual ray-origin term drops out. Callers pass the query direction scaled
//! by 2 so that a legitimate hit on the unit-radius hull lands near t = 0.5,
//! comfortably above the epsilon floor. Both the determinant test and the
//! final distance test use machine epsilon; the determinant's sign is kept,
//! so back-facing facets are still rejected by the barycentric bounds rather
//! than culled early.

use skyalign_core::Vector3;

/// Tests whether the ray from the origin along `ray` pierces the triangle
/// `(v1, v2, v3)`.
pub fn ray_intersects_triangle(ray: &Vector3, v1: &Vector3, v2: &Vector3, v3: &Vector3) -> bool {
    let edge1 = *v2 - *v1;
    let edge2 = *v3 - *v1;

    let p = ray.cross(&edge2);
    let det = edge1.dot(&p);
    // A near-zero determinant means the ray runs parallel to the triangle.
    if det.abs() < f64::EPSILON {
        return false;
    }
    let inv_det = 1.0 / det;

    // Ray origin is (0,0,0), so the origin-to-vertex offset is just -v1.
    let t0 = -*v1;

    let u = t0.dot(&p) * inv_det;
    if !(0.0..=1.0).contains(&u) {
        return false;
    }

    let q = t0.cross(&edge1);
    let v = ray.dot(&q) * inv_det;
    if v < 0.0 || u + v > 1.0 {
        return false;
    }

    let t = edge2.dot(&q) * inv_det;
    t > f64::EPSILON
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit_triangle() -> (Vector3, Vector3, Vector3) {
        (Vector3::x_axis(), Vector3::y_axis(), Vector3::z_axis())
    }

    #[test]
    fn ray_through_centroid_hits() {
        let (v1, v2, v3) = unit_triangle();
        let ray = Vector3::new(1.0, 1.0, 1.0).normalize() * 2.0;
        assert!(ray_intersects_triangle(&ray, &v1, &v2, &v3));
    }

    #[test]
    fn ray_opposite_direction_misses() {
        let (v1, v2, v3) = unit_triangle();
        let ray = Vector3::new(-1.0, -1.0, -1.0).normalize() * 2.0;
        assert!(!ray_intersects_triangle(&ray, &v1, &v2, &v3));
    }

    #[test]
    fn ray_outside_barycentric_bounds_misses() {
        let (v1, v2, v3) = unit_triangle();
        // Points at the hemisphere containing the triangle but wide of it.
        let ray = Vector3::new(1.0, -0.5, 0.2).normalize() * 2.0;
        assert!(!ray_intersects_triangle(&ray, &v1, &v2, &v3));
    }

    #[test]
    fn ray_in_triangle_plane_misses() {
        // A triangle whose plane contains the origin: the determinant
        // vanishes and the test must reject rather than divide by zero.
        let v1 = Vector3::x_axis();
        let v2 = Vector3::z_axis();
        let v3 = -Vector3::x_axis();
        let ray = Vector3::new(0.6, 0.0, 0.8) * 2.0;
        assert!(!ray_intersects_triangle(&ray, &v1, &v2, &v3));
    }

    #[test]
    fn hit_lands_near_half_t() {
        // With the query direction scaled by 2, a hit on a unit-sphere facet
        // implies t close to 0.5; verify the hit survives the t > epsilon
        // floor even for a grazing direction near a vertex.
        let (v1, v2, v3) = unit_triangle();
        let near_vertex = Vector3::new(0.98, 0.01, 0.01).normalize() * 2.0;
        assert!(ray_intersects_triangle(&near_vertex, &v1, &v2, &v3));
    }

    #[test]
    fn winding_does_not_cull() {
        // The determinant sign is retained, not culled: a hit must be
        // reported for both windings of the same triangle.
        let (v1, v2, v3) = unit_triangle();
        let ray = Vector3::new(1.0, 1.0, 1.0).normalize() * 2.0;
        assert!(ray_intersects_triangle(&ray, &v1, &v3, &v2));
    }

    #[test]
    fn edge_vertex_directions() {
        let (v1, v2, v3) = unit_triangle();
        // Straight at the first vertex: u = v = 0 sits on the boundary and
        // is accepted by the closed barycentric bounds.
        let ray = Vector3::x_axis() * 2.0;
        assert!(ray_intersects_triangle(&ray, &v1, &v2, &v3));
    }
}
