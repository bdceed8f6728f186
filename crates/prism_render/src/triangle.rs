//! Ray-triangle intersection.
//!
//! Uses the Möller-Trumbore algorithm: the hit point is solved in the
//! triangle's barycentric coordinates, so the inside test and the distance
//! come out of one closed-form solve.

use prism_math::{Ray, Vec3};

/// Determinant threshold for parallel rays and minimum accepted hit
/// distance.
pub(crate) const EPSILON: f32 = 1e-8;

/// Intersect a ray with the triangle (v0, v1, v2).
///
/// Returns the distance to the hit point along the ray, or `None` if the
/// ray misses, runs parallel to the triangle's plane, or would hit behind
/// its origin. Flat shading needs no normal or barycentrics, so only the
/// distance is returned.
pub fn ray_triangle(ray: &Ray, v0: Vec3, v1: Vec3, v2: Vec3) -> Option<f32> {
    let edge1 = v1 - v0;
    let edge2 = v2 - v0;

    let h = ray.direction.cross(edge2);
    let det = edge1.dot(h);

    // Ray is parallel to the triangle plane; never divide by a tiny det
    if det.abs() < EPSILON {
        return None;
    }

    let inv_det = 1.0 / det;
    let s = ray.origin - v0;
    let u = s.dot(h) * inv_det;
    if !(0.0..=1.0).contains(&u) {
        return None;
    }

    let q = s.cross(edge1);
    let v = ray.direction.dot(q) * inv_det;
    if v < 0.0 || u + v > 1.0 {
        return None;
    }

    let t = edge2.dot(q) * inv_det;

    // Hit must be strictly in front of the ray origin
    if t > EPSILON {
        Some(t)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Triangle in the z = -1 plane, straddling the origin's line of sight
    fn v0() -> Vec3 {
        Vec3::new(-1.0, -1.0, -1.0)
    }
    fn v1() -> Vec3 {
        Vec3::new(1.0, -1.0, -1.0)
    }
    fn v2() -> Vec3 {
        Vec3::new(0.0, 1.0, -1.0)
    }

    #[test]
    fn test_hit_at_analytic_distance() {
        let ray = Ray::new(Vec3::ZERO, Vec3::new(0.0, 0.0, -1.0));
        let t = ray_triangle(&ray, v0(), v1(), v2()).unwrap();
        assert!((t - 1.0).abs() < 1e-5);
    }

    #[test]
    fn test_hit_distance_is_geometric_with_unit_direction() {
        // Same triangle, camera pulled back to z = 3: hit at t = 4
        let ray = Ray::from_to(Vec3::new(0.0, 0.0, 3.0), Vec3::new(0.0, 0.0, -1.0));
        let t = ray_triangle(&ray, v0(), v1(), v2()).unwrap();
        assert!((t - 4.0).abs() < 1e-5);
    }

    #[test]
    fn test_miss_outside_barycentric_bounds() {
        // Aims past the top-right of the triangle
        let ray = Ray::new(Vec3::new(0.9, 0.9, 0.0), Vec3::new(0.0, 0.0, -1.0));
        assert_eq!(ray_triangle(&ray, v0(), v1(), v2()), None);
    }

    #[test]
    fn test_hit_is_winding_independent() {
        let ray = Ray::new(Vec3::ZERO, Vec3::new(0.0, 0.0, -1.0));
        let t_ccw = ray_triangle(&ray, v0(), v1(), v2()).unwrap();
        let t_cw = ray_triangle(&ray, v0(), v2(), v1()).unwrap();
        assert!((t_ccw - t_cw).abs() < 1e-6);
    }

    #[test]
    fn test_parallel_ray_misses() {
        // Direction lies in the triangle's plane (orthogonal to its normal)
        let ray = Ray::new(Vec3::new(-5.0, 0.0, -1.0), Vec3::new(1.0, 0.0, 0.0));
        assert_eq!(ray_triangle(&ray, v0(), v1(), v2()), None);

        // Still a miss from a different origin
        let ray = Ray::new(Vec3::new(0.0, 7.0, -1.0), Vec3::new(1.0, 0.0, 0.0));
        assert_eq!(ray_triangle(&ray, v0(), v1(), v2()), None);
    }

    #[test]
    fn test_triangle_behind_origin_misses() {
        let ray = Ray::new(Vec3::ZERO, Vec3::new(0.0, 0.0, 1.0));
        assert_eq!(ray_triangle(&ray, v0(), v1(), v2()), None);
    }
}
