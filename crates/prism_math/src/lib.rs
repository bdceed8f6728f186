// Re-export glam for convenience
pub use glam::*;

// Prism math types
mod ray;
pub use ray::Ray;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reexported_vec_ops_compose_with_ray() {
        // The intersection code leans on the glam re-export for cross,
        // dot, and normalize; make sure they flow into Ray unchanged
        let forward = Vec3::new(0.0, 0.0, -5.0).normalize();
        let right = Vec3::Y.cross(forward);
        assert!((right.length() - 1.0).abs() < 1e-6);
        assert_eq!(forward.dot(right), 0.0);

        let ray = Ray::new(Vec3::ONE, forward);
        assert_eq!(ray.at(2.0), Vec3::new(1.0, 1.0, -1.0));
    }
}
