use crate::Vec3;

/// A ray in 3D space with an origin and a unit direction.
///
/// Rays always carry a normalized direction, so the `t` parameter returned
/// by intersection tests is the true geometric distance from the origin.
/// `origin` is a position; `direction` is a displacement.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Ray {
    pub origin: Vec3,
    pub direction: Vec3,
}

impl Ray {
    /// Create a ray from an origin and a direction.
    ///
    /// The direction is normalized here. A zero-length direction stays
    /// zero; intersection tests reject such rays rather than panic.
    pub fn new(origin: Vec3, direction: Vec3) -> Self {
        Self {
            origin,
            direction: direction.normalize_or_zero(),
        }
    }

    /// Create a ray from an origin through a target point.
    pub fn from_to(origin: Vec3, target: Vec3) -> Self {
        Self::new(origin, target - origin)
    }

    /// Get the point along the ray at distance t.
    ///
    /// Returns: origin + t * direction
    pub fn at(&self, t: f32) -> Vec3 {
        self.origin + self.direction * t
    }
}
