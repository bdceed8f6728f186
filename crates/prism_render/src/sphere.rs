//! Ray-sphere intersection.

use prism_math::{Ray, Vec3};

use crate::triangle::EPSILON;

/// Rays shorter than this are degenerate and never hit anything.
const MIN_DIRECTION: f32 = 1e-12;

/// Record of a ray-sphere intersection.
///
/// The render loop only consumes `t`; the hit point, normal, and face flag
/// are carried for forward compatibility with shading.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SphereHit {
    /// Distance along the ray
    pub t: f32,
    /// World-space point of intersection
    pub point: Vec3,
    /// Unit surface normal, always opposing the incoming ray direction
    pub normal: Vec3,
    /// Whether the ray hit the sphere from outside
    pub front_face: bool,
}

/// Intersect a ray with a sphere by solving the quadratic
/// `(d.d) t^2 + 2 d.(o-c) t + (o-c).(o-c) - r^2 = 0`.
///
/// Takes the smallest root in front of the ray origin; when both roots lie
/// behind it (sphere entirely behind the ray) there is no hit. A
/// zero-length direction is rejected up front rather than producing NaNs.
pub fn ray_sphere(ray: &Ray, center: Vec3, radius: f32) -> Option<SphereHit> {
    let d = ray.direction;
    if d.length() < MIN_DIRECTION {
        return None;
    }

    let oc = ray.origin - center;
    let a = d.dot(d);
    let b = 2.0 * oc.dot(d);
    let c = oc.dot(oc) - radius * radius;

    let discriminant = b * b - 4.0 * a * c;
    if discriminant < 0.0 {
        return None;
    }

    let sqrt_disc = discriminant.sqrt();
    let t1 = (-b - sqrt_disc) / (2.0 * a);
    let t2 = (-b + sqrt_disc) / (2.0 * a);

    // Smallest root strictly in front of the origin; t1 <= t2 always
    let t = if t1 > EPSILON {
        t1
    } else if t2 > EPSILON {
        t2
    } else {
        return None;
    };

    let point = ray.at(t);
    let outward = (point - center) / radius;
    let front_face = d.dot(outward) < 0.0;
    // The stored normal always opposes the incoming ray, so a hit from
    // inside flips it
    let normal = if front_face { outward } else { -outward };

    Some(SphereHit {
        t,
        point,
        normal,
        front_face,
    })
}
