//! Prism renderer - offline CPU raytracing.
//!
//! A brute-force nearest-hit raytracer: for every pixel, cast one ray from
//! the camera through the precomputed focal-plane point and keep the color
//! of the closest primitive it hits. No lighting, no bounces, no
//! acceleration structure; intersection tests run against every primitive.

mod camera;
mod renderer;
mod sphere;
mod triangle;

pub use camera::{Camera, CameraError, FocalPlane};
pub use renderer::{render, render_pixel, Framebuffer};
pub use sphere::{ray_sphere, SphereHit};
pub use triangle::ray_triangle;

/// Re-export common math types from prism_math
pub use prism_math::{Ray, Vec3};
