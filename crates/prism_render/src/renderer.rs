//! Nearest-hit scene compositor.
//!
//! One ray per pixel, scanned against every triangle and every sphere in
//! the scene; the strictly closest positive hit decides the pixel color.
//! O(pixels x primitives) by design: the scenes this renderer targets are
//! small enough that an acceleration structure would be overhead.

use prism_core::{Rgb, Scene};
use prism_math::{Ray, Vec3};
use rayon::prelude::*;

use crate::camera::{Camera, FocalPlane};
use crate::sphere::ray_sphere;
use crate::triangle::ray_triangle;

/// Render output: a dense height x width grid of RGB pixels, row-major
/// with the top row first.
pub struct Framebuffer {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<Rgb>,
}

impl Framebuffer {
    /// Get the pixel at (row, col).
    pub fn get(&self, row: u32, col: u32) -> Rgb {
        self.pixels[(row * self.width + col) as usize]
    }

    /// Flatten to raw RGB bytes (3 per pixel) for image encoding.
    pub fn to_rgb_bytes(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(self.pixels.len() * 3);
        for pixel in &self.pixels {
            bytes.extend_from_slice(&[pixel.r, pixel.g, pixel.b]);
        }
        bytes
    }
}

/// Compute the color of a single pixel.
///
/// Casts a ray from the camera position through the pixel's focal-plane
/// point and keeps the closest hit: triangles are scanned first, then
/// spheres, with a strict `<` so earlier primitives win exact ties through
/// scan order alone.
pub fn render_pixel(scene: &Scene, origin: Vec3, target: Vec3, background: Rgb) -> Rgb {
    let ray = Ray::from_to(origin, target);

    let mut closest = f32::INFINITY;
    let mut color = background;

    for object in &scene.objects {
        for tri in &object.triangles {
            let (v0, v1, v2) = scene.triangle_vertices(tri);
            if let Some(t) = ray_triangle(&ray, v0, v1, v2) {
                // t > 0 is guaranteed by the intersection test
                if t < closest {
                    closest = t;
                    color = scene.triangle_color(tri);
                }
            }
        }
    }

    for sphere in &scene.spheres {
        if let Some(hit) = ray_sphere(&ray, sphere.center, sphere.radius) {
            if hit.t < closest {
                closest = hit.t;
                color = sphere.color;
            }
        }
    }

    color
}

/// Render the scene through the camera's focal plane.
///
/// Rows only read shared scene data and write disjoint pixels, so they
/// render in parallel with rayon. Output dimensions come from the focal
/// plane itself and therefore always match it.
pub fn render(
    scene: &Scene,
    camera: &Camera,
    plane: &FocalPlane,
    background: Rgb,
) -> Framebuffer {
    let width = plane.width();
    let height = plane.height();
    let origin = camera.position;

    log::debug!(
        "rendering {width}x{height} against {} triangles and {} spheres",
        scene.triangle_count(),
        scene.spheres.len()
    );

    let pixels: Vec<Rgb> = (0..height)
        .into_par_iter()
        .flat_map_iter(|row| {
            (0..width).map(move |col| render_pixel(scene, origin, plane.point(row, col), background))
        })
        .collect();

    Framebuffer {
        width,
        height,
        pixels,
    }
}
