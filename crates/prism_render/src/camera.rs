//! Camera rig and focal-plane generation.

use prism_math::Vec3;
use thiserror::Error;

/// Fixed height of the virtual film in world units. Film width follows
/// from the output aspect ratio.
const FILM_HEIGHT: f32 = 2.0;

/// Tolerance below which a basis vector counts as degenerate.
const BASIS_EPSILON: f32 = 1e-6;

/// Errors from camera configuration.
#[derive(Error, Debug, PartialEq)]
pub enum CameraError {
    #[error("camera look-at target coincides with its position")]
    DegenerateLookAt,

    #[error("camera focal length must be positive, got {0}")]
    NonPositiveFocalLength(f32),
}

/// A pinhole camera: position, look-at target, and the distance from the
/// position to the focal plane along the forward axis. The focal length
/// must be positive; `focal_plane` rejects anything else.
///
/// The world-up hint (0, 1, 0) is implicit; it only seeds the orthonormal
/// basis derivation.
#[derive(Debug, Clone, Copy)]
pub struct Camera {
    pub position: Vec3,
    pub focal_length: f32,
    pub look_at: Vec3,
}

impl Camera {
    /// Create a new camera.
    pub fn new(position: Vec3, focal_length: f32, look_at: Vec3) -> Self {
        Self {
            position,
            focal_length,
            look_at,
        }
    }

    /// Derive the orthonormal (forward, right, up) basis.
    ///
    /// `up` is recomputed from forward and right rather than taken from
    /// the world-up hint, which guarantees orthogonality. Fails when the
    /// look-at target coincides with the position.
    fn basis(&self) -> Result<(Vec3, Vec3, Vec3), CameraError> {
        let forward = self.look_at - self.position;
        if forward.length() < BASIS_EPSILON {
            return Err(CameraError::DegenerateLookAt);
        }
        let forward = forward.normalize();

        let world_up = Vec3::Y;
        let right = world_up.cross(forward);
        let right = if right.length() < BASIS_EPSILON {
            // Looking straight up or down: world up is useless as a hint,
            // so fall back to a fixed perpendicular axis
            if forward.x.abs() < BASIS_EPSILON {
                Vec3::X
            } else {
                Vec3::Z
            }
        } else {
            right.normalize()
        };

        let up = forward.cross(right).normalize();
        Ok((forward, right, up))
    }

    /// Project the image plane into world space: one point per pixel
    /// center, one focal length in front of the camera.
    ///
    /// Row 0 is the top of the image. Pure function of camera and
    /// resolution; build it once and reuse it across render calls.
    pub fn focal_plane(&self, width: u32, height: u32) -> Result<FocalPlane, CameraError> {
        if self.focal_length <= 0.0 {
            return Err(CameraError::NonPositiveFocalLength(self.focal_length));
        }
        let (forward, right, up) = self.basis()?;

        let aspect = width as f32 / height as f32;
        let film_width = aspect * FILM_HEIGHT;

        let mut points = Vec::with_capacity((width * height) as usize);
        for i in 0..height {
            // Vertical flip: row 0 maps to the top of the film
            let y = FILM_HEIGHT / 2.0 - (i as f32 + 0.5) * FILM_HEIGHT / height as f32;
            for j in 0..width {
                let x = (j as f32 + 0.5) * film_width / width as f32 - film_width / 2.0;
                let world_point =
                    self.position + x * right + y * up + self.focal_length * forward;
                points.push(world_point);
            }
        }

        Ok(FocalPlane {
            width,
            height,
            points,
        })
    }
}

/// A height x width grid of world-space pixel centers, row-major with the
/// top row first. Immutable once built; rays target these points.
#[derive(Debug, Clone)]
pub struct FocalPlane {
    width: u32,
    height: u32,
    points: Vec<Vec3>,
}

impl FocalPlane {
    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// World-space center of the pixel at (row, col).
    pub fn point(&self, row: u32, col: u32) -> Vec3 {
        self.points[(row * self.width + col) as usize]
    }
}
