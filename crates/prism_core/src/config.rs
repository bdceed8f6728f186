//! Render settings.
//!
//! Resolution, background color, camera, and sphere primitives live in a
//! JSON settings file rather than in code. Every field has a default, so a
//! settings file only needs the values it wants to override.

use std::path::Path;

use prism_math::Vec3;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::scene::{Rgb, Sphere};

/// Errors that can occur while loading render settings.
#[derive(Error, Debug)]
pub enum SettingsError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid settings: {0}")]
    Json(#[from] serde_json::Error),
}

/// Camera placement and focal length.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraSettings {
    /// Camera position in world space
    pub position: Vec3,
    /// Distance from the camera to the focal plane along the forward
    /// axis. Must be positive; the renderer rejects anything else when
    /// the focal plane is built.
    pub focal_length: f32,
    /// Point the camera looks at
    pub look_at: Vec3,
}

impl Default for CameraSettings {
    fn default() -> Self {
        Self {
            position: Vec3::new(-4.0, 0.3, -0.6),
            focal_length: 0.7,
            look_at: Vec3::new(-20.0, 0.3, -0.6),
        }
    }
}

/// Full render configuration: output resolution, background color,
/// camera, and any sphere primitives to add alongside the scene file.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderSettings {
    pub width: u32,
    pub height: u32,
    /// Color of pixels whose ray hits nothing
    pub background: Rgb,
    pub camera: CameraSettings,
    /// Spheres are not part of the scene file format, so they are
    /// configured here
    pub spheres: Vec<Sphere>,
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self {
            width: 800,
            height: 800,
            background: Rgb::new(135, 206, 235),
            camera: CameraSettings::default(),
            spheres: Vec::new(),
        }
    }
}

impl RenderSettings {
    /// Parse settings from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load settings from a JSON file.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, SettingsError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content)
    }
}
