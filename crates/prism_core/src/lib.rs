//! Scene data model and loading for prism.
//!
//! This crate owns everything a render call consumes as read-only input:
//! the immutable [`Scene`] value (vertex arena, indexed triangles, spheres),
//! the [`SceneBuilder`] that accumulates one, the line-oriented scene-file
//! parser, and the JSON render settings.

pub mod config;
pub mod parser;
pub mod scene;

pub use config::{CameraSettings, RenderSettings, SettingsError};
pub use parser::{load_scene, parse_scene, LoadError, ParseError};
pub use scene::{Object, Rgb, Scene, SceneBuilder, SceneError, Sphere, Triangle, Vertex};
