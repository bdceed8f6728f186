//! Scene graph types for prism.
//!
//! Geometry is stored arena-style: the scene owns a flat vertex list and
//! triangles reference vertices by index, so a mesh shares vertices without
//! any pointer aliasing. Everything here is built once by [`SceneBuilder`]
//! and immutable for the lifetime of a render.

use prism_math::Vec3;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// An 8-bit RGB color. Defaults to black.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const BLACK: Rgb = Rgb::new(0, 0, 0);

    /// Create a color from 8-bit channels.
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

/// A vertex in the shared arena: a world-space position plus the color
/// that was active when the vertex was parsed.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Vertex {
    pub position: Vec3,
    pub color: Rgb,
}

impl Vertex {
    pub fn new(position: Vec3, color: Rgb) -> Self {
        Self { position, color }
    }
}

/// A triangle referencing three vertices in the scene's arena by index.
///
/// Indices are 0-based and already validated against the arena; the
/// triangle does not own its vertices.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Triangle {
    pub i0: u32,
    pub i1: u32,
    pub i2: u32,
}

impl Triangle {
    pub fn new(i0: u32, i1: u32, i2: u32) -> Self {
        Self { i0, i1, i2 }
    }
}

/// A named group of triangles, flushed by the parser's `o` directive.
#[derive(Clone, Debug, Default)]
pub struct Object {
    pub name: Option<String>,
    pub triangles: Vec<Triangle>,
}

impl Object {
    pub fn new(name: Option<String>) -> Self {
        Self {
            name,
            triangles: Vec::new(),
        }
    }
}

/// A sphere primitive with a solid color. Self-contained, no shared
/// references.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Sphere {
    /// Center position in world space
    pub center: Vec3,
    /// Radius, validated > 0 when the sphere enters a scene
    pub radius: f32,
    pub color: Rgb,
}

impl Sphere {
    pub fn new(center: Vec3, radius: f32, color: Rgb) -> Self {
        Self {
            center,
            radius,
            color,
        }
    }
}

/// Errors raised while assembling a scene.
#[derive(Error, Debug, PartialEq)]
pub enum SceneError {
    #[error("triangle references vertex {index} but only {count} vertices are defined")]
    VertexIndexOutOfRange { index: usize, count: usize },

    #[error("sphere radius must be positive, got {0}")]
    NonPositiveRadius(f32),
}

/// A complete, immutable scene: the vertex arena, triangle groups, and
/// spheres a render call scans.
#[derive(Clone, Debug, Default)]
pub struct Scene {
    pub vertices: Vec<Vertex>,
    pub objects: Vec<Object>,
    pub spheres: Vec<Sphere>,
    /// Scene name (usually from filename)
    pub name: String,
}

impl Scene {
    /// Resolve a triangle's three vertex positions from the arena.
    pub fn triangle_vertices(&self, tri: &Triangle) -> (Vec3, Vec3, Vec3) {
        (
            self.vertices[tri.i0 as usize].position,
            self.vertices[tri.i1 as usize].position,
            self.vertices[tri.i2 as usize].position,
        )
    }

    /// The flat color of a triangle: the color of its first vertex.
    ///
    /// Per-vertex colors exist in the file format but faces are shaded
    /// flat, so vertex 0 decides.
    pub fn triangle_color(&self, tri: &Triangle) -> Rgb {
        self.vertices[tri.i0 as usize].color
    }

    /// Total triangle count across all object groups.
    pub fn triangle_count(&self) -> usize {
        self.objects.iter().map(|o| o.triangles.len()).sum()
    }

    /// True when the scene holds no renderable primitive.
    pub fn is_empty(&self) -> bool {
        self.triangle_count() == 0 && self.spheres.is_empty()
    }
}

/// Incremental scene assembly.
///
/// The builder is the only mutable stage in a scene's lifecycle: directives
/// append to it, `finish` seals the result. A render can therefore never
/// observe a partially built scene.
#[derive(Debug, Default)]
pub struct SceneBuilder {
    vertices: Vec<Vertex>,
    objects: Vec<Object>,
    spheres: Vec<Sphere>,
    current: Object,
    /// Color applied to subsequently pushed vertices. Defaults to the
    /// placeholder used by scene files without `c` directives.
    current_color: Rgb,
    name: String,
}

impl SceneBuilder {
    /// Placeholder vertex color for scene dialects without `c` directives.
    pub const DEFAULT_COLOR: Rgb = Rgb::new(255, 0, 0);

    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            current_color: Self::DEFAULT_COLOR,
            ..Default::default()
        }
    }

    /// Set the color applied to vertices pushed from now on.
    pub fn set_color(&mut self, color: Rgb) {
        self.current_color = color;
    }

    /// Append a vertex to the arena, tagged with the active color.
    /// Returns its 0-based index.
    pub fn push_vertex(&mut self, position: Vec3) -> u32 {
        self.vertices.push(Vertex::new(position, self.current_color));
        (self.vertices.len() - 1) as u32
    }

    /// Append a triangle over three 0-based arena indices.
    ///
    /// Every index must resolve to an already-pushed vertex; forward
    /// references are a hard error.
    pub fn push_triangle(&mut self, i0: u32, i1: u32, i2: u32) -> Result<(), SceneError> {
        let count = self.vertices.len();
        for index in [i0, i1, i2] {
            if index as usize >= count {
                return Err(SceneError::VertexIndexOutOfRange {
                    index: index as usize,
                    count,
                });
            }
        }
        self.current.triangles.push(Triangle::new(i0, i1, i2));
        Ok(())
    }

    /// Start a new object group, flushing accumulated triangles into the
    /// object list. A flush with no triangles is a no-op, so leading `o`
    /// directives don't create empty groups.
    pub fn begin_object(&mut self, name: Option<&str>) {
        if !self.current.triangles.is_empty() {
            let finished = std::mem::take(&mut self.current);
            self.objects.push(finished);
        }
        self.current.name = name.map(str::to_owned);
    }

    /// Add a sphere primitive. The radius must be positive.
    pub fn push_sphere(&mut self, sphere: Sphere) -> Result<(), SceneError> {
        if sphere.radius <= 0.0 {
            return Err(SceneError::NonPositiveRadius(sphere.radius));
        }
        self.spheres.push(sphere);
        Ok(())
    }

    /// Number of vertices pushed so far. The parser uses this to validate
    /// face indices against the arena.
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Seal the builder into an immutable scene, flushing any open group.
    pub fn finish(mut self) -> Scene {
        self.begin_object(None);
        Scene {
            vertices: self.vertices,
            objects: self.objects,
            spheres: self.spheres,
            name: self.name,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_flushes_on_object_marker() {
        let mut builder = SceneBuilder::new("test");
        builder.push_vertex(Vec3::ZERO);
        builder.push_vertex(Vec3::X);
        builder.push_vertex(Vec3::Y);

        builder.push_triangle(0, 1, 2).unwrap();
        builder.begin_object(Some("second"));
        builder.push_triangle(2, 1, 0).unwrap();

        let scene = builder.finish();
        assert_eq!(scene.objects.len(), 2);
        assert_eq!(scene.objects[0].triangles.len(), 1);
        assert_eq!(scene.objects[1].name.as_deref(), Some("second"));
        assert_eq!(scene.triangle_count(), 2);
    }

    #[test]
    fn test_builder_skips_empty_groups() {
        let mut builder = SceneBuilder::new("test");
        builder.begin_object(Some("empty"));
        builder.begin_object(Some("also_empty"));

        let scene = builder.finish();
        assert!(scene.objects.is_empty());
        assert!(scene.is_empty());
    }

    #[test]
    fn test_triangle_index_validation() {
        let mut builder = SceneBuilder::new("test");
        builder.push_vertex(Vec3::ZERO);
        builder.push_vertex(Vec3::X);

        let err = builder.push_triangle(0, 1, 2).unwrap_err();
        assert_eq!(
            err,
            SceneError::VertexIndexOutOfRange { index: 2, count: 2 }
        );
    }

    #[test]
    fn test_sphere_radius_validation() {
        let mut builder = SceneBuilder::new("test");
        let err = builder
            .push_sphere(Sphere::new(Vec3::ZERO, 0.0, Rgb::BLACK))
            .unwrap_err();
        assert_eq!(err, SceneError::NonPositiveRadius(0.0));

        builder
            .push_sphere(Sphere::new(Vec3::ZERO, 1.0, Rgb::BLACK))
            .unwrap();
        assert_eq!(builder.finish().spheres.len(), 1);
    }

    #[test]
    fn test_triangle_color_is_first_vertex_color() {
        let mut builder = SceneBuilder::new("test");
        builder.set_color(Rgb::new(10, 20, 30));
        builder.push_vertex(Vec3::ZERO);
        builder.set_color(Rgb::new(200, 0, 0));
        builder.push_vertex(Vec3::X);
        builder.push_vertex(Vec3::Y);
        builder.push_triangle(0, 1, 2).unwrap();

        let scene = builder.finish();
        let tri = scene.objects[0].triangles[0];
        assert_eq!(scene.triangle_color(&tri), Rgb::new(10, 20, 30));
    }
}
