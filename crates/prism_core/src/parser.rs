//! Line-oriented scene file parser.
//!
//! One directive per line:
//!
//! - `v x y z` - vertex, in file order; faces reference vertices 1-based
//! - `f i0 i1 i2` - triangle over three previously declared vertices
//! - `o [name]` - start a new object group, flushing accumulated triangles
//! - `c r g b` - color applied to subsequently parsed vertices (optional;
//!   some scene files omit it and fall back to a placeholder color)
//!
//! Unknown directives and blank lines are skipped. A face index that does
//! not resolve to an already-parsed vertex is a hard error rather than a
//! silent bad read.

use std::path::Path;

use prism_math::Vec3;
use thiserror::Error;

use crate::scene::{Rgb, Scene, SceneBuilder, SceneError};

/// Errors that can occur while parsing a scene file.
#[derive(Error, Debug)]
pub enum ParseError {
    #[error("parse error at line {line}: {message}")]
    Parse { line: usize, message: String },

    #[error("line {line}: face references vertex {index} but only {count} vertices are defined")]
    VertexIndexOutOfRange {
        line: usize,
        index: i64,
        count: usize,
    },
}

/// Errors that can occur while loading a scene from disk.
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("parse error: {0}")]
    Parse(#[from] ParseError),
}

/// Result type for parsing operations.
pub type ParseResult<T> = Result<T, ParseError>;

fn parse_err(line: usize, message: impl Into<String>) -> ParseError {
    ParseError::Parse {
        line,
        message: message.into(),
    }
}

/// Parse scene text into an existing builder.
///
/// Taking the builder as an argument lets callers combine file geometry
/// with primitives from other sources (e.g. spheres from render settings)
/// before sealing the scene.
pub fn parse_scene(content: &str, builder: &mut SceneBuilder) -> ParseResult<()> {
    for (idx, raw) in content.lines().enumerate() {
        let line = idx + 1;
        let mut tokens = raw.split_whitespace();

        match tokens.next() {
            None => continue,
            Some("v") => {
                let [x, y, z] = parse_floats(tokens, line, "v")?;
                builder.push_vertex(Vec3::new(x, y, z));
            }
            Some("f") => {
                let [i0, i1, i2] = parse_indices(tokens, line, builder.vertex_count())?;
                builder
                    .push_triangle(i0, i1, i2)
                    .map_err(|e| scene_err_at(line, e))?;
            }
            Some("o") => builder.begin_object(tokens.next()),
            Some("c") => {
                let [r, g, b] = parse_floats(tokens, line, "c")?;
                builder.set_color(Rgb::new(
                    channel_to_u8(r),
                    channel_to_u8(g),
                    channel_to_u8(b),
                ));
            }
            Some(directive) if directive.starts_with('#') => continue,
            Some(directive) => {
                log::debug!("skipping unknown directive '{directive}' at line {line}");
            }
        }
    }
    Ok(())
}

/// Load a scene file from disk.
///
/// The scene is named after the file stem. Missing files and malformed
/// content both surface as a [`LoadError`]; the caller decides whether
/// that is fatal (the CLI falls back to an empty scene).
pub fn load_scene<P: AsRef<Path>>(path: P) -> Result<Scene, LoadError> {
    let path = path.as_ref();
    let name = path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("unnamed");

    let content = std::fs::read_to_string(path)?;
    let mut builder = SceneBuilder::new(name);
    parse_scene(&content, &mut builder)?;

    let scene = builder.finish();
    log::info!(
        "loaded scene '{}': {} vertices, {} triangles in {} objects",
        scene.name,
        scene.vertices.len(),
        scene.triangle_count(),
        scene.objects.len(),
    );
    Ok(scene)
}

fn parse_floats<'a>(
    mut tokens: impl Iterator<Item = &'a str>,
    line: usize,
    directive: &str,
) -> ParseResult<[f32; 3]> {
    let mut values = [0.0f32; 3];
    for value in &mut values {
        let token = tokens
            .next()
            .ok_or_else(|| parse_err(line, format!("'{directive}' expects three values")))?;
        *value = token
            .parse()
            .map_err(|_| parse_err(line, format!("invalid number '{token}'")))?;
    }
    Ok(values)
}

/// Parse three 1-based face indices and convert them to 0-based arena
/// indices. Zero and negative indices are out of range by definition.
fn parse_indices<'a>(
    mut tokens: impl Iterator<Item = &'a str>,
    line: usize,
    vertex_count: usize,
) -> ParseResult<[u32; 3]> {
    let mut indices = [0u32; 3];
    for index in &mut indices {
        let token = tokens
            .next()
            .ok_or_else(|| parse_err(line, "'f' expects three vertex indices"))?;
        let file_index: i64 = token
            .parse()
            .map_err(|_| parse_err(line, format!("invalid index '{token}'")))?;
        // The arena is indexed by u32; anything outside [1, u32::MAX + 1]
        // can never resolve, and casting it would silently wrap
        if file_index < 1 || file_index - 1 > u32::MAX as i64 {
            return Err(ParseError::VertexIndexOutOfRange {
                line,
                index: file_index,
                count: vertex_count,
            });
        }
        *index = (file_index - 1) as u32;
    }
    Ok(indices)
}

fn scene_err_at(line: usize, err: SceneError) -> ParseError {
    match err {
        SceneError::VertexIndexOutOfRange { index, count } => ParseError::VertexIndexOutOfRange {
            line,
            // Report the 1-based index as written in the file
            index: index as i64 + 1,
            count,
        },
        other => parse_err(line, other.to_string()),
    }
}

fn channel_to_u8(value: f32) -> u8 {
    value.clamp(0.0, 255.0).round() as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(content: &str) -> ParseResult<Scene> {
        let mut builder = SceneBuilder::new("test");
        parse_scene(content, &mut builder)?;
        Ok(builder.finish())
    }

    #[test]
    fn test_parse_colored_dialect() {
        let content = "\
c 0 128 255
v 0.0 0.0 0.0
v 1.0 0.0 0.0
v 0.0 1.0 0.0
f 1 2 3
";
        let scene = parse(content).unwrap();
        assert_eq!(scene.vertices.len(), 3);
        assert_eq!(scene.triangle_count(), 1);

        let tri = scene.objects[0].triangles[0];
        // File indices are 1-based, arena indices 0-based
        assert_eq!((tri.i0, tri.i1, tri.i2), (0, 1, 2));
        assert_eq!(scene.triangle_color(&tri), Rgb::new(0, 128, 255));
    }

    #[test]
    fn test_parse_plain_dialect_uses_placeholder_color() {
        let content = "\
v 0 0 0
v 1 0 0
v 0 1 0
f 1 2 3
";
        let scene = parse(content).unwrap();
        let tri = scene.objects[0].triangles[0];
        assert_eq!(scene.triangle_color(&tri), SceneBuilder::DEFAULT_COLOR);
    }

    #[test]
    fn test_object_markers_split_groups() {
        let content = "\
o first
v 0 0 0
v 1 0 0
v 0 1 0
v 1 1 0
f 1 2 3
o second
f 2 3 4
";
        let scene = parse(content).unwrap();
        assert_eq!(scene.objects.len(), 2);
        assert_eq!(scene.objects[0].name.as_deref(), Some("first"));
        assert_eq!(scene.objects[1].name.as_deref(), Some("second"));
        assert_eq!(scene.triangle_count(), 2);
    }

    #[test]
    fn test_face_index_out_of_range() {
        let content = "\
v 0 0 0
v 1 0 0
f 1 2 3
";
        let err = parse(content).unwrap_err();
        match err {
            ParseError::VertexIndexOutOfRange { line, index, count } => {
                assert_eq!(line, 3);
                assert_eq!(index, 3);
                assert_eq!(count, 2);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_face_index_beyond_u32_is_out_of_range() {
        // 4294967297 = u32::MAX + 2; a plain cast would wrap it to index 0
        // and resolve the wrong vertex instead of failing
        let err = parse("v 0 0 0\nf 1 1 4294967297\n").unwrap_err();
        match err {
            ParseError::VertexIndexOutOfRange { line, index, count } => {
                assert_eq!(line, 2);
                assert_eq!(index, 4_294_967_297);
                assert_eq!(count, 1);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_face_index_zero_is_out_of_range() {
        let err = parse("v 0 0 0\nf 0 1 1\n").unwrap_err();
        assert!(matches!(
            err,
            ParseError::VertexIndexOutOfRange { index: 0, .. }
        ));
    }

    #[test]
    fn test_invalid_number_reports_line() {
        let err = parse("v 0 0 zero\n").unwrap_err();
        match err {
            ParseError::Parse { line, .. } => assert_eq!(line, 1),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_unknown_directives_and_blanks_skipped() {
        let content = "\n# comment\nvn 0 1 0\ns off\nv 0 0 0\n";
        let scene = parse(content).unwrap();
        assert_eq!(scene.vertices.len(), 1);
    }

    #[test]
    fn test_load_scene_missing_file() {
        let err = load_scene("definitely/not/a/real/scene.obj").unwrap_err();
        assert!(matches!(err, LoadError::Io(_)));
    }
}
