//! prism - offline raytracer command line.
//!
//! Loads a scene file and optional JSON render settings, renders one frame,
//! and writes it out as an image.

use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{bail, Context, Result};
use prism_core::{parse_scene, RenderSettings, Scene, SceneBuilder};
use prism_render::{render, Camera};

const USAGE: &str = "usage: prism <scene-file> [settings.json] [-o output.png]";

struct Args {
    scene: PathBuf,
    settings: Option<PathBuf>,
    output: PathBuf,
}

fn parse_args() -> Result<Args> {
    let mut scene = None;
    let mut settings = None;
    let mut output = PathBuf::from("render.png");

    let mut args = std::env::args().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "-o" | "--output" => {
                output = PathBuf::from(args.next().context("missing value after -o")?);
            }
            "-h" | "--help" => {
                println!("{USAGE}");
                std::process::exit(0);
            }
            _ if scene.is_none() => scene = Some(PathBuf::from(arg)),
            _ if settings.is_none() => settings = Some(PathBuf::from(arg)),
            _ => bail!("unexpected argument '{arg}'\n{USAGE}"),
        }
    }

    Ok(Args {
        scene: scene.context(USAGE)?,
        settings,
        output,
    })
}

/// Load the scene file and fold in the spheres from the settings.
///
/// A missing or malformed scene file is not fatal: it is logged and the
/// render proceeds against an empty scene. An invalid sphere is skipped
/// the same way.
fn build_scene(path: &Path, settings: &RenderSettings) -> Scene {
    let name = path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("unnamed");

    let mut builder = SceneBuilder::new(name);
    match std::fs::read_to_string(path) {
        Ok(content) => {
            if let Err(e) = parse_scene(&content, &mut builder) {
                log::error!(
                    "failed to parse scene '{}': {e}; rendering an empty scene",
                    path.display()
                );
                builder = SceneBuilder::new(name);
            }
        }
        Err(e) => {
            log::error!(
                "failed to read scene '{}': {e}; rendering an empty scene",
                path.display()
            );
        }
    }

    for sphere in &settings.spheres {
        if let Err(e) = builder.push_sphere(*sphere) {
            log::warn!("skipping sphere from settings: {e}");
        }
    }

    builder.finish()
}

fn main() -> Result<()> {
    env_logger::init();

    let args = parse_args()?;
    let settings = match &args.settings {
        Some(path) => RenderSettings::from_path(path)
            .with_context(|| format!("loading settings from {}", path.display()))?,
        None => RenderSettings::default(),
    };

    let start = Instant::now();
    let scene = build_scene(&args.scene, &settings);
    log::info!(
        "scene ready in {:?}: {} triangles, {} spheres",
        start.elapsed(),
        scene.triangle_count(),
        scene.spheres.len()
    );

    let camera = Camera::new(
        settings.camera.position,
        settings.camera.focal_length,
        settings.camera.look_at,
    );
    let plane = camera
        .focal_plane(settings.width, settings.height)
        .context("invalid camera configuration")?;

    let start = Instant::now();
    let image = render(&scene, &camera, &plane, settings.background);
    log::info!(
        "rendered {}x{} in {:?}",
        image.width,
        image.height,
        start.elapsed()
    );

    let buffer = image::RgbImage::from_raw(image.width, image.height, image.to_rgb_bytes())
        .context("framebuffer does not match output dimensions")?;
    buffer
        .save(&args.output)
        .with_context(|| format!("saving {}", args.output.display()))?;
    log::info!("saved {}", args.output.display());

    Ok(())
}
