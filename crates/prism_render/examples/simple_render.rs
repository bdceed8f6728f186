//! Simple render example.
//!
//! Builds a small scene in code and saves the frame as PPM.

use prism_core::{Rgb, Scene, SceneBuilder, Sphere};
use prism_render::{render, Camera, Framebuffer, Vec3};
use std::fs::File;
use std::io::{BufWriter, Write};

fn main() {
    println!("prism - simple render example");
    println!("=============================");

    let scene = build_scene();
    let camera = Camera::new(Vec3::new(0.0, 0.5, 3.0), 1.0, Vec3::new(0.0, 0.0, -2.0));
    let plane = camera.focal_plane(800, 450).expect("camera configuration");

    println!("Rendering {}x{}...", plane.width(), plane.height());
    let start = std::time::Instant::now();
    let image = render(&scene, &camera, &plane, Rgb::new(135, 206, 235));
    println!("Rendered in {:?}", start.elapsed());

    save_ppm(&image, "output.ppm").expect("Failed to save image");
    println!("Saved to output.ppm");
}

fn build_scene() -> Scene {
    let mut builder = SceneBuilder::new("example");

    // Floor made of two triangles
    builder.set_color(Rgb::new(90, 90, 90));
    let a = builder.push_vertex(Vec3::new(-10.0, -1.0, 5.0));
    builder.push_vertex(Vec3::new(10.0, -1.0, 5.0));
    builder.push_vertex(Vec3::new(10.0, -1.0, -15.0));
    builder.push_vertex(Vec3::new(-10.0, -1.0, -15.0));
    builder.push_triangle(a, a + 1, a + 2).unwrap();
    builder.push_triangle(a, a + 2, a + 3).unwrap();

    builder
        .push_sphere(Sphere::new(Vec3::new(0.0, 0.0, -2.0), 1.0, Rgb::new(40, 70, 255)))
        .unwrap();
    builder
        .push_sphere(Sphere::new(Vec3::new(-2.2, 0.0, -3.0), 1.0, Rgb::new(40, 220, 90)))
        .unwrap();

    builder.finish()
}

fn save_ppm(image: &Framebuffer, path: &str) -> std::io::Result<()> {
    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);

    writeln!(writer, "P3")?;
    writeln!(writer, "{} {}", image.width, image.height)?;
    writeln!(writer, "255")?;
    for pixel in &image.pixels {
        writeln!(writer, "{} {} {}", pixel.r, pixel.g, pixel.b)?;
    }

    Ok(())
}
