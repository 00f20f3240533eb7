//! Simple path tracer example.
//!
//! Builds a small sphere scene by hand and saves it to PPM format.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::sync::Arc;

use orb_renderer::{
    render, Camera, Color, Dielectric, FuzzyMetal, Framebuffer, Lambertian, Material, Metal,
    RenderConfig, Scene, Sphere, Vec3,
};

fn main() {
    env_logger::init();

    println!("Orb Path Tracer - Simple Example");
    println!("================================");

    let config = RenderConfig::default()
        .with_resolution(800, 450)
        .with_quality(50, 10)
        .with_workers(8)
        .with_seed(2024);

    let scene = build_scene(config.aspect_ratio());
    println!("Created {} spheres", scene.len());

    println!(
        "Rendering {}x{} @ {} spp...",
        config.width, config.height, config.samples_per_pixel
    );

    let start = std::time::Instant::now();
    let image = render(&scene, &config).expect("Failed to render");
    println!("Rendered in {:?}", start.elapsed());

    let filename = "output.ppm";
    save_ppm(&image, filename).expect("Failed to save image");
    println!("Saved to {}", filename);
}

fn build_scene(aspect_ratio: f32) -> Scene {
    let mut camera = Camera::new()
        .with_position(Vec3::new(0.0, 0.5, 1.5), Vec3::new(0.0, 0.0, -1.0), Vec3::Y)
        .with_lens(50.0, 1.0)
        .with_aspect_ratio(aspect_ratio);
    camera.initialize().expect("Invalid camera");

    let ground: Arc<Material> = Arc::new(Lambertian::new(Color::new(0.5, 0.6, 0.2)).into());
    let glass: Arc<Material> = Arc::new(Dielectric::new(1.5).into());
    let mirror: Arc<Material> = Arc::new(Metal::new(Color::new(0.8, 0.8, 0.8)).into());
    let brushed: Arc<Material> =
        Arc::new(FuzzyMetal::new(Color::new(0.8, 0.6, 0.2), 0.3).into());

    let mut scene = Scene::new(camera);
    scene.add(Sphere::new(Vec3::new(0.0, -100.5, -1.0), 100.0, ground));
    scene.add(Sphere::new(Vec3::new(0.0, 0.0, -1.0), 0.5, glass));
    scene.add(Sphere::new(Vec3::new(-1.0, 0.0, -1.0), 0.5, mirror));
    scene.add(Sphere::new(Vec3::new(1.0, 0.0, -1.0), 0.5, brushed));
    scene
}

fn save_ppm(image: &Framebuffer, filename: &str) -> std::io::Result<()> {
    let file = File::create(filename)?;
    let mut writer = BufWriter::new(file);

    writeln!(writer, "P3")?;
    writeln!(writer, "{} {}", image.width, image.height)?;
    writeln!(writer, "255")?;

    for row in image.rows() {
        for rgba in row {
            writeln!(writer, "{} {} {}", rgba[0], rgba[1], rgba[2])?;
        }
    }

    writer.flush()
}
