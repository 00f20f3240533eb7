//! Core path tracing renderer.
//!
//! Implements Monte Carlo path tracing with:
//! - Iterative ray bouncing with configurable depth
//! - Sky gradient as the only light source
//! - Anti-aliasing via jittered multi-sampling
//! - Gamma correction
//! - Parallel band rendering with one random stream per band

use std::sync::mpsc;
use std::time::Instant;

use orb_math::{gen_f32, Interval, Ray};
use rand::rngs::StdRng;
use rand::{Rng, RngCore, SeedableRng};
use thiserror::Error;

use crate::band::{band_seed, partition_rows, render_band, BandImage};
use crate::{Camera, Color, Hittable, Scene};

/// Smallest accepted hit distance, avoids self-intersection at the origin.
pub const T_MIN: f32 = 0.001;

/// Errors raised while validating a render request.
#[derive(Error, Debug)]
pub enum RenderError {
    #[error("Image dimensions must be non-zero, got {width}x{height}")]
    InvalidDimensions { width: u32, height: u32 },

    #[error("Samples per pixel must be at least 1")]
    ZeroSamples,

    #[error("Max depth must be at least 1")]
    ZeroDepth,

    #[error("Worker count must be at least 1")]
    ZeroWorkers,

    #[error("Scene has no primitives")]
    EmptyScene,

    #[error("Degenerate camera: {0}")]
    DegenerateCamera(String),

    #[error("Unknown material: {0}")]
    UnknownMaterial(String),

    #[error("Failed to build worker pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
}

/// Render configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderConfig {
    /// Output width in pixels
    pub width: u32,
    /// Output height in pixels
    pub height: u32,
    /// Samples per pixel for anti-aliasing
    pub samples_per_pixel: u32,
    /// Maximum ray bounce depth
    pub max_depth: u32,
    /// Number of horizontal bands, one worker each
    pub workers: usize,
    /// Base seed for the per-band generators; `None` draws one from entropy
    pub seed: Option<u64>,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            width: 1280,
            height: 720,
            samples_per_pixel: 50,
            max_depth: 10,
            workers: 8,
            seed: None,
        }
    }
}

impl RenderConfig {
    /// Set image resolution.
    pub fn with_resolution(mut self, width: u32, height: u32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    /// Set quality settings.
    pub fn with_quality(mut self, samples: u32, max_depth: u32) -> Self {
        self.samples_per_pixel = samples;
        self.max_depth = max_depth;
        self
    }

    /// Set the number of bands rendered in parallel.
    pub fn with_workers(mut self, workers: usize) -> Self {
        self.workers = workers;
        self
    }

    /// Fix the base seed so renders are reproducible.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Width over height.
    pub fn aspect_ratio(&self) -> f32 {
        self.width as f32 / self.height as f32
    }

    /// Check every setting is usable before any worker starts.
    pub fn validate(&self) -> Result<(), RenderError> {
        if self.width == 0 || self.height == 0 {
            return Err(RenderError::InvalidDimensions {
                width: self.width,
                height: self.height,
            });
        }
        if self.samples_per_pixel == 0 {
            return Err(RenderError::ZeroSamples);
        }
        if self.max_depth == 0 {
            return Err(RenderError::ZeroDepth);
        }
        if self.workers == 0 {
            return Err(RenderError::ZeroWorkers);
        }
        Ok(())
    }
}

/// Compute the color seen by a ray.
///
/// Follows the ray through at most `depth` bounces, multiplying in each
/// material's attenuation. A miss picks up the sky; absorption or running
/// out of bounces yields black.
pub fn ray_color(ray: &Ray, world: &dyn Hittable, depth: u32, rng: &mut dyn RngCore) -> Color {
    let mut attenuation = Color::ONE;
    let mut ray = *ray;

    for _ in 0..depth {
        let Some(rec) = world.hit(&ray, Interval::new(T_MIN, f32::INFINITY)) else {
            return attenuation * sky_color(&ray);
        };

        match rec.material.scatter(&ray, &rec, rng) {
            Some(result) => {
                attenuation *= result.attenuation;
                ray = result.scattered;
            }
            None => return Color::ZERO,
        }
    }

    // Out of bounces
    Color::ZERO
}

/// Vertical white-to-blue sky gradient.
pub fn sky_color(ray: &Ray) -> Color {
    let unit_direction = ray.direction().normalize();
    let a = 0.5 * (unit_direction.y + 1.0);
    let white = Color::new(1.0, 1.0, 1.0);
    let blue = Color::new(0.5, 0.7, 1.0);
    white * (1.0 - a) + blue * a
}

/// Apply gamma correction (gamma = 2.0).
#[inline]
pub fn linear_to_gamma(linear: f32) -> f32 {
    if linear > 0.0 {
        linear.sqrt()
    } else {
        0.0
    }
}

/// Convert a linear color to 8-bit RGBA.
pub fn color_to_rgba(color: Color) -> [u8; 4] {
    // Apply gamma correction and convert to 0-255
    let r = (255.0 * Interval::UNIT.clamp(linear_to_gamma(color.x))) as u8;
    let g = (255.0 * Interval::UNIT.clamp(linear_to_gamma(color.y))) as u8;
    let b = (255.0 * Interval::UNIT.clamp(linear_to_gamma(color.z))) as u8;
    [r, g, b, 255]
}

/// Render a single pixel with multi-sampling.
///
/// `row` counts from the top of the image; the viewport's `v` axis counts
/// from the bottom.
pub fn render_pixel(
    camera: &Camera,
    world: &dyn Hittable,
    x: u32,
    row: u32,
    config: &RenderConfig,
    rng: &mut dyn RngCore,
) -> Color {
    let width = config.width as f32;
    let height = config.height as f32;
    let flipped = (config.height - 1 - row) as f32;
    let mut pixel_color = Color::ZERO;

    for _ in 0..config.samples_per_pixel {
        let u = (x as f32 + gen_f32(rng)) / width;
        let v = (flipped + gen_f32(rng)) / height;
        let ray = camera.get_ray(u, v);
        pixel_color += ray_color(&ray, world, config.max_depth, rng);
    }

    // Average the samples
    pixel_color / config.samples_per_pixel as f32
}

/// Final 8-bit RGBA image, rows top to bottom.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Framebuffer {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<[u8; 4]>,
}

impl Framebuffer {
    /// Create a new framebuffer filled with transparent black.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![[0; 4]; width as usize * height as usize],
        }
    }

    /// Get the pixel at (x, y).
    pub fn get(&self, x: u32, y: u32) -> [u8; 4] {
        self.pixels[y as usize * self.width as usize + x as usize]
    }

    /// Pixels of one row.
    pub fn row(&self, y: u32) -> &[[u8; 4]] {
        let start = y as usize * self.width as usize;
        &self.pixels[start..start + self.width as usize]
    }

    /// Iterate rows from top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &[[u8; 4]]> {
        self.pixels.chunks_exact(self.width.max(1) as usize)
    }

    /// Copy a rendered band into place by its starting row.
    pub fn blit_band(&mut self, image: &BandImage) {
        let start = image.band.start_row as usize * self.width as usize;
        let end = start + image.pixels.len();
        debug_assert_eq!(
            image.pixels.len(),
            image.band.pixel_count(self.width),
            "band {} has the wrong pixel count",
            image.band.index
        );
        self.pixels[start..end].copy_from_slice(&image.pixels);
    }

    /// Packed RGBA bytes (for saving).
    pub fn as_bytes(&self) -> &[u8] {
        self.pixels.as_flattened()
    }
}

/// Render the whole image in parallel.
///
/// Validates the request, splits the rows into `config.workers` bands, runs
/// one worker per band on a dedicated pool, waits for all of them, then
/// stitches the bands into the framebuffer by row offset.
pub fn render(scene: &Scene, config: &RenderConfig) -> Result<Framebuffer, RenderError> {
    config.validate()?;
    scene.validate()?;

    if config.workers > config.height as usize {
        log::warn!(
            "{} workers for {} rows: leading bands will be empty",
            config.workers,
            config.height
        );
    }

    let bands = partition_rows(config.height, config.workers);
    let base_seed = config.seed.unwrap_or_else(|| rand::thread_rng().gen());

    log::info!(
        "Rendering {}x{} @ {} spp, depth {}, {} bands, seed {}",
        config.width,
        config.height,
        config.samples_per_pixel,
        config.max_depth,
        bands.len(),
        base_seed
    );
    let start = Instant::now();

    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(bands.len())
        .thread_name(|i| format!("orb-band-{i}"))
        .build()?;

    let (sender, receiver) = mpsc::channel::<BandImage>();
    pool.scope(|s| {
        for band in &bands {
            let sender = sender.clone();
            s.spawn(move |_| {
                let mut rng = StdRng::seed_from_u64(band_seed(base_seed, band.index));
                let image = render_band(band, scene, config, &mut rng);
                // The receiver outlives the scope
                let _ = sender.send(image);
            });
        }
    });
    drop(sender);

    // Bands arrive in completion order; each carries its own row offset
    let mut framebuffer = Framebuffer::new(config.width, config.height);
    let mut collected = 0;
    for image in receiver {
        framebuffer.blit_band(&image);
        collected += 1;
    }
    debug_assert_eq!(collected, bands.len());

    log::info!("Rendered {} bands in {:?}", collected, start.elapsed());
    Ok(framebuffer)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Dielectric, Lambertian, Material, Metal, Sphere, Vec3};
    use std::sync::Arc;

    fn rng() -> StdRng {
        StdRng::seed_from_u64(42)
    }

    fn single_sphere(center: Vec3, radius: f32, material: Material) -> Scene {
        let mut scene = Scene::new(Camera::new());
        scene.add(Sphere::new(center, radius, Arc::new(material)));
        scene
    }

    fn demo_scene(aspect_ratio: f32) -> Scene {
        Scene::from_description(&orb_core::presets::three_balls(), aspect_ratio).unwrap()
    }

    #[test]
    fn test_sky_gradient() {
        let up = sky_color(&Ray::new(Vec3::ZERO, Vec3::new(0.0, 3.0, 0.0)));
        let down = sky_color(&Ray::new(Vec3::ZERO, Vec3::new(0.0, -1.0, 0.0)));
        let horizon = sky_color(&Ray::new(Vec3::ZERO, Vec3::X));

        assert_eq!(up, Color::new(0.5, 0.7, 1.0));
        assert_eq!(down, Color::ONE);
        assert!((horizon - Color::new(0.75, 0.85, 1.0)).length() < 1e-6);
    }

    #[test]
    fn test_miss_returns_exact_sky() {
        let scene = single_sphere(Vec3::new(0.0, 0.0, -1.0), 0.5, Lambertian::new(Vec3::ONE).into());
        let mut rng = rng();

        for direction in [Vec3::Y, Vec3::new(1.0, 0.3, 2.0), Vec3::new(-4.0, -0.2, 0.5)] {
            let ray = Ray::new(Vec3::ZERO, direction);
            assert_eq!(ray_color(&ray, &scene, 10, &mut rng), sky_color(&ray));
        }

        let empty = Scene::new(Camera::new());
        let ray = Ray::new(Vec3::ZERO, Vec3::NEG_Z);
        assert_eq!(ray_color(&ray, &empty, 1, &mut rng), sky_color(&ray));
    }

    #[test]
    fn test_zero_depth_is_black() {
        let scene = demo_scene(16.0 / 9.0);
        let mut rng = rng();

        for direction in [Vec3::NEG_Z, Vec3::Y, Vec3::NEG_Y] {
            let ray = Ray::new(Vec3::ZERO, direction);
            assert_eq!(ray_color(&ray, &scene, 0, &mut rng), Color::ZERO);
        }
    }

    #[test]
    fn test_mirror_bounce_attenuates_sky() {
        let scene = single_sphere(Vec3::ZERO, 1.0, Metal::new(Color::splat(0.8)).into());
        let ray = Ray::new(Vec3::new(0.0, 5.0, 0.0), Vec3::NEG_Y);
        let mut rng = rng();

        // Straight down onto the top, straight back up into the zenith
        let color = ray_color(&ray, &scene, 10, &mut rng);
        assert!((color - 0.8 * Color::new(0.5, 0.7, 1.0)).length() < 1e-5);

        // A single bounce is not enough to reach the sky
        assert_eq!(ray_color(&ray, &scene, 1, &mut rng), Color::ZERO);
    }

    #[test]
    fn test_black_body_absorbs() {
        let scene = single_sphere(Vec3::new(0.0, 0.0, -2.0), 1.0, Lambertian::new(Color::ZERO).into());
        let ray = Ray::new(Vec3::ZERO, Vec3::NEG_Z);
        let mut rng = rng();

        assert_eq!(ray_color(&ray, &scene, 10, &mut rng), Color::ZERO);
    }

    #[test]
    fn test_unit_index_glass_is_invisible() {
        let scene = single_sphere(Vec3::new(0.0, 0.0, -2.0), 0.5, Dielectric::new(1.0).into());
        let ray = Ray::new(Vec3::ZERO, Vec3::NEG_Z);
        let mut rng = rng();

        let color = ray_color(&ray, &scene, 10, &mut rng);
        assert!((color - sky_color(&ray)).length() < 1e-6);
    }

    #[test]
    fn test_diffuse_never_brighter_than_sky() {
        let scene = single_sphere(Vec3::new(0.0, -100.5, -1.0), 100.0, Lambertian::new(Color::splat(0.5)).into());
        let ray = Ray::new(Vec3::ZERO, Vec3::new(0.0, -1.0, -1.0));
        let mut rng = rng();

        for _ in 0..100 {
            let color = ray_color(&ray, &scene, 10, &mut rng);
            assert!(color.max_element() <= 0.5 + 1e-6);
            assert!(color.min_element() >= 0.0);
        }
    }

    #[test]
    fn test_linear_to_gamma() {
        assert_eq!(linear_to_gamma(0.0), 0.0);
        assert_eq!(linear_to_gamma(-1.0), 0.0);
        assert!((linear_to_gamma(1.0) - 1.0).abs() < 0.0001);
        assert!((linear_to_gamma(0.25) - 0.5).abs() < 0.0001);
    }

    #[test]
    fn test_color_to_rgba_clamps() {
        assert_eq!(color_to_rgba(Color::new(0.25, 1.0, 4.0)), [127, 255, 255, 255]);
        assert_eq!(color_to_rgba(Color::new(-1.0, 0.0, f32::NAN)), [0, 0, 0, 255]);
    }

    #[test]
    fn test_render_pixel_hits_sphere() {
        let scene = single_sphere(Vec3::new(0.0, 0.0, -1.0), 0.5, Lambertian::new(Color::splat(0.5)).into());
        let config = RenderConfig::default()
            .with_resolution(16, 9)
            .with_quality(4, 5);
        let mut rng = rng();

        // Center pixel sees the sphere, not the bright sky
        let center = render_pixel(scene.camera(), &scene, 8, 4, &config, &mut rng);
        let corner = render_pixel(scene.camera(), &scene, 0, 0, &config, &mut rng);
        assert!(center.length() > 0.0);
        assert!(center.x < corner.x);
    }

    #[test]
    fn test_config_validation() {
        assert!(RenderConfig::default().validate().is_ok());
        assert!(matches!(
            RenderConfig::default().with_resolution(0, 10).validate(),
            Err(RenderError::InvalidDimensions { width: 0, height: 10 })
        ));
        assert!(matches!(
            RenderConfig::default().with_quality(0, 10).validate(),
            Err(RenderError::ZeroSamples)
        ));
        assert!(matches!(
            RenderConfig::default().with_quality(10, 0).validate(),
            Err(RenderError::ZeroDepth)
        ));
        assert!(matches!(
            RenderConfig::default().with_workers(0).validate(),
            Err(RenderError::ZeroWorkers)
        ));
    }

    #[test]
    fn test_render_rejects_empty_scene() {
        let scene = Scene::new(Camera::new());
        let config = RenderConfig::default().with_resolution(4, 4);
        assert!(matches!(render(&scene, &config), Err(RenderError::EmptyScene)));
    }

    #[test]
    fn test_render_is_reproducible() {
        let config = RenderConfig::default()
            .with_resolution(32, 18)
            .with_quality(1, 8)
            .with_workers(4)
            .with_seed(7);
        let scene = demo_scene(config.aspect_ratio());

        let first = render(&scene, &config).unwrap();
        let second = render(&scene, &config).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_render_fills_every_row_once() {
        let config = RenderConfig::default()
            .with_resolution(20, 13)
            .with_quality(2, 4)
            .with_workers(3)
            .with_seed(11);
        let scene = demo_scene(config.aspect_ratio());

        let framebuffer = render(&scene, &config).unwrap();
        assert_eq!(framebuffer.pixels.len(), 20 * 13);
        assert!(framebuffer.pixels.iter().all(|p| p[3] == 255));

        // Each band lands exactly at its own rows
        for band in partition_rows(config.height, config.workers) {
            let mut rng = StdRng::seed_from_u64(band_seed(11, band.index));
            let image = render_band(&band, &scene, &config, &mut rng);
            let start = band.start_row as usize * config.width as usize;
            assert_eq!(&framebuffer.pixels[start..start + image.pixels.len()], &image.pixels[..]);
        }
    }

    #[test]
    fn test_render_more_workers_than_rows() {
        let config = RenderConfig::default()
            .with_resolution(6, 3)
            .with_quality(1, 3)
            .with_workers(5)
            .with_seed(3);
        let scene = demo_scene(config.aspect_ratio());

        let framebuffer = render(&scene, &config).unwrap();
        assert!(framebuffer.pixels.iter().all(|p| p[3] == 255));
    }

    #[test]
    fn test_framebuffer_access() {
        let mut framebuffer = Framebuffer::new(3, 2);
        framebuffer.pixels[4] = [1, 2, 3, 255];

        assert_eq!(framebuffer.get(1, 1), [1, 2, 3, 255]);
        assert_eq!(framebuffer.row(1)[1], [1, 2, 3, 255]);
        assert_eq!(framebuffer.rows().count(), 2);
        assert_eq!(framebuffer.as_bytes().len(), 3 * 2 * 4);
        assert_eq!(&framebuffer.as_bytes()[16..20], &[1, 2, 3, 255]);
    }
}
