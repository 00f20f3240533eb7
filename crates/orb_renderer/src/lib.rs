//! Orb Renderer - CPU Path Tracing
//!
//! A Monte Carlo path tracer for scenes made of spheres.
//!
//! Rays are cast through every pixel with random sub-pixel jitter, bounced
//! off surfaces according to their material, and averaged. The image is split
//! into horizontal bands rendered concurrently, one worker and one private
//! random stream per band, then stitched into a single framebuffer.

mod band;
mod camera;
mod hittable;
mod material;
mod renderer;
mod scene;
mod sphere;

pub use band::{band_seed, partition_rows, render_band, Band, BandImage};
pub use camera::Camera;
pub use hittable::{HitRecord, Hittable};
pub use material::{
    Color, Dielectric, FuzzyMetal, Lambertian, Material, Metal, ScatterResult,
};
pub use renderer::{
    color_to_rgba, linear_to_gamma, ray_color, render, render_pixel, sky_color, Framebuffer,
    RenderConfig, RenderError, T_MIN,
};
pub use scene::Scene;
pub use sphere::Sphere;

/// Re-export Vec3 and common math types from orb_math
pub use orb_math::{Interval, Ray, Vec3};
