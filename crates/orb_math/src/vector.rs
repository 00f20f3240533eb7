//! Vector helpers used by the scattering models.
//!
//! Arithmetic, dot/cross products, length and normalization come from
//! `glam::Vec3`. Note that `Vec3::normalize` on a zero-length vector yields
//! NaN components; callers must guarantee a non-zero length first.

use crate::Vec3;
use rand::{Rng, RngCore};

/// Components below this magnitude count as zero for scatter directions.
pub const NEAR_ZERO_EPSILON: f32 = 1e-8;

/// Uniform f32 in [0, 1) from the given generator.
#[inline]
pub fn gen_f32(rng: &mut dyn RngCore) -> f32 {
    rng.gen::<f32>()
}

/// Reflect `v` about the normal `n`: `v - 2 * dot(v, n) * n`.
#[inline]
pub fn reflect(v: Vec3, n: Vec3) -> Vec3 {
    v - 2.0 * v.dot(n) * n
}

/// Refract the unit vector `uv` through a surface with unit normal `n`.
///
/// `etai_over_etat` is the ratio of refractive indices across the boundary.
/// The result is split into components perpendicular and parallel to `n`
/// (Snell's law). Callers handle total internal reflection before calling.
#[inline]
pub fn refract(uv: Vec3, n: Vec3, etai_over_etat: f32) -> Vec3 {
    let cos_theta = (-uv).dot(n).min(1.0);
    let r_out_perp = etai_over_etat * (uv + cos_theta * n);
    let r_out_parallel = -(1.0 - r_out_perp.length_squared()).abs().sqrt() * n;
    r_out_perp + r_out_parallel
}

/// True if every component is smaller in magnitude than [`NEAR_ZERO_EPSILON`].
#[inline]
pub fn near_zero(v: Vec3) -> bool {
    v.abs().max_element() < NEAR_ZERO_EPSILON
}

/// Rejection-sample a point strictly inside the unit ball.
///
/// Components are drawn uniformly from [-1, 1) until the squared length is
/// below 1. Acceptance is roughly 52% per draw, so there is no fixed
/// iteration bound. The generator must be local to the calling worker.
pub fn random_in_unit_ball(rng: &mut dyn RngCore) -> Vec3 {
    loop {
        let p = Vec3::new(
            gen_f32(rng) * 2.0 - 1.0,
            gen_f32(rng) * 2.0 - 1.0,
            gen_f32(rng) * 2.0 - 1.0,
        );
        if p.length_squared() < 1.0 {
            return p;
        }
    }
}
