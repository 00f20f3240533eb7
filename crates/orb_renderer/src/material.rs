//! Surface scattering models.
//!
//! Each model is its own type with a `scatter` method; [`Material`] is the
//! closed set the integrator dispatches over. Adding a model means one new
//! type and one new match arm.

use orb_core::MaterialDescription;
use orb_math::{gen_f32, near_zero, random_in_unit_ball, reflect, refract, Ray, Vec3};
use rand::RngCore;

use crate::HitRecord;

/// Color type alias (RGB values typically 0-1)
pub type Color = Vec3;

/// Result of a successful scatter: energy kept per channel and the next ray.
#[derive(Debug, Clone, Copy)]
pub struct ScatterResult {
    pub attenuation: Color,
    pub scattered: Ray,
}

/// Lambertian (diffuse) material.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Lambertian {
    albedo: Color,
}

impl Lambertian {
    /// Create a new Lambertian material with the given albedo color.
    pub fn new(albedo: Color) -> Self {
        Self { albedo }
    }

    pub fn albedo(&self) -> Color {
        self.albedo
    }

    /// Always scatters, around the normal.
    pub fn scatter(
        &self,
        _ray_in: &Ray,
        rec: &HitRecord,
        rng: &mut dyn RngCore,
    ) -> Option<ScatterResult> {
        let mut scatter_direction = rec.normal + random_in_unit_ball(rng);

        // Catch degenerate scatter direction
        if near_zero(scatter_direction) {
            scatter_direction = rec.normal;
        }

        Some(ScatterResult {
            attenuation: self.albedo,
            scattered: Ray::new(rec.p, scatter_direction),
        })
    }
}

/// Perfect mirror.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Metal {
    albedo: Color,
}

impl Metal {
    /// Create a new Metal material.
    pub fn new(albedo: Color) -> Self {
        Self { albedo }
    }

    pub fn albedo(&self) -> Color {
        self.albedo
    }

    pub fn scatter(
        &self,
        ray_in: &Ray,
        rec: &HitRecord,
        _rng: &mut dyn RngCore,
    ) -> Option<ScatterResult> {
        let reflected = reflect(ray_in.direction().normalize(), rec.normal);
        scatter_above_surface(self.albedo, rec, reflected)
    }
}

/// Metal with a blurred reflection.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FuzzyMetal {
    albedo: Color,
    fuzz: f32,
}

impl FuzzyMetal {
    /// Create a new FuzzyMetal material.
    ///
    /// - `albedo`: The color of the metal
    /// - `fuzz`: Roughness, 0.0 = perfect mirror, 1.0 = very rough
    pub fn new(albedo: Color, fuzz: f32) -> Self {
        Self {
            albedo,
            fuzz: fuzz.clamp(0.0, 1.0),
        }
    }

    pub fn albedo(&self) -> Color {
        self.albedo
    }

    pub fn fuzz(&self) -> f32 {
        self.fuzz
    }

    pub fn scatter(
        &self,
        ray_in: &Ray,
        rec: &HitRecord,
        rng: &mut dyn RngCore,
    ) -> Option<ScatterResult> {
        let reflected = reflect(ray_in.direction().normalize(), rec.normal);
        let perturbed = reflected + self.fuzz * random_in_unit_ball(rng);
        scatter_above_surface(self.albedo, rec, perturbed)
    }
}

/// Reflections that would head into the surface are absorbed.
#[inline]
fn scatter_above_surface(albedo: Color, rec: &HitRecord, direction: Vec3) -> Option<ScatterResult> {
    if direction.dot(rec.normal) > 0.0 {
        Some(ScatterResult {
            attenuation: albedo,
            scattered: Ray::new(rec.p, direction),
        })
    } else {
        None
    }
}

/// Dielectric (glass) material.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Dielectric {
    /// Index of refraction
    ior: f32,
}

impl Dielectric {
    /// Create a new Dielectric material.
    ///
    /// - `ior`: Index of refraction (1.0 = air, 1.5 = glass, 2.4 = diamond)
    pub fn new(ior: f32) -> Self {
        Self { ior }
    }

    pub fn refraction_index(&self) -> f32 {
        self.ior
    }

    /// Schlick's approximation for reflectance
    fn reflectance(cosine: f32, refraction_ratio: f32) -> f32 {
        let r0 = ((1.0 - refraction_ratio) / (1.0 + refraction_ratio)).powi(2);
        r0 + (1.0 - r0) * (1.0 - cosine).powi(5)
    }

    /// Always scatters: reflects or refracts, never tints.
    pub fn scatter(
        &self,
        ray_in: &Ray,
        rec: &HitRecord,
        rng: &mut dyn RngCore,
    ) -> Option<ScatterResult> {
        let refraction_ratio = if rec.front_face { 1.0 / self.ior } else { self.ior };

        let unit_direction = ray_in.direction().normalize();
        let cos_theta = (-unit_direction).dot(rec.normal).min(1.0);
        let sin_theta = (1.0 - cos_theta * cos_theta).sqrt();

        // Check for total internal reflection
        let cannot_refract = refraction_ratio * sin_theta > 1.0;

        let direction = if cannot_refract
            || Self::reflectance(cos_theta, refraction_ratio) > gen_f32(rng)
        {
            reflect(unit_direction, rec.normal)
        } else {
            refract(unit_direction, rec.normal, refraction_ratio)
        };

        Some(ScatterResult {
            attenuation: Color::ONE,
            scattered: Ray::new(rec.p, direction),
        })
    }
}

/// The closed set of materials a sphere can carry.
///
/// Stateless beyond its parameters; shared read-only between primitives and
/// render workers.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Material {
    Lambertian(Lambertian),
    Metal(Metal),
    FuzzyMetal(FuzzyMetal),
    Dielectric(Dielectric),
}

impl Material {
    /// Scatter an incoming ray.
    ///
    /// Returns the attenuation and scattered ray, or `None` if the ray is
    /// absorbed.
    pub fn scatter(
        &self,
        ray_in: &Ray,
        rec: &HitRecord,
        rng: &mut dyn RngCore,
    ) -> Option<ScatterResult> {
        match self {
            Material::Lambertian(m) => m.scatter(ray_in, rec, rng),
            Material::Metal(m) => m.scatter(ray_in, rec, rng),
            Material::FuzzyMetal(m) => m.scatter(ray_in, rec, rng),
            Material::Dielectric(m) => m.scatter(ray_in, rec, rng),
        }
    }
}

impl From<Lambertian> for Material {
    fn from(m: Lambertian) -> Self {
        Material::Lambertian(m)
    }
}

impl From<Metal> for Material {
    fn from(m: Metal) -> Self {
        Material::Metal(m)
    }
}

impl From<FuzzyMetal> for Material {
    fn from(m: FuzzyMetal) -> Self {
        Material::FuzzyMetal(m)
    }
}

impl From<Dielectric> for Material {
    fn from(m: Dielectric) -> Self {
        Material::Dielectric(m)
    }
}

impl From<&MaterialDescription> for Material {
    fn from(desc: &MaterialDescription) -> Self {
        match *desc {
            MaterialDescription::Lambertian { albedo } => Lambertian::new(albedo).into(),
            MaterialDescription::Metal { albedo } => Metal::new(albedo).into(),
            MaterialDescription::FuzzyMetal { albedo, fuzz } => FuzzyMetal::new(albedo, fuzz).into(),
            MaterialDescription::Dielectric { refraction_index } => {
                Dielectric::new(refraction_index).into()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    /// Hit on the top of a unit sphere, seen from above.
    fn top_hit<'a>(material: &'a Material, ray: &Ray) -> HitRecord<'a> {
        let t = (ray.origin().y - 1.0) / -ray.direction().y;
        HitRecord::new(ray, t, Vec3::Y, material)
    }

    #[test]
    fn test_lambertian_always_scatters_above_surface() {
        let material = Material::from(Lambertian::new(Color::new(0.2, 0.4, 0.6)));
        let ray = Ray::new(Vec3::new(0.0, 5.0, 0.0), Vec3::NEG_Y);
        let rec = top_hit(&material, &ray);
        let mut rng = StdRng::seed_from_u64(42);

        for _ in 0..1_000 {
            let result = material.scatter(&ray, &rec, &mut rng).unwrap();
            assert_eq!(result.attenuation, Color::new(0.2, 0.4, 0.6));
            assert_eq!(result.scattered.origin(), rec.p);
            // normal + point in unit ball never dips below the tangent plane
            assert!(result.scattered.direction().dot(rec.normal) >= 0.0);
            assert!(!near_zero(result.scattered.direction()));
        }
    }

    #[test]
    fn test_metal_mirror_reflection() {
        let material = Material::from(Metal::new(Color::splat(0.8)));
        let ray = Ray::new(Vec3::new(-1.0, 2.0, 0.0), Vec3::new(1.0, -1.0, 0.0));
        let rec = top_hit(&material, &ray);
        let mut rng = StdRng::seed_from_u64(42);

        let result = material.scatter(&ray, &rec, &mut rng).unwrap();
        let expected = Vec3::new(1.0, 1.0, 0.0).normalize();
        assert!((result.scattered.direction() - expected).length() < 1e-6);
        assert_eq!(result.attenuation, Color::splat(0.8));
    }

    #[test]
    fn test_metal_absorbs_reflection_into_surface() {
        let material = Material::from(Metal::new(Color::ONE));
        let ray = Ray::new(Vec3::ZERO, Vec3::Y);
        // Normal deliberately aligned with the incoming ray
        let rec = HitRecord {
            p: Vec3::Y,
            normal: Vec3::Y,
            material: &material,
            t: 1.0,
            front_face: true,
        };
        let mut rng = StdRng::seed_from_u64(42);

        assert!(material.scatter(&ray, &rec, &mut rng).is_none());
    }

    #[test]
    fn test_fuzzy_metal_zero_fuzz_matches_metal() {
        let fuzzy = Material::from(FuzzyMetal::new(Color::ONE, 0.0));
        let mirror = Material::from(Metal::new(Color::ONE));
        let ray = Ray::new(Vec3::new(-1.0, 2.0, 0.5), Vec3::new(1.0, -1.0, -0.25));
        let mut rng = StdRng::seed_from_u64(9);

        let a = fuzzy.scatter(&ray, &top_hit(&fuzzy, &ray), &mut rng).unwrap();
        let b = mirror.scatter(&ray, &top_hit(&mirror, &ray), &mut rng).unwrap();
        assert!((a.scattered.direction() - b.scattered.direction()).length() < 1e-6);
    }

    #[test]
    fn test_fuzzy_metal_perturbation_bounded() {
        let material = Material::from(FuzzyMetal::new(Color::ONE, 0.3));
        let ray = Ray::new(Vec3::new(0.0, 5.0, 0.0), Vec3::NEG_Y);
        let rec = top_hit(&material, &ray);
        let mut rng = StdRng::seed_from_u64(1);

        for _ in 0..1_000 {
            if let Some(result) = material.scatter(&ray, &rec, &mut rng) {
                let offset = result.scattered.direction() - Vec3::Y;
                assert!(offset.length() < 0.3 + 1e-6);
                assert!(result.scattered.direction().dot(rec.normal) > 0.0);
            }
        }
    }

    #[test]
    fn test_fuzz_is_clamped() {
        assert_eq!(FuzzyMetal::new(Color::ONE, 2.0).fuzz(), 1.0);
        assert_eq!(FuzzyMetal::new(Color::ONE, -1.0).fuzz(), 0.0);
    }

    #[test]
    fn test_dielectric_never_absorbs_or_tints() {
        let material = Material::from(Dielectric::new(1.5));
        let ray = Ray::new(Vec3::new(-1.0, 2.0, 0.0), Vec3::new(1.0, -1.0, 0.0));
        let rec = top_hit(&material, &ray);
        let mut rng = StdRng::seed_from_u64(5);

        for _ in 0..1_000 {
            let result = material.scatter(&ray, &rec, &mut rng).unwrap();
            assert_eq!(result.attenuation, Color::ONE);
        }
    }

    #[test]
    fn test_dielectric_total_internal_reflection() {
        let material = Material::from(Dielectric::new(1.5));
        // Shallow ray leaving glass: sin_theta * 1.5 > 1
        let ray = Ray::new(Vec3::ZERO, Vec3::new(1.0, 0.2, 0.0));
        let rec = HitRecord {
            p: Vec3::new(5.0, 1.0, 0.0),
            normal: Vec3::NEG_Y,
            material: &material,
            t: 5.0,
            front_face: false,
        };
        let mut rng = StdRng::seed_from_u64(5);

        for _ in 0..100 {
            let result = material.scatter(&ray, &rec, &mut rng).unwrap();
            // Reflected back into the glass
            assert!(result.scattered.direction().y < 0.0);
        }
    }

    #[test]
    fn test_dielectric_unit_index_is_invisible() {
        let material = Material::from(Dielectric::new(1.0));
        let ray = Ray::new(Vec3::new(0.0, 5.0, 0.0), Vec3::new(0.0, -2.0, 0.0));
        let rec = top_hit(&material, &ray);
        let mut rng = StdRng::seed_from_u64(5);

        for _ in 0..100 {
            let result = material.scatter(&ray, &rec, &mut rng).unwrap();
            assert!((result.scattered.direction() - Vec3::NEG_Y).length() < 1e-6);
        }
    }

    #[test]
    fn test_schlick_reflectance() {
        // Normal incidence into glass: ((1 - 1.5) / (1 + 1.5))^2 = 0.04
        assert!((Dielectric::reflectance(1.0, 1.5) - 0.04).abs() < 1e-6);
        // Grazing incidence reflects everything
        assert!((Dielectric::reflectance(0.0, 1.5) - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_from_description() {
        let desc = MaterialDescription::FuzzyMetal {
            albedo: Vec3::splat(0.8),
            fuzz: 0.2,
        };
        assert_eq!(
            Material::from(&desc),
            Material::FuzzyMetal(FuzzyMetal::new(Vec3::splat(0.8), 0.2))
        );

        let desc = MaterialDescription::Dielectric { refraction_index: 1.5 };
        assert_eq!(Material::from(&desc), Material::Dielectric(Dielectric::new(1.5)));
    }
}
