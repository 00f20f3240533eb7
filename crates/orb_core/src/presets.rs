//! Built-in demo scenes.

use orb_math::Vec3;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::scene::{CameraDescription, MaterialDescription, SceneDescription};

/// Mirror, glass and fuzzy metal balls resting on a large green sphere.
pub fn three_balls() -> SceneDescription {
    let mut scene = SceneDescription::new();

    scene.add_material("mirror", MaterialDescription::Metal { albedo: Vec3::splat(0.8) });
    scene.add_material("glass", MaterialDescription::Dielectric { refraction_index: 1.5 });
    scene.add_material(
        "brushed",
        MaterialDescription::FuzzyMetal { albedo: Vec3::splat(0.8), fuzz: 0.2 },
    );
    scene.add_material(
        "grass",
        MaterialDescription::Lambertian { albedo: Vec3::new(0.0, 1.0, 0.0) },
    );

    scene.add_sphere(Vec3::new(0.0, 0.0, -1.0), 0.5, "mirror");
    scene.add_sphere(Vec3::new(1.0, 0.0, -1.0), 0.5, "glass");
    scene.add_sphere(Vec3::new(-1.0, 0.0, -1.0), 0.5, "brushed");
    scene.add_sphere(Vec3::new(0.0, -100.5, -1.0), 100.0, "grass");

    scene
}

/// A glass ball in front of diffuse balls, with a mirror to the right.
pub fn glass_balls() -> SceneDescription {
    let mut scene = SceneDescription::new();

    scene.add_material("glass", MaterialDescription::Dielectric { refraction_index: 1.6 });
    scene.add_material(
        "teal",
        MaterialDescription::Lambertian { albedo: Vec3::new(0.0, 0.6, 0.6) },
    );
    scene.add_material(
        "light_green",
        MaterialDescription::Lambertian { albedo: Vec3::new(0.2, 0.8, 0.2) },
    );
    scene.add_material(
        "purple",
        MaterialDescription::Lambertian { albedo: Vec3::new(0.5, 0.0, 0.5) },
    );
    scene.add_material("mirror", MaterialDescription::Metal { albedo: Vec3::splat(0.8) });
    scene.add_material("ground", MaterialDescription::Lambertian { albedo: Vec3::splat(0.6) });

    scene.add_sphere(Vec3::new(0.0, 0.0, -1.0), 0.5, "glass");
    scene.add_sphere(Vec3::new(-1.0, 0.0, -1.0), 0.5, "teal");
    scene.add_sphere(Vec3::new(0.0, 0.0, -6.0), 0.5, "light_green");
    scene.add_sphere(Vec3::new(1.5, 0.0, -6.0), 0.5, "purple");
    scene.add_sphere(Vec3::new(1.0, 0.0, -1.0), 0.5, "mirror");
    scene.add_sphere(Vec3::new(0.0, -100.5, -1.0), 100.0, "ground");

    scene
}

/// A field of small random spheres around three large ones.
///
/// The layout depends only on `seed`.
pub fn lots_of_spheres(seed: u64) -> SceneDescription {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut scene = SceneDescription::new().with_camera(CameraDescription::new(
        Vec3::new(13.0, 2.0, 3.0),
        Vec3::ZERO,
        Vec3::Y,
        20.0,
    ));

    scene.add_material("ground", MaterialDescription::Lambertian { albedo: Vec3::splat(0.5) });
    scene.add_material("glass", MaterialDescription::Dielectric { refraction_index: 1.5 });
    scene.add_sphere(Vec3::new(0.0, -1000.0, 0.0), 1000.0, "ground");

    for a in -11..11 {
        for b in -11..11 {
            let choose_mat: f32 = rng.gen();
            let center = Vec3::new(
                a as f32 + 0.9 * rng.gen::<f32>(),
                0.2,
                b as f32 + 0.9 * rng.gen::<f32>(),
            );

            // Keep clear of the large metal sphere
            if (center - Vec3::new(4.0, 0.2, 0.0)).length() <= 0.9 {
                continue;
            }

            if choose_mat < 0.8 {
                let name = format!("diffuse_{a}_{b}");
                let albedo = Vec3::new(rng.gen(), rng.gen(), rng.gen());
                scene.add_material(name.clone(), MaterialDescription::Lambertian { albedo });
                scene.add_sphere(center, 0.2, name);
            } else if choose_mat < 0.95 {
                let name = format!("metal_{a}_{b}");
                let albedo = Vec3::new(
                    rng.gen_range(0.5..1.0),
                    rng.gen_range(0.5..1.0),
                    rng.gen_range(0.5..1.0),
                );
                let fuzz = rng.gen_range(0.0..0.5);
                scene.add_material(name.clone(), MaterialDescription::FuzzyMetal { albedo, fuzz });
                scene.add_sphere(center, 0.2, name);
            } else {
                scene.add_sphere(center, 0.2, "glass");
            }
        }
    }

    scene.add_material(
        "brown",
        MaterialDescription::Lambertian { albedo: Vec3::new(0.4, 0.2, 0.1) },
    );
    scene.add_material(
        "polished",
        MaterialDescription::Metal { albedo: Vec3::new(0.7, 0.6, 0.5) },
    );

    scene.add_sphere(Vec3::new(0.0, 1.0, 0.0), 1.0, "glass");
    scene.add_sphere(Vec3::new(-4.0, 1.0, 0.0), 1.0, "brown");
    scene.add_sphere(Vec3::new(4.0, 1.0, 0.0), 1.0, "polished");

    scene
}
