//! Example: Load and inspect a JSON scene file.
//!
//! Run with: cargo run --example inspect_scene -- scenes/three_balls.json

use std::env;

use orb_core::{load_scene, MaterialDescription};

fn main() {
    env_logger::init();

    let args: Vec<String> = env::args().collect();

    if args.len() < 2 {
        println!("Usage: inspect_scene <path-to-scene-json>");
        println!("\nExamples:");
        println!("  cargo run --example inspect_scene -- scenes/three_balls.json");
        println!("  cargo run --example inspect_scene -- scenes/glass_balls.json");
        return;
    }

    let path = &args[1];
    println!("Loading scene file: {}", path);

    match load_scene(path) {
        Ok(scene) => {
            println!("\n=== Scene: {} ===", path);
            println!("Spheres: {}", scene.sphere_count());
            println!("Materials: {}", scene.material_count());
            println!(
                "Camera: {} -> {} (fov {}°)",
                scene.camera.position, scene.camera.look_at, scene.camera.vertical_fov
            );

            println!("\n--- Materials ---");
            for (name, material) in &scene.materials {
                let users = scene.spheres.iter().filter(|s| &s.material == name).count();
                let kind = match material {
                    MaterialDescription::Lambertian { .. } => "lambertian",
                    MaterialDescription::Metal { .. } => "metal",
                    MaterialDescription::FuzzyMetal { .. } => "fuzzy metal",
                    MaterialDescription::Dielectric { .. } => "dielectric",
                };
                println!("  {} ({}) - used by {} spheres", name, kind, users);
            }

            println!("\n--- Spheres ---");
            for (i, sphere) in scene.spheres.iter().enumerate() {
                println!(
                    "  [{}] center {} radius {} material {}",
                    i, sphere.center, sphere.radius, sphere.material
                );
            }
        }
        Err(e) => {
            eprintln!("Error loading scene: {}", e);
            std::process::exit(1);
        }
    }
}
