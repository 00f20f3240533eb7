//! JSON scene loading.
//!
//! A scene file is a JSON document with an optional `camera`, a `materials`
//! table and a `spheres` list:
//!
//! ```json
//! {
//!   "camera": { "position": [0, 0, 0], "look_at": [0, 0, -1], "vertical_fov": 90 },
//!   "materials": {
//!     "ground": { "type": "lambertian", "albedo": [0.0, 1.0, 0.0] },
//!     "glass": { "type": "dielectric", "refraction_index": 1.5 }
//!   },
//!   "spheres": [
//!     { "center": [0, -100.5, -1], "radius": 100, "material": "ground" },
//!     { "center": [0, 0, -1], "radius": 0.5, "material": "glass" }
//!   ]
//! }
//! ```

use std::fs;
use std::path::Path;

use thiserror::Error;

use crate::scene::SceneDescription;

/// Errors that can occur while loading or validating a scene.
#[derive(Error, Debug)]
pub enum SceneError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("No spheres found in scene")]
    NoGeometry,

    #[error("Unknown material reference: {0}")]
    UnknownMaterial(String),

    #[error("Invalid sphere {index}: {message}")]
    InvalidSphere { index: usize, message: String },

    #[error("Invalid material {name}: {message}")]
    InvalidMaterial { name: String, message: String },

    #[error("Invalid camera: {0}")]
    InvalidCamera(String),
}

/// Result type for loading operations.
pub type LoadResult<T> = Result<T, SceneError>;

/// Load and validate a JSON scene file.
///
/// # Example
///
/// ```ignore
/// use orb_core::load_scene;
///
/// let scene = load_scene("scenes/three_balls.json")?;
/// println!("Loaded {} spheres", scene.sphere_count());
/// ```
pub fn load_scene<P: AsRef<Path>>(path: P) -> LoadResult<SceneDescription> {
    let path = path.as_ref();
    let contents = fs::read_to_string(path)?;
    let scene = load_scene_from_str(&contents)?;

    log::info!(
        "Loaded scene {}: {} spheres, {} materials",
        path.display(),
        scene.sphere_count(),
        scene.material_count()
    );

    Ok(scene)
}

/// Parse and validate a scene from a JSON string.
pub fn load_scene_from_str(json: &str) -> LoadResult<SceneDescription> {
    let scene: SceneDescription = serde_json::from_str(json)?;
    scene.validate()?;
    Ok(scene)
}
