//! Orb Core - Scene description types for the Orb path tracer.
//!
//! This crate provides:
//!
//! - **Scene description types**: `SceneDescription`, `SphereDescription`,
//!   `MaterialDescription`, `CameraDescription`
//! - **JSON loading**: parse and validate a scene file
//! - **Presets**: built-in demo scenes
//!
//! Nothing here knows how to trace a ray; the renderer converts a validated
//! description into its own scene representation.
//!
//! # Example
//!
//! ```ignore
//! use orb_core::load_scene;
//!
//! let scene = load_scene("scenes/three_balls.json")?;
//! println!("Loaded {} spheres, {} materials",
//!     scene.sphere_count(),
//!     scene.material_count());
//! ```

pub mod loader;
pub mod presets;
pub mod scene;

// Re-export commonly used types
pub use loader::{load_scene, load_scene_from_str, LoadResult, SceneError};
pub use scene::{CameraDescription, MaterialDescription, SceneDescription, SphereDescription};
