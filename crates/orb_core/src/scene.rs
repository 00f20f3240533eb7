//! Scene description types for Orb.
//!
//! This module defines the in-memory scene shape handed to the renderer:
//! a camera, a table of named materials and an ordered list of spheres.
//! Spheres reference materials by name so a single material definition can
//! be shared by many spheres.

use std::collections::BTreeMap;

use orb_math::{Interval, Vec3};
use serde::{Deserialize, Serialize};

use crate::loader::{LoadResult, SceneError};

/// A surface scattering model and its parameters.
///
/// Serialized with an internal `"type"` tag, e.g.
/// `{ "type": "fuzzy_metal", "albedo": [0.8, 0.8, 0.8], "fuzz": 0.2 }`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum MaterialDescription {
    /// Ideal diffuse surface.
    Lambertian { albedo: Vec3 },

    /// Perfect mirror.
    Metal { albedo: Vec3 },

    /// Mirror with a randomly perturbed reflection (fuzz in [0, 1]).
    FuzzyMetal { albedo: Vec3, fuzz: f32 },

    /// Clear refractive material such as glass or water.
    Dielectric { refraction_index: f32 },
}

impl MaterialDescription {
    /// Check the parameters are physically meaningful.
    fn validate(&self, name: &str) -> LoadResult<()> {
        let invalid = |message: String| SceneError::InvalidMaterial {
            name: name.to_string(),
            message,
        };

        match *self {
            MaterialDescription::Lambertian { albedo }
            | MaterialDescription::Metal { albedo } => {
                if !albedo.is_finite() {
                    return Err(invalid(format!("albedo {albedo} is not finite")));
                }
            }
            MaterialDescription::FuzzyMetal { albedo, fuzz } => {
                if !albedo.is_finite() {
                    return Err(invalid(format!("albedo {albedo} is not finite")));
                }
                if !Interval::UNIT.contains(fuzz) {
                    return Err(invalid(format!("fuzz {fuzz} outside [0, 1]")));
                }
            }
            MaterialDescription::Dielectric { refraction_index } => {
                if !(refraction_index.is_finite() && refraction_index > 0.0) {
                    return Err(invalid(format!(
                        "refraction index {refraction_index} must be positive"
                    )));
                }
            }
        }

        Ok(())
    }
}

/// A sphere primitive referencing a material by name.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SphereDescription {
    /// Center of the sphere in world space
    pub center: Vec3,

    /// Radius (must be positive)
    pub radius: f32,

    /// Key into `SceneDescription::materials`
    pub material: String,
}

impl SphereDescription {
    /// Create a new sphere description.
    pub fn new(center: Vec3, radius: f32, material: impl Into<String>) -> Self {
        Self {
            center,
            radius,
            material: material.into(),
        }
    }
}

/// Pinhole camera placement and lens.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraDescription {
    /// Eye position
    pub position: Vec3,

    /// Point the camera is looking at
    pub look_at: Vec3,

    /// World up hint used to roll the camera
    pub vup: Vec3,

    /// Vertical field of view in degrees
    pub vertical_fov: f32,

    /// Distance from the eye to the viewport plane
    pub focal_length: f32,
}

impl Default for CameraDescription {
    /// Camera at the origin looking down -Z with a viewport two units tall.
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            look_at: Vec3::NEG_Z,
            vup: Vec3::Y,
            vertical_fov: 90.0,
            focal_length: 1.0,
        }
    }
}

impl CameraDescription {
    /// Create a camera looking from `position` toward `look_at`.
    pub fn new(position: Vec3, look_at: Vec3, vup: Vec3, vertical_fov: f32) -> Self {
        Self {
            position,
            look_at,
            vup,
            vertical_fov,
            ..Default::default()
        }
    }

    fn validate(&self) -> LoadResult<()> {
        if !(self.vertical_fov > 0.0 && self.vertical_fov < 180.0) {
            return Err(SceneError::InvalidCamera(format!(
                "vertical field of view {} must be in (0, 180)",
                self.vertical_fov
            )));
        }

        if !(self.focal_length.is_finite() && self.focal_length > 0.0) {
            return Err(SceneError::InvalidCamera(format!(
                "focal length {} must be positive",
                self.focal_length
            )));
        }

        let view = self.look_at - self.position;
        if view.length_squared() == 0.0 {
            return Err(SceneError::InvalidCamera(
                "position and look_at coincide".to_string(),
            ));
        }

        if self.vup.cross(view).length_squared() == 0.0 {
            return Err(SceneError::InvalidCamera(
                "vup is zero or parallel to the view direction".to_string(),
            ));
        }

        Ok(())
    }
}

/// A complete scene: camera, shared materials and spheres.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct SceneDescription {
    /// Camera parameters (defaults to the origin camera)
    #[serde(default)]
    pub camera: CameraDescription,

    /// Named materials, shared by every sphere that references them
    #[serde(default)]
    pub materials: BTreeMap<String, MaterialDescription>,

    /// Spheres in insertion order
    #[serde(default)]
    pub spheres: Vec<SphereDescription>,
}

impl SceneDescription {
    /// Create an empty scene with the default camera.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the camera.
    pub fn with_camera(mut self, camera: CameraDescription) -> Self {
        self.camera = camera;
        self
    }

    /// Register (or replace) a named material.
    pub fn add_material(&mut self, name: impl Into<String>, material: MaterialDescription) {
        self.materials.insert(name.into(), material);
    }

    /// Append a sphere.
    pub fn add_sphere(&mut self, center: Vec3, radius: f32, material: impl Into<String>) {
        self.spheres
            .push(SphereDescription::new(center, radius, material));
    }

    /// Number of spheres.
    pub fn sphere_count(&self) -> usize {
        self.spheres.len()
    }

    /// Number of distinct materials.
    pub fn material_count(&self) -> usize {
        self.materials.len()
    }

    /// Look up a material by name.
    pub fn material(&self, name: &str) -> Option<&MaterialDescription> {
        self.materials.get(name)
    }

    /// Check the scene can be rendered.
    ///
    /// Rejects empty scenes, non-positive radii, dangling material names,
    /// out-of-range material parameters and degenerate cameras.
    pub fn validate(&self) -> LoadResult<()> {
        if self.spheres.is_empty() {
            return Err(SceneError::NoGeometry);
        }

        self.camera.validate()?;

        for (name, material) in &self.materials {
            material.validate(name)?;
        }

        for (index, sphere) in self.spheres.iter().enumerate() {
            if !sphere.center.is_finite() {
                return Err(SceneError::InvalidSphere {
                    index,
                    message: format!("center {} is not finite", sphere.center),
                });
            }
            if !(sphere.radius.is_finite() && sphere.radius > 0.0) {
                return Err(SceneError::InvalidSphere {
                    index,
                    message: format!("radius {} must be positive", sphere.radius),
                });
            }
            if !self.materials.contains_key(&sphere.material) {
                return Err(SceneError::UnknownMaterial(sphere.material.clone()));
            }
        }

        Ok(())
    }
}
