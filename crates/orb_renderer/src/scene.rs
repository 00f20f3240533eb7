//! Renderable scene: an ordered list of spheres plus the camera.

use std::collections::HashMap;
use std::sync::Arc;

use orb_core::SceneDescription;
use orb_math::{Interval, Ray};

use crate::{Camera, HitRecord, Hittable, Material, RenderError, Sphere};

/// Spheres and camera, read-only for the duration of a render.
///
/// Hit queries scan every sphere; there is no acceleration structure.
#[derive(Debug, Clone)]
pub struct Scene {
    objects: Vec<Sphere>,
    camera: Camera,
}

impl Scene {
    /// Create an empty scene viewed through `camera`.
    pub fn new(camera: Camera) -> Self {
        Self {
            objects: Vec::new(),
            camera,
        }
    }

    /// Convert a scene description, sharing one material per name.
    ///
    /// `aspect_ratio` is the output image width over height.
    pub fn from_description(desc: &SceneDescription, aspect_ratio: f32) -> Result<Self, RenderError> {
        let camera = Camera::from_description(&desc.camera, aspect_ratio)?;

        let materials: HashMap<&str, Arc<Material>> = desc
            .materials
            .iter()
            .map(|(name, material)| (name.as_str(), Arc::new(Material::from(material))))
            .collect();

        let mut scene = Scene::new(camera);
        for sphere in &desc.spheres {
            let material = materials
                .get(sphere.material.as_str())
                .ok_or_else(|| RenderError::UnknownMaterial(sphere.material.clone()))?;
            scene.add(Sphere::new(sphere.center, sphere.radius, Arc::clone(material)));
        }

        log::debug!(
            "Built scene with {} spheres sharing {} materials",
            scene.len(),
            materials.len()
        );

        Ok(scene)
    }

    /// Add an object to the scene.
    pub fn add(&mut self, sphere: Sphere) {
        self.objects.push(sphere);
    }

    /// Get the number of objects.
    pub fn len(&self) -> usize {
        self.objects.len()
    }

    /// Check if the scene is empty.
    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    pub fn objects(&self) -> &[Sphere] {
        &self.objects
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    /// Reject scenes that cannot produce an image.
    pub fn validate(&self) -> Result<(), RenderError> {
        if self.is_empty() {
            return Err(RenderError::EmptyScene);
        }
        Ok(())
    }
}

impl Hittable for Scene {
    fn hit(&self, ray: &Ray, ray_t: Interval) -> Option<HitRecord<'_>> {
        let mut closest = None;
        let mut closest_so_far = ray_t.max;

        for object in &self.objects {
            if let Some(rec) = object.hit(ray, ray_t.with_max(closest_so_far)) {
                closest_so_far = rec.t;
                closest = Some(rec);
            }
        }

        closest
    }
}
