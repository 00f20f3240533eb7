//! Camera for ray generation.

use orb_core::CameraDescription;
use orb_math::{Ray, Vec3};

use crate::RenderError;

/// Pinhole camera mapping normalized viewport coordinates to world rays.
#[derive(Debug, Clone)]
pub struct Camera {
    // Camera positioning
    look_from: Vec3,
    look_at: Vec3,
    vup: Vec3,

    // Lens settings
    vfov: f32,         // Vertical field of view in degrees
    focal_length: f32, // Distance from eye to the viewport plane
    aspect_ratio: f32, // Viewport width / height

    // Cached computed values (set by initialize())
    origin: Vec3,
    horizontal: Vec3,
    vertical: Vec3,
    lower_left_corner: Vec3,
    u: Vec3,
    v: Vec3,
    w: Vec3,
}

impl Camera {
    /// Create a new camera with default settings.
    ///
    /// The default looks from the origin down -Z with +Y up, a 90 degree
    /// vertical field of view and a 16:9 viewport, and is ready to use.
    pub fn new() -> Self {
        let mut camera = Self {
            look_from: Vec3::ZERO,
            look_at: Vec3::NEG_Z,
            vup: Vec3::Y,
            vfov: 90.0,
            focal_length: 1.0,
            aspect_ratio: 16.0 / 9.0,
            origin: Vec3::ZERO,
            horizontal: Vec3::ZERO,
            vertical: Vec3::ZERO,
            lower_left_corner: Vec3::ZERO,
            u: Vec3::X,
            v: Vec3::Y,
            w: Vec3::Z,
        };
        camera.update_viewport();
        camera
    }

    /// Build and initialize a camera from a scene description.
    pub fn from_description(desc: &CameraDescription, aspect_ratio: f32) -> Result<Self, RenderError> {
        let mut camera = Camera::new()
            .with_position(desc.position, desc.look_at, desc.vup)
            .with_lens(desc.vertical_fov, desc.focal_length)
            .with_aspect_ratio(aspect_ratio);
        camera.initialize()?;
        Ok(camera)
    }

    /// Set camera position.
    pub fn with_position(mut self, look_from: Vec3, look_at: Vec3, vup: Vec3) -> Self {
        self.look_from = look_from;
        self.look_at = look_at;
        self.vup = vup;
        self
    }

    /// Set lens settings.
    pub fn with_lens(mut self, vfov: f32, focal_length: f32) -> Self {
        self.vfov = vfov;
        self.focal_length = focal_length;
        self
    }

    /// Set viewport aspect ratio (width / height).
    pub fn with_aspect_ratio(mut self, aspect_ratio: f32) -> Self {
        self.aspect_ratio = aspect_ratio;
        self
    }

    /// Initialize the camera (must be called after any `with_*` change).
    ///
    /// Fails if the lens is invalid or a basis vector would be zero-length
    /// before normalization.
    pub fn initialize(&mut self) -> Result<(), RenderError> {
        if !(self.vfov > 0.0 && self.vfov < 180.0) {
            return Err(RenderError::DegenerateCamera(format!(
                "vertical field of view {} must be in (0, 180)",
                self.vfov
            )));
        }
        if !(self.focal_length > 0.0 && self.aspect_ratio > 0.0) {
            return Err(RenderError::DegenerateCamera(format!(
                "focal length {} and aspect ratio {} must be positive",
                self.focal_length, self.aspect_ratio
            )));
        }

        // Calculate camera basis vectors
        let back = self.look_from - self.look_at;
        if back.length_squared() == 0.0 {
            return Err(RenderError::DegenerateCamera(
                "look_from equals look_at".to_string(),
            ));
        }
        let w = back.normalize();

        let side = self.vup.cross(w);
        if side.length_squared() == 0.0 {
            return Err(RenderError::DegenerateCamera(
                "vup is zero or parallel to the view direction".to_string(),
            ));
        }
        self.u = side.normalize();
        self.v = w.cross(self.u);
        self.w = w;

        self.update_viewport();
        Ok(())
    }

    /// Recompute the viewport from the current basis and lens.
    fn update_viewport(&mut self) {
        let theta = self.vfov.to_radians();
        let h = (theta / 2.0).tan();
        let viewport_height = 2.0 * h * self.focal_length;
        let viewport_width = viewport_height * self.aspect_ratio;

        self.origin = self.look_from;
        self.horizontal = viewport_width * self.u;
        self.vertical = viewport_height * self.v;
        self.lower_left_corner = self.origin
            - self.horizontal / 2.0
            - self.vertical / 2.0
            - self.focal_length * self.w;
    }

    /// Ray through normalized viewport coordinates.
    ///
    /// `(0, 0)` is the lower-left corner of the viewport, `(1, 1)` the
    /// upper-right.
    pub fn get_ray(&self, s: f32, t: f32) -> Ray {
        let target = self.lower_left_corner + s * self.horizontal + t * self.vertical;
        Ray::new(self.origin, target - self.origin)
    }

    pub fn origin(&self) -> Vec3 {
        self.origin
    }

    pub fn horizontal(&self) -> Vec3 {
        self.horizontal
    }

    pub fn vertical(&self) -> Vec3 {
        self.vertical
    }

    pub fn lower_left_corner(&self) -> Vec3 {
        self.lower_left_corner
    }

    pub fn aspect_ratio(&self) -> f32 {
        self.aspect_ratio
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::new()
    }
}
