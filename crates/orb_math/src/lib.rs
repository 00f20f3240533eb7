// Re-export glam for convenience
pub use glam::*;

// Orb math types
mod interval;
mod ray;
pub mod vector;

pub use interval::Interval;
pub use ray::Ray;
pub use vector::{gen_f32, near_zero, random_in_unit_ball, reflect, refract};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vec3_creation() {
        let v = Vec3::new(1.0, 2.0, 3.0);
        assert_eq!(v.x, 1.0);
        assert_eq!(v.y, 2.0);
        assert_eq!(v.z, 3.0);
    }

    #[test]
    fn test_vec3_operations() {
        let a = Vec3::new(1.0, 2.0, 3.0);
        let b = Vec3::new(4.0, 5.0, 6.0);

        assert_eq!(a + b, Vec3::new(5.0, 7.0, 9.0));
        assert_eq!(b - a, Vec3::new(3.0, 3.0, 3.0));
        assert_eq!(a * 2.0, Vec3::new(2.0, 4.0, 6.0));
        assert_eq!(a.dot(b), 32.0);
        assert_eq!(Vec3::X.cross(Vec3::Y), Vec3::Z);
    }

    #[test]
    fn test_vec3_length_and_normalize() {
        let v = Vec3::new(3.0, 4.0, 0.0);
        assert_eq!(v.length(), 5.0);
        assert!((v.normalize() - Vec3::new(0.6, 0.8, 0.0)).length() < 1e-6);

        // Normalizing a zero vector is undefined; callers must avoid it
        assert!(Vec3::ZERO.normalize().is_nan());
    }
}
