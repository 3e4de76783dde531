//! Math types for the GHD path tracer.
//!
//! Everything is double precision. [`Vec3`] is glam's `DVec3`, used
//! interchangeably as a point, a direction or a linear RGB color.

pub use glam::{dvec3, DVec3};

mod interval;
mod optics;
mod ray;
mod sampling;

pub use interval::Interval;
pub use optics::{near_zero, reflect, reflectance, refract};
pub use ray::Ray;
pub use sampling::{
    random_double, random_in_hemisphere, random_in_unit_disk, random_in_unit_sphere,
    random_range, random_unit_vector,
};

/// 3-component double-precision vector.
pub type Vec3 = DVec3;

/// A position in world space.
pub type Point3 = DVec3;

/// Linear RGB color, channels nominally in [0, 1].
pub type Color = DVec3;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vec3_operations() {
        let a = Vec3::new(1.0, 2.0, 3.0);
        let b = Vec3::new(4.0, 5.0, 6.0);
        assert_eq!(a + b, Vec3::new(5.0, 7.0, 9.0));
        assert_eq!(a * b, Vec3::new(4.0, 10.0, 18.0));
        assert_eq!(a.dot(b), 32.0);
        assert_eq!(a.cross(b), Vec3::new(-3.0, 6.0, -3.0));
    }

    #[test]
    fn test_unit_vector_length() {
        let v = Vec3::new(3.0, -4.0, 12.0).normalize();
        assert!((v.length() - 1.0).abs() < 1e-12);
    }
}
