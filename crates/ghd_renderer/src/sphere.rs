//! Sphere primitive, optionally moving between two keyframes.

use std::sync::Arc;

use ghd_math::{Interval, Point3, Ray, Vec3};

use crate::{
    hittable::{HitRecord, Hittable},
    Material,
};

/// Where the sphere's centre is over the shutter interval.
#[derive(Debug, Clone, PartialEq)]
enum Motion {
    Static(Point3),
    Linear {
        center0: Point3,
        center1: Point3,
        time0: f64,
        time1: f64,
    },
}

/// A sphere primitive.
///
/// A negative radius keeps the geometry but flips the normals inward,
/// which is how hollow glass shells are modelled.
#[derive(Debug, Clone)]
pub struct Sphere {
    motion: Motion,
    radius: f64,
    material: Arc<Material>,
}

impl Sphere {
    /// Create a stationary sphere.
    pub fn new(center: Point3, radius: f64, material: Arc<Material>) -> Self {
        Self {
            motion: Motion::Static(center),
            radius,
            material,
        }
    }

    /// Create a sphere that moves linearly from `center0` at `time0` to
    /// `center1` at `time1`.
    pub fn moving(
        center0: Point3,
        center1: Point3,
        time0: f64,
        time1: f64,
        radius: f64,
        material: Arc<Material>,
    ) -> Self {
        Self {
            motion: Motion::Linear {
                center0,
                center1,
                time0,
                time1,
            },
            radius,
            material,
        }
    }

    /// Centre of the sphere at the given time.
    pub fn center(&self, time: f64) -> Point3 {
        match self.motion {
            Motion::Static(center) => center,
            Motion::Linear {
                center0,
                center1,
                time0,
                time1,
            } => {
                let span = time1 - time0;
                if span == 0.0 {
                    return center0;
                }
                center0 + ((time - time0) / span) * (center1 - center0)
            }
        }
    }

    pub fn radius(&self) -> f64 {
        self.radius
    }

    pub fn material(&self) -> &Arc<Material> {
        &self.material
    }
}

impl Hittable for Sphere {
    fn hit(&self, ray: &Ray, ray_t: Interval) -> Option<HitRecord<'_>> {
        let center = self.center(ray.time());
        let oc = center - ray.origin();
        let a = ray.direction().length_squared();
        let h = ray.direction().dot(oc);
        let c = oc.length_squared() - self.radius * self.radius;

        let discriminant = h * h - a * c;
        if discriminant < 0.0 {
            return None;
        }

        let sqrtd = discriminant.sqrt();

        // Find the nearest root in the acceptable range
        let mut root = (h - sqrtd) / a;
        if !ray_t.surrounds(root) {
            root = (h + sqrtd) / a;
            if !ray_t.surrounds(root) {
                return None;
            }
        }

        let outward_normal: Vec3 = (ray.at(root) - center) / self.radius;
        Some(HitRecord::new(ray, root, outward_normal, &self.material))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Color;

    fn grey() -> Arc<Material> {
        Arc::new(Material::lambertian(Color::new(0.5, 0.5, 0.5)))
    }

    fn forward() -> Interval {
        Interval::new(0.001, f64::INFINITY)
    }

    #[test]
    fn test_sphere_hit() {
        let sphere = Sphere::new(Vec3::new(0.0, 0.0, -1.0), 0.5, grey());
        let ray = Ray::new_simple(Vec3::ZERO, Vec3::new(0.0, 0.0, -1.0));

        let rec = sphere.hit(&ray, forward()).unwrap();
        assert_eq!(rec.t, 0.5);
        assert_eq!(rec.normal, Vec3::new(0.0, 0.0, 1.0));
        assert!(rec.front_face);
    }

    #[test]
    fn test_sphere_miss() {
        let sphere = Sphere::new(Vec3::new(0.0, 0.0, -1.0), 0.5, grey());
        let ray = Ray::new_simple(Vec3::ZERO, Vec3::new(0.0, 1.0, 0.0));

        assert!(sphere.hit(&ray, forward()).is_none());
    }

    #[test]
    fn test_hit_point_lies_on_surface() {
        let center = Vec3::new(1.0, -2.0, 3.0);
        let radius = 2.5;
        let sphere = Sphere::new(center, radius, grey());

        for dir in [Vec3::X, Vec3::Y, Vec3::Z, Vec3::new(1.0, 2.0, -3.0).normalize()] {
            // Start one radius outside the surface along the normal, aimed at the centre
            let origin = center + dir * (2.0 * radius);
            let ray = Ray::new_simple(origin, center - origin);

            let rec = sphere.hit(&ray, forward()).unwrap();
            assert!(((rec.p - center).length() - radius).abs() < 1e-9);
            assert!((rec.normal - dir).length() < 1e-9);
        }
    }

    #[test]
    fn test_far_root_used_from_inside() {
        let sphere = Sphere::new(Vec3::ZERO, 1.0, grey());
        let ray = Ray::new_simple(Vec3::ZERO, Vec3::X);

        let rec = sphere.hit(&ray, forward()).unwrap();
        assert!((rec.t - 1.0).abs() < 1e-12);
        assert!(!rec.front_face);
        // Normal is flipped to face the ray
        assert_eq!(rec.normal, -Vec3::X);
    }

    #[test]
    fn test_negative_radius_flips_normal() {
        let sphere = Sphere::new(Vec3::new(0.0, 0.0, -1.0), -0.4, grey());
        let ray = Ray::new_simple(Vec3::ZERO, Vec3::new(0.0, 0.0, -1.0));

        let rec = sphere.hit(&ray, forward()).unwrap();
        assert!((rec.t - 0.6).abs() < 1e-12);
        // Outward normal points into the sphere, so the ray sees a back face
        assert!(!rec.front_face);
        assert!((rec.normal - Vec3::Z).length() < 1e-12);
    }

    #[test]
    fn test_tangent_and_degenerate_rays() {
        let sphere = Sphere::new(Vec3::ZERO, 1.0, grey());

        // Grazing the surface: zero discriminant, single root
        let tangent = Ray::new_simple(Vec3::new(-5.0, 1.0, 0.0), Vec3::X);
        let rec = sphere.hit(&tangent, forward()).unwrap();
        assert!((rec.t - 5.0).abs() < 1e-9);

        // Passing just outside: negative discriminant
        let outside = Ray::new_simple(Vec3::new(-5.0, 1.0001, 0.0), Vec3::X);
        assert!(sphere.hit(&outside, forward()).is_none());
    }

    #[test]
    fn test_moving_sphere_center() {
        let sphere = Sphere::moving(
            Vec3::ZERO,
            Vec3::new(0.0, 1.0, 0.0),
            0.0,
            1.0,
            0.5,
            grey(),
        );

        assert_eq!(sphere.center(0.0), Vec3::ZERO);
        assert_eq!(sphere.center(0.5), Vec3::new(0.0, 0.5, 0.0));
        assert_eq!(sphere.center(1.0), Vec3::new(0.0, 1.0, 0.0));
    }

    #[test]
    fn test_moving_sphere_hit_depends_on_time() {
        let sphere = Sphere::moving(
            Vec3::new(0.0, 0.0, -2.0),
            Vec3::new(0.0, 3.0, -2.0),
            0.0,
            1.0,
            0.5,
            grey(),
        );

        let early = Ray::new(Vec3::ZERO, -Vec3::Z, 0.0);
        let late = Ray::new(Vec3::ZERO, -Vec3::Z, 1.0);
        assert!(sphere.hit(&early, forward()).is_some());
        assert!(sphere.hit(&late, forward()).is_none());
    }

    #[test]
    fn test_zero_length_shutter_uses_first_center() {
        let sphere = Sphere::moving(Vec3::X, Vec3::Y, 0.5, 0.5, 1.0, grey());
        assert_eq!(sphere.center(0.9), Vec3::X);
    }
}
