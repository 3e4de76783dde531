//! Hittable trait, HitRecord, and the scene collection.

use std::sync::Arc;

use ghd_math::{Interval, Point3, Ray, Vec3};

use crate::Material;

/// Record of a ray-object intersection.
#[derive(Debug, Clone)]
pub struct HitRecord<'a> {
    /// Point of intersection
    pub p: Point3,
    /// Surface normal at intersection (unit length, always points against the ray)
    pub normal: Vec3,
    /// Parameter t where the intersection occurs
    pub t: f64,
    /// Whether the ray hit the front face (outside) of the surface
    pub front_face: bool,
    /// Material at the intersection point
    pub material: &'a Material,
}

impl<'a> HitRecord<'a> {
    /// Build a record, orienting the normal against the incoming ray.
    ///
    /// `outward_normal` must be unit length.
    pub fn new(ray: &Ray, t: f64, outward_normal: Vec3, material: &'a Material) -> Self {
        let front_face = ray.direction().dot(outward_normal) < 0.0;
        let normal = if front_face {
            outward_normal
        } else {
            -outward_normal
        };

        Self {
            p: ray.at(t),
            normal,
            t,
            front_face,
            material,
        }
    }
}

/// Trait for objects that can be hit by rays.
pub trait Hittable: Send + Sync {
    /// Nearest intersection with `t` strictly inside `ray_t`, if any.
    fn hit(&self, ray: &Ray, ray_t: Interval) -> Option<HitRecord<'_>>;
}

/// An insertion-ordered collection of shared hittable objects.
///
/// Intersection is a linear scan that keeps the closest hit.
#[derive(Clone, Default)]
pub struct Scene {
    objects: Vec<Arc<dyn Hittable>>,
}

impl Scene {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an object to the scene.
    pub fn add(&mut self, object: Arc<dyn Hittable>) {
        self.objects.push(object);
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }
}

impl Hittable for Scene {
    fn hit(&self, ray: &Ray, ray_t: Interval) -> Option<HitRecord<'_>> {
        let mut closest: Option<HitRecord<'_>> = None;

        for object in &self.objects {
            let max = closest.as_ref().map_or(ray_t.max, |rec| rec.t);
            if let Some(rec) = object.hit(ray, ray_t.with_max(max)) {
                closest = Some(rec);
            }
        }

        closest
    }
}

impl std::fmt::Debug for Scene {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Scene")
            .field("objects", &self.objects.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Color, Sphere};

    fn sphere(z: f64, radius: f64, material: &Arc<Material>) -> Arc<dyn Hittable> {
        Arc::new(Sphere::new(Vec3::new(0.0, 0.0, z), radius, material.clone()))
    }

    #[test]
    fn test_empty_scene_misses() {
        let scene = Scene::new();
        let ray = Ray::new_simple(Vec3::ZERO, -Vec3::Z);
        assert!(scene.is_empty());
        assert!(scene.hit(&ray, Interval::new(0.001, f64::INFINITY)).is_none());
    }

    #[test]
    fn test_nearest_hit_wins_regardless_of_order() {
        let near = Arc::new(Material::lambertian(Color::new(1.0, 0.0, 0.0)));
        let far = Arc::new(Material::lambertian(Color::new(0.0, 0.0, 1.0)));

        let mut scene = Scene::new();
        scene.add(sphere(-10.0, 1.0, &far));
        scene.add(sphere(-3.0, 1.0, &near));
        scene.add(sphere(-20.0, 1.0, &far));
        assert_eq!(scene.len(), 3);

        let ray = Ray::new_simple(Vec3::ZERO, -Vec3::Z);
        let rec = scene.hit(&ray, Interval::new(0.001, f64::INFINITY)).unwrap();

        assert!((rec.t - 2.0).abs() < 1e-12);
        assert_eq!(*rec.material, *near);
    }

    #[test]
    fn test_interval_limits_hits() {
        let material = Arc::new(Material::lambertian(Color::ONE));
        let mut scene = Scene::new();
        scene.add(sphere(-3.0, 1.0, &material));

        let ray = Ray::new_simple(Vec3::ZERO, -Vec3::Z);
        assert!(scene.hit(&ray, Interval::new(0.001, 1.5)).is_none());
    }

    #[test]
    fn test_face_normal_orientation() {
        let material = Material::lambertian(Color::ONE);
        let ray = Ray::new_simple(Vec3::ZERO, -Vec3::Z);

        let outside = HitRecord::new(&ray, 1.0, Vec3::Z, &material);
        assert!(outside.front_face);
        assert_eq!(outside.normal, Vec3::Z);

        let inside = HitRecord::new(&ray, 1.0, -Vec3::Z, &material);
        assert!(!inside.front_face);
        assert_eq!(inside.normal, Vec3::Z);
        assert_eq!(inside.p, Vec3::new(0.0, 0.0, -1.0));
    }
}
