//! Example scenes and sphere-list import.

use std::sync::Arc;

use ghd_math::{random_double, random_range, Color, Point3, Vec3};
use rand::RngCore;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{CameraSettings, Material, Scene, Sphere};

/// Errors that can occur while building a scene from text.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SceneError {
    #[error("line {line}: {message}")]
    Parse { line: usize, message: String },
}

/// The predefined scenes a host can pick from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ScenePreset {
    /// Sky only
    Empty,
    /// Ground, diffuse centre, hollow glass and fuzzy metal spheres
    ThreeSpheres,
    /// Three spheres with the centre one moving during the shutter
    #[default]
    MotionBlur,
    /// Large field of small random spheres around three big ones
    RandomSpheres,
}

impl ScenePreset {
    pub const ALL: [ScenePreset; 4] = [
        ScenePreset::Empty,
        ScenePreset::ThreeSpheres,
        ScenePreset::MotionBlur,
        ScenePreset::RandomSpheres,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            ScenePreset::Empty => "empty",
            ScenePreset::ThreeSpheres => "three-spheres",
            ScenePreset::MotionBlur => "motion-blur",
            ScenePreset::RandomSpheres => "random-spheres",
        }
    }

    /// Build the scene. Only `RandomSpheres` draws from `rng`.
    pub fn build(&self, rng: &mut dyn RngCore) -> Scene {
        let scene = match self {
            ScenePreset::Empty => Scene::new(),
            ScenePreset::ThreeSpheres => three_spheres(),
            ScenePreset::MotionBlur => three_spheres_motion_blur(),
            ScenePreset::RandomSpheres => random_spheres(rng),
        };
        log::debug!("Built {} scene with {} objects", self.name(), scene.len());
        scene
    }

    /// The camera this scene is meant to be viewed with.
    ///
    /// Both far presets look at the origin from (13, 2, 3) with the shutter
    /// open over [0, 1]. Motion blur frames tighter (vfov 19, focus 12);
    /// the random field keeps the wider vfov 20 with focus 10.
    pub fn camera_settings(&self) -> CameraSettings {
        let far = CameraSettings::default()
            .with_position(Vec3::new(13.0, 2.0, 3.0), Vec3::ZERO, Vec3::Y)
            .with_shutter(0.0, 1.0);

        match self {
            ScenePreset::Empty | ScenePreset::ThreeSpheres => CameraSettings::default(),
            ScenePreset::MotionBlur => far.with_lens(19.0, 0.1, 12.0),
            ScenePreset::RandomSpheres => far.with_lens(20.0, 0.1, 10.0),
        }
    }
}

fn ground() -> Arc<Material> {
    Arc::new(Material::lambertian(Color::new(0.5, 0.5, 0.5)))
}

/// The classic three-sphere test scene, viewed from the origin looking down -z.
pub fn three_spheres() -> Scene {
    let material_ground = Arc::new(Material::lambertian(Color::new(0.8, 0.8, 0.0)));
    let material_center = Arc::new(Material::lambertian(Color::new(0.1, 0.2, 0.5)));
    let material_left = Arc::new(Material::dielectric(1.5));
    let material_right = Arc::new(Material::metal(Color::new(0.8, 0.6, 0.2), 0.0));

    let mut scene = Scene::new();
    scene.add(Arc::new(Sphere::new(Vec3::new(0.0, -100.5, -1.0), 100.0, material_ground)));
    scene.add(Arc::new(Sphere::new(Vec3::new(0.0, 0.0, -1.0), 0.5, material_center)));
    // Glass shell: outer surface plus an inward-facing inner surface
    scene.add(Arc::new(Sphere::new(Vec3::new(-1.0, 0.0, -1.0), 0.5, material_left.clone())));
    scene.add(Arc::new(Sphere::new(Vec3::new(-1.0, 0.0, -1.0), -0.45, material_left)));
    scene.add(Arc::new(Sphere::new(Vec3::new(1.0, 0.0, -1.0), 0.5, material_right)));
    scene
}

/// Three large spheres on a ground plane; the diffuse one bounces up
/// while the shutter is open.
pub fn three_spheres_motion_blur() -> Scene {
    let mut scene = Scene::new();
    scene.add(Arc::new(Sphere::new(Vec3::new(0.0, -1000.0, 0.0), 1000.0, ground())));

    let glass = Arc::new(Material::dielectric(1.5));
    scene.add(Arc::new(Sphere::new(Vec3::new(4.0, 1.0, 0.0), 1.0, glass)));

    let diffuse = Arc::new(Material::lambertian(Color::new(0.4, 0.2, 0.1)));
    scene.add(Arc::new(Sphere::moving(
        Vec3::new(0.0, 1.0, 0.0),
        Vec3::new(0.0, 1.5, 0.0),
        0.0,
        1.0,
        1.0,
        diffuse,
    )));

    let metal = Arc::new(Material::metal(Color::new(0.7, 0.6, 0.5), 0.0));
    scene.add(Arc::new(Sphere::new(Vec3::new(-4.0, 1.0, 0.0), 1.0, metal)));
    scene
}

/// The final scene: a grid of small random spheres around three big ones.
pub fn random_spheres(rng: &mut dyn RngCore) -> Scene {
    let mut scene = Scene::new();
    scene.add(Arc::new(Sphere::new(Vec3::new(0.0, -1000.0, 0.0), 1000.0, ground())));

    for a in -11..11 {
        for b in -11..11 {
            let choose_mat = random_double(rng);
            let center = Vec3::new(
                f64::from(a) + 0.9 * random_double(rng),
                0.2,
                f64::from(b) + 0.9 * random_double(rng),
            );

            if (center - Vec3::new(4.0, 0.2, 0.0)).length() <= 0.9 {
                continue;
            }

            if choose_mat < 0.8 {
                // Diffuse, bouncing upward over the shutter
                let albedo = random_color(rng, 0.0, 1.0) * random_color(rng, 0.0, 1.0);
                let center1 = center + Vec3::new(0.0, random_range(rng, 0.0, 0.5), 0.0);
                let material = Arc::new(Material::lambertian(albedo));
                scene.add(Arc::new(Sphere::moving(center, center1, 0.0, 1.0, 0.2, material)));
            } else if choose_mat < 0.95 {
                let albedo = random_color(rng, 0.5, 1.0);
                let fuzz = random_range(rng, 0.0, 0.5);
                let material = Arc::new(Material::metal(albedo, fuzz));
                scene.add(Arc::new(Sphere::new(center, 0.2, material)));
            } else {
                let material = Arc::new(Material::dielectric(1.5));
                scene.add(Arc::new(Sphere::new(center, 0.2, material)));
            }
        }
    }

    let glass = Arc::new(Material::dielectric(1.5));
    scene.add(Arc::new(Sphere::new(Vec3::new(0.0, 1.0, 0.0), 1.0, glass)));

    let diffuse = Arc::new(Material::lambertian(Color::new(0.4, 0.2, 0.1)));
    scene.add(Arc::new(Sphere::new(Vec3::new(-4.0, 1.0, 0.0), 1.0, diffuse)));

    let metal = Arc::new(Material::metal(Color::new(0.7, 0.6, 0.5), 0.0));
    scene.add(Arc::new(Sphere::new(Vec3::new(4.0, 1.0, 0.0), 1.0, metal)));

    scene
}

fn random_color(rng: &mut dyn RngCore, min: f64, max: f64) -> Color {
    Color::new(
        random_range(rng, min, max),
        random_range(rng, min, max),
        random_range(rng, min, max),
    )
}

/// Build spheres from `x, y, z, R` lines, one sphere per line.
///
/// Blank lines and the `x, y, z, R` header are skipped. Every sphere
/// shares `material`.
pub fn from_sphere_list(text: &str, material: Arc<Material>) -> Result<Scene, SceneError> {
    let mut scene = Scene::new();

    for (index, line) in text.lines().enumerate() {
        let line_no = index + 1;
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }

        let fields: Vec<&str> = trimmed.split(',').map(str::trim).collect();
        if fields.len() != 4 {
            return Err(SceneError::Parse {
                line: line_no,
                message: format!("expected 4 comma-separated values, found {}", fields.len()),
            });
        }

        if fields.iter().all(|f| f.parse::<f64>().is_err()) {
            log::warn!("Skipping sphere list header on line {}: {:?}", line_no, trimmed);
            continue;
        }

        let mut values = [0.0; 4];
        for (value, field) in values.iter_mut().zip(&fields) {
            *value = field.parse().map_err(|_| SceneError::Parse {
                line: line_no,
                message: format!("invalid number {:?}", field),
            })?;
        }

        let [x, y, z, radius] = values;
        let center: Point3 = Vec3::new(x, y, z);
        scene.add(Arc::new(Sphere::new(center, radius, material.clone())));
    }

    Ok(scene)
}
