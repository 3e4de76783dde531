//! GHD path tracer.
//!
//! A Monte Carlo path tracer over spheres with diffuse, metal and glass
//! materials. The [`Renderer`] writes packed RGBA pixels into an
//! [`ImageTarget`] either in one pass or in row-range portions, so a host
//! event loop can spread a render across frames.
//!
//! All work runs on the caller's thread.

mod camera;
mod hittable;
mod image;
mod material;
pub mod portion;
mod renderer;
pub mod scenes;
mod settings;
mod sphere;

pub use camera::{Camera, CameraSettings};
pub use hittable::{HitRecord, Hittable, Scene};
pub use image::{Image, ImageTarget};
pub use material::{Dielectric, Lambertian, Material, Metal, Scatter};
pub use portion::{Portion, RenderSchedule};
pub use renderer::{
    color_to_rgba, ray_color, sky_gradient, RenderError, Renderer, DEFAULT_SEED, PLACEHOLDER_COLOR,
};
pub use scenes::{SceneError, ScenePreset};
pub use settings::{RenderSettings, SettingsError};
pub use sphere::Sphere;

/// Re-export the math types used throughout the public API.
pub use ghd_math::{Color, Interval, Point3, Ray, Vec3};
