//! Core path tracing renderer.
//!
//! Implements Monte Carlo path tracing with:
//! - Depth-bounded ray bouncing
//! - Anti-aliasing via jittered multi-sampling
//! - Full renders and resumable row-range (partial) renders
//!
//! Every pixel draws its samples from its own RNG seeded from the
//! renderer seed and the pixel coordinates, so a frame rendered in one
//! pass and the same frame rendered portion by portion are identical.

use std::ops::Range;
use std::sync::Arc;
use std::time::Instant;

use ghd_math::{Color, Interval, Ray};
use rand::rngs::StdRng;
use rand::{Rng, RngCore, SeedableRng};
use thiserror::Error;

use crate::image::{Image, ImageTarget};
use crate::portion::row_range;
use crate::{Camera, Hittable, Scene};

/// Seed used until the host picks another one.
pub const DEFAULT_SEED: u64 = 42;

/// Color `reset` fills the viewport with.
pub const PLACEHOLDER_COLOR: Color = Color::new(0.1, 0.1, 0.2);

/// Closest hit accepted along a bounce, to avoid self-intersection acne.
const T_MIN: f64 = 0.001;

/// Errors that can occur when starting a render.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RenderError {
    #[error("no scene bound; call set_scene first")]
    NoScene,

    #[error("viewport is empty; call on_resize with a non-zero size first")]
    EmptyViewport,
}

/// Compute the color seen by a ray.
///
/// Returns black once `depth` bounces are used up, the sky gradient when
/// the ray escapes, and otherwise the product of every attenuation along
/// the path with whatever the path finally sees.
pub fn ray_color(ray: &Ray, world: &dyn Hittable, depth: u32, rng: &mut dyn RngCore) -> Color {
    let mut throughput = Color::ONE;
    let mut ray = *ray;

    for _ in 0..depth {
        let Some(rec) = world.hit(&ray, Interval::new(T_MIN, f64::INFINITY)) else {
            return throughput * sky_gradient(&ray);
        };

        match rec.material.scatter(&ray, &rec, rng) {
            Some(scatter) => {
                throughput *= scatter.attenuation;
                ray = scatter.scattered;
            }
            // Absorbed
            None => return Color::ZERO,
        }
    }

    Color::ZERO
}

/// White at the bottom blending to sky blue at the top.
pub fn sky_gradient(ray: &Ray) -> Color {
    let unit_direction = ray.direction().normalize();
    let a = 0.5 * (unit_direction.y + 1.0);
    let white = Color::new(1.0, 1.0, 1.0);
    let blue = Color::new(0.5, 0.7, 1.0);
    white * (1.0 - a) + blue * a
}

/// Convert a linear color to a packed `A << 24 | B << 16 | G << 8 | R` pixel.
///
/// Channels are optionally gamma-2 corrected, then clamped to [0, 1].
/// Alpha is always opaque.
pub fn color_to_rgba(color: Color, gamma_correct: bool) -> u32 {
    let color = if gamma_correct {
        Color::new(
            linear_to_gamma(color.x),
            linear_to_gamma(color.y),
            linear_to_gamma(color.z),
        )
    } else {
        color
    };

    let unit = Interval::new(0.0, 1.0);
    let r = (unit.clamp(color.x) * 255.0) as u8;
    let g = (unit.clamp(color.y) * 255.0) as u8;
    let b = (unit.clamp(color.z) * 255.0) as u8;
    let a = 255u8;

    (u32::from(a) << 24) | (u32::from(b) << 16) | (u32::from(g) << 8) | u32::from(r)
}

#[inline]
fn linear_to_gamma(linear: f64) -> f64 {
    if linear > 0.0 {
        linear.sqrt()
    } else {
        0.0
    }
}

/// Per-pixel generator; identical for the same seed and coordinates.
fn pixel_rng(seed: u64, x: u32, y: u32) -> StdRng {
    let coords = (u64::from(y) << 32) | u64::from(x);
    StdRng::seed_from_u64(seed.wrapping_mul(0x9E37_79B9_7F4A_7C15) ^ coords)
}

/// Owns the output pixels and renders a bound scene into them.
pub struct Renderer<T: ImageTarget = Image> {
    target: T,
    pixels: Vec<u32>,
    scene: Option<Arc<Scene>>,
    camera: Option<Arc<Camera>>,
    seed: u64,
    gamma_correct: bool,
}

impl Renderer<Image> {
    /// Renderer drawing into an in-memory [`Image`].
    pub fn with_image() -> Self {
        Self::new(Image::default())
    }
}

impl Default for Renderer<Image> {
    fn default() -> Self {
        Self::with_image()
    }
}

impl<T: ImageTarget> Renderer<T> {
    pub fn new(target: T) -> Self {
        let pixels = vec![0; pixel_count(target.width(), target.height())];
        Self {
            target,
            pixels,
            scene: None,
            camera: None,
            seed: DEFAULT_SEED,
            gamma_correct: false,
        }
    }

    /// Match the output to the viewport size.
    ///
    /// Returns `true` if the buffer was reallocated; a call with the
    /// current size leaves the existing pixels untouched.
    pub fn on_resize(&mut self, width: u32, height: u32) -> bool {
        let count = pixel_count(width, height);
        if self.target.width() == width
            && self.target.height() == height
            && self.pixels.len() == count
        {
            return false;
        }

        log::debug!("Resizing render buffer to {}x{}", width, height);
        self.target.resize(width, height);
        self.pixels = vec![0; count];
        true
    }

    /// Bind the scene and camera to render. Both are shared, not copied.
    pub fn set_scene(&mut self, scene: Arc<Scene>, camera: Arc<Camera>) {
        log::debug!("Bound scene with {} objects", scene.len());
        self.scene = Some(scene);
        self.camera = Some(camera);
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Use a fixed seed; renders with the same seed are reproducible.
    pub fn set_seed(&mut self, seed: u64) {
        self.seed = seed;
    }

    /// Pick a fresh random seed and return it.
    pub fn reseed_from_entropy(&mut self) -> u64 {
        self.seed = rand::thread_rng().gen();
        self.seed
    }

    pub fn set_gamma_correct(&mut self, gamma_correct: bool) {
        self.gamma_correct = gamma_correct;
    }

    pub fn width(&self) -> u32 {
        self.target.width()
    }

    pub fn height(&self) -> u32 {
        self.target.height()
    }

    /// Current packed RGBA pixels, row-major, row 0 at the bottom.
    pub fn pixels(&self) -> &[u32] {
        &self.pixels
    }

    pub fn target(&self) -> &T {
        &self.target
    }

    /// Render the whole image, pushing the buffer after every row.
    pub fn render(&mut self, spp: u32, max_depth: u32) -> Result<(), RenderError> {
        let start = Instant::now();
        let (scene, camera) = self.bound()?;

        for y in 0..self.height() {
            self.trace_row(y, &scene, &camera, spp, max_depth);
            self.target.set_data(&self.pixels);
        }
        self.target.set_data(&self.pixels);

        log::info!(
            "Rendered {}x{} @ {} spp in {:?}",
            self.width(),
            self.height(),
            spp,
            start.elapsed()
        );
        Ok(())
    }

    /// Render one band of rows and push the buffer once.
    ///
    /// The band is `[portion_id * floor(height * portion), (portion_id + 1) * floor(height * portion))`,
    /// extended to the last row when `is_final` is set. Returns the rows
    /// that were rendered. Sequencing `portion_id` is the caller's job.
    pub fn partial_render(
        &mut self,
        portion: f64,
        portion_id: u32,
        is_final: bool,
        spp: u32,
        max_depth: u32,
    ) -> Result<Range<u32>, RenderError> {
        let rows = row_range(self.height(), portion, portion_id, is_final);
        log::trace!("Rendering portion {} (rows {:?})", portion_id, rows);

        self.render_rows(rows.clone(), spp, max_depth)?;
        Ok(rows)
    }

    /// Render the given rows and push the buffer once.
    ///
    /// Rows beyond the image height are ignored.
    pub fn render_rows(
        &mut self,
        rows: Range<u32>,
        spp: u32,
        max_depth: u32,
    ) -> Result<(), RenderError> {
        let (scene, camera) = self.bound()?;
        let end = rows.end.min(self.height());

        for y in rows.start..end {
            self.trace_row(y, &scene, &camera, spp, max_depth);
        }
        self.target.set_data(&self.pixels);
        Ok(())
    }

    /// Fill the viewport with the placeholder color.
    pub fn reset(&mut self) {
        let placeholder = color_to_rgba(PLACEHOLDER_COLOR, false);
        self.pixels.fill(placeholder);
        self.target.set_data(&self.pixels);
    }

    fn bound(&self) -> Result<(Arc<Scene>, Arc<Camera>), RenderError> {
        let (Some(scene), Some(camera)) = (&self.scene, &self.camera) else {
            return Err(RenderError::NoScene);
        };
        if self.pixels.is_empty() {
            return Err(RenderError::EmptyViewport);
        }
        Ok((scene.clone(), camera.clone()))
    }

    fn trace_row(&mut self, y: u32, scene: &Scene, camera: &Camera, spp: u32, max_depth: u32) {
        let width = self.width();
        let height = self.height();
        let row_start = (y as usize) * (width as usize);

        for x in 0..width {
            let mut rng = pixel_rng(self.seed, x, y);
            let color = render_pixel(scene, camera, x, y, width, height, spp, max_depth, &mut rng);
            self.pixels[row_start + x as usize] = color_to_rgba(color, self.gamma_correct);
        }
    }
}

/// Average `spp` jittered samples for pixel (x, y).
#[allow(clippy::too_many_arguments)]
fn render_pixel(
    scene: &Scene,
    camera: &Camera,
    x: u32,
    y: u32,
    width: u32,
    height: u32,
    spp: u32,
    max_depth: u32,
    rng: &mut dyn RngCore,
) -> Color {
    // Single-pixel dimensions would divide by zero
    let u_scale = f64::from(width.saturating_sub(1).max(1));
    let v_scale = f64::from(height.saturating_sub(1).max(1));

    let mut pixel_color = Color::ZERO;
    for _ in 0..spp {
        let u = (f64::from(x) + rng.gen::<f64>()) / u_scale;
        let v = (f64::from(y) + rng.gen::<f64>()) / v_scale;
        let ray = camera.get_ray(u, v, rng);
        pixel_color += ray_color(&ray, scene, max_depth, rng);
    }

    pixel_color / f64::from(spp)
}

fn pixel_count(width: u32, height: u32) -> usize {
    (width as usize) * (height as usize)
}
