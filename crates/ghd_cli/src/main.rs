//! `ghd` - render a scene preset to a PPM or PNG image.
//!
//! Progress is printed to stderr one scanline (or one portion) at a time;
//! the image goes to `--output` or, as PPM text, to stdout.

mod ppm;
mod progress;

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use ghd_renderer::scenes::from_sphere_list;
use ghd_renderer::{Color, Material, RenderSchedule, RenderSettings, Renderer, Scene, ScenePreset};
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::ppm::write_ppm;
use crate::progress::Progress;

/// GHD path tracer
#[derive(Parser, Debug)]
#[command(
    name = "ghd",
    version,
    about = "Render a path traced scene to a PPM or PNG image",
    after_help = "EXAMPLES:\n  \
                  ghd --scene three-spheres --width 400 --height 225 > out.ppm\n  \
                  ghd --scene random-spheres --spp 50 --depth 20 --output final.png\n  \
                  ghd --config settings.json --seed 7"
)]
struct Cli {
    /// JSON settings file; flags below override its values
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Scene preset to render
    #[arg(short, long, value_enum)]
    scene: Option<CliScene>,

    /// Image width in pixels
    #[arg(short = 'W', long)]
    width: Option<u32>,

    /// Image height in pixels
    #[arg(short = 'H', long)]
    height: Option<u32>,

    /// Samples per pixel (1-100)
    #[arg(long)]
    spp: Option<u32>,

    /// Maximum ray bounce depth (1-100)
    #[arg(long)]
    depth: Option<u32>,

    /// Random seed; the same seed renders the same image
    #[arg(long)]
    seed: Option<u64>,

    /// Render in this many row bands instead of one scanline at a time (overrides the config)
    #[arg(long)]
    portions: Option<u32>,

    /// Replace the preset's objects with spheres read from an `x, y, z, R` file
    #[arg(long, value_name = "FILE")]
    spheres: Option<PathBuf>,

    /// Apply gamma 2 correction before quantizing
    #[arg(long)]
    gamma: bool,

    /// Output file. `.png` writes PNG, anything else PPM. Defaults to PPM on stdout.
    #[arg(short, long)]
    output: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, clap::ValueEnum)]
enum CliScene {
    Empty,
    ThreeSpheres,
    MotionBlur,
    RandomSpheres,
}

impl From<CliScene> for ScenePreset {
    fn from(scene: CliScene) -> Self {
        match scene {
            CliScene::Empty => ScenePreset::Empty,
            CliScene::ThreeSpheres => ScenePreset::ThreeSpheres,
            CliScene::MotionBlur => ScenePreset::MotionBlur,
            CliScene::RandomSpheres => ScenePreset::RandomSpheres,
        }
    }
}

/// How the image is split across `Renderer` calls.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RenderMode {
    /// One scanline per call, top row first
    Scanlines,
    /// `n` row bands driven by a `RenderSchedule`
    Portions(u32),
}

impl RenderMode {
    fn from_settings(settings: &RenderSettings) -> Self {
        match settings.portions {
            Some(portions) => RenderMode::Portions(portions),
            None => RenderMode::Scanlines,
        }
    }
}

impl Cli {
    /// Settings from the config file (or defaults) with flags applied on top.
    fn settings(&self) -> Result<RenderSettings> {
        let mut settings = match &self.config {
            Some(path) => RenderSettings::load(path)
                .with_context(|| format!("Failed to load settings from {}", path.display()))?,
            None => RenderSettings::default(),
        };

        if let Some(scene) = self.scene {
            settings.scene = scene.into();
        }
        if let Some(width) = self.width {
            settings.width = width;
        }
        if let Some(height) = self.height {
            settings.height = height;
        }
        if let Some(spp) = self.spp {
            settings.samples_per_pixel = spp;
        }
        if let Some(depth) = self.depth {
            settings.max_depth = depth;
        }
        if let Some(portions) = self.portions {
            settings.portions = Some(portions);
        }
        if self.seed.is_some() {
            settings.seed = self.seed;
        }
        settings.gamma_correct |= self.gamma;

        settings.validate().context("Invalid render settings")?;
        Ok(settings)
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    let cli = Cli::parse();
    let settings = cli.settings()?;

    let mut renderer = Renderer::with_image();
    renderer.set_gamma_correct(settings.gamma_correct);
    let seed = match settings.seed {
        Some(seed) => {
            renderer.set_seed(seed);
            seed
        }
        None => renderer.reseed_from_entropy(),
    };

    // Scene generation gets its own stream so it never shifts pixel sampling
    let scene = match &cli.spheres {
        Some(path) => load_sphere_list(path)?,
        None => settings.scene.build(&mut StdRng::seed_from_u64(seed)),
    };
    let camera = settings.camera_settings().build(settings.aspect_ratio());
    renderer.on_resize(settings.width, settings.height);
    renderer.set_scene(Arc::new(scene), Arc::new(camera));

    log::info!(
        "Rendering {} at {}x{} @ {} spp, depth {}, seed {}",
        settings.scene.name(),
        settings.width,
        settings.height,
        settings.samples_per_pixel,
        settings.max_depth,
        seed
    );

    match RenderMode::from_settings(&settings) {
        RenderMode::Scanlines => render_scanlines(&mut renderer, &settings)?,
        RenderMode::Portions(portions) => render_portions(&mut renderer, &settings, portions)?,
    }

    match &cli.output {
        Some(path) => save(path, &renderer)?,
        None => {
            let stdout = io::stdout();
            let mut out = BufWriter::new(stdout.lock());
            write_ppm(&mut out, renderer.width(), renderer.height(), renderer.pixels())
                .context("Failed to write PPM to stdout")?;
            out.flush()?;
        }
    }

    Ok(())
}

/// Top row first, matching the order the image is written in.
fn render_scanlines(renderer: &mut Renderer, settings: &RenderSettings) -> Result<()> {
    let mut progress = Progress::new(settings.height);
    for y in (0..settings.height).rev() {
        eprint!("\r{} ", progress.status());
        renderer.render_rows(y..y + 1, settings.samples_per_pixel, settings.max_depth)?;
        progress.row_done();
    }
    eprintln!("\r{} ", progress.status());
    log::info!("Done in {:.2?}", progress.elapsed());
    Ok(())
}

fn render_portions(renderer: &mut Renderer, settings: &RenderSettings, portions: u32) -> Result<()> {
    let mut schedule = RenderSchedule::new(portions);
    schedule.start();

    let mut progress = Progress::new(settings.height);
    while schedule.is_rendering() {
        let status = schedule.progress();
        let Some(portion) = schedule.next_portion() else {
            break;
        };
        let rows = renderer.partial_render(
            portion.fraction,
            portion.id,
            portion.is_final,
            settings.samples_per_pixel,
            settings.max_depth,
        )?;
        for _ in rows {
            progress.row_done();
        }
        eprint!("\r{}, {} ", status, progress.status());
    }
    eprintln!();
    log::info!("Done in {:.2?}", progress.elapsed());
    Ok(())
}

fn load_sphere_list(path: &Path) -> Result<Scene> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let material = Arc::new(Material::lambertian(Color::new(0.5, 0.5, 0.5)));
    let scene = from_sphere_list(&text, material)
        .with_context(|| format!("Failed to parse {}", path.display()))?;
    log::info!("Loaded {} spheres from {}", scene.len(), path.display());
    Ok(scene)
}

fn save(path: &Path, renderer: &Renderer) -> Result<()> {
    let is_png = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("png"));

    if is_png {
        let bytes = renderer.target().to_top_down_rgba8();
        image::save_buffer(
            path,
            &bytes,
            renderer.width(),
            renderer.height(),
            image::ColorType::Rgba8,
        )
        .with_context(|| format!("Failed to save {}", path.display()))?;
    } else {
        let file = File::create(path)
            .with_context(|| format!("Failed to create {}", path.display()))?;
        let mut out = BufWriter::new(file);
        write_ppm(&mut out, renderer.width(), renderer.height(), renderer.pixels())
            .with_context(|| format!("Failed to write {}", path.display()))?;
        out.flush()?;
    }

    log::info!("Saved to {}", path.display());
    Ok(())
}
