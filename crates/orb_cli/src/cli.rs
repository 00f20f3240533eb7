use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use log::LevelFilter;
use orb_core::{presets, SceneDescription};
use orb_renderer::RenderConfig;

/// Log levels selectable from the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Error => LevelFilter::Error,
            LogLevel::Warn => LevelFilter::Warn,
            LogLevel::Info => LevelFilter::Info,
            LogLevel::Debug => LevelFilter::Debug,
            LogLevel::Trace => LevelFilter::Trace,
        }
    }
}

/// Built-in scenes
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Preset {
    ThreeBalls,
    GlassBalls,
    LotsOfSpheres,
}

impl Preset {
    /// Build the scene description. `seed` only affects the random field.
    pub fn build(self, seed: u64) -> SceneDescription {
        match self {
            Preset::ThreeBalls => presets::three_balls(),
            Preset::GlassBalls => presets::glass_balls(),
            Preset::LotsOfSpheres => presets::lots_of_spheres(seed),
        }
    }
}

/// Command line arguments
#[derive(Debug, Parser)]
#[command(name = "orb")]
#[command(about = "Render a sphere scene with a Monte Carlo path tracer")]
pub struct Args {
    /// JSON scene description to render
    #[arg(long, conflicts_with = "preset")]
    pub scene: Option<PathBuf>,

    /// Built-in scene, used when no --scene is given
    #[arg(long, value_enum, default_value = "three-balls")]
    pub preset: Preset,

    /// Image width in pixels
    #[arg(long, default_value_t = 1280)]
    pub width: u32,

    /// Image height in pixels
    #[arg(long, default_value_t = 720)]
    pub height: u32,

    /// Number of samples per pixel
    #[arg(long, short = 's', default_value_t = 50)]
    pub samples: u32,

    /// Maximum number of bounces per path
    #[arg(long, default_value_t = 10)]
    pub max_depth: u32,

    /// Number of horizontal bands rendered in parallel
    #[arg(long, short = 'j', default_value_t = 8)]
    pub workers: usize,

    /// Base random seed; omit for a different image every run
    #[arg(long)]
    pub seed: Option<u64>,

    /// Output file path (.jpg/.jpeg for JPEG, anything else for PNG)
    #[arg(short, long, default_value = "output.jpg")]
    pub output: PathBuf,

    /// JPEG quality (1-100)
    #[arg(long, default_value_t = 90, value_parser = clap::value_parser!(u8).range(1..=100))]
    pub quality: u8,

    /// Set the logging level
    #[arg(long, value_enum, default_value = "info")]
    pub log_level: LogLevel,
}

impl Args {
    pub fn render_config(&self) -> RenderConfig {
        let config = RenderConfig::default()
            .with_resolution(self.width, self.height)
            .with_quality(self.samples, self.max_depth)
            .with_workers(self.workers);

        match self.seed {
            Some(seed) => config.with_seed(seed),
            None => config,
        }
    }
}
