mod cli;
mod output;

use std::time::Instant;

use anyhow::{Context, Result};
use clap::Parser;
use orb_renderer::{render, Scene};

use cli::Args;

fn main() -> Result<()> {
    let args = Args::parse();

    env_logger::Builder::from_default_env()
        .filter_level(args.log_level.into())
        .init();

    log::info!("Starting Orb");

    let config = args.render_config();
    config.validate().context("Invalid render settings")?;

    let description = match &args.scene {
        Some(path) => orb_core::load_scene(path)
            .with_context(|| format!("Failed to load scene {}", path.display()))?,
        None => {
            log::info!("Using preset {:?}", args.preset);
            args.preset.build(config.seed.unwrap_or_default())
        }
    };

    let scene = Scene::from_description(&description, config.aspect_ratio())
        .context("Failed to build scene")?;

    let start = Instant::now();
    let framebuffer = render(&scene, &config).context("Render failed")?;
    log::info!("Total render time: {:?}", start.elapsed());

    output::save_image(&framebuffer, &args.output, args.quality)?;

    Ok(())
}
