use std::convert::TryFrom;
use std::num::NonZeroUsize;
use std::thread;
use std::time::Instant;

use anyhow::Context;
use clap::Parser;
use log::info;

use ray_caster::consts::DEFAULT_THREADS;
use ray_caster::scene::{ Scene, SceneJson };

mod cli;
mod logger;

use cli::Args;
use logger::init_logger;

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    init_logger(args.log_level.into());

    let mut scene_json = match &args.scene {
        Some(path) => SceneJson::load(path)
            .with_context(|| format!("failed to load scene {}", path.display()))?,
        None => SceneJson::default(),
    };
    args.apply(&mut scene_json);

    let scene = Scene::try_from(scene_json).context("invalid scene")?;

    let threads = args.threads.unwrap_or_else(|| {
        thread::available_parallelism()
            .map(NonZeroUsize::get)
            .unwrap_or(DEFAULT_THREADS)
    });

    let start = Instant::now();
    let canvas = scene.render(threads);
    info!("Rendered in {:.2?}.", start.elapsed());

    canvas.save(&args.output)
        .with_context(|| format!("failed to save {}", args.output.display()))?;

    Ok(())
}
