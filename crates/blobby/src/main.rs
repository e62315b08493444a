use std::path::PathBuf;
use std::time::Duration;

use anyhow::Context;
use blobby::{AppConfig, Simulation};
use clap::Parser;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Number of frames to simulate (overrides sim.frames)
    #[arg(long)]
    frames: Option<u32>,

    /// Seed for terrain and creature (overrides world.seed)
    #[arg(long)]
    seed: Option<u64>,

    /// Number of limbs (overrides creature.limbs)
    #[arg(long)]
    limbs: Option<usize>,

    /// Write a RON snapshot of the last frame to this path
    #[arg(long)]
    snapshot: Option<PathBuf>,

    /// Print the effective configuration and exit
    #[arg(long)]
    list_config: bool,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let mut config = AppConfig::load()?;
    if let Some(frames) = args.frames {
        config.sim.frames = frames;
    }
    if let Some(seed) = args.seed {
        config.world.seed = seed;
    }
    if let Some(limbs) = args.limbs {
        config.creature.limbs = limbs;
    }
    config
        .creature
        .validate()
        .context("Invalid creature configuration")?;

    let default_filter = if config.debug.verbose_logging {
        "debug"
    } else {
        "info"
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();

    // Handle --list-config flag
    if args.list_config {
        println!("{}", config.to_ron()?);
        return Ok(());
    }

    log::info!("Starting Blobby (seed {})", config.world.seed);
    let mut simulation = Simulation::new(&config)?;

    if config.sim.realtime {
        let frame_time = Duration::from_secs_f32(1.0 / config.sim.frame_rate);
        simulation.resume();
        for _ in 0..config.sim.frames {
            simulation.run_frame();
            std::thread::sleep(frame_time);
        }
    } else {
        simulation.run(config.sim.frames);
    }

    let stats = simulation.stats();
    let position = simulation.scene().blobby.position();
    log::info!(
        "Simulated {} frames: {} moves accepted, {} rejected, creature at ({:.1}, {:.1}, {:.1})",
        stats.frames,
        stats.accepted,
        stats.rejected,
        position.x,
        position.y,
        position.z
    );

    if let Some(path) = args.snapshot {
        simulation.snapshot().write(&path)?;
        log::info!("Wrote snapshot to {}", path.display());
    }

    Ok(())
}
