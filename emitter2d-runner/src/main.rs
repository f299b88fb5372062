//! emitter2d runner
//!
//! Loads an emitter config from JSON (or a built-in preset) and steps it
//! headlessly, logging pool statistics as it goes.
//!
//! Usage: `emitter2d-runner [config.json] [--preset fire] [--frames 600]`

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::Parser;
use emitter2d::bytemuck;
use emitter2d::prelude::*;
use glam::Vec2;

#[derive(Parser)]
#[command(name = "emitter2d-runner")]
#[command(about = "Step a 2D particle emitter without a window", long_about = None)]
#[command(version)]
struct Cli {
    /// Emitter config file (JSON)
    config: Option<PathBuf>,

    /// Built-in preset to use instead of a config file
    #[arg(short, long, conflicts_with = "config")]
    preset: Option<String>,

    /// Seconds per frame
    #[arg(long, default_value_t = 1.0 / 60.0)]
    dt: f32,

    /// Number of frames to run
    #[arg(short, long, default_value_t = 600)]
    frames: u32,

    /// Seed for reproducible runs
    #[arg(short, long)]
    seed: Option<u64>,

    /// Speed multiplier applied to every frame
    #[arg(long, default_value_t = 1.0)]
    speed: f32,

    /// After the run, stop emitting and step until every particle has died
    #[arg(long)]
    until_complete: bool,

    /// Write the effective config as JSON and exit
    #[arg(long, value_name = "PATH")]
    write_config: Option<PathBuf>,

    /// Log statistics every N frames (0 disables)
    #[arg(long, default_value_t = 60)]
    report_every: u32,
}

fn load_config(cli: &Cli) -> Result<EmitterConfig> {
    if let Some(name) = &cli.preset {
        return match presets::by_name(name) {
            Some(config) => Ok(config),
            None => bail!(
                "unknown preset '{name}', expected one of: {}",
                presets::NAMES.join(", ")
            ),
        };
    }
    match &cli.config {
        Some(path) => EmitterConfig::load(path)
            .with_context(|| format!("failed to load emitter config {}", path.display())),
        None => {
            log::info!("no config given, using the fire preset");
            Ok(presets::fire())
        }
    }
}

/// Mean speed of gravity particles, or mean orbit radius of radial ones.
fn mean_motion(sim: &ParticleSimulator) -> f32 {
    let (sum, count) = sim
        .alive_particles()
        .filter_map(|p| p.velocity().map(|v| v.length()).or_else(|| p.radius()))
        .fold((0.0, 0u32), |(sum, count), m| (sum + m, count + 1));
    if count > 0 {
        sum / count as f32
    } else {
        0.0
    }
}

fn report(frame: u32, sim: &ParticleSimulator, instances: &[ParticleInstance]) {
    let bytes: &[u8] = bytemuck::cast_slice(instances);
    let motion = match sim.config().emitter_type {
        EmitterType::Gravity => "speed",
        EmitterType::Radial => "radius",
    };
    log::info!(
        "frame {frame:>5} | t={:>7.3}s | alive {:>5}/{} | {:?} | mean {motion} {:>7.2} | {} instance bytes",
        sim.elapsed_time(),
        sim.alive_count(),
        sim.capacity(),
        sim.state(),
        mean_motion(sim),
        bytes.len()
    );
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    if !(cli.dt > 0.0) {
        bail!("--dt must be positive, got {}", cli.dt);
    }

    let config = load_config(&cli)?;

    if let Some(path) = &cli.write_config {
        config
            .save(path)
            .with_context(|| format!("failed to write config to {}", path.display()))?;
        log::info!("wrote config to {}", path.display());
        return Ok(());
    }

    log::info!(
        "{:?} emitter: {} slots, {:.1} particles/s, duration {}",
        config.emitter_type,
        config.capacity(),
        config.emission_rate(),
        if config.is_infinite() {
            "infinite".to_string()
        } else {
            format!("{}s", config.duration)
        }
    );
    log::debug!("blend state: {:?}", config.blend_state());

    let mut sim = match cli.seed {
        Some(seed) => ParticleSimulator::with_seed(config, Vec2::ZERO, seed),
        None => ParticleSimulator::new(config, Vec2::ZERO),
    };

    let mut time = Time::fixed(cli.dt);
    time.set_time_scale(cli.speed);

    let mut instances = Vec::with_capacity(sim.capacity());
    let mut peak = 0;
    for frame in 1..=cli.frames {
        sim.simulate(time.tick());
        peak = peak.max(sim.alive_count());
        if cli.report_every > 0 && frame % cli.report_every == 0 {
            sim.write_instances(&mut instances);
            report(frame, &sim, &instances);
        }
    }

    let mut drain_frames = None;
    if cli.until_complete {
        // Generous cap: a minute of frames past the longest possible life.
        let longest = sim.config().life_span + sim.config().lifespan_variance.abs();
        let step = cli.dt * time.time_scale();
        let max_frames = if step > 0.0 {
            ((longest / step).ceil() as u32).saturating_add(3600)
        } else {
            0
        };
        drain_frames = sim.simulate_until_complete(step, max_frames);
        match drain_frames {
            Some(frames) => log::info!("all particles dead after {frames} more frames"),
            None => log::warn!("particles still alive after {max_frames} drain frames"),
        }
    }

    let summary = serde_json::json!({
        "frames": time.frame(),
        "elapsed": sim.elapsed_time(),
        "alive": sim.alive_count(),
        "peak": peak,
        "state": format!("{:?}", sim.state()),
        "drainFrames": drain_frames,
    });
    println!("{summary}");
    Ok(())
}
