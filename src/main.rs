//! Spiral Grower
//!
//! A 3D spiral of point markers that grows one point at a time while the
//! camera pulls back to keep it in view.
//!
//! CLI commands:
//! - view: Open the live viewer window
//! - simulate: Run the growth simulation headlessly
//! - snapshot: Render the spiral at a given size to PNG
//! - show-config: Print the effective configuration

mod camera;
mod config;
mod growth;
mod logging;
mod pool;
mod scene;
mod simulation;
mod snapshot;
mod spiral;
mod viewer;

use clap::{Parser, Subcommand};
use std::io::Write;
use std::path::PathBuf;

use crate::config::SpiralConfig;
use crate::simulation::Simulation;

#[derive(Parser)]
#[command(name = "spiral_grower")]
#[command(about = "A growing 3D spiral with an auto-zooming camera")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Path to spiral.yaml config
    #[arg(short, long, default_value = "spiral.yaml")]
    config: PathBuf,
}

#[derive(Subcommand)]
enum Commands {
    /// Open the live viewer (default)
    View,

    /// Run the simulation without a window
    Simulate {
        /// Number of frames to run
        #[arg(short, long, default_value = "3600")]
        frames: u64,

        /// Synthetic frame time in milliseconds
        #[arg(long, default_value = "16.667")]
        frame_ms: f64,

        /// Print one JSON report per frame instead of a summary
        #[arg(long)]
        json: bool,
    },

    /// Render the spiral after N points to a PNG
    Snapshot {
        /// Number of points to grow before rendering
        #[arg(short, long, default_value = "500")]
        points: usize,

        /// Output PNG path
        #[arg(short, long, default_value = "spiral.png")]
        output: PathBuf,

        /// Image width and height in pixels
        #[arg(short, long, default_value = "512")]
        size: u32,

        /// Synthetic frame time used while growing
        #[arg(long, default_value = "16.667")]
        frame_ms: f64,
    },

    /// Print the effective configuration as YAML
    ShowConfig,
}

fn main() -> anyhow::Result<()> {
    let env = config::Env::load();
    logging::init_logging(&env.log_dir)?;
    tracing::info!("Spiral Grower starting up");

    let cli = Cli::parse();
    tracing::debug!("CLI args parsed: config={:?}", cli.config);

    let config = if cli.config.exists() {
        tracing::info!("Loading config from {:?}", cli.config);
        SpiralConfig::load(&cli.config)?
    } else {
        tracing::warn!("Config file not found: {:?}, using defaults", cli.config);
        SpiralConfig::default()
    };
    tracing::info!(
        "Config loaded: interval {}ms, capacity {}, zoom pacing {:?}",
        config.interval_ms,
        config.capacity,
        config.zoom_pacing
    );

    match cli.command.unwrap_or(Commands::View) {
        Commands::View => {
            viewer::run_viewer(&config)?;
        }

        Commands::Simulate {
            frames,
            frame_ms,
            json,
        } => {
            let stdout = std::io::stdout();
            simulate(&config, frames, frame_ms, json, &mut stdout.lock())?;
        }

        Commands::Snapshot {
            points,
            output,
            size,
            frame_ms,
        } => {
            snapshot::generate(&config, points, frame_ms, &output, size)?;
        }

        Commands::ShowConfig => {
            print!("{}", config_yaml(&config)?);
        }
    }

    Ok(())
}

/// Effective configuration as it would be written to spiral.yaml
fn config_yaml(config: &SpiralConfig) -> anyhow::Result<String> {
    Ok(serde_yaml::to_string(config)?)
}

/// Drive the simulation with a fixed synthetic frame time
fn simulate(
    config: &SpiralConfig,
    frames: u64,
    frame_ms: f64,
    json: bool,
    out: &mut impl Write,
) -> anyhow::Result<()> {
    let mut sim = Simulation::new(config);
    let mut commits = 0u64;
    let mut exhausted_at = None;

    for _ in 0..frames {
        let report = sim.advance(frame_ms);
        if report.committed {
            commits += 1;
        }
        if report.exhausted && exhausted_at.is_none() {
            exhausted_at = Some(report.now_ms);
        }
        if json {
            writeln!(out, "{}", serde_json::to_string(&report)?)?;
        }
    }

    if json {
        return Ok(());
    }

    let camera = sim.camera();
    writeln!(out, "Simulated {} frames ({:.1}s)", sim.frames(), sim.elapsed_ms() / 1000.0)?;
    writeln!(out, "  {}", if sim.label().is_empty() { "Points: 0" } else { sim.label() })?;
    writeln!(out, "  Commits: {}", commits)?;
    writeln!(out, "  Radius: {:.3}", sim.radius())?;
    writeln!(
        out,
        "  Camera: z={:.2} fov={:.2} near={:.2} far={:.2}",
        camera.z, camera.fov_degrees, camera.near, camera.far
    )?;
    if let Some(ms) = exhausted_at {
        writeln!(out, "  Pool full at {}ms (capacity {})", ms, sim.pool().capacity())?;
    }
    Ok(())
}
