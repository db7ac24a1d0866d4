//! Snapshot Renderer
//!
//! Opens a small three-d window, grows the spiral to the requested size with
//! a synthetic clock, renders one frame, captures the pixels and saves a PNG
//! next to a JSON sidecar.

use std::path::{Path, PathBuf};
use three_d::*;
use tracing::{info, warn};

use crate::config::SpiralConfig;
use crate::scene::{self, Lights};
use crate::simulation::Simulation;

/// Frames simulated per commit are bounded so an unreachable target cannot spin forever
const MAX_FRAMES_PER_POINT: u64 = 1_000;

/// Grow the spiral headlessly until `points` are committed or the pool is full
pub fn grow(config: &SpiralConfig, points: usize, frame_ms: f64) -> Simulation {
    let mut sim = Simulation::new(config);
    let points = points.min(config.capacity);
    let max_frames = (points as u64)
        .saturating_add(1)
        .saturating_mul(MAX_FRAMES_PER_POINT);

    while sim.pool().count() < points && !sim.is_exhausted() && sim.frames() < max_frames {
        sim.advance(frame_ms);
    }
    sim
}

/// Render the spiral after `points` commits into `output`
pub fn generate(
    config: &SpiralConfig,
    points: usize,
    frame_ms: f64,
    output: &Path,
    size: u32,
) -> anyhow::Result<()> {
    if let Some(parent) = output.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }

    let sim = grow(config, points, frame_ms);
    let state = sim.camera();
    info!(
        count = sim.pool().count(),
        frames = sim.frames(),
        z = state.z,
        fov = state.fov_degrees,
        "Spiral grown for snapshot"
    );
    if sim.pool().count() < points {
        warn!(
            "Requested {} points but pool stopped at {}",
            points,
            sim.pool().count()
        );
    }

    let window = Window::new(WindowSettings {
        title: "Spiral Grower - Snapshot".to_string(),
        max_size: Some((size, size)),
        min_size: (size, size),
        ..Default::default()
    })?;
    let context = window.gl();

    let mut camera = scene::new_camera(window.viewport(), &state);
    let lights = Lights::new(&context);
    let mesh = (sim.pool().count() > 0).then(|| scene::point_mesh(&context, sim.pool().positions()));

    let output = output.to_path_buf();
    let mut done = false;

    window.render_loop(move |frame_input| {
        if done {
            return FrameOutput {
                exit: true,
                ..Default::default()
            };
        }

        camera.set_viewport(frame_input.viewport);
        frame_input
            .screen()
            .clear(ClearState::color_and_depth(0.0, 0.0, 0.0, 1.0, 1.0));

        if let Some(mesh) = &mesh {
            mesh.render(&camera, &lights.as_slice());
        }

        let vp = frame_input.viewport;
        let pixels: Vec<[u8; 4]> = frame_input.screen().read_color();
        let flat: Vec<u8> = pixels.iter().flat_map(|p| p.iter().copied()).collect();

        match image::RgbaImage::from_raw(vp.width, vp.height, flat) {
            Some(img) => match img.save(&output) {
                Ok(()) => {
                    info!("Saved {}", output.display());
                    if let Err(e) = write_sidecar(&output, &sim) {
                        warn!("Failed to write snapshot metadata: {}", e);
                    }
                    println!("Saved {} ({} points)", output.display(), sim.pool().count());
                }
                Err(e) => warn!("Failed to save {}: {}", output.display(), e),
            },
            None => warn!("Captured buffer does not match viewport {}x{}", vp.width, vp.height),
        }

        done = true;
        FrameOutput {
            exit: true,
            ..Default::default()
        }
    });

    Ok(())
}

/// spiral.png -> spiral.json
fn sidecar_path(output: &Path) -> PathBuf {
    output.with_extension("json")
}

fn write_sidecar(output: &Path, sim: &Simulation) -> anyhow::Result<()> {
    let data = serde_json::json!({
        "generated": chrono::Local::now().to_rfc3339(),
        "image": output.file_name().map(|n| n.to_string_lossy().to_string()),
        "points": sim.pool().count(),
        "ticks": sim.ticks(),
        "radius": sim.radius(),
        "elapsed_ms": sim.elapsed_ms(),
        "frames": sim.frames(),
        "camera": sim.camera(),
    });

    let path = sidecar_path(output);
    std::fs::write(&path, serde_json::to_string_pretty(&data)?)?;
    info!("Wrote {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grow_reaches_target() {
        let sim = grow(&SpiralConfig::default(), 120, 16.0);
        assert_eq!(sim.pool().count(), 120);
        assert!(sim.camera().z > 10.0);
    }

    #[test]
    fn test_grow_stops_at_capacity() {
        let config = SpiralConfig {
            capacity: 10,
            ..Default::default()
        };
        let sim = grow(&config, 50, 16.0);
        assert_eq!(sim.pool().count(), 10);
        // Target is clamped to capacity, so growth stops before hitting the limit
        assert!(!sim.is_exhausted());
    }

    #[test]
    fn test_grow_huge_target_is_bounded_by_capacity() {
        let config = SpiralConfig {
            capacity: 5,
            ..Default::default()
        };
        let sim = grow(&config, usize::MAX, 16.0);
        assert_eq!(sim.pool().count(), 5);
        assert_eq!(sim.ticks(), 5);
    }

    #[test]
    fn test_grow_zero_points() {
        let sim = grow(&SpiralConfig::default(), 0, 16.0);
        assert_eq!(sim.pool().count(), 0);
        assert_eq!(sim.frames(), 0);
    }

    #[test]
    fn test_sidecar_path() {
        assert_eq!(
            sidecar_path(Path::new("out/spiral.png")),
            PathBuf::from("out/spiral.json")
        );
    }
}
