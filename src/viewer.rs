//! Native viewer
//!
//! Opens a window filling the display, grows the spiral in real time and
//! shows the point counter in the top-left corner.

use three_d::egui;
use three_d::*;
use tracing::{debug, info, warn};

use crate::config::SpiralConfig;
use crate::scene::{self, Lights, PointMesh};
use crate::simulation::Simulation;

/// Run the viewer until the window is closed
pub fn run_viewer(config: &SpiralConfig) -> anyhow::Result<()> {
    let window = Window::new(WindowSettings {
        title: "Spiral Grower".to_string(),
        ..Default::default()
    })?;
    let context = window.gl();
    info!("Viewer window opened: {:?}", window.viewport());

    let mut sim = Simulation::new(config);
    let mut camera = scene::new_camera(window.viewport(), &sim.camera());
    let lights = Lights::new(&context);
    let mut gui = GUI::new(&context);

    // Created on the first commit; an instanced mesh needs at least one instance
    let mut points: Option<PointMesh> = None;

    window.render_loop(move |mut frame_input| {
        let report = sim.advance(frame_input.elapsed_time);

        if sim.pool_mut().take_dirty() {
            let positions = sim.pool().positions();
            match points.as_mut() {
                Some(mesh) => mesh.geometry.set_instances(&scene::point_instances(positions)),
                None => points = Some(scene::point_mesh(&context, positions)),
            }
        }
        if report.exhausted && report.frame % 600 == 0 {
            debug!(count = report.count, "Spiral complete, scene is static");
        }

        scene::apply_camera(&mut camera, &report.camera);
        camera.set_viewport(frame_input.viewport);

        let label = sim.label();
        gui.update(
            &mut frame_input.events,
            frame_input.accumulated_time,
            frame_input.viewport,
            frame_input.device_pixel_ratio,
            |gui_context| draw_overlay(gui_context, label),
        );

        let screen = frame_input.screen();
        screen.clear(ClearState::color_and_depth(0.0, 0.0, 0.0, 1.0, 1.0));

        if let Some(mesh) = &points {
            mesh.render(&camera, &lights.as_slice());
        }

        if let Err(e) = screen.write(|| gui.render()) {
            warn!("Failed to draw overlay: {}", e);
        }

        FrameOutput::default()
    });

    info!("Viewer closed");
    Ok(())
}

/// "Points: N" in white at the top-left corner
fn draw_overlay(ctx: &egui::Context, label: &str) {
    egui::Area::new(egui::Id::new("point_count"))
        .fixed_pos(egui::pos2(10.0, 10.0))
        .interactable(false)
        .show(ctx, |ui| {
            ui.label(
                egui::RichText::new(label)
                    .color(egui::Color32::WHITE)
                    .size(16.0),
            );
        });
}
