//! Simulation State - Single Source of Truth for one running spiral
//!
//! Owns the point pool, growth scheduler and camera controller.
//! Any driver (the window render loop, the headless `simulate` command,
//! tests) moves it forward with `advance(delta_ms)`; drawing is left to the caller.

use serde::Serialize;

use crate::camera::{CameraController, CameraState};
use crate::config::SpiralConfig;
use crate::growth::{GrowthOutcome, GrowthScheduler};
use crate::pool::PointPool;

/// What happened during one frame
#[derive(Debug, Clone, Copy, Serialize)]
pub struct FrameReport {
    pub frame: u64,
    pub now_ms: u64,
    pub committed: bool,
    pub exhausted: bool,
    pub zooming: bool,
    pub count: usize,
    pub radius: f64,
    pub height: f64,
    pub camera: CameraState,
}

pub struct Simulation {
    pool: PointPool,
    growth: GrowthScheduler,
    camera: CameraController,
    clock_ms: f64,
    frame: u64,
}

impl Simulation {
    pub fn new(config: &SpiralConfig) -> Self {
        Self {
            pool: PointPool::new(config.capacity),
            growth: GrowthScheduler::new(config.shape(), config.interval_ms),
            camera: CameraController::new(config.zoom()),
            clock_ms: 0.0,
            frame: 0,
        }
    }

    /// Run one frame: growth tick first, then the camera reacts to the new radius
    pub fn advance(&mut self, delta_ms: f64) -> FrameReport {
        self.clock_ms += delta_ms.max(0.0);
        let now_ms = self.clock_ms as u64;

        let outcome = self.growth.tick(now_ms, &mut self.pool);
        let radius = self.growth.spiral().radius();
        let camera = self.camera.update(radius, delta_ms);

        let report = FrameReport {
            frame: self.frame,
            now_ms,
            committed: matches!(outcome, GrowthOutcome::Committed { .. }),
            exhausted: outcome == GrowthOutcome::Exhausted,
            zooming: self.camera.is_zooming(),
            count: self.pool.count(),
            radius,
            height: self.growth.spiral().height(),
            camera,
        };
        self.frame += 1;
        report
    }

    pub fn pool(&self) -> &PointPool {
        &self.pool
    }

    /// Mutable pool access for the renderer to clear the dirty flag
    pub fn pool_mut(&mut self) -> &mut PointPool {
        &mut self.pool
    }

    pub fn camera(&self) -> CameraState {
        self.camera.state()
    }

    pub fn radius(&self) -> f64 {
        self.growth.spiral().radius()
    }

    /// Spiral steps taken; equals the committed point count
    pub fn ticks(&self) -> u64 {
        self.growth.spiral().ticks()
    }

    /// Overlay text, e.g. "Points: 42"
    pub fn label(&self) -> &str {
        self.growth.counter().text()
    }

    pub fn is_exhausted(&self) -> bool {
        self.growth.is_exhausted()
    }

    pub fn elapsed_ms(&self) -> f64 {
        self.clock_ms
    }

    pub fn frames(&self) -> u64 {
        self.frame
    }
}
