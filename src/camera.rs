//! Camera Controller
//!
//! Pulls the camera back as the spiral widens. Once the cumulative radius
//! passes the zoom threshold the camera moves away along +Z, the field of
//! view narrows towards a floor, and the clip planes follow the distance.
//! The zoom is one-directional: FOV never widens again within a run.

use serde::{Deserialize, Serialize};
use tracing::info;

pub const ZOOM_START_THRESHOLD: f32 = 0.3;
pub const ZOOM_SPEED: f32 = 0.05;
pub const CAMERA_Z_BASE: f32 = 10.0;
pub const MIN_FOV_DEGREES: f32 = 25.0;
pub const INITIAL_FOV_DEGREES: f32 = 75.0;
pub const INITIAL_NEAR: f32 = 0.1;
pub const INITIAL_FAR: f32 = 10_000.0;

/// How the FOV decrement relates to elapsed time
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum ZoomPacing {
    /// Fixed decrement per frame; zoom rate follows the display refresh rate
    #[default]
    PerFrame,
    /// Decrement scaled by frame time, equal to `PerFrame` at `reference_fps`
    TimeScaled { reference_fps: f32 },
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ZoomParams {
    pub start_threshold: f32,
    pub speed: f32,
    pub z_base: f32,
    pub min_fov_degrees: f32,
    pub initial_fov_degrees: f32,
    pub pacing: ZoomPacing,
}

impl Default for ZoomParams {
    fn default() -> Self {
        Self {
            start_threshold: ZOOM_START_THRESHOLD,
            speed: ZOOM_SPEED,
            z_base: CAMERA_Z_BASE,
            min_fov_degrees: MIN_FOV_DEGREES,
            initial_fov_degrees: INITIAL_FOV_DEGREES,
            pacing: ZoomPacing::PerFrame,
        }
    }
}

/// Camera parameters the renderer applies each frame.
/// The camera sits on the Z axis and looks at the origin.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CameraState {
    pub z: f32,
    pub fov_degrees: f32,
    pub near: f32,
    pub far: f32,
}

impl CameraState {
    pub fn base(params: &ZoomParams) -> Self {
        Self {
            z: params.z_base,
            fov_degrees: params.initial_fov_degrees,
            near: INITIAL_NEAR,
            far: INITIAL_FAR,
        }
    }
}

#[derive(Debug, Clone)]
pub struct CameraController {
    params: ZoomParams,
    state: CameraState,
    zooming: bool,
}

impl CameraController {
    pub fn new(params: ZoomParams) -> Self {
        Self {
            state: CameraState::base(&params),
            params,
            zooming: false,
        }
    }

    /// Recompute camera parameters from the spiral's cumulative radius
    pub fn update(&mut self, radius: f64, delta_ms: f64) -> CameraState {
        let radius = radius as f32;
        let p = &self.params;

        if radius <= p.start_threshold {
            return self.state;
        }

        if !self.zooming {
            self.zooming = true;
            info!(radius, "Spiral passed zoom threshold, camera pulling back");
        }

        let zoom_factor = (radius - p.start_threshold) * 10.0;
        let z = p.z_base.max(p.z_base + zoom_factor);
        let fov = (self.state.fov_degrees - self.fov_step(delta_ms)).max(p.min_fov_degrees);

        self.state = CameraState {
            z,
            fov_degrees: fov.min(self.state.fov_degrees),
            near: (z * 0.1).max(0.1),
            far: (z * 2.0).max(radius + 50.0),
        };
        self.state
    }

    fn fov_step(&self, delta_ms: f64) -> f32 {
        match self.params.pacing {
            ZoomPacing::PerFrame => self.params.speed,
            ZoomPacing::TimeScaled { reference_fps } => {
                (self.params.speed as f64 * delta_ms.max(0.0) * reference_fps as f64 / 1000.0) as f32
            }
        }
    }

    pub fn state(&self) -> CameraState {
        self.state
    }

    pub fn is_zooming(&self) -> bool {
        self.zooming
    }
}
