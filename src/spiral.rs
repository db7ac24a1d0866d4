//! Spiral Path Generator
//!
//! Maps a tick index `n` to a point on an expanding helix:
//! - angle grows by a fixed increment per tick
//! - radius and height grow linearly with the tick
//!
//! Everything is computed from `n` directly, so point `n` is reproducible.

use std::f64::consts::PI;

/// Angular step between consecutive points (9 degrees)
pub const ANGLE_INCREMENT: f64 = PI / 20.0;
pub const RADIUS_INCREMENT: f64 = 0.005;
pub const HEIGHT_INCREMENT: f64 = 0.02;

/// Per-tick increments that define the helix shape
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpiralShape {
    pub angle_increment: f64,
    pub radius_increment: f64,
    pub height_increment: f64,
}

impl Default for SpiralShape {
    fn default() -> Self {
        Self {
            angle_increment: ANGLE_INCREMENT,
            radius_increment: RADIUS_INCREMENT,
            height_increment: HEIGHT_INCREMENT,
        }
    }
}

impl SpiralShape {
    pub fn angle(&self, n: u64) -> f64 {
        n as f64 * self.angle_increment
    }

    pub fn radius(&self, n: u64) -> f64 {
        n as f64 * self.radius_increment
    }

    pub fn height(&self, n: u64) -> f64 {
        n as f64 * self.height_increment
    }

    /// Point `n` on the path as [x, y, z]
    pub fn point(&self, n: u64) -> [f32; 3] {
        let angle = self.angle(n);
        let radius = self.radius(n);
        [
            (radius * angle.cos()) as f32,
            (radius * angle.sin()) as f32,
            self.height(n) as f32,
        ]
    }
}

/// Cursor along the spiral, advanced once per committed point
#[derive(Debug, Clone)]
pub struct SpiralState {
    shape: SpiralShape,
    ticks: u64,
}

impl SpiralState {
    pub fn new(shape: SpiralShape) -> Self {
        Self { shape, ticks: 0 }
    }

    /// Number of points committed so far
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// The point that the next commit will place
    pub fn next_point(&self) -> [f32; 3] {
        self.shape.point(self.ticks)
    }

    pub fn advance(&mut self) {
        self.ticks += 1;
    }

    /// Cumulative radius; this is what the camera reacts to
    pub fn radius(&self) -> f64 {
        self.shape.radius(self.ticks)
    }

    pub fn height(&self) -> f64 {
        self.shape.height(self.ticks)
    }
}
