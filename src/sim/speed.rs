//! Minimum speed floor
//!
//! The ball never slows below the fastest dominant-axis speed it has reached.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::consts::SPEED_GROWTH;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpeedFloor {
    max_speed: f32,
    growth: f32,
}

impl Default for SpeedFloor {
    fn default() -> Self {
        Self::new(0.0, SPEED_GROWTH)
    }
}

impl SpeedFloor {
    pub fn new(max_speed: f32, growth: f32) -> Self {
        Self { max_speed, growth }
    }

    pub fn max_speed(&self) -> f32 {
        self.max_speed
    }

    /// Grow the floor after a successful dash
    pub fn increase(&mut self) {
        self.max_speed *= self.growth;
    }

    /// Raise the floor if the dominant axis got faster
    pub fn record(&mut self, velocity: Vec3) {
        let current = velocity.x.abs().max(velocity.y.abs());
        if current > self.max_speed {
            self.max_speed = current;
        }
    }

    /// Pin the dominant axis to the floor, keeping its direction.
    ///
    /// Ties go to x; a non-positive component counts as heading negative.
    pub fn maintain(&self, velocity: Vec3) -> Vec3 {
        let sign = |v: f32| if v > 0.0 { 1.0 } else { -1.0 };
        if velocity.y.abs() > velocity.x.abs() {
            Vec3::new(velocity.x, self.max_speed * sign(velocity.y), 0.0)
        } else {
            Vec3::new(self.max_speed * sign(velocity.x), velocity.y, 0.0)
        }
    }
}
