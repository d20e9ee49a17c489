//! Engine-facing collaborators
//!
//! `Motion` and `Opacity` are the only surfaces the ball abilities touch. The
//! host engine implements them over its rigid body and material; `Body` and
//! `Tint` are the in-crate versions used by the world, the demo and tests.

use glam::Vec3;
use serde::{Deserialize, Serialize};

/// Rigid-body state the abilities read and write
pub trait Motion {
    fn velocity(&self) -> Vec3;
    fn set_velocity(&mut self, velocity: Vec3);
    fn position(&self) -> Vec3;
    fn set_position(&mut self, position: Vec3);
    fn enable_collision(&mut self);
    fn disable_collision(&mut self);
    fn collision_enabled(&self) -> bool;
}

/// Material transparency
pub trait Opacity {
    /// Alpha in [0, 1]
    fn set_alpha(&mut self, alpha: f32);
    fn alpha(&self) -> f32;
}

/// Plain rigid body
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Body {
    pub position: Vec3,
    pub velocity: Vec3,
    pub collision: bool,
}

impl Default for Body {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            velocity: Vec3::ZERO,
            collision: true,
        }
    }
}

impl Body {
    pub fn at(position: Vec3) -> Self {
        Self {
            position,
            ..Default::default()
        }
    }

    /// Explicit Euler step, standing in for the engine's integrator
    pub fn integrate(&mut self, dt: f32) {
        self.position += self.velocity * dt;
    }
}

impl Motion for Body {
    fn velocity(&self) -> Vec3 {
        self.velocity
    }

    fn set_velocity(&mut self, velocity: Vec3) {
        self.velocity = velocity;
    }

    fn position(&self) -> Vec3 {
        self.position
    }

    fn set_position(&mut self, position: Vec3) {
        self.position = position;
    }

    fn enable_collision(&mut self) {
        self.collision = true;
    }

    fn disable_collision(&mut self) {
        self.collision = false;
    }

    fn collision_enabled(&self) -> bool {
        self.collision
    }
}

/// RGBA material color
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Tint {
    pub rgba: [f32; 4],
}

impl Default for Tint {
    fn default() -> Self {
        Self {
            rgba: [1.0, 1.0, 1.0, 1.0],
        }
    }
}

impl Tint {
    pub fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { rgba: [r, g, b, a] }
    }

    /// Replace the given channels, keeping the rest
    pub fn set_rgba(&mut self, r: Option<f32>, g: Option<f32>, b: Option<f32>, a: Option<f32>) {
        for (channel, value) in self.rgba.iter_mut().zip([r, g, b, a]) {
            if let Some(v) = value {
                *channel = v.clamp(0.0, 1.0);
            }
        }
    }
}

impl Opacity for Tint {
    fn set_alpha(&mut self, alpha: f32) {
        self.rgba[3] = alpha.clamp(0.0, 1.0);
    }

    fn alpha(&self) -> f32 {
        self.rgba[3]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tint_keeps_unset_channels() {
        let mut tint = Tint::new(0.2, 0.4, 0.6, 1.0);
        tint.set_rgba(None, Some(0.9), None, Some(0.5));
        assert_eq!(tint.rgba, [0.2, 0.9, 0.6, 0.5]);

        tint.set_alpha(3.0);
        assert_eq!(tint.alpha(), 1.0);
    }

    #[test]
    fn test_body_integrate() {
        let mut body = Body::at(Vec3::new(1.0, 0.0, 0.0));
        body.set_velocity(Vec3::new(0.0, -10.0, 0.0));
        body.integrate(0.5);
        assert_eq!(body.position(), Vec3::new(1.0, -5.0, 0.0));
    }
}
