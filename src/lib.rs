//! Orb Pong - a Pong/Breakout hybrid gameplay core
//!
//! Core modules:
//! - `time`: Clock sources and the millisecond stopwatch
//! - `input`: Per-frame input snapshots and gesture detection
//! - `sim`: Ball abilities, panels, scoring and the frame-driven world
//! - `settings`: Data-driven control presets and tuning
//! - `idle`: Seeded input driver for demo play

pub mod idle;
pub mod input;
pub mod settings;
pub mod sim;
pub mod time;

pub use settings::{ControlMode, InputDevice, Settings};

use glam::{Vec2, Vec3};

/// Game configuration constants
pub mod consts {
    use crate::time::Millis;

    /// Physics step (50 Hz, matches the host engine's fixed update)
    pub const PHYSICS_DT: f32 = 1.0 / 50.0;
    /// Nominal render frame length used by the headless demo
    pub const FRAME_MS: Millis = 16;

    /// Arena half extents in world units
    pub const ARENA_HALF_WIDTH: f32 = 10.0;
    pub const ARENA_HALF_HEIGHT: f32 = 16.0;
    /// Half of a panel's width (edge to center)
    pub const PANEL_HALF_WIDTH: f32 = 1.5;

    /// Maximum gap between the taps of a double tap
    pub const DOUBLE_TAP_WINDOW_MS: Millis = 500;
    pub const MOUSE_SENSITIVITY: f32 = 5.0;
    pub const TOUCH_SENSITIVITY: f32 = 0.5;

    /// Ball opacity while frozen for a dash
    pub const DASH_FADE: f32 = 0.25;
    /// Ball opacity while dodging
    pub const DODGE_FADE: f32 = 0.25;
    pub const DODGE_DURATION_MS: Millis = 500;
    /// Max speed growth per successful dash (multiplicative)
    pub const SPEED_GROWTH: f32 = 1.05;

    pub const POINTS_PER_GEM: u32 = 100;
    pub const MULTIPLIER_STEP: f32 = 0.5;
    /// Delay before the scene reloads or advances after a round ends
    pub const RESTART_DELAY_MS: Millis = 2000;
}

/// Lift a plane point into world space (z = 0)
#[inline]
pub fn to_world(p: Vec2) -> Vec3 {
    p.extend(0.0)
}

/// Project a world point onto the play plane
#[inline]
pub fn to_plane(p: Vec3) -> Vec2 {
    p.truncate()
}
