//! Game settings and mechanics tuning
//!
//! Loaded from JSON; every field falls back to its default when missing.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;
use crate::time::Millis;

/// Failure loading or parsing settings
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("failed to read settings file: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid settings json: {0}")]
    Json(#[from] serde_json::Error),
}

/// Control scheme preset
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum ControlMode {
    /// Open arena, two panels, two-finger dash
    #[default]
    Pong,
    /// Closed arena, bottom panel only, double-tap dodge
    Brick,
}

impl ControlMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ControlMode::Pong => "Pong",
            ControlMode::Brick => "Brick",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "pong" => Some(ControlMode::Pong),
            "brick" | "breakout" => Some(ControlMode::Brick),
            _ => None,
        }
    }

    /// Whether the top panel takes part in play
    pub fn has_top_panel(&self) -> bool {
        match self {
            ControlMode::Pong => true,
            ControlMode::Brick => false,
        }
    }

    pub fn dash_enabled(&self) -> bool {
        matches!(self, ControlMode::Pong)
    }

    pub fn dodge_enabled(&self) -> bool {
        matches!(self, ControlMode::Brick)
    }
}

/// Kind of device feeding the input frames
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum InputDevice {
    #[default]
    Touch,
    Mouse,
}

/// Where the dash aim point is sampled from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum AimSource {
    /// First active touch
    #[default]
    PrimaryTouch,
    /// Mouse pointer
    Pointer,
}

impl AimSource {
    /// Natural aim source for a device
    pub fn for_device(device: InputDevice) -> Self {
        match device {
            InputDevice::Touch => AimSource::PrimaryTouch,
            InputDevice::Mouse => AimSource::Pointer,
        }
    }
}

/// Dash/dodge tuning. Covers every variant of the ball abilities.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Mechanics {
    /// Dash requires the ball to be charged first
    pub has_charged_state: bool,
    /// Length of the post-release `Dash` window (None = back to normal immediately)
    pub dash_duration_ms: Option<Millis>,
    /// Opacity while frozen for a dash
    pub dash_fade: f32,
    /// Opacity while dodging
    pub dodge_fade: f32,
    pub dodge_duration_ms: Millis,
    /// Cooldown after a dodge (0 = none)
    pub dodge_recharge_ms: Millis,
    /// Max speed multiplier applied on every successful dash
    pub speed_growth: f32,
    /// Aim source override (None = follow the input device)
    pub aim_source: Option<AimSource>,
}

impl Default for Mechanics {
    fn default() -> Self {
        Self {
            has_charged_state: false,
            dash_duration_ms: None,
            dash_fade: DASH_FADE,
            dodge_fade: DODGE_FADE,
            dodge_duration_ms: DODGE_DURATION_MS,
            dodge_recharge_ms: 0,
            speed_growth: SPEED_GROWTH,
            aim_source: None,
        }
    }
}

/// Play area bounds. Panels sit on `bottom` and `top`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Arena {
    pub left: f32,
    pub right: f32,
    pub bottom: f32,
    pub top: f32,
}

impl Default for Arena {
    fn default() -> Self {
        Self {
            left: -ARENA_HALF_WIDTH,
            right: ARENA_HALF_WIDTH,
            bottom: -ARENA_HALF_HEIGHT,
            top: ARENA_HALF_HEIGHT,
        }
    }
}

impl Arena {
    /// Whether a point has left the play area
    pub fn is_outside(&self, x: f32, y: f32) -> bool {
        x < self.left || x > self.right || y < self.bottom || y > self.top
    }
}

/// Game settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub control_mode: ControlMode,
    pub device: InputDevice,

    // === Input ===
    /// Drag sensitivity for mouse input
    pub mouse_sensitivity: f32,
    /// Drag sensitivity for touch input
    pub touch_sensitivity: f32,
    /// Maximum gap between two taps of a double tap
    pub double_tap_window_ms: Millis,

    // === Abilities ===
    pub dash_enabled: bool,
    pub dodge_enabled: bool,
    pub mechanics: Mechanics,

    // === Arena ===
    pub arena: Arena,
    /// Half of the panel width, used for deflection
    pub panel_half_width: f32,
    /// Starting speed floor for every ball
    pub initial_max_speed: f32,

    // === Scoring ===
    pub points_per_gem: u32,
    pub multiplier_step: f32,
    /// Delay before reloading or advancing after the round ends
    pub restart_delay_ms: Millis,
}

impl Default for Settings {
    fn default() -> Self {
        Self::from_preset(ControlMode::Pong)
    }
}

impl Settings {
    /// Create settings from a control preset
    pub fn from_preset(mode: ControlMode) -> Self {
        Self {
            control_mode: mode,
            device: InputDevice::Touch,

            mouse_sensitivity: MOUSE_SENSITIVITY,
            touch_sensitivity: TOUCH_SENSITIVITY,
            double_tap_window_ms: DOUBLE_TAP_WINDOW_MS,

            dash_enabled: mode.dash_enabled(),
            dodge_enabled: mode.dodge_enabled(),
            mechanics: Mechanics::default(),

            arena: Arena::default(),
            panel_half_width: PANEL_HALF_WIDTH,
            initial_max_speed: 0.0,

            points_per_gem: POINTS_PER_GEM,
            multiplier_step: MULTIPLIER_STEP,
            restart_delay_ms: RESTART_DELAY_MS,
        }
    }

    /// Switch control preset (updates mode-dependent toggles)
    pub fn apply_preset(&mut self, mode: ControlMode) {
        self.control_mode = mode;
        self.dash_enabled = mode.dash_enabled();
        self.dodge_enabled = mode.dodge_enabled();
    }

    /// Drag sensitivity for the configured device
    pub fn sensitivity(&self) -> f32 {
        match self.device {
            InputDevice::Touch => self.touch_sensitivity,
            InputDevice::Mouse => self.mouse_sensitivity,
        }
    }

    /// Dash aim source for the configured device, unless overridden
    pub fn aim_source(&self) -> AimSource {
        self.mechanics
            .aim_source
            .unwrap_or_else(|| AimSource::for_device(self.device))
    }

    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json(&self) -> Result<String, SettingsError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Load settings from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let settings = Self::from_json(&json)?;
        log::info!(
            "Loaded settings from {} (mode {})",
            path.display(),
            settings.control_mode.as_str()
        );
        Ok(settings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_control_mode_from_str() {
        assert_eq!(ControlMode::from_str("PONG"), Some(ControlMode::Pong));
        assert_eq!(ControlMode::from_str("breakout"), Some(ControlMode::Brick));
        assert_eq!(ControlMode::from_str("tennis"), None);
    }

    #[test]
    fn test_presets_toggle_abilities() {
        let pong = Settings::from_preset(ControlMode::Pong);
        assert!(pong.dash_enabled);
        assert!(!pong.dodge_enabled);

        let mut brick = Settings::from_preset(ControlMode::Pong);
        brick.apply_preset(ControlMode::Brick);
        assert!(!brick.dash_enabled);
        assert!(brick.dodge_enabled);
        assert!(!brick.control_mode.has_top_panel());
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let settings = Settings::from_json(
            r#"{ "device": "Mouse", "mechanics": { "dash_duration_ms": 1000 } }"#,
        )
        .unwrap();

        assert_eq!(settings.device, InputDevice::Mouse);
        assert_eq!(settings.sensitivity(), MOUSE_SENSITIVITY);
        assert_eq!(settings.mechanics.dash_duration_ms, Some(1000));
        assert_eq!(settings.mechanics.dodge_duration_ms, DODGE_DURATION_MS);
        assert_eq!(settings.double_tap_window_ms, DOUBLE_TAP_WINDOW_MS);
        assert_eq!(settings.aim_source(), AimSource::Pointer);
    }

    #[test]
    fn test_aim_source_follows_device_unless_overridden() {
        let mut settings = Settings::default();
        assert_eq!(settings.aim_source(), AimSource::PrimaryTouch);

        settings.device = InputDevice::Mouse;
        assert_eq!(settings.aim_source(), AimSource::Pointer);

        settings.mechanics.aim_source = Some(AimSource::PrimaryTouch);
        assert_eq!(settings.aim_source(), AimSource::PrimaryTouch);
    }

    #[test]
    fn test_json_round_trip_keeps_mode() {
        let settings = Settings::from_preset(ControlMode::Brick);
        let json = settings.to_json().unwrap();
        let back = Settings::from_json(&json).unwrap();
        assert_eq!(back.control_mode, ControlMode::Brick);
        assert_eq!(back.arena, settings.arena);
    }

    #[test]
    fn test_invalid_json_is_an_error() {
        assert!(matches!(
            Settings::from_json("{ not json"),
            Err(SettingsError::Json(_))
        ));
        assert!(matches!(
            Settings::load("/definitely/not/here.json"),
            Err(SettingsError::Io(_))
        ));
    }

    #[test]
    fn test_arena_bounds() {
        let arena = Arena::default();
        assert!(!arena.is_outside(0.0, 0.0));
        assert!(arena.is_outside(0.0, arena.bottom - 0.1));
        assert!(arena.is_outside(arena.right + 0.1, 0.0));
    }
}
