//! Player panels (paddles)
//!
//! Panels slide horizontally between two bounds and bend the ball's x
//! velocity depending on where it lands.

use glam::{Vec2, Vec3};
use serde::{Deserialize, Serialize};

use crate::settings::InputDevice;

/// Which side of the arena a panel guards
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Hemisphere {
    Bottom,
    Top,
}

impl Hemisphere {
    /// Whether a touch belongs to this panel's half of the arena
    pub fn owns(&self, touch: Vec2) -> bool {
        match self {
            Hemisphere::Bottom => touch.y <= 0.0,
            Hemisphere::Top => touch.y > 0.0,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Panel {
    pub hemisphere: Hemisphere,
    /// Center x
    pub x: f32,
    pub y: f32,
    pub half_width: f32,
    left: f32,
    right: f32,
}

impl Panel {
    pub fn new(hemisphere: Hemisphere, y: f32, half_width: f32, left: f32, right: f32) -> Self {
        Self {
            hemisphere,
            x: 0.0,
            y,
            half_width,
            left,
            right,
        }
    }

    /// Move for one frame.
    ///
    /// Touch devices follow the touch in this panel's half (and hold still
    /// without one); mouse devices slide by the drag delta.
    pub fn update(&mut self, device: InputDevice, touches: &[Vec2], delta_x: f32) {
        match device {
            InputDevice::Touch => {
                if let Some(touch) = touches.iter().rev().find(|t| self.hemisphere.owns(**t)) {
                    self.x = touch.x.clamp(self.left, self.right);
                }
            }
            InputDevice::Mouse => {
                let pushing_out = (self.x <= self.left && delta_x < 0.0)
                    || (self.x >= self.right && delta_x > 0.0);
                if !pushing_out {
                    self.x += delta_x;
                }
            }
        }
    }

    /// Ball velocity after hitting this panel at `contact_x`.
    ///
    /// Hits further from the center bend the ball harder; the top panel
    /// mirrors the bend so both players steer the same way on screen.
    pub fn deflect(&self, velocity: Vec3, contact_x: f32) -> Vec3 {
        let relative = (contact_x - self.x) / self.half_width;
        let bend = velocity.y * relative;
        let new_x = match self.hemisphere {
            Hemisphere::Bottom => bend,
            Hemisphere::Top => -bend,
        };
        Vec3::new(new_x, velocity.y, 0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bottom() -> Panel {
        Panel::new(Hemisphere::Bottom, -16.0, 1.5, -8.0, 8.0)
    }

    #[test]
    fn test_touch_follows_own_half_and_clamps() {
        let mut panel = bottom();
        panel.update(InputDevice::Touch, &[Vec2::new(3.0, -5.0)], 0.0);
        assert_eq!(panel.x, 3.0);

        // Upper-half touches belong to the top panel
        panel.update(InputDevice::Touch, &[Vec2::new(-2.0, 5.0)], 0.0);
        assert_eq!(panel.x, 3.0);

        panel.update(InputDevice::Touch, &[Vec2::new(20.0, -5.0)], 0.0);
        assert_eq!(panel.x, 8.0);

        panel.update(InputDevice::Touch, &[], 0.0);
        assert_eq!(panel.x, 8.0);
    }

    #[test]
    fn test_mouse_stops_at_bounds() {
        let mut panel = bottom();
        panel.update(InputDevice::Mouse, &[], 5.0);
        panel.update(InputDevice::Mouse, &[], 5.0);
        assert_eq!(panel.x, 10.0);

        // Already past the bound, outward drags are ignored
        panel.update(InputDevice::Mouse, &[], 1.0);
        assert_eq!(panel.x, 10.0);

        panel.update(InputDevice::Mouse, &[], -4.0);
        assert_eq!(panel.x, 6.0);
    }

    #[test]
    fn test_deflect_by_contact_offset() {
        let panel = bottom();
        let v = panel.deflect(Vec3::new(0.0, 9.0, 0.0), 0.75);
        assert!((v.x - 4.5).abs() < 1e-5);
        assert_eq!(v.y, 9.0);

        let centered = panel.deflect(Vec3::new(2.0, 9.0, 0.0), 0.0);
        assert_eq!(centered.x, 0.0);
    }

    #[test]
    fn test_top_panel_mirrors_deflection() {
        let mut top = Panel::new(Hemisphere::Top, 16.0, 1.5, -8.0, 8.0);
        top.x = 1.0;
        let v = top.deflect(Vec3::new(0.0, -6.0, 0.0), 2.5);
        assert!((v.x - 6.0).abs() < 1e-5);
    }
}
