//! Per-frame input snapshot

use glam::Vec2;

use crate::settings::InputDevice;

/// Device state for a single render frame.
///
/// Positions are already projected onto the play plane by the host.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InputFrame {
    /// Active touches in order of arrival
    pub touches: Vec<Vec2>,
    /// Mouse pointer, if the device has one
    pub pointer: Option<Vec2>,
    pub primary_held: bool,
    pub secondary_held: bool,
    /// Tap-down this frame (touch began, or the tap key on desktop)
    pub tap: Option<Vec2>,
    /// The primary touch/button was released this frame
    pub primary_released: bool,
    /// Raw movement of the last touch or the pointer since the previous frame
    pub drag: Vec2,
}

impl InputFrame {
    /// Frame with the given active touches
    pub fn with_touches(touches: impl IntoIterator<Item = Vec2>) -> Self {
        Self {
            touches: touches.into_iter().collect(),
            ..Default::default()
        }
    }

    /// Frame with a single tap-down at `pos`
    pub fn tap_at(pos: Vec2) -> Self {
        Self {
            touches: vec![pos],
            tap: Some(pos),
            ..Default::default()
        }
    }

    /// Number of simultaneous contacts for multi-touch detection.
    ///
    /// Mouse input counts both buttons as two contacts and the primary alone as one.
    pub fn contacts(&self, device: InputDevice) -> usize {
        match device {
            InputDevice::Touch => self.touches.len(),
            InputDevice::Mouse => match (self.primary_held, self.secondary_held) {
                (true, true) => 2,
                (true, false) => 1,
                _ => 0,
            },
        }
    }

    /// Most recent touch (the one drags are measured on)
    pub fn last_touch(&self) -> Option<Vec2> {
        self.touches.last().copied()
    }

    pub fn first_touch(&self) -> Option<Vec2> {
        self.touches.first().copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mouse_contacts() {
        let mut frame = InputFrame::default();
        assert_eq!(frame.contacts(InputDevice::Mouse), 0);

        frame.secondary_held = true;
        assert_eq!(frame.contacts(InputDevice::Mouse), 0);

        frame.primary_held = true;
        assert_eq!(frame.contacts(InputDevice::Mouse), 2);

        frame.secondary_held = false;
        assert_eq!(frame.contacts(InputDevice::Mouse), 1);
    }

    #[test]
    fn test_touch_contacts() {
        let frame = InputFrame::with_touches([Vec2::ZERO, Vec2::ONE, Vec2::X]);
        assert_eq!(frame.contacts(InputDevice::Touch), 3);
        assert_eq!(frame.first_touch(), Some(Vec2::ZERO));
        assert_eq!(frame.last_touch(), Some(Vec2::X));
    }
}
