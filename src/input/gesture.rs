//! Gesture detection
//!
//! Double taps are timed with a stopwatch; multi-touch transitions are derived
//! from the contact count alone. Both fire only on state changes.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::InputFrame;
use crate::consts::DOUBLE_TAP_WINDOW_MS;
use crate::settings::{InputDevice, Settings};
use crate::time::{Millis, Stopwatch};

/// Discrete gestures produced by the detector
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Gesture {
    /// Second tap within the window
    DoubleTap { position: Vec2 },
    /// Two or more contacts appeared
    MultiTouchBegan,
    /// Multi-touch dropped to a single contact
    MultiToSingle,
    /// All contacts lifted after a multi-touch
    MultiTouchEnded,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum DoubleTapState {
    /// No recent tap
    #[default]
    None,
    /// First tap seen, waiting for the second
    Began,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum MultiTouchState {
    /// No simultaneous contacts
    #[default]
    None,
    /// Two or more contacts
    Multi,
    /// Came down from multi-touch to a single contact
    ToSingle,
}

/// Translates input frames into gestures for one input source
#[derive(Debug, Clone)]
pub struct GestureDetector {
    device: InputDevice,
    sensitivity: f32,
    window_ms: Millis,
    double_tap: DoubleTapState,
    multi_touch: MultiTouchState,
    timer: Stopwatch,
    /// Tap before the latest one
    initial_touch: Option<Vec2>,
    latest_touch: Option<Vec2>,
    delta_x: f32,
}

impl GestureDetector {
    pub fn new(device: InputDevice, sensitivity: f32) -> Self {
        Self {
            device,
            sensitivity,
            window_ms: DOUBLE_TAP_WINDOW_MS,
            double_tap: DoubleTapState::None,
            multi_touch: MultiTouchState::None,
            timer: Stopwatch::new(),
            initial_touch: None,
            latest_touch: None,
            delta_x: 0.0,
        }
    }

    pub fn from_settings(settings: &Settings) -> Self {
        let mut detector = Self::new(settings.device, settings.sensitivity());
        detector.window_ms = settings.double_tap_window_ms;
        detector
    }

    pub fn double_tap_state(&self) -> DoubleTapState {
        self.double_tap
    }

    pub fn multi_touch_state(&self) -> MultiTouchState {
        self.multi_touch
    }

    pub fn latest_touch(&self) -> Option<Vec2> {
        self.latest_touch
    }

    /// Offset between the last two taps
    pub fn delta_touch(&self) -> Option<Vec2> {
        Some(self.latest_touch? - self.initial_touch?)
    }

    /// Horizontal drag this frame, scaled by sensitivity
    pub fn delta_x(&self) -> f32 {
        self.delta_x
    }

    /// Process one frame. Double taps are checked before multi-touches.
    pub fn update(&mut self, frame: &InputFrame, now: Millis) -> Vec<Gesture> {
        self.update_delta_x(frame);

        let mut gestures = Vec::new();
        gestures.extend(self.check_double_taps(frame.tap, now));
        gestures.extend(self.check_multi_touches(frame.contacts(self.device)));
        gestures
    }

    /// Advance the double-tap machine with this frame's tap-down, if any
    pub fn check_double_taps(&mut self, tap: Option<Vec2>, now: Millis) -> Option<Gesture> {
        if self.double_tap == DoubleTapState::Began && self.timer.elapsed(now) > self.window_ms {
            log::debug!("Double tap window expired");
            self.double_tap = DoubleTapState::None;
            self.timer.reset(now);
        }

        let position = tap?;
        let fired = match self.double_tap {
            DoubleTapState::Began => {
                self.double_tap = DoubleTapState::None;
                self.timer.reset(now);
                Some(Gesture::DoubleTap { position })
            }
            DoubleTapState::None => {
                self.double_tap = DoubleTapState::Began;
                self.timer.restart(now);
                None
            }
        };

        self.initial_touch = self.latest_touch;
        self.latest_touch = Some(position);
        fired
    }

    /// Advance the multi-touch machine with the current contact count
    pub fn check_multi_touches(&mut self, contacts: usize) -> Option<Gesture> {
        let (next, gesture) = match (self.multi_touch, contacts) {
            (state, n) if state != MultiTouchState::Multi && n >= 2 => {
                (MultiTouchState::Multi, Gesture::MultiTouchBegan)
            }
            (MultiTouchState::Multi, 1) => (MultiTouchState::ToSingle, Gesture::MultiToSingle),
            (state, 0) if state != MultiTouchState::None => {
                (MultiTouchState::None, Gesture::MultiTouchEnded)
            }
            _ => return None,
        };
        log::debug!("Multi-touch {:?} -> {:?}", self.multi_touch, next);
        self.multi_touch = next;
        Some(gesture)
    }

    fn update_delta_x(&mut self, frame: &InputFrame) {
        let dragging = match self.device {
            InputDevice::Touch => !frame.touches.is_empty(),
            InputDevice::Mouse => frame.primary_held,
        };
        self.delta_x = if dragging {
            frame.drag.x * self.sensitivity
        } else {
            0.0
        };
    }
}
