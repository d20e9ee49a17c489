//! Dash ability
//!
//! Two contacts freeze the ball, dropping to one contact starts aiming, and
//! lifting the last contact launches the ball away from the aim point at its
//! (grown) max speed. Lifting early cancels and restores the old velocity.
//!
//! ```text
//! None/Charged/Dash --enter--> Began --aim_began--> Aim --release--> None | Dash
//!                               |                    |
//!                               +--release (cancel)--+--enter--> Began
//! ```

use glam::Vec3;
use serde::{Deserialize, Serialize};

use super::body::{Motion, Opacity};
use super::speed::SpeedFloor;
use crate::settings::Mechanics;
use crate::time::{Millis, Stopwatch};
use crate::{to_plane, to_world};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum DashState {
    /// Normal motion
    #[default]
    None,
    /// Ready to dash (charged variant only)
    Charged,
    /// Frozen, waiting for the aim phase
    Began,
    /// Player is choosing a direction
    Aim,
    /// Launched, inside the post-release window
    Dash,
}

/// Transitions the owner should announce
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DashSignal {
    Entered,
    Ended,
    /// The post-release window was cut short by a new dash: `Ended`, then `Entered`
    Reentered,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Dash {
    state: DashState,
    /// Velocity before freezing, restored on cancel
    previous_velocity: Vec3,
    pre_dash_position: Vec3,
    aim: Option<Vec3>,
    /// Times the post-release `Dash` window
    timer: Stopwatch,
    has_charged_state: bool,
    duration_ms: Option<Millis>,
    fade: f32,
}

impl Dash {
    pub fn new(mechanics: &Mechanics) -> Self {
        Self {
            state: DashState::None,
            previous_velocity: Vec3::ZERO,
            pre_dash_position: Vec3::ZERO,
            aim: None,
            timer: Stopwatch::new(),
            has_charged_state: mechanics.has_charged_state,
            duration_ms: mechanics.dash_duration_ms,
            fade: mechanics.dash_fade,
        }
    }

    pub fn state(&self) -> DashState {
        self.state
    }

    pub fn aim(&self) -> Option<Vec3> {
        self.aim
    }

    pub fn previous_velocity(&self) -> Vec3 {
        self.previous_velocity
    }

    /// Whether the speed floor should be enforced this step
    pub fn is_idle(&self) -> bool {
        matches!(self.state, DashState::None | DashState::Charged)
    }

    /// Arm the dash (charged variant only)
    pub fn charge(&mut self) -> bool {
        if self.has_charged_state && self.state == DashState::None {
            log::debug!("Dash charged");
            self.state = DashState::Charged;
            true
        } else {
            false
        }
    }

    /// Freeze the ball and wait for aiming
    pub fn enter(
        &mut self,
        body: &mut impl Motion,
        tint: &mut impl Opacity,
        speed: &mut SpeedFloor,
        dodge_timer: &mut Stopwatch,
        now: Millis,
    ) -> Option<DashSignal> {
        if self.has_charged_state && matches!(self.state, DashState::None | DashState::Dash) {
            log::debug!("Dash refused: not charged");
            return None;
        }

        speed.record(body.velocity());
        body.disable_collision();

        let interrupted = self.state == DashState::Dash;
        if interrupted {
            self.timer.reset(now);
        }
        let fresh = interrupted || matches!(self.state, DashState::None | DashState::Charged);
        if fresh {
            self.previous_velocity = body.velocity();
            self.pre_dash_position = body.position();
            self.aim = None;
            tint.set_alpha(self.fade);
        }

        body.set_velocity(Vec3::ZERO);
        self.state = DashState::Began;
        // Dodging waits until the dash is over
        dodge_timer.pause(now, false);

        if interrupted {
            Some(DashSignal::Reentered)
        } else {
            fresh.then_some(DashSignal::Entered)
        }
    }

    /// Frozen ball starts aiming
    pub fn aim_began(&mut self) -> bool {
        if self.state == DashState::Began {
            self.state = DashState::Aim;
            true
        } else {
            false
        }
    }

    /// Record the aim point while aiming. An absent sample keeps the last one.
    pub fn sample_aim(&mut self, point: Option<Vec3>) {
        if self.state == DashState::Aim {
            if let Some(point) = point {
                self.aim = Some(point);
            }
        }
    }

    /// Launch from `Aim`, or cancel from `Began`. Idle states are left alone.
    pub fn release(
        &mut self,
        body: &mut impl Motion,
        tint: &mut impl Opacity,
        speed: &mut SpeedFloor,
        dodge_timer: &mut Stopwatch,
        now: Millis,
    ) -> Option<DashSignal> {
        match self.state {
            DashState::Began => {
                log::debug!("Dash cancelled");
                body.set_velocity(self.previous_velocity);
                self.state = if self.has_charged_state {
                    DashState::Charged
                } else {
                    DashState::None
                };
            }
            DashState::Aim => {
                let direction = self.aim.and_then(|aim| {
                    (to_plane(self.pre_dash_position) - to_plane(aim)).try_normalize()
                });
                match direction {
                    Some(direction) => {
                        speed.increase();
                        body.set_velocity(to_world(direction * speed.max_speed()));
                    }
                    None => {
                        log::debug!("Dash released without a usable aim point");
                        body.set_velocity(self.previous_velocity);
                    }
                }
                self.state = match self.duration_ms {
                    Some(_) => {
                        self.timer.restart(now);
                        DashState::Dash
                    }
                    None => DashState::None,
                };
            }
            DashState::None | DashState::Charged | DashState::Dash => return None,
        }

        body.set_position(self.pre_dash_position);
        body.enable_collision();
        tint.set_alpha(1.0);
        dodge_timer.unpause(now);

        (self.state != DashState::Dash).then_some(DashSignal::Ended)
    }

    /// Close the post-release window once it has run its course
    pub fn update(&mut self, now: Millis) -> Option<DashSignal> {
        let duration = self.duration_ms?;
        if self.state == DashState::Dash && self.timer.elapsed(now) >= duration {
            self.state = DashState::None;
            self.timer.reset(now);
            return Some(DashSignal::Ended);
        }
        None
    }
}
