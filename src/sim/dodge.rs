//! Dodge ability
//!
//! A double tap fades the ball for a short window. Collision is switched off
//! by whoever listens to the dodge notifications (barriers), not here.

use serde::{Deserialize, Serialize};

use super::body::Opacity;
use super::dash::DashState;
use crate::settings::Mechanics;
use crate::time::{Millis, Stopwatch};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum DodgeState {
    #[default]
    None,
    Dodge,
    /// Cooling down, a new dodge is refused
    Recharge,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Dodge {
    state: DodgeState,
    /// Also paused by dashes
    timer: Stopwatch,
    duration_ms: Millis,
    recharge_ms: Millis,
    fade: f32,
}

impl Dodge {
    pub fn new(mechanics: &Mechanics) -> Self {
        Self {
            state: DodgeState::None,
            timer: Stopwatch::new(),
            duration_ms: mechanics.dodge_duration_ms,
            recharge_ms: mechanics.dodge_recharge_ms,
            fade: mechanics.dodge_fade,
        }
    }

    pub fn state(&self) -> DodgeState {
        self.state
    }

    pub fn timer(&self) -> &Stopwatch {
        &self.timer
    }

    pub fn timer_mut(&mut self) -> &mut Stopwatch {
        &mut self.timer
    }

    /// Start a dodge. Returns false when the ball is dashing or recharging.
    pub fn trigger(&mut self, dash: DashState, tint: &mut impl Opacity, now: Millis) -> bool {
        if dash != DashState::None {
            log::debug!("Dodge refused while dash is {:?}", dash);
            return false;
        }
        if self.state == DodgeState::Recharge {
            log::debug!("Dodge refused while recharging");
            return false;
        }

        self.state = DodgeState::Dodge;
        tint.set_alpha(self.fade);
        self.timer.restart(now);
        true
    }

    /// Advance timers. Returns true on the frame the dodge ends.
    pub fn update(&mut self, tint: &mut impl Opacity, now: Millis) -> bool {
        match self.state {
            DodgeState::Dodge if self.timer.elapsed(now) >= self.duration_ms => {
                tint.set_alpha(1.0);
                if self.recharge_ms > 0 {
                    self.state = DodgeState::Recharge;
                    self.timer.restart(now);
                } else {
                    self.state = DodgeState::None;
                    self.timer.reset(now);
                }
                true
            }
            DodgeState::Recharge if self.timer.elapsed(now) >= self.recharge_ms => {
                self.state = DodgeState::None;
                self.timer.reset(now);
                false
            }
            _ => false,
        }
    }
}
