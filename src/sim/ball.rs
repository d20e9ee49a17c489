//! The ball entity
//!
//! Owns its body, tint, speed floor and both abilities. Ability transitions are
//! announced on the event bus with the ball's id.

use glam::Vec3;

use super::body::{Body, Motion, Tint};
use super::dash::{Dash, DashSignal, DashState};
use super::dodge::{Dodge, DodgeState};
use super::events::{EventBus, GameEvent};
use super::speed::SpeedFloor;
use crate::input::{Gesture, InputFrame};
use crate::settings::{AimSource, InputDevice, Mechanics};
use crate::time::Millis;
use crate::to_world;

#[derive(Debug, Clone)]
pub struct Ball {
    pub id: u32,
    pub body: Body,
    pub tint: Tint,
    pub speed: SpeedFloor,
    dash: Dash,
    dodge: Dodge,
    aim_source: AimSource,
}

impl Ball {
    pub fn new(id: u32, position: Vec3, mechanics: &Mechanics, initial_max_speed: f32) -> Self {
        Self {
            id,
            body: Body::at(position),
            tint: Tint::default(),
            speed: SpeedFloor::new(initial_max_speed, mechanics.speed_growth),
            dash: Dash::new(mechanics),
            dodge: Dodge::new(mechanics),
            aim_source: mechanics.aim_source.unwrap_or_default(),
        }
    }

    /// Sample the dash aim from `source` instead
    pub fn with_aim_source(mut self, source: AimSource) -> Self {
        self.aim_source = source;
        self
    }

    pub fn dash_state(&self) -> DashState {
        self.dash.state()
    }

    pub fn dodge_state(&self) -> DodgeState {
        self.dodge.state()
    }

    pub fn dash_ability(&self) -> &Dash {
        &self.dash
    }

    pub fn dodge_ability(&self) -> &Dodge {
        &self.dodge
    }

    /// Route a gesture to the matching ability
    pub fn on_gesture(&mut self, gesture: &Gesture, now: Millis, bus: &mut EventBus) {
        match gesture {
            Gesture::MultiTouchBegan => self.dash_enter(now, bus),
            Gesture::MultiToSingle => self.dash_aim_began(),
            Gesture::MultiTouchEnded => self.dash_release(now, bus),
            Gesture::DoubleTap { .. } => self.dodge(now, bus),
        }
    }

    pub fn dash_enter(&mut self, now: Millis, bus: &mut EventBus) {
        let signal = self.dash.enter(
            &mut self.body,
            &mut self.tint,
            &mut self.speed,
            self.dodge.timer_mut(),
            now,
        );
        self.announce_dash(signal, bus);
    }

    pub fn dash_aim_began(&mut self) {
        if self.dash.aim_began() {
            log::debug!("Ball {} aiming", self.id);
        }
    }

    pub fn dash_release(&mut self, now: Millis, bus: &mut EventBus) {
        let signal = self.dash.release(
            &mut self.body,
            &mut self.tint,
            &mut self.speed,
            self.dodge.timer_mut(),
            now,
        );
        self.announce_dash(signal, bus);
    }

    pub fn dodge(&mut self, now: Millis, bus: &mut EventBus) {
        if self.dodge.trigger(self.dash.state(), &mut self.tint, now) {
            log::debug!("Ball {} dodging", self.id);
            bus.publish(&GameEvent::DodgeBegan { ball: self.id });
        }
    }

    /// Arm the dash (charged variant)
    pub fn charge(&mut self) -> bool {
        self.dash.charge()
    }

    /// Per-frame update: aim sampling, touch release and ability timers
    pub fn frame(&mut self, input: &InputFrame, device: InputDevice, now: Millis, bus: &mut EventBus) {
        if self.dash.state() == DashState::Aim {
            let point = match self.aim_source {
                AimSource::PrimaryTouch => input.first_touch(),
                AimSource::Pointer => input.pointer,
            };
            self.dash.sample_aim(point.map(to_world));

            if device == InputDevice::Touch && input.primary_released {
                self.dash_release(now, bus);
            }
        }

        let signal = self.dash.update(now);
        self.announce_dash(signal, bus);

        if self.dodge.update(&mut self.tint, now) {
            bus.publish(&GameEvent::DodgeEnded { ball: self.id });
        }
    }

    /// Physics step: keep the speed floor unless a dash owns the velocity
    pub fn physics_step(&mut self) {
        if self.dash.is_idle() {
            let velocity = self.body.velocity();
            self.speed.record(velocity);
            self.body.set_velocity(self.speed.maintain(velocity));
        }
    }

    fn announce_dash(&self, signal: Option<DashSignal>, bus: &mut EventBus) {
        match signal {
            Some(DashSignal::Entered) => bus.publish(&GameEvent::DashEntered { ball: self.id }),
            Some(DashSignal::Ended) => bus.publish(&GameEvent::DashEnded { ball: self.id }),
            Some(DashSignal::Reentered) => {
                bus.publish(&GameEvent::DashEnded { ball: self.id });
                bus.publish(&GameEvent::DashEntered { ball: self.id });
            }
            None => {}
        }
    }
}
