//! Idle/demo input driver
//!
//! Produces plausible input frames from a seeded RNG: drags, double taps and
//! two-finger dashes that settle into an aim before releasing. Same seed,
//! same frames.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use crate::input::InputFrame;
use crate::settings::Arena;

/// What the idle player is in the middle of
#[derive(Debug, Clone, Copy, PartialEq)]
enum Plan {
    Idle,
    /// Waiting to land the second tap of a double tap
    SecondTap { frames: u32, at: Vec2 },
    /// Holding two fingers down
    Hold { frames: u32, a: Vec2, b: Vec2 },
    /// One finger left, dragging toward an aim point
    Aim { frames: u32, at: Vec2 },
}

pub struct IdlePlayer {
    rng: Pcg32,
    plan: Plan,
    arena: Arena,
    /// Resting finger used for panel drags
    finger: Vec2,
}

impl IdlePlayer {
    pub fn new(seed: u64, arena: Arena) -> Self {
        Self {
            rng: Pcg32::seed_from_u64(seed),
            plan: Plan::Idle,
            arena,
            finger: Vec2::new(0.0, arena.bottom * 0.5),
        }
    }

    /// Input for the next frame
    pub fn next_frame(&mut self) -> InputFrame {
        let (frame, next) = match self.plan {
            Plan::Idle => self.idle_frame(),
            Plan::SecondTap { frames: 0, at } => (Self::tap(at), Plan::Idle),
            Plan::SecondTap { frames, at } => (
                InputFrame::default(),
                Plan::SecondTap {
                    frames: frames - 1,
                    at,
                },
            ),
            Plan::Hold { frames: 0, a, .. } => {
                let at = self.random_point();
                (InputFrame::with_touches([a]), Plan::Aim { frames: 20, at })
            }
            Plan::Hold { frames, a, b } => (
                InputFrame::with_touches([a, b]),
                Plan::Hold {
                    frames: frames - 1,
                    a,
                    b,
                },
            ),
            Plan::Aim { frames: 0, .. } => (
                InputFrame {
                    primary_released: true,
                    ..Default::default()
                },
                Plan::Idle,
            ),
            Plan::Aim { frames, at } => {
                let mut frame = InputFrame::with_touches([at]);
                frame.pointer = Some(at);
                (frame, Plan::Aim { frames: frames - 1, at })
            }
        };
        self.plan = next;
        Self::mirror_buttons(frame)
    }

    fn idle_frame(&mut self) -> (InputFrame, Plan) {
        if self.rng.random_bool(0.01) {
            let at = self.random_point();
            let gap = self.rng.random_range(3..20);
            return (Self::tap(at), Plan::SecondTap { frames: gap, at });
        }
        if self.rng.random_bool(0.005) {
            let a = self.random_point();
            let b = self.random_point();
            let frames = self.rng.random_range(5..30);
            return (InputFrame::with_touches([a, b]), Plan::Hold { frames, a, b });
        }

        // Lazy panel drag
        let dx = self.rng.random_range(-0.3..0.3);
        let x = (self.finger.x + dx).clamp(self.arena.left, self.arena.right);
        let drag = Vec2::new(x - self.finger.x, 0.0);
        self.finger.x = x;
        let mut frame = InputFrame::with_touches([self.finger]);
        frame.drag = drag;
        (frame, Plan::Idle)
    }

    fn random_point(&mut self) -> Vec2 {
        Vec2::new(
            self.rng.random_range(self.arena.left..self.arena.right),
            self.rng.random_range(self.arena.bottom..self.arena.top),
        )
    }

    fn tap(at: Vec2) -> InputFrame {
        InputFrame::tap_at(at)
    }

    /// Give mouse-driven worlds an equivalent view of the same fingers
    fn mirror_buttons(mut frame: InputFrame) -> InputFrame {
        frame.primary_held = !frame.touches.is_empty();
        frame.secondary_held = frame.touches.len() >= 2;
        if frame.pointer.is_none() {
            frame.pointer = frame.first_touch();
        }
        frame
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::Settings;
    use crate::sim::World;
    use crate::sim::events::{EventKind, GameEvent};
    use crate::time::ManualClock;
    use glam::Vec3;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[test]
    fn test_same_seed_same_frames() {
        let mut a = IdlePlayer::new(42, Arena::default());
        let mut b = IdlePlayer::new(42, Arena::default());
        for _ in 0..500 {
            assert_eq!(a.next_frame(), b.next_frame());
        }
    }

    #[test]
    fn test_frames_stay_inside_arena() {
        let arena = Arena::default();
        let mut idle = IdlePlayer::new(7, arena);
        for _ in 0..2000 {
            let frame = idle.next_frame();
            for t in &frame.touches {
                assert!(!arena.is_outside(t.x, t.y));
            }
        }
    }

    #[test]
    fn test_idle_play_exercises_abilities() {
        let mut settings = Settings::default();
        settings.dodge_enabled = true;
        let arena = settings.arena;
        let mut world = World::new(ManualClock::new(0), settings, 10, 1);
        world.spawn_ball(Vec3::ZERO, Vec3::new(0.0, -3.0, 0.0));

        let seen = Rc::new(RefCell::new(Vec::new()));
        {
            let seen = seen.clone();
            world.bus.subscribe_all(move |e: &GameEvent| seen.borrow_mut().push(e.kind()));
        }

        let mut idle = IdlePlayer::new(1234, arena);
        for _ in 0..20_000 {
            world.clock().advance(16);
            let input = idle.next_frame();
            world.frame(&input);
        }

        let seen = seen.borrow();
        for kind in [
            EventKind::DoubleTap,
            EventKind::MultiTouchBegan,
            EventKind::MultiToSingle,
            EventKind::MultiTouchEnded,
            EventKind::DashEntered,
            EventKind::DashEnded,
        ] {
            assert!(seen.contains(&kind), "missing {:?}", kind);
        }
    }
}
