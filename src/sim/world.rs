//! Frame-driven world
//!
//! The host calls `frame` once per render frame and `physics_step` once per
//! fixed step. Within a frame gestures are detected and published before any
//! ball consumes them, and every consumer sees the same clock reading.

use glam::Vec3;

use super::ball::Ball;
use super::barrier::Barrier;
use super::events::{EventBus, GameEvent};
use super::panel::{Hemisphere, Panel};
use super::score::{LevelProgress, SceneRequest, ScoreKeeper};
use crate::input::{Gesture, GestureDetector, InputFrame};
use crate::settings::Settings;
use crate::time::{Clock, Millis};

/// Ball spawn point, replayed when a round restarts
#[derive(Debug, Clone, Copy)]
struct Spawn {
    position: Vec3,
    velocity: Vec3,
}

pub struct World<C: Clock> {
    clock: C,
    settings: Settings,
    detector: GestureDetector,
    pub bus: EventBus,
    pub balls: Vec<Ball>,
    pub panels: Vec<Panel>,
    pub barriers: Vec<Barrier>,
    pub score: ScoreKeeper,
    pub levels: LevelProgress,
    spawns: Vec<Spawn>,
    next_id: u32,
}

impl<C: Clock> World<C> {
    pub fn new(clock: C, settings: Settings, total_gems: u32, level_count: usize) -> Self {
        let arena = settings.arena;
        let mut panels = vec![Panel::new(
            Hemisphere::Bottom,
            arena.bottom,
            settings.panel_half_width,
            arena.left,
            arena.right,
        )];
        if settings.control_mode.has_top_panel() {
            panels.push(Panel::new(
                Hemisphere::Top,
                arena.top,
                settings.panel_half_width,
                arena.left,
                arena.right,
            ));
        }

        log::info!(
            "World created: mode {}, {} panel(s), {} gems",
            settings.control_mode.as_str(),
            panels.len(),
            total_gems
        );

        Self {
            clock,
            detector: GestureDetector::from_settings(&settings),
            bus: EventBus::new(),
            balls: Vec::new(),
            panels,
            barriers: Vec::new(),
            score: ScoreKeeper::new(total_gems, &settings),
            levels: LevelProgress::new(level_count),
            spawns: Vec::new(),
            next_id: 1,
            settings,
        }
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn detector(&self) -> &GestureDetector {
        &self.detector
    }

    pub fn now(&self) -> Millis {
        self.clock.now_ms()
    }

    pub fn ball(&self, id: u32) -> Option<&Ball> {
        self.balls.iter().find(|b| b.id == id)
    }

    pub fn panel(&self, hemisphere: Hemisphere) -> Option<&Panel> {
        self.panels.iter().find(|p| p.hemisphere == hemisphere)
    }

    /// Add a ball and remember its spawn for round restarts
    pub fn spawn_ball(&mut self, position: Vec3, velocity: Vec3) -> u32 {
        self.spawns.push(Spawn { position, velocity });
        self.insert_ball(position, velocity)
    }

    /// Add a barrier that opens while the ball dodges
    pub fn add_barrier(&mut self, name: impl Into<String>) -> usize {
        let mut barrier = Barrier::new(name);
        barrier.attach(&mut self.bus);
        self.barriers.push(barrier);
        self.barriers.len() - 1
    }

    /// Render-frame update. Returns a scene change once the round is decided.
    pub fn frame(&mut self, input: &InputFrame) -> Option<SceneRequest> {
        let now = self.clock.now_ms();

        let gestures = self.detector.update(input, now);
        for gesture in &gestures {
            self.bus.publish(&GameEvent::Gesture(*gesture));
            if !self.routes(gesture) {
                continue;
            }
            for ball in &mut self.balls {
                ball.on_gesture(gesture, now, &mut self.bus);
            }
        }

        let device = self.settings.device;
        for ball in &mut self.balls {
            ball.frame(input, device, now, &mut self.bus);
        }

        let delta_x = self.detector.delta_x();
        for panel in &mut self.panels {
            panel.update(device, &input.touches, delta_x);
        }

        self.check_bounds(now);
        self.score.poll(now)
    }

    /// Fixed-step update
    pub fn physics_step(&mut self) {
        for ball in &mut self.balls {
            ball.physics_step();
        }
    }

    /// Engine trigger: a ball touched a gem
    pub fn collect_gem(&mut self) {
        let now = self.clock.now_ms();
        self.score.collect_gem(now);
    }

    /// Engine collision: a ball hit a panel at `contact_x`
    pub fn panel_hit(&mut self, ball_id: u32, hemisphere: Hemisphere, contact_x: f32) {
        self.score.panel_hit();

        let Some(panel) = self.panels.iter().find(|p| p.hemisphere == hemisphere) else {
            log::debug!("Hit on missing {:?} panel ignored", hemisphere);
            return;
        };
        if let Some(ball) = self.balls.iter_mut().find(|b| b.id == ball_id) {
            ball.body.velocity = panel.deflect(ball.body.velocity, contact_x);
            ball.charge();
        }
    }

    /// Start the round over: fresh score, balls back at their spawns, barriers closed
    pub fn restart_round(&mut self) {
        self.score = ScoreKeeper::new(self.score.total_gems, &self.settings);
        // Dodges cut short by the restart never publish DodgeEnded
        for barrier in &self.barriers {
            barrier.reset();
        }
        self.balls.clear();
        let spawns = self.spawns.clone();
        for spawn in spawns {
            self.insert_ball(spawn.position, spawn.velocity);
        }
        log::info!("Round restarted on level {}", self.levels.current);
    }

    fn insert_ball(&mut self, position: Vec3, velocity: Vec3) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        let mut ball = Ball::new(
            id,
            position,
            &self.settings.mechanics,
            self.settings.initial_max_speed,
        )
        .with_aim_source(self.settings.aim_source());
        ball.body.velocity = velocity;
        self.balls.push(ball);
        id
    }

    fn routes(&self, gesture: &Gesture) -> bool {
        match gesture {
            Gesture::DoubleTap { .. } => self.settings.dodge_enabled,
            _ => self.settings.dash_enabled,
        }
    }

    fn check_bounds(&mut self, now: Millis) {
        if self.score.is_round_over() {
            return;
        }
        let arena = self.settings.arena;
        let mut lost = false;
        for ball in &mut self.balls {
            let p = ball.body.position;
            if arena.is_outside(p.x, p.y) {
                ball.body.collision = false;
                lost = true;
            }
        }
        if lost {
            self.score.game_over(now);
        }
    }
}
