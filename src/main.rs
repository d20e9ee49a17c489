//! Orb Pong headless entry point
//!
//! Runs a demo session driven by the idle player, with a minimal stand-in for
//! the host engine's physics, and logs every event on the bus.
//!
//! Usage: `orb-pong [settings.json] [seed]`

use anyhow::Context;
use glam::{Vec2, Vec3};

use orb_pong::Settings;
use orb_pong::consts::*;
use orb_pong::idle::IdlePlayer;
use orb_pong::sim::{Hemisphere, World};
use orb_pong::time::ManualClock;

/// Frames simulated by the demo (about two minutes at 60 fps)
const DEMO_FRAMES: u32 = 7200;
const GEM_COUNT: usize = 8;
const GEM_RADIUS: f32 = 0.6;
const BALL_RADIUS: f32 = 0.5;
const LEVEL_COUNT: usize = 3;

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let mut args = std::env::args().skip(1);
    let settings = match args.next() {
        Some(path) => Settings::load(&path).with_context(|| format!("loading {path}"))?,
        None => Settings::default(),
    };
    let seed = match args.next() {
        Some(s) => s.parse::<u64>().with_context(|| format!("invalid seed {s:?}"))?,
        None => 0x0b_0b,
    };

    log::info!("Orb Pong (headless) starting...");
    log::info!("Mode {}, seed {}", settings.control_mode.as_str(), seed);

    let arena = settings.arena;
    let mut world = World::new(ManualClock::new(0), settings, GEM_COUNT as u32, LEVEL_COUNT);
    world.spawn_ball(Vec3::new(0.0, 4.0, 0.0), Vec3::new(1.5, -6.0, 0.0));
    world.add_barrier("gem cage");
    world.bus.subscribe_all(|event| log::info!("{event}"));

    let mut gems = place_gems(&arena);
    let mut idle = IdlePlayer::new(seed, arena);
    let mut accumulator = 0.0;

    for _ in 0..DEMO_FRAMES {
        world.clock().advance(FRAME_MS);
        let input = idle.next_frame();

        if let Some(request) = world.frame(&input) {
            let level = world.levels.apply(request);
            log::info!("{:?} -> level {} (score {})", request, level, world.score.score);
            world.restart_round();
            gems = place_gems(&arena);
        }

        accumulator += FRAME_MS as f32 / 1000.0;
        while accumulator >= PHYSICS_DT {
            world.physics_step();
            host_step(&mut world, &mut gems, PHYSICS_DT);
            accumulator -= PHYSICS_DT;
        }
    }

    log::info!(
        "Demo finished: level {}, score {}, gems {}/{}",
        world.levels.current,
        world.score.score,
        world.score.gems_collected,
        world.score.total_gems
    );
    Ok(())
}

/// Gems on a ring around the arena center
fn place_gems(arena: &orb_pong::settings::Arena) -> Vec<Vec2> {
    let radius = (arena.right - arena.left).min(arena.top - arena.bottom) * 0.3;
    (0..GEM_COUNT)
        .map(|i| {
            let theta = i as f32 / GEM_COUNT as f32 * std::f32::consts::TAU;
            Vec2::new(radius * theta.cos(), radius * theta.sin())
        })
        .collect()
}

/// Stand-in for the engine: integrate, bounce off side walls, report panel
/// hits and gem triggers back to the world.
fn host_step(world: &mut World<ManualClock>, gems: &mut Vec<Vec2>, dt: f32) {
    let arena = world.settings().arena;
    let mut panel_hits = Vec::new();
    let mut gem_hits = 0;

    for ball in &mut world.balls {
        ball.body.integrate(dt);
        if !ball.body.collision {
            continue;
        }

        let p = ball.body.position;
        if (p.x - BALL_RADIUS < arena.left && ball.body.velocity.x < 0.0)
            || (p.x + BALL_RADIUS > arena.right && ball.body.velocity.x > 0.0)
        {
            ball.body.velocity.x = -ball.body.velocity.x;
        }

        for panel in &world.panels {
            let moving_in = match panel.hemisphere {
                Hemisphere::Bottom => ball.body.velocity.y < 0.0 && p.y - BALL_RADIUS <= panel.y,
                Hemisphere::Top => ball.body.velocity.y > 0.0 && p.y + BALL_RADIUS >= panel.y,
            };
            if moving_in && (p.x - panel.x).abs() <= panel.half_width + BALL_RADIUS {
                ball.body.velocity.y = -ball.body.velocity.y;
                panel_hits.push((ball.id, panel.hemisphere, p.x));
            }
        }

        let before = gems.len();
        gems.retain(|g| g.distance(p.truncate()) > GEM_RADIUS + BALL_RADIUS);
        gem_hits += before - gems.len();
    }

    // Closed arena: the missing top panel is a wall
    if !world.settings().control_mode.has_top_panel() {
        for ball in &mut world.balls {
            if ball.body.position.y + BALL_RADIUS >= arena.top && ball.body.velocity.y > 0.0 {
                ball.body.velocity.y = -ball.body.velocity.y;
            }
        }
    }

    for (id, hemisphere, x) in panel_hits {
        world.panel_hit(id, hemisphere, x);
    }
    for _ in 0..gem_hits {
        world.collect_gem();
    }
}
