use glam::Vec2;
use motion_schema::Millis;
use rand::seq::IndexedRandom;
use rand::Rng;

use crate::chart::{Bubble, FlightState, Fruit, FruitKind, Mole};
use crate::config::{BubbleConfig, Canvas, FruitNinjaConfig, MoleConfig};

/// No new spawns this close to the end of a session.
pub const SPAWN_CUTOFF_MS: Millis = 2000.0;

/// Fixed-interval spawn clock. At most one spawn per poll, so a stalled
/// loop does not release a burst when it resumes.
#[derive(Debug, Clone, PartialEq)]
pub struct SpawnTimer {
    interval_ms: Millis,
    next_at: Millis,
    stop_at: Millis,
}

impl SpawnTimer {
    pub fn new(interval_ms: Millis, first_at: Millis, game_duration_ms: Millis) -> Self {
        Self {
            interval_ms,
            next_at: first_at,
            stop_at: game_duration_ms - SPAWN_CUTOFF_MS,
        }
    }

    pub fn poll(&mut self, now: Millis) -> bool {
        if now < self.next_at || now >= self.stop_at {
            return false;
        }
        self.next_at += self.interval_ms;
        if self.next_at <= now {
            self.next_at = now + self.interval_ms;
        }
        true
    }
}

/// Launch a fruit from below the canvas on an arc that peaks in the upper
/// part of the screen, drifting toward the centre.
pub fn spawn_fruit<R: Rng + ?Sized>(
    rng: &mut R,
    config: &FruitNinjaConfig,
    canvas: Canvas,
    now: Millis,
    seq: usize,
) -> Fruit {
    let kind = if rng.random_bool(config.bomb_chance) {
        FruitKind::Bomb
    } else {
        *FruitKind::FRUITS.choose(rng).unwrap_or(&FruitKind::Apple)
    };
    let radius = kind.radius();
    let (w, h) = (canvas.width, canvas.height);

    let spawn = Vec2::new(rng.random_range(0.2 * w..=0.8 * w), h + radius);
    let apex_y = rng.random_range(0.15 * h..=0.4 * h);
    let rise = (spawn.y - apex_y).max(1.0);
    let vy = -(2.0 * config.gravity * rise).sqrt();
    let time_to_apex = -vy / config.gravity;
    let target_x = w / 2.0 + rng.random_range(-0.15 * w..=0.15 * w);
    let vx = (target_x - spawn.x) / time_to_apex;

    Fruit {
        id: format!("fruit-{seq}"),
        kind,
        spawn,
        position: spawn,
        velocity: Vec2::new(vx, vy),
        radius,
        points: kind.points(),
        spawned_at: now,
        state: FlightState::Flying,
    }
}

/// Start a bubble just outside a random edge, heading into the middle band.
pub fn spawn_bubble<R: Rng + ?Sized>(
    rng: &mut R,
    config: &BubbleConfig,
    canvas: Canvas,
    now: Millis,
    seq: usize,
) -> Bubble {
    let (w, h) = (canvas.width, canvas.height);
    let r = config.bubble_radius;
    let position = match rng.random_range(0..4u8) {
        0 => Vec2::new(rng.random_range(0.1 * w..=0.9 * w), -r),
        1 => Vec2::new(w + r, rng.random_range(0.1 * h..=0.9 * h)),
        2 => Vec2::new(rng.random_range(0.1 * w..=0.9 * w), h + r),
        _ => Vec2::new(-r, rng.random_range(0.1 * h..=0.9 * h)),
    };
    let target = Vec2::new(
        rng.random_range(0.3 * w..=0.7 * w),
        rng.random_range(0.3 * h..=0.7 * h),
    );
    let heading = (target - position).try_normalize().unwrap_or(Vec2::X);

    Bubble {
        id: format!("bubble-{seq}"),
        position,
        velocity: heading * config.speed,
        radius: r,
        spawned_at: now,
        entered: false,
        state: FlightState::Flying,
    }
}

/// Raise a mole in a random hole that is not already up.
pub fn spawn_mole<R: Rng + ?Sized>(
    rng: &mut R,
    config: &MoleConfig,
    occupied: &[usize],
    now: Millis,
    seq: usize,
) -> Option<Mole> {
    let holes = config.grid_size * config.grid_size;
    let free: Vec<usize> = (0..holes).filter(|h| !occupied.contains(h)).collect();
    let hole = *free.choose(rng)?;
    Some(Mole {
        id: format!("mole-{seq}"),
        hole,
        raised_at: now,
        up_duration: config.up_duration_ms,
        state: FlightState::Flying,
    })
}
