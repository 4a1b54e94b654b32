//! Event timelines.
//!
//! Rhythm notes and pose walls are generated in bulk when play starts;
//! fruit, bubbles and moles are spawned one at a time by their drivers.

pub mod notes;
pub mod spawn;
pub mod walls;

use motion_schema::Millis;
use rand::Rng;

pub use notes::generate_notes;
pub use spawn::{spawn_bubble, spawn_fruit, spawn_mole, SpawnTimer};
pub use walls::generate_walls;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScheduleParams {
    pub lead_in_ms: Millis,
    pub trailing_ms: Millis,
    pub interval_ms: Millis,
    /// Fraction of the interval used as jitter, centred on zero.
    pub variation: f64,
}

/// Event times from `lead_in_ms` up to `duration - trailing_ms`.
///
/// Sessions too short for the lead-in and trailing buffer get no events.
pub fn schedule<R: Rng + ?Sized>(rng: &mut R, params: ScheduleParams, duration_ms: Millis) -> Vec<Millis> {
    let mut times = Vec::new();
    let end = duration_ms - params.trailing_ms;
    // A non-positive step would never reach `end`.
    let min_step = params.interval_ms * (1.0 - params.variation / 2.0);
    if min_step <= 0.0 {
        return times;
    }

    let mut cursor = params.lead_in_ms;
    while cursor < end {
        times.push(cursor);
        let jitter = (rng.random::<f64>() - 0.5) * params.interval_ms * params.variation;
        cursor += params.interval_ms + jitter;
    }
    times
}
