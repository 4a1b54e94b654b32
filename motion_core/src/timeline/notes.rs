use motion_schema::{Difficulty, Millis};
use rand::Rng;

use super::{schedule, ScheduleParams};
use crate::chart::{EventStatus, Lane, Note};
use crate::config::RhythmConfig;

pub const NOTE_LEAD_IN_MS: Millis = 2000.0;
pub const NOTE_TRAILING_MS: Millis = 2000.0;
pub const NOTE_VARIATION: f64 = 0.2;

pub fn generate_notes<R: Rng + ?Sized>(
    rng: &mut R,
    config: &RhythmConfig,
    difficulty: Difficulty,
    duration_ms: Millis,
) -> Vec<Note> {
    let params = ScheduleParams {
        lead_in_ms: NOTE_LEAD_IN_MS,
        trailing_ms: NOTE_TRAILING_MS,
        interval_ms: config.note_interval_ms,
        variation: NOTE_VARIATION,
    };

    let mut notes = Vec::new();
    let mut push = |notes: &mut Vec<Note>, timing: Millis, lane: Lane| {
        let id = format!("note-{}", notes.len());
        notes.push(Note {
            id,
            timing,
            lane,
            duration: config.note_duration_ms,
            status: EventStatus::default(),
        });
    };

    for timing in schedule(rng, params, duration_ms) {
        let lane = if rng.random_bool(0.5) { Lane::Left } else { Lane::Right };
        push(&mut notes, timing, lane);

        if difficulty != Difficulty::Easy && rng.random_bool(config.double_note_chance) {
            push(&mut notes, timing, lane.other());
        }
    }
    notes
}
