use motion_schema::{Difficulty, Millis};
use rand::seq::IndexedRandom;
use rand::Rng;

use super::{schedule, ScheduleParams};
use crate::chart::{EventStatus, Wall};
use crate::config::PoseMatchConfig;
use crate::gesture::{PoseDefinition, POSES};

pub const WALL_LEAD_IN_MS: Millis = 3000.0;
pub const WALL_TRAILING_MS: Millis = 3000.0;
pub const WALL_VARIATION: f64 = 0.3;

/// Poses a wall may ask for on the given difficulty.
pub fn allowed_poses(difficulty: Difficulty) -> Vec<&'static PoseDefinition> {
    POSES
        .iter()
        .filter(|p| difficulty != Difficulty::Easy || p.simple)
        .collect()
}

pub fn generate_walls<R: Rng + ?Sized>(
    rng: &mut R,
    config: &PoseMatchConfig,
    difficulty: Difficulty,
    duration_ms: Millis,
) -> Vec<Wall> {
    let params = ScheduleParams {
        lead_in_ms: WALL_LEAD_IN_MS,
        trailing_ms: WALL_TRAILING_MS,
        interval_ms: config.wall_interval_ms,
        variation: WALL_VARIATION,
    };
    let poses = allowed_poses(difficulty);

    schedule(rng, params, duration_ms)
        .into_iter()
        .enumerate()
        .filter_map(|(i, timing)| {
            let pose = poses.choose(rng)?;
            Some(Wall {
                id: format!("wall-{i}"),
                timing,
                pose: pose.id.to_string(),
                hole_shape: pose.hole_shape.to_string(),
                status: EventStatus::default(),
                accuracy: None,
            })
        })
        .collect()
}
