use motion_schema::{JudgmentSource, JudgmentTier, Landmark, Millis};
use serde::{Deserialize, Serialize};

use crate::chart::Wall;
use crate::gesture::matches_pose;

/// Accuracy for a pose held through the whole dwell.
pub const HELD_ACCURACY: u8 = 100;
/// Accuracy for a pose matched only at the judgment instant.
pub const INSTANT_ACCURACY: u8 = 70;
/// Fraction of travel after which an unreached wall fails outright.
pub const LATE_MARGIN: f64 = 0.1;

/// Pose tracking while a wall is inside the judgment band.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Dwell {
    #[default]
    Outside,
    /// Matched on every tick since the band opened.
    Holding,
    Broken,
}

#[derive(Debug, Clone, PartialEq)]
pub struct WallResult {
    pub wall_index: usize,
    pub tier: JudgmentTier,
    pub accuracy: u8,
    pub source: JudgmentSource,
}

#[derive(Debug, Clone, PartialEq)]
pub struct WallJudge {
    pub travel_ms: Millis,
    pub dwell_ms: Millis,
}

impl WallJudge {
    pub fn new(travel_ms: Millis, dwell_ms: Millis) -> Self {
        Self { travel_ms, dwell_ms }
    }

    pub fn late_deadline(&self, wall: &Wall) -> Millis {
        wall.timing + self.travel_ms * LATE_MARGIN
    }

    /// Advances every unjudged wall to `elapsed` using the current body
    /// landmarks. `dwell` runs parallel to `walls`.
    pub fn update(
        &self,
        elapsed: Millis,
        body: &[Landmark],
        walls: &mut [Wall],
        dwell: &mut [Dwell],
    ) -> Vec<WallResult> {
        let mut results = Vec::new();

        for (idx, (wall, dwell)) in walls.iter_mut().zip(dwell.iter_mut()).enumerate() {
            if wall.status.is_judged() {
                continue;
            }
            if elapsed >= wall.timing - self.travel_ms {
                wall.status.active = true;
            }
            if elapsed < wall.timing - self.dwell_ms {
                continue;
            }

            if elapsed > self.late_deadline(wall) {
                results.push(Self::settle(idx, wall, JudgmentTier::Miss, 0, JudgmentSource::Timeout));
                continue;
            }

            let matched = matches_pose(&wall.pose, body);
            if elapsed < wall.timing {
                *dwell = match (*dwell, matched) {
                    (Dwell::Outside, true) => Dwell::Holding,
                    (Dwell::Holding, true) => Dwell::Holding,
                    _ => Dwell::Broken,
                };
                continue;
            }

            let (tier, accuracy) = match (matched, *dwell) {
                (true, Dwell::Holding) => (JudgmentTier::Perfect, HELD_ACCURACY),
                (true, _) => (JudgmentTier::Great, INSTANT_ACCURACY),
                (false, _) => (JudgmentTier::Miss, 0),
            };
            results.push(Self::settle(idx, wall, tier, accuracy, JudgmentSource::Action));
        }
        results
    }

    /// Fails every wall that is still unjudged.
    pub fn expire_all(&self, walls: &mut [Wall]) -> Vec<WallResult> {
        walls
            .iter_mut()
            .enumerate()
            .filter(|(_, w)| !w.status.is_judged())
            .map(|(idx, wall)| Self::settle(idx, wall, JudgmentTier::Miss, 0, JudgmentSource::Timeout))
            .collect()
    }

    fn settle(
        idx: usize,
        wall: &mut Wall,
        tier: JudgmentTier,
        accuracy: u8,
        source: JudgmentSource,
    ) -> WallResult {
        wall.status.active = true;
        wall.status.judgment = Some(tier);
        wall.accuracy = Some(accuracy);
        WallResult {
            wall_index: idx,
            tier,
            accuracy,
            source,
        }
    }
}
