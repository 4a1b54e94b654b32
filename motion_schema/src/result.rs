use serde::{Deserialize, Serialize};

use crate::model::{Difficulty, GameType, Millis};

/// Quality tiers, declared best-first so `Ord` sorts better tiers lower.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JudgmentTier {
    Perfect,
    Great,
    Good,
    Miss,
}

impl JudgmentTier {
    pub const ALL: [JudgmentTier; 4] = [
        JudgmentTier::Perfect,
        JudgmentTier::Great,
        JudgmentTier::Good,
        JudgmentTier::Miss,
    ];

    pub fn is_miss(&self) -> bool {
        matches!(self, JudgmentTier::Miss)
    }

    /// True when `self` is strictly better than `other`.
    pub fn beats(&self, other: JudgmentTier) -> bool {
        *self < other
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JudgmentSource {
    /// Player action (grip, pose snapshot, slice, touch).
    Action,
    /// Default miss after the event passed the player.
    Timeout,
    /// Player touched a hazard (bomb).
    Hazard,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TierCounts {
    pub perfect: u32,
    pub great: u32,
    pub good: u32,
    pub miss: u32,
}

impl TierCounts {
    pub fn add(&mut self, tier: JudgmentTier) {
        match tier {
            JudgmentTier::Perfect => self.perfect += 1,
            JudgmentTier::Great => self.great += 1,
            JudgmentTier::Good => self.good += 1,
            JudgmentTier::Miss => self.miss += 1,
        }
    }

    pub fn get(&self, tier: JudgmentTier) -> u32 {
        match tier {
            JudgmentTier::Perfect => self.perfect,
            JudgmentTier::Great => self.great,
            JudgmentTier::Good => self.good,
            JudgmentTier::Miss => self.miss,
        }
    }

    pub fn total(&self) -> u32 {
        self.perfect + self.great + self.good + self.miss
    }
}

/// Finalized outcome of one session.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SessionResult {
    pub counts: TierCounts,
    pub max_combo: u32,
    pub score: i64,
    pub judged: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "game", rename_all = "snake_case")]
pub enum GameSummary {
    Rhythm,
    PoseMatch {
        passed: u32,
        failed: u32,
        average_accuracy: f64,
    },
    FruitNinja {
        sliced: u32,
        missed: u32,
        bombs_hit: u32,
        bombs_dodged: u32,
    },
    Bubble {
        popped: u32,
        escaped: u32,
    },
    WhackAMole {
        whacked: u32,
        escaped: u32,
    },
}

/// What the persistence collaborator receives at session end.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreRecord {
    pub game: GameType,
    pub difficulty: Difficulty,
    pub duration_ms: Millis,
    pub result: SessionResult,
    pub summary: GameSummary,
}
