use motion_schema::{JudgmentSource, JudgmentTier, Millis, SessionResult, TierCounts};
use serde::{Deserialize, Serialize};

/// One resolved event, as kept in the session log.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Judgment {
    pub event_id: String,
    pub tier: JudgmentTier,
    pub source: JudgmentSource,
    /// Elapsed session time when the judgment was made.
    pub at_ms: Millis,
    /// Replaces the table value for this judgment (fruit points, bomb penalty).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub points: Option<i64>,
}

impl Judgment {
    pub fn new(event_id: impl Into<String>, tier: JudgmentTier, source: JudgmentSource, at_ms: Millis) -> Self {
        Self {
            event_id: event_id.into(),
            tier,
            source,
            at_ms,
            points: None,
        }
    }

    pub fn with_points(mut self, points: i64) -> Self {
        self.points = Some(points);
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ComboBonus {
    None,
    /// Each non-miss judgment adds `floor(combo / 10) * points`.
    PerDecade(i64),
}

/// Points per tier plus the combo bonus rule of one game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TierTable {
    pub perfect: i64,
    pub great: i64,
    pub good: i64,
    pub miss: i64,
    pub combo_bonus: ComboBonus,
}

impl TierTable {
    pub const RHYTHM: TierTable = TierTable {
        perfect: 100,
        great: 70,
        good: 40,
        miss: 0,
        combo_bonus: ComboBonus::PerDecade(10),
    };

    pub const POSE_MATCH: TierTable = TierTable {
        perfect: 100,
        great: 70,
        good: 70,
        miss: 0,
        combo_bonus: ComboBonus::None,
    };

    /// Sliced fruit carry their own points; this is the fallback.
    pub const FRUIT_NINJA: TierTable = TierTable {
        perfect: 10,
        great: 10,
        good: 10,
        miss: 0,
        combo_bonus: ComboBonus::None,
    };

    pub const BUBBLE: TierTable = TierTable {
        perfect: 10,
        great: 10,
        good: 10,
        miss: 0,
        combo_bonus: ComboBonus::None,
    };

    pub const WHACK_A_MOLE: TierTable = TierTable {
        perfect: 100,
        great: 70,
        good: 40,
        miss: 0,
        combo_bonus: ComboBonus::None,
    };

    pub fn points(&self, tier: JudgmentTier) -> i64 {
        match tier {
            JudgmentTier::Perfect => self.perfect,
            JudgmentTier::Great => self.great,
            JudgmentTier::Good => self.good,
            JudgmentTier::Miss => self.miss,
        }
    }

    pub fn bonus(&self, combo: u32) -> i64 {
        match self.combo_bonus {
            ComboBonus::None => 0,
            ComboBonus::PerDecade(points) => (combo / 10) as i64 * points,
        }
    }
}

/// Running score and combo. Not clamped; the live display may go negative.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ScoreBoard {
    pub score: i64,
    pub combo: u32,
    pub max_combo: u32,
    pub counts: TierCounts,
}

impl ScoreBoard {
    /// Applies one judgment and returns the points it earned.
    pub fn apply(&mut self, table: &TierTable, judgment: &Judgment) -> i64 {
        self.counts.add(judgment.tier);
        let mut gained = judgment.points.unwrap_or_else(|| table.points(judgment.tier));

        if judgment.tier.is_miss() {
            self.combo = 0;
        } else {
            self.combo += 1;
            self.max_combo = self.max_combo.max(self.combo);
            gained += table.bonus(self.combo);
        }

        self.score += gained;
        gained
    }

    pub fn to_result(&self) -> SessionResult {
        SessionResult {
            counts: self.counts,
            max_combo: self.max_combo,
            score: self.score.max(0),
            judged: self.counts.total(),
        }
    }
}

/// Reduces a whole judgment log. Pure: same log, same result.
pub fn finalize(table: &TierTable, log: &[Judgment]) -> SessionResult {
    let mut board = ScoreBoard::default();
    for judgment in log {
        board.apply(table, judgment);
    }
    board.to_result()
}
