use motion_schema::{
    Difficulty, GameSummary, GameType, InputFrame, JudgmentSource, JudgmentTier, Landmark, Millis,
};
use rand::Rng;

use super::{Driver, GameRules};
use crate::chart::{FlightState, Mole};
use crate::config::{ConfigError, GameConfig, MoleConfig};
use crate::gameplay::{Judgment, TierTable};
use crate::gesture::hand::palm_center;
use crate::input::events::GripTracker;
use crate::timeline::{spawn_mole, SpawnTimer};

pub type MoleDriver<R> = Driver<MoleGame<R>>;

pub const FIRST_MOLE_MS: Millis = 1000.0;

/// Grid cell (row-major) under a normalized point, clamped to the grid.
pub fn cell_at(point: &Landmark, grid_size: usize) -> usize {
    let n = grid_size.max(1);
    let axis = |v: f32| ((v.max(0.0) * n as f32) as usize).min(n - 1);
    axis(point.y) * n + axis(point.x)
}

/// Faster reactions earn better tiers, in thirds of the up-time.
pub fn reaction_tier(reaction_ms: Millis, up_duration_ms: Millis) -> JudgmentTier {
    let fraction = reaction_ms / up_duration_ms;
    if fraction <= 1.0 / 3.0 {
        JudgmentTier::Perfect
    } else if fraction <= 2.0 / 3.0 {
        JudgmentTier::Great
    } else {
        JudgmentTier::Good
    }
}

/// Moles pop from a square grid of holes; closing a fist over a raised
/// mole whacks it.
#[derive(Debug)]
pub struct MoleGame<R> {
    config: MoleConfig,
    difficulty: Difficulty,
    rng: R,
    moles: Vec<Mole>,
    timer: SpawnTimer,
    grips: GripTracker,
}

impl<R: Rng> MoleGame<R> {
    pub fn new(config: MoleConfig, difficulty: Difficulty, rng: R) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            timer: SpawnTimer::new(config.spawn_interval_ms, FIRST_MOLE_MS, config.game_duration_ms),
            config,
            difficulty,
            rng,
            moles: Vec::new(),
            grips: GripTracker::new(),
        })
    }

    pub fn config(&self) -> &MoleConfig {
        &self.config
    }

    pub fn moles(&self) -> &[Mole] {
        &self.moles
    }

    fn whack(&mut self, frame: &InputFrame, elapsed_ms: Millis, judgments: &mut Vec<Judgment>) {
        for grip in self.grips.update(frame, elapsed_ms) {
            let Some(palm) = frame.hand(grip.hand).and_then(palm_center) else {
                continue;
            };
            let hole = cell_at(&palm, self.config.grid_size);
            let Some(mole) = self.moles.iter_mut().find(|m| m.is_up() && m.hole == hole) else {
                continue;
            };
            mole.state = FlightState::Hit;
            let tier = reaction_tier(elapsed_ms - mole.raised_at, mole.up_duration);
            judgments.push(Judgment::new(mole.id.clone(), tier, JudgmentSource::Action, elapsed_ms));
        }
    }

    fn escape(&mut self, elapsed_ms: Millis, force: bool, judgments: &mut Vec<Judgment>) {
        for mole in self.moles.iter_mut().filter(|m| m.is_up()) {
            if force || elapsed_ms - mole.raised_at > mole.up_duration {
                mole.state = FlightState::Escaped;
                judgments.push(Judgment::new(
                    mole.id.clone(),
                    JudgmentTier::Miss,
                    JudgmentSource::Timeout,
                    elapsed_ms,
                ));
            }
        }
    }

    fn count(&self, state: FlightState) -> u32 {
        self.moles.iter().filter(|m| m.state == state).count() as u32
    }
}

impl<R: Rng> GameRules for MoleGame<R> {
    const GAME: GameType = GameType::WhackAMole;

    fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    fn table(&self) -> TierTable {
        TierTable::WHACK_A_MOLE
    }

    fn game_duration_ms(&self) -> Millis {
        self.config.game_duration_ms
    }

    fn begin(&mut self) {}

    fn step(&mut self, elapsed_ms: Millis, frame: &InputFrame, judgments: &mut Vec<Judgment>) {
        self.whack(frame, elapsed_ms, judgments);
        self.escape(elapsed_ms, false, judgments);

        if self.timer.poll(elapsed_ms) {
            let occupied: Vec<usize> = self.moles.iter().filter(|m| m.is_up()).map(|m| m.hole).collect();
            let seq = self.moles.len();
            if let Some(mole) = spawn_mole(&mut self.rng, &self.config, &occupied, elapsed_ms, seq) {
                self.moles.push(mole);
            }
        }
    }

    fn expire_all(&mut self, elapsed_ms: Millis, judgments: &mut Vec<Judgment>) {
        self.escape(elapsed_ms, true, judgments);
    }

    fn summary(&self) -> GameSummary {
        GameSummary::WhackAMole {
            whacked: self.count(FlightState::Hit),
            escaped: self.count(FlightState::Escaped),
        }
    }
}

impl<R: Rng> Driver<MoleGame<R>> {
    pub fn new(difficulty: Difficulty, rng: R) -> Result<Self, ConfigError> {
        Self::with_config(MoleConfig::for_difficulty(difficulty), difficulty, rng)
    }

    pub fn with_config(config: MoleConfig, difficulty: Difficulty, rng: R) -> Result<Self, ConfigError> {
        Ok(Self::from_rules(MoleGame::new(config, difficulty, rng)?))
    }
}
