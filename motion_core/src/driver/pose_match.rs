use motion_schema::{Difficulty, GameSummary, GameType, InputFrame, Millis};
use rand::Rng;

use super::{Driver, GameRules};
use crate::chart::Wall;
use crate::config::{ConfigError, GameConfig, PoseMatchConfig};
use crate::gameplay::{Dwell, Judgment, TierTable, WallJudge, WallResult};
use crate::timeline::generate_walls;

pub type PoseMatchDriver<R> = Driver<PoseMatchGame<R>>;

/// Walls with a pose-shaped hole slide toward the player, who must hold
/// the pose as the wall crosses the judgment band.
#[derive(Debug)]
pub struct PoseMatchGame<R> {
    config: PoseMatchConfig,
    difficulty: Difficulty,
    rng: R,
    judge: WallJudge,
    walls: Vec<Wall>,
    dwell: Vec<Dwell>,
}

impl<R: Rng> PoseMatchGame<R> {
    pub fn new(config: PoseMatchConfig, difficulty: Difficulty, rng: R) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            judge: WallJudge::new(config.travel_ms, config.dwell_ms),
            config,
            difficulty,
            rng,
            walls: Vec::new(),
            dwell: Vec::new(),
        })
    }

    pub fn config(&self) -> &PoseMatchConfig {
        &self.config
    }

    pub fn walls(&self) -> &[Wall] {
        &self.walls
    }

    pub fn dwell(&self) -> &[Dwell] {
        &self.dwell
    }

    fn emit(&self, results: Vec<WallResult>, at_ms: Millis, out: &mut Vec<Judgment>) {
        out.extend(results.into_iter().map(|r| {
            Judgment::new(self.walls[r.wall_index].id.clone(), r.tier, r.source, at_ms)
        }));
    }
}

impl<R: Rng> GameRules for PoseMatchGame<R> {
    const GAME: GameType = GameType::PoseMatch;

    fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    fn table(&self) -> TierTable {
        TierTable::POSE_MATCH
    }

    fn game_duration_ms(&self) -> Millis {
        self.config.game_duration_ms
    }

    fn begin(&mut self) {
        self.walls = generate_walls(
            &mut self.rng,
            &self.config,
            self.difficulty,
            self.config.game_duration_ms,
        );
        self.dwell = vec![Dwell::Outside; self.walls.len()];
        log::info!("pose-match timeline: {} walls", self.walls.len());
    }

    fn step(&mut self, elapsed_ms: Millis, frame: &InputFrame, judgments: &mut Vec<Judgment>) {
        let results = self
            .judge
            .update(elapsed_ms, &frame.body, &mut self.walls, &mut self.dwell);
        self.emit(results, elapsed_ms, judgments);
    }

    fn expire_all(&mut self, elapsed_ms: Millis, judgments: &mut Vec<Judgment>) {
        let results = self.judge.expire_all(&mut self.walls);
        self.emit(results, elapsed_ms, judgments);
    }

    fn summary(&self) -> GameSummary {
        let accuracies: Vec<u8> = self.walls.iter().filter_map(|w| w.accuracy).collect();
        let passed = accuracies.iter().filter(|&&a| a > 0).count() as u32;
        let failed = accuracies.len() as u32 - passed;
        let average_accuracy = if accuracies.is_empty() {
            0.0
        } else {
            accuracies.iter().map(|&a| a as f64).sum::<f64>() / accuracies.len() as f64
        };
        GameSummary::PoseMatch {
            passed,
            failed,
            average_accuracy,
        }
    }
}

impl<R: Rng> Driver<PoseMatchGame<R>> {
    pub fn new(difficulty: Difficulty, rng: R) -> Result<Self, ConfigError> {
        Self::with_config(PoseMatchConfig::for_difficulty(difficulty), difficulty, rng)
    }

    pub fn with_config(config: PoseMatchConfig, difficulty: Difficulty, rng: R) -> Result<Self, ConfigError> {
        Ok(Self::from_rules(PoseMatchGame::new(config, difficulty, rng)?))
    }
}
