use motion_schema::{Difficulty, GameSummary, GameType, InputFrame, JudgmentSource, Millis};
use rand::Rng;

use super::{Driver, GameRules};
use crate::chart::{Lane, Note};
use crate::config::{ConfigError, GameConfig, RhythmConfig};
use crate::gameplay::{GripJudge, Judgment, JudgmentResult, TierTable};
use crate::input::events::GripTracker;
use crate::timeline::generate_notes;

pub type RhythmDriver<R> = Driver<RhythmGame<R>>;

/// Two-lane grip rhythm game: close the left or right hand as a note
/// reaches the hit line.
#[derive(Debug)]
pub struct RhythmGame<R> {
    config: RhythmConfig,
    difficulty: Difficulty,
    rng: R,
    judge: GripJudge,
    notes: Vec<Note>,
    grips: GripTracker,
}

impl<R: Rng> RhythmGame<R> {
    pub fn new(config: RhythmConfig, difficulty: Difficulty, rng: R) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            judge: GripJudge::new(config.travel_ms),
            config,
            difficulty,
            rng,
            notes: Vec::new(),
            grips: GripTracker::new(),
        })
    }

    pub fn config(&self) -> &RhythmConfig {
        &self.config
    }

    pub fn notes(&self) -> &[Note] {
        &self.notes
    }

    pub fn judge(&self) -> &GripJudge {
        &self.judge
    }

    fn emit(&self, results: Vec<JudgmentResult>, source: JudgmentSource, at_ms: Millis, out: &mut Vec<Judgment>) {
        out.extend(
            results
                .into_iter()
                .map(|r| Judgment::new(self.notes[r.note_index].id.clone(), r.tier, source, at_ms)),
        );
    }
}

impl<R: Rng> GameRules for RhythmGame<R> {
    const GAME: GameType = GameType::Rhythm;

    fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    fn table(&self) -> TierTable {
        TierTable::RHYTHM
    }

    fn game_duration_ms(&self) -> Millis {
        self.config.game_duration_ms
    }

    fn begin(&mut self) {
        self.notes = generate_notes(
            &mut self.rng,
            &self.config,
            self.difficulty,
            self.config.game_duration_ms,
        );
        log::info!("rhythm timeline: {} notes", self.notes.len());
    }

    fn step(&mut self, elapsed_ms: Millis, frame: &InputFrame, judgments: &mut Vec<Judgment>) {
        self.judge.activate(elapsed_ms, &mut self.notes);

        let mut hits = Vec::new();
        for grip in self.grips.update(frame, elapsed_ms) {
            if let Some(hit) = self.judge.process_grip(Lane::from(grip.hand), grip.at_ms, &mut self.notes) {
                hits.push(hit);
            }
        }
        self.emit(hits, JudgmentSource::Action, elapsed_ms, judgments);

        let expired = self.judge.check_expired(elapsed_ms, &mut self.notes);
        self.emit(expired, JudgmentSource::Timeout, elapsed_ms, judgments);
    }

    fn expire_all(&mut self, elapsed_ms: Millis, judgments: &mut Vec<Judgment>) {
        let expired = self.judge.expire_all(elapsed_ms, &mut self.notes);
        self.emit(expired, JudgmentSource::Timeout, elapsed_ms, judgments);
    }

    fn summary(&self) -> GameSummary {
        GameSummary::Rhythm
    }
}

impl<R: Rng> Driver<RhythmGame<R>> {
    pub fn new(difficulty: Difficulty, rng: R) -> Result<Self, ConfigError> {
        Self::with_config(RhythmConfig::for_difficulty(difficulty), difficulty, rng)
    }

    pub fn with_config(config: RhythmConfig, difficulty: Difficulty, rng: R) -> Result<Self, ConfigError> {
        Ok(Self::from_rules(RhythmGame::new(config, difficulty, rng)?))
    }
}
