//! Per-frame game loops.
//!
//! A [`Driver`] owns one [`Session`] and one game's rules and events. The
//! host calls [`GameDriver::tick`] once per animation frame with its clock
//! and the detector's latest frame.

pub mod bubble;
pub mod fruit_ninja;
pub mod pose_match;
pub mod rhythm;
pub mod whack_a_mole;

use motion_schema::{Difficulty, GameSummary, GameType, InputFrame, Millis, ScoreRecord};

use crate::gameplay::{Judgment, LiveScore, Phase, Session, SessionError, SessionState, TierTable};

pub use bubble::{BubbleDriver, BubbleGame};
pub use fruit_ninja::{FruitNinjaDriver, FruitNinjaGame};
pub use pose_match::{PoseMatchDriver, PoseMatchGame};
pub use rhythm::{RhythmDriver, RhythmGame};
pub use whack_a_mole::{MoleDriver, MoleGame};

/// Game-specific part of a driver.
pub trait GameRules {
    const GAME: GameType;

    fn difficulty(&self) -> Difficulty;

    fn table(&self) -> TierTable;

    fn game_duration_ms(&self) -> Millis;

    /// Called once when the countdown ends (session clock zero).
    fn begin(&mut self);

    /// Advances events to `elapsed_ms` and pushes this frame's judgments.
    fn step(&mut self, elapsed_ms: Millis, frame: &InputFrame, judgments: &mut Vec<Judgment>);

    /// Default-misses everything still pending at time-up.
    fn expire_all(&mut self, elapsed_ms: Millis, judgments: &mut Vec<Judgment>);

    fn summary(&self) -> GameSummary;
}

/// Object-safe face of a driver for hosts that pick the game at runtime.
pub trait GameDriver {
    fn game(&self) -> GameType;

    fn difficulty(&self) -> Difficulty;

    fn session(&self) -> &Session;

    fn live(&self) -> LiveScore {
        self.session().live()
    }

    fn is_finished(&self) -> bool {
        self.session().is_finalized()
    }

    fn start(&mut self, host_ms: Millis) -> Result<(), SessionError>;

    fn tick(&mut self, host_ms: Millis, frame: &InputFrame) -> Result<Vec<Judgment>, SessionError>;

    /// Finalizes (early exit included) and builds the record to persist.
    /// A session that never started has nothing to record.
    fn finish(&mut self) -> Result<ScoreRecord, SessionError>;
}

#[derive(Debug)]
pub struct Driver<G> {
    rules: G,
    session: Session,
    countdown_ms: Millis,
    began: bool,
}

impl<G: GameRules> Driver<G> {
    pub fn from_rules(rules: G) -> Self {
        let session = Session::new(rules.table(), rules.game_duration_ms());
        Self {
            rules,
            session,
            countdown_ms: crate::gameplay::session::DEFAULT_COUNTDOWN_MS,
            began: false,
        }
    }

    pub fn with_countdown(mut self, countdown_ms: Millis) -> Self {
        self.countdown_ms = countdown_ms;
        self
    }

    /// Events and per-game state, for rendering.
    pub fn rules(&self) -> &G {
        &self.rules
    }

    pub fn rules_mut(&mut self) -> &mut G {
        &mut self.rules
    }

    fn begin_once(&mut self) {
        if !self.began {
            self.began = true;
            self.rules.begin();
        }
    }

    fn record_all(&mut self, judgments: &[Judgment]) -> Result<(), SessionError> {
        for judgment in judgments {
            self.session.record(judgment.clone())?;
        }
        Ok(())
    }
}

impl<G: GameRules> GameDriver for Driver<G> {
    fn game(&self) -> GameType {
        G::GAME
    }

    fn difficulty(&self) -> Difficulty {
        self.rules.difficulty()
    }

    fn session(&self) -> &Session {
        &self.session
    }

    fn start(&mut self, host_ms: Millis) -> Result<(), SessionError> {
        self.session.start(host_ms, self.countdown_ms)
    }

    fn tick(&mut self, host_ms: Millis, frame: &InputFrame) -> Result<Vec<Judgment>, SessionError> {
        let mut judgments = Vec::new();
        match self.session.advance(host_ms) {
            Phase::Idle | Phase::Countdown { .. } | Phase::Finalized => {}
            Phase::Playing { elapsed_ms, .. } => {
                self.begin_once();
                self.rules.step(elapsed_ms, frame, &mut judgments);
                self.record_all(&judgments)?;
            }
            Phase::TimeUp { elapsed_ms } => {
                self.begin_once();
                self.rules.step(elapsed_ms, frame, &mut judgments);
                self.rules.expire_all(elapsed_ms, &mut judgments);
                self.record_all(&judgments)?;
                self.session.finalize();
            }
        }
        Ok(judgments)
    }

    fn finish(&mut self) -> Result<ScoreRecord, SessionError> {
        let state = self.session.state();
        if state == SessionState::Idle {
            return Err(SessionError::NotPlaying(state.name()));
        }
        let result = self.session.finalize();
        Ok(ScoreRecord {
            game: G::GAME,
            difficulty: self.rules.difficulty(),
            duration_ms: self.session.elapsed_ms(),
            result,
            summary: self.rules.summary(),
        })
    }
}
