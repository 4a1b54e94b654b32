use log::{debug, info, warn};
use motion_schema::{Millis, SessionResult};
use serde::Serialize;
use thiserror::Error;

use super::score::{finalize, Judgment, ScoreBoard, TierTable};

pub const DEFAULT_COUNTDOWN_MS: Millis = 3000.0;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum SessionState {
    Idle,
    Countdown { ends_at: Millis },
    /// `started_at` is the host time of session clock zero.
    Playing { started_at: Millis },
    Finalized,
}

impl SessionState {
    pub fn name(&self) -> &'static str {
        match self {
            SessionState::Idle => "idle",
            SessionState::Countdown { .. } => "countdown",
            SessionState::Playing { .. } => "playing",
            SessionState::Finalized => "finalized",
        }
    }
}

#[derive(Debug, Error, Clone, PartialEq)]
pub enum SessionError {
    #[error("session already started (state: {0})")]
    AlreadyStarted(&'static str),

    #[error("judgments are only accepted while playing (state: {0})")]
    NotPlaying(&'static str),

    #[error("judgment for {event_id} at {at_ms}ms precedes the previous one at {last_ms}ms")]
    OutOfOrder {
        event_id: String,
        at_ms: Millis,
        last_ms: Millis,
    },
}

/// What `advance` observed at a host time.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Phase {
    Idle,
    Countdown { remaining_ms: Millis },
    Playing { elapsed_ms: Millis, just_started: bool },
    /// Elapsed time reached the game duration; the owner should expire what
    /// is left and then call `finalize`.
    TimeUp { elapsed_ms: Millis },
    Finalized,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LiveScore {
    pub score: i64,
    pub combo: u32,
    pub max_combo: u32,
}

/// One play-through: `Idle -> Countdown -> Playing -> Finalized`.
#[derive(Debug, Clone)]
pub struct Session {
    table: TierTable,
    game_duration_ms: Millis,
    state: SessionState,
    log: Vec<Judgment>,
    board: ScoreBoard,
    result: Option<SessionResult>,
    last_elapsed: Millis,
}

impl Session {
    pub fn new(table: TierTable, game_duration_ms: Millis) -> Self {
        Self {
            table,
            game_duration_ms,
            state: SessionState::Idle,
            log: Vec::new(),
            board: ScoreBoard::default(),
            result: None,
            last_elapsed: 0.0,
        }
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn table(&self) -> &TierTable {
        &self.table
    }

    pub fn game_duration_ms(&self) -> Millis {
        self.game_duration_ms
    }

    pub fn log(&self) -> &[Judgment] {
        &self.log
    }

    pub fn live(&self) -> LiveScore {
        LiveScore {
            score: self.board.score,
            combo: self.board.combo,
            max_combo: self.board.max_combo,
        }
    }

    /// Elapsed play time at the last `advance`.
    pub fn elapsed_ms(&self) -> Millis {
        self.last_elapsed
    }

    pub fn is_finalized(&self) -> bool {
        self.state == SessionState::Finalized
    }

    pub fn start(&mut self, host_ms: Millis, countdown_ms: Millis) -> Result<(), SessionError> {
        if self.state != SessionState::Idle {
            return Err(SessionError::AlreadyStarted(self.state.name()));
        }
        self.state = SessionState::Countdown {
            ends_at: host_ms + countdown_ms.max(0.0),
        };
        info!("session countdown started ({countdown_ms}ms)");
        Ok(())
    }

    pub fn advance(&mut self, host_ms: Millis) -> Phase {
        let mut just_started = false;
        if let SessionState::Countdown { ends_at } = self.state {
            if host_ms < ends_at {
                return Phase::Countdown {
                    remaining_ms: ends_at - host_ms,
                };
            }
            self.state = SessionState::Playing { started_at: ends_at };
            just_started = true;
            info!("session playing ({}ms)", self.game_duration_ms);
        }

        match self.state {
            SessionState::Idle => Phase::Idle,
            SessionState::Finalized => Phase::Finalized,
            SessionState::Countdown { .. } => unreachable!("countdown handled above"),
            SessionState::Playing { started_at } => {
                // Host time never runs the session clock backwards.
                let elapsed = (host_ms - started_at).max(self.last_elapsed);
                self.last_elapsed = elapsed.min(self.game_duration_ms);
                if elapsed >= self.game_duration_ms {
                    Phase::TimeUp {
                        elapsed_ms: self.game_duration_ms,
                    }
                } else {
                    Phase::Playing {
                        elapsed_ms: elapsed,
                        just_started,
                    }
                }
            }
        }
    }

    /// Appends a judgment and updates the live score. Returns points gained.
    pub fn record(&mut self, judgment: Judgment) -> Result<i64, SessionError> {
        if !matches!(self.state, SessionState::Playing { .. }) {
            return Err(SessionError::NotPlaying(self.state.name()));
        }
        if let Some(last) = self.log.last() {
            if judgment.at_ms < last.at_ms {
                warn!(
                    "rejecting out-of-order judgment for {} ({}ms < {}ms)",
                    judgment.event_id, judgment.at_ms, last.at_ms
                );
                return Err(SessionError::OutOfOrder {
                    event_id: judgment.event_id,
                    at_ms: judgment.at_ms,
                    last_ms: last.at_ms,
                });
            }
        }

        let gained = self.board.apply(&self.table, &judgment);
        debug!(
            "{} -> {:?} ({:+}) combo={} score={}",
            judgment.event_id, judgment.tier, gained, self.board.combo, self.board.score
        );
        self.log.push(judgment);
        Ok(gained)
    }

    /// Ends the session from any state and returns the result over the
    /// judgments logged so far. Repeated calls return the same result.
    pub fn finalize(&mut self) -> SessionResult {
        if let Some(result) = &self.result {
            return result.clone();
        }
        let result = finalize(&self.table, &self.log);
        info!(
            "session finalized from {}: {} judged, score {}, max combo {}",
            self.state.name(),
            result.judged,
            result.score,
            result.max_combo
        );
        self.state = SessionState::Finalized;
        self.result = Some(result.clone());
        result
    }
}
