use std::sync::Arc;

use log::info;
use motion_schema::{GameType, ScoreRecord};
use parking_lot::Mutex;

/// Receives the finished record once per session. Delivery failures are
/// the sink's concern; drivers never retry.
pub trait ScoreSink {
    fn add_score(&self, record: &ScoreRecord);
}

/// In-process score store, shareable across threads.
#[derive(Debug, Clone, Default)]
pub struct ScoreBook {
    records: Arc<Mutex<Vec<ScoreRecord>>>,
}

impl ScoreBook {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.records.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.lock().is_empty()
    }

    pub fn records(&self) -> Vec<ScoreRecord> {
        self.records.lock().clone()
    }

    pub fn best(&self, game: GameType) -> Option<ScoreRecord> {
        self.records
            .lock()
            .iter()
            .filter(|r| r.game == game)
            .max_by_key(|r| r.result.score)
            .cloned()
    }
}

impl ScoreSink for ScoreBook {
    fn add_score(&self, record: &ScoreRecord) {
        info!(
            "storing {} ({}) score {}",
            record.game, record.difficulty, record.result.score
        );
        self.records.lock().push(record.clone());
    }
}
