use serde::{Deserialize, Serialize};

use crate::model::{Difficulty, GameType, InputFrame, Millis};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TraceFrame {
    /// Host clock at the driver tick, countdown included.
    pub host_ms: Millis,
    #[serde(flatten)]
    pub frame: InputFrame,
}

/// Detector output recorded from a live session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LandmarkTrace {
    pub game: GameType,
    pub difficulty: Difficulty,
    #[serde(default)]
    pub seed: Option<u64>,
    pub frames: Vec<TraceFrame>,
}
