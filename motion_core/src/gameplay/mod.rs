pub mod judge;
pub mod pose_wall;
pub mod score;
pub mod session;
pub mod slice;

pub use judge::{GripJudge, JudgmentResult, TimingWindows};
pub use pose_wall::{Dwell, WallJudge, WallResult};
pub use score::{finalize, ComboBonus, Judgment, ScoreBoard, TierTable};
pub use session::{LiveScore, Phase, Session, SessionError, SessionState};
