//! Timed events the player acts on, plus their per-frame state.
//!
//! Identity (`id`, timing, spawn data) is fixed at generation time. The
//! status fields are written only by the driver that owns the session.

use glam::Vec2;
use motion_schema::{Handedness, JudgmentTier, Millis};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Lane {
    Left,
    Right,
}

impl Lane {
    pub fn other(&self) -> Lane {
        match self {
            Lane::Left => Lane::Right,
            Lane::Right => Lane::Left,
        }
    }
}

impl From<Handedness> for Lane {
    fn from(h: Handedness) -> Self {
        match h {
            Handedness::Left => Lane::Left,
            Handedness::Right => Lane::Right,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct EventStatus {
    pub active: bool,
    pub judgment: Option<JudgmentTier>,
}

impl EventStatus {
    pub fn is_judged(&self) -> bool {
        self.judgment.is_some()
    }

    pub fn is_open(&self) -> bool {
        self.active && self.judgment.is_none()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Note {
    pub id: String,
    pub timing: Millis,
    pub lane: Lane,
    pub duration: Millis,
    #[serde(default)]
    pub status: EventStatus,
}

impl Note {
    /// 0 when the note appears, 1 at its hit time.
    pub fn progress(&self, elapsed: Millis, travel_ms: Millis) -> f64 {
        (elapsed - (self.timing - travel_ms)) / travel_ms
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Wall {
    pub id: String,
    /// When the wall reaches the judgment line.
    pub timing: Millis,
    pub pose: String,
    pub hole_shape: String,
    #[serde(default)]
    pub status: EventStatus,
    #[serde(default)]
    pub accuracy: Option<u8>,
}

/// Horizontal wall position: 1 at the right edge, this at the judgment line.
pub const WALL_JUDGE_LINE: f64 = 0.25;

impl Wall {
    pub fn position(&self, elapsed: Millis, travel_ms: Millis) -> f64 {
        WALL_JUDGE_LINE + (self.timing - elapsed) / travel_ms * (1.0 - WALL_JUDGE_LINE)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FruitKind {
    Apple,
    Orange,
    Watermelon,
    Banana,
    Bomb,
}

impl FruitKind {
    pub const FRUITS: [FruitKind; 4] = [
        FruitKind::Apple,
        FruitKind::Orange,
        FruitKind::Watermelon,
        FruitKind::Banana,
    ];

    pub fn radius(&self) -> f32 {
        match self {
            FruitKind::Apple | FruitKind::Orange => 30.0,
            FruitKind::Watermelon => 45.0,
            FruitKind::Banana => 28.0,
            FruitKind::Bomb => 32.0,
        }
    }

    /// Points for slicing; bombs use the configured penalty instead.
    pub fn points(&self) -> i64 {
        match self {
            FruitKind::Apple | FruitKind::Orange => 10,
            FruitKind::Banana => 15,
            FruitKind::Watermelon => 20,
            FruitKind::Bomb => 0,
        }
    }

    pub fn is_bomb(&self) -> bool {
        matches!(self, FruitKind::Bomb)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FlightState {
    Flying,
    /// Sliced fruit, or a popped bubble, or a whacked mole.
    Hit,
    /// Left the playfield untouched.
    Escaped,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Fruit {
    pub id: String,
    pub kind: FruitKind,
    pub spawn: Vec2,
    pub position: Vec2,
    /// Pixels per second.
    pub velocity: Vec2,
    pub radius: f32,
    pub points: i64,
    pub spawned_at: Millis,
    pub state: FlightState,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bubble {
    pub id: String,
    pub position: Vec2,
    pub velocity: Vec2,
    pub radius: f32,
    pub spawned_at: Millis,
    /// Fully inside the canvas at least once.
    pub entered: bool,
    pub state: FlightState,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Mole {
    pub id: String,
    /// Row-major cell index in the grid.
    pub hole: usize,
    pub raised_at: Millis,
    pub up_duration: Millis,
    pub state: FlightState,
}

impl Mole {
    pub fn is_up(&self) -> bool {
        self.state == FlightState::Flying
    }
}
