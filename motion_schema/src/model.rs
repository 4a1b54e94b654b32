use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Milliseconds since the session clock started (countdown end).
pub type Millis = f64;

pub const HAND_LANDMARK_COUNT: usize = 21;
pub const BODY_LANDMARK_COUNT: usize = 33;

/// One detector joint, normalized to the source frame. `y` grows downward.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Landmark {
    pub x: f32,
    pub y: f32,
    #[serde(default)]
    pub z: f32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub visibility: Option<f32>,
}

impl Landmark {
    pub const fn new(x: f32, y: f32) -> Self {
        Self {
            x,
            y,
            z: 0.0,
            visibility: None,
        }
    }

    /// Planar distance, ignoring depth.
    pub fn distance(&self, other: &Landmark) -> f32 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Handedness {
    Left,
    Right,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HandObservation {
    pub handedness: Handedness,
    pub landmarks: Vec<Landmark>,
}

/// Whatever the detector reported most recently. Both parts may be empty.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct InputFrame {
    #[serde(default)]
    pub hands: Vec<HandObservation>,
    #[serde(default)]
    pub body: Vec<Landmark>,
}

impl InputFrame {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn hand(&self, handedness: Handedness) -> Option<&[Landmark]> {
        self.hands
            .iter()
            .find(|h| h.handedness == handedness)
            .map(|h| h.landmarks.as_slice())
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("unknown {kind}: {value}")]
pub struct ParseNameError {
    pub kind: &'static str,
    pub value: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GameType {
    Rhythm,
    PoseMatch,
    FruitNinja,
    Bubble,
    WhackAMole,
}

impl GameType {
    pub const ALL: [GameType; 5] = [
        GameType::Rhythm,
        GameType::PoseMatch,
        GameType::FruitNinja,
        GameType::Bubble,
        GameType::WhackAMole,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            GameType::Rhythm => "rhythm",
            GameType::PoseMatch => "pose_match",
            GameType::FruitNinja => "fruit_ninja",
            GameType::Bubble => "bubble",
            GameType::WhackAMole => "whack_a_mole",
        }
    }
}

impl fmt::Display for GameType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for GameType {
    type Err = ParseNameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase().replace('-', "_");
        GameType::ALL
            .into_iter()
            .find(|g| g.as_str() == normalized)
            .ok_or_else(|| ParseNameError {
                kind: "game",
                value: s.to_string(),
            })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Difficulty {
    Easy,
    Normal,
    Hard,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Normal, Difficulty::Hard];

    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Normal => "normal",
            Difficulty::Hard => "hard",
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Difficulty {
    type Err = ParseNameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase();
        Difficulty::ALL
            .into_iter()
            .find(|d| d.as_str() == normalized)
            .ok_or_else(|| ParseNameError {
                kind: "difficulty",
                value: s.to_string(),
            })
    }
}
