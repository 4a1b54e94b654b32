use glam::Vec2;
use motion_schema::{Difficulty, GameType, Landmark, Millis};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum ConfigError {
    #[error("{field} must be > 0 (got {value})")]
    NonPositive { field: &'static str, value: f64 },

    #[error("{field} must be within [0, 1] (got {value})")]
    NotAProbability { field: &'static str, value: f64 },

    #[error("{field} must be within [{min}, {max}] (got {value})")]
    OutOfRange {
        field: &'static str,
        value: f64,
        min: f64,
        max: f64,
    },

    #[error("canvas must have a positive size (got {width}x{height})")]
    InvalidCanvas { width: f32, height: f32 },
}

fn positive(field: &'static str, value: f64) -> Result<(), ConfigError> {
    if value > 0.0 && value.is_finite() {
        Ok(())
    } else {
        Err(ConfigError::NonPositive { field, value })
    }
}

fn probability(field: &'static str, value: f64) -> Result<(), ConfigError> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(ConfigError::NotAProbability { field, value })
    }
}

fn within(field: &'static str, value: f64, min: f64, max: f64) -> Result<(), ConfigError> {
    if (min..=max).contains(&value) {
        Ok(())
    } else {
        Err(ConfigError::OutOfRange { field, value, min, max })
    }
}

/// Largest points a sliced bomb may take away.
pub const MAX_BOMB_PENALTY: i64 = 10_000;

/// Largest whack-a-mole grid side.
pub const MAX_GRID_SIZE: usize = 8;

/// A per-game difficulty table.
pub trait GameConfig: Clone + Serialize + DeserializeOwned {
    const GAME: GameType;

    fn for_difficulty(difficulty: Difficulty) -> Self;

    fn game_duration_ms(&self) -> Millis;

    fn set_game_duration_ms(&mut self, duration_ms: Millis);

    /// Mean time between events; lower means denser.
    fn event_interval_ms(&self) -> Millis;

    fn validate(&self) -> Result<(), ConfigError>;
}

/// Playfield size in pixels for the spawn-driven games.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Canvas {
    pub width: f32,
    pub height: f32,
}

impl Canvas {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let ok = |v: f32| v > 0.0 && v.is_finite();
        if ok(self.width) && ok(self.height) {
            Ok(())
        } else {
            Err(ConfigError::InvalidCanvas {
                width: self.width,
                height: self.height,
            })
        }
    }

    /// Normalized landmark to canvas pixels.
    pub fn project(&self, landmark: &Landmark) -> Vec2 {
        Vec2::new(landmark.x * self.width, landmark.y * self.height)
    }
}

impl Default for Canvas {
    fn default() -> Self {
        Self {
            width: 1280.0,
            height: 720.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RhythmConfig {
    pub game_duration_ms: Millis,
    pub note_interval_ms: Millis,
    /// How long a note is on screen before its hit time.
    pub travel_ms: Millis,
    pub note_duration_ms: Millis,
    pub double_note_chance: f64,
}

impl GameConfig for RhythmConfig {
    const GAME: GameType = GameType::Rhythm;

    fn for_difficulty(difficulty: Difficulty) -> Self {
        match difficulty {
            Difficulty::Easy => Self {
                game_duration_ms: 60_000.0,
                note_interval_ms: 1500.0,
                travel_ms: 3000.0,
                note_duration_ms: 400.0,
                double_note_chance: 0.0,
            },
            Difficulty::Normal => Self {
                game_duration_ms: 60_000.0,
                note_interval_ms: 1100.0,
                travel_ms: 2400.0,
                note_duration_ms: 300.0,
                double_note_chance: 0.2,
            },
            Difficulty::Hard => Self {
                game_duration_ms: 60_000.0,
                note_interval_ms: 800.0,
                travel_ms: 1800.0,
                note_duration_ms: 250.0,
                double_note_chance: 0.2,
            },
        }
    }

    fn game_duration_ms(&self) -> Millis {
        self.game_duration_ms
    }

    fn set_game_duration_ms(&mut self, duration_ms: Millis) {
        self.game_duration_ms = duration_ms;
    }

    fn event_interval_ms(&self) -> Millis {
        self.note_interval_ms
    }

    fn validate(&self) -> Result<(), ConfigError> {
        positive("game_duration_ms", self.game_duration_ms)?;
        positive("note_interval_ms", self.note_interval_ms)?;
        positive("travel_ms", self.travel_ms)?;
        positive("note_duration_ms", self.note_duration_ms)?;
        probability("double_note_chance", self.double_note_chance)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PoseMatchConfig {
    pub game_duration_ms: Millis,
    pub wall_interval_ms: Millis,
    pub travel_ms: Millis,
    /// Hold time before the judgment instant that earns full accuracy.
    pub dwell_ms: Millis,
}

impl GameConfig for PoseMatchConfig {
    const GAME: GameType = GameType::PoseMatch;

    fn for_difficulty(difficulty: Difficulty) -> Self {
        match difficulty {
            Difficulty::Easy => Self {
                game_duration_ms: 60_000.0,
                wall_interval_ms: 5000.0,
                travel_ms: 4000.0,
                dwell_ms: 500.0,
            },
            Difficulty::Normal => Self {
                game_duration_ms: 60_000.0,
                wall_interval_ms: 4000.0,
                travel_ms: 3200.0,
                dwell_ms: 400.0,
            },
            Difficulty::Hard => Self {
                game_duration_ms: 60_000.0,
                wall_interval_ms: 3000.0,
                travel_ms: 2500.0,
                dwell_ms: 300.0,
            },
        }
    }

    fn game_duration_ms(&self) -> Millis {
        self.game_duration_ms
    }

    fn set_game_duration_ms(&mut self, duration_ms: Millis) {
        self.game_duration_ms = duration_ms;
    }

    fn event_interval_ms(&self) -> Millis {
        self.wall_interval_ms
    }

    fn validate(&self) -> Result<(), ConfigError> {
        positive("game_duration_ms", self.game_duration_ms)?;
        positive("wall_interval_ms", self.wall_interval_ms)?;
        positive("travel_ms", self.travel_ms)?;
        positive("dwell_ms", self.dwell_ms)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FruitNinjaConfig {
    pub game_duration_ms: Millis,
    pub spawn_interval_ms: Millis,
    /// Pixels per second squared.
    pub gravity: f32,
    pub bomb_chance: f64,
    /// Points lost when a bomb is sliced.
    pub bomb_penalty: i64,
}

impl GameConfig for FruitNinjaConfig {
    const GAME: GameType = GameType::FruitNinja;

    fn for_difficulty(difficulty: Difficulty) -> Self {
        match difficulty {
            Difficulty::Easy => Self {
                game_duration_ms: 60_000.0,
                spawn_interval_ms: 1500.0,
                gravity: 500.0,
                bomb_chance: 0.05,
                bomb_penalty: 50,
            },
            Difficulty::Normal => Self {
                game_duration_ms: 60_000.0,
                spawn_interval_ms: 1100.0,
                gravity: 650.0,
                bomb_chance: 0.1,
                bomb_penalty: 50,
            },
            Difficulty::Hard => Self {
                game_duration_ms: 60_000.0,
                spawn_interval_ms: 800.0,
                gravity: 800.0,
                bomb_chance: 0.2,
                bomb_penalty: 50,
            },
        }
    }

    fn game_duration_ms(&self) -> Millis {
        self.game_duration_ms
    }

    fn set_game_duration_ms(&mut self, duration_ms: Millis) {
        self.game_duration_ms = duration_ms;
    }

    fn event_interval_ms(&self) -> Millis {
        self.spawn_interval_ms
    }

    fn validate(&self) -> Result<(), ConfigError> {
        positive("game_duration_ms", self.game_duration_ms)?;
        positive("spawn_interval_ms", self.spawn_interval_ms)?;
        positive("gravity", self.gravity as f64)?;
        probability("bomb_chance", self.bomb_chance)?;
        within("bomb_penalty", self.bomb_penalty as f64, 0.0, MAX_BOMB_PENALTY as f64)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BubbleConfig {
    pub game_duration_ms: Millis,
    pub spawn_interval_ms: Millis,
    /// Pixels per second.
    pub speed: f32,
    pub bubble_radius: f32,
    pub max_lifetime_ms: Millis,
}

impl GameConfig for BubbleConfig {
    const GAME: GameType = GameType::Bubble;

    fn for_difficulty(difficulty: Difficulty) -> Self {
        match difficulty {
            Difficulty::Easy => Self {
                game_duration_ms: 60_000.0,
                spawn_interval_ms: 1200.0,
                speed: 120.0,
                bubble_radius: 50.0,
                max_lifetime_ms: 15_000.0,
            },
            Difficulty::Normal => Self {
                game_duration_ms: 60_000.0,
                spawn_interval_ms: 900.0,
                speed: 170.0,
                bubble_radius: 42.0,
                max_lifetime_ms: 12_000.0,
            },
            Difficulty::Hard => Self {
                game_duration_ms: 60_000.0,
                spawn_interval_ms: 600.0,
                speed: 230.0,
                bubble_radius: 35.0,
                max_lifetime_ms: 10_000.0,
            },
        }
    }

    fn game_duration_ms(&self) -> Millis {
        self.game_duration_ms
    }

    fn set_game_duration_ms(&mut self, duration_ms: Millis) {
        self.game_duration_ms = duration_ms;
    }

    fn event_interval_ms(&self) -> Millis {
        self.spawn_interval_ms
    }

    fn validate(&self) -> Result<(), ConfigError> {
        positive("game_duration_ms", self.game_duration_ms)?;
        positive("spawn_interval_ms", self.spawn_interval_ms)?;
        positive("speed", self.speed as f64)?;
        positive("bubble_radius", self.bubble_radius as f64)?;
        positive("max_lifetime_ms", self.max_lifetime_ms)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MoleConfig {
    pub game_duration_ms: Millis,
    pub spawn_interval_ms: Millis,
    /// How long a mole stays up before it escapes.
    pub up_duration_ms: Millis,
    /// Holes per side of the square grid.
    pub grid_size: usize,
}

impl GameConfig for MoleConfig {
    const GAME: GameType = GameType::WhackAMole;

    fn for_difficulty(difficulty: Difficulty) -> Self {
        match difficulty {
            Difficulty::Easy => Self {
                game_duration_ms: 60_000.0,
                spawn_interval_ms: 1400.0,
                up_duration_ms: 1600.0,
                grid_size: 3,
            },
            Difficulty::Normal => Self {
                game_duration_ms: 60_000.0,
                spawn_interval_ms: 1000.0,
                up_duration_ms: 1200.0,
                grid_size: 3,
            },
            Difficulty::Hard => Self {
                game_duration_ms: 60_000.0,
                spawn_interval_ms: 700.0,
                up_duration_ms: 800.0,
                grid_size: 3,
            },
        }
    }

    fn game_duration_ms(&self) -> Millis {
        self.game_duration_ms
    }

    fn set_game_duration_ms(&mut self, duration_ms: Millis) {
        self.game_duration_ms = duration_ms;
    }

    fn event_interval_ms(&self) -> Millis {
        self.spawn_interval_ms
    }

    fn validate(&self) -> Result<(), ConfigError> {
        positive("game_duration_ms", self.game_duration_ms)?;
        positive("spawn_interval_ms", self.spawn_interval_ms)?;
        positive("up_duration_ms", self.up_duration_ms)?;
        within("grid_size", self.grid_size as f64, 1.0, MAX_GRID_SIZE as f64)
    }
}
