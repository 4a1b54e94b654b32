use glam::Vec2;
use log::warn;
use motion_schema::{
    Difficulty, GameSummary, GameType, Handedness, InputFrame, JudgmentSource, JudgmentTier, Millis,
};
use rand::Rng;

use super::{Driver, GameRules};
use crate::chart::{FlightState, Fruit};
use crate::config::{Canvas, ConfigError, FruitNinjaConfig, GameConfig};
use crate::gameplay::slice::{integrate, is_off_canvas, sliced_fruit};
use crate::gameplay::{Judgment, TierTable};
use crate::gesture::hand::index_tip;
use crate::timeline::{spawn_fruit, SpawnTimer};

pub type FruitNinjaDriver<R> = Driver<FruitNinjaGame<R>>;

/// First fruit leaves the bottom edge this long after play starts.
pub const FIRST_FRUIT_MS: Millis = 1000.0;

/// Fruit is launched from below; the index fingertip of either hand slices
/// whatever its path crosses between two frames.
#[derive(Debug)]
pub struct FruitNinjaGame<R> {
    config: FruitNinjaConfig,
    difficulty: Difficulty,
    canvas: Canvas,
    rng: R,
    fruits: Vec<Fruit>,
    timer: SpawnTimer,
    last_elapsed: Millis,
    /// Fingertip on the previous frame, per hand (left, right).
    trail: [Option<Vec2>; 2],
}

impl<R: Rng> FruitNinjaGame<R> {
    pub fn new(
        config: FruitNinjaConfig,
        difficulty: Difficulty,
        canvas: Canvas,
        rng: R,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        canvas.validate()?;
        Ok(Self {
            timer: SpawnTimer::new(config.spawn_interval_ms, FIRST_FRUIT_MS, config.game_duration_ms),
            config,
            difficulty,
            canvas,
            rng,
            fruits: Vec::new(),
            last_elapsed: 0.0,
            trail: [None, None],
        })
    }

    pub fn config(&self) -> &FruitNinjaConfig {
        &self.config
    }

    pub fn canvas(&self) -> Canvas {
        self.canvas
    }

    /// Follows the host's canvas size; invalid sizes are ignored.
    pub fn set_canvas(&mut self, canvas: Canvas) {
        match canvas.validate() {
            Ok(()) => self.canvas = canvas,
            Err(e) => warn!("ignoring canvas resize: {e}"),
        }
    }

    pub fn fruits(&self) -> &[Fruit] {
        &self.fruits
    }

    fn fly(&mut self, dt_ms: Millis) {
        let gravity = self.config.gravity;
        for fruit in self.fruits.iter_mut().filter(|f| f.state == FlightState::Flying) {
            let (position, velocity) = integrate(fruit.position, fruit.velocity, gravity, dt_ms);
            fruit.position = position;
            fruit.velocity = velocity;
        }
    }

    fn slice(&mut self, frame: &InputFrame, elapsed_ms: Millis, judgments: &mut Vec<Judgment>) {
        for (slot, hand) in [Handedness::Left, Handedness::Right].into_iter().enumerate() {
            let tip = frame
                .hand(hand)
                .and_then(index_tip)
                .map(|lm| self.canvas.project(&lm));
            let prev = std::mem::replace(&mut self.trail[slot], tip);
            let (Some(prev), Some(cur)) = (prev, tip) else {
                continue;
            };

            for idx in sliced_fruit(prev, cur, &self.fruits) {
                let fruit = &mut self.fruits[idx];
                fruit.state = FlightState::Hit;
                let judgment = if fruit.kind.is_bomb() {
                    Judgment::new(fruit.id.clone(), JudgmentTier::Miss, JudgmentSource::Hazard, elapsed_ms)
                        .with_points(-self.config.bomb_penalty)
                } else {
                    Judgment::new(fruit.id.clone(), JudgmentTier::Perfect, JudgmentSource::Action, elapsed_ms)
                        .with_points(fruit.points)
                };
                judgments.push(judgment);
            }
        }
    }

    /// Fruit that left the playfield is missed; a bomb that left is dodged.
    fn escape(&mut self, elapsed_ms: Millis, force: bool, judgments: &mut Vec<Judgment>) {
        let canvas = self.canvas;
        for fruit in self.fruits.iter_mut().filter(|f| f.state == FlightState::Flying) {
            if !force && !is_off_canvas(fruit.position, fruit.radius, canvas) {
                continue;
            }
            fruit.state = FlightState::Escaped;
            if !fruit.kind.is_bomb() {
                judgments.push(Judgment::new(
                    fruit.id.clone(),
                    JudgmentTier::Miss,
                    JudgmentSource::Timeout,
                    elapsed_ms,
                ));
            }
        }
    }

    fn count(&self, bomb: bool, state: FlightState) -> u32 {
        self.fruits
            .iter()
            .filter(|f| f.kind.is_bomb() == bomb && f.state == state)
            .count() as u32
    }
}

impl<R: Rng> GameRules for FruitNinjaGame<R> {
    const GAME: GameType = GameType::FruitNinja;

    fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    fn table(&self) -> TierTable {
        TierTable::FRUIT_NINJA
    }

    fn game_duration_ms(&self) -> Millis {
        self.config.game_duration_ms
    }

    fn begin(&mut self) {
        self.last_elapsed = 0.0;
    }

    fn step(&mut self, elapsed_ms: Millis, frame: &InputFrame, judgments: &mut Vec<Judgment>) {
        let dt = (elapsed_ms - self.last_elapsed).max(0.0);
        self.last_elapsed = elapsed_ms;

        self.fly(dt);
        self.slice(frame, elapsed_ms, judgments);
        self.escape(elapsed_ms, false, judgments);

        if self.timer.poll(elapsed_ms) {
            let seq = self.fruits.len();
            let fruit = spawn_fruit(&mut self.rng, &self.config, self.canvas, elapsed_ms, seq);
            self.fruits.push(fruit);
        }
    }

    fn expire_all(&mut self, elapsed_ms: Millis, judgments: &mut Vec<Judgment>) {
        self.escape(elapsed_ms, true, judgments);
    }

    fn summary(&self) -> GameSummary {
        GameSummary::FruitNinja {
            sliced: self.count(false, FlightState::Hit),
            missed: self.count(false, FlightState::Escaped),
            bombs_hit: self.count(true, FlightState::Hit),
            bombs_dodged: self.count(true, FlightState::Escaped),
        }
    }
}

impl<R: Rng> Driver<FruitNinjaGame<R>> {
    pub fn new(difficulty: Difficulty, canvas: Canvas, rng: R) -> Result<Self, ConfigError> {
        Self::with_config(FruitNinjaConfig::for_difficulty(difficulty), difficulty, canvas, rng)
    }

    pub fn with_config(
        config: FruitNinjaConfig,
        difficulty: Difficulty,
        canvas: Canvas,
        rng: R,
    ) -> Result<Self, ConfigError> {
        Ok(Self::from_rules(FruitNinjaGame::new(config, difficulty, canvas, rng)?))
    }
}
