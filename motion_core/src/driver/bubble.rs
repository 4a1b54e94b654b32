use glam::Vec2;
use log::warn;
use motion_schema::{
    Difficulty, GameSummary, GameType, Handedness, InputFrame, JudgmentSource, JudgmentTier, Millis,
};
use rand::Rng;

use super::{Driver, GameRules};
use crate::chart::{Bubble, FlightState};
use crate::config::{BubbleConfig, Canvas, ConfigError, GameConfig};
use crate::gameplay::slice::{integrate, is_inside_canvas, is_off_canvas};
use crate::gameplay::{Judgment, TierTable};
use crate::gesture::hand::index_tip;
use crate::timeline::{spawn_bubble, SpawnTimer};

pub type BubbleDriver<R> = Driver<BubbleGame<R>>;

pub const FIRST_BUBBLE_MS: Millis = 500.0;

/// Bubbles drift across the screen; touching one with an index fingertip
/// pops it.
#[derive(Debug)]
pub struct BubbleGame<R> {
    config: BubbleConfig,
    difficulty: Difficulty,
    canvas: Canvas,
    rng: R,
    bubbles: Vec<Bubble>,
    timer: SpawnTimer,
    last_elapsed: Millis,
}

impl<R: Rng> BubbleGame<R> {
    pub fn new(config: BubbleConfig, difficulty: Difficulty, canvas: Canvas, rng: R) -> Result<Self, ConfigError> {
        config.validate()?;
        canvas.validate()?;
        Ok(Self {
            timer: SpawnTimer::new(config.spawn_interval_ms, FIRST_BUBBLE_MS, config.game_duration_ms),
            config,
            difficulty,
            canvas,
            rng,
            bubbles: Vec::new(),
            last_elapsed: 0.0,
        })
    }

    pub fn config(&self) -> &BubbleConfig {
        &self.config
    }

    pub fn canvas(&self) -> Canvas {
        self.canvas
    }

    pub fn bubbles(&self) -> &[Bubble] {
        &self.bubbles
    }

    pub fn set_canvas(&mut self, canvas: Canvas) {
        match canvas.validate() {
            Ok(()) => self.canvas = canvas,
            Err(e) => warn!("ignoring canvas resize: {e}"),
        }
    }

    fn drift(&mut self, dt_ms: Millis) {
        let canvas = self.canvas;
        for bubble in self.bubbles.iter_mut().filter(|b| b.state == FlightState::Flying) {
            let (position, _) = integrate(bubble.position, bubble.velocity, 0.0, dt_ms);
            bubble.position = position;
            if !bubble.entered && is_inside_canvas(position, bubble.radius, canvas) {
                bubble.entered = true;
            }
        }
    }

    fn pop(&mut self, frame: &InputFrame, elapsed_ms: Millis, judgments: &mut Vec<Judgment>) {
        let tips: Vec<Vec2> = [Handedness::Left, Handedness::Right]
            .into_iter()
            .filter_map(|hand| frame.hand(hand).and_then(index_tip))
            .map(|lm| self.canvas.project(&lm))
            .collect();
        if tips.is_empty() {
            return;
        }

        for bubble in self.bubbles.iter_mut().filter(|b| b.state == FlightState::Flying) {
            if tips.iter().any(|tip| tip.distance(bubble.position) <= bubble.radius) {
                bubble.state = FlightState::Hit;
                judgments.push(Judgment::new(
                    bubble.id.clone(),
                    JudgmentTier::Perfect,
                    JudgmentSource::Action,
                    elapsed_ms,
                ));
            }
        }
    }

    fn escape(&mut self, elapsed_ms: Millis, force: bool, judgments: &mut Vec<Judgment>) {
        let canvas = self.canvas;
        let max_lifetime = self.config.max_lifetime_ms;
        for bubble in self.bubbles.iter_mut().filter(|b| b.state == FlightState::Flying) {
            let gone = bubble.entered && is_off_canvas(bubble.position, bubble.radius, canvas);
            let expired = elapsed_ms - bubble.spawned_at > max_lifetime;
            if force || gone || expired {
                bubble.state = FlightState::Escaped;
                judgments.push(Judgment::new(
                    bubble.id.clone(),
                    JudgmentTier::Miss,
                    JudgmentSource::Timeout,
                    elapsed_ms,
                ));
            }
        }
    }

    fn count(&self, state: FlightState) -> u32 {
        self.bubbles.iter().filter(|b| b.state == state).count() as u32
    }
}

impl<R: Rng> GameRules for BubbleGame<R> {
    const GAME: GameType = GameType::Bubble;

    fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    fn table(&self) -> TierTable {
        TierTable::BUBBLE
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

        self.drift(dt);
        self.pop(frame, elapsed_ms, judgments);
        self.escape(elapsed_ms, false, judgments);

        if self.timer.poll(elapsed_ms) {
            let seq = self.bubbles.len();
            let bubble = spawn_bubble(&mut self.rng, &self.config, self.canvas, elapsed_ms, seq);
            self.bubbles.push(bubble);
        }
    }

    fn expire_all(&mut self, elapsed_ms: Millis, judgments: &mut Vec<Judgment>) {
        self.escape(elapsed_ms, true, judgments);
    }

    fn summary(&self) -> GameSummary {
        GameSummary::Bubble {
            popped: self.count(FlightState::Hit),
            escaped: self.count(FlightState::Escaped),
        }
    }
}

impl<R: Rng> Driver<BubbleGame<R>> {
    pub fn new(difficulty: Difficulty, canvas: Canvas, rng: R) -> Result<Self, ConfigError> {
        Self::with_config(BubbleConfig::for_difficulty(difficulty), difficulty, canvas, rng)
    }

    pub fn with_config(
        config: BubbleConfig,
        difficulty: Difficulty,
        canvas: Canvas,
        rng: R,
    ) -> Result<Self, ConfigError> {
        Ok(Self::from_rules(BubbleGame::new(config, difficulty, canvas, rng)?))
    }
}
