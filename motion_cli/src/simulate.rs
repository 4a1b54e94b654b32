use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::Context;
use log::{debug, info};
use motion_core::config::{
    BubbleConfig, Canvas, FruitNinjaConfig, GameConfig, MoleConfig, PoseMatchConfig, RhythmConfig,
};
use motion_core::driver::{
    BubbleDriver, Driver, FruitNinjaDriver, GameDriver, GameRules, MoleDriver, PoseMatchDriver,
    RhythmDriver,
};
use motion_core::gameplay::session::DEFAULT_COUNTDOWN_MS;
use motion_core::gameplay::Judgment;
use motion_core::input::{FrameQueue, TimedFrame};
use motion_schema::{
    Difficulty, GameType, InputFrame, LandmarkTrace, Millis, ScoreRecord, TraceFrame,
};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde_json::Value;

use crate::bot::{Autoplay, Bot};

/// Where a session's difficulty entry comes from.
#[derive(Debug, Clone, Default)]
pub struct ConfigSource {
    pub path: Option<PathBuf>,
    pub duration_ms: Option<Millis>,
}

impl ConfigSource {
    pub fn load<C: GameConfig>(&self, difficulty: Difficulty) -> anyhow::Result<C> {
        let mut config = match &self.path {
            Some(path) => read_config(path)?,
            None => C::for_difficulty(difficulty),
        };
        if let Some(duration_ms) = self.duration_ms {
            config.set_game_duration_ms(duration_ms);
        }
        config
            .validate()
            .with_context(|| format!("invalid {} config", C::GAME))?;
        Ok(config)
    }
}

fn read_config<C: GameConfig>(path: &Path) -> anyhow::Result<C> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("failed to read config: {}", path.display()))?;
    serde_json::from_str(&text)
        .with_context(|| format!("failed to parse config json: {}", path.display()))
}

#[derive(Debug, Clone)]
pub struct SimulateOptions {
    pub game: GameType,
    pub difficulty: Difficulty,
    pub seed: u64,
    pub skill: f64,
    pub fps: f64,
    pub config: ConfigSource,
    /// Session time at which the player walks away.
    pub exit_at_ms: Option<Millis>,
    pub record_trace: bool,
}

#[derive(Debug)]
pub struct Outcome {
    pub record: ScoreRecord,
    pub trace: Option<LandmarkTrace>,
}

pub fn simulate(opts: &SimulateOptions) -> anyhow::Result<Outcome> {
    anyhow::ensure!(
        (0.0..=1.0).contains(&opts.skill),
        "skill must be within [0, 1] (got {})",
        opts.skill
    );
    anyhow::ensure!(
        opts.fps > 0.0 && opts.fps.is_finite(),
        "fps must be > 0 (got {})",
        opts.fps
    );

    let rng = ChaCha8Rng::seed_from_u64(opts.seed);
    let difficulty = opts.difficulty;
    let canvas = Canvas::default();
    match opts.game {
        GameType::Rhythm => {
            let config: RhythmConfig = opts.config.load(difficulty)?;
            play(RhythmDriver::with_config(config, difficulty, rng)?, opts)
        }
        GameType::PoseMatch => {
            let config: PoseMatchConfig = opts.config.load(difficulty)?;
            play(PoseMatchDriver::with_config(config, difficulty, rng)?, opts)
        }
        GameType::FruitNinja => {
            let config: FruitNinjaConfig = opts.config.load(difficulty)?;
            play(FruitNinjaDriver::with_config(config, difficulty, canvas, rng)?, opts)
        }
        GameType::Bubble => {
            let config: BubbleConfig = opts.config.load(difficulty)?;
            play(BubbleDriver::with_config(config, difficulty, canvas, rng)?, opts)
        }
        GameType::WhackAMole => {
            let config: MoleConfig = opts.config.load(difficulty)?;
            play(MoleDriver::with_config(config, difficulty, rng)?, opts)
        }
    }
}

fn play<G: GameRules + Autoplay>(mut driver: Driver<G>, opts: &SimulateOptions) -> anyhow::Result<Outcome> {
    let frame_ms = 1000.0 / opts.fps;
    let mut bot = Bot::new(
        opts.skill,
        frame_ms,
        ChaCha8Rng::seed_from_u64(opts.seed.wrapping_add(1)),
    );
    let mut frames = Vec::new();
    let queue = FrameQueue::new();

    driver.start(0.0)?;
    let mut ticks: u64 = 0;
    while !driver.is_finished() {
        let host_ms = ticks as f64 * frame_ms;
        let elapsed_ms = host_ms - DEFAULT_COUNTDOWN_MS;
        if opts.exit_at_ms.is_some_and(|exit| elapsed_ms >= exit) {
            info!("player left at {elapsed_ms:.0} ms");
            break;
        }

        let frame = if elapsed_ms >= 0.0 {
            driver.rules().autoplay(&mut bot, elapsed_ms)
        } else {
            InputFrame::empty()
        };
        queue.push(TimedFrame { host_ms, frame });

        if let Some(TimedFrame { host_ms, frame }) = queue.latest() {
            log_judgments(&driver.tick(host_ms, &frame)?);
            if opts.record_trace {
                frames.push(TraceFrame { host_ms, frame });
            }
        }
        ticks += 1;
    }

    let record = driver.finish()?;
    let trace = opts.record_trace.then(|| LandmarkTrace {
        game: opts.game,
        difficulty: opts.difficulty,
        seed: Some(opts.seed),
        frames,
    });
    Ok(Outcome { record, trace })
}

pub fn replay(trace: &LandmarkTrace, seed: Option<u64>, config: &ConfigSource) -> anyhow::Result<ScoreRecord> {
    let seed = seed.or(trace.seed).unwrap_or_default();
    let rng = ChaCha8Rng::seed_from_u64(seed);
    let difficulty = trace.difficulty;
    let canvas = Canvas::default();
    info!(
        "replaying {} frames of {} ({difficulty}) with seed {seed}",
        trace.frames.len(),
        trace.game
    );
    match trace.game {
        GameType::Rhythm => {
            let config: RhythmConfig = config.load(difficulty)?;
            feed(RhythmDriver::with_config(config, difficulty, rng)?, trace)
        }
        GameType::PoseMatch => {
            let config: PoseMatchConfig = config.load(difficulty)?;
            feed(PoseMatchDriver::with_config(config, difficulty, rng)?, trace)
        }
        GameType::FruitNinja => {
            let config: FruitNinjaConfig = config.load(difficulty)?;
            feed(FruitNinjaDriver::with_config(config, difficulty, canvas, rng)?, trace)
        }
        GameType::Bubble => {
            let config: BubbleConfig = config.load(difficulty)?;
            feed(BubbleDriver::with_config(config, difficulty, canvas, rng)?, trace)
        }
        GameType::WhackAMole => {
            let config: MoleConfig = config.load(difficulty)?;
            feed(MoleDriver::with_config(config, difficulty, rng)?, trace)
        }
    }
}

fn feed<G: GameRules>(mut driver: Driver<G>, trace: &LandmarkTrace) -> anyhow::Result<ScoreRecord> {
    let first = trace.frames.first().context("trace has no frames")?;
    let queue = FrameQueue::new();
    driver.start(first.host_ms)?;
    for recorded in &trace.frames {
        if driver.is_finished() {
            break;
        }
        queue.push(TimedFrame {
            host_ms: recorded.host_ms,
            frame: recorded.frame.clone(),
        });
        if let Some(TimedFrame { host_ms, frame }) = queue.latest() {
            log_judgments(&driver.tick(host_ms, &frame)?);
        }
    }
    Ok(driver.finish()?)
}

fn log_judgments(judgments: &[Judgment]) {
    for judgment in judgments {
        debug!(
            "{} {:?} ({:?}) at {:.0} ms",
            judgment.event_id, judgment.tier, judgment.source, judgment.at_ms
        );
    }
}

/// Built-in difficulty entries for one game, keyed by difficulty name.
pub fn difficulty_table(game: GameType) -> anyhow::Result<Value> {
    match game {
        GameType::Rhythm => table::<RhythmConfig>(),
        GameType::PoseMatch => table::<PoseMatchConfig>(),
        GameType::FruitNinja => table::<FruitNinjaConfig>(),
        GameType::Bubble => table::<BubbleConfig>(),
        GameType::WhackAMole => table::<MoleConfig>(),
    }
}

fn table<C: GameConfig>() -> anyhow::Result<Value> {
    let mut map = serde_json::Map::new();
    for difficulty in Difficulty::ALL {
        let entry = serde_json::to_value(C::for_difficulty(difficulty))
            .with_context(|| format!("failed to serialize {} config", C::GAME))?;
        map.insert(difficulty.as_str().to_string(), entry);
    }
    Ok(Value::Object(map))
}
