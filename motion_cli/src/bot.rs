//! Scripted players for headless sessions.
//!
//! Each game's rules expose their events; the bot reads them and builds the
//! frame a player who goes for that event would produce.

use std::collections::HashMap;

use glam::Vec2;
use motion_core::chart::{FlightState, Lane};
use motion_core::config::Canvas;
use motion_core::driver::{BubbleGame, FruitNinjaGame, MoleGame, PoseMatchGame, RhythmGame};
use motion_core::gameplay::slice::integrate;
use motion_core::synth;
use motion_schema::{Handedness, InputFrame, Millis};
use rand::Rng;
use rand_chacha::ChaCha8Rng;

pub struct Bot {
    skill: f64,
    frame_ms: Millis,
    rng: ChaCha8Rng,
    decisions: HashMap<String, bool>,
    fist: bool,
}

impl Bot {
    /// `skill` is the chance of going for any one event.
    pub fn new(skill: f64, frame_ms: Millis, rng: ChaCha8Rng) -> Self {
        Self {
            skill,
            frame_ms,
            rng,
            decisions: HashMap::new(),
            fist: false,
        }
    }

    /// Decided once per event.
    fn attempts(&mut self, event_id: &str) -> bool {
        if let Some(&decision) = self.decisions.get(event_id) {
            return decision;
        }
        let decision = self.rng.random_bool(self.skill);
        self.decisions.insert(event_id.to_string(), decision);
        decision
    }
}

pub trait Autoplay {
    /// Frame for the tick at `elapsed_ms` of session time.
    fn autoplay(&self, bot: &mut Bot, elapsed_ms: Millis) -> InputFrame;
}

fn pointing_frame(target: Option<Vec2>, canvas: Canvas) -> InputFrame {
    let hands = target
        .map(|p| {
            let landmarks = synth::pointing_at(p.x / canvas.width, p.y / canvas.height);
            vec![synth::observation(Handedness::Right, landmarks)]
        })
        .unwrap_or_default();
    InputFrame {
        hands,
        body: Vec::new(),
    }
}

impl<R: Rng> Autoplay for RhythmGame<R> {
    fn autoplay(&self, bot: &mut Bot, elapsed_ms: Millis) -> InputFrame {
        let window = bot.frame_ms;
        let mut hand = |handedness: Handedness| {
            let due = self.notes().iter().find(|n| {
                n.lane == Lane::from(handedness)
                    && !n.status.is_judged()
                    && n.timing <= elapsed_ms
                    && n.timing > elapsed_ms - window
            });
            let landmarks = match due {
                Some(note) if bot.attempts(&note.id) => synth::closed_hand(0.5, 0.6),
                _ => synth::open_hand(0.5, 0.6),
            };
            synth::observation(handedness, landmarks)
        };
        InputFrame {
            hands: vec![hand(Handedness::Left), hand(Handedness::Right)],
            body: Vec::new(),
        }
    }
}

impl<R: Rng> Autoplay for PoseMatchGame<R> {
    fn autoplay(&self, bot: &mut Bot, elapsed_ms: Millis) -> InputFrame {
        let lead = self.config().dwell_ms + 2.0 * bot.frame_ms;
        let body = self
            .walls()
            .iter()
            .find(|w| !w.status.is_judged() && elapsed_ms >= w.timing - lead)
            .filter(|w| bot.attempts(&w.id))
            .and_then(|w| synth::pose_body(&w.pose))
            .unwrap_or_else(synth::neutral_body);
        InputFrame {
            hands: Vec::new(),
            body,
        }
    }
}

impl<R: Rng> Autoplay for FruitNinjaGame<R> {
    fn autoplay(&self, bot: &mut Bot, _elapsed_ms: Millis) -> InputFrame {
        let gravity = self.config().gravity;
        let dt = bot.frame_ms;
        // aim where the fruit will be once this tick moves it
        let target = self
            .fruits()
            .iter()
            .filter(|f| f.state == FlightState::Flying && !f.kind.is_bomb())
            .find(|f| bot.attempts(&f.id))
            .map(|f| integrate(f.position, f.velocity, gravity, dt).0);
        pointing_frame(target, self.canvas())
    }
}

impl<R: Rng> Autoplay for BubbleGame<R> {
    fn autoplay(&self, bot: &mut Bot, _elapsed_ms: Millis) -> InputFrame {
        let dt = bot.frame_ms;
        let target = self
            .bubbles()
            .iter()
            .filter(|b| b.state == FlightState::Flying)
            .find(|b| bot.attempts(&b.id))
            .map(|b| integrate(b.position, b.velocity, 0.0, dt).0);
        pointing_frame(target, self.canvas())
    }
}

impl<R: Rng> Autoplay for MoleGame<R> {
    fn autoplay(&self, bot: &mut Bot, _elapsed_ms: Millis) -> InputFrame {
        let grid = self.config().grid_size.max(1);
        let target = self
            .moles()
            .iter()
            .find(|m| m.is_up() && bot.attempts(&m.id))
            .map(|m| m.hole);

        let landmarks = match target {
            Some(hole) if !bot.fist => {
                bot.fist = true;
                let x = ((hole % grid) as f32 + 0.5) / grid as f32;
                let y = ((hole / grid) as f32 + 0.5) / grid as f32;
                synth::palm_at(x, y, true)
            }
            _ => {
                bot.fist = false;
                synth::palm_at(0.5, 0.5, false)
            }
        };
        InputFrame {
            hands: vec![synth::observation(Handedness::Right, landmarks)],
            body: Vec::new(),
        }
    }
}
