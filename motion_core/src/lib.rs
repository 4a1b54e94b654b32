//! Motion-to-judgment core for the rehab mini-games.
//!
//! Detector frames come in through [`input`], are classified by
//! [`gesture`], matched against the events in [`chart`] by the rules in
//! [`gameplay`], and folded into a session score. [`driver`] ties one game
//! together per animation frame.

pub mod chart;
pub mod config;
pub mod driver;
pub mod gameplay;
pub mod gesture;
pub mod input;
pub mod sink;
pub mod synth;
pub mod timeline;

pub use config::{Canvas, ConfigError, GameConfig};
pub use driver::{Driver, GameDriver, GameRules};
pub use gameplay::{Judgment, Session, SessionError};
