//! drillcard-core — problem generation, answer checking, and scoring.
//!
//! This crate holds everything a drill front end needs: the configuration
//! model, the problem generator, the answer evaluator and the session state
//! machine that ties them together with a running score.

pub mod config;
pub mod error;
pub mod evaluator;
pub mod generator;
pub mod model;
pub mod score;
pub mod session;
pub mod traits;

pub use error::{ConfigError, ProblemError, SessionError};
pub use generator::{generate, RngDraws, ScriptedDraws};
pub use model::{DrillConfig, Operation, Problem};
pub use score::Score;
pub use session::{Action, Attempt, Confirmed, Key, Outcome, Phase, Session};
pub use traits::Draw;
