//! Problem generation.
//!
//! Division problems are built backwards from a divisor and a multiplier so
//! the quotient is always a whole number.

use std::collections::VecDeque;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::model::{DrillConfig, Operation, Problem, MIN_OPERAND};
use crate::traits::Draw;

/// Generate a fresh problem for `config`.
///
/// Draw order is fixed: for multiplication without focus `a` then `b`; for
/// division without focus the divisor then the multiplier. With a focus
/// number only one value is drawn.
pub fn generate<D: Draw + ?Sized>(config: &DrillConfig, draws: &mut D) -> Problem {
    let max = config.max_operand();
    let problem = match (config.operation(), config.focus()) {
        (Operation::Multiplication, None) => {
            let a = draws.draw(MIN_OPERAND, max);
            let b = draws.draw(MIN_OPERAND, max);
            Problem::from_drawn(a, b, Operation::Multiplication)
        }
        (Operation::Multiplication, Some(focus)) => {
            let b = draws.draw(MIN_OPERAND, max);
            Problem::from_drawn(focus, b, Operation::Multiplication)
        }
        (Operation::Division, None) => {
            let divisor = draws.draw(MIN_OPERAND, max);
            let multiplier = draws.draw(MIN_OPERAND, max);
            Problem::from_drawn(divisor * multiplier, divisor, Operation::Division)
        }
        (Operation::Division, Some(focus)) => {
            let multiplier = draws.draw(MIN_OPERAND, max);
            Problem::from_drawn(focus * multiplier, focus, Operation::Division)
        }
    };
    tracing::debug!(%problem, %config, "generated problem");
    problem
}

/// [`Draw`] backed by a `rand` generator.
#[derive(Debug, Clone)]
pub struct RngDraws<R> {
    rng: R,
}

impl<R: Rng> RngDraws<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl RngDraws<StdRng> {
    /// Seeded from the operating system; every run differs.
    pub fn from_entropy() -> Self {
        Self::new(StdRng::from_os_rng())
    }

    /// Reproducible sequence for a given seed.
    pub fn seeded(seed: u64) -> Self {
        Self::new(StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> Draw for RngDraws<R> {
    fn draw(&mut self, low: u32, high: u32) -> u32 {
        self.rng.random_range(low..=high)
    }
}

/// [`Draw`] that replays a fixed list of values.
///
/// Each value is clamped into the requested range. Once the script runs out
/// every draw returns the low end of the range.
#[derive(Debug, Clone, Default)]
pub struct ScriptedDraws {
    values: VecDeque<u32>,
}

impl ScriptedDraws {
    pub fn new(values: impl IntoIterator<Item = u32>) -> Self {
        Self {
            values: values.into_iter().collect(),
        }
    }

    /// Number of scripted values not yet consumed.
    pub fn remaining(&self) -> usize {
        self.values.len()
    }
}

impl Draw for ScriptedDraws {
    fn draw(&mut self, low: u32, high: u32) -> u32 {
        self.values
            .pop_front()
            .map(|v| v.clamp(low, high))
            .unwrap_or(low)
    }
}
