//! Core data model types for drillcard.
//!
//! The drill configuration, the operation being practised, and the problem
//! shown to the learner.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{ConfigError, ProblemError};

/// Smallest operand the drill will ever produce or accept as a limit.
pub const MIN_OPERAND: u32 = 1;

/// Largest value accepted for the operand range.
pub const MAX_OPERAND: u32 = 15;

/// Operand range used when nothing else is configured.
pub const DEFAULT_MAX_OPERAND: u32 = 9;

/// The arithmetic operation being drilled.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Operation {
    #[default]
    Multiplication,
    Division,
}

impl Operation {
    /// Symbol used when rendering a problem.
    pub fn symbol(&self) -> &'static str {
        match self {
            Operation::Multiplication => "×",
            Operation::Division => "÷",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operation::Multiplication => write!(f, "multiplication"),
            Operation::Division => write!(f, "division"),
        }
    }
}

impl FromStr for Operation {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "multiplication" | "multiply" | "mul" | "x" | "*" | "×" => {
                Ok(Operation::Multiplication)
            }
            "division" | "divide" | "div" | "/" | "÷" => Ok(Operation::Division),
            other => Err(ConfigError::UnknownOperation(other.to_string())),
        }
    }
}

/// Clamp a requested operand range into `[MIN_OPERAND, MAX_OPERAND]`.
pub fn clamp_max_operand(value: i64) -> u32 {
    value.clamp(MIN_OPERAND as i64, MAX_OPERAND as i64) as u32
}

/// Clamp a requested focus number into `[MIN_OPERAND, max_operand]`.
pub fn clamp_focus(value: i64, max_operand: u32) -> u32 {
    value.clamp(MIN_OPERAND as i64, max_operand as i64) as u32
}

/// What kind of problems to generate.
///
/// Every constructor and setter clamps, so a `DrillConfig` always holds a
/// drawable range and a focus number inside it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DrillConfig {
    max_operand: u32,
    focus: Option<u32>,
    operation: Operation,
}

impl DrillConfig {
    pub fn new(max_operand: i64, focus: Option<i64>, operation: Operation) -> Self {
        let max_operand = clamp_max_operand(max_operand);
        Self {
            max_operand,
            focus: focus.map(|f| clamp_focus(f, max_operand)),
            operation,
        }
    }

    pub fn max_operand(&self) -> u32 {
        self.max_operand
    }

    pub fn focus(&self) -> Option<u32> {
        self.focus
    }

    pub fn operation(&self) -> Operation {
        self.operation
    }

    /// Change the operand range. A focus number above the new range is
    /// pulled down to it.
    pub fn set_max_operand(&mut self, max_operand: i64) {
        self.max_operand = clamp_max_operand(max_operand);
        self.focus = self.focus.map(|f| f.min(self.max_operand));
    }

    pub fn set_focus(&mut self, focus: Option<i64>) {
        self.focus = focus.map(|f| clamp_focus(f, self.max_operand));
    }

    pub fn set_operation(&mut self, operation: Operation) {
        self.operation = operation;
    }
}

impl Default for DrillConfig {
    fn default() -> Self {
        Self {
            max_operand: DEFAULT_MAX_OPERAND,
            focus: None,
            operation: Operation::Multiplication,
        }
    }
}

impl fmt::Display for DrillConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} up to {}", self.operation, self.max_operand)?;
        if let Some(focus) = self.focus {
            write!(f, ", focus {focus}")?;
        }
        Ok(())
    }
}

/// A single problem shown to the learner.
///
/// Both operands are positive, a multiplication's product fits in a `u32`,
/// and a division's dividend is an exact multiple of its divisor. The
/// constructor and deserialization both enforce this, so [`Problem::answer`]
/// cannot fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawProblem")]
pub struct Problem {
    a: u32,
    b: u32,
    operation: Operation,
}

#[derive(Deserialize)]
struct RawProblem {
    a: u32,
    b: u32,
    operation: Operation,
}

impl TryFrom<RawProblem> for Problem {
    type Error = ProblemError;

    fn try_from(raw: RawProblem) -> Result<Self, Self::Error> {
        Problem::new(raw.a, raw.b, raw.operation)
    }
}

impl Problem {
    pub fn new(a: u32, b: u32, operation: Operation) -> Result<Self, ProblemError> {
        if a == 0 || b == 0 {
            return Err(ProblemError::ZeroOperand { a, b });
        }
        match operation {
            Operation::Multiplication if a.checked_mul(b).is_none() => {
                Err(ProblemError::Overflow { a, b })
            }
            Operation::Division if a % b != 0 => Err(ProblemError::InexactDivision { a, b }),
            _ => Ok(Self { a, b, operation }),
        }
    }

    /// Build from generator output, whose operands are drawn from
    /// `MIN_OPERAND..=MAX_OPERAND` and so always satisfy the invariants.
    pub(crate) fn from_drawn(a: u32, b: u32, operation: Operation) -> Self {
        debug_assert!(Problem::new(a, b, operation).is_ok(), "invalid draw {a} {b}");
        Self { a, b, operation }
    }

    pub fn a(&self) -> u32 {
        self.a
    }

    pub fn b(&self) -> u32 {
        self.b
    }

    pub fn operation(&self) -> Operation {
        self.operation
    }

    /// The value a correct answer must equal.
    pub fn answer(&self) -> u32 {
        match self.operation {
            Operation::Multiplication => self.a * self.b,
            Operation::Division => self.a / self.b,
        }
    }
}

impl fmt::Display for Problem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {} = ?", self.a, self.operation.symbol(), self.b)
    }
}
