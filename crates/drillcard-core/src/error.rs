//! Error types for drillcard.
//!
//! Wrong answers are verdicts, not errors. These types only cover actions
//! that a form would have disabled and configuration values that cannot be
//! understood at all.

use thiserror::Error;

use crate::session::{Action, Phase};

/// Errors returned when a session action is refused.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    /// The action is not offered in the current phase.
    #[error("cannot {action} while {phase}")]
    NotAvailable { action: Action, phase: Phase },

    /// Submit was requested with nothing typed.
    #[error("nothing to submit, enter an answer first")]
    EmptyInput,

    /// A keypad digit outside 0-9.
    #[error("not a keypad digit: {0}")]
    InvalidDigit(u8),
}

/// Errors raised when building a [`Problem`](crate::model::Problem) from
/// arbitrary operands.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProblemError {
    /// One of the operands is zero.
    #[error("operands must be positive, got {a} and {b}")]
    ZeroOperand { a: u32, b: u32 },

    /// The dividend is not a multiple of the divisor.
    #[error("{a} is not a multiple of {b}")]
    InexactDivision { a: u32, b: u32 },

    /// The product does not fit in a `u32`.
    #[error("{a} × {b} is too large")]
    Overflow { a: u32, b: u32 },
}

/// Errors raised while interpreting configuration values.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// The operation name is not recognised.
    #[error("unknown operation: {0} (expected multiplication or division)")]
    UnknownOperation(String),

    /// A numeric setting could not be parsed.
    #[error("invalid value for {field}: {value:?}")]
    InvalidNumber { field: &'static str, value: String },
}
