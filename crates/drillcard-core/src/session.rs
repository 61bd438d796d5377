//! The drill session state machine.
//!
//! A [`Session`] owns the current problem, the learner's input, the phase of
//! the current problem and the running score. Every method runs to
//! completion synchronously; actions that a form would have disabled are
//! refused with a [`SessionError`] and leave the session untouched.
//!
//! ```text
//!            submit ok            next
//! Entering ───────────▶ Correct ────────▶ Entering (new problem)
//!    │  ▲   submit wrong            next
//!    │  └──── Incorrect ──┐    Revealed ─────▶ Entering (new problem)
//!    │  retry     ▲       │ reveal  ▲
//!    │            └───────┘─────────┤
//!    └──────────── reveal ──────────┘
//! ```

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::SessionError;
use crate::evaluator::evaluate;
use crate::generator::generate;
use crate::model::{DrillConfig, Operation, Problem};
use crate::score::Score;
use crate::traits::Draw;

/// Where the current problem stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    /// Awaiting an answer; input is editable.
    Entering,
    /// The submitted answer was right.
    Correct,
    /// The submitted answer was wrong; input is locked.
    Incorrect,
    /// The answer has been shown.
    Revealed,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Phase::Entering => write!(f, "entering an answer"),
            Phase::Correct => write!(f, "answered correctly"),
            Phase::Incorrect => write!(f, "showing an incorrect answer"),
            Phase::Revealed => write!(f, "showing the answer"),
        }
    }
}

/// Learner actions, used to report refusals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    EditInput,
    Submit,
    Reveal,
    Retry,
    Next,
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::EditInput => write!(f, "edit the answer"),
            Action::Submit => write!(f, "submit"),
            Action::Reveal => write!(f, "reveal the answer"),
            Action::Retry => write!(f, "retry"),
            Action::Next => write!(f, "move to the next problem"),
        }
    }
}

/// A key on the 12-key answer pad.
///
/// `Digit` carries 0-9; [`Session::press`] refuses anything larger.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Digit(u8),
    Clear,
    Backspace,
}

impl FromStr for Key {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "C" | "c" | "clear" => Ok(Key::Clear),
            "<" | "back" | "backspace" => Ok(Key::Backspace),
            other => match other.parse::<u8>() {
                Ok(d) if d <= 9 && other.len() == 1 => Ok(Key::Digit(d)),
                _ => Err(format!("unknown key: {other}")),
            },
        }
    }
}

/// How a counted attempt ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    Correct,
    Incorrect,
    Revealed,
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Correct => write!(f, "correct"),
            Outcome::Incorrect => write!(f, "incorrect"),
            Outcome::Revealed => write!(f, "revealed"),
        }
    }
}

/// One counted action in the session history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attempt {
    pub problem: Problem,
    /// Input as it stood when the attempt was counted.
    pub input: String,
    pub outcome: Outcome,
    pub at: DateTime<Utc>,
}

/// What a confirm (Enter) press ended up doing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Confirmed {
    Submitted(Outcome),
    Retried,
    Advanced(Problem),
    /// Nothing typed yet; confirm does nothing.
    Ignored,
}

/// A single learner's drill session.
#[derive(Debug)]
pub struct Session<D> {
    id: Uuid,
    started_at: DateTime<Utc>,
    config: DrillConfig,
    problem: Problem,
    input: String,
    phase: Phase,
    score: Score,
    history: Vec<Attempt>,
    draws: D,
}

impl<D: Draw> Session<D> {
    /// Start a session with a freshly generated problem.
    pub fn new(config: DrillConfig, mut draws: D) -> Self {
        let problem = generate(&config, &mut draws);
        let id = Uuid::new_v4();
        tracing::info!(session = %id, %config, "session started");
        Self {
            id,
            started_at: Utc::now(),
            config,
            problem,
            input: String::new(),
            phase: Phase::Entering,
            score: Score::new(),
            history: Vec::new(),
            draws,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    pub fn config(&self) -> &DrillConfig {
        &self.config
    }

    pub fn problem(&self) -> &Problem {
        &self.problem
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn score(&self) -> Score {
        self.score
    }

    pub fn history(&self) -> &[Attempt] {
        &self.history
    }

    pub fn is_revealed(&self) -> bool {
        self.phase == Phase::Revealed
    }

    /// `Some(true)` / `Some(false)` once an answer has been checked, `None`
    /// while entering or after a reveal.
    pub fn correctness(&self) -> Option<bool> {
        match self.phase {
            Phase::Correct => Some(true),
            Phase::Incorrect => Some(false),
            Phase::Entering | Phase::Revealed => None,
        }
    }

    /// The answer, but only once it may be shown.
    pub fn visible_answer(&self) -> Option<u32> {
        matches!(self.phase, Phase::Correct | Phase::Revealed).then(|| self.problem.answer())
    }

    /// Replace the whole input, as a text field does.
    pub fn set_input(&mut self, raw: &str) -> Result<(), SessionError> {
        self.require(Action::EditInput, &[Phase::Entering])?;
        self.input = raw.to_string();
        Ok(())
    }

    /// Apply one keypad press.
    pub fn press(&mut self, key: Key) -> Result<(), SessionError> {
        self.require(Action::EditInput, &[Phase::Entering])?;
        match key {
            Key::Digit(d) => {
                let c = char::from_digit(u32::from(d), 10).ok_or(SessionError::InvalidDigit(d))?;
                self.input.push(c);
            }
            Key::Clear => self.input.clear(),
            Key::Backspace => {
                self.input.pop();
            }
        }
        Ok(())
    }

    /// Check the current input and count the attempt.
    pub fn submit(&mut self) -> Result<Outcome, SessionError> {
        self.require(Action::Submit, &[Phase::Entering])?;
        if self.input.trim().is_empty() {
            return Err(SessionError::EmptyInput);
        }

        let correct = evaluate(&self.problem, &self.input);
        let outcome = if correct {
            Outcome::Correct
        } else {
            Outcome::Incorrect
        };
        self.phase = if correct {
            Phase::Correct
        } else {
            Phase::Incorrect
        };
        self.count(outcome, correct);
        Ok(outcome)
    }

    /// Show the answer. Always counts as an attempt, never as correct; after
    /// an incorrect submit this is a second count for the same problem.
    pub fn reveal(&mut self) -> Result<u32, SessionError> {
        self.require(Action::Reveal, &[Phase::Entering, Phase::Incorrect])?;
        self.phase = Phase::Revealed;
        self.count(Outcome::Revealed, false);
        Ok(self.problem.answer())
    }

    /// Clear the input and try the same problem again.
    pub fn retry(&mut self) -> Result<(), SessionError> {
        self.require(Action::Retry, &[Phase::Incorrect])?;
        self.input.clear();
        self.phase = Phase::Entering;
        tracing::debug!(session = %self.id, problem = %self.problem, "retrying problem");
        Ok(())
    }

    /// Move on to a freshly generated problem.
    pub fn next(&mut self) -> Result<Problem, SessionError> {
        self.require(Action::Next, &[Phase::Correct, Phase::Revealed])?;
        self.new_problem();
        Ok(self.problem)
    }

    /// The Enter key: submit pending input, retry a wrong answer, or
    /// advance past a finished problem.
    pub fn confirm(&mut self) -> Result<Confirmed, SessionError> {
        match self.phase {
            Phase::Entering if self.input.trim().is_empty() => Ok(Confirmed::Ignored),
            Phase::Entering => self.submit().map(Confirmed::Submitted),
            Phase::Incorrect => self.retry().map(|()| Confirmed::Retried),
            Phase::Correct | Phase::Revealed => self.next().map(Confirmed::Advanced),
        }
    }

    /// Change the operand range and start a new problem.
    pub fn set_max_operand(&mut self, max_operand: i64) {
        self.config.set_max_operand(max_operand);
        self.config_changed();
    }

    /// Pin (or unpin) the focus number and start a new problem.
    pub fn set_focus(&mut self, focus: Option<i64>) {
        self.config.set_focus(focus);
        self.config_changed();
    }

    /// Switch operation and start a new problem.
    pub fn set_operation(&mut self, operation: Operation) {
        self.config.set_operation(operation);
        self.config_changed();
    }

    /// Replace the whole configuration and start a new problem.
    pub fn reconfigure(&mut self, config: DrillConfig) {
        self.config = config;
        self.config_changed();
    }

    fn require(&self, action: Action, allowed: &[Phase]) -> Result<(), SessionError> {
        if allowed.contains(&self.phase) {
            Ok(())
        } else {
            Err(SessionError::NotAvailable {
                action,
                phase: self.phase,
            })
        }
    }

    fn count(&mut self, outcome: Outcome, correct: bool) {
        self.score.record(correct);
        self.history.push(Attempt {
            problem: self.problem,
            input: self.input.clone(),
            outcome,
            at: Utc::now(),
        });
        tracing::debug!(
            session = %self.id,
            problem = %self.problem,
            %outcome,
            score = %self.score,
            "attempt counted"
        );
    }

    fn config_changed(&mut self) {
        tracing::debug!(session = %self.id, config = %self.config, "configuration changed");
        self.new_problem();
    }

    fn new_problem(&mut self) {
        self.problem = generate(&self.config, &mut self.draws);
        self.input.clear();
        self.phase = Phase::Entering;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator::{RngDraws, ScriptedDraws};

    fn session(config: DrillConfig, draws: impl IntoIterator<Item = u32>) -> Session<ScriptedDraws> {
        Session::new(config, ScriptedDraws::new(draws))
    }

    fn mul(max: i64) -> DrillConfig {
        DrillConfig::new(max, None, Operation::Multiplication)
    }

    #[test]
    fn starts_entering_with_empty_input() {
        let s = session(mul(5), [3, 4]);
        assert_eq!(s.phase(), Phase::Entering);
        assert_eq!(s.input(), "");
        assert_eq!(s.problem(), &Problem::new(3, 4, Operation::Multiplication).unwrap());
        assert_eq!(s.score(), Score::new());
        assert_eq!(s.correctness(), None);
        assert!(!s.is_revealed());
    }

    #[test]
    fn correct_submit_scenario() {
        let mut s = session(mul(5), [3, 4]);
        s.set_input("12").unwrap();
        assert_eq!(s.submit().unwrap(), Outcome::Correct);
        assert_eq!(s.phase(), Phase::Correct);
        assert_eq!(s.correctness(), Some(true));
        assert_eq!(s.score().to_string(), "1/1 (100%)");
        assert_eq!(s.visible_answer(), Some(12));
    }

    #[test]
    fn division_incorrect_then_reveal_scenario() {
        let config = DrillConfig::new(12, Some(6), Operation::Division);
        let mut s = session(config, [3]);
        assert_eq!(s.problem(), &Problem::new(18, 6, Operation::Division).unwrap());

        s.set_input("2").unwrap();
        assert_eq!(s.submit().unwrap(), Outcome::Incorrect);
        assert_eq!(s.phase(), Phase::Incorrect);
        assert_eq!(s.score().to_string(), "0/1 (0%)");
        assert_eq!(s.visible_answer(), None);

        assert_eq!(s.reveal().unwrap(), 3);
        assert_eq!(s.phase(), Phase::Revealed);
        assert!(s.is_revealed());
        assert_eq!(s.score().correct(), 0);
        assert_eq!(s.score().total(), 2);
    }

    #[test]
    fn non_numeric_submit_is_incorrect() {
        let mut s = session(mul(5), [3, 4]);
        s.set_input("twelve").unwrap();
        assert_eq!(s.submit().unwrap(), Outcome::Incorrect);
        assert_eq!(s.score().correct(), 0);
        assert_eq!(s.score().total(), 1);
    }

    #[test]
    fn empty_submit_is_refused_without_counting() {
        let mut s = session(mul(5), [3, 4]);
        assert_eq!(s.submit(), Err(SessionError::EmptyInput));
        s.set_input("  ").unwrap();
        assert_eq!(s.submit(), Err(SessionError::EmptyInput));
        assert_eq!(s.score().total(), 0);
        assert_eq!(s.phase(), Phase::Entering);
    }

    #[test]
    fn input_is_locked_after_incorrect() {
        let mut s = session(mul(5), [3, 4]);
        s.set_input("11").unwrap();
        s.submit().unwrap();
        let err = s.set_input("12").unwrap_err();
        assert_eq!(
            err,
            SessionError::NotAvailable {
                action: Action::EditInput,
                phase: Phase::Incorrect,
            }
        );
        assert!(s.press(Key::Digit(1)).is_err());
        assert_eq!(s.input(), "11");
    }

    #[test]
    fn retry_keeps_problem_and_clears_input() {
        let mut s = session(mul(5), [3, 4, 5, 5]);
        s.set_input("11").unwrap();
        s.submit().unwrap();
        s.retry().unwrap();
        assert_eq!(s.phase(), Phase::Entering);
        assert_eq!(s.input(), "");
        assert_eq!(s.problem(), &Problem::new(3, 4, Operation::Multiplication).unwrap());

        s.set_input("12").unwrap();
        assert_eq!(s.submit().unwrap(), Outcome::Correct);
        assert_eq!(s.score().to_string(), "1/2 (50%)");
    }

    #[test]
    fn retry_then_reveal_then_next() {
        let mut s = session(mul(5), [3, 4, 2, 2]);
        s.set_input("1").unwrap();
        s.submit().unwrap();
        s.retry().unwrap();
        assert_eq!(s.reveal().unwrap(), 12);
        let next = s.next().unwrap();
        assert_eq!(next, Problem::new(2, 2, Operation::Multiplication).unwrap());
        assert_eq!(s.phase(), Phase::Entering);
        assert_eq!(s.score().total(), 2);
    }

    #[test]
    fn reveal_from_entering_counts_once() {
        let mut s = session(mul(5), [3, 4]);
        assert_eq!(s.reveal().unwrap(), 12);
        assert_eq!(s.score().to_string(), "0/1 (0%)");
        assert!(s.reveal().is_err());
        assert_eq!(s.score().total(), 1);
    }

    #[test]
    fn finished_problems_only_offer_next() {
        let mut s = session(mul(5), [3, 4]);
        s.set_input("12").unwrap();
        s.submit().unwrap();
        assert!(s.retry().is_err());
        assert!(s.reveal().is_err());
        assert!(s.submit().is_err());
        assert!(s.set_input("1").is_err());
        assert_eq!(s.score().total(), 1);
        assert!(s.next().is_ok());
    }

    #[test]
    fn next_is_refused_while_entering_or_incorrect() {
        let mut s = session(mul(5), [3, 4]);
        assert!(s.next().is_err());
        s.set_input("5").unwrap();
        s.submit().unwrap();
        assert_eq!(
            s.next(),
            Err(SessionError::NotAvailable {
                action: Action::Next,
                phase: Phase::Incorrect,
            })
        );
    }

    #[test]
    fn keypad_edits_input() {
        let mut s = session(mul(5), [3, 4]);
        for key in [Key::Digit(1), Key::Digit(3), Key::Backspace, Key::Digit(2)] {
            s.press(key).unwrap();
        }
        assert_eq!(s.input(), "12");
        s.press(Key::Clear).unwrap();
        assert_eq!(s.input(), "");
        s.press(Key::Backspace).unwrap();
        assert_eq!(s.input(), "");
    }

    #[test]
    fn keypad_refuses_out_of_range_digit() {
        let mut s = session(mul(5), [3, 4]);
        s.press(Key::Digit(4)).unwrap();
        assert_eq!(s.press(Key::Digit(10)), Err(SessionError::InvalidDigit(10)));
        assert_eq!(s.input(), "4");
        assert_eq!(s.phase(), Phase::Entering);
    }

    #[test]
    fn keypad_and_text_entry_are_interchangeable() {
        let mut typed = session(mul(5), [3, 4]);
        typed.set_input("12").unwrap();
        let mut tapped = session(mul(5), [3, 4]);
        tapped.press(Key::Digit(1)).unwrap();
        tapped.press(Key::Digit(2)).unwrap();
        assert_eq!(typed.input(), tapped.input());
        assert_eq!(typed.submit(), tapped.submit());
    }

    #[test]
    fn key_parsing() {
        assert_eq!("7".parse::<Key>().unwrap(), Key::Digit(7));
        assert_eq!("C".parse::<Key>().unwrap(), Key::Clear);
        assert_eq!("<".parse::<Key>().unwrap(), Key::Backspace);
        assert!("10".parse::<Key>().is_err());
        assert!("x".parse::<Key>().is_err());
    }

    #[test]
    fn confirm_follows_phase() {
        let mut s = session(mul(5), [3, 4, 2, 3]);
        assert_eq!(s.confirm().unwrap(), Confirmed::Ignored);
        assert_eq!(s.score().total(), 0);

        s.set_input("10").unwrap();
        assert_eq!(s.confirm().unwrap(), Confirmed::Submitted(Outcome::Incorrect));
        assert_eq!(s.confirm().unwrap(), Confirmed::Retried);
        assert_eq!(s.phase(), Phase::Entering);

        s.set_input("12").unwrap();
        assert_eq!(s.confirm().unwrap(), Confirmed::Submitted(Outcome::Correct));
        assert_eq!(
            s.confirm().unwrap(),
            Confirmed::Advanced(Problem::new(2, 3, Operation::Multiplication).unwrap())
        );
        assert_eq!(s.score().to_string(), "1/2 (50%)");
    }

    #[test]
    fn config_change_resets_problem_but_keeps_score() {
        let mut s = session(mul(5), [3, 4, 2, 9, 4, 6]);
        s.set_input("7").unwrap();
        s.submit().unwrap();
        let before = s.score();

        s.set_max_operand(12);
        assert_eq!(s.phase(), Phase::Entering);
        assert_eq!(s.input(), "");
        assert_eq!(s.problem(), &Problem::new(2, 9, Operation::Multiplication).unwrap());
        assert_eq!(s.score(), before);

        s.set_input("1").unwrap();
        s.set_operation(Operation::Division);
        assert_eq!(s.input(), "");
        assert_eq!(s.problem(), &Problem::new(24, 4, Operation::Division).unwrap());
        assert_eq!(s.score(), before);
    }

    #[test]
    fn focus_change_resets_from_any_phase() {
        let mut s = Session::new(mul(9), RngDraws::seeded(1));
        s.reveal().unwrap();
        s.set_focus(Some(7));
        assert_eq!(s.phase(), Phase::Entering);
        assert_eq!(s.problem().a(), 7);
        assert_eq!(s.config().focus(), Some(7));

        s.set_focus(None);
        assert_eq!(s.config().focus(), None);
        assert_eq!(s.score().total(), 1);
    }

    #[test]
    fn reconfigure_clamps_through_config() {
        let mut s = Session::new(mul(9), RngDraws::seeded(5));
        s.reconfigure(DrillConfig::new(40, Some(30), Operation::Division));
        assert_eq!(s.config().max_operand(), 15);
        assert_eq!(s.problem().b(), 15);
    }

    #[test]
    fn history_records_every_counted_action() {
        let mut s = session(DrillConfig::new(12, Some(6), Operation::Division), [3]);
        s.set_input("2").unwrap();
        s.submit().unwrap();
        s.reveal().unwrap();

        let outcomes: Vec<Outcome> = s.history().iter().map(|a| a.outcome).collect();
        assert_eq!(outcomes, vec![Outcome::Incorrect, Outcome::Revealed]);
        assert_eq!(s.history()[0].input, "2");
        assert!(s.history().iter().all(|a| a.at >= s.started_at()));
        assert_eq!(s.history().len() as u32, s.score().total());
    }

    #[test]
    fn correct_never_exceeds_total() {
        let mut s = Session::new(mul(6), RngDraws::seeded(11));
        for round in 0..200u32 {
            match round % 4 {
                0 => {
                    let answer = s.problem().answer().to_string();
                    s.set_input(&answer).unwrap();
                    s.submit().unwrap();
                }
                1 => {
                    s.set_input("0").unwrap();
                    s.submit().unwrap();
                    s.reveal().unwrap();
                }
                2 => {
                    s.reveal().unwrap();
                }
                _ => {
                    s.set_input("x").unwrap();
                    s.submit().unwrap();
                    s.retry().unwrap();
                    s.reveal().unwrap();
                }
            }
            assert!(s.score().correct() <= s.score().total());
            s.next().unwrap();
        }
        assert_eq!(s.score().correct(), 50);
        assert_eq!(s.score().total(), 50 + 100 + 50 + 100);
    }
}
