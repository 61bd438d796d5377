//! End-of-session summary.

use std::io::{self, Write};

use chrono::Utc;
use comfy_table::{Cell, Table};

use drillcard_core::{Attempt, Draw, Session};

use crate::repl::equation;

/// Print the attempt table and final score.
pub fn print_summary<D: Draw, W: Write>(session: &Session<D>, out: &mut W) -> io::Result<()> {
    let history = session.history();
    let elapsed = Utc::now() - session.started_at();

    writeln!(out, "\nSession {}", session.id())?;
    writeln!(
        out,
        "{} attempt(s) in {}s",
        history.len(),
        elapsed.num_seconds()
    )?;

    if !history.is_empty() {
        writeln!(out, "\n{}", attempt_table(history))?;
    }

    writeln!(out, "Final score: {}", session.score())
}

fn attempt_table(history: &[Attempt]) -> Table {
    let mut table = Table::new();
    table.set_header(vec!["#", "Problem", "Your answer", "Result"]);

    for (i, attempt) in history.iter().enumerate() {
        let input = if attempt.input.trim().is_empty() {
            "-".to_string()
        } else {
            attempt.input.trim().to_string()
        };
        table.add_row(vec![
            Cell::new(i + 1),
            Cell::new(equation(&attempt.problem)),
            Cell::new(input),
            Cell::new(attempt.outcome),
        ]);
    }

    table
}
