//! Line-oriented drill front end.
//!
//! Each input line is one command. A line that is not a command is taken as
//! an answer: it replaces the input and is confirmed, like typing into the
//! answer field and pressing Enter. An empty line is a bare Enter.

use std::io::{self, BufRead, Write};

use drillcard_core::config::parse_focus;
use drillcard_core::{Confirmed, Draw, Key, Operation, Outcome, Problem, Session, SessionError};

const HELP: &str = "\
Commands:
  <answer>            type an answer and check it
  (empty line)        Enter: check, try again, or go to the next problem
  key <keys...>       keypad presses: 0-9, C (clear), < (backspace)
  reveal              show the answer (counts as an attempt)
  retry               try the same problem again after a wrong answer
  next                go to the next problem
  max <1-15>          change the operand range
  focus <n|off>       pin or unpin the focus number
  op <mul|div>        switch operation
  score               show the score
  quit                finish and show the summary";

/// A parsed input line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Line {
    Command(Command),
    Quit,
}

/// Something to do to the session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Answer(String),
    Confirm,
    Keys(Vec<Key>),
    Reveal,
    Retry,
    Next,
    Max(i64),
    Focus(Option<i64>),
    Op(Operation),
    Score,
    Help,
}

pub fn parse_line(line: &str) -> Result<Line, String> {
    let trimmed = line.trim();
    let mut words = trimmed.split_whitespace();
    let Some(head) = words.next() else {
        return Ok(Line::Command(Command::Confirm));
    };
    let args: Vec<&str> = words.collect();

    let command = match head.to_lowercase().as_str() {
        "quit" | "exit" | "q" => return Ok(Line::Quit),
        "reveal" | "show" => Command::Reveal,
        "retry" => Command::Retry,
        "next" => Command::Next,
        "score" => Command::Score,
        "help" | "h" => Command::Help,
        "key" | "keys" => Command::Keys(parse_keys(&args)?),
        "max" => {
            let [value] = args[..] else {
                return Err("usage: max <1-15>".into());
            };
            let max = value
                .parse::<i64>()
                .map_err(|_| format!("not a number: {value}"))?;
            Command::Max(max)
        }
        "focus" => {
            let [value] = args[..] else {
                return Err("usage: focus <n|off>".into());
            };
            Command::Focus(parse_focus("focus", value).map_err(|e| e.to_string())?)
        }
        "op" | "operation" => {
            let [value] = args[..] else {
                return Err("usage: op <mul|div>".into());
            };
            Command::Op(value.parse::<Operation>().map_err(|e| e.to_string())?)
        }
        _ => Command::Answer(trimmed.to_string()),
    };
    Ok(Line::Command(command))
}

fn parse_keys(args: &[&str]) -> Result<Vec<Key>, String> {
    if args.is_empty() {
        return Err("usage: key <0-9|C|<>...".into());
    }
    let mut keys = Vec::new();
    for token in args {
        if let Ok(key) = token.parse::<Key>() {
            keys.push(key);
            continue;
        }
        for c in token.chars() {
            keys.push(c.to_string().parse::<Key>()?);
        }
    }
    Ok(keys)
}

/// What an applied command did, for rendering.
enum Event {
    Confirmed(Confirmed),
    Revealed(u32),
    InputChanged,
    Reconfigured,
    Score,
    Help,
}

/// Drive `session` from `input` until `quit` or end of input.
pub fn run<D, R, W>(session: &mut Session<D>, input: R, out: &mut W) -> io::Result<()>
where
    D: Draw,
    R: BufRead,
    W: Write,
{
    writeln!(out, "drillcard: {}", session.config())?;
    writeln!(out, "Type an answer and press Enter. `help` lists commands.")?;
    show_problem(session.problem(), out)?;

    for line in input.lines() {
        let line = line?;
        let command = match parse_line(&line) {
            Ok(Line::Quit) => break,
            Ok(Line::Command(command)) => command,
            Err(msg) => {
                writeln!(out, "! {msg}")?;
                continue;
            }
        };

        match apply(session, command) {
            Ok(event) => render(session, event, out)?,
            Err(e) => writeln!(out, "! {e}")?,
        }
    }

    out.flush()
}

fn apply<D: Draw>(session: &mut Session<D>, command: Command) -> Result<Event, SessionError> {
    let event = match command {
        Command::Answer(raw) => {
            session.set_input(&raw)?;
            Event::Confirmed(session.confirm()?)
        }
        Command::Confirm => Event::Confirmed(session.confirm()?),
        Command::Keys(keys) => {
            for key in keys {
                session.press(key)?;
            }
            Event::InputChanged
        }
        Command::Reveal => Event::Revealed(session.reveal()?),
        Command::Retry => {
            session.retry()?;
            Event::Confirmed(Confirmed::Retried)
        }
        Command::Next => Event::Confirmed(Confirmed::Advanced(session.next()?)),
        Command::Max(max) => {
            session.set_max_operand(max);
            Event::Reconfigured
        }
        Command::Focus(focus) => {
            session.set_focus(focus);
            Event::Reconfigured
        }
        Command::Op(operation) => {
            session.set_operation(operation);
            Event::Reconfigured
        }
        Command::Score => Event::Score,
        Command::Help => Event::Help,
    };
    Ok(event)
}

fn render<D, W: Write>(session: &Session<D>, event: Event, out: &mut W) -> io::Result<()>
where
    D: Draw,
{
    let problem = session.problem();
    match event {
        Event::Confirmed(Confirmed::Submitted(Outcome::Correct)) => {
            writeln!(out, "Correct! {}", equation(problem))?;
            writeln!(out, "Score: {}", session.score())?;
            writeln!(out, "Press Enter for the next problem.")?;
        }
        Event::Confirmed(Confirmed::Submitted(_)) => {
            writeln!(out, "Not quite: {} is wrong.", session.input().trim())?;
            writeln!(out, "Score: {}", session.score())?;
            writeln!(out, "Press Enter to try again, or type `reveal` to see the answer.")?;
        }
        Event::Confirmed(Confirmed::Retried) => {
            writeln!(out, "Try again.")?;
            show_problem(problem, out)?;
        }
        Event::Confirmed(Confirmed::Advanced(next)) => show_problem(&next, out)?,
        Event::Confirmed(Confirmed::Ignored) => {
            writeln!(out, "Type an answer first, or `reveal` to see it.")?;
        }
        Event::Revealed(answer) => {
            writeln!(out, "The answer is {answer}.")?;
            writeln!(out, "Score: {}", session.score())?;
            writeln!(out, "Press Enter for the next problem.")?;
        }
        Event::InputChanged => writeln!(out, "Answer: {}", session.input())?,
        Event::Reconfigured => {
            writeln!(out, "Now practising {}.", session.config())?;
            show_problem(problem, out)?;
        }
        Event::Score => writeln!(out, "Score: {}", session.score())?,
        Event::Help => writeln!(out, "{HELP}")?,
    }
    Ok(())
}

fn show_problem<W: Write>(problem: &Problem, out: &mut W) -> io::Result<()> {
    writeln!(out, "\nProblem: {problem}")
}

/// `3 × 4 = 12`
pub fn equation(problem: &Problem) -> String {
    format!(
        "{} {} {} = {}",
        problem.a(),
        problem.operation().symbol(),
        problem.b(),
        problem.answer()
    )
}
