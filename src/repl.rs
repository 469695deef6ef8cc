//! Line-oriented command harness driving a [`BlockDeque<i64>`].
//!
//! Used by the `deque_repl` binary; the loop is generic over reader and
//! writer so it can be driven from tests.

use std::io::{self, BufRead, Write};

use crate::BlockDeque;

pub const HELP: &str = "Available commands:
  push_front <value>
  push_back <value>
  pop_front
  pop_back
  front
  back
  size
  capacity
  exit
";

const PROMPT: &str = "> ";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Command {
    PushFront(i64),
    PushBack(i64),
    PopFront,
    PopBack,
    Front,
    Back,
    Size,
    Capacity,
    Exit,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ParseError {
    Unknown,
    BadValue,
}

impl std::fmt::Display for ParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ParseError::Unknown => write!(f, "Unknown command."),
            ParseError::BadValue => write!(f, "Error: expected an integer value"),
        }
    }
}

impl std::error::Error for ParseError {}

impl Command {
    /// Parse one input line. Blank lines yield `Ok(None)`.
    pub fn parse(line: &str) -> Result<Option<Command>, ParseError> {
        let mut words = line.split_whitespace();
        let Some(name) = words.next() else {
            return Ok(None);
        };
        let mut value = || -> Result<i64, ParseError> {
            words
                .next()
                .and_then(|w| w.parse().ok())
                .ok_or(ParseError::BadValue)
        };
        let command = match name {
            "push_front" => Command::PushFront(value()?),
            "push_back" => Command::PushBack(value()?),
            "pop_front" => Command::PopFront,
            "pop_back" => Command::PopBack,
            "front" => Command::Front,
            "back" => Command::Back,
            "size" => Command::Size,
            "capacity" => Command::Capacity,
            "exit" => Command::Exit,
            _ => return Err(ParseError::Unknown),
        };
        Ok(Some(command))
    }
}

/// Apply `command` and return the line to report, if any.
pub fn execute<const B: usize>(deque: &mut BlockDeque<i64, B>, command: Command) -> Option<String> {
    let reported = match command {
        Command::PushFront(v) => {
            deque.push_front(v);
            return None;
        }
        Command::PushBack(v) => {
            deque.push_back(v);
            return None;
        }
        Command::PopFront => deque.pop_front().map(|_| None),
        Command::PopBack => deque.pop_back().map(|_| None),
        Command::Front => deque.front().map(|v| Some(format!("Front: {}", v))),
        Command::Back => deque.back().map(|v| Some(format!("Back: {}", v))),
        Command::Size => Ok(Some(format!("Size: {}", deque.len()))),
        Command::Capacity => Ok(Some(format!("Capacity: {}", deque.capacity()))),
        Command::Exit => Ok(None),
    };
    match reported {
        Ok(line) => line,
        Err(e) => Some(format!("Error: {}", e)),
    }
}

/// Print the help text, then read and run commands until `exit` or EOF.
pub fn run<R: BufRead, W: Write>(input: R, mut output: W) -> io::Result<()> {
    let mut deque: BlockDeque<i64> = BlockDeque::new();
    output.write_all(HELP.as_bytes())?;
    output.write_all(PROMPT.as_bytes())?;
    output.flush()?;

    for line in input.lines() {
        match Command::parse(&line?) {
            Ok(Some(Command::Exit)) => return Ok(()),
            Ok(Some(command)) => {
                if let Some(reply) = execute(&mut deque, command) {
                    writeln!(output, "{}", reply)?;
                }
            }
            Ok(None) => {}
            Err(e) => writeln!(output, "{}", e)?,
        }
        output.write_all(PROMPT.as_bytes())?;
        output.flush()?;
    }
    Ok(())
}
