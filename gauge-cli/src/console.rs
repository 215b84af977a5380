//! Operator input channel
//!
//! Prompts are written to stdout and answers read line-by-line from stdin,
//! so flows stay testable with scripted answers.

use std::io::{self, BufRead, Write};

/// Source of operator answers
pub trait OperatorInput {
    /// Print a prompt and read one line, trimmed
    fn ask(&mut self, prompt: &str) -> io::Result<String>;
}

/// Interactive terminal bound to stdin/stdout
pub struct Terminal;

impl Terminal {
    pub fn new() -> Self {
        Self
    }
}

impl OperatorInput for Terminal {
    fn ask(&mut self, prompt: &str) -> io::Result<String> {
        let mut stdout = io::stdout().lock();
        write!(stdout, "{prompt}")?;
        stdout.flush()?;

        let mut line = String::new();
        io::stdin().lock().read_line(&mut line)?;
        Ok(line.trim().to_string())
    }
}

/// Scripted answers for tests
#[cfg(test)]
pub struct Scripted {
    answers: std::collections::VecDeque<String>,
}

#[cfg(test)]
impl Scripted {
    pub fn new(answers: &[&str]) -> Self {
        Self {
            answers: answers.iter().map(|a| a.to_string()).collect(),
        }
    }
}

#[cfg(test)]
impl OperatorInput for Scripted {
    fn ask(&mut self, _prompt: &str) -> io::Result<String> {
        self.answers
            .pop_front()
            .ok_or_else(|| io::Error::new(io::ErrorKind::UnexpectedEof, "no scripted answer left"))
    }
}
