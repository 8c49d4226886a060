use std::fmt::Display;
use std::io::{BufRead, Write};
use std::str::FromStr;

use crate::error::{Error, Result};

/// Asks for values on the output and reads the answers line by line.
pub struct Prompt<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Prompt<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Reads one answer, a malformed answer is an error.
    pub fn ask<T>(&mut self, question: &str) -> Result<T>
    where
        T: FromStr,
        T::Err: Display,
    {
        write!(self.output, "{}: ", question)?;
        self.output.flush()?;
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Err(Error::InputClosed(question.to_string()));
        }
        let answer = line.trim();
        answer.parse().map_err(|e: T::Err| Error::InvalidInput {
            question: question.to_string(),
            answer: answer.to_string(),
            reason: e.to_string(),
        })
    }

    /// Returns the given value or asks for it.
    pub fn value_or_ask<T>(&mut self, value: Option<T>, question: &str) -> Result<T>
    where
        T: FromStr,
        T::Err: Display,
    {
        match value {
            Some(value) => Ok(value),
            None => self.ask(question),
        }
    }
}
