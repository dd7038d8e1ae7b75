//! Prompt/response handling over a pair of text streams.
//!
//! Numbers are read as whitespace-delimited tokens, so several answers may be
//! typed on one line. Text answers take the remainder of a line.

use std::io::{BufRead, Write};

use anyhow::{Context as _, Result};
use thiserror::Error;
use tracing::debug;

pub const INVALID_NUMBER: &str = "Invalid number. Please try again.";

/// Returned when the input stream reaches end of file while an answer is expected.
#[derive(Debug, Error)]
#[error("input stream closed")]
pub struct InputClosed;

pub fn is_input_closed(err: &anyhow::Error) -> bool {
    err.chain().any(|cause| cause.is::<InputClosed>())
}

#[derive(Debug)]
pub struct Console<R, W> {
    input: R,
    output: W,
    line: String,
    cursor: usize,
}

impl<R: BufRead, W: Write> Console<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self {
            input,
            output,
            line: String::new(),
            cursor: 0,
        }
    }

    pub fn output(&mut self) -> &mut W {
        &mut self.output
    }

    pub fn into_output(self) -> W {
        self.output
    }

    pub fn write(&mut self, text: &str) -> Result<()> {
        self.output
            .write_all(text.as_bytes())
            .context("failed to write to output")?;
        self.output.flush().context("failed to flush output")
    }

    pub fn writeln(&mut self, text: &str) -> Result<()> {
        writeln!(self.output, "{text}").context("failed to write to output")
    }

    /// Reads the rest of the current line, or the next line if the current one
    /// is used up. Leading whitespace is kept and an empty line is a valid answer.
    pub fn read_line(&mut self) -> Result<String> {
        if self.cursor >= self.line.len() {
            self.fill_line()?;
        }

        let rest = &self.line[self.cursor..];
        let text = rest.trim_end_matches(['\r', '\n']).to_owned();
        self.cursor = self.line.len();

        Ok(text)
    }

    /// Skips whitespace, newlines included, then reads the rest of the line.
    pub fn read_text(&mut self) -> Result<String> {
        self.skip_whitespace()?;
        self.read_line()
    }

    pub fn read_token(&mut self) -> Result<String> {
        self.skip_whitespace()?;

        let rest = &self.line[self.cursor..];
        let end = rest.find(char::is_whitespace).unwrap_or(rest.len());
        let token = rest[..end].to_owned();
        self.cursor += end;

        Ok(token)
    }

    /// Writes `prompt` and reads tokens until `accept` takes one.
    ///
    /// A rejected token prints the message returned by `accept` and asks again.
    /// There is no retry limit.
    pub fn prompt_until<T, F>(&mut self, prompt: &str, mut accept: F) -> Result<T>
    where
        F: FnMut(&str) -> Result<T, String>,
    {
        loop {
            self.write(prompt)?;
            let token = self.read_token()?;

            match accept(&token) {
                Ok(value) => return Ok(value),
                Err(message) => {
                    debug!(input = %token, "rejected input");
                    self.writeln(&message)?;
                }
            }
        }
    }

    pub fn prompt_number(&mut self, prompt: &str) -> Result<f64> {
        self.prompt_until(prompt, parse_number)
    }

    pub fn prompt_line(&mut self, prompt: &str) -> Result<String> {
        self.write(prompt)?;
        self.read_line()
    }

    pub fn prompt_text(&mut self, prompt: &str) -> Result<String> {
        self.write(prompt)?;
        self.read_text()
    }

    fn skip_whitespace(&mut self) -> Result<()> {
        loop {
            let rest = &self.line[self.cursor..];
            let trimmed = rest.trim_start();
            if trimmed.is_empty() {
                self.fill_line()?;
                continue;
            }

            self.cursor += rest.len() - trimmed.len();
            return Ok(());
        }
    }

    fn fill_line(&mut self) -> Result<()> {
        self.line.clear();
        self.cursor = 0;

        let read = self
            .input
            .read_line(&mut self.line)
            .context("failed to read input")?;
        if read == 0 {
            return Err(InputClosed.into());
        }

        Ok(())
    }
}

/// Parses a finite real number. NaN and infinities are not accepted.
pub fn parse_number(token: &str) -> Result<f64, String> {
    token
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| INVALID_NUMBER.to_owned())
}
