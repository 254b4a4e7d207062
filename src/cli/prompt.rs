//! Line-oriented prompts with validation
//!
//! Every prompt re-asks until it gets an acceptable answer. The only way out
//! without one is end of input, reported as [`TrackerError::InputClosed`].

use crate::error::{Result, TrackerError};
use std::io::{BufRead, Write};
use std::str::FromStr;

/// Answers accepted as "yes" by [`Console::confirm`]
const YES_ANSWERS: [&str; 3] = ["y", "yes", "o"];

/// Prompting front end over any reader and writer
pub struct Console<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Console<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    pub fn output(&mut self) -> &mut W {
        &mut self.output
    }

    pub fn into_output(self) -> W {
        self.output
    }

    /// Print `label`, then read one trimmed line
    pub fn read_line(&mut self, label: &str) -> Result<String> {
        write!(self.output, "{}", label)?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Err(TrackerError::InputClosed.into());
        }
        Ok(line.trim().to_string())
    }

    /// Ask until the answer parses as `T` and passes `validate`
    ///
    /// Blank answers re-prompt silently.
    pub fn ask<T, F>(&mut self, label: &str, validate: F) -> Result<T>
    where
        T: FromStr,
        F: Fn(&T) -> bool,
    {
        let prompt = format!("🔸 {}: ", label);
        loop {
            let answer = self.read_line(&prompt)?;
            if answer.is_empty() {
                continue;
            }

            match answer.parse::<T>() {
                Ok(value) if validate(&value) => return Ok(value),
                Ok(_) => writeln!(self.output, "❌ Invalid value, try again.")?,
                Err(_) => writeln!(self.output, "❌ Could not read '{}', try again.", answer)?,
            }
        }
    }

    /// Ask for any non-blank text
    pub fn ask_text(&mut self, label: &str) -> Result<String> {
        self.ask(label, |_: &String| true)
    }

    /// Ask once; a blank answer means "none"
    pub fn ask_optional(&mut self, label: &str) -> Result<Option<String>> {
        let answer = self.read_line(&format!("📝 {}: ", label))?;
        Ok((!answer.is_empty()).then_some(answer))
    }

    /// Yes/no question, anything but a yes answer is "no"
    pub fn confirm(&mut self, question: &str) -> Result<bool> {
        let answer = self.read_line(&format!("{} (y/N): ", question))?;
        Ok(YES_ANSWERS.contains(&answer.to_lowercase().as_str()))
    }
}

/// True when `error` means the input stream has ended
pub fn is_input_closed(error: &anyhow::Error) -> bool {
    matches!(
        error.downcast_ref::<TrackerError>(),
        Some(TrackerError::InputClosed)
    )
}
