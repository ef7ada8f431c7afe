use std::io::{BufRead, IsTerminal, Write};

use crate::error::Result;

/// Source of answers to the yes/no questions asked during an update.
pub trait Prompter {
    /// Asks `message` and returns the answer, `default` if the answer is empty or unrecognized.
    fn confirm(&mut self, message: &str, default: bool) -> Result<bool>;

    /// Blocks until the user acknowledges `message`.
    fn pause(&mut self, message: &str) -> Result<()>;
}

/// Interprets a free text answer.
/// Only the first non whitespace character is considered, case insensitive.
pub fn parse_answer(input: &str, default: bool) -> bool {
    match input.trim().chars().next().map(|c| c.to_ascii_lowercase()) {
        Some('y') => true,
        Some('n') => false,
        _ => default,
    }
}

/// Asks on the terminal with inquire, or reads plain lines when stdin is piped.
#[derive(Debug, Default)]
pub struct ConsolePrompter;

impl ConsolePrompter {
    fn ask(&self, message: &str) -> Result<String> {
        let stdin = std::io::stdin();
        if stdin.is_terminal() {
            return Ok(inquire::Text::new(message).prompt()?);
        }
        read_answer(message, &mut stdin.lock(), &mut std::io::stdout())
    }
}

impl Prompter for ConsolePrompter {
    fn confirm(&mut self, message: &str, default: bool) -> Result<bool> {
        let answer = self.ask(message)?;
        log::debug!("answer to {:?} : {:?}", message, answer);
        Ok(parse_answer(&answer, default))
    }

    fn pause(&mut self, message: &str) -> Result<()> {
        self.ask(message)?;
        Ok(())
    }
}

/// Prints `message` and reads a single line from `input`.
/// Reaching the end of input reads as an empty answer.
fn read_answer(message: &str, input: &mut dyn BufRead, output: &mut dyn Write) -> Result<String> {
    write!(output, "{} ", message)?;
    output.flush()?;
    let mut line = String::new();
    input.read_line(&mut line)?;
    Ok(line)
}

/// Answers yes to everything, used for unattended runs.
#[derive(Debug, Default)]
pub struct AssumeYes;

impl Prompter for AssumeYes {
    fn confirm(&mut self, message: &str, _default: bool) -> Result<bool> {
        log::info!("assuming yes : {}", message);
        Ok(true)
    }

    fn pause(&mut self, _message: &str) -> Result<()> {
        Ok(())
    }
}
