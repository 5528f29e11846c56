//! Operator prompt abstraction.
//!
//! The pipeline asks the operator a handful of questions (format fallback,
//! per-release confirmation, retry after exhausted attempts or a failed
//! unpack). [`Prompt`] keeps that I/O out of the core; [`LinePrompt`] is the
//! line-based implementation the CLI runs on stdin/stdout.

use std::io::{self, BufRead, Write};

pub const YES: &str = "y";
pub const NO: &str = "n";

#[derive(Debug, thiserror::Error)]
pub enum PromptError {
    #[error("input closed before an answer was given")]
    Closed,
    #[error("prompt I/O failed: {0}")]
    Io(#[from] io::Error),
}

pub trait Prompt {
    /// Asks until the answer matches one of `choices` (ASCII case-insensitive)
    /// and returns that choice as listed.
    fn choose(&mut self, prompt: &str, choices: &[String]) -> Result<String, PromptError>;

    /// Yes/no question; only `y` and `n` are accepted.
    fn confirm(&mut self, prompt: &str) -> Result<bool, PromptError> {
        let answer = self.choose(prompt, &[YES.to_string(), NO.to_string()])?;
        Ok(answer == YES)
    }

    /// Shows a diagnostic or progress line to the operator.
    fn notice(&mut self, message: &str);
}

impl<P: Prompt + ?Sized> Prompt for &mut P {
    fn choose(&mut self, prompt: &str, choices: &[String]) -> Result<String, PromptError> {
        (**self).choose(prompt, choices)
    }

    fn confirm(&mut self, prompt: &str) -> Result<bool, PromptError> {
        (**self).confirm(prompt)
    }

    fn notice(&mut self, message: &str) {
        (**self).notice(message)
    }
}

/// Prompt reading one answer per line from `input` and writing to `output`.
pub struct LinePrompt<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> LinePrompt<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Free-text question; returns the trimmed line.
    pub fn ask(&mut self, prompt: &str) -> Result<String, PromptError> {
        write!(self.output, "{}: ", prompt)?;
        self.output.flush()?;
        self.read_answer()
    }

    fn read_answer(&mut self) -> Result<String, PromptError> {
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Err(PromptError::Closed);
        }
        Ok(line.trim().to_string())
    }

    pub fn into_inner(self) -> (R, W) {
        (self.input, self.output)
    }
}

impl<R: BufRead, W: Write> Prompt for LinePrompt<R, W> {
    fn choose(&mut self, prompt: &str, choices: &[String]) -> Result<String, PromptError> {
        let listed = choices.join("/");
        loop {
            write!(self.output, "{} ({}): ", prompt, listed)?;
            self.output.flush()?;
            let answer = self.read_answer()?;
            if let Some(choice) = choices.iter().find(|c| c.eq_ignore_ascii_case(&answer)) {
                return Ok(choice.clone());
            }
        }
    }

    fn notice(&mut self, message: &str) {
        if writeln!(self.output, "{}", message).is_err() {
            tracing::warn!("could not write prompt output: {}", message);
        }
    }
}

/// Line prompt on the process's stdin/stdout.
pub fn stdio() -> LinePrompt<io::StdinLock<'static>, io::Stdout> {
    LinePrompt::new(io::stdin().lock(), io::stdout())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn prompt(input: &str) -> LinePrompt<Cursor<Vec<u8>>, Vec<u8>> {
        LinePrompt::new(Cursor::new(input.as_bytes().to_vec()), Vec::new())
    }

    fn formats() -> Vec<String> {
        ["flac", "mp3"].iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn choose_reprompts_until_valid() {
        let mut p = prompt("ogg\n\nFLAC\n");
        assert_eq!(p.choose("Format?", &formats()).unwrap(), "flac");
        let (_, out) = p.into_inner();
        let out = String::from_utf8(out).unwrap();
        assert_eq!(out.matches("Format? (flac/mp3): ").count(), 3);
    }

    #[test]
    fn confirm_accepts_only_y_and_n() {
        let mut p = prompt("yes\nY\n");
        assert!(p.confirm("Retry?").unwrap());

        let mut p = prompt("no\nn\n");
        assert!(!p.confirm("Retry?").unwrap());
    }

    #[test]
    fn closed_input_is_an_error() {
        let mut p = prompt("maybe\n");
        assert!(matches!(p.confirm("Retry?"), Err(PromptError::Closed)));
    }

    #[test]
    fn ask_returns_trimmed_line() {
        let mut p = prompt("  ada@example.com \n");
        assert_eq!(p.ask("Email").unwrap(), "ada@example.com");
    }

    #[test]
    fn notice_writes_a_line() {
        let mut p = prompt("");
        p.notice("Skipping.");
        let (_, out) = p.into_inner();
        assert_eq!(out, b"Skipping.\n");
    }
}
