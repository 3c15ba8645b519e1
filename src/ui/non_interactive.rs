//! Non-interactive UI for CI and headless environments.
//!
//! Confirmations resolve to their defaults, and required text input is
//! an immediate [`PitchError::UserDeclined`] — there is nobody to ask.

use crate::error::{PitchError, Result};

use super::{NoopSpinner, OutputMode, SpinnerHandle, UserInterface};

/// Plain-text UI with no prompts, no colors, no spinners.
pub struct NonInteractiveUI {
    mode: OutputMode,
}

impl NonInteractiveUI {
    pub fn new(mode: OutputMode) -> Self {
        Self { mode }
    }
}

impl UserInterface for NonInteractiveUI {
    fn output_mode(&self) -> OutputMode {
        self.mode
    }

    fn message(&mut self, msg: &str) {
        if self.mode.shows_status() {
            println!("{}", msg);
        }
    }

    fn success(&mut self, msg: &str) {
        println!("[ok] {}", msg);
    }

    fn warning(&mut self, msg: &str) {
        println!("[warn] {}", msg);
    }

    fn error(&mut self, msg: &str) {
        eprintln!("[error] {}", msg);
    }

    fn show_header(&mut self, title: &str) {
        if self.mode.shows_status() {
            println!("== {} ==", title);
        }
    }

    fn show_step(&mut self, current: usize, total: usize, title: &str) {
        if self.mode.shows_status() {
            println!("[{}/{}] {}", current, total, title);
        }
    }

    fn confirm(&mut self, key: &str, question: &str, default: bool) -> Result<bool> {
        tracing::debug!(key, default, "non-interactive confirm resolved to default");
        println!("{} -> {}", question, if default { "yes" } else { "no" });
        Ok(default)
    }

    fn input(&mut self, key: &str, _question: &str, allow_empty: bool) -> Result<String> {
        if allow_empty {
            return Ok(String::new());
        }
        Err(PitchError::UserDeclined {
            action: format!("a value for '{}' (no terminal to ask on)", key),
        })
    }

    fn start_spinner(&mut self, message: &str) -> Box<dyn SpinnerHandle> {
        if self.mode.shows_status() {
            println!("... {}", message);
        }
        Box::new(NoopSpinner)
    }

    fn is_interactive(&self) -> bool {
        false
    }
}
