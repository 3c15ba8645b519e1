//! Interactive terminal UI.

use console::{style, Term};
use dialoguer::{Confirm, Input};

use crate::error::{PitchError, Result};

use super::{NoopSpinner, OutputMode, ProgressSpinner, SpinnerHandle, UserInterface};

/// Width of header and step separator rules.
const RULE_WIDTH: usize = 60;

/// UI for interactive terminal sessions: styled output via `console`,
/// prompts via `dialoguer`.
pub struct TerminalUI {
    term: Term,
    mode: OutputMode,
}

impl TerminalUI {
    pub fn new(mode: OutputMode) -> Self {
        Self {
            term: Term::stdout(),
            mode,
        }
    }

    fn write_line(&self, line: &str) {
        let _ = self.term.write_line(line);
    }
}

fn map_dialoguer_err(e: dialoguer::Error) -> PitchError {
    PitchError::Io(e.into())
}

impl UserInterface for TerminalUI {
    fn output_mode(&self) -> OutputMode {
        self.mode
    }

    fn message(&mut self, msg: &str) {
        if self.mode.shows_status() {
            self.write_line(msg);
        }
    }

    fn success(&mut self, msg: &str) {
        self.write_line(&format!("{} {}", style("✓").green(), msg));
    }

    fn warning(&mut self, msg: &str) {
        self.write_line(&format!("{} {}", style("⚠").yellow(), msg));
    }

    fn error(&mut self, msg: &str) {
        self.write_line(&format!("{} {}", style("✗").red(), msg));
    }

    fn show_header(&mut self, title: &str) {
        let rule = "=".repeat(RULE_WIDTH);
        self.write_line("");
        self.write_line(&rule);
        self.write_line(&format!("  {}", style(title).bold()));
        self.write_line(&rule);
        self.write_line("");
    }

    fn show_step(&mut self, current: usize, total: usize, title: &str) {
        if self.mode.shows_status() {
            self.write_line("");
            self.write_line(&format!(
                "{} {}",
                style(format!("[{}/{}]", current, total)).cyan().bold(),
                title
            ));
            self.write_line(&"-".repeat(RULE_WIDTH));
        }
    }

    fn confirm(&mut self, _key: &str, question: &str, default: bool) -> Result<bool> {
        Confirm::new()
            .with_prompt(question)
            .default(default)
            .interact_on(&self.term)
            .map_err(map_dialoguer_err)
    }

    fn input(&mut self, _key: &str, question: &str, allow_empty: bool) -> Result<String> {
        Input::<String>::new()
            .with_prompt(question)
            .allow_empty(allow_empty)
            .interact_text_on(&self.term)
            .map_err(map_dialoguer_err)
    }

    fn start_spinner(&mut self, message: &str) -> Box<dyn SpinnerHandle> {
        if self.mode.shows_status() {
            Box::new(ProgressSpinner::start(message))
        } else {
            Box::new(NoopSpinner)
        }
    }

    fn is_interactive(&self) -> bool {
        true
    }
}
