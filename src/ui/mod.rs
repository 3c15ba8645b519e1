//! User interface components.
//!
//! This module provides:
//! - [`UserInterface`] trait so the orchestrator never talks to a
//!   terminal directly (prompts are injectable, hence testable)
//! - [`TerminalUI`] for interactive terminal usage
//! - [`NonInteractiveUI`] for CI/headless environments
//! - [`MockUI`] for tests

pub mod mock;
pub mod non_interactive;
pub mod output;
pub mod spinner;
pub mod terminal;

pub use mock::MockUI;
pub use non_interactive::NonInteractiveUI;
pub use output::OutputMode;
pub use spinner::{NoopSpinner, ProgressSpinner};
pub use terminal::TerminalUI;

use crate::error::Result;

/// Trait for user interface interactions.
///
/// The orchestrator receives a `&mut dyn UserInterface`; the concrete
/// implementation decides how messages are rendered and where prompt
/// answers come from.
pub trait UserInterface {
    /// Get the current output mode.
    fn output_mode(&self) -> OutputMode;

    /// Display a plain message.
    fn message(&mut self, msg: &str);

    /// Display a success message.
    fn success(&mut self, msg: &str);

    /// Display a warning message.
    fn warning(&mut self, msg: &str);

    /// Display an error message.
    fn error(&mut self, msg: &str);

    /// Show a banner/header.
    fn show_header(&mut self, title: &str);

    /// Show a step counter line ("[3/7] ...").
    fn show_step(&mut self, current: usize, total: usize, title: &str);

    /// Ask a yes/no question. `key` identifies the prompt for scripted
    /// responses in tests.
    fn confirm(&mut self, key: &str, question: &str, default: bool) -> Result<bool>;

    /// Ask for a line of text. With `allow_empty`, an empty answer is
    /// returned as-is instead of re-prompting.
    fn input(&mut self, key: &str, question: &str, allow_empty: bool) -> Result<String>;

    /// Start a spinner for a long operation.
    fn start_spinner(&mut self, message: &str) -> Box<dyn SpinnerHandle>;

    /// Check if running in interactive mode.
    fn is_interactive(&self) -> bool;
}

/// Handle for controlling a spinner.
pub trait SpinnerHandle {
    /// Update the spinner message.
    fn set_message(&mut self, msg: &str);

    /// Mark the operation as successful.
    fn finish_success(&mut self, msg: &str);

    /// Mark the operation as failed.
    fn finish_error(&mut self, msg: &str);
}

/// Create the appropriate UI for the current environment.
pub fn create_ui(interactive: bool, mode: OutputMode) -> Box<dyn UserInterface> {
    if interactive {
        Box::new(TerminalUI::new(mode))
    } else {
        Box::new(NonInteractiveUI::new(mode))
    }
}
