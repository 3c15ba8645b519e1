//! Mock UI implementation for testing.
//!
//! `MockUI` implements the `UserInterface` trait, captures all output for
//! later assertion, and answers prompts from pre-configured responses.
//!
//! # Example
//!
//! ```
//! use pitch::ui::{MockUI, UserInterface};
//!
//! let mut ui = MockUI::new();
//! ui.set_confirm("env_create", true);
//!
//! ui.warning("No .env file found.");
//! assert!(ui.has_warning(".env"));
//! assert!(ui.confirm("env_create", "Create?", false).unwrap());
//! ```

use std::collections::HashMap;

use crate::error::Result;

use super::{OutputMode, SpinnerHandle, UserInterface};

/// Mock UI that records interactions and plays back scripted answers.
///
/// Unconfigured confirms fall back to the prompt's default; unconfigured
/// inputs return an empty string.
#[derive(Debug, Default)]
pub struct MockUI {
    mode: OutputMode,
    interactive: bool,
    messages: Vec<String>,
    successes: Vec<String>,
    warnings: Vec<String>,
    errors: Vec<String>,
    headers: Vec<String>,
    steps: Vec<(usize, usize, String)>,
    spinners: Vec<String>,
    confirm_responses: HashMap<String, bool>,
    input_responses: HashMap<String, String>,
    confirms_shown: Vec<String>,
    inputs_shown: Vec<String>,
}

impl MockUI {
    /// Create a new MockUI (interactive, Normal mode).
    pub fn new() -> Self {
        Self {
            mode: OutputMode::Normal,
            interactive: true,
            ..Default::default()
        }
    }

    /// Script the answer to a confirm prompt.
    pub fn set_confirm(&mut self, key: &str, answer: bool) {
        self.confirm_responses.insert(key.to_string(), answer);
    }

    /// Script the answer to an input prompt.
    pub fn set_input(&mut self, key: &str, answer: &str) {
        self.input_responses
            .insert(key.to_string(), answer.to_string());
    }

    /// Set whether this mock behaves as interactive.
    pub fn set_interactive(&mut self, interactive: bool) {
        self.interactive = interactive;
    }

    /// Get all captured messages.
    pub fn messages(&self) -> &[String] {
        &self.messages
    }

    /// Get all captured success messages.
    pub fn successes(&self) -> &[String] {
        &self.successes
    }

    /// Get all captured warning messages.
    pub fn warnings(&self) -> &[String] {
        &self.warnings
    }

    /// Get all captured error messages.
    pub fn errors(&self) -> &[String] {
        &self.errors
    }

    /// Get all captured headers.
    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    /// Get all captured step counters as (current, total, title).
    pub fn steps(&self) -> &[(usize, usize, String)] {
        &self.steps
    }

    /// Get all spinner messages that were started.
    pub fn spinners(&self) -> &[String] {
        &self.spinners
    }

    /// Get all confirm prompts shown (by key).
    pub fn confirms_shown(&self) -> &[String] {
        &self.confirms_shown
    }

    /// Get all input prompts shown (by key).
    pub fn inputs_shown(&self) -> &[String] {
        &self.inputs_shown
    }

    /// Check if a specific message was shown.
    pub fn has_message(&self, msg: &str) -> bool {
        self.messages.iter().any(|m| m.contains(msg))
    }

    /// Check if a specific success was shown.
    pub fn has_success(&self, msg: &str) -> bool {
        self.successes.iter().any(|m| m.contains(msg))
    }

    /// Check if a specific warning was shown.
    pub fn has_warning(&self, msg: &str) -> bool {
        self.warnings.iter().any(|m| m.contains(msg))
    }

    /// Check if a specific error was shown.
    pub fn has_error(&self, msg: &str) -> bool {
        self.errors.iter().any(|m| m.contains(msg))
    }
}

impl UserInterface for MockUI {
    fn output_mode(&self) -> OutputMode {
        self.mode
    }

    fn message(&mut self, msg: &str) {
        self.messages.push(msg.to_string());
    }

    fn success(&mut self, msg: &str) {
        self.successes.push(msg.to_string());
    }

    fn warning(&mut self, msg: &str) {
        self.warnings.push(msg.to_string());
    }

    fn error(&mut self, msg: &str) {
        self.errors.push(msg.to_string());
    }

    fn show_header(&mut self, title: &str) {
        self.headers.push(title.to_string());
    }

    fn show_step(&mut self, current: usize, total: usize, title: &str) {
        self.steps.push((current, total, title.to_string()));
    }

    fn confirm(&mut self, key: &str, _question: &str, default: bool) -> Result<bool> {
        self.confirms_shown.push(key.to_string());
        Ok(self.confirm_responses.get(key).copied().unwrap_or(default))
    }

    fn input(&mut self, key: &str, _question: &str, _allow_empty: bool) -> Result<String> {
        self.inputs_shown.push(key.to_string());
        Ok(self.input_responses.get(key).cloned().unwrap_or_default())
    }

    fn start_spinner(&mut self, message: &str) -> Box<dyn SpinnerHandle> {
        self.spinners.push(message.to_string());
        Box::new(super::NoopSpinner)
    }

    fn is_interactive(&self) -> bool {
        self.interactive
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn captures_output_by_kind() {
        let mut ui = MockUI::new();
        ui.message("Hello");
        ui.success("Done");
        ui.warning("Be careful");
        ui.error("Oops");

        assert_eq!(ui.messages(), &["Hello"]);
        assert_eq!(ui.successes(), &["Done"]);
        assert_eq!(ui.warnings(), &["Be careful"]);
        assert_eq!(ui.errors(), &["Oops"]);
    }

    #[test]
    fn scripted_confirm_and_record() {
        let mut ui = MockUI::new();
        ui.set_confirm("install_mysql", false);

        assert!(!ui.confirm("install_mysql", "Install?", true).unwrap());
        assert_eq!(ui.confirms_shown(), &["install_mysql"]);
    }

    #[test]
    fn unscripted_confirm_uses_default() {
        let mut ui = MockUI::new();
        assert!(ui.confirm("anything", "Continue?", true).unwrap());
        assert!(!ui.confirm("anything", "Continue?", false).unwrap());
    }

    #[test]
    fn scripted_input_and_fallback() {
        let mut ui = MockUI::new();
        ui.set_input("db", "mysql://localhost/camping");

        assert_eq!(
            ui.input("db", "URL?", false).unwrap(),
            "mysql://localhost/camping"
        );
        assert_eq!(ui.input("other", "Value?", true).unwrap(), "");
        assert_eq!(ui.inputs_shown(), &["db", "other"]);
    }

    #[test]
    fn captures_steps_and_headers() {
        let mut ui = MockUI::new();
        ui.show_header("Setup");
        ui.show_step(1, 7, "Checking Node.js...");
        ui.show_step(2, 7, "Checking pnpm...");

        assert_eq!(ui.headers(), &["Setup"]);
        assert_eq!(ui.steps().len(), 2);
        assert_eq!(ui.steps()[0].0, 1);
        assert_eq!(ui.steps()[1].2, "Checking pnpm...");
    }

    #[test]
    fn captures_spinners() {
        let mut ui = MockUI::new();
        let _spinner = ui.start_spinner("Installing dependencies");
        assert_eq!(ui.spinners(), &["Installing dependencies"]);
    }

    #[test]
    fn has_helpers_match_substrings() {
        let mut ui = MockUI::new();
        ui.warning("Continuing without MySQL");
        ui.error("Dependency installation failed");

        assert!(ui.has_warning("MySQL"));
        assert!(ui.has_error("Dependency"));
        assert!(!ui.has_warning("pnpm"));
    }

    #[test]
    fn interactivity_is_settable() {
        let mut ui = MockUI::new();
        assert!(ui.is_interactive());
        ui.set_interactive(false);
        assert!(!ui.is_interactive());
    }
}
