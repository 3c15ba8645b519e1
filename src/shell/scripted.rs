//! Scripted command runner for tests.
//!
//! `ScriptedRunner` implements [`CommandRunner`] without spawning any
//! process: responses are configured per command substring, and every
//! invocation is recorded for later assertion.
//!
//! # Example
//!
//! ```
//! use pitch::shell::{CommandRunner, CommandResult, CommandSpec, ScriptedRunner};
//!
//! let runner = ScriptedRunner::new()
//!     .respond("mysql --version", CommandResult::not_found());
//!
//! let probe = runner.run(&CommandSpec::probe("mysql"));
//! assert!(!probe.success());
//! assert!(runner.ran("mysql --version"));
//! ```

use std::cell::RefCell;
use std::path::{Path, PathBuf};

use super::{CommandResult, CommandRunner, CommandSpec};

/// Test double for [`CommandRunner`].
///
/// Rules are matched by substring against the rendered command line, in
/// the order they were added; unmatched commands get the default result
/// (success unless changed with [`ScriptedRunner::default_result`]).
#[derive(Debug)]
pub struct ScriptedRunner {
    rules: Vec<(String, CommandResult)>,
    default: CommandResult,
    calls: RefCell<Vec<String>>,
    extended: RefCell<Vec<PathBuf>>,
}

impl Default for ScriptedRunner {
    fn default() -> Self {
        Self::new()
    }
}

impl ScriptedRunner {
    /// New runner where every command succeeds with empty output.
    pub fn new() -> Self {
        Self {
            rules: Vec::new(),
            default: CommandResult::ok(""),
            calls: RefCell::new(Vec::new()),
            extended: RefCell::new(Vec::new()),
        }
    }

    /// Respond to any command containing `needle` with `result`.
    pub fn respond(mut self, needle: &str, result: CommandResult) -> Self {
        self.rules.push((needle.to_string(), result));
        self
    }

    /// Change the result returned for commands no rule matches.
    pub fn default_result(mut self, result: CommandResult) -> Self {
        self.default = result;
        self
    }

    /// All command lines run so far, in order.
    pub fn calls(&self) -> Vec<String> {
        self.calls.borrow().clone()
    }

    /// Whether any invoked command contained `needle`.
    pub fn ran(&self, needle: &str) -> bool {
        self.calls.borrow().iter().any(|c| c.contains(needle))
    }

    /// How many invoked commands contained `needle`.
    pub fn count(&self, needle: &str) -> usize {
        self.calls
            .borrow()
            .iter()
            .filter(|c| c.contains(needle))
            .count()
    }

    /// Directories passed to [`CommandRunner::extend_path`], in order.
    pub fn extended_paths(&self) -> Vec<PathBuf> {
        self.extended.borrow().clone()
    }
}

impl CommandRunner for ScriptedRunner {
    fn run(&self, spec: &CommandSpec) -> CommandResult {
        let rendered = spec.line.display();
        self.calls.borrow_mut().push(rendered.clone());

        for (needle, result) in &self.rules {
            if rendered.contains(needle.as_str()) {
                return result.clone();
            }
        }
        self.default.clone()
    }

    // Recorded unconditionally; test directories rarely exist on disk.
    fn extend_path(&self, dir: &Path) {
        self.extended.borrow_mut().push(dir.to_path_buf());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_success() {
        let runner = ScriptedRunner::new();
        assert!(runner.run(&CommandSpec::shell("anything")).success());
    }

    #[test]
    fn rules_match_by_substring_in_order() {
        let runner = ScriptedRunner::new()
            .respond("node --version", CommandResult::ok("v20.11.0"))
            .respond("node", CommandResult::not_found());

        let result = runner.run(&CommandSpec::probe("node"));
        assert!(result.success());
        assert!(result.stdout.contains("v20.11.0"));
    }

    #[test]
    fn records_calls() {
        let runner = ScriptedRunner::new();
        runner.run(&CommandSpec::shell("pnpm install"));
        runner.run(&CommandSpec::probe("mysql"));

        assert_eq!(runner.calls().len(), 2);
        assert!(runner.ran("pnpm install"));
        assert!(runner.ran("mysql --version"));
        assert!(!runner.ran("pnpm dev"));
    }

    #[test]
    fn count_tallies_matching_calls() {
        let runner = ScriptedRunner::new();
        runner.run(&CommandSpec::probe("node"));
        runner.run(&CommandSpec::probe("node"));
        assert_eq!(runner.count("node --version"), 2);
    }

    #[test]
    fn records_path_extensions() {
        let runner = ScriptedRunner::new();
        runner.extend_path(Path::new("/home/camper/.local/share/pnpm"));
        assert_eq!(
            runner.extended_paths(),
            vec![PathBuf::from("/home/camper/.local/share/pnpm")]
        );
    }

    #[test]
    fn default_result_override() {
        let runner = ScriptedRunner::new().default_result(CommandResult::exited(Some(1), ""));
        assert!(!runner.run(&CommandSpec::shell("whatever")).success());
    }
}
