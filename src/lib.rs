//! pitch — one-command setup for the camping platform's local
//! development environment.
//!
//! Running `pitch` in a project checkout detects the host platform,
//! makes sure Node.js, pnpm, and MySQL are available (installing them
//! where the platform allows it), materializes the `.env` configuration,
//! installs the project's dependencies, applies the database schema, and
//! finally starts the development server in the foreground.

pub mod cli;
pub mod config;
pub mod error;
pub mod host;
pub mod launch;
pub mod orchestrator;
pub mod probe;
pub mod remediation;
pub mod shell;
pub mod steps;
pub mod ui;

pub use error::{PitchError, Result};
