//! Error types for pitch operations.
//!
//! [`PitchError`] is the single error type used across the crate. Every
//! failure mode that should change the process exit code has its own
//! variant; anything unexpected flows through `Other` via anyhow.

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for pitch operations.
#[derive(Debug, Error)]
pub enum PitchError {
    /// A required tool is absent and could not be made available.
    #[error("'{tool}' is not available: {message}")]
    ToolAbsent { tool: String, message: String },

    /// An install or setup command ran but did not succeed.
    #[error("Failed to set up '{tool}': {message}")]
    RemediationFailed { tool: String, message: String },

    /// The user declined an action that was required to continue.
    #[error("Setup cannot continue without {action}")]
    UserDeclined { action: String },

    /// Required configuration could not be materialized.
    #[error("Configuration file is required but missing: {path}")]
    ConfigMissing { path: PathBuf },

    /// The run was cancelled by an interrupt signal.
    #[error("Interrupted")]
    Interrupted,

    /// IO error wrapper.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic wrapped error for anyhow interop.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl PitchError {
    /// Process exit code for this error. Interrupts are a clean shutdown,
    /// everything else is a failure.
    pub fn exit_code(&self) -> u8 {
        match self {
            PitchError::Interrupted => 0,
            _ => 1,
        }
    }
}

/// Result type alias for pitch operations.
pub type Result<T> = std::result::Result<T, PitchError>;
