// ============================================================================
// backdrop-core/src/error.rs
// ============================================================================
//
// ERROR HANDLING: Core Error Types
//
// This module defines the error type shared by every part of the core library
// and the result alias used in all fallible signatures.
//
// KEY COMPONENTS:
// - CoreError: Error enum covering configuration, frame, probing and I/O errors
// - CoreResult: Result alias
// - Helper constructors for external command failures

// ---- External crate imports ----
use thiserror::Error;

// ---- Standard library imports ----
use std::io;
use std::path::PathBuf;
use std::process::ExitStatus;

// ============================================================================
// ERROR TYPE
// ============================================================================

/// Errors produced by the backdrop core library.
#[derive(Error, Debug)]
pub enum CoreError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Couldn't find video: {}", .0.display())]
    VideoNotFound(PathBuf),

    #[error("Video info error: {0}")]
    VideoInfoError(String),

    #[error("ffprobe parsing error: {0}")]
    FfprobeParse(String),

    #[error("Required dependency '{0}' not found")]
    DependencyNotFound(String),

    #[error("Failed to start command '{0}': {1}")]
    CommandStart(String, io::Error),

    #[error("Command '{0}' failed with status {1}: {2}")]
    CommandFailed(String, ExitStatus, String),

    #[error("Failed to wait for command '{0}': {1}")]
    CommandWait(String, io::Error),

    #[error("Error reading frame @ {index}: {reason}")]
    FrameRead { index: u64, reason: String },

    #[error("Frame size mismatch: expected {expected}, got {actual}")]
    FrameMismatch { expected: String, actual: String },

    #[error("Cannot compute a median over an empty set of samples")]
    EmptySampleSet,

    #[error("Every sample read failed for variant {variant} ({attempted} attempted)")]
    AllSamplesFailed { variant: usize, attempted: usize },

    #[error("Path error: {0}")]
    PathError(String),

    #[error("Image encoding error: {0}")]
    Image(#[from] image::ImageError),

    #[error("Operation failed: {0}")]
    OperationFailed(String),
}

/// Result type for backdrop core operations
pub type CoreResult<T> = std::result::Result<T, CoreError>;

// ============================================================================
// HELPER CONSTRUCTORS
// ============================================================================

/// Builds a `CommandStart` error for a command that could not be spawned.
pub fn command_start_error(cmd: impl Into<String>, err: io::Error) -> CoreError {
    CoreError::CommandStart(cmd.into(), err)
}

/// Builds a `CommandFailed` error from an exit status and captured stderr.
pub fn command_failed_error(
    cmd: impl Into<String>,
    status: ExitStatus,
    stderr: impl Into<String>,
) -> CoreError {
    CoreError::CommandFailed(cmd.into(), status, stderr.into())
}

/// Builds a `CommandWait` error for a child that could not be reaped.
pub fn command_wait_error(cmd: impl Into<String>, err: io::Error) -> CoreError {
    CoreError::CommandWait(cmd.into(), err)
}

/// Shorthand for an `InvalidConfig` error.
pub fn config_error(message: impl Into<String>) -> CoreError {
    CoreError::InvalidConfig(message.into())
}
