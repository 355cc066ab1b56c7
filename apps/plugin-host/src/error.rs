//! Error types for the Glide plugin host
//!
//! Every collaborator seam (scanners, dispatchers, test runners) reports
//! failures through `HostError`. The startup path catches these at the
//! boundary where they originate and turns them into diagnostics or log
//! records, so none of them terminate the host.

use std::path::PathBuf;

use thiserror::Error;

/// Main error type for plugin host operations
#[derive(Error, Debug)]
pub enum HostError {
    /// An extension source location could not be scanned
    #[error("Failed to scan extensions at {}: {message}", path.display())]
    Scan { path: PathBuf, message: String },

    /// An activation handler failed for an event
    #[error("Activation of '{event}' failed: {message}")]
    Activation { event: String, message: String },

    /// IO-related errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// No test runner is registered for the requested kind
    #[error("Cannot find test runner: {0}")]
    TestRunnerNotFound(String),

    /// A test runner was found but failed to run
    #[error("Test run failed: {0}")]
    TestRun(String),

    /// An exit request was refused by the exit gate
    #[error("Exit with code {0} was blocked")]
    ExitBlocked(i32),

    /// The host startup sequence was already executed
    #[error("Plugin host already started")]
    AlreadyStarted,

    /// General errors with a message
    #[error("{0}")]
    General(String),
}

impl HostError {
    /// Create a scan error for a source root
    pub fn scan(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::Scan {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Create an activation error for an event
    pub fn activation(event: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Activation {
            event: event.into(),
            message: message.into(),
        }
    }

    /// Create a configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create a test run error
    pub fn test_run(msg: impl Into<String>) -> Self {
        Self::TestRun(msg.into())
    }
}

/// Convert HostError to String for reporting over the host event stream
impl From<HostError> for String {
    fn from(err: HostError) -> Self {
        err.to_string()
    }
}

/// Convert String errors to HostError
impl From<String> for HostError {
    fn from(s: String) -> Self {
        Self::General(s)
    }
}

/// Convert &str errors to HostError
impl From<&str> for HostError {
    fn from(s: &str) -> Self {
        Self::General(s.to_string())
    }
}

/// Result type alias using HostError
pub type Result<T> = std::result::Result<T, HostError>;
