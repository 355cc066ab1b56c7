//! Diagnostics recorded while loading extensions
//!
//! Entries are kept in the order they were reported and later forwarded to
//! the host's error-reporting channel.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{error, info, warn};

/// Severity of a loader diagnostic
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Info,
    Warning,
    Error,
}

/// A single diagnostic tagged with the path it concerns
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Diagnostic {
    pub severity: Severity,
    pub source: PathBuf,
    pub message: String,
}

/// Ordered collector of loader diagnostics
///
/// Every entry is also mirrored to tracing at the matching level.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DiagnosticsCollector {
    entries: Vec<Diagnostic>,
}

impl DiagnosticsCollector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn info(&mut self, source: &Path, message: impl Into<String>) {
        let message = message.into();
        info!(source = %source.display(), "{}", message);
        self.push(Severity::Info, source, message);
    }

    pub fn warning(&mut self, source: &Path, message: impl Into<String>) {
        let message = message.into();
        warn!(source = %source.display(), "{}", message);
        self.push(Severity::Warning, source, message);
    }

    pub fn error(&mut self, source: &Path, message: impl Into<String>) {
        let message = message.into();
        error!(source = %source.display(), "{}", message);
        self.push(Severity::Error, source, message);
    }

    /// Append all entries of another collector, keeping their order
    pub fn extend(&mut self, other: DiagnosticsCollector) {
        self.entries.extend(other.entries);
    }

    pub fn entries(&self) -> &[Diagnostic] {
        &self.entries
    }

    /// Entries of one severity, in report order
    pub fn with_severity(&self, severity: Severity) -> impl Iterator<Item = &Diagnostic> {
        self.entries.iter().filter(move |d| d.severity == severity)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn into_entries(self) -> Vec<Diagnostic> {
        self.entries
    }

    fn push(&mut self, severity: Severity, source: &Path, message: String) {
        self.entries.push(Diagnostic {
            severity,
            source: source.to_path_buf(),
            message,
        });
    }
}
