//! Events the plugin host publishes to its embedder

use serde::{Deserialize, Serialize};

use crate::activation::dispatcher::ActivationOutcome;
use crate::extensions::diagnostics::Diagnostic;

/// Host lifecycle events, delivered over an unbounded channel
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum HostEvent {
    /// Diagnostics gathered while scanning and merging
    DiagnosticsReported { diagnostics: Vec<Diagnostic> },
    /// The registry is final
    RegistryReady { extension_count: usize },
    /// One activation event settled
    ActivationFinished(ActivationOutcome),
    /// The extension test run finished with this exit code
    ExtensionTestsFinished { exit_code: i32 },
}

impl HostEvent {
    /// Short human-readable description for logging
    pub fn description(&self) -> String {
        match self {
            Self::DiagnosticsReported { diagnostics } => {
                format!("{} diagnostics reported", diagnostics.len())
            }
            Self::RegistryReady { extension_count } => {
                format!("registry ready with {} extensions", extension_count)
            }
            Self::ActivationFinished(outcome) => match &outcome.error {
                None => format!("activated '{}'", outcome.event),
                Some(e) => format!("activation of '{}' failed: {}", outcome.event, e),
            },
            Self::ExtensionTestsFinished { exit_code } => {
                format!("extension tests finished with exit code {}", exit_code)
            }
        }
    }
}
