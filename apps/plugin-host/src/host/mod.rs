//! Plugin host orchestration
//!
//! This module wires the collaborators together and exposes the host to
//! its embedder:
//! - `HostContext` for explicit dependency injection
//! - `PluginHost` for the startup sequence
//! - The exit gate and test runner capabilities
//! - Host events for the error-reporting channel

pub mod context;
pub mod events;
pub mod exit_gate;
pub mod plugin_host;
pub mod test_runner;

pub use context::{ExtensionContext, HostContext, WorkspaceContext};
pub use events::HostEvent;
pub use exit_gate::ExitGate;
pub use plugin_host::{PluginHost, StartupReport};
pub use test_runner::{TestOutcome, TestRunner, TestRunnerRegistry};
