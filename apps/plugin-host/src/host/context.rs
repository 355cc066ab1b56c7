//! Host and extension contexts
//!
//! `HostContext` is the single bundle of collaborators the plugin host is
//! built from. Nothing is looked up globally: the embedder constructs the
//! context once and passes it to `PluginHost::new`.
//!
//! `ExtensionContext` is what extension-facing code receives. It carries
//! the extension's id and the capabilities it may use, such as the exit gate.

use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use super::exit_gate::ExitGate;
use super::test_runner::TestRunnerRegistry;
use crate::activation::dispatcher::ActivationDispatcher;
use crate::activation::probe::{FileSystemProbe, TokioFileSystemProbe};
use crate::config::HostConfig;
use crate::extensions::scanner::{DescriptorScanner, ScanRoots};

/// The currently open workspace, if any
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WorkspaceContext {
    root: Option<PathBuf>,
}

impl WorkspaceContext {
    pub fn new(root: Option<PathBuf>) -> Self {
        Self { root }
    }

    pub fn root(&self) -> Option<&Path> {
        self.root.as_deref()
    }

    pub fn is_open(&self) -> bool {
        self.root.is_some()
    }
}

/// Everything the plugin host depends on
#[derive(Clone)]
pub struct HostContext {
    pub config: HostConfig,
    pub workspace: WorkspaceContext,
    pub scanner: Arc<dyn DescriptorScanner>,
    pub probe: Arc<dyn FileSystemProbe>,
    pub dispatcher: Arc<dyn ActivationDispatcher>,
    pub exit_gate: ExitGate,
    pub test_runners: Arc<TestRunnerRegistry>,
}

impl HostContext {
    /// Build a context with the default probe, exit gate and no test runners
    ///
    /// The workspace is taken from `config.workspace_root`.
    pub fn new(
        config: HostConfig,
        scanner: Arc<dyn DescriptorScanner>,
        dispatcher: Arc<dyn ActivationDispatcher>,
    ) -> Self {
        let workspace = WorkspaceContext::new(config.workspace_root.clone());
        Self {
            config,
            workspace,
            scanner,
            probe: Arc::new(TokioFileSystemProbe),
            dispatcher,
            exit_gate: ExitGate::process(),
            test_runners: Arc::new(TestRunnerRegistry::new()),
        }
    }

    pub fn with_workspace(mut self, workspace: WorkspaceContext) -> Self {
        self.workspace = workspace;
        self
    }

    pub fn with_probe(mut self, probe: Arc<dyn FileSystemProbe>) -> Self {
        self.probe = probe;
        self
    }

    pub fn with_exit_gate(mut self, exit_gate: ExitGate) -> Self {
        self.exit_gate = exit_gate;
        self
    }

    pub fn with_test_runners(mut self, test_runners: TestRunnerRegistry) -> Self {
        self.test_runners = Arc::new(test_runners);
        self
    }

    /// Source roots to scan, as configured
    pub fn scan_roots(&self) -> ScanRoots {
        ScanRoots {
            builtin: self.config.builtin_extensions_path.clone(),
            user: self.config.user_extensions_path.clone(),
            development: self.config.development_extension_path.clone(),
        }
    }
}

impl fmt::Debug for HostContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HostContext")
            .field("config", &self.config)
            .field("workspace", &self.workspace)
            .field("exit_gate", &self.exit_gate)
            .field("test_runners", &self.test_runners)
            .finish_non_exhaustive()
    }
}

/// Capabilities handed to one extension
#[derive(Debug, Clone)]
pub struct ExtensionContext {
    extension_id: String,
    exit_gate: ExitGate,
    workspace: WorkspaceContext,
}

impl ExtensionContext {
    pub fn new(extension_id: String, exit_gate: ExitGate, workspace: WorkspaceContext) -> Self {
        Self {
            extension_id,
            exit_gate,
            workspace,
        }
    }

    pub fn extension_id(&self) -> &str {
        &self.extension_id
    }

    /// The gate to request process exit through; closed for extensions
    pub fn exit_gate(&self) -> &ExitGate {
        &self.exit_gate
    }

    pub fn workspace(&self) -> &WorkspaceContext {
        &self.workspace
    }
}
