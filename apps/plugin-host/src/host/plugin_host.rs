//! Plugin Host - runs the extension startup sequence
//!
//! The PluginHost is the central coordinator of the host process. It:
//! - Scans the builtin, user and development locations concurrently
//! - Merges the results into the registry, which is then frozen
//! - Fires the universal and `workspaceContains:` activation events
//! - Runs extension tests when configured
//! - Publishes diagnostics and activation outcomes as host events

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::{mpsc, OnceCell, RwLock};
use tracing::{error, info, warn};

use super::context::{ExtensionContext, HostContext};
use super::events::HostEvent;
use crate::activation::eager::{activate_eagerly, EagerActivation};
use crate::error::{HostError, Result};
use crate::extensions::diagnostics::{Diagnostic, Severity};
use crate::extensions::merger::merge_descriptors;
use crate::extensions::registry::ExtensionRegistry;
use crate::extensions::scanner::scan_sources;

/// What `PluginHost::start` did
#[derive(Debug)]
pub struct StartupReport {
    pub registry: Arc<ExtensionRegistry>,
    pub diagnostics: Vec<Diagnostic>,
    /// Plan and handles of the dispatched activations, not awaited
    pub activation: EagerActivation,
}

/// The plugin host
pub struct PluginHost {
    ctx: HostContext,
    /// Set exactly once by `start`
    registry: OnceCell<Arc<ExtensionRegistry>>,
    diagnostics: RwLock<Vec<Diagnostic>>,
    started: AtomicBool,
    /// Channel sender for host events
    event_sender: mpsc::UnboundedSender<HostEvent>,
    /// Channel receiver for host events (taken by the embedder)
    event_receiver: RwLock<Option<mpsc::UnboundedReceiver<HostEvent>>>,
}

impl PluginHost {
    /// Create a new plugin host
    pub fn new(ctx: HostContext) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        Self {
            ctx,
            registry: OnceCell::new(),
            diagnostics: RwLock::new(Vec::new()),
            started: AtomicBool::new(false),
            event_sender: tx,
            event_receiver: RwLock::new(Some(rx)),
        }
    }

    /// Take the host event receiver; only the first call gets it
    pub async fn take_event_receiver(&self) -> Option<mpsc::UnboundedReceiver<HostEvent>> {
        self.event_receiver.write().await.take()
    }

    /// Run the startup sequence
    ///
    /// Scan and merge failures never fail startup; they end up in the
    /// diagnostics. The only error is calling `start` twice.
    pub async fn start(&self) -> Result<StartupReport> {
        if self.started.swap(true, Ordering::SeqCst) {
            return Err(HostError::AlreadyStarted);
        }
        info!("Starting plugin host");

        let scanned = scan_sources(self.ctx.scanner.as_ref(), &self.ctx.scan_roots()).await;
        let mut diagnostics = scanned.diagnostics;

        let merged = merge_descriptors(scanned.builtin, scanned.user, scanned.development);
        diagnostics.extend(merged.diagnostics);

        let registry = Arc::new(merged.registry);
        self.registry
            .set(Arc::clone(&registry))
            .map_err(|_| HostError::AlreadyStarted)?;
        info!("Extension registry ready with {} extensions", registry.len());

        let diagnostics = diagnostics.into_entries();
        *self.diagnostics.write().await = diagnostics.clone();
        self.emit(HostEvent::DiagnosticsReported {
            diagnostics: diagnostics.clone(),
        });
        self.emit(HostEvent::RegistryReady {
            extension_count: registry.len(),
        });

        let activation = activate_eagerly(
            &registry,
            self.ctx.workspace.root(),
            self.ctx.probe.as_ref(),
            &self.ctx.dispatcher,
            Some(&self.event_sender),
        )
        .await;

        Ok(StartupReport {
            registry,
            diagnostics,
            activation,
        })
    }

    /// Run the configured extension tests and exit through the gate
    ///
    /// Returns `None` when no tests are configured. Otherwise returns the
    /// exit code that was passed to the gate: 1 if any test failed or the
    /// runner could not be found or failed, else 0.
    pub async fn run_extension_tests(&self) -> Option<i32> {
        let root = self.ctx.config.extension_tests_path.as_deref()?;
        let kind = self.ctx.config.test_runner.as_deref().unwrap_or_default();

        let exit_code = match self.ctx.test_runners.run(kind, root).await {
            Ok(outcome) => outcome.exit_code(),
            Err(e) => {
                error!("Extension tests did not run: {}", e);
                self.diagnostics.write().await.push(Diagnostic {
                    severity: Severity::Error,
                    source: root.to_path_buf(),
                    message: e.to_string(),
                });
                1
            }
        };

        self.emit(HostEvent::ExtensionTestsFinished { exit_code });
        self.ctx.exit_gate.open();
        if let Err(e) = self.ctx.exit_gate.exit(exit_code) {
            warn!("Exit after extension tests failed: {}", e);
        }
        Some(exit_code)
    }

    /// The frozen registry, once `start` has built it
    pub fn registry(&self) -> Option<Arc<ExtensionRegistry>> {
        self.registry.get().cloned()
    }

    /// All diagnostics recorded so far
    pub async fn diagnostics(&self) -> Vec<Diagnostic> {
        self.diagnostics.read().await.clone()
    }

    /// Capabilities for extension-facing code
    pub fn extension_context(&self, extension_id: impl Into<String>) -> ExtensionContext {
        ExtensionContext::new(
            extension_id.into(),
            self.ctx.exit_gate.clone(),
            self.ctx.workspace.clone(),
        )
    }

    pub fn context(&self) -> &HostContext {
        &self.ctx
    }

    fn emit(&self, event: HostEvent) {
        tracing::trace!("Host event: {}", event.description());
        let _ = self.event_sender.send(event);
    }
}
