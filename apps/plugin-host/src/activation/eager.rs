//! Eager activation at host startup

use std::path::Path;
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::info;

use super::dispatcher::{dispatch_event, dispatch_events, ActivationDispatcher, ActivationOutcome};
use super::probe::FileSystemProbe;
use super::resolver::{resolve_activation_plan, ActivationPlan};
use crate::extensions::descriptor::ACTIVATE_ALL_EVENT;
use crate::extensions::registry::ExtensionRegistry;
use crate::host::events::HostEvent;

/// The resolved plan and the handles of every dispatched activation
#[derive(Debug)]
pub struct EagerActivation {
    pub plan: ActivationPlan,
    pub handles: Vec<JoinHandle<ActivationOutcome>>,
}

impl EagerActivation {
    /// Wait for every dispatched activation to settle
    pub async fn wait(self) -> Vec<ActivationOutcome> {
        let mut outcomes = Vec::with_capacity(self.handles.len());
        for result in futures::future::join_all(self.handles).await {
            match result {
                Ok(outcome) => outcomes.push(outcome),
                Err(e) => tracing::error!("Activation task panicked: {}", e),
            }
        }
        outcomes
    }
}

/// Fire the universal event, then the matching `workspaceContains:` events
///
/// The universal event is dispatched before any probe runs. Workspace
/// events are dispatched once all probes have finished.
pub async fn activate_eagerly(
    registry: &ExtensionRegistry,
    workspace_root: Option<&Path>,
    probe: &dyn FileSystemProbe,
    dispatcher: &Arc<dyn ActivationDispatcher>,
    notifier: Option<&mpsc::UnboundedSender<HostEvent>>,
) -> EagerActivation {
    let mut handles = vec![dispatch_event(
        Arc::clone(dispatcher),
        ACTIVATE_ALL_EVENT.to_string(),
        notifier.cloned(),
    )];

    let plan = resolve_activation_plan(registry, workspace_root, probe).await;
    if !plan.workspace_events().is_empty() {
        info!(
            "Activating {} workspaceContains events",
            plan.workspace_events().len()
        );
    }

    handles.extend(dispatch_events(
        dispatcher,
        plan.workspace_events().iter().cloned(),
        notifier,
    ));

    EagerActivation { plan, handles }
}
