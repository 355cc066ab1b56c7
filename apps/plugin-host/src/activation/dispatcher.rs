//! Activation dispatch
//!
//! Each event is handed to the `ActivationDispatcher` on its own task.
//! Failures are logged and reported, never propagated: one extension
//! failing to activate must not affect any other activation.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use crate::error::Result;
use crate::host::events::HostEvent;

/// Activates the extensions interested in an event
#[async_trait]
pub trait ActivationDispatcher: Send + Sync {
    async fn activate_by_event(&self, event: &str) -> Result<()>;
}

/// How the dispatch of one event ended
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivationOutcome {
    pub event: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ActivationOutcome {
    pub fn is_success(&self) -> bool {
        self.error.is_none()
    }
}

/// Dispatch one event on its own task
///
/// The returned handle may be awaited but does not need to be; the
/// activation proceeds either way. When `notifier` is set the outcome is
/// also published as a host event.
pub fn dispatch_event(
    dispatcher: Arc<dyn ActivationDispatcher>,
    event: String,
    notifier: Option<mpsc::UnboundedSender<HostEvent>>,
) -> JoinHandle<ActivationOutcome> {
    tokio::spawn(async move {
        debug!("Dispatching activation event: {}", event);

        let outcome = match dispatcher.activate_by_event(&event).await {
            Ok(()) => ActivationOutcome { event, error: None },
            Err(e) => {
                warn!("Activation event '{}' failed: {}", event, e);
                ActivationOutcome {
                    event,
                    error: Some(e.to_string()),
                }
            }
        };

        if let Some(notifier) = notifier {
            let _ = notifier.send(HostEvent::ActivationFinished(outcome.clone()));
        }

        outcome
    })
}

/// Dispatch every event independently
pub fn dispatch_events<I>(
    dispatcher: &Arc<dyn ActivationDispatcher>,
    events: I,
    notifier: Option<&mpsc::UnboundedSender<HostEvent>>,
) -> Vec<JoinHandle<ActivationOutcome>>
where
    I: IntoIterator<Item = String>,
{
    events
        .into_iter()
        .map(|event| dispatch_event(Arc::clone(dispatcher), event, notifier.cloned()))
        .collect()
}
