//! Exit gate - guarded access to process termination
//!
//! Extensions never get to call `std::process::exit` directly. They receive
//! an `ExitGate`, which refuses to terminate the host until the host itself
//! opens it (for example after an extension test run).

use std::fmt;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;
use tracing::{info, warn};

use crate::error::{HostError, Result};

type Terminator = dyn Fn(i32) + Send + Sync;

struct GateState {
    open: AtomicBool,
    blocked_attempts: AtomicUsize,
    terminator: Box<Terminator>,
}

/// Cloneable capability for requesting process exit
#[derive(Clone)]
pub struct ExitGate {
    state: Arc<GateState>,
}

impl ExitGate {
    /// Create a closed gate that runs `terminator` once opened
    pub fn new(terminator: impl Fn(i32) + Send + Sync + 'static) -> Self {
        Self {
            state: Arc::new(GateState {
                open: AtomicBool::new(false),
                blocked_attempts: AtomicUsize::new(0),
                terminator: Box::new(terminator),
            }),
        }
    }

    /// A closed gate that terminates the current process
    pub fn process() -> Self {
        Self::new(|code| std::process::exit(code))
    }

    /// Allow subsequent exit requests through. Only the host calls this.
    pub fn open(&self) {
        self.state.open.store(true, Ordering::SeqCst);
    }

    pub fn is_open(&self) -> bool {
        self.state.open.load(Ordering::SeqCst)
    }

    /// Request termination with `code`
    ///
    /// While the gate is closed the request is logged, counted and refused.
    pub fn exit(&self, code: i32) -> Result<()> {
        if !self.is_open() {
            self.state.blocked_attempts.fetch_add(1, Ordering::SeqCst);
            warn!("An extension called exit({}) and it was prevented", code);
            return Err(HostError::ExitBlocked(code));
        }

        info!("Plugin host exiting with code {}", code);
        (self.state.terminator)(code);
        Ok(())
    }

    /// Number of refused exit requests so far
    pub fn blocked_attempts(&self) -> usize {
        self.state.blocked_attempts.load(Ordering::SeqCst)
    }
}

impl Default for ExitGate {
    fn default() -> Self {
        Self::process()
    }
}

impl fmt::Debug for ExitGate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ExitGate")
            .field("open", &self.is_open())
            .field("blocked_attempts", &self.blocked_attempts())
            .finish()
    }
}
