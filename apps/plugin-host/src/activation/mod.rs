//! Activation engine
//!
//! Resolves which activation events apply at startup and hands them to the
//! activation dispatcher.

pub mod dispatcher;
pub mod eager;
pub mod probe;
pub mod resolver;

pub use dispatcher::{ActivationDispatcher, ActivationOutcome};
pub use eager::{activate_eagerly, EagerActivation};
pub use probe::{FileSystemProbe, TokioFileSystemProbe};
pub use resolver::{resolve_activation_plan, ActivationPlan};
