//! Glide Plugin Host
//!
//! The extension host process of the Glide editor. It discovers extension
//! descriptors from the builtin, user and development locations, merges them
//! into one registry and fires the activation events that apply at startup.
//!
//! Manifest parsing, activation itself and the transport to the editor are
//! provided by the embedder through the traits in [`extensions`],
//! [`activation`] and [`host`].

pub mod activation;
pub mod config;
pub mod error;
pub mod extensions;
pub mod host;
pub mod logging;

pub use config::HostConfig;
pub use error::{HostError, Result};
pub use host::{HostContext, PluginHost};
