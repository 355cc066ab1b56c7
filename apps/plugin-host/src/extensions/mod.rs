//! Extension discovery and registry
//!
//! This module covers everything between the scanners and the finished
//! registry:
//! - Descriptor types and activation event helpers
//! - Concurrent scanning of the builtin, user and development locations
//! - The precedence-based merge into a single registry
//! - Diagnostics produced along the way

pub mod descriptor;
pub mod diagnostics;
pub mod merger;
pub mod registry;
pub mod scanner;

pub use descriptor::ExtensionDescriptor;
pub use diagnostics::{Diagnostic, DiagnosticsCollector, Severity};
pub use merger::{merge_descriptors, MergeOutcome};
pub use registry::ExtensionRegistry;
pub use scanner::{DescriptorScanner, ScanRoots};
