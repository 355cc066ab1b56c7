//! Descriptor merger
//!
//! Combines the builtin, user-installed and development descriptor lists
//! into a single registry. Precedence is builtin < user < development: a
//! later source replaces an earlier entry with the same id and records a
//! warning naming both source paths.

use super::descriptor::ExtensionDescriptor;
use super::diagnostics::DiagnosticsCollector;
use super::registry::ExtensionRegistry;

/// Result of a merge: the registry and the diagnostics it produced
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MergeOutcome {
    pub registry: ExtensionRegistry,
    pub diagnostics: DiagnosticsCollector,
}

/// Merge the three descriptor sources into one registry
///
/// Duplicates inside `builtin` are not validated; the later one wins
/// silently. Diagnostics are ordered by source, then by input order.
pub fn merge_descriptors(
    builtin: Vec<ExtensionDescriptor>,
    user_installed: Vec<ExtensionDescriptor>,
    developed: Vec<ExtensionDescriptor>,
) -> MergeOutcome {
    let mut registry = ExtensionRegistry::default();
    let mut diagnostics = DiagnosticsCollector::new();

    for descriptor in builtin {
        registry.insert(descriptor);
    }

    for descriptor in user_installed {
        insert_with_override_warning(&mut registry, &mut diagnostics, descriptor);
    }

    for descriptor in developed {
        diagnostics.info(
            &descriptor.source_path,
            format!(
                "Loading development extension at {}",
                descriptor.source_path.display()
            ),
        );
        insert_with_override_warning(&mut registry, &mut diagnostics, descriptor);
    }

    MergeOutcome {
        registry,
        diagnostics,
    }
}

fn insert_with_override_warning(
    registry: &mut ExtensionRegistry,
    diagnostics: &mut DiagnosticsCollector,
    descriptor: ExtensionDescriptor,
) {
    if let Some(existing) = registry.get(&descriptor.id) {
        diagnostics.warning(
            &descriptor.source_path,
            format!(
                "Overwriting extension {} with {}.",
                existing.source_path.display(),
                descriptor.source_path.display()
            ),
        );
    }
    registry.insert(descriptor);
}
