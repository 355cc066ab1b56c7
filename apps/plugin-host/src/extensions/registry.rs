//! The merged extension registry

use std::collections::HashMap;

use super::descriptor::ExtensionDescriptor;

/// Mapping from extension id to the descriptor that won the merge
///
/// Only the merger can populate a registry. Once built it is shared
/// read-only for the rest of the process lifetime.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtensionRegistry {
    extensions: HashMap<String, ExtensionDescriptor>,
}

impl ExtensionRegistry {
    /// Insert or replace, returning the replaced descriptor
    pub(crate) fn insert(&mut self, descriptor: ExtensionDescriptor) -> Option<ExtensionDescriptor> {
        self.extensions.insert(descriptor.id.clone(), descriptor)
    }

    pub fn get(&self, id: &str) -> Option<&ExtensionDescriptor> {
        self.extensions.get(id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.extensions.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.extensions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.extensions.is_empty()
    }

    /// All descriptors, in unspecified order
    pub fn descriptors(&self) -> impl Iterator<Item = &ExtensionDescriptor> {
        self.extensions.values()
    }

    /// All ids, sorted
    pub fn ids(&self) -> Vec<&str> {
        let mut ids: Vec<&str> = self.extensions.keys().map(String::as_str).collect();
        ids.sort_unstable();
        ids
    }
}
