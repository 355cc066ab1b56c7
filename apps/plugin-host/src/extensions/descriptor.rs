//! Extension descriptors and activation event helpers

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// The universal event fired for every host start
pub const ACTIVATE_ALL_EVENT: &str = "*";

/// Prefix of file-existence activation rules
pub const WORKSPACE_CONTAINS_PREFIX: &str = "workspaceContains:";

/// A manifest-derived record of an extension's identity and activation rules
///
/// Descriptors are produced by a scanner and never modified afterwards; the
/// merger only decides which one wins for a given id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtensionDescriptor {
    /// Unique identifier (e.g., "glide.rust-analyzer"), compared exactly
    pub id: String,
    /// Human-readable name
    #[serde(default)]
    pub name: String,
    /// Extension version (semver)
    #[serde(default)]
    pub version: String,
    /// Where this descriptor was loaded from
    pub source_path: PathBuf,
    /// Activation events in declaration order
    #[serde(default)]
    pub activation_events: Vec<String>,
    /// Whether this descriptor came from the builtin location
    #[serde(default)]
    pub is_builtin: bool,
    /// Entry point relative to `source_path`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub main: Option<String>,
}

impl ExtensionDescriptor {
    /// Create a descriptor with the given identity and source path
    pub fn new(id: impl Into<String>, source_path: impl Into<PathBuf>) -> Self {
        let id = id.into();
        Self {
            name: id.clone(),
            id,
            version: String::new(),
            source_path: source_path.into(),
            activation_events: Vec::new(),
            is_builtin: false,
            main: None,
        }
    }

    /// Replace the activation events
    pub fn with_activation_events<I, S>(mut self, events: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.activation_events = events.into_iter().map(Into::into).collect();
        self
    }

    /// Mark the descriptor as builtin
    pub fn builtin(mut self) -> Self {
        self.is_builtin = true;
        self
    }

    /// Targets of every `workspaceContains:` rule, in declaration order
    pub fn workspace_contains_targets(&self) -> impl Iterator<Item = &str> {
        self.activation_events
            .iter()
            .filter_map(|event| workspace_contains_target(event))
    }
}

/// Extract `<name>` from a `workspaceContains:<name>` event
///
/// The prefix match is exact and case-sensitive. The remainder is returned
/// verbatim, so `"workspaceContains:"` yields `Some("")`.
pub fn workspace_contains_target(event: &str) -> Option<&str> {
    event.strip_prefix(WORKSPACE_CONTAINS_PREFIX)
}

/// Build the activation event for a workspace-contained path
pub fn workspace_contains_event(target: &str) -> String {
    format!("{}{}", WORKSPACE_CONTAINS_PREFIX, target)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_workspace_contains_target() {
        assert_eq!(
            workspace_contains_target("workspaceContains:Cargo.toml"),
            Some("Cargo.toml")
        );
        assert_eq!(workspace_contains_target("workspaceContains:"), Some(""));
        assert_eq!(workspace_contains_target("onLanguage:rust"), None);
        assert_eq!(workspace_contains_target("WorkspaceContains:a"), None);
        assert_eq!(workspace_contains_target(" workspaceContains:a"), None);
    }

    #[test]
    fn test_descriptor_targets_keep_order() {
        let descriptor = ExtensionDescriptor::new("glide.go", "/ext/go").with_activation_events([
            "workspaceContains:go.mod",
            "onLanguage:go",
            "workspaceContains:go.work",
        ]);

        let targets: Vec<_> = descriptor.workspace_contains_targets().collect();
        assert_eq!(targets, vec!["go.mod", "go.work"]);
    }

    #[test]
    fn test_descriptor_deserializes_from_camel_case() {
        let json = r#"{
            "id": "glide.yaml",
            "sourcePath": "/ext/yaml",
            "activationEvents": ["onLanguage:yaml"],
            "isBuiltin": true
        }"#;

        let descriptor: ExtensionDescriptor = serde_json::from_str(json).unwrap();
        assert_eq!(descriptor.id, "glide.yaml");
        assert!(descriptor.is_builtin);
        assert_eq!(descriptor.activation_events, vec!["onLanguage:yaml"]);
        assert!(descriptor.main.is_none());
    }

    #[test]
    fn test_event_round_trip() {
        let event = workspace_contains_event("package.json");
        assert_eq!(event, "workspaceContains:package.json");
        assert_eq!(workspace_contains_target(&event), Some("package.json"));
    }
}
