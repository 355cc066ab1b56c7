//! Activation trigger resolution
//!
//! Works out which activation events apply to a workspace. The universal
//! event always applies; a `workspaceContains:<name>` rule applies when
//! `<name>` exists under the workspace root.
//!
//! `<name>` is an exact relative path. Glob patterns are not expanded and
//! leading separators are dropped. A `<name>` that would still leave the
//! root (`..`, a drive prefix) is never probed and never matches. An empty
//! `<name>` probes the root itself.

use futures::future::join_all;
use std::collections::BTreeSet;
use std::path::{Component, Path, PathBuf};
use tracing::debug;

use super::probe::FileSystemProbe;
use crate::extensions::descriptor::{workspace_contains_event, ACTIVATE_ALL_EVENT};
use crate::extensions::registry::ExtensionRegistry;

/// The set of activation events to dispatch at startup
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ActivationPlan {
    workspace_events: BTreeSet<String>,
}

impl ActivationPlan {
    pub fn universal_event(&self) -> &'static str {
        ACTIVATE_ALL_EVENT
    }

    /// The `workspaceContains:` events whose target was found
    pub fn workspace_events(&self) -> &BTreeSet<String> {
        &self.workspace_events
    }

    /// Every event in the plan, universal first
    pub fn events(&self) -> impl Iterator<Item = &str> {
        std::iter::once(ACTIVATE_ALL_EVENT).chain(self.workspace_events.iter().map(String::as_str))
    }

    pub fn contains(&self, event: &str) -> bool {
        event == ACTIVATE_ALL_EVENT || self.workspace_events.contains(event)
    }

    pub fn len(&self) -> usize {
        1 + self.workspace_events.len()
    }

    /// A plan always holds the universal event
    pub fn is_empty(&self) -> bool {
        false
    }
}

/// Distinct `workspaceContains:` targets declared across the registry
pub fn collect_workspace_targets(registry: &ExtensionRegistry) -> BTreeSet<String> {
    registry
        .descriptors()
        .flat_map(|descriptor| descriptor.workspace_contains_targets())
        .map(str::to_string)
        .collect()
}

/// Resolve `target` against the workspace root
///
/// Returns `None` when the target would point outside the root.
pub fn probe_path(workspace_root: &Path, target: &str) -> Option<PathBuf> {
    let relative = Path::new(target.trim_start_matches(['/', '\\']));
    let escapes = relative.components().any(|component| {
        matches!(
            component,
            Component::ParentDir | Component::Prefix(_) | Component::RootDir
        )
    });
    if escapes {
        return None;
    }
    Some(workspace_root.join(relative))
}

/// Compute the activation plan for a registry and optional workspace
///
/// Without a workspace no probes are issued. Otherwise every distinct
/// target is probed once, all probes run concurrently, and the plan is
/// built after all of them finish.
pub async fn resolve_activation_plan(
    registry: &ExtensionRegistry,
    workspace_root: Option<&Path>,
    probe: &dyn FileSystemProbe,
) -> ActivationPlan {
    let Some(root) = workspace_root else {
        debug!("No workspace open, skipping workspaceContains triggers");
        return ActivationPlan::default();
    };

    let targets = collect_workspace_targets(registry);
    debug!(
        "Probing {} workspaceContains targets under {:?}",
        targets.len(),
        root
    );

    let probes = targets.into_iter().map(|target| async move {
        let found = match probe_path(root, &target) {
            Some(path) => probe.exists(&path).await,
            None => {
                debug!("Ignoring workspaceContains target outside the workspace: {}", target);
                false
            }
        };
        (target, found)
    });

    let workspace_events = join_all(probes)
        .await
        .into_iter()
        .filter(|(_, found)| *found)
        .map(|(target, _)| workspace_contains_event(&target))
        .collect();

    ActivationPlan { workspace_events }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::activation::probe::TokioFileSystemProbe;
    use crate::extensions::descriptor::ExtensionDescriptor;
    use crate::extensions::merger::merge_descriptors;
    use async_trait::async_trait;
    use std::collections::HashSet;
    use std::sync::Mutex;

    /// Probe that answers from a fixed set and records every call
    #[derive(Default)]
    struct RecordingProbe {
        present: HashSet<PathBuf>,
        calls: Mutex<Vec<PathBuf>>,
    }

    #[async_trait]
    impl FileSystemProbe for RecordingProbe {
        async fn exists(&self, path: &Path) -> bool {
            self.calls.lock().unwrap().push(path.to_path_buf());
            self.present.contains(path)
        }
    }

    fn registry(descriptors: Vec<ExtensionDescriptor>) -> ExtensionRegistry {
        merge_descriptors(descriptors, vec![], vec![]).registry
    }

    #[test]
    fn test_collect_deduplicates_targets() {
        let registry = registry(vec![
            ExtensionDescriptor::new("one", "/ext/one")
                .with_activation_events(["workspaceContains:a.json", "onLanguage:go"]),
            ExtensionDescriptor::new("two", "/ext/two")
                .with_activation_events(["workspaceContains:a.json"]),
            ExtensionDescriptor::new("three", "/ext/three"),
        ]);

        let targets: Vec<_> = collect_workspace_targets(&registry).into_iter().collect();
        assert_eq!(targets, vec!["a.json".to_string()]);
    }

    #[tokio::test]
    async fn test_each_target_probed_once() {
        let registry = registry(vec![
            ExtensionDescriptor::new("one", "/ext/one")
                .with_activation_events(["workspaceContains:a.json", "onLanguage:go"]),
            ExtensionDescriptor::new("two", "/ext/two")
                .with_activation_events(["workspaceContains:a.json"]),
        ]);
        let probe = RecordingProbe::default();

        resolve_activation_plan(&registry, Some(Path::new("/ws")), &probe).await;
        assert_eq!(*probe.calls.lock().unwrap(), vec![PathBuf::from("/ws/a.json")]);
    }

    #[tokio::test]
    async fn test_no_workspace_means_no_probes() {
        let registry = registry(vec![ExtensionDescriptor::new("one", "/ext/one")
            .with_activation_events(["workspaceContains:a.json"])]);
        let probe = RecordingProbe::default();

        let plan = resolve_activation_plan(&registry, None, &probe).await;
        assert!(probe.calls.lock().unwrap().is_empty());
        assert_eq!(plan.events().collect::<Vec<_>>(), vec!["*"]);
        assert_eq!(plan.len(), 1);
    }

    #[tokio::test]
    async fn test_only_existing_targets_are_planned() {
        let workspace = tempfile::tempdir().unwrap();
        std::fs::write(workspace.path().join("pkg.json"), "{}").unwrap();

        let registry = registry(vec![
            ExtensionDescriptor::new("node", "/ext/node")
                .with_activation_events(["workspaceContains:pkg.json"]),
            ExtensionDescriptor::new("rust", "/ext/rust")
                .with_activation_events(["workspaceContains:Cargo.toml"]),
        ]);

        let plan =
            resolve_activation_plan(&registry, Some(workspace.path()), &TokioFileSystemProbe).await;
        assert!(plan.contains("*"));
        assert!(plan.contains("workspaceContains:pkg.json"));
        assert!(!plan.contains("workspaceContains:Cargo.toml"));
        assert_eq!(plan.len(), 2);
    }

    #[tokio::test]
    async fn test_nested_and_directory_targets() {
        let workspace = tempfile::tempdir().unwrap();
        std::fs::create_dir_all(workspace.path().join(".github/workflows")).unwrap();

        let registry = registry(vec![ExtensionDescriptor::new("ci", "/ext/ci")
            .with_activation_events([
                "workspaceContains:.github/workflows",
                "workspaceContains:/.github",
            ])]);

        let plan =
            resolve_activation_plan(&registry, Some(workspace.path()), &TokioFileSystemProbe).await;
        assert!(plan.contains("workspaceContains:.github/workflows"));
        assert!(plan.contains("workspaceContains:/.github"));
    }

    #[tokio::test]
    async fn test_glob_patterns_are_literal() {
        let workspace = tempfile::tempdir().unwrap();
        std::fs::write(workspace.path().join("main.go"), "package main").unwrap();

        let registry = registry(vec![ExtensionDescriptor::new("go", "/ext/go")
            .with_activation_events(["workspaceContains:*.go"])]);

        let plan =
            resolve_activation_plan(&registry, Some(workspace.path()), &TokioFileSystemProbe).await;
        assert!(plan.workspace_events().is_empty());
    }

    #[tokio::test]
    async fn test_empty_target_matches_workspace_root() {
        let workspace = tempfile::tempdir().unwrap();
        let registry = registry(vec![ExtensionDescriptor::new("odd", "/ext/odd")
            .with_activation_events(["workspaceContains:"])]);

        let plan =
            resolve_activation_plan(&registry, Some(workspace.path()), &TokioFileSystemProbe).await;
        assert!(plan.contains("workspaceContains:"));
    }

    #[test]
    fn test_probe_path_stays_under_root() {
        assert_eq!(
            probe_path(Path::new("/ws"), "/etc/passwd"),
            Some(PathBuf::from("/ws/etc/passwd"))
        );
        assert_eq!(probe_path(Path::new("/ws"), "a/b"), Some(PathBuf::from("/ws/a/b")));
        assert_eq!(probe_path(Path::new("/ws"), "../secret"), None);
        assert_eq!(probe_path(Path::new("/ws"), "a/../../secret"), None);
        assert_eq!(probe_path(Path::new("/ws"), "//../secret"), None);
    }

    #[tokio::test]
    async fn test_parent_dir_target_is_never_probed() {
        let outer = tempfile::tempdir().unwrap();
        let workspace = outer.path().join("ws");
        std::fs::create_dir(&workspace).unwrap();
        std::fs::write(outer.path().join("secret"), "").unwrap();

        let registry = registry(vec![ExtensionDescriptor::new("nosy", "/ext/nosy")
            .with_activation_events(["workspaceContains:../secret"])]);

        let plan = resolve_activation_plan(&registry, Some(&workspace), &TokioFileSystemProbe).await;
        assert!(!plan.contains("workspaceContains:../secret"));
        assert!(plan.workspace_events().is_empty());

        let probe = RecordingProbe::default();
        resolve_activation_plan(&registry, Some(&workspace), &probe).await;
        assert!(probe.calls.lock().unwrap().is_empty());
    }
}
