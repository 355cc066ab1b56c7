//! Extension source scanning
//!
//! Reading manifests is delegated to a `DescriptorScanner`. This module runs
//! the builtin, user and development scans concurrently and makes sure a
//! failing source degrades to an empty list instead of aborting startup.

use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tracing::debug;

use super::descriptor::ExtensionDescriptor;
use super::diagnostics::DiagnosticsCollector;
use crate::error::Result;

/// Produces descriptors for all extensions found under a root
#[async_trait]
pub trait DescriptorScanner: Send + Sync {
    /// Scan `root`; `is_builtin` tells whether it is the bundled location
    async fn scan(&self, root: &Path, is_builtin: bool) -> Result<Vec<ExtensionDescriptor>>;
}

/// The roots to scan; unset optional roots are skipped
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanRoots {
    pub builtin: PathBuf,
    pub user: Option<PathBuf>,
    pub development: Option<PathBuf>,
}

/// Descriptor lists per source, plus diagnostics for failed scans
#[derive(Debug, Default)]
pub struct ScannedSources {
    pub builtin: Vec<ExtensionDescriptor>,
    pub user: Vec<ExtensionDescriptor>,
    pub development: Vec<ExtensionDescriptor>,
    pub diagnostics: DiagnosticsCollector,
}

/// Scan all configured roots concurrently
///
/// All three scans are awaited before returning. Failures are reported as
/// error diagnostics in builtin, user, development order.
pub async fn scan_sources(scanner: &dyn DescriptorScanner, roots: &ScanRoots) -> ScannedSources {
    let (builtin, user, development) = tokio::join!(
        scan_root(scanner, Some(roots.builtin.as_path()), true),
        scan_root(scanner, roots.user.as_deref(), false),
        scan_root(scanner, roots.development.as_deref(), false),
    );

    let mut diagnostics = DiagnosticsCollector::new();
    let mut settle = |root: Option<&Path>, result: Result<Vec<ExtensionDescriptor>>| match result {
        Ok(descriptors) => descriptors,
        Err(e) => {
            let root = root.unwrap_or_else(|| Path::new(""));
            diagnostics.error(root, e.to_string());
            Vec::new()
        }
    };

    let builtin = settle(Some(roots.builtin.as_path()), builtin);
    let user = settle(roots.user.as_deref(), user);
    let development = settle(roots.development.as_deref(), development);

    ScannedSources {
        builtin,
        user,
        development,
        diagnostics,
    }
}

async fn scan_root(
    scanner: &dyn DescriptorScanner,
    root: Option<&Path>,
    is_builtin: bool,
) -> Result<Vec<ExtensionDescriptor>> {
    match root {
        Some(root) => {
            debug!("Scanning extensions in {:?} (builtin: {})", root, is_builtin);
            scanner.scan(root, is_builtin).await
        }
        None => Ok(Vec::new()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::HostError;
    use crate::extensions::diagnostics::Severity;
    use std::collections::HashMap;
    use std::sync::Mutex;

    /// Scanner backed by a fixed table; unknown roots fail
    struct TableScanner {
        table: HashMap<PathBuf, Vec<ExtensionDescriptor>>,
        calls: Mutex<Vec<(PathBuf, bool)>>,
    }

    impl TableScanner {
        fn new(entries: Vec<(&str, Vec<ExtensionDescriptor>)>) -> Self {
            Self {
                table: entries
                    .into_iter()
                    .map(|(root, descriptors)| (PathBuf::from(root), descriptors))
                    .collect(),
                calls: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl DescriptorScanner for TableScanner {
        async fn scan(&self, root: &Path, is_builtin: bool) -> Result<Vec<ExtensionDescriptor>> {
            self.calls.lock().unwrap().push((root.to_path_buf(), is_builtin));
            self.table
                .get(root)
                .cloned()
                .ok_or_else(|| HostError::scan(root, "no such directory"))
        }
    }

    #[tokio::test]
    async fn test_scans_each_configured_root() {
        let scanner = TableScanner::new(vec![
            ("/builtin", vec![ExtensionDescriptor::new("a", "/builtin/a")]),
            ("/user", vec![ExtensionDescriptor::new("b", "/user/b")]),
            ("/dev", vec![ExtensionDescriptor::new("c", "/dev/c")]),
        ]);
        let roots = ScanRoots {
            builtin: "/builtin".into(),
            user: Some("/user".into()),
            development: Some("/dev".into()),
        };

        let scanned = scan_sources(&scanner, &roots).await;
        assert_eq!(scanned.builtin[0].id, "a");
        assert_eq!(scanned.user[0].id, "b");
        assert_eq!(scanned.development[0].id, "c");
        assert!(scanned.diagnostics.is_empty());

        let mut calls = scanner.calls.lock().unwrap().clone();
        calls.sort();
        assert_eq!(
            calls,
            vec![
                (PathBuf::from("/builtin"), true),
                (PathBuf::from("/dev"), false),
                (PathBuf::from("/user"), false),
            ]
        );
    }

    #[tokio::test]
    async fn test_unconfigured_roots_are_not_scanned() {
        let scanner = TableScanner::new(vec![("/builtin", vec![])]);
        let roots = ScanRoots {
            builtin: "/builtin".into(),
            user: None,
            development: None,
        };

        let scanned = scan_sources(&scanner, &roots).await;
        assert!(scanned.user.is_empty());
        assert!(scanned.development.is_empty());
        assert_eq!(scanner.calls.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_failed_scan_becomes_empty_list_and_error() {
        let scanner = TableScanner::new(vec![(
            "/builtin",
            vec![ExtensionDescriptor::new("a", "/builtin/a")],
        )]);
        let roots = ScanRoots {
            builtin: "/builtin".into(),
            user: Some("/missing-user".into()),
            development: Some("/missing-dev".into()),
        };

        let scanned = scan_sources(&scanner, &roots).await;
        assert_eq!(scanned.builtin.len(), 1);
        assert!(scanned.user.is_empty());
        assert!(scanned.development.is_empty());

        let errors: Vec<_> = scanned.diagnostics.with_severity(Severity::Error).collect();
        assert_eq!(errors.len(), 2);
        assert_eq!(errors[0].source, PathBuf::from("/missing-user"));
        assert_eq!(errors[1].source, PathBuf::from("/missing-dev"));
    }
}
