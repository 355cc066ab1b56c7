//! Extension test runners
//!
//! Test runners are registered up front under a kind (e.g. "rust") and
//! looked up by that kind when the host is asked to run extension tests.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;
use tracing::{error, info};

use crate::error::{HostError, Result};

/// Result of one test run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TestOutcome {
    pub failures: u32,
}

impl TestOutcome {
    /// 1 when anything failed, else 0
    pub fn exit_code(&self) -> i32 {
        if self.failures > 0 {
            1
        } else {
            0
        }
    }
}

/// Runs the tests found under a root
#[async_trait]
pub trait TestRunner: Send + Sync {
    async fn run(&self, root: &Path) -> Result<TestOutcome>;
}

/// Test runners keyed by kind
#[derive(Default, Clone)]
pub struct TestRunnerRegistry {
    runners: HashMap<String, Arc<dyn TestRunner>>,
}

impl TestRunnerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a runner, replacing any previous one of the same kind
    pub fn register(&mut self, kind: impl Into<String>, runner: Arc<dyn TestRunner>) {
        let kind = kind.into();
        info!("Registering test runner: {}", kind);
        self.runners.insert(kind, runner);
    }

    pub fn get(&self, kind: &str) -> Result<Arc<dyn TestRunner>> {
        self.runners
            .get(kind)
            .cloned()
            .ok_or_else(|| HostError::TestRunnerNotFound(kind.to_string()))
    }

    /// Registered kinds, sorted
    pub fn kinds(&self) -> Vec<&str> {
        let mut kinds: Vec<&str> = self.runners.keys().map(String::as_str).collect();
        kinds.sort_unstable();
        kinds
    }

    /// Look up `kind` and run it against `root`
    pub async fn run(&self, kind: &str, root: &Path) -> Result<TestOutcome> {
        let runner = self.get(kind)?;
        info!("Running extension tests in {:?} with '{}'", root, kind);
        let outcome = runner.run(root).await?;
        if outcome.failures > 0 {
            error!("{} extension test(s) failed", outcome.failures);
        }
        Ok(outcome)
    }
}

impl std::fmt::Debug for TestRunnerRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TestRunnerRegistry")
            .field("kinds", &self.kinds())
            .finish()
    }
}
