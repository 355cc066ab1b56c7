//! Filesystem existence probe

use async_trait::async_trait;
use std::path::Path;

/// Answers whether a path exists
///
/// Files, directories and symlinks all count. Implementations never fail;
/// any access error reads as "does not exist".
#[async_trait]
pub trait FileSystemProbe: Send + Sync {
    async fn exists(&self, path: &Path) -> bool;
}

/// Probe backed by `tokio::fs`
///
/// Uses `symlink_metadata` so a symlink counts even when its target is gone.
#[derive(Debug, Clone, Copy, Default)]
pub struct TokioFileSystemProbe;

#[async_trait]
impl FileSystemProbe for TokioFileSystemProbe {
    async fn exists(&self, path: &Path) -> bool {
        tokio::fs::symlink_metadata(path).await.is_ok()
    }
}
