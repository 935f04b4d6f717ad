//! Per-session skills filesystem initialization.
//!
//! Skills are a best-effort enhancement: the `before` hook swallows and logs
//! any failure from this seam, so implementations surface errors honestly
//! and leave the degrade decision to the caller.

use async_trait::async_trait;
use std::path::{Path, PathBuf};

use crate::errors::BridgeResult;

/// Prepares the skills path for a session before the runtime invocation.
#[async_trait]
pub trait SkillsPathInitializer: Send + Sync {
    /// Initialize and return the session's skills path under `skills_dir`.
    async fn initialize_session_path(
        &self,
        session_id: &str,
        skills_dir: &Path,
    ) -> BridgeResult<PathBuf>;
}

/// Filesystem-backed initializer: creates `<skills_dir>/<session_id>`.
#[derive(Debug, Default)]
pub struct FsSkillsInitializer;

#[async_trait]
impl SkillsPathInitializer for FsSkillsInitializer {
    async fn initialize_session_path(
        &self,
        session_id: &str,
        skills_dir: &Path,
    ) -> BridgeResult<PathBuf> {
        let path = skills_dir.join(session_id);
        tokio::fs::create_dir_all(&path).await?;
        Ok(path)
    }
}
