//! Executor configuration assembly.
//!
//! Pure wiring: resolves the skills directory, selects the run mode, and
//! binds the lifecycle hooks and part codec into the bundle the generic
//! protocol executor consumes.

use serde_json::Value;
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;

use crate::bridge::approval::DefaultApprovalMessageBuilder;
use crate::bridge::callbacks::ExecutionCallbacks;
use crate::bridge::codec::BridgeCodec;
use crate::sessions::SessionService;
use crate::skills::FsSkillsInitializer;

/// Environment variable selecting the skills directory.
pub const SKILLS_DIR_ENV: &str = "SKILLS_DIR";

/// Fallback skills directory when the environment variable is unset.
pub const DEFAULT_SKILLS_DIR: &str = "/skills";

/// How the executor delivers results to the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RunMode {
    /// Executor default: synchronous/batched delivery.
    #[default]
    Default,
    /// Server-sent-events streaming delivery.
    SseStreaming,
}

/// Settings for the runtime runner driving the agent. Opaque to the bridge;
/// passed through to the executor unchanged.
#[derive(Debug, Clone, Default)]
pub struct RunnerConfig {
    pub agent_name: String,
    pub options: HashMap<String, Value>,
}

/// The configuration bundle consumed by the generic protocol executor:
/// runner settings, run mode, and the bridge's four extension points (the
/// two lifecycle hooks on `callbacks`, the two conversion directions on
/// `codec`).
pub struct ExecutorConfig {
    pub runner: RunnerConfig,
    pub run_mode: RunMode,
    pub skills_dir: PathBuf,
    pub callbacks: Arc<ExecutionCallbacks>,
    pub codec: Arc<BridgeCodec>,
}

/// Resolve the skills directory from the environment with the fixed
/// fallback. Resolved once at assembly time; there is no mutable global.
pub fn resolve_skills_dir() -> PathBuf {
    std::env::var(SKILLS_DIR_ENV)
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from(DEFAULT_SKILLS_DIR))
}

/// Assemble an executor configuration.
///
/// `session_service` may be `None`, in which case the executor falls back to
/// its in-process ephemeral session store and the bridge skips binding.
/// Streaming selects SSE delivery; otherwise the executor default applies.
pub fn new_executor_config(
    runner: RunnerConfig,
    session_service: Option<Arc<dyn SessionService>>,
    streaming: bool,
    app_name: impl Into<String>,
) -> ExecutorConfig {
    let skills_dir = resolve_skills_dir();
    let callbacks = ExecutionCallbacks::new(
        app_name,
        session_service,
        Some(Arc::new(FsSkillsInitializer)),
        skills_dir.clone(),
        Arc::new(DefaultApprovalMessageBuilder),
    );

    ExecutorConfig {
        runner,
        run_mode: if streaming {
            RunMode::SseStreaming
        } else {
            RunMode::default()
        },
        skills_dir,
        callbacks: Arc::new(callbacks),
        codec: Arc::new(BridgeCodec::with_default_converter()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_run_mode_tracks_streaming_flag() {
        let config = new_executor_config(RunnerConfig::default(), None, true, "app1");
        assert_eq!(config.run_mode, RunMode::SseStreaming);

        let config = new_executor_config(RunnerConfig::default(), None, false, "app1");
        assert_eq!(config.run_mode, RunMode::Default);
    }

    #[test]
    fn test_skills_dir_env_override() {
        std::env::set_var(SKILLS_DIR_ENV, "/custom/skills");
        assert_eq!(resolve_skills_dir(), PathBuf::from("/custom/skills"));

        std::env::remove_var(SKILLS_DIR_ENV);
        assert_eq!(resolve_skills_dir(), PathBuf::from(DEFAULT_SKILLS_DIR));
    }

    #[test]
    fn test_runner_config_passthrough() {
        let runner = RunnerConfig {
            agent_name: "k8s-agent".to_string(),
            options: HashMap::new(),
        };
        let config = new_executor_config(runner, None, false, "app1");
        assert_eq!(config.runner.agent_name, "k8s-agent");
    }
}
