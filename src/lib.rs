pub mod a2a;
pub mod bridge;
pub mod errors;
pub mod models;
pub mod observability;
pub mod sessions;
pub mod skills;

// Re-export the bridge surface for easier access
pub use bridge::{
    new_executor_config, BridgeCodec, ExecutionCallbacks, ExecutorConfig, RequestContext, RunMode,
    RunnerConfig,
};

// Re-export key error types for easier access
pub use errors::{BridgeError, BridgeResult};
