//! The A2A execution bridge: part codec, metadata-key compatibility,
//! human-in-the-loop approval extraction, session binding, and the lifecycle
//! hooks and configuration consumed by the protocol executor.

pub mod approval;
pub mod binder;
pub mod callbacks;
pub mod codec;
pub mod config;
pub mod metadata;

pub use approval::{
    extract_approval_requests, ApprovalMessageBuilder, ApprovalRequest,
    DefaultApprovalMessageBuilder, REQUEST_USER_CONFIRMATION_NAME,
};
pub use binder::{derive_user_id, extract_session_name, SessionBinder};
pub use callbacks::{ExecutionCallbacks, RequestContext};
pub use codec::{BridgeCodec, DefaultPartConverter, PartConverter};
pub use config::{new_executor_config, ExecutorConfig, RunMode, RunnerConfig};
