//! Execution lifecycle hooks invoked by the protocol executor around a
//! single task's runtime invocation.
//!
//! `before` runs once prior to any runtime event: span attributes, skills
//! path initialization, session binding. `after` runs exactly once on the
//! terminal event and enriches input-required pauses with a structured
//! tool-approval message. The only failure that aborts a task is session
//! creation inside `before`; everything else degrades and logs.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{debug, warn};

use crate::a2a::{Message, TaskState, TaskStatusUpdateEvent};
use crate::bridge::approval::{extract_approval_requests, ApprovalMessageBuilder};
use crate::bridge::binder::{derive_user_id, SessionBinder};
use crate::errors::{BridgeError, BridgeResult};
use crate::observability::attr;
use crate::sessions::SessionService;
use crate::skills::SkillsPathInitializer;

/// Per-invocation execution context owned by the protocol layer.
///
/// `user_id` is derived from `context_id` at construction and the session id
/// is the context id itself; both derivations are pure, so re-deriving for
/// the same context always yields the same addressing.
#[derive(Debug, Clone)]
pub struct RequestContext {
    pub task_id: String,
    pub context_id: String,
    /// Derived user id (fixed prefix + context id).
    pub user_id: String,
    /// The inbound protocol message, when one accompanied the request.
    pub message: Option<Message>,
    span_attributes: HashMap<String, String>,
}

impl RequestContext {
    pub fn new(
        task_id: impl Into<String>,
        context_id: impl Into<String>,
        message: Option<Message>,
    ) -> Self {
        let context_id = context_id.into();
        Self {
            task_id: task_id.into(),
            user_id: derive_user_id(&context_id),
            context_id,
            message,
            span_attributes: HashMap::new(),
        }
    }

    /// The session id for this context (identity mapping).
    pub fn session_id(&self) -> &str {
        &self.context_id
    }

    /// Merge span attributes onto this context. Infallible by construction;
    /// attributes accumulate across calls with later values winning.
    pub fn set_span_attributes(&mut self, attributes: HashMap<String, String>) {
        debug!(task_id = %self.task_id, count = attributes.len(), "recording span attributes");
        self.span_attributes.extend(attributes);
    }

    /// Attributes recorded so far.
    pub fn span_attributes(&self) -> &HashMap<String, String> {
        &self.span_attributes
    }
}

/// The two hook points bound into the executor configuration.
pub struct ExecutionCallbacks {
    app_name: String,
    binder: SessionBinder,
    skills: Option<Arc<dyn SkillsPathInitializer>>,
    skills_dir: PathBuf,
    approval_builder: Arc<dyn ApprovalMessageBuilder>,
}

impl ExecutionCallbacks {
    pub fn new(
        app_name: impl Into<String>,
        session_service: Option<Arc<dyn SessionService>>,
        skills: Option<Arc<dyn SkillsPathInitializer>>,
        skills_dir: PathBuf,
        approval_builder: Arc<dyn ApprovalMessageBuilder>,
    ) -> Self {
        let app_name = app_name.into();
        Self {
            binder: SessionBinder::new(app_name.clone(), session_service),
            app_name,
            skills,
            skills_dir,
            approval_builder,
        }
    }

    /// Runs before the runtime invocation begins.
    ///
    /// Span attributes are recorded first so traces exist even when a later
    /// step fails. Skills initialization is best-effort. Session binding
    /// runs last and is the hook's single fatal path.
    pub async fn before(&self, ctx: &mut RequestContext) -> BridgeResult<()> {
        let mut attributes = HashMap::from([
            (attr::USER_ID.to_string(), ctx.user_id.clone()),
            (attr::TASK_ID.to_string(), ctx.task_id.clone()),
            (attr::CONVERSATION_ID.to_string(), ctx.context_id.clone()),
        ]);
        if !self.app_name.is_empty() {
            attributes.insert(attr::APP_NAME.to_string(), self.app_name.clone());
        }
        ctx.set_span_attributes(attributes);

        if let Some(skills) = &self.skills {
            if let Err(error) = skills
                .initialize_session_path(ctx.session_id(), &self.skills_dir)
                .await
            {
                warn!(session_id = ctx.session_id(), %error, "skills path initialization failed");
            }
        }

        self.binder.ensure_session(ctx).await
    }

    /// Runs exactly once after the terminal event for a task.
    ///
    /// With no event there is nothing to enrich. Otherwise the terminal
    /// state is logged, and an `input-required` status message carrying
    /// extractable approval requests is replaced with a built tool-approval
    /// message. An input-required pause with no extractable requests (e.g. a
    /// plain end-user confirmation) is left untouched. Never fails.
    pub fn after(
        &self,
        ctx: &RequestContext,
        final_event: Option<&mut TaskStatusUpdateEvent>,
        error: Option<&BridgeError>,
    ) -> BridgeResult<()> {
        let Some(event) = final_event else {
            return Ok(());
        };

        debug!(
            task_id = %ctx.task_id,
            session_id = %ctx.session_id(),
            state = ?event.status.state,
            error = ?error,
            "task execution finished"
        );

        if event.status.state == TaskState::InputRequired {
            if let Some(message) = &event.status.message {
                let requests = extract_approval_requests(&message.parts);
                if !requests.is_empty() {
                    event.status.message =
                        Some(self.approval_builder.build_tool_approval_message(&requests));
                }
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::a2a::{Part, TaskStatus};
    use crate::bridge::approval::DefaultApprovalMessageBuilder;
    use serde_json::json;

    fn callbacks() -> ExecutionCallbacks {
        ExecutionCallbacks::new(
            "test-app",
            None,
            None,
            PathBuf::from("/skills"),
            Arc::new(DefaultApprovalMessageBuilder),
        )
    }

    fn input_required_event(parts: Vec<Part>) -> TaskStatusUpdateEvent {
        let status = TaskStatus::new(TaskState::InputRequired)
            .with_message(Message::agent(parts));
        TaskStatusUpdateEvent::new("task-1", "ctx-1", status)
    }

    #[test]
    fn test_request_context_derivation_is_deterministic() {
        let first = RequestContext::new("task-1", "ctx-1", None);
        let second = RequestContext::new("task-2", "ctx-1", None);
        assert_eq!(first.user_id, second.user_id);
        assert_eq!(first.session_id(), second.session_id());
        assert_eq!(first.user_id, "a2a-user-ctx-1");
        assert_eq!(first.session_id(), "ctx-1");
    }

    #[tokio::test]
    async fn test_before_records_span_attributes() {
        let cb = callbacks();
        let mut ctx = RequestContext::new("task-1", "ctx-1", None);
        cb.before(&mut ctx).await.unwrap();

        let attrs = ctx.span_attributes();
        assert_eq!(attrs.get(attr::USER_ID), Some(&"a2a-user-ctx-1".to_string()));
        assert_eq!(attrs.get(attr::TASK_ID), Some(&"task-1".to_string()));
        assert_eq!(attrs.get(attr::CONVERSATION_ID), Some(&"ctx-1".to_string()));
        assert_eq!(attrs.get(attr::APP_NAME), Some(&"test-app".to_string()));
    }

    #[tokio::test]
    async fn test_before_omits_empty_app_name() {
        let cb = ExecutionCallbacks::new(
            "",
            None,
            None,
            PathBuf::from("/skills"),
            Arc::new(DefaultApprovalMessageBuilder),
        );
        let mut ctx = RequestContext::new("task-1", "ctx-1", None);
        cb.before(&mut ctx).await.unwrap();
        assert!(!ctx.span_attributes().contains_key(attr::APP_NAME));
    }

    #[test]
    fn test_after_with_no_event_is_noop() {
        let cb = callbacks();
        let ctx = RequestContext::new("task-1", "ctx-1", None);
        let error = BridgeError::Internal {
            component: "runtime".to_string(),
            reason: "boom".to_string(),
        };
        assert!(cb.after(&ctx, None, Some(&error)).is_ok());
    }

    #[test]
    fn test_after_replaces_input_required_message() {
        let cb = callbacks();
        let ctx = RequestContext::new("task-1", "ctx-1", None);

        let mut event = input_required_event(vec![Part::Data {
            data: json!({"name": "read_file", "args": {"path": "/x"}, "id": "t1"}),
            metadata: Some(HashMap::from([(
                "kagent_is_long_running".to_string(),
                json!(true),
            )])),
        }]);

        cb.after(&ctx, Some(&mut event), None).unwrap();

        let message = event.status.message.expect("message should remain");
        assert_eq!(message.parts.len(), 1);
        let Part::Data { data, metadata } = &message.parts[0] else {
            panic!("Expected data part");
        };
        assert_eq!(data["name"], "read_file");
        assert_eq!(data["args"]["path"], "/x");
        assert_eq!(data["id"], "t1");
        assert_eq!(
            metadata.as_ref().unwrap()["kagent_type"],
            json!("tool_approval_request")
        );
    }

    #[test]
    fn test_after_leaves_message_without_requests_untouched() {
        let cb = callbacks();
        let ctx = RequestContext::new("task-1", "ctx-1", None);

        let mut event = input_required_event(vec![Part::Text {
            text: "please confirm".to_string(),
            metadata: None,
        }]);
        let original = event.status.message.clone();

        cb.after(&ctx, Some(&mut event), None).unwrap();
        assert_eq!(event.status.message, original);
    }

    #[test]
    fn test_after_ignores_other_terminal_states() {
        let cb = callbacks();
        let ctx = RequestContext::new("task-1", "ctx-1", None);

        let status = TaskStatus::new(TaskState::Completed).with_message(Message::agent(vec![
            Part::Data {
                data: json!({"name": "read_file", "id": "t1"}),
                metadata: Some(HashMap::from([(
                    "kagent_is_long_running".to_string(),
                    json!(true),
                )])),
            },
        ]));
        let mut event = TaskStatusUpdateEvent::new("task-1", "ctx-1", status);
        let original = event.status.message.clone();

        cb.after(&ctx, Some(&mut event), None).unwrap();
        assert_eq!(event.status.message, original);
    }

    #[test]
    fn test_after_tolerates_missing_status_message() {
        let cb = callbacks();
        let ctx = RequestContext::new("task-1", "ctx-1", None);
        let mut event =
            TaskStatusUpdateEvent::new("task-1", "ctx-1", TaskStatus::new(TaskState::InputRequired));
        assert!(cb.after(&ctx, Some(&mut event), None).is_ok());
        assert!(event.status.message.is_none());
    }
}
