//! Session binding for protocol contexts.
//!
//! Session addressing is derived deterministically from the protocol's
//! context id, so re-deriving for the same context always lands on the same
//! session. The binder looks the session up lazily and creates it on first
//! sight, seeding a human-readable name taken from the inbound message text.

use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::debug;

use crate::a2a::{Message, Part};
use crate::bridge::callbacks::RequestContext;
use crate::errors::{BridgeError, BridgeResult};
use crate::sessions::SessionService;

/// Fixed prefix for user ids derived from protocol context ids.
pub const USER_ID_PREFIX: &str = "a2a-user-";

/// Session state key holding the seeded display name.
pub const SESSION_NAME_STATE_KEY: &str = "session_name";

/// Maximum length of a seeded session name before truncation.
pub const SESSION_NAME_MAX_LEN: usize = 20;

const SESSION_NAME_ELLIPSIS: &str = "...";

/// Derive the stable user id for a protocol context. Pure and deterministic.
pub fn derive_user_id(context_id: &str) -> String {
    format!("{USER_ID_PREFIX}{context_id}")
}

/// Extract a display name from the first non-empty text part of the inbound
/// message, truncated to [`SESSION_NAME_MAX_LEN`] characters with an
/// ellipsis marker when longer. Empty when the message is absent or has no
/// text.
pub fn extract_session_name(message: Option<&Message>) -> String {
    let Some(message) = message else {
        return String::new();
    };
    for part in &message.parts {
        if let Part::Text { text, .. } = part {
            if !text.is_empty() {
                return truncate_session_name(text);
            }
        }
    }
    String::new()
}

fn truncate_session_name(text: &str) -> String {
    if text.chars().count() <= SESSION_NAME_MAX_LEN {
        return text.to_string();
    }
    let head: String = text.chars().take(SESSION_NAME_MAX_LEN).collect();
    format!("{head}{SESSION_NAME_ELLIPSIS}")
}

/// Ensures a backing session exists before the runtime invocation begins.
pub struct SessionBinder {
    app_name: String,
    session_service: Option<Arc<dyn SessionService>>,
}

impl SessionBinder {
    pub fn new(
        app_name: impl Into<String>,
        session_service: Option<Arc<dyn SessionService>>,
    ) -> Self {
        Self {
            app_name: app_name.into(),
            session_service,
        }
    }

    /// Look up the session for the request's context, creating it when
    /// absent.
    ///
    /// A lookup error is logged and treated as "not found" so a degraded
    /// backend read cannot abort the task. Creation failure is the one hard
    /// error: without a session the invocation cannot proceed consistently.
    pub async fn ensure_session(&self, ctx: &RequestContext) -> BridgeResult<()> {
        let Some(service) = &self.session_service else {
            return Ok(());
        };

        let session_id = ctx.session_id();
        match service
            .get_session(&self.app_name, &ctx.user_id, session_id)
            .await
        {
            Ok(Some(_)) => return Ok(()),
            Ok(None) => {}
            Err(error) => {
                debug!(session_id, %error, "session lookup failed, treating as absent");
            }
        }

        let mut initial_state = HashMap::new();
        let name = extract_session_name(ctx.message.as_ref());
        if !name.is_empty() {
            initial_state.insert(SESSION_NAME_STATE_KEY.to_string(), Value::String(name));
        }

        service
            .create_session(
                self.app_name.clone(),
                ctx.user_id.clone(),
                initial_state,
                Some(session_id.to_string()),
            )
            .await
            .map_err(|error| BridgeError::SessionCreationFailed {
                app_name: self.app_name.clone(),
                user_id: ctx.user_id.clone(),
                session_id: session_id.to_string(),
                reason: error.to_string(),
            })?;

        Ok(())
    }
}
