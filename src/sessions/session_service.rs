use crate::errors::BridgeResult;
use async_trait::async_trait;
use serde_json::Value;
use std::collections::HashMap;

use super::session::Session;

/// Trait for session persistence and management.
/// Provides abstraction over different storage backends (in-memory, database, etc.)
#[async_trait]
pub trait SessionService: Send + Sync {
    /// Retrieve a session by app, user, and session ID
    async fn get_session(
        &self,
        app_name: &str,
        user_id: &str,
        session_id: &str,
    ) -> BridgeResult<Option<Session>>;

    /// Create a new session, seeded with the given state.
    ///
    /// When `session_id` is `None` an ID is generated. Creation must behave
    /// as an upsert: concurrent first-requests for the same brand-new
    /// context may both attempt a create, and neither may fail for that
    /// reason alone.
    async fn create_session(
        &self,
        app_name: String,
        user_id: String,
        initial_state: HashMap<String, Value>,
        session_id: Option<String>,
    ) -> BridgeResult<Session>;
}
