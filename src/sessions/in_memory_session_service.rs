use crate::errors::BridgeResult;
use async_trait::async_trait;
use dashmap::DashMap;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;

use super::session::Session;
use super::session_service::SessionService;

/// In-memory implementation of SessionService.
/// Suitable for development, testing, and single-instance deployments.
/// Sessions are stored as app -> user -> session_id -> Session to prevent
/// cross-tenant access.
pub struct InMemorySessionService {
    sessions: Arc<DashMap<String, Arc<DashMap<String, Arc<DashMap<String, Session>>>>>>,
}

impl InMemorySessionService {
    pub fn new() -> Self {
        Self {
            sessions: Arc::new(DashMap::new()),
        }
    }

    fn save_session(&self, session: Session) {
        let app_users = self
            .sessions
            .entry(session.app_name.clone())
            .or_insert_with(|| Arc::new(DashMap::new()))
            .clone();
        let user_sessions = app_users
            .entry(session.user_id.clone())
            .or_insert_with(|| Arc::new(DashMap::new()))
            .clone();
        user_sessions.insert(session.id.clone(), session);
    }
}

impl Default for InMemorySessionService {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SessionService for InMemorySessionService {
    async fn get_session(
        &self,
        app_name: &str,
        user_id: &str,
        session_id: &str,
    ) -> BridgeResult<Option<Session>> {
        if let Some(app_users) = self.sessions.get(app_name) {
            if let Some(user_sessions) = app_users.get(user_id) {
                if let Some(session) = user_sessions.get(session_id) {
                    return Ok(Some(session.clone()));
                }
            }
        }
        Ok(None)
    }

    async fn create_session(
        &self,
        app_name: String,
        user_id: String,
        initial_state: HashMap<String, Value>,
        session_id: Option<String>,
    ) -> BridgeResult<Session> {
        let mut session = match session_id {
            Some(id) => Session::with_id(id, app_name, user_id),
            None => Session::new(app_name, user_id),
        };
        session.state = initial_state;

        // Upsert: a concurrent create for the same id replaces harmlessly.
        self.save_session(session.clone());
        Ok(session)
    }
}
