use chrono::{DateTime, Utc};
use serde_json::Value;
use std::collections::HashMap;
use uuid::Uuid;

/// Represents a backing session for a protocol conversation.
/// Maps to the A2A contextId for grouping related interactions.
#[derive(Debug, Clone)]
pub struct Session {
    /// Unique session identifier (maps to A2A contextId)
    pub id: String,
    /// Application name for multi-tenancy support
    pub app_name: String,
    /// User identifier
    pub user_id: String,
    /// Session-level state
    pub state: HashMap<String, Value>,
    /// When the session was created
    pub created_at: DateTime<Utc>,
    /// Last activity timestamp
    pub last_activity: DateTime<Utc>,
}

impl Session {
    /// Create a new session with an auto-generated ID
    pub fn new(app_name: String, user_id: String) -> Self {
        Self::with_id(Uuid::new_v4().to_string(), app_name, user_id)
    }

    /// Create a new session with a caller-chosen ID
    pub fn with_id(id: String, app_name: String, user_id: String) -> Self {
        let now = Utc::now();
        Self {
            id,
            app_name,
            user_id,
            state: HashMap::new(),
            created_at: now,
            last_activity: now,
        }
    }

    /// Get a session-level state value
    pub fn get_state(&self, key: &str) -> Option<&Value> {
        self.state.get(key)
    }

    /// Set a session-level state value
    pub fn set_state(&mut self, key: String, value: Value) {
        self.state.insert(key, value);
        self.last_activity = Utc::now();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_session_new() {
        let session = Session::new("test_app".to_string(), "user123".to_string());
        assert!(!session.id.is_empty());
        assert_eq!(session.app_name, "test_app");
        assert_eq!(session.user_id, "user123");
        assert!(session.state.is_empty());
    }

    #[test]
    fn test_session_with_id() {
        let session = Session::with_id(
            "ctx-1".to_string(),
            "test_app".to_string(),
            "user123".to_string(),
        );
        assert_eq!(session.id, "ctx-1");
    }

    #[test]
    fn test_session_state_management() {
        let mut session = Session::new("test_app".to_string(), "user123".to_string());
        session.set_state("session_name".to_string(), json!("List pods"));
        assert_eq!(session.get_state("session_name"), Some(&json!("List pods")));
        assert_eq!(session.get_state("missing"), None);
    }
}
