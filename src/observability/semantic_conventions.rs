//! Span attribute conventions for the bridge.
//!
//! Standard attribute names recorded on every task execution so traces can
//! be correlated with protocol tasks and sessions.

/// Standard attribute names
pub mod attr {
    pub const USER_ID: &str = "user.id";
    pub const TASK_ID: &str = "task.id";
    pub const CONVERSATION_ID: &str = "conversation.id";
    pub const APP_NAME: &str = "app.name";
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_attribute_names() {
        assert_eq!(attr::USER_ID, "user.id");
        assert_eq!(attr::TASK_ID, "task.id");
        assert_eq!(attr::CONVERSATION_ID, "conversation.id");
        assert_eq!(attr::APP_NAME, "app.name");
    }
}
