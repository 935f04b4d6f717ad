/// Main error type for the bridge
#[derive(Debug, thiserror::Error)]
pub enum BridgeError {
    // === Session Errors ===
    #[error("Session creation failed: {session_id} for {app_name}/{user_id}: {reason}")]
    SessionCreationFailed {
        app_name: String,
        user_id: String,
        session_id: String,
        reason: String,
    },

    // === Part Conversion Errors ===
    #[error("Part conversion failed: {reason}")]
    PartConversion { reason: String },

    // === General System Errors ===
    #[error("Internal error: {component}: {reason}")]
    Internal { component: String, reason: String },
}

/// Convenience type alias
pub type BridgeResult<T> = std::result::Result<T, BridgeError>;

impl From<std::io::Error> for BridgeError {
    fn from(error: std::io::Error) -> Self {
        Self::Internal {
            component: "io".to_string(),
            reason: error.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_to_string_contains_context() {
        let err = BridgeError::SessionCreationFailed {
            app_name: "app1".into(),
            user_id: "user1".into(),
            session_id: "ctx1".into(),
            reason: "backend unavailable".into(),
        };
        let message = err.to_string();
        assert!(message.contains("ctx1"));
        assert!(message.contains("app1/user1"));
        assert!(message.contains("backend unavailable"));
    }

    #[test]
    fn io_error_maps_to_internal() {
        let io_err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err = BridgeError::from(io_err);
        assert!(matches!(err, BridgeError::Internal { ref component, .. } if component == "io"));
    }
}
