//! Metadata-key conventions for data parts.
//!
//! Two key families coexist on the wire: the current family (`kagent_`
//! prefix) and the legacy family (`adk_` prefix) written by older sessions.
//! Readers check the current family first, then the legacy one; writers emit
//! only the current family.

use serde_json::Value;
use std::collections::HashMap;

/// Prefix of the current metadata-key family.
pub const KAGENT_METADATA_PREFIX: &str = "kagent_";

/// Prefix of the legacy metadata-key family, retained for read compatibility
/// with sessions recorded before the rename.
pub const ADK_METADATA_PREFIX: &str = "adk_";

/// Logical key declaring a data part's type.
pub const TYPE_KEY: &str = "type";

/// Logical key flagging a function call as long-running.
pub const IS_LONG_RUNNING_KEY: &str = "is_long_running";

/// Type value for function-call data parts.
pub const FUNCTION_CALL_TYPE: &str = "function_call";

/// Type value for function-response data parts.
pub const FUNCTION_RESPONSE_TYPE: &str = "function_response";

/// Type value for the data parts of a built tool-approval message.
pub const TOOL_APPROVAL_REQUEST_TYPE: &str = "tool_approval_request";

/// Metadata mapping attached to a protocol part.
pub type PartMetadata = HashMap<String, Value>;

/// Produce the current-family wire key for a logical key name.
pub fn kagent_metadata_key(key: &str) -> String {
    format!("{KAGENT_METADATA_PREFIX}{key}")
}

/// Produce the legacy-family wire key for a logical key name. Read-only:
/// nothing in this crate writes legacy keys.
pub fn adk_metadata_key(key: &str) -> String {
    format!("{ADK_METADATA_PREFIX}{key}")
}

/// Read a logical key as a string, checking the current family first.
pub fn metadata_string<'a>(metadata: Option<&'a PartMetadata>, key: &str) -> Option<&'a str> {
    let metadata = metadata?;
    metadata
        .get(&kagent_metadata_key(key))
        .and_then(Value::as_str)
        .or_else(|| metadata.get(&adk_metadata_key(key)).and_then(Value::as_str))
}

/// Read a logical key as a boolean flag: true when either family carries an
/// explicit `true`, checked current family first.
pub fn metadata_bool(metadata: Option<&PartMetadata>, key: &str) -> bool {
    let Some(metadata) = metadata else {
        return false;
    };
    metadata
        .get(&kagent_metadata_key(key))
        .and_then(Value::as_bool)
        .unwrap_or(false)
        || metadata
            .get(&adk_metadata_key(key))
            .and_then(Value::as_bool)
            .unwrap_or(false)
}

/// True when the metadata carries the current-family form of the logical key.
pub fn has_kagent_key(metadata: Option<&PartMetadata>, key: &str) -> bool {
    metadata.is_some_and(|m| m.contains_key(&kagent_metadata_key(key)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn meta(entries: &[(&str, Value)]) -> PartMetadata {
        entries
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect()
    }

    #[test]
    fn test_key_naming() {
        assert_eq!(kagent_metadata_key("type"), "kagent_type");
        assert_eq!(kagent_metadata_key("is_long_running"), "kagent_is_long_running");
        assert_eq!(adk_metadata_key("type"), "adk_type");
    }

    #[test]
    fn test_metadata_string_current_family() {
        let m = meta(&[("kagent_type", json!("function_call"))]);
        assert_eq!(metadata_string(Some(&m), TYPE_KEY), Some("function_call"));
    }

    #[test]
    fn test_metadata_string_legacy_family() {
        let m = meta(&[("adk_type", json!("function_response"))]);
        assert_eq!(metadata_string(Some(&m), TYPE_KEY), Some("function_response"));
    }

    #[test]
    fn test_metadata_string_current_family_wins() {
        let m = meta(&[
            ("kagent_type", json!("function_call")),
            ("adk_type", json!("function_response")),
        ]);
        assert_eq!(metadata_string(Some(&m), TYPE_KEY), Some("function_call"));
    }

    #[test]
    fn test_metadata_string_absent() {
        assert_eq!(metadata_string(None, TYPE_KEY), None);
        let m = meta(&[("unrelated", json!("x"))]);
        assert_eq!(metadata_string(Some(&m), TYPE_KEY), None);
    }

    #[test]
    fn test_metadata_bool_either_family() {
        let current = meta(&[("kagent_is_long_running", json!(true))]);
        assert!(metadata_bool(Some(&current), IS_LONG_RUNNING_KEY));

        let legacy = meta(&[("adk_is_long_running", json!(true))]);
        assert!(metadata_bool(Some(&legacy), IS_LONG_RUNNING_KEY));
    }

    #[test]
    fn test_metadata_bool_false_or_missing() {
        let explicit_false = meta(&[("kagent_is_long_running", json!(false))]);
        assert!(!metadata_bool(Some(&explicit_false), IS_LONG_RUNNING_KEY));

        let wrong_type = meta(&[("kagent_is_long_running", json!("true"))]);
        assert!(!metadata_bool(Some(&wrong_type), IS_LONG_RUNNING_KEY));

        assert!(!metadata_bool(None, IS_LONG_RUNNING_KEY));
    }

    #[test]
    fn test_metadata_bool_legacy_true_with_current_false() {
        let m = meta(&[
            ("kagent_is_long_running", json!(false)),
            ("adk_is_long_running", json!(true)),
        ]);
        assert!(metadata_bool(Some(&m), IS_LONG_RUNNING_KEY));
    }

    #[test]
    fn test_has_kagent_key() {
        let current = meta(&[("kagent_type", json!("function_call"))]);
        assert!(has_kagent_key(Some(&current), TYPE_KEY));

        let legacy = meta(&[("adk_type", json!("function_call"))]);
        assert!(!has_kagent_key(Some(&legacy), TYPE_KEY));

        assert!(!has_kagent_key(None, TYPE_KEY));
    }
}
