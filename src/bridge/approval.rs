//! Human-in-the-loop approval extraction.
//!
//! When a task pauses in `input-required`, the terminal status message still
//! carries the raw function-call data parts that caused the pause. The
//! extractor reconstructs structured approval requests from those parts so
//! the executor can replace the message with one clients can render as an
//! approval prompt.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::a2a::{Message, Part};
use crate::bridge::codec::{mapping_field, non_empty_string};
use crate::bridge::metadata::{
    kagent_metadata_key, metadata_bool, IS_LONG_RUNNING_KEY, TOOL_APPROVAL_REQUEST_TYPE, TYPE_KEY,
};

/// Function name reserved for the end-user-confirmation flow. Confirmation
/// requests are a distinct HITL mechanism and must never surface as tool
/// approvals.
pub const REQUEST_USER_CONFIRMATION_NAME: &str = "request_end_user_confirmation";

/// A pending tool call awaiting human approval. Rebuilt fresh from protocol
/// parts on every input-required terminal event, never persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApprovalRequest {
    /// Tool name, always non-empty.
    pub name: String,
    /// Call arguments as a JSON object, possibly empty.
    pub args: Value,
    /// Call identifier, possibly empty.
    pub id: String,
}

/// Scan message parts for long-running function calls that still lack a
/// response and rebuild approval requests from them. Order-preserving; parts
/// that fail extraction are dropped silently so one malformed part cannot
/// take down terminal-event handling.
pub fn extract_approval_requests(parts: &[Part]) -> Vec<ApprovalRequest> {
    parts.iter().filter_map(approval_request_from_part).collect()
}

fn approval_request_from_part(part: &Part) -> Option<ApprovalRequest> {
    let Part::Data { data, metadata } = part else {
        return None;
    };
    if !metadata_bool(metadata.as_ref(), IS_LONG_RUNNING_KEY) {
        return None;
    }

    let name = non_empty_string(data, "name")?;
    if name == REQUEST_USER_CONFIRMATION_NAME {
        return None;
    }

    Some(ApprovalRequest {
        name,
        args: mapping_field(data, "args"),
        id: data
            .get("id")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string(),
    })
}

/// Builds the protocol message that replaces a raw input-required status
/// message. Pure construction, no failure mode.
pub trait ApprovalMessageBuilder: Send + Sync {
    fn build_tool_approval_message(&self, requests: &[ApprovalRequest]) -> Message;
}

/// Default builder: an agent-role message with one data part per request,
/// typed under the current metadata-key family.
#[derive(Debug, Default)]
pub struct DefaultApprovalMessageBuilder;

impl ApprovalMessageBuilder for DefaultApprovalMessageBuilder {
    fn build_tool_approval_message(&self, requests: &[ApprovalRequest]) -> Message {
        let parts = requests
            .iter()
            .map(|request| {
                let mut data = serde_json::Map::new();
                data.insert("name".to_string(), Value::String(request.name.clone()));
                data.insert("args".to_string(), request.args.clone());
                data.insert("id".to_string(), Value::String(request.id.clone()));

                let metadata = [
                    (
                        kagent_metadata_key(TYPE_KEY),
                        Value::String(TOOL_APPROVAL_REQUEST_TYPE.to_string()),
                    ),
                    (kagent_metadata_key(IS_LONG_RUNNING_KEY), Value::Bool(true)),
                ]
                .into_iter()
                .collect();

                Part::Data {
                    data: Value::Object(data),
                    metadata: Some(metadata),
                }
            })
            .collect();

        Message::agent(parts)
    }
}
