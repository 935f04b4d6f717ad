use crate::a2a::{FileContent, MessageRole};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;

/// Content represents a runtime message whose parts can include function
/// calls and responses in addition to protocol-visible text/file/data parts.
/// This is the internal representation the codec translates to and from the
/// A2A wire format.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Content {
    /// Task ID this content belongs to
    pub task_id: String,
    /// Context/Session ID
    pub context_id: String,
    /// Message ID for tracking
    pub message_id: String,
    /// Role of the message sender
    pub role: MessageRole,
    /// Content parts including function calls/responses
    pub parts: Vec<ContentPart>,
    /// Optional metadata
    pub metadata: Option<HashMap<String, Value>>,
}

/// ContentPart extends the A2A part vocabulary with function call/response
/// variants. The set of variants is closed; the codec matches exhaustively.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ContentPart {
    /// Text content
    Text {
        text: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        metadata: Option<HashMap<String, Value>>,
    },
    /// File content
    File {
        file: FileContent,
        #[serde(skip_serializing_if = "Option::is_none")]
        metadata: Option<HashMap<String, Value>>,
    },
    /// Arbitrary data content
    Data {
        data: Value,
        #[serde(skip_serializing_if = "Option::is_none")]
        metadata: Option<HashMap<String, Value>>,
    },
    /// Function/tool call request
    FunctionCall {
        /// Name of the function to call
        name: String,
        /// Arguments to pass to the function (JSON object)
        args: Value,
        /// Unique identifier for this call (for correlation with its response)
        #[serde(skip_serializing_if = "Option::is_none")]
        id: Option<String>,
        #[serde(skip_serializing_if = "Option::is_none")]
        metadata: Option<HashMap<String, Value>>,
    },
    /// Function/tool execution result
    FunctionResponse {
        /// Name of the function that was called
        name: String,
        /// The result data from the function (JSON object)
        response: Value,
        /// Call identifier this response corresponds to
        #[serde(skip_serializing_if = "Option::is_none")]
        id: Option<String>,
        #[serde(skip_serializing_if = "Option::is_none")]
        metadata: Option<HashMap<String, Value>>,
    },
}

impl Content {
    /// Create a new Content instance
    pub fn new(task_id: String, context_id: String, message_id: String, role: MessageRole) -> Self {
        Self {
            task_id,
            context_id,
            message_id,
            role,
            parts: Vec::new(),
            metadata: None,
        }
    }

    /// Add a text part
    pub fn add_text(&mut self, text: impl Into<String>) {
        self.parts.push(ContentPart::Text {
            text: text.into(),
            metadata: None,
        });
    }

    /// Add a function call
    pub fn add_function_call(&mut self, name: impl Into<String>, args: Value, id: Option<String>) {
        self.parts.push(ContentPart::FunctionCall {
            name: name.into(),
            args,
            id,
            metadata: None,
        });
    }

    /// Add a function response
    pub fn add_function_response(
        &mut self,
        name: impl Into<String>,
        response: Value,
        id: Option<String>,
    ) {
        self.parts.push(ContentPart::FunctionResponse {
            name: name.into(),
            response,
            id,
            metadata: None,
        });
    }

    /// Check if this content has function calls
    pub fn has_function_calls(&self) -> bool {
        self.parts
            .iter()
            .any(|part| matches!(part, ContentPart::FunctionCall { .. }))
    }
}

impl ContentPart {
    /// Check if this is a function-related part
    pub fn is_function_part(&self) -> bool {
        matches!(
            self,
            ContentPart::FunctionCall { .. } | ContentPart::FunctionResponse { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_content_creation() {
        let content = Content::new(
            "task1".to_string(),
            "ctx1".to_string(),
            "msg1".to_string(),
            MessageRole::User,
        );

        assert_eq!(content.task_id, "task1");
        assert_eq!(content.context_id, "ctx1");
        assert_eq!(content.message_id, "msg1");
        assert!(content.parts.is_empty());
    }

    #[test]
    fn test_function_call_handling() {
        let mut content = Content::new(
            "task1".to_string(),
            "ctx1".to_string(),
            "msg1".to_string(),
            MessageRole::Agent,
        );

        content.add_text("I'll help you with that");
        content.add_function_call(
            "weather_tool",
            json!({"location": "San Francisco"}),
            Some("tool_456".to_string()),
        );

        assert!(content.has_function_calls());
        assert_eq!(content.parts.len(), 2);

        if let ContentPart::FunctionCall { name, args, id, .. } = &content.parts[1] {
            assert_eq!(name, "weather_tool");
            assert_eq!(args, &json!({"location": "San Francisco"}));
            assert_eq!(id, &Some("tool_456".to_string()));
        } else {
            panic!("Expected FunctionCall");
        }
    }

    #[test]
    fn test_function_response_handling() {
        let mut content = Content::new(
            "task1".to_string(),
            "ctx1".to_string(),
            "msg1".to_string(),
            MessageRole::User,
        );

        content.add_function_response(
            "weather_tool",
            json!({"temperature": "72F"}),
            Some("tool_456".to_string()),
        );

        assert!(!content.has_function_calls());
        if let ContentPart::FunctionResponse { name, response, .. } = &content.parts[0] {
            assert_eq!(name, "weather_tool");
            assert_eq!(response["temperature"], "72F");
        } else {
            panic!("Expected FunctionResponse");
        }
    }

    #[test]
    fn test_is_function_part() {
        let call = ContentPart::FunctionCall {
            name: "test".to_string(),
            args: json!({}),
            id: None,
            metadata: None,
        };
        assert!(call.is_function_part());

        let text = ContentPart::Text {
            text: "hello".to_string(),
            metadata: None,
        };
        assert!(!text.is_function_part());
    }
}
