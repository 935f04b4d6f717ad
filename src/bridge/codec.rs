//! Bidirectional conversion between runtime content parts and A2A protocol
//! parts.
//!
//! The structural work lives behind the [`PartConverter`] seam;
//! [`BridgeCodec`] layers the bridge-specific behavior on top: suppression of
//! empty data parts left behind by streaming cleanup on the way out, and
//! explicit current-family type dispatch on the way in.

use serde_json::Value;
use std::collections::HashSet;
use std::sync::Arc;

use crate::a2a::Part;
use crate::bridge::metadata::{
    has_kagent_key, kagent_metadata_key, metadata_string, FUNCTION_CALL_TYPE,
    FUNCTION_RESPONSE_TYPE, IS_LONG_RUNNING_KEY, TYPE_KEY,
};
use crate::errors::BridgeResult;
use crate::models::{ContentPart, RuntimeEvent};

/// Structural part conversion between the runtime and protocol vocabularies.
///
/// `part_to_a2a` may return `Ok(None)` to emit nothing for a part;
/// `part_from_a2a` may return `Ok(None)` symmetrically. Callers must treat a
/// missing part as "skip", never as an error.
pub trait PartConverter: Send + Sync {
    fn part_to_a2a(
        &self,
        part: &ContentPart,
        long_running_ids: &HashSet<String>,
    ) -> BridgeResult<Option<Part>>;

    fn part_from_a2a(&self, part: &Part) -> BridgeResult<Option<ContentPart>>;
}

/// Default structural converter.
///
/// Function calls and responses travel as data parts whose payload carries
/// `name`/`args` (or `response`)/`id` and whose metadata declares the part
/// type under the current key family. Inbound, both key families are
/// understood so parts recorded by older sessions keep decoding.
#[derive(Debug, Default)]
pub struct DefaultPartConverter;

impl PartConverter for DefaultPartConverter {
    fn part_to_a2a(
        &self,
        part: &ContentPart,
        long_running_ids: &HashSet<String>,
    ) -> BridgeResult<Option<Part>> {
        match part {
            ContentPart::Text { text, metadata } => {
                if text.is_empty() {
                    return Ok(None);
                }
                Ok(Some(Part::Text {
                    text: text.clone(),
                    metadata: metadata.clone(),
                }))
            }
            ContentPart::File { file, metadata } => Ok(Some(Part::File {
                file: file.clone(),
                metadata: metadata.clone(),
            })),
            ContentPart::Data { data, metadata } => Ok(Some(Part::Data {
                data: data.clone(),
                metadata: metadata.clone(),
            })),
            ContentPart::FunctionCall {
                name,
                args,
                id,
                metadata,
            } => {
                let mut data = serde_json::Map::new();
                data.insert("name".to_string(), Value::String(name.clone()));
                data.insert("args".to_string(), args.clone());
                if let Some(id) = id {
                    data.insert("id".to_string(), Value::String(id.clone()));
                }

                let mut meta = metadata.clone().unwrap_or_default();
                meta.insert(
                    kagent_metadata_key(TYPE_KEY),
                    Value::String(FUNCTION_CALL_TYPE.to_string()),
                );
                if id.as_deref().is_some_and(|id| long_running_ids.contains(id)) {
                    meta.insert(kagent_metadata_key(IS_LONG_RUNNING_KEY), Value::Bool(true));
                }

                Ok(Some(Part::Data {
                    data: Value::Object(data),
                    metadata: Some(meta),
                }))
            }
            ContentPart::FunctionResponse {
                name,
                response,
                id,
                metadata,
            } => {
                let mut data = serde_json::Map::new();
                data.insert("name".to_string(), Value::String(name.clone()));
                data.insert("response".to_string(), response.clone());
                if let Some(id) = id {
                    data.insert("id".to_string(), Value::String(id.clone()));
                }

                let mut meta = metadata.clone().unwrap_or_default();
                meta.insert(
                    kagent_metadata_key(TYPE_KEY),
                    Value::String(FUNCTION_RESPONSE_TYPE.to_string()),
                );

                Ok(Some(Part::Data {
                    data: Value::Object(data),
                    metadata: Some(meta),
                }))
            }
        }
    }

    fn part_from_a2a(&self, part: &Part) -> BridgeResult<Option<ContentPart>> {
        match part {
            Part::Text { text, metadata } => Ok(Some(ContentPart::Text {
                text: text.clone(),
                metadata: metadata.clone(),
            })),
            Part::File { file, metadata } => Ok(Some(ContentPart::File {
                file: file.clone(),
                metadata: metadata.clone(),
            })),
            Part::Data { data, metadata } => {
                match metadata_string(metadata.as_ref(), TYPE_KEY) {
                    Some(FUNCTION_CALL_TYPE) => {
                        if let Some(name) = non_empty_string(data, "name") {
                            return Ok(Some(ContentPart::FunctionCall {
                                name,
                                args: mapping_field(data, "args"),
                                id: non_empty_string(data, "id"),
                                metadata: None,
                            }));
                        }
                        // unusable call payload, keep it as plain data
                        Ok(Some(ContentPart::Data {
                            data: data.clone(),
                            metadata: metadata.clone(),
                        }))
                    }
                    Some(FUNCTION_RESPONSE_TYPE) => {
                        if let Some(name) = non_empty_string(data, "name") {
                            return Ok(Some(ContentPart::FunctionResponse {
                                name,
                                response: mapping_field(data, "response"),
                                id: non_empty_string(data, "id"),
                                metadata: None,
                            }));
                        }
                        Ok(Some(ContentPart::Data {
                            data: data.clone(),
                            metadata: metadata.clone(),
                        }))
                    }
                    _ => Ok(Some(ContentPart::Data {
                        data: data.clone(),
                        metadata: metadata.clone(),
                    })),
                }
            }
        }
    }
}

/// The bridge-level codec wrapping a structural converter.
pub struct BridgeCodec {
    base: Arc<dyn PartConverter>,
}

impl BridgeCodec {
    pub fn new(base: Arc<dyn PartConverter>) -> Self {
        Self { base }
    }

    pub fn with_default_converter() -> Self {
        Self::new(Arc::new(DefaultPartConverter))
    }

    /// Runtime -> protocol conversion.
    ///
    /// Delegates to the structural converter, then suppresses data parts
    /// whose payload mapping is empty. Those are artifacts of streaming
    /// cleanup signals from the runtime and carry no information for the
    /// client. Converter errors propagate unchanged.
    pub fn part_to_a2a(
        &self,
        part: &ContentPart,
        long_running_ids: &HashSet<String>,
    ) -> BridgeResult<Option<Part>> {
        let converted = self.base.part_to_a2a(part, long_running_ids)?;
        Ok(match converted {
            Some(Part::Data { ref data, .. }) if is_empty_data(data) => None,
            other => other,
        })
    }

    /// Protocol -> runtime conversion.
    ///
    /// Data parts declaring their type under the current key family are
    /// decoded explicitly; everything else (legacy-family parts, text,
    /// files) goes to the structural converter unchanged.
    pub fn part_from_a2a(&self, part: &Part) -> BridgeResult<Option<ContentPart>> {
        if let Part::Data { metadata, .. } = part {
            if has_kagent_key(metadata.as_ref(), TYPE_KEY) {
                return self.decode_data_part(Some(part), &kagent_metadata_key(TYPE_KEY));
            }
        }
        self.base.part_from_a2a(part)
    }

    /// Decode a data part according to the type declared under `type_key`.
    ///
    /// A `None` part yields `Ok(None)`. Parts whose declared type is not a
    /// function call/response, or whose `name` is empty or absent, fall
    /// through to the structural converter on the raw part. Malformed
    /// `args`/`response` shapes degrade to an empty mapping; this path
    /// processes potentially stale data from older session history, so
    /// partial data beats strict validation.
    pub fn decode_data_part(
        &self,
        part: Option<&Part>,
        type_key: &str,
    ) -> BridgeResult<Option<ContentPart>> {
        let Some(part) = part else {
            return Ok(None);
        };
        let Part::Data { data, metadata } = part else {
            return self.base.part_from_a2a(part);
        };

        let declared = metadata
            .as_ref()
            .and_then(|m| m.get(type_key))
            .and_then(Value::as_str);

        match declared {
            Some(FUNCTION_CALL_TYPE) => match non_empty_string(data, "name") {
                Some(name) => Ok(Some(ContentPart::FunctionCall {
                    name,
                    args: mapping_field(data, "args"),
                    id: non_empty_string(data, "id"),
                    metadata: None,
                })),
                None => self.base.part_from_a2a(part),
            },
            Some(FUNCTION_RESPONSE_TYPE) => match non_empty_string(data, "name") {
                Some(name) => Ok(Some(ContentPart::FunctionResponse {
                    name,
                    response: mapping_field(data, "response"),
                    id: non_empty_string(data, "id"),
                    metadata: None,
                })),
                None => self.base.part_from_a2a(part),
            },
            _ => self.base.part_from_a2a(part),
        }
    }

    /// Convert every part of a runtime event, dropping suppressed parts.
    pub fn event_to_parts(&self, event: &RuntimeEvent) -> BridgeResult<Vec<Part>> {
        let mut parts = Vec::new();
        for part in &event.content().parts {
            if let Some(converted) = self.part_to_a2a(part, event.long_running_tool_ids())? {
                parts.push(converted);
            }
        }
        Ok(parts)
    }
}

fn is_empty_data(data: &Value) -> bool {
    match data {
        Value::Null => true,
        Value::Object(map) => map.is_empty(),
        _ => false,
    }
}

/// Read `data[key]` as a JSON object, tolerating missing or wrongly shaped
/// values as an empty mapping.
pub(crate) fn mapping_field(data: &Value, key: &str) -> Value {
    match data.get(key) {
        Some(Value::Object(map)) => Value::Object(map.clone()),
        _ => Value::Object(serde_json::Map::new()),
    }
}

/// Read `data[key]` as a non-empty string.
pub(crate) fn non_empty_string(data: &Value, key: &str) -> Option<String> {
    data.get(key)
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}
