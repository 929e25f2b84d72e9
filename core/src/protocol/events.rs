use crate::traits::ToolSpec;
use serde::{Deserialize, Serialize};
use serde_json::Value;

pub const FUNCTION_CALL_ARGUMENTS_DONE: &str = "response.function_call_arguments.done";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum ClientEvent {
    #[serde(rename = "session.update")]
    SessionUpdate { session: SessionConfig },
    #[serde(rename = "conversation.item.create")]
    ConversationItemCreate { item: ConversationItem },
    #[serde(rename = "response.create")]
    ResponseCreate,
}

impl ClientEvent {
    pub fn function_call_output(call_id: impl Into<String>, output: impl Into<String>) -> Self {
        Self::ConversationItemCreate {
            item: ConversationItem::FunctionCallOutput {
                call_id: call_id.into(),
                output: output.into(),
            },
        }
    }

    pub fn to_json(&self) -> anyhow::Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum ConversationItem {
    #[serde(rename = "function_call_output")]
    FunctionCallOutput { call_id: String, output: String },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionConfig {
    pub modalities: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub instructions: Option<String>,
    pub tools: Vec<FunctionTool>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FunctionTool {
    pub r#type: String,
    pub name: String,
    pub description: String,
    pub parameters: Value,
}

impl From<ToolSpec> for FunctionTool {
    fn from(spec: ToolSpec) -> Self {
        Self {
            r#type: "function".to_string(),
            name: spec.name,
            description: spec.description,
            parameters: spec.parameters,
        }
    }
}

/// Completed function-call event. A field that is absent or of the wrong
/// type reads as `None` so the call can still be answered when its
/// `call_id` survives.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FunctionCallArgumentsDone {
    pub call_id: Option<String>,
    pub name: Option<String>,
    pub arguments: Option<Value>,
}

impl FunctionCallArgumentsDone {
    pub fn from_value(value: &Value) -> Self {
        let text = |field: &str| value.get(field).and_then(Value::as_str).map(str::to_string);
        Self {
            call_id: text("call_id"),
            name: text("name"),
            arguments: value.get("arguments").filter(|a| !a.is_null()).cloned(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum InboundMessage {
    FunctionCall(FunctionCallArgumentsDone),
    Other(String),
}

pub fn parse_inbound(raw: &str) -> anyhow::Result<InboundMessage> {
    let value: Value = serde_json::from_str(raw)?;

    let event_type = value
        .get("type")
        .and_then(|t| t.as_str())
        .ok_or_else(|| anyhow::anyhow!("Event has no 'type' field"))?
        .to_string();

    if event_type != FUNCTION_CALL_ARGUMENTS_DONE {
        return Ok(InboundMessage::Other(event_type));
    }

    Ok(InboundMessage::FunctionCall(
        FunctionCallArgumentsDone::from_value(&value),
    ))
}
