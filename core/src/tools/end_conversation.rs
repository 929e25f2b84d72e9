use crate::names::SharedNameRegistry;
use crate::session::SessionControl;
use crate::tools::extract_string_arg;
use crate::traits::{Tool, ToolError, ToolResult};
use async_trait::async_trait;
use serde_json::json;
use tracing::info;

pub struct EndConversationTool {
    names: SharedNameRegistry,
    control: SessionControl,
}

impl EndConversationTool {
    pub fn new(names: SharedNameRegistry, control: SessionControl) -> Self {
        Self { names, control }
    }
}

#[async_trait]
impl Tool for EndConversationTool {
    fn name(&self) -> &str {
        "endConversation"
    }

    fn description(&self) -> &str {
        "End the conversation with a final message and close the connection"
    }

    fn parameters_schema(&self) -> serde_json::Value {
        json!({
            "type": "object",
            "properties": {
                "finalMessage": {
                    "type": "string",
                    "description": "A final message to display before ending the conversation"
                }
            },
            "required": ["finalMessage"]
        })
    }

    async fn execute(&self, args: serde_json::Value) -> Result<ToolResult, ToolError> {
        let final_message = extract_string_arg(&args, "finalMessage")?;

        let summary = self.names.lock().await.summarize();
        self.control.request_end(&final_message);

        info!(
            total = summary.total,
            confirmed = summary.confirmed,
            unconfirmed = summary.unconfirmed,
            "Conversation end requested"
        );

        Ok(ToolResult::success(json!({
            "summary": {
                "totalNames": summary.total,
                "confirmedNames": summary.confirmed,
                "unconfirmedNames": summary.unconfirmed,
                "finalMessage": final_message
            }
        })))
    }
}
