use crate::names::SharedNameRegistry;
use crate::tools::extract_string_arg;
use crate::traits::{Tool, ToolError, ToolResult};
use async_trait::async_trait;
use serde_json::json;

pub struct InsertNameTool {
    names: SharedNameRegistry,
}

impl InsertNameTool {
    pub fn new(names: SharedNameRegistry) -> Self {
        Self { names }
    }
}

#[async_trait]
impl Tool for InsertNameTool {
    fn name(&self) -> &str {
        "insertName"
    }

    fn description(&self) -> &str {
        "Add a new name to the list. Will not modify existing names."
    }

    fn parameters_schema(&self) -> serde_json::Value {
        json!({
            "type": "object",
            "properties": {
                "name": {
                    "type": "string",
                    "description": "The name of the person to add"
                }
            },
            "required": ["name"]
        })
    }

    async fn execute(&self, args: serde_json::Value) -> Result<ToolResult, ToolError> {
        let name = extract_string_arg(&args, "name")?;

        let mut names = self.names.lock().await;
        if let Err(e) = names.insert(&name) {
            return Ok(ToolResult::error(e.to_string()));
        }

        Ok(ToolResult::success(json!({
            "insertedName": name,
            "totalNames": names.len()
        })))
    }
}
