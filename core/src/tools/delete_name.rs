use crate::names::SharedNameRegistry;
use crate::tools::extract_string_arg;
use crate::traits::{Tool, ToolError, ToolResult};
use async_trait::async_trait;
use serde_json::json;

pub struct DeleteNameTool {
    names: SharedNameRegistry,
}

impl DeleteNameTool {
    pub fn new(names: SharedNameRegistry) -> Self {
        Self { names }
    }
}

#[async_trait]
impl Tool for DeleteNameTool {
    fn name(&self) -> &str {
        "deleteName"
    }

    fn description(&self) -> &str {
        "Delete a name from the list"
    }

    fn parameters_schema(&self) -> serde_json::Value {
        json!({
            "type": "object",
            "properties": {
                "name": {
                    "type": "string",
                    "description": "The name of the person to delete from the list"
                }
            },
            "required": ["name"]
        })
    }

    async fn execute(&self, args: serde_json::Value) -> Result<ToolResult, ToolError> {
        let name = extract_string_arg(&args, "name")?;

        let mut names = self.names.lock().await;
        if let Err(e) = names.delete(&name) {
            return Ok(ToolResult::error(e.to_string()));
        }

        Ok(ToolResult::success(json!({
            "deletedName": name,
            "totalNames": names.len()
        })))
    }
}
