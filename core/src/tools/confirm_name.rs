use crate::names::SharedNameRegistry;
use crate::tools::extract_string_arg;
use crate::traits::{Tool, ToolError, ToolResult};
use async_trait::async_trait;
use serde_json::json;

pub struct ConfirmNameTool {
    names: SharedNameRegistry,
}

impl ConfirmNameTool {
    pub fn new(names: SharedNameRegistry) -> Self {
        Self { names }
    }
}

#[async_trait]
impl Tool for ConfirmNameTool {
    fn name(&self) -> &str {
        "confirmName"
    }

    fn description(&self) -> &str {
        "Mark a name as confirmed in the list"
    }

    fn parameters_schema(&self) -> serde_json::Value {
        json!({
            "type": "object",
            "properties": {
                "name": {
                    "type": "string",
                    "description": "The name of the person to confirm"
                }
            },
            "required": ["name"]
        })
    }

    async fn execute(&self, args: serde_json::Value) -> Result<ToolResult, ToolError> {
        let name = extract_string_arg(&args, "name")?;

        let mut names = self.names.lock().await;
        if let Err(e) = names.confirm(&name) {
            return Ok(ToolResult::error(e.to_string()));
        }

        Ok(ToolResult::success(json!({
            "confirmedName": name,
            "totalNames": names.len()
        })))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::names::NameRegistry;

    #[tokio::test]
    async fn confirms_twice() {
        let names = NameRegistry::new().shared();
        names.lock().await.insert("Ana").unwrap();
        let tool = ConfirmNameTool::new(names.clone());

        for _ in 0..2 {
            let result = tool.execute(json!({"name": "ana"})).await.unwrap();
            assert!(result.success);
            assert_eq!(result.get("confirmedName"), Some(&json!("ana")));
        }
        assert!(names.lock().await.get("Ana").unwrap().is_confirmed());
    }

    #[tokio::test]
    async fn ghost_is_not_created() {
        let names = NameRegistry::new().shared();
        let tool = ConfirmNameTool::new(names.clone());

        let result = tool.execute(json!({"name": "ghost"})).await.unwrap();
        assert!(!result.success);
        assert!(names.lock().await.is_empty());
    }
}
