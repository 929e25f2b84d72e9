use crate::names::SharedNameRegistry;
use crate::tools::extract_string_arg;
use crate::traits::{Tool, ToolError, ToolResult};
use async_trait::async_trait;
use serde_json::json;

pub struct UpdateNameTool {
    names: SharedNameRegistry,
}

impl UpdateNameTool {
    pub fn new(names: SharedNameRegistry) -> Self {
        Self { names }
    }
}

#[async_trait]
impl Tool for UpdateNameTool {
    fn name(&self) -> &str {
        "updateName"
    }

    fn description(&self) -> &str {
        "Update an existing name in the list"
    }

    fn parameters_schema(&self) -> serde_json::Value {
        json!({
            "type": "object",
            "properties": {
                "currentName": {
                    "type": "string",
                    "description": "The current name of the person in the list"
                },
                "newName": {
                    "type": "string",
                    "description": "The new name to change to"
                }
            },
            "required": ["currentName", "newName"]
        })
    }

    async fn execute(&self, args: serde_json::Value) -> Result<ToolResult, ToolError> {
        let current_name = extract_string_arg(&args, "currentName")?;
        let new_name = extract_string_arg(&args, "newName")?;

        let mut names = self.names.lock().await;
        if let Err(e) = names.update(&current_name, &new_name) {
            return Ok(ToolResult::error(e.to_string()));
        }

        Ok(ToolResult::success(json!({
            "previousName": current_name,
            "newName": new_name,
            "totalNames": names.len()
        })))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::names::NameRegistry;

    #[tokio::test]
    async fn renames_and_keeps_state() {
        let names = NameRegistry::new().shared();
        {
            let mut guard = names.lock().await;
            guard.insert("Jose").unwrap();
            guard.confirm("Jose").unwrap();
        }
        let tool = UpdateNameTool::new(names.clone());

        let result = tool
            .execute(json!({"currentName": "jose", "newName": "José"}))
            .await
            .unwrap();
        assert!(result.success);
        assert_eq!(result.get("previousName"), Some(&json!("jose")));
        assert_eq!(result.get("newName"), Some(&json!("José")));

        let guard = names.lock().await;
        assert!(guard.get("josé").unwrap().is_confirmed());
        assert!(!guard.contains("jose"));
    }

    #[tokio::test]
    async fn collision_is_reported() {
        let names = NameRegistry::new().shared();
        {
            let mut guard = names.lock().await;
            guard.insert("Ana").unwrap();
            guard.insert("Lee").unwrap();
        }
        let tool = UpdateNameTool::new(names);

        let result = tool
            .execute(json!({"currentName": "Ana", "newName": "lee"}))
            .await
            .unwrap();
        assert!(!result.success);
        assert_eq!(
            result.error.as_deref(),
            Some("Name 'lee' already exists in the list")
        );
    }

    #[tokio::test]
    async fn requires_both_fields() {
        let tool = UpdateNameTool::new(NameRegistry::new().shared());
        let err = tool
            .execute(json!({"currentName": "Ana"}))
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "Missing 'newName' parameter");
    }
}
