use crate::names::SharedNameRegistry;
use crate::traits::{Tool, ToolError, ToolResult};
use async_trait::async_trait;
use serde_json::json;

pub struct GetNamesTool {
    names: SharedNameRegistry,
}

impl GetNamesTool {
    pub fn new(names: SharedNameRegistry) -> Self {
        Self { names }
    }
}

#[async_trait]
impl Tool for GetNamesTool {
    fn name(&self) -> &str {
        "getNames"
    }

    fn description(&self) -> &str {
        "Get the current list of all names and their confirmation status"
    }

    fn parameters_schema(&self) -> serde_json::Value {
        json!({
            "type": "object",
            "properties": {}
        })
    }

    async fn execute(&self, _args: serde_json::Value) -> Result<ToolResult, ToolError> {
        let names = self.names.lock().await.list();
        let names = serde_json::to_value(names).map_err(anyhow::Error::from)?;
        Ok(ToolResult::success(json!({ "names": names })))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::names::NameRegistry;

    #[tokio::test]
    async fn lists_in_order() {
        let names = NameRegistry::new().shared();
        {
            let mut guard = names.lock().await;
            guard.insert("Ana").unwrap();
            guard.insert("Lee").unwrap();
            guard.confirm("lee").unwrap();
        }
        let tool = GetNamesTool::new(names);

        let result = tool.execute(json!({})).await.unwrap();
        assert!(result.success);
        let listed = result.get("names").unwrap().as_array().unwrap();
        assert_eq!(listed.len(), 2);
        assert_eq!(listed[0]["name"], "ana");
        assert_eq!(listed[0]["confirmed"], false);
        assert_eq!(listed[1]["name"], "lee");
        assert_eq!(listed[1]["displayName"], "Lee");
        assert_eq!(listed[1]["confirmed"], true);
    }

    #[tokio::test]
    async fn empty_registry() {
        let tool = GetNamesTool::new(NameRegistry::new().shared());
        let result = tool.execute(serde_json::Value::Null).await.unwrap();
        assert_eq!(result.get("names"), Some(&json!([])));
    }
}
