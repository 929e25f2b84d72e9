use crate::traits::{Tool, ToolSpec};
use anyhow::bail;
use std::sync::Arc;

pub struct ToolRegistry {
    tools: Vec<Arc<dyn Tool>>,
}

impl Default for ToolRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl ToolRegistry {
    pub fn new() -> Self {
        Self { tools: Vec::new() }
    }

    pub fn register(&mut self, tool: Box<dyn Tool>) -> anyhow::Result<()> {
        if self.contains(tool.name()) {
            bail!("Tool '{}' is already registered", tool.name());
        }
        self.tools.push(Arc::from(tool));
        Ok(())
    }

    pub fn register_all(&mut self, tools: Vec<Box<dyn Tool>>) -> anyhow::Result<()> {
        for tool in tools {
            self.register(tool)?;
        }
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<Arc<dyn Tool>> {
        self.tools.iter().find(|t| t.name() == name).cloned()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.tools.iter().any(|t| t.name() == name)
    }

    pub fn len(&self) -> usize {
        self.tools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }

    pub fn get_specs(&self) -> Vec<ToolSpec> {
        self.tools.iter().map(|t| t.spec()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::names::NameRegistry;
    use crate::tools::{GetNamesTool, InsertNameTool};

    #[test]
    fn rejects_duplicate_names() {
        let names = NameRegistry::new().shared();
        let mut registry = ToolRegistry::new();
        registry
            .register(Box::new(InsertNameTool::new(names.clone())))
            .unwrap();

        let err = registry
            .register(Box::new(InsertNameTool::new(names)))
            .unwrap_err();
        assert_eq!(err.to_string(), "Tool 'insertName' is already registered");
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn specs_follow_registration_order() {
        let names = NameRegistry::new().shared();
        let mut registry = ToolRegistry::new();
        registry
            .register(Box::new(GetNamesTool::new(names.clone())))
            .unwrap();
        registry
            .register(Box::new(InsertNameTool::new(names)))
            .unwrap();

        let specs = registry.get_specs();
        assert_eq!(specs[0].name, "getNames");
        assert_eq!(specs[1].name, "insertName");
        assert_eq!(specs[1].parameters["required"], serde_json::json!(["name"]));
        assert!(registry.get("insertName").is_some());
        assert!(registry.get("shell").is_none());
    }
}
