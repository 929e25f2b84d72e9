use crate::names::SharedNameRegistry;
use crate::session::SessionControl;
use crate::traits::{Tool, ToolError};
use serde_json::Value;

pub mod confirm_name;
pub mod delete_name;
pub mod end_conversation;
pub mod get_names;
pub mod insert_name;
pub mod update_name;

pub use confirm_name::ConfirmNameTool;
pub use delete_name::DeleteNameTool;
pub use end_conversation::EndConversationTool;
pub use get_names::GetNamesTool;
pub use insert_name::InsertNameTool;
pub use update_name::UpdateNameTool;

pub fn extract_string_arg(args: &Value, key: &str) -> Result<String, ToolError> {
    args.get(key)
        .and_then(|v| v.as_str())
        .ok_or_else(|| ToolError::InvalidArguments(format!("Missing '{}' parameter", key)))
        .map(|s| s.to_string())
}

pub fn name_tools(names: &SharedNameRegistry, control: &SessionControl) -> Vec<Box<dyn Tool>> {
    vec![
        Box::new(InsertNameTool::new(names.clone())),
        Box::new(DeleteNameTool::new(names.clone())),
        Box::new(UpdateNameTool::new(names.clone())),
        Box::new(ConfirmNameTool::new(names.clone())),
        Box::new(GetNamesTool::new(names.clone())),
        Box::new(EndConversationTool::new(names.clone(), control.clone())),
    ]
}
