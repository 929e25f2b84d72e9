pub mod tool;
pub mod transport;

pub use tool::{Tool, ToolError, ToolResult, ToolSpec};
pub use transport::ChannelTransport;
