pub mod events;

pub use events::{
    ClientEvent, ConversationItem, FUNCTION_CALL_ARGUMENTS_DONE, FunctionCallArgumentsDone,
    FunctionTool, InboundMessage, SessionConfig, parse_inbound,
};
