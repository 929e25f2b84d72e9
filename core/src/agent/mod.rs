pub mod announcer;
pub mod dispatcher;
pub mod instructions;
pub mod log;
pub mod registry;

pub use announcer::Announcer;
pub use dispatcher::{Dispatch, DispatchError, Dispatcher, DuplicateCallPolicy};
pub use instructions::{DEFAULT_INSTRUCTIONS, resolve_instructions};
pub use log::{CallLog, CallRecord};
pub use registry::ToolRegistry;
