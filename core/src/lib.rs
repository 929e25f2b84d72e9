pub mod agent;
pub mod bootstrap;
pub mod config;
pub mod names;
pub mod protocol;
pub mod session;
pub mod tools;
pub mod traits;
pub mod transport;

pub use agent::{Announcer, Dispatch, DispatchError, Dispatcher, DuplicateCallPolicy, ToolRegistry};
pub use config::*;
pub use names::*;
pub use protocol::*;
pub use session::{EndReason, Session, SessionControl, SessionOptions, SessionReport};
pub use tools::*;
pub use traits::*;
pub use transport::*;
