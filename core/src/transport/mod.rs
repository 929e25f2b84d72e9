pub mod lines;
pub mod memory;

pub use lines::{LineTransport, StdioTransport, stdio};
pub use memory::{MemoryPeer, MemoryTransport, memory_channel};
