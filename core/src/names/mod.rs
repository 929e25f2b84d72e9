pub mod entry;
pub mod registry;

pub use entry::{NameEntry, NameSnapshot, RegistrySummary, normalize};
pub use registry::{NameRegistry, RegistryError, SharedNameRegistry};
