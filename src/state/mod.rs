mod provider;
mod store;

pub use provider::{StateAccess, StateProvider, StateSetter};
pub use store::{StateEvent, StateObserver, ToolStateStore};
