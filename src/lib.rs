#![warn(clippy::all, rust_2018_idioms)]

pub mod app;
pub mod panels;
pub mod state;
pub mod tool;
pub mod tools;
pub mod widgets;

pub use app::ToolbenchApp;
pub use state::{StateAccess, StateEvent, StateObserver, StateProvider, StateSetter, ToolStateStore};
pub use tool::{Tool, ToolCategory, ToolCtx, ToolId};
pub use widgets::{ToastKind, ToastQueue};
