mod nav_panel;
mod workspace;

pub use nav_panel::nav_panel;
pub use workspace::workspace;
