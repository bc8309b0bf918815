mod output_text;
mod toast;

pub use output_text::{OutputResponse, OutputText};
pub use toast::{Toast, ToastKind, ToastQueue};
