use egui::{Align2, Color32, RichText};

/// How long a toast stays on screen once first drawn.
const TOAST_SECONDS: f64 = 4.0;

/// Oldest toasts are dropped beyond this backlog.
const MAX_TOASTS: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastKind {
    Success,
    Error,
    Info,
}

impl ToastKind {
    fn accent(self) -> Color32 {
        match self {
            ToastKind::Success => Color32::from_rgb(46, 160, 67),
            ToastKind::Error => Color32::from_rgb(218, 54, 51),
            ToastKind::Info => Color32::from_rgb(31, 111, 235),
        }
    }

    fn icon(self) -> &'static str {
        match self {
            ToastKind::Success => "✔",
            ToastKind::Error => "✖",
            ToastKind::Info => "ℹ",
        }
    }
}

#[derive(Debug, Clone)]
pub struct Toast {
    pub kind: ToastKind,
    pub message: String,
    /// Set the first time the toast is drawn; expiry counts from then.
    shown_at: Option<f64>,
}

impl Toast {
    fn expired(&self, now: f64) -> bool {
        match self.shown_at {
            Some(shown) => now - shown >= TOAST_SECONDS,
            None => false,
        }
    }
}

/// Transient notifications stacked in the top-right corner of the window.
///
/// Tools push through [`ToolCtx`](crate::tool::ToolCtx); the app shell calls
/// [`show`](Self::show) once per frame after the panels.
#[derive(Debug, Default)]
pub struct ToastQueue {
    toasts: Vec<Toast>,
}

impl ToastQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, kind: ToastKind, message: impl Into<String>) {
        if self.toasts.len() >= MAX_TOASTS {
            self.toasts.remove(0);
        }
        self.toasts.push(Toast {
            kind,
            message: message.into(),
            shown_at: None,
        });
    }

    pub fn success(&mut self, message: impl Into<String>) {
        self.push(ToastKind::Success, message);
    }

    pub fn error(&mut self, message: impl Into<String>) {
        self.push(ToastKind::Error, message);
    }

    pub fn info(&mut self, message: impl Into<String>) {
        self.push(ToastKind::Info, message);
    }

    pub fn len(&self) -> usize {
        self.toasts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.toasts.is_empty()
    }

    /// Draws the stack and retires expired toasts.
    pub fn show(&mut self, ctx: &egui::Context) {
        if self.toasts.is_empty() {
            return;
        }

        let now = ctx.input(|i| i.time);
        for toast in &mut self.toasts {
            toast.shown_at.get_or_insert(now);
        }
        self.toasts.retain(|toast| !toast.expired(now));

        let mut dismissed = None;
        egui::Area::new(egui::Id::new("toast_overlay"))
            .anchor(Align2::RIGHT_TOP, egui::vec2(-12.0, 12.0))
            .order(egui::Order::Foreground)
            .show(ctx, |ui| {
                ui.set_max_width(320.0);
                for (index, toast) in self.toasts.iter().enumerate() {
                    let accent = toast.kind.accent();
                    egui::Frame::none()
                        .fill(ui.visuals().extreme_bg_color)
                        .stroke(egui::Stroke::new(1.0, accent))
                        .rounding(4.0)
                        .inner_margin(egui::Margin::symmetric(10.0, 8.0))
                        .show(ui, |ui| {
                            ui.horizontal(|ui| {
                                ui.label(RichText::new(toast.kind.icon()).color(accent));
                                ui.label(&toast.message);
                                ui.with_layout(
                                    egui::Layout::right_to_left(egui::Align::Center),
                                    |ui| {
                                        if ui.small_button("✕").clicked() {
                                            dismissed = Some(index);
                                        }
                                    },
                                );
                            });
                        });
                    ui.add_space(4.0);
                }
            });
        if let Some(index) = dismissed {
            self.toasts.remove(index);
        }

        // Keep repainting while toasts are pending so they fade out on time
        // even without further input.
        if !self.toasts.is_empty() {
            ctx.request_repaint_after(std::time::Duration::from_millis(250));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn backlog_is_capped() {
        let mut queue = ToastQueue::new();
        for n in 0..(MAX_TOASTS + 3) {
            queue.info(format!("toast {n}"));
        }
        assert_eq!(queue.len(), MAX_TOASTS);
        assert_eq!(queue.toasts[0].message, "toast 3");
    }

    #[test]
    fn expiry_counts_from_first_draw() {
        let toast = Toast {
            kind: ToastKind::Info,
            message: String::from("pending"),
            shown_at: None,
        };
        assert!(!toast.expired(1_000.0));

        let shown = Toast {
            shown_at: Some(10.0),
            ..toast
        };
        assert!(!shown.expired(10.0 + TOAST_SECONDS - 0.1));
        assert!(shown.expired(10.0 + TOAST_SECONDS));
    }

    #[test]
    fn show_retires_expired_toasts() {
        let ctx = egui::Context::default();
        let mut queue = ToastQueue::new();
        queue.success("done");

        // First frame stamps the toast, later frames keep it until expiry.
        let _ = ctx.run(egui::RawInput::default(), |ctx| queue.show(ctx));
        assert_eq!(queue.len(), 1);

        let mut input = egui::RawInput::default();
        input.time = Some(TOAST_SECONDS + 1.0);
        let _ = ctx.run(input, |ctx| queue.show(ctx));
        assert!(queue.is_empty());
    }
}
