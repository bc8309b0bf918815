use egui::{Button, TextStyle, Ui};

/// Read-only monospace output block with a copy-to-clipboard button.
///
/// Returns whether the user copied, so the calling tool can raise a toast.
pub struct OutputText<'a> {
    text: &'a str,
    label: &'a str,
    rows: usize,
}

pub struct OutputResponse {
    pub copied: bool,
}

impl<'a> OutputText<'a> {
    pub fn new(text: &'a str) -> Self {
        Self {
            text,
            label: "Output",
            rows: 4,
        }
    }

    pub fn label(mut self, label: &'a str) -> Self {
        self.label = label;
        self
    }

    pub fn rows(mut self, rows: usize) -> Self {
        self.rows = rows;
        self
    }

    pub fn show(self, ui: &mut Ui) -> OutputResponse {
        let mut copied = false;

        ui.horizontal(|ui| {
            ui.strong(self.label);
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                let copy = ui
                    .add_enabled(!self.text.is_empty(), Button::new("📋 Copy"))
                    .on_hover_text("Copy to clipboard");
                if copy.clicked() {
                    ui.ctx().copy_text(self.text.to_owned());
                    copied = true;
                }
            });
        });

        // An immutable TextBuffer keeps the block read-only but selectable.
        let mut display: &str = self.text;
        ui.add(
            egui::TextEdit::multiline(&mut display)
                .font(TextStyle::Monospace)
                .desired_rows(self.rows)
                .desired_width(f32::INFINITY),
        );

        OutputResponse { copied }
    }
}
