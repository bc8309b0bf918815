use uuid::Uuid;

use crate::tool::{Tool, ToolCategory, ToolCtx, ToolId};
use crate::widgets::OutputText;

const MAX_BATCH: usize = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UuidFormat {
    Hyphenated,
    Simple,
    Urn,
}

impl UuidFormat {
    fn label(self) -> &'static str {
        match self {
            UuidFormat::Hyphenated => "Hyphenated",
            UuidFormat::Simple => "Simple (no hyphens)",
            UuidFormat::Urn => "URN",
        }
    }
}

#[derive(Clone)]
pub struct UuidGeneratorState {
    pub count: usize,
    pub format: UuidFormat,
    pub uppercase: bool,
    pub batch: Vec<Uuid>,
    pub output: String,
}

impl Default for UuidGeneratorState {
    fn default() -> Self {
        Self {
            count: 1,
            format: UuidFormat::Hyphenated,
            uppercase: false,
            batch: Vec::new(),
            output: String::new(),
        }
    }
}

impl UuidGeneratorState {
    pub fn regenerate(&mut self) {
        self.batch = (0..self.count.clamp(1, MAX_BATCH)).map(|_| Uuid::new_v4()).collect();
        self.rerender();
    }

    // Re-renders the existing batch so format toggles do not discard ids.
    pub fn rerender(&mut self) {
        let lines: Vec<String> = self
            .batch
            .iter()
            .map(|id| render_uuid(*id, self.format, self.uppercase))
            .collect();
        self.output = lines.join("\n");
    }
}

pub(crate) fn render_uuid(id: Uuid, format: UuidFormat, uppercase: bool) -> String {
    let rendered = match format {
        UuidFormat::Hyphenated => id.hyphenated().to_string(),
        UuidFormat::Simple => id.simple().to_string(),
        UuidFormat::Urn => id.urn().to_string(),
    };
    if uppercase {
        rendered.to_uppercase()
    } else {
        rendered
    }
}

#[derive(Default)]
pub struct UuidGeneratorTool;

impl Tool for UuidGeneratorTool {
    fn id(&self) -> ToolId {
        ToolId::UuidGenerator
    }

    fn name(&self) -> &'static str {
        "UUID Generator"
    }

    fn description(&self) -> &'static str {
        "Generate random version 4 UUIDs, one or a batch"
    }

    fn category(&self) -> ToolCategory {
        ToolCategory::Generators
    }

    fn keywords(&self) -> &'static [&'static str] {
        &["guid", "identifier", "random", "v4"]
    }

    fn ui(&mut self, ui: &mut egui::Ui, ctx: &mut ToolCtx<'_>) {
        let (mut state, setter) = ctx.state::<UuidGeneratorState>();
        let mut changed = false;

        ui.horizontal(|ui| {
            ui.label("Count");
            changed |= ui
                .add(egui::Slider::new(&mut state.count, 1..=MAX_BATCH))
                .changed();
            ui.separator();
            egui::ComboBox::from_id_salt("uuid_format")
                .selected_text(state.format.label())
                .show_ui(ui, |ui| {
                    for format in [UuidFormat::Hyphenated, UuidFormat::Simple, UuidFormat::Urn] {
                        if ui
                            .selectable_value(&mut state.format, format, format.label())
                            .changed()
                        {
                            state.rerender();
                            changed = true;
                        }
                    }
                });
            if ui.checkbox(&mut state.uppercase, "Uppercase").changed() {
                state.rerender();
                changed = true;
            }
        });

        ui.add_space(4.0);
        if ui.button("🔄 Generate").clicked() {
            state.regenerate();
            changed = true;
        }

        ui.add_space(4.0);
        let rows = state.count.clamp(1, 12);
        if OutputText::new(&state.output).rows(rows).show(ui).copied {
            ctx.success("Copied to clipboard");
        }

        if changed {
            setter.set(state);
        }
    }
}
