use egui::TextStyle;

use crate::tool::{Tool, ToolCategory, ToolCtx, ToolId};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CaseStyle {
    Upper,
    Lower,
    Title,
    Camel,
    Pascal,
    Snake,
    Kebab,
    Constant,
}

impl CaseStyle {
    pub const ALL: [CaseStyle; 8] = [
        CaseStyle::Upper,
        CaseStyle::Lower,
        CaseStyle::Title,
        CaseStyle::Camel,
        CaseStyle::Pascal,
        CaseStyle::Snake,
        CaseStyle::Kebab,
        CaseStyle::Constant,
    ];

    fn label(self) -> &'static str {
        match self {
            CaseStyle::Upper => "UPPERCASE",
            CaseStyle::Lower => "lowercase",
            CaseStyle::Title => "Title Case",
            CaseStyle::Camel => "camelCase",
            CaseStyle::Pascal => "PascalCase",
            CaseStyle::Snake => "snake_case",
            CaseStyle::Kebab => "kebab-case",
            CaseStyle::Constant => "CONSTANT_CASE",
        }
    }
}

/// Splits an identifier or phrase into words.
///
/// Boundaries are whitespace, `_`, `-`, `.` and `/`, plus camel humps: a
/// lower-to-upper transition ("fooBar"), a digit-to-upper transition ("v2Beta")
/// and the last capital of an acronym run ("HTTPServer" -> HTTP, Server).
pub(crate) fn split_words(input: &str) -> Vec<String> {
    let chars: Vec<char> = input.chars().collect();
    let mut words = Vec::new();
    let mut current = String::new();
    for (i, &ch) in chars.iter().enumerate() {
        if ch.is_whitespace() || matches!(ch, '_' | '-' | '.' | '/') {
            if !current.is_empty() {
                words.push(std::mem::take(&mut current));
            }
            continue;
        }
        if ch.is_uppercase() && !current.is_empty() {
            let prev = chars[i - 1];
            let next_is_lower = chars.get(i + 1).is_some_and(|c| c.is_lowercase());
            if prev.is_lowercase() || prev.is_numeric() || (prev.is_uppercase() && next_is_lower) {
                words.push(std::mem::take(&mut current));
            }
        }
        current.push(ch);
    }
    if !current.is_empty() {
        words.push(current);
    }
    words
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => String::new(),
    }
}

pub(crate) fn convert(input: &str, style: CaseStyle) -> String {
    let words = split_words(input);
    match style {
        // Whole-input styles keep the original separators.
        CaseStyle::Upper => input.to_uppercase(),
        CaseStyle::Lower => input.to_lowercase(),
        CaseStyle::Title => words
            .iter()
            .map(|w| capitalize(w))
            .collect::<Vec<_>>()
            .join(" "),
        CaseStyle::Camel => {
            let mut out = String::new();
            for (i, word) in words.iter().enumerate() {
                if i == 0 {
                    out.push_str(&word.to_lowercase());
                } else {
                    out.push_str(&capitalize(word));
                }
            }
            out
        }
        CaseStyle::Pascal => words.iter().map(|w| capitalize(w)).collect(),
        CaseStyle::Snake => words
            .iter()
            .map(|w| w.to_lowercase())
            .collect::<Vec<_>>()
            .join("_"),
        CaseStyle::Kebab => words
            .iter()
            .map(|w| w.to_lowercase())
            .collect::<Vec<_>>()
            .join("-"),
        CaseStyle::Constant => words
            .iter()
            .map(|w| w.to_uppercase())
            .collect::<Vec<_>>()
            .join("_"),
    }
}

#[derive(Clone, Default)]
pub struct CaseConverterState {
    pub input: String,
    pub outputs: Vec<String>,
}

impl CaseConverterState {
    pub fn recompute(&mut self) {
        if self.input.trim().is_empty() {
            self.outputs.clear();
            return;
        }
        self.outputs = CaseStyle::ALL
            .iter()
            .map(|style| convert(&self.input, *style))
            .collect();
    }
}

#[derive(Default)]
pub struct CaseConverterTool;

impl Tool for CaseConverterTool {
    fn id(&self) -> ToolId {
        ToolId::CaseConverter
    }

    fn name(&self) -> &'static str {
        "Case Converter"
    }

    fn description(&self) -> &'static str {
        "Rewrite a phrase or identifier in every common case style at once"
    }

    fn category(&self) -> ToolCategory {
        ToolCategory::TextData
    }

    fn keywords(&self) -> &'static [&'static str] {
        &["camel", "snake", "kebab", "pascal", "identifier"]
    }

    fn ui(&mut self, ui: &mut egui::Ui, ctx: &mut ToolCtx<'_>) {
        let (mut state, setter) = ctx.state::<CaseConverterState>();
        let mut changed = false;

        ui.strong("Input");
        changed |= ui
            .add(
                egui::TextEdit::singleline(&mut state.input)
                    .font(TextStyle::Monospace)
                    .desired_width(f32::INFINITY)
                    .hint_text("some_variableName or a whole phrase"),
            )
            .changed();

        if changed {
            state.recompute();
        }

        ui.add_space(8.0);
        if state.outputs.is_empty() {
            ui.weak("Conversions appear here.");
        } else {
            egui::Grid::new("case_grid")
                .num_columns(3)
                .spacing([16.0, 4.0])
                .striped(true)
                .show(ui, |ui| {
                    for (style, output) in CaseStyle::ALL.iter().zip(&state.outputs) {
                        ui.label(style.label());
                        ui.monospace(output);
                        if ui.small_button("📋").on_hover_text("Copy").clicked() {
                            ui.ctx().copy_text(output.clone());
                            ctx.success(format!("Copied {}", style.label()));
                        }
                        ui.end_row();
                    }
                });
        }

        if changed {
            setter.set(state);
        }
    }
}
