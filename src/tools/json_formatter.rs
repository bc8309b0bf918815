use egui::TextStyle;
use serde::Serialize as _;

use crate::tool::{Tool, ToolCategory, ToolCtx, ToolId};
use crate::widgets::OutputText;

const SAMPLE: &str = r#"{"name":"toolbench","tags":["json","pretty"],"nested":{"pi":3.14,"ok":true}}"#;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JsonStyle {
    Pretty,
    Minified,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JsonIndent {
    TwoSpaces,
    FourSpaces,
    Tabs,
}

impl JsonIndent {
    fn label(self) -> &'static str {
        match self {
            JsonIndent::TwoSpaces => "2 spaces",
            JsonIndent::FourSpaces => "4 spaces",
            JsonIndent::Tabs => "Tabs",
        }
    }

    fn as_bytes(self) -> &'static [u8] {
        match self {
            JsonIndent::TwoSpaces => b"  ",
            JsonIndent::FourSpaces => b"    ",
            JsonIndent::Tabs => b"\t",
        }
    }
}

#[derive(Clone)]
pub struct JsonFormatterState {
    pub input: String,
    pub style: JsonStyle,
    pub indent: JsonIndent,
    pub output: String,
    pub error: Option<String>,
}

impl Default for JsonFormatterState {
    fn default() -> Self {
        Self {
            input: String::new(),
            style: JsonStyle::Pretty,
            indent: JsonIndent::TwoSpaces,
            output: String::new(),
            error: None,
        }
    }
}

impl JsonFormatterState {
    pub fn recompute(&mut self) {
        self.error = None;
        if self.input.trim().is_empty() {
            self.output.clear();
            return;
        }
        match format_json(&self.input, self.style, self.indent) {
            Ok(formatted) => self.output = formatted,
            Err(err) => {
                self.output.clear();
                self.error = Some(err.to_string());
            }
        }
    }
}

pub(crate) fn format_json(
    input: &str,
    style: JsonStyle,
    indent: JsonIndent,
) -> Result<String, serde_json::Error> {
    let value: serde_json::Value = serde_json::from_str(input)?;
    match style {
        JsonStyle::Minified => serde_json::to_string(&value),
        JsonStyle::Pretty => {
            let mut out = Vec::new();
            let formatter = serde_json::ser::PrettyFormatter::with_indent(indent.as_bytes());
            let mut serializer = serde_json::Serializer::with_formatter(&mut out, formatter);
            value.serialize(&mut serializer)?;
            Ok(String::from_utf8(out).expect("serde_json emits valid UTF-8"))
        }
    }
}

#[derive(Default)]
pub struct JsonFormatterTool;

impl Tool for JsonFormatterTool {
    fn id(&self) -> ToolId {
        ToolId::JsonFormatter
    }

    fn name(&self) -> &'static str {
        "JSON Formatter"
    }

    fn description(&self) -> &'static str {
        "Validate JSON, pretty-print it or minify it"
    }

    fn category(&self) -> ToolCategory {
        ToolCategory::TextData
    }

    fn keywords(&self) -> &'static [&'static str] {
        &["pretty", "minify", "validate", "lint"]
    }

    fn ui(&mut self, ui: &mut egui::Ui, ctx: &mut ToolCtx<'_>) {
        let (mut state, setter) = ctx.state::<JsonFormatterState>();
        let mut changed = false;

        ui.horizontal(|ui| {
            changed |= ui
                .radio_value(&mut state.style, JsonStyle::Pretty, "Pretty")
                .changed();
            changed |= ui
                .radio_value(&mut state.style, JsonStyle::Minified, "Minified")
                .changed();
            ui.separator();
            ui.add_enabled_ui(state.style == JsonStyle::Pretty, |ui| {
                egui::ComboBox::from_id_salt("json_indent")
                    .selected_text(state.indent.label())
                    .show_ui(ui, |ui| {
                        for indent in [JsonIndent::TwoSpaces, JsonIndent::FourSpaces, JsonIndent::Tabs]
                        {
                            changed |= ui
                                .selectable_value(&mut state.indent, indent, indent.label())
                                .changed();
                        }
                    });
            });
            if ui.button("Load sample").clicked() {
                state.input = SAMPLE.to_owned();
                changed = true;
            }
        });

        ui.add_space(4.0);
        ui.strong("Input");
        changed |= ui
            .add(
                egui::TextEdit::multiline(&mut state.input)
                    .font(TextStyle::Monospace)
                    .desired_rows(8)
                    .desired_width(f32::INFINITY)
                    .hint_text("Paste JSON here"),
            )
            .changed();

        if changed {
            state.recompute();
        }

        match &state.error {
            Some(error) => {
                ui.colored_label(ui.visuals().error_fg_color, error);
            }
            None if !state.output.is_empty() => {
                ui.weak("Valid JSON. Object keys are emitted in sorted order.");
            }
            None => {}
        }

        ui.add_space(4.0);
        if OutputText::new(&state.output).rows(10).show(ui).copied {
            ctx.success("Copied to clipboard");
        }

        if changed {
            setter.set(state);
        }
    }
}
