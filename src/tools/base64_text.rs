use base64::Engine as _;
use base64::engine::general_purpose;
use egui::TextStyle;

use crate::tool::{Tool, ToolCategory, ToolCtx, ToolId};
use crate::widgets::OutputText;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Base64Mode {
    Encode,
    Decode,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Base64Alphabet {
    Standard,
    UrlSafe,
}

impl Base64Alphabet {
    fn label(self) -> &'static str {
        match self {
            Base64Alphabet::Standard => "Standard (+/ with padding)",
            Base64Alphabet::UrlSafe => "URL-safe (-_ without padding)",
        }
    }
}

#[derive(Clone)]
pub struct Base64TextState {
    pub input: String,
    pub mode: Base64Mode,
    pub alphabet: Base64Alphabet,
    pub output: String,
    pub error: Option<String>,
}

impl Default for Base64TextState {
    fn default() -> Self {
        Self {
            input: String::new(),
            mode: Base64Mode::Encode,
            alphabet: Base64Alphabet::Standard,
            output: String::new(),
            error: None,
        }
    }
}

impl Base64TextState {
    pub fn recompute(&mut self) {
        self.error = None;
        if self.input.is_empty() {
            self.output.clear();
            return;
        }
        match self.mode {
            Base64Mode::Encode => self.output = encode(self.alphabet, &self.input),
            Base64Mode::Decode => match decode(self.alphabet, self.input.trim()) {
                Ok(text) => self.output = text,
                Err(err) => {
                    self.output.clear();
                    self.error = Some(err.to_string());
                }
            },
        }
    }
}

fn engine(alphabet: Base64Alphabet) -> &'static general_purpose::GeneralPurpose {
    match alphabet {
        Base64Alphabet::Standard => &general_purpose::STANDARD,
        Base64Alphabet::UrlSafe => &general_purpose::URL_SAFE_NO_PAD,
    }
}

pub(crate) fn encode(alphabet: Base64Alphabet, input: &str) -> String {
    engine(alphabet).encode(input.as_bytes())
}

pub(crate) fn decode(alphabet: Base64Alphabet, input: &str) -> Result<String, base64::DecodeError> {
    let bytes = engine(alphabet).decode(input)?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

#[derive(Default)]
pub struct Base64TextTool;

impl Tool for Base64TextTool {
    fn id(&self) -> ToolId {
        ToolId::Base64Text
    }

    fn name(&self) -> &'static str {
        "Base64 Text"
    }

    fn description(&self) -> &'static str {
        "Encode text to Base64 or decode Base64 back to text"
    }

    fn category(&self) -> ToolCategory {
        ToolCategory::Encoders
    }

    fn keywords(&self) -> &'static [&'static str] {
        &["b64", "encode", "decode"]
    }

    fn ui(&mut self, ui: &mut egui::Ui, ctx: &mut ToolCtx<'_>) {
        let (mut state, setter) = ctx.state::<Base64TextState>();
        let mut changed = false;

        ui.horizontal(|ui| {
            changed |= ui
                .radio_value(&mut state.mode, Base64Mode::Encode, "Encode")
                .changed();
            changed |= ui
                .radio_value(&mut state.mode, Base64Mode::Decode, "Decode")
                .changed();
            ui.separator();
            egui::ComboBox::from_id_salt("base64_alphabet")
                .selected_text(state.alphabet.label())
                .show_ui(ui, |ui| {
                    for alphabet in [Base64Alphabet::Standard, Base64Alphabet::UrlSafe] {
                        changed |= ui
                            .selectable_value(&mut state.alphabet, alphabet, alphabet.label())
                            .changed();
                    }
                });
        });

        ui.add_space(4.0);
        ui.strong("Input");
        changed |= ui
            .add(
                egui::TextEdit::multiline(&mut state.input)
                    .font(TextStyle::Monospace)
                    .desired_rows(5)
                    .desired_width(f32::INFINITY)
                    .hint_text("Text or Base64 to convert"),
            )
            .changed();

        if changed {
            state.recompute();
        }

        if let Some(error) = &state.error {
            ui.colored_label(ui.visuals().error_fg_color, error);
        }

        ui.add_space(4.0);
        if OutputText::new(&state.output).rows(5).show(ui).copied {
            ctx.success("Copied to clipboard");
        }

        if ui
            .add_enabled(
                !state.output.is_empty() && state.error.is_none(),
                egui::Button::new("⇄ Use output as input"),
            )
            .clicked()
        {
            state.input = std::mem::take(&mut state.output);
            state.mode = match state.mode {
                Base64Mode::Encode => Base64Mode::Decode,
                Base64Mode::Decode => Base64Mode::Encode,
            };
            state.recompute();
            changed = true;
        }

        if changed {
            setter.set(state);
        }
    }
}
