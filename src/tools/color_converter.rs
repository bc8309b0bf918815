use egui::TextStyle;
use egui::color_picker::color_edit_button_srgb;
use thiserror::Error;

use crate::tool::{Tool, ToolCategory, ToolCtx, ToolId};
use crate::widgets::OutputText;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ColorParseError {
    #[error("hex colors have 3 or 6 digits, found {0}")]
    BadLength(usize),
    #[error("{0:?} is not a hex digit sequence")]
    BadDigit(String),
}

/// Parses `#rgb` or `#rrggbb`, with or without the `#`.
pub(crate) fn parse_hex(input: &str) -> Result<[u8; 3], ColorParseError> {
    let hex = input.trim().trim_start_matches('#');
    // Byte-indexed slicing below; multi-byte input must bail out first.
    if !hex.is_ascii() {
        return Err(ColorParseError::BadDigit(hex.to_owned()));
    }
    let expanded: String = match hex.len() {
        // Shorthand doubles every digit: #fa3 == #ffaa33.
        3 => hex.chars().flat_map(|c| [c, c]).collect(),
        6 => hex.to_owned(),
        n => return Err(ColorParseError::BadLength(n)),
    };
    let byte_at = |i: usize| {
        u8::from_str_radix(&expanded[i..i + 2], 16)
            .map_err(|_| ColorParseError::BadDigit(hex.to_owned()))
    };
    Ok([byte_at(0)?, byte_at(2)?, byte_at(4)?])
}

pub(crate) fn to_hex([r, g, b]: [u8; 3]) -> String {
    format!("#{r:02x}{g:02x}{b:02x}")
}

pub(crate) fn to_rgb_string([r, g, b]: [u8; 3]) -> String {
    format!("rgb({r}, {g}, {b})")
}

/// RGB to HSL, CSS style: hue in degrees, saturation/lightness in 0..=1.
pub(crate) fn rgb_to_hsl([r, g, b]: [u8; 3]) -> (f32, f32, f32) {
    let r = f32::from(r) / 255.0;
    let g = f32::from(g) / 255.0;
    let b = f32::from(b) / 255.0;
    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    let l = (max + min) / 2.0;
    if max == min {
        return (0.0, 0.0, l);
    }
    let d = max - min;
    let s = if l > 0.5 { d / (2.0 - max - min) } else { d / (max + min) };
    let h = if max == r {
        ((g - b) / d).rem_euclid(6.0)
    } else if max == g {
        (b - r) / d + 2.0
    } else {
        (r - g) / d + 4.0
    };
    (h * 60.0, s, l)
}

pub(crate) fn to_hsl_string(rgb: [u8; 3]) -> String {
    let (h, s, l) = rgb_to_hsl(rgb);
    format!("hsl({h:.0}, {:.0}%, {:.0}%)", s * 100.0, l * 100.0)
}

#[derive(Clone)]
pub struct ColorConverterState {
    pub rgb: [u8; 3],
    pub hex_input: String,
    pub error: Option<String>,
}

impl Default for ColorConverterState {
    fn default() -> Self {
        let rgb = [0x33, 0x66, 0x99];
        Self {
            hex_input: to_hex(rgb),
            rgb,
            error: None,
        }
    }
}

impl ColorConverterState {
    /// The picker changed: the hex field follows the color.
    pub fn adopt_picker(&mut self) {
        self.hex_input = to_hex(self.rgb);
        self.error = None;
    }

    /// The hex field changed: the color follows the text, if it parses.
    pub fn adopt_hex(&mut self) {
        match parse_hex(&self.hex_input) {
            Ok(rgb) => {
                self.rgb = rgb;
                self.error = None;
            }
            Err(err) => self.error = Some(err.to_string()),
        }
    }
}

#[derive(Default)]
pub struct ColorConverterTool;

impl Tool for ColorConverterTool {
    fn id(&self) -> ToolId {
        ToolId::ColorConverter
    }

    fn name(&self) -> &'static str {
        "Color Converter"
    }

    fn description(&self) -> &'static str {
        "Pick a color and read it as hex, rgb() and hsl()"
    }

    fn category(&self) -> ToolCategory {
        ToolCategory::Converters
    }

    fn keywords(&self) -> &'static [&'static str] {
        &["hex", "rgb", "hsl", "css", "picker"]
    }

    fn ui(&mut self, ui: &mut egui::Ui, ctx: &mut ToolCtx<'_>) {
        let (mut state, setter) = ctx.state::<ColorConverterState>();
        let mut changed = false;

        ui.horizontal(|ui| {
            ui.strong("Color");
            if color_edit_button_srgb(ui, &mut state.rgb).changed() {
                state.adopt_picker();
                changed = true;
            }
            ui.separator();
            ui.label("Hex");
            if ui
                .add(
                    egui::TextEdit::singleline(&mut state.hex_input)
                        .font(TextStyle::Monospace)
                        .desired_width(110.0)
                        .hint_text("#336699"),
                )
                .changed()
            {
                state.adopt_hex();
                changed = true;
            }
        });

        if let Some(error) = &state.error {
            ui.colored_label(ui.visuals().error_fg_color, error);
        }

        ui.add_space(8.0);
        for (label, text) in [
            ("Hex", to_hex(state.rgb)),
            ("RGB", to_rgb_string(state.rgb)),
            ("HSL", to_hsl_string(state.rgb)),
        ] {
            if OutputText::new(&text).label(label).rows(1).show(ui).copied {
                ctx.success(format!("Copied {label}"));
            }
            ui.add_space(4.0);
        }

        if changed {
            setter.set(state);
        }
    }
}
