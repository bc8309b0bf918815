use std::num::IntErrorKind;

use egui::TextStyle;
use thiserror::Error;

use crate::tool::{Tool, ToolCategory, ToolCtx, ToolId};
use crate::widgets::OutputText;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NumberBase {
    Binary,
    Octal,
    Decimal,
    Hex,
}

impl NumberBase {
    pub const ALL: [NumberBase; 4] = [
        NumberBase::Binary,
        NumberBase::Octal,
        NumberBase::Decimal,
        NumberBase::Hex,
    ];

    fn label(self) -> &'static str {
        match self {
            NumberBase::Binary => "Binary",
            NumberBase::Octal => "Octal",
            NumberBase::Decimal => "Decimal",
            NumberBase::Hex => "Hex",
        }
    }

    fn radix(self) -> u32 {
        match self {
            NumberBase::Binary => 2,
            NumberBase::Octal => 8,
            NumberBase::Decimal => 10,
            NumberBase::Hex => 16,
        }
    }

    fn prefix(self) -> Option<&'static str> {
        match self {
            NumberBase::Binary => Some("0b"),
            NumberBase::Octal => Some("0o"),
            NumberBase::Decimal => None,
            NumberBase::Hex => Some("0x"),
        }
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum NumberBaseError {
    #[error("{0:?} is not a valid base-{1} number")]
    InvalidDigit(String, u32),
    #[error("value does not fit in 128 bits")]
    Overflow,
}

pub(crate) fn parse_in_base(input: &str, base: NumberBase) -> Result<u128, NumberBaseError> {
    let trimmed = input.trim();
    // Underscores and spaces are digit separators.
    let mut cleaned: String = trimmed.chars().filter(|c| *c != '_' && *c != ' ').collect();
    if let Some(prefix) = base.prefix() {
        if let Some(rest) = cleaned
            .strip_prefix(prefix)
            .or_else(|| cleaned.strip_prefix(prefix.to_uppercase().as_str()))
        {
            cleaned = rest.to_owned();
        }
    }
    u128::from_str_radix(&cleaned, base.radix()).map_err(|err| match err.kind() {
        IntErrorKind::PosOverflow => NumberBaseError::Overflow,
        _ => NumberBaseError::InvalidDigit(trimmed.to_owned(), base.radix()),
    })
}

fn group_from_right(digits: &str, every: usize) -> String {
    let chars: Vec<char> = digits.chars().collect();
    let mut out = String::with_capacity(chars.len() + chars.len() / every);
    for (i, ch) in chars.iter().enumerate() {
        if i > 0 && (chars.len() - i) % every == 0 {
            out.push('_');
        }
        out.push(*ch);
    }
    out
}

pub(crate) fn render_bases(value: u128) -> String {
    format!(
        "Decimal  {}\nHex      0x{:x}\nOctal    0o{:o}\nBinary   0b{}",
        value,
        value,
        value,
        group_from_right(&format!("{value:b}"), 4),
    )
}

#[derive(Clone)]
pub struct NumberBaseState {
    pub input: String,
    pub base: NumberBase,
    pub output: String,
    pub error: Option<String>,
}

impl Default for NumberBaseState {
    fn default() -> Self {
        Self {
            input: String::new(),
            base: NumberBase::Decimal,
            output: String::new(),
            error: None,
        }
    }
}

impl NumberBaseState {
    pub fn recompute(&mut self) {
        self.error = None;
        if self.input.trim().is_empty() {
            self.output.clear();
            return;
        }
        match parse_in_base(&self.input, self.base) {
            Ok(value) => self.output = render_bases(value),
            Err(err) => {
                self.output.clear();
                self.error = Some(err.to_string());
            }
        }
    }
}

#[derive(Default)]
pub struct NumberBaseTool;

impl Tool for NumberBaseTool {
    fn id(&self) -> ToolId {
        ToolId::NumberBase
    }

    fn name(&self) -> &'static str {
        "Number Base"
    }

    fn description(&self) -> &'static str {
        "Convert unsigned integers between binary, octal, decimal and hex"
    }

    fn category(&self) -> ToolCategory {
        ToolCategory::Converters
    }

    fn keywords(&self) -> &'static [&'static str] {
        &["radix", "binary", "hex", "octal", "bitwise"]
    }

    fn ui(&mut self, ui: &mut egui::Ui, ctx: &mut ToolCtx<'_>) {
        let (mut state, setter) = ctx.state::<NumberBaseState>();
        let mut changed = false;

        ui.horizontal(|ui| {
            ui.label("Read input as");
            for base in NumberBase::ALL {
                changed |= ui
                    .radio_value(&mut state.base, base, base.label())
                    .changed();
            }
        });

        ui.add_space(4.0);
        changed |= ui
            .add(
                egui::TextEdit::singleline(&mut state.input)
                    .font(TextStyle::Monospace)
                    .desired_width(f32::INFINITY)
                    .hint_text("255, 0xff, 0b1111_1111"),
            )
            .changed();
        ui.weak("Underscores and spaces are ignored. Values are unsigned, up to 128 bits.");

        if changed {
            state.recompute();
        }

        if let Some(error) = &state.error {
            ui.colored_label(ui.visuals().error_fg_color, error);
        }

        ui.add_space(4.0);
        if OutputText::new(&state.output).rows(4).show(ui).copied {
            ctx.success("Copied to clipboard");
        }

        if changed {
            setter.set(state);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decimal_renders_into_all_bases() {
        let value = parse_in_base("255", NumberBase::Decimal).unwrap();
        let rendered = render_bases(value);
        assert!(rendered.contains("Decimal  255"));
        assert!(rendered.contains("0xff"));
        assert!(rendered.contains("0o377"));
        assert!(rendered.contains("0b1111_1111"));
    }

    #[test]
    fn prefixes_and_separators_are_accepted() {
        assert_eq!(parse_in_base("0xFF", NumberBase::Hex).unwrap(), 255);
        assert_eq!(parse_in_base("ff", NumberBase::Hex).unwrap(), 255);
        assert_eq!(parse_in_base("0b1111_1111", NumberBase::Binary).unwrap(), 255);
        assert_eq!(parse_in_base("1 0 1 0", NumberBase::Binary).unwrap(), 10);
        assert_eq!(parse_in_base("0o777", NumberBase::Octal).unwrap(), 511);
    }

    #[test]
    fn binary_grouping_starts_from_the_right() {
        assert_eq!(group_from_right("11111", 4), "1_1111");
        assert_eq!(group_from_right("1111", 4), "1111");
        assert_eq!(group_from_right("1", 4), "1");
    }

    #[test]
    fn digits_outside_the_base_are_rejected() {
        let err = parse_in_base("xyz", NumberBase::Hex).unwrap_err();
        assert!(matches!(err, NumberBaseError::InvalidDigit(_, 16)));
        let err = parse_in_base("19", NumberBase::Octal).unwrap_err();
        assert!(matches!(err, NumberBaseError::InvalidDigit(_, 8)));
    }

    #[test]
    fn overflow_is_reported_as_such() {
        let forty_nines = "9".repeat(40);
        assert_eq!(
            parse_in_base(&forty_nines, NumberBase::Decimal).unwrap_err(),
            NumberBaseError::Overflow
        );
    }
}
