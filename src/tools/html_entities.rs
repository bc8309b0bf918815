use egui::TextStyle;

use crate::tool::{Tool, ToolCategory, ToolCtx, ToolId};
use crate::widgets::OutputText;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HtmlMode {
    EscapeText,
    EscapeAttribute,
    Unescape,
}

impl HtmlMode {
    pub const ALL: [HtmlMode; 3] = [
        HtmlMode::EscapeText,
        HtmlMode::EscapeAttribute,
        HtmlMode::Unescape,
    ];

    fn label(self) -> &'static str {
        match self {
            HtmlMode::EscapeText => "Escape for text",
            HtmlMode::EscapeAttribute => "Escape for attribute",
            HtmlMode::Unescape => "Unescape",
        }
    }

    fn hint(self) -> &'static str {
        match self {
            HtmlMode::EscapeText => "Escapes & < >, enough for element content",
            HtmlMode::EscapeAttribute => "Also escapes quotes, for double-quoted attributes",
            HtmlMode::Unescape => "Decodes named, decimal and hex entities",
        }
    }
}

pub(crate) fn convert(mode: HtmlMode, input: &str) -> String {
    match mode {
        HtmlMode::EscapeText => html_escape::encode_text(input).into_owned(),
        HtmlMode::EscapeAttribute => {
            html_escape::encode_double_quoted_attribute(input).into_owned()
        }
        HtmlMode::Unescape => html_escape::decode_html_entities(input).into_owned(),
    }
}

#[derive(Clone)]
pub struct HtmlEntitiesState {
    pub input: String,
    pub mode: HtmlMode,
    pub output: String,
}

impl Default for HtmlEntitiesState {
    fn default() -> Self {
        Self {
            input: String::new(),
            mode: HtmlMode::EscapeText,
            output: String::new(),
        }
    }
}

impl HtmlEntitiesState {
    pub fn recompute(&mut self) {
        if self.input.is_empty() {
            self.output.clear();
            return;
        }
        self.output = convert(self.mode, &self.input);
    }
}

#[derive(Default)]
pub struct HtmlEntitiesTool;

impl Tool for HtmlEntitiesTool {
    fn id(&self) -> ToolId {
        ToolId::HtmlEntities
    }

    fn name(&self) -> &'static str {
        "HTML Entities"
    }

    fn description(&self) -> &'static str {
        "Escape text for HTML or decode entities back to plain text"
    }

    fn category(&self) -> ToolCategory {
        ToolCategory::Encoders
    }

    fn keywords(&self) -> &'static [&'static str] {
        &["escape", "unescape", "entity", "amp", "xss"]
    }

    fn ui(&mut self, ui: &mut egui::Ui, ctx: &mut ToolCtx<'_>) {
        let (mut state, setter) = ctx.state::<HtmlEntitiesState>();
        let mut changed = false;

        ui.horizontal(|ui| {
            for mode in HtmlMode::ALL {
                changed |= ui
                    .radio_value(&mut state.mode, mode, mode.label())
                    .on_hover_text(mode.hint())
                    .changed();
            }
        });

        ui.add_space(4.0);
        ui.strong("Input");
        changed |= ui
            .add(
                egui::TextEdit::multiline(&mut state.input)
                    .font(TextStyle::Monospace)
                    .desired_rows(5)
                    .desired_width(f32::INFINITY)
                    .hint_text("<div class=\"greeting\">Fish & Chips</div>"),
            )
            .changed();

        if changed {
            state.recompute();
        }

        ui.add_space(4.0);
        if OutputText::new(&state.output).rows(5).show(ui).copied {
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
    fn text_escape_covers_the_markup_chars_but_not_quotes() {
        assert_eq!(
            convert(HtmlMode::EscapeText, r#"<a href="x">Fish & Chips</a>"#),
            r#"&lt;a href="x"&gt;Fish &amp; Chips&lt;/a&gt;"#
        );
    }

    #[test]
    fn attribute_escape_also_covers_quotes() {
        assert_eq!(
            convert(HtmlMode::EscapeAttribute, r#"say "hi" & <go>"#),
            "say &quot;hi&quot; &amp; &lt;go&gt;"
        );
    }

    #[test]
    fn unescape_decodes_named_decimal_and_hex_entities() {
        assert_eq!(
            convert(HtmlMode::Unescape, "&lt;b&gt;&amp;&quot;"),
            r#"<b>&""#
        );
        assert_eq!(convert(HtmlMode::Unescape, "&#65;&#x42;"), "AB");
        assert_eq!(convert(HtmlMode::Unescape, "plain text"), "plain text");
    }

    #[test]
    fn escape_then_unescape_restores_the_input() {
        let original = r#"<script>if (a < b && c > d) alert("x");</script>"#;
        let escaped = convert(HtmlMode::EscapeAttribute, original);
        assert_eq!(convert(HtmlMode::Unescape, &escaped), original);
    }

    #[test]
    fn empty_input_clears_stale_output() {
        let mut state = HtmlEntitiesState {
            input: String::new(),
            output: String::from("stale"),
            ..Default::default()
        };
        state.recompute();
        assert!(state.output.is_empty());
    }
}
