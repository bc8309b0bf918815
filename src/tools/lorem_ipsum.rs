use rand::Rng;

use crate::tool::{Tool, ToolCategory, ToolCtx, ToolId};
use crate::widgets::OutputText;

const MAX_PARAGRAPHS: usize = 20;
const MAX_SENTENCES: usize = 12;

/// The classic opening, used verbatim when "start with Lorem ipsum" is on.
const CLASSIC_OPENER: &str = "Lorem ipsum dolor sit amet, consectetur adipiscing elit, \
                              sed do eiusmod tempor incididunt ut labore et dolore magna aliqua.";

/// The traditional vocabulary, kept lowercase; capitalization happens per sentence.
const WORDS: &[&str] = &[
    "lorem", "ipsum", "dolor", "sit", "amet", "consectetur", "adipiscing", "elit", "sed", "do",
    "eiusmod", "tempor", "incididunt", "ut", "labore", "et", "dolore", "magna", "aliqua", "enim",
    "ad", "minim", "veniam", "quis", "nostrud", "exercitation", "ullamco", "laboris", "nisi",
    "aliquip", "ex", "ea", "commodo", "consequat", "duis", "aute", "irure", "in", "reprehenderit",
    "voluptate", "velit", "esse", "cillum", "eu", "fugiat", "nulla", "pariatur", "excepteur",
    "sint", "occaecat", "cupidatat", "non", "proident", "sunt", "culpa", "qui", "officia",
    "deserunt", "mollit", "anim", "id", "est", "laborum",
];

fn sentence<R: Rng>(rng: &mut R) -> String {
    let word_count = rng.random_range(8..=16);
    let mut out = String::new();
    for i in 0..word_count {
        let word = WORDS[rng.random_range(0..WORDS.len())];
        if i == 0 {
            out.extend(word.chars().enumerate().map(|(n, c)| {
                if n == 0 { c.to_ascii_uppercase() } else { c }
            }));
        } else {
            out.push(' ');
            out.push_str(word);
        }
    }
    out.push('.');
    out
}

pub(crate) fn generate<R: Rng>(
    rng: &mut R,
    paragraphs: usize,
    sentences: usize,
    classic_start: bool,
) -> String {
    let paragraphs = paragraphs.clamp(1, MAX_PARAGRAPHS);
    let sentences = sentences.clamp(1, MAX_SENTENCES);
    let mut out = Vec::with_capacity(paragraphs);
    for p in 0..paragraphs {
        let mut parts = Vec::with_capacity(sentences);
        if p == 0 && classic_start {
            parts.push(CLASSIC_OPENER.to_owned());
        }
        while parts.len() < sentences {
            parts.push(sentence(rng));
        }
        out.push(parts.join(" "));
    }
    out.join("\n\n")
}

#[derive(Clone)]
pub struct LoremIpsumState {
    pub paragraphs: usize,
    pub sentences: usize,
    pub classic_start: bool,
    pub output: String,
}

impl Default for LoremIpsumState {
    fn default() -> Self {
        Self {
            paragraphs: 3,
            sentences: 5,
            classic_start: true,
            output: String::new(),
        }
    }
}

#[derive(Default)]
pub struct LoremIpsumTool;

impl Tool for LoremIpsumTool {
    fn id(&self) -> ToolId {
        ToolId::LoremIpsum
    }

    fn name(&self) -> &'static str {
        "Lorem Ipsum"
    }

    fn description(&self) -> &'static str {
        "Generate placeholder paragraphs of filler latin"
    }

    fn category(&self) -> ToolCategory {
        ToolCategory::Generators
    }

    fn keywords(&self) -> &'static [&'static str] {
        &["placeholder", "filler", "dummy", "text"]
    }

    fn ui(&mut self, ui: &mut egui::Ui, ctx: &mut ToolCtx<'_>) {
        let (mut state, setter) = ctx.state::<LoremIpsumState>();
        let mut changed = false;

        ui.horizontal(|ui| {
            ui.label("Paragraphs");
            changed |= ui
                .add(egui::Slider::new(&mut state.paragraphs, 1..=MAX_PARAGRAPHS))
                .changed();
            ui.separator();
            ui.label("Sentences each");
            changed |= ui
                .add(egui::Slider::new(&mut state.sentences, 1..=MAX_SENTENCES))
                .changed();
        });
        changed |= ui
            .checkbox(&mut state.classic_start, "Start with \"Lorem ipsum dolor sit amet…\"")
            .changed();

        ui.add_space(4.0);
        if ui.button("📝 Generate").clicked() {
            state.output = generate(
                &mut rand::rng(),
                state.paragraphs,
                state.sentences,
                state.classic_start,
            );
            changed = true;
        }

        ui.add_space(4.0);
        if OutputText::new(&state.output).rows(12).show(ui).copied {
            ctx.success("Copied to clipboard");
        }
        if !state.output.is_empty() {
            let words = state.output.split_whitespace().count();
            ui.weak(format!("{words} words, {} chars", state.output.len()));
        }

        if changed {
            setter.set(state);
        }
    }
}
