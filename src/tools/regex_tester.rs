use egui::TextStyle;
use regex::RegexBuilder;

use crate::tool::{Tool, ToolCategory, ToolCtx, ToolId};

/// Patterns like `a*` match at every position; stop collecting here.
const MAX_MATCHES: usize = 200;

/// Matches listed in the UI before collapsing into an "and N more" line.
const MAX_LISTED: usize = 50;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RegexFlags {
    pub case_insensitive: bool,
    pub multi_line: bool,
    pub dot_matches_new_line: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupReport {
    pub index: usize,
    pub name: Option<String>,
    /// `None` when the group did not participate in this match.
    pub text: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchReport {
    pub range: std::ops::Range<usize>,
    pub text: String,
    pub groups: Vec<GroupReport>,
}

pub(crate) fn find_matches(
    pattern: &str,
    haystack: &str,
    flags: RegexFlags,
) -> Result<Vec<MatchReport>, regex::Error> {
    let re = RegexBuilder::new(pattern)
        .case_insensitive(flags.case_insensitive)
        .multi_line(flags.multi_line)
        .dot_matches_new_line(flags.dot_matches_new_line)
        .build()?;
    let names: Vec<Option<String>> = re
        .capture_names()
        .map(|name| name.map(str::to_owned))
        .collect();

    let mut reports = Vec::new();
    for caps in re.captures_iter(haystack).take(MAX_MATCHES) {
        let overall = caps.get(0).expect("group 0 always participates");
        let groups = names
            .iter()
            .enumerate()
            .skip(1)
            .map(|(index, name)| GroupReport {
                index,
                name: name.clone(),
                text: caps.get(index).map(|m| m.as_str().to_owned()),
            })
            .collect();
        reports.push(MatchReport {
            range: overall.range(),
            text: overall.as_str().to_owned(),
            groups,
        });
    }
    Ok(reports)
}

#[derive(Clone, Default)]
pub struct RegexTesterState {
    pub pattern: String,
    pub haystack: String,
    pub flags: RegexFlags,
    pub matches: Vec<MatchReport>,
    pub error: Option<String>,
}

impl RegexTesterState {
    pub fn recompute(&mut self) {
        self.error = None;
        if self.pattern.is_empty() {
            self.matches.clear();
            return;
        }
        match find_matches(&self.pattern, &self.haystack, self.flags) {
            Ok(matches) => self.matches = matches,
            Err(err) => {
                self.matches.clear();
                self.error = Some(err.to_string());
            }
        }
    }
}

#[derive(Default)]
pub struct RegexTesterTool;

impl Tool for RegexTesterTool {
    fn id(&self) -> ToolId {
        ToolId::RegexTester
    }

    fn name(&self) -> &'static str {
        "Regex Tester"
    }

    fn description(&self) -> &'static str {
        "Try a regular expression against sample text and inspect capture groups"
    }

    fn category(&self) -> ToolCategory {
        ToolCategory::TextData
    }

    fn keywords(&self) -> &'static [&'static str] {
        &["regexp", "pattern", "match", "capture"]
    }

    fn ui(&mut self, ui: &mut egui::Ui, ctx: &mut ToolCtx<'_>) {
        let (mut state, setter) = ctx.state::<RegexTesterState>();
        let mut changed = false;

        ui.strong("Pattern");
        changed |= ui
            .add(
                egui::TextEdit::singleline(&mut state.pattern)
                    .font(TextStyle::Monospace)
                    .desired_width(f32::INFINITY)
                    .hint_text(r"(?P<word>\w+)@(\d+)"),
            )
            .changed();
        ui.horizontal(|ui| {
            changed |= ui
                .checkbox(&mut state.flags.case_insensitive, "i")
                .on_hover_text("Case insensitive")
                .changed();
            changed |= ui
                .checkbox(&mut state.flags.multi_line, "m")
                .on_hover_text("^ and $ match line boundaries")
                .changed();
            changed |= ui
                .checkbox(&mut state.flags.dot_matches_new_line, "s")
                .on_hover_text(". also matches newlines")
                .changed();
        });

        ui.add_space(4.0);
        ui.strong("Text");
        changed |= ui
            .add(
                egui::TextEdit::multiline(&mut state.haystack)
                    .font(TextStyle::Monospace)
                    .desired_rows(6)
                    .desired_width(f32::INFINITY)
                    .hint_text("Text to search"),
            )
            .changed();

        if changed {
            state.recompute();
        }

        ui.add_space(4.0);
        if let Some(error) = &state.error {
            ui.colored_label(ui.visuals().error_fg_color, error);
        } else if state.pattern.is_empty() {
            ui.weak("Matches appear here.");
        } else {
            let suffix = if state.matches.len() == MAX_MATCHES {
                " (stopped here)"
            } else {
                ""
            };
            ui.strong(format!("{} match(es){suffix}", state.matches.len()));
            for (n, m) in state.matches.iter().take(MAX_LISTED).enumerate() {
                ui.monospace(format!(
                    "{:>3}. [{}..{}] {:?}",
                    n + 1,
                    m.range.start,
                    m.range.end,
                    m.text
                ));
                for group in &m.groups {
                    let label = match &group.name {
                        Some(name) => format!("{} ({})", group.index, name),
                        None => group.index.to_string(),
                    };
                    let value = match &group.text {
                        Some(text) => format!("{text:?}"),
                        None => String::from("<no match>"),
                    };
                    ui.weak(format!("       group {label}: {value}"));
                }
            }
            if state.matches.len() > MAX_LISTED {
                ui.weak(format!("…and {} more", state.matches.len() - MAX_LISTED));
            }
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
    fn finds_matches_with_ranges() {
        let matches = find_matches(r"\d+", "a 12 b 345", RegexFlags::default()).unwrap();
        assert_eq!(matches.len(), 2);
        assert_eq!(matches[0].text, "12");
        assert_eq!(matches[0].range, 2..4);
        assert_eq!(matches[1].text, "345");
        assert_eq!(matches[1].range, 7..10);
    }

    #[test]
    fn reports_named_and_positional_groups() {
        let matches =
            find_matches(r"(?P<word>\w+)@(\d+)", "alice@42", RegexFlags::default()).unwrap();
        assert_eq!(matches.len(), 1);
        let groups = &matches[0].groups;
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].name.as_deref(), Some("word"));
        assert_eq!(groups[0].text.as_deref(), Some("alice"));
        assert_eq!(groups[1].name, None);
        assert_eq!(groups[1].text.as_deref(), Some("42"));
    }

    #[test]
    fn optional_group_can_skip_a_match() {
        let matches = find_matches(r"a(b)?", "a ab", RegexFlags::default()).unwrap();
        assert_eq!(matches.len(), 2);
        assert_eq!(matches[0].groups[0].text, None);
        assert_eq!(matches[1].groups[0].text.as_deref(), Some("b"));
    }

    #[test]
    fn flags_change_what_matches() {
        let insensitive = RegexFlags {
            case_insensitive: true,
            ..Default::default()
        };
        assert!(find_matches("abc", "ABC", RegexFlags::default()).unwrap().is_empty());
        assert_eq!(find_matches("abc", "ABC", insensitive).unwrap().len(), 1);

        let multi = RegexFlags {
            multi_line: true,
            ..Default::default()
        };
        assert_eq!(find_matches("^b", "a\nb", RegexFlags::default()).unwrap().len(), 0);
        assert_eq!(find_matches("^b", "a\nb", multi).unwrap().len(), 1);

        let dotall = RegexFlags {
            dot_matches_new_line: true,
            ..Default::default()
        };
        assert_eq!(find_matches("a.b", "a\nb", RegexFlags::default()).unwrap().len(), 0);
        assert_eq!(find_matches("a.b", "a\nb", dotall).unwrap().len(), 1);
    }

    #[test]
    fn match_count_is_capped() {
        let haystack = "x".repeat(MAX_MATCHES * 2);
        let matches = find_matches("x", &haystack, RegexFlags::default()).unwrap();
        assert_eq!(matches.len(), MAX_MATCHES);
    }

    #[test]
    fn invalid_patterns_surface_as_errors() {
        assert!(find_matches("(unclosed", "text", RegexFlags::default()).is_err());

        let mut state = RegexTesterState {
            pattern: String::from("(unclosed"),
            haystack: String::from("text"),
            ..Default::default()
        };
        state.recompute();
        assert!(state.matches.is_empty());
        assert!(state.error.is_some());
    }
}
