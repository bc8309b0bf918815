use chrono::{DateTime, SecondsFormat, Utc};
use egui::TextStyle;
use thiserror::Error;

use crate::tool::{Tool, ToolCategory, ToolCtx, ToolId};
use crate::widgets::OutputText;

/// Numbers at or above this magnitude are read as milliseconds.
/// 1e12 seconds is far beyond any plausible date, 1e12 millis is 2001.
const MILLIS_THRESHOLD: i64 = 1_000_000_000_000;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TimestampError {
    #[error("could not parse {0:?} as unix seconds, unix millis, RFC 3339 or RFC 2822")]
    Unrecognized(String),
    #[error("timestamp {0} is outside the representable range")]
    OutOfRange(i64),
}

pub(crate) fn parse_instant(input: &str) -> Result<DateTime<Utc>, TimestampError> {
    let trimmed = input.trim();
    if let Ok(n) = trimmed.parse::<i64>() {
        return from_unix(n);
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return Ok(dt.with_timezone(&Utc));
    }
    if let Ok(dt) = DateTime::parse_from_rfc2822(trimmed) {
        return Ok(dt.with_timezone(&Utc));
    }
    Err(TimestampError::Unrecognized(trimmed.to_owned()))
}

fn from_unix(n: i64) -> Result<DateTime<Utc>, TimestampError> {
    let parsed = if n.abs() >= MILLIS_THRESHOLD {
        DateTime::from_timestamp_millis(n)
    } else {
        DateTime::from_timestamp(n, 0)
    };
    parsed.ok_or(TimestampError::OutOfRange(n))
}

pub(crate) fn breakdown(dt: DateTime<Utc>) -> String {
    format!(
        "Unix seconds  {}\nUnix millis   {}\nRFC 3339      {}\nRFC 2822      {}\nWeekday       {}",
        dt.timestamp(),
        dt.timestamp_millis(),
        dt.to_rfc3339_opts(SecondsFormat::Secs, true),
        dt.to_rfc2822(),
        dt.format("%A (ISO week %V)"),
    )
}

#[derive(Clone, Default)]
pub struct TimestampState {
    pub input: String,
    pub output: String,
    pub error: Option<String>,
}

impl TimestampState {
    pub fn recompute(&mut self) {
        self.error = None;
        if self.input.trim().is_empty() {
            self.output.clear();
            return;
        }
        match parse_instant(&self.input) {
            Ok(dt) => self.output = breakdown(dt),
            Err(err) => {
                self.output.clear();
                self.error = Some(err.to_string());
            }
        }
    }
}

#[derive(Default)]
pub struct TimestampTool;

impl Tool for TimestampTool {
    fn id(&self) -> ToolId {
        ToolId::Timestamp
    }

    fn name(&self) -> &'static str {
        "Timestamp Converter"
    }

    fn description(&self) -> &'static str {
        "Convert between unix timestamps and calendar dates"
    }

    fn category(&self) -> ToolCategory {
        ToolCategory::Converters
    }

    fn keywords(&self) -> &'static [&'static str] {
        &["unix", "epoch", "date", "time", "rfc3339"]
    }

    fn ui(&mut self, ui: &mut egui::Ui, ctx: &mut ToolCtx<'_>) {
        let (mut state, setter) = ctx.state::<TimestampState>();
        let mut changed = false;

        ui.horizontal(|ui| {
            ui.strong("Input");
            if ui
                .button("⏱ Now")
                .on_hover_text("Fill in the current unix time")
                .clicked()
            {
                state.input = Utc::now().timestamp().to_string();
                changed = true;
            }
        });
        changed |= ui
            .add(
                egui::TextEdit::singleline(&mut state.input)
                    .font(TextStyle::Monospace)
                    .desired_width(f32::INFINITY)
                    .hint_text("1000000000, 2001-09-09T01:46:40Z, ..."),
            )
            .changed();
        ui.weak("Plain numbers with 13 or more digits are read as milliseconds.");

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

        if changed {
            setter.set(state);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unix_seconds_round_trip_through_rfc3339() {
        let dt = parse_instant("1000000000").unwrap();
        assert_eq!(
            dt.to_rfc3339_opts(SecondsFormat::Secs, true),
            "2001-09-09T01:46:40Z"
        );
        let back = parse_instant("2001-09-09T01:46:40Z").unwrap();
        assert_eq!(back.timestamp(), 1_000_000_000);
    }

    #[test]
    fn thirteen_digit_numbers_are_milliseconds() {
        let dt = parse_instant("1000000000000").unwrap();
        assert_eq!(dt.timestamp(), 1_000_000_000);
    }

    #[test]
    fn rfc2822_input_is_accepted() {
        let dt = parse_instant("Sun, 9 Sep 2001 01:46:40 +0000").unwrap();
        assert_eq!(dt.timestamp(), 1_000_000_000);
    }

    #[test]
    fn negative_seconds_reach_before_the_epoch() {
        let dt = parse_instant("-1").unwrap();
        assert_eq!(
            dt.to_rfc3339_opts(SecondsFormat::Secs, true),
            "1969-12-31T23:59:59Z"
        );
    }

    #[test]
    fn breakdown_lists_every_rendering() {
        let text = breakdown(parse_instant("1000000000").unwrap());
        assert!(text.contains("1000000000000"));
        assert!(text.contains("2001-09-09T01:46:40Z"));
        assert!(text.contains("Sun, 9 Sep 2001 01:46:40 +0000"));
        assert!(text.contains("Sunday (ISO week 36)"));
    }

    #[test]
    fn junk_input_reports_what_it_saw() {
        let err = parse_instant("yesterday").unwrap_err();
        assert!(matches!(err, TimestampError::Unrecognized(_)));
        assert!(err.to_string().contains("yesterday"));
    }
}
