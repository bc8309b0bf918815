use base64::Engine as _;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use chrono::{DateTime, SecondsFormat, Utc};
use egui::TextStyle;
use serde_json::Value;
use thiserror::Error;

use crate::tool::{Tool, ToolCategory, ToolCtx, ToolId};
use crate::widgets::OutputText;

/// The long-serving example token from RFC 7519 tutorials: HS256, John Doe.
const SAMPLE: &str = "eyJhbGciOiJIUzI1NiIsInR5cCI6IkpXVCJ9.\
                      eyJzdWIiOiIxMjM0NTY3ODkwIiwibmFtZSI6IkpvaG4gRG9lIiwiaWF0IjoxNTE2MjM5MDIyfQ.\
                      SflKxwRJSMeKKF2QT4fwpMeJf36POk6yJV_adQssw5c";

#[derive(Debug, Error)]
pub enum JwtError {
    #[error("expected 3 dot-separated sections, found {0}")]
    WrongSectionCount(usize),
    #[error("{part} is not valid base64url: {source}")]
    Base64 {
        part: &'static str,
        source: base64::DecodeError,
    },
    #[error("{part} is not valid JSON: {source}")]
    Json {
        part: &'static str,
        source: serde_json::Error,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedJwt {
    pub header: Value,
    pub payload: Value,
    pub signature_bytes: usize,
}

fn decode_section(part: &'static str, text: &str) -> Result<Vec<u8>, JwtError> {
    // Tokens are unpadded base64url, but padded ones show up in the wild.
    URL_SAFE_NO_PAD
        .decode(text.trim_end_matches('='))
        .map_err(|source| JwtError::Base64 { part, source })
}

fn parse_json_section(part: &'static str, text: &str) -> Result<Value, JwtError> {
    let bytes = decode_section(part, text)?;
    serde_json::from_slice(&bytes).map_err(|source| JwtError::Json { part, source })
}

pub(crate) fn decode_jwt(token: &str) -> Result<DecodedJwt, JwtError> {
    let sections: Vec<&str> = token.trim().split('.').collect();
    if sections.len() != 3 {
        return Err(JwtError::WrongSectionCount(sections.len()));
    }
    let header = parse_json_section("header", sections[0])?;
    let payload = parse_json_section("payload", sections[1])?;
    // The signature is only measured, never verified.
    let signature_bytes = decode_section("signature", sections[2]).map_or(0, |b| b.len());
    Ok(DecodedJwt {
        header,
        payload,
        signature_bytes,
    })
}

pub(crate) fn meta_line(jwt: &DecodedJwt) -> String {
    let alg = jwt.header.get("alg").and_then(Value::as_str).unwrap_or("?");
    let mut line = format!("alg {alg}");
    if let Some(typ) = jwt.header.get("typ").and_then(Value::as_str) {
        line.push_str(&format!(" · typ {typ}"));
    }
    if jwt.signature_bytes == 0 {
        line.push_str(" · no signature");
    } else {
        line.push_str(&format!(" · signature {} bytes", jwt.signature_bytes));
    }
    line
}

pub(crate) fn humanize_secs(secs: i64) -> String {
    let n = secs.abs();
    let (value, unit) = if n < 60 {
        (n, "second")
    } else if n < 3_600 {
        (n / 60, "minute")
    } else if n < 86_400 {
        (n / 3_600, "hour")
    } else {
        (n / 86_400, "day")
    };
    if value == 1 {
        format!("1 {unit}")
    } else {
        format!("{value} {unit}s")
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimeLine {
    pub text: String,
    /// True when the claim makes the token unusable right now.
    pub warn: bool,
}

/// Renders the registered time claims relative to `now`. An elapsed `exp`
/// and a future `nbf` are flagged.
pub(crate) fn time_lines(payload: &Value, now: DateTime<Utc>) -> Vec<TimeLine> {
    let mut lines = Vec::new();
    for (key, label) in [("iat", "Issued"), ("nbf", "Not before"), ("exp", "Expires")] {
        let Some(secs) = payload.get(key).and_then(Value::as_i64) else {
            continue;
        };
        let Some(instant) = DateTime::from_timestamp(secs, 0) else {
            continue;
        };
        let delta = instant.signed_duration_since(now).num_seconds();
        let stamp = instant.to_rfc3339_opts(SecondsFormat::Secs, true);
        let (text, warn) = if key == "exp" && delta < 0 {
            (format!("{label} {stamp} (expired {} ago)", humanize_secs(delta)), true)
        } else if key == "nbf" && delta > 0 {
            (
                format!("{label} {stamp} (not valid for another {})", humanize_secs(delta)),
                true,
            )
        } else if delta < 0 {
            (format!("{label} {stamp} ({} ago)", humanize_secs(delta)), false)
        } else {
            (format!("{label} {stamp} (in {})", humanize_secs(delta)), false)
        };
        lines.push(TimeLine { text, warn });
    }
    lines
}

fn pretty(value: &Value) -> String {
    serde_json::to_string_pretty(value).expect("pretty-printing a parsed Value cannot fail")
}

#[derive(Clone, Default)]
pub struct JwtInspectorState {
    pub token: String,
    pub meta: String,
    pub header: String,
    pub payload: String,
    pub time_lines: Vec<TimeLine>,
    pub error: Option<String>,
}

impl JwtInspectorState {
    fn clear_outputs(&mut self) {
        self.meta.clear();
        self.header.clear();
        self.payload.clear();
        self.time_lines.clear();
    }

    pub fn recompute(&mut self) {
        self.error = None;
        if self.token.trim().is_empty() {
            self.clear_outputs();
            return;
        }
        match decode_jwt(&self.token) {
            Ok(jwt) => {
                self.meta = meta_line(&jwt);
                self.header = pretty(&jwt.header);
                self.payload = pretty(&jwt.payload);
                self.time_lines = time_lines(&jwt.payload, Utc::now());
            }
            Err(err) => {
                self.clear_outputs();
                self.error = Some(err.to_string());
            }
        }
    }
}

#[derive(Default)]
pub struct JwtInspectorTool;

impl Tool for JwtInspectorTool {
    fn id(&self) -> ToolId {
        ToolId::JwtInspector
    }

    fn name(&self) -> &'static str {
        "JWT Inspector"
    }

    fn description(&self) -> &'static str {
        "Decode a JSON Web Token's header and payload and check its time claims"
    }

    fn category(&self) -> ToolCategory {
        ToolCategory::Crypto
    }

    fn keywords(&self) -> &'static [&'static str] {
        &["jwt", "token", "claims", "bearer", "oidc"]
    }

    fn ui(&mut self, ui: &mut egui::Ui, ctx: &mut ToolCtx<'_>) {
        let (mut state, setter) = ctx.state::<JwtInspectorState>();
        let mut changed = false;

        ui.horizontal(|ui| {
            ui.strong("Token");
            if ui.button("Load sample").clicked() {
                state.token = SAMPLE.to_owned();
                changed = true;
            }
        });
        changed |= ui
            .add(
                egui::TextEdit::multiline(&mut state.token)
                    .font(TextStyle::Monospace)
                    .desired_rows(4)
                    .desired_width(f32::INFINITY)
                    .hint_text("header.payload.signature"),
            )
            .changed();
        ui.weak("Decode only. Signatures are never verified here.");

        if changed {
            state.recompute();
        }

        if let Some(error) = &state.error {
            ui.colored_label(ui.visuals().error_fg_color, error);
        } else if !state.meta.is_empty() {
            ui.add_space(4.0);
            ui.monospace(&state.meta);
            for line in &state.time_lines {
                if line.warn {
                    ui.colored_label(ui.visuals().warn_fg_color, &line.text);
                } else {
                    ui.weak(&line.text);
                }
            }

            ui.add_space(4.0);
            if OutputText::new(&state.header).label("Header").rows(4).show(ui).copied {
                ctx.success("Copied header");
            }
            ui.add_space(4.0);
            if OutputText::new(&state.payload).label("Payload").rows(8).show(ui).copied {
                ctx.success("Copied payload");
            }
        }

        if changed {
            setter.set(state);
        }
    }
}
