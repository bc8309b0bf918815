use egui::TextStyle;
use sha2::{Digest, Sha224, Sha256, Sha384, Sha512};

use crate::tool::{Tool, ToolCategory, ToolCtx, ToolId};
use crate::widgets::OutputText;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HashAlgorithm {
    Sha224,
    Sha256,
    Sha384,
    Sha512,
}

impl HashAlgorithm {
    pub const ALL: [HashAlgorithm; 4] = [
        HashAlgorithm::Sha224,
        HashAlgorithm::Sha256,
        HashAlgorithm::Sha384,
        HashAlgorithm::Sha512,
    ];

    fn label(self) -> &'static str {
        match self {
            HashAlgorithm::Sha224 => "SHA-224",
            HashAlgorithm::Sha256 => "SHA-256",
            HashAlgorithm::Sha384 => "SHA-384",
            HashAlgorithm::Sha512 => "SHA-512",
        }
    }

    fn bits(self) -> usize {
        match self {
            HashAlgorithm::Sha224 => 224,
            HashAlgorithm::Sha256 => 256,
            HashAlgorithm::Sha384 => 384,
            HashAlgorithm::Sha512 => 512,
        }
    }
}

#[derive(Clone)]
pub struct HashDigestState {
    pub input: String,
    pub algorithm: HashAlgorithm,
    pub uppercase: bool,
    pub output: String,
}

impl Default for HashDigestState {
    fn default() -> Self {
        let mut state = Self {
            input: String::new(),
            algorithm: HashAlgorithm::Sha256,
            uppercase: false,
            output: String::new(),
        };
        // The digest of "" is well defined, show it from the start.
        state.recompute();
        state
    }
}

impl HashDigestState {
    pub fn recompute(&mut self) {
        let hex = digest_hex(self.input.as_bytes(), self.algorithm);
        self.output = if self.uppercase { hex.to_uppercase() } else { hex };
    }
}

fn hex_of<D: Digest>(data: &[u8]) -> String {
    hex::encode(D::digest(data))
}

pub(crate) fn digest_hex(data: &[u8], algorithm: HashAlgorithm) -> String {
    match algorithm {
        HashAlgorithm::Sha224 => hex_of::<Sha224>(data),
        HashAlgorithm::Sha256 => hex_of::<Sha256>(data),
        HashAlgorithm::Sha384 => hex_of::<Sha384>(data),
        HashAlgorithm::Sha512 => hex_of::<Sha512>(data),
    }
}

#[derive(Default)]
pub struct HashDigestTool;

impl Tool for HashDigestTool {
    fn id(&self) -> ToolId {
        ToolId::HashDigest
    }

    fn name(&self) -> &'static str {
        "Hash Digest"
    }

    fn description(&self) -> &'static str {
        "Compute SHA-2 digests of text as hex"
    }

    fn category(&self) -> ToolCategory {
        ToolCategory::Crypto
    }

    fn keywords(&self) -> &'static [&'static str] {
        &["sha256", "sha512", "checksum", "fingerprint"]
    }

    fn ui(&mut self, ui: &mut egui::Ui, ctx: &mut ToolCtx<'_>) {
        let (mut state, setter) = ctx.state::<HashDigestState>();
        let mut changed = false;

        ui.horizontal(|ui| {
            egui::ComboBox::from_id_salt("hash_algorithm")
                .selected_text(state.algorithm.label())
                .show_ui(ui, |ui| {
                    for algorithm in HashAlgorithm::ALL {
                        changed |= ui
                            .selectable_value(&mut state.algorithm, algorithm, algorithm.label())
                            .changed();
                    }
                });
            changed |= ui.checkbox(&mut state.uppercase, "Uppercase").changed();
        });

        ui.add_space(4.0);
        ui.strong("Input");
        changed |= ui
            .add(
                egui::TextEdit::multiline(&mut state.input)
                    .font(TextStyle::Monospace)
                    .desired_rows(6)
                    .desired_width(f32::INFINITY)
                    .hint_text("Text to hash"),
            )
            .changed();

        if changed {
            state.recompute();
        }

        ui.add_space(4.0);
        if OutputText::new(&state.output)
            .label(state.algorithm.label())
            .rows(2)
            .show(ui)
            .copied
        {
            ctx.success("Copied to clipboard");
        }
        ui.weak(format!(
            "{} hex chars, {} bits",
            state.output.len(),
            state.algorithm.bits()
        ));

        if changed {
            setter.set(state);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sha256_matches_known_vectors() {
        assert_eq!(
            digest_hex(b"abc", HashAlgorithm::Sha256),
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
        assert_eq!(
            digest_hex(b"", HashAlgorithm::Sha256),
            "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
        );
    }

    #[test]
    fn wider_variants_match_known_vectors() {
        assert_eq!(
            digest_hex(b"abc", HashAlgorithm::Sha224),
            "23097d223405d8228642a477bda255b32aadbce4bda0b3f7e36c9da7"
        );
        assert_eq!(
            digest_hex(b"abc", HashAlgorithm::Sha384),
            "cb00753f45a35e8bb5a03d699ac65007272c32ab0eded1631a8b605a43ff5bed\
             8086072ba1e7cc2358baeca134c825a7"
        );
        assert_eq!(
            digest_hex(b"abc", HashAlgorithm::Sha512),
            "ddaf35a193617abacc417349ae20413112e6fa4e89a97ea20a9eeee64b55d39a\
             2192992a274fc1a836ba3c23a3feebbd454d4423643ce80e2a9ac94fa54ca49f"
        );
    }

    #[test]
    fn default_state_carries_the_empty_digest() {
        let state = HashDigestState::default();
        assert_eq!(
            state.output,
            "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
        );
    }

    #[test]
    fn uppercase_toggle_changes_only_case() {
        let mut state = HashDigestState {
            input: String::from("abc"),
            uppercase: true,
            ..Default::default()
        };
        state.recompute();
        assert_eq!(
            state.output,
            "BA7816BF8F01CFEA414140DE5DAE2223B00361A396177A9CB410FF61F20015AD"
        );
    }
}
