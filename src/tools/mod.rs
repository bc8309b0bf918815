//! The tool implementations and the registry that instantiates them.
//!
//! Every tool is a stateless [`Tool`] value plus a `Clone`able state struct
//! tracked in the per-tool state store under the tool's [`ToolId`].

use crate::tool::{Tool, ToolId};

mod base64_text;
mod case_converter;
mod color_converter;
mod hash_digest;
mod html_entities;
mod image_data_uri;
mod json_formatter;
mod jwt_inspector;
mod lorem_ipsum;
mod number_base;
mod regex_tester;
mod timestamp;
mod uuid_generator;

pub use base64_text::{Base64Alphabet, Base64Mode, Base64TextState, Base64TextTool};
pub use case_converter::{CaseConverterState, CaseConverterTool, CaseStyle};
pub use color_converter::{ColorConverterState, ColorConverterTool, ColorParseError};
pub use hash_digest::{HashAlgorithm, HashDigestState, HashDigestTool};
pub use html_entities::{HtmlEntitiesState, HtmlEntitiesTool, HtmlMode};
pub use image_data_uri::{
    ImageDataUriState, ImageDataUriTool, ImageReadError, ImageReport, MAX_IMAGE_BYTES,
};
pub use json_formatter::{JsonFormatterState, JsonFormatterTool, JsonIndent, JsonStyle};
pub use jwt_inspector::{DecodedJwt, JwtError, JwtInspectorState, JwtInspectorTool, TimeLine};
pub use lorem_ipsum::{LoremIpsumState, LoremIpsumTool};
pub use number_base::{NumberBase, NumberBaseError, NumberBaseState, NumberBaseTool};
pub use regex_tester::{GroupReport, MatchReport, RegexFlags, RegexTesterState, RegexTesterTool};
pub use timestamp::{TimestampError, TimestampState, TimestampTool};
pub use uuid_generator::{UuidFormat, UuidGeneratorState, UuidGeneratorTool};

/// Instantiates the tool behind an id.
pub fn tool_for(id: ToolId) -> Box<dyn Tool> {
    match id {
        ToolId::Base64Text => Box::new(Base64TextTool::default()),
        ToolId::CaseConverter => Box::new(CaseConverterTool::default()),
        ToolId::ColorConverter => Box::new(ColorConverterTool::default()),
        ToolId::HashDigest => Box::new(HashDigestTool::default()),
        ToolId::HtmlEntities => Box::new(HtmlEntitiesTool::default()),
        ToolId::ImageDataUri => Box::new(ImageDataUriTool::default()),
        ToolId::JsonFormatter => Box::new(JsonFormatterTool::default()),
        ToolId::JwtInspector => Box::new(JwtInspectorTool::default()),
        ToolId::LoremIpsum => Box::new(LoremIpsumTool::default()),
        ToolId::NumberBase => Box::new(NumberBaseTool::default()),
        ToolId::RegexTester => Box::new(RegexTesterTool::default()),
        ToolId::Timestamp => Box::new(TimestampTool::default()),
        ToolId::UuidGenerator => Box::new(UuidGeneratorTool::default()),
    }
}

/// One instance of every tool, in [`ToolId::ALL`] order.
pub fn all_tools() -> Vec<Box<dyn Tool>> {
    ToolId::ALL.into_iter().map(tool_for).collect()
}
