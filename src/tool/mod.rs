use egui::Ui;
use serde::{Deserialize, Serialize};

use crate::state::{StateAccess, StateSetter};
use crate::widgets::ToastQueue;

/// Stable identifier of one tool widget.
///
/// This is the key of the per-tool state store: one variant per tool, and at
/// most one state value tracked per variant at any time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ToolId {
    Base64Text,
    CaseConverter,
    ColorConverter,
    HashDigest,
    HtmlEntities,
    ImageDataUri,
    JsonFormatter,
    JwtInspector,
    LoremIpsum,
    NumberBase,
    RegexTester,
    Timestamp,
    UuidGenerator,
}

impl ToolId {
    /// Every tool id, in the order the registry instantiates them. The
    /// navigation panel regroups this list by category.
    pub const ALL: [ToolId; 13] = [
        ToolId::Base64Text,
        ToolId::CaseConverter,
        ToolId::ColorConverter,
        ToolId::HashDigest,
        ToolId::HtmlEntities,
        ToolId::ImageDataUri,
        ToolId::JsonFormatter,
        ToolId::JwtInspector,
        ToolId::LoremIpsum,
        ToolId::NumberBase,
        ToolId::RegexTester,
        ToolId::Timestamp,
        ToolId::UuidGenerator,
    ];
}

impl Default for ToolId {
    fn default() -> Self {
        ToolId::JsonFormatter
    }
}

/// Navigation grouping for the tool list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ToolCategory {
    Encoders,
    Converters,
    TextData,
    Generators,
    Crypto,
    Media,
}

impl ToolCategory {
    /// Categories in the order the navigation panel lists them.
    pub const ALL: [ToolCategory; 6] = [
        ToolCategory::Encoders,
        ToolCategory::Converters,
        ToolCategory::TextData,
        ToolCategory::Generators,
        ToolCategory::Crypto,
        ToolCategory::Media,
    ];

    pub fn label(self) -> &'static str {
        match self {
            ToolCategory::Encoders => "Encoders & Decoders",
            ToolCategory::Converters => "Converters",
            ToolCategory::TextData => "Text & Data",
            ToolCategory::Generators => "Generators",
            ToolCategory::Crypto => "Crypto",
            ToolCategory::Media => "Media",
        }
    }
}

/// Interface every tool widget implements.
///
/// Tools are stateless renderers: everything that should survive switching
/// away and back lives in the state store, reached through the [`ToolCtx`]
/// passed into [`ui`](Tool::ui). A tool writes back through its setter only
/// when the user actually changed something.
pub trait Tool {
    /// The id under which this tool's state is tracked.
    fn id(&self) -> ToolId;

    /// Human-readable name shown in navigation and the workspace header.
    fn name(&self) -> &'static str;

    /// One-line description shown under the name.
    fn description(&self) -> &'static str;

    fn category(&self) -> ToolCategory;

    /// Extra terms the navigation search should match besides the name.
    fn keywords(&self) -> &'static [&'static str] {
        &[]
    }

    /// Renders the tool into the workspace panel.
    fn ui(&mut self, ui: &mut Ui, ctx: &mut ToolCtx<'_>);
}

/// Per-frame context handed to the active tool.
///
/// Bundles the pieces of the shell a tool may touch: its own state slice
/// (scoped by the tool's id, so a tool cannot reach another tool's slot) and
/// the toast queue.
pub struct ToolCtx<'a> {
    id: ToolId,
    states: &'a StateAccess,
    toasts: &'a mut ToastQueue,
}

impl<'a> ToolCtx<'a> {
    pub fn new(id: ToolId, states: &'a StateAccess, toasts: &'a mut ToastQueue) -> Self {
        Self { id, states, toasts }
    }

    pub fn id(&self) -> ToolId {
        self.id
    }

    /// Current state for this tool plus a setter bound to its id, adopting
    /// `T::default()` on first use.
    pub fn state<T>(&self) -> (T, StateSetter<T>)
    where
        T: Clone + Default + 'static,
    {
        self.states.use_state(self.id)
    }

    /// As [`state`](Self::state), with an explicit initial value.
    pub fn state_or<T, F>(&self, initial: F) -> (T, StateSetter<T>)
    where
        T: Clone + 'static,
        F: FnOnce() -> T,
    {
        self.states.use_state_or(self.id, initial)
    }

    pub fn success(&mut self, message: impl Into<String>) {
        self.toasts.success(message);
    }

    pub fn error(&mut self, message: impl Into<String>) {
        self.toasts.error(message);
    }

    pub fn info(&mut self, message: impl Into<String>) {
        self.toasts.info(message);
    }
}
