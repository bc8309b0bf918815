use std::collections::BTreeSet;

use crate::panels;
use crate::state::{StateEvent, StateObserver, StateProvider};
use crate::tool::{Tool, ToolCtx, ToolId};
use crate::tools;
use crate::widgets::ToastQueue;

/// Store observer that wakes the UI on every state write, so a change made
/// late in a frame still paints on the next one.
struct RepaintOnChange {
    egui_ctx: egui::Context,
}

impl StateObserver for RepaintOnChange {
    fn state_changed(&mut self, _event: &StateEvent) {
        self.egui_ctx.request_repaint();
    }
}

/// We derive Deserialize/Serialize so we can persist navigation preferences
/// on shutdown. Tool state itself stays session-only in the store.
#[derive(serde::Deserialize, serde::Serialize)]
#[serde(default)] // if we add new fields, give them default values when deserializing old state
pub struct ToolbenchApp {
    active_tool: ToolId,
    favorites: BTreeSet<ToolId>,
    #[serde(skip)]
    search: String,
    #[serde(skip)]
    states: StateProvider,
    #[serde(skip)]
    tools: Vec<Box<dyn Tool>>,
    #[serde(skip)]
    toasts: ToastQueue,
}

impl Default for ToolbenchApp {
    fn default() -> Self {
        Self {
            active_tool: ToolId::default(),
            favorites: BTreeSet::new(),
            search: String::new(),
            states: StateProvider::new(),
            tools: tools::all_tools(),
            toasts: ToastQueue::new(),
        }
    }
}

impl ToolbenchApp {
    /// Called once before the first frame.
    pub fn new(cc: &eframe::CreationContext<'_>) -> Self {
        let mut app: ToolbenchApp = cc
            .storage
            .and_then(|storage| eframe::get_value(storage, eframe::APP_KEY))
            .unwrap_or_default();

        // Skipped fields come back empty from storage, so rebuild them.
        if app.tools.is_empty() {
            app.tools = tools::all_tools();
        }

        let egui_ctx = cc.egui_ctx.clone();
        app.states
            .with(|store| store.subscribe(Box::new(RepaintOnChange { egui_ctx })));

        log::info!(
            "toolbench {} starting with {} tools, active tool {:?}",
            env!("CARGO_PKG_VERSION"),
            app.tools.len(),
            app.active_tool
        );
        app
    }

    pub fn active_tool(&self) -> ToolId {
        self.active_tool
    }

    pub fn set_active_tool(&mut self, id: ToolId) {
        if self.active_tool != id {
            log::info!("switching active tool to {id:?}");
            self.active_tool = id;
        }
    }

    pub fn tools(&self) -> &[Box<dyn Tool>] {
        &self.tools
    }

    pub fn is_favorite(&self, id: ToolId) -> bool {
        self.favorites.contains(&id)
    }

    pub fn toggle_favorite(&mut self, id: ToolId) {
        if !self.favorites.insert(id) {
            self.favorites.remove(&id);
        }
    }

    pub fn favorites(&self) -> &BTreeSet<ToolId> {
        &self.favorites
    }

    pub fn search(&self) -> &str {
        &self.search
    }

    pub fn search_mut(&mut self) -> &mut String {
        &mut self.search
    }

    /// The provider owning the per-tool state store.
    pub fn states(&self) -> &StateProvider {
        &self.states
    }

    /// Name and description of the active tool.
    pub fn active_tool_card(&self) -> Option<(&'static str, &'static str)> {
        self.tools
            .iter()
            .find(|t| t.id() == self.active_tool)
            .map(|t| (t.name(), t.description()))
    }

    /// Renders the active tool into `ui` with a context scoped to its id.
    pub fn show_active_tool(&mut self, ui: &mut egui::Ui) {
        let access = self.states.access();
        let active = self.active_tool;
        if let Some(tool) = self.tools.iter_mut().find(|t| t.id() == active) {
            let mut ctx = ToolCtx::new(active, &access, &mut self.toasts);
            tool.ui(ui, &mut ctx);
        }
    }
}

impl eframe::App for ToolbenchApp {
    /// Called by the framework to save state before shutdown.
    fn save(&mut self, storage: &mut dyn eframe::Storage) {
        eframe::set_value(storage, eframe::APP_KEY, self);
    }

    /// Called each time the UI needs repainting, which may be many times per second.
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        panels::nav_panel(self, ctx);
        panels::workspace(self, ctx);
        self.toasts.show(ctx);
    }
}
