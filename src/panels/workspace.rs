use crate::ToolbenchApp;

/// Central panel hosting the active tool, with a header naming it.
pub fn workspace(app: &mut ToolbenchApp, ctx: &egui::Context) {
    egui::CentralPanel::default().show(ctx, |ui| {
        let active = app.active_tool();
        if let Some((name, description)) = app.active_tool_card() {
            ui.horizontal(|ui| {
                ui.heading(name);
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    let star = if app.is_favorite(active) { "★" } else { "☆" };
                    if ui.button(star).on_hover_text("Pin to favorites").clicked() {
                        app.toggle_favorite(active);
                    }
                });
            });
            ui.weak(description);
            ui.separator();
        }

        egui::ScrollArea::vertical().auto_shrink(false).show(ui, |ui| {
            app.show_active_tool(ui);
        });
    });
}
