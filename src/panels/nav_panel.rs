use crate::ToolbenchApp;
use crate::tool::{ToolCategory, ToolId};

/// Case-insensitive match of the search box against a tool's name and
/// keywords. An empty query matches everything.
pub(crate) fn matches_query(name: &str, keywords: &[&str], query: &str) -> bool {
    let query = query.trim().to_lowercase();
    if query.is_empty() {
        return true;
    }
    name.to_lowercase().contains(&query) || keywords.iter().any(|k| k.contains(&query))
}

fn tool_row(app: &mut ToolbenchApp, ui: &mut egui::Ui, id: ToolId, name: &str) {
    ui.horizontal(|ui| {
        let selected = app.active_tool() == id;
        if ui.selectable_label(selected, name).clicked() {
            app.set_active_tool(id);
        }
        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            let star = if app.is_favorite(id) { "★" } else { "☆" };
            if ui
                .small_button(star)
                .on_hover_text("Pin to favorites")
                .clicked()
            {
                app.toggle_favorite(id);
            }
        });
    });
}

pub fn nav_panel(app: &mut ToolbenchApp, ctx: &egui::Context) {
    egui::SidePanel::left("nav_panel")
        .resizable(true)
        .default_width(220.0)
        .show(ctx, |ui| {
            ui.add_space(4.0);
            ui.heading("Toolbench");
            ui.add_space(4.0);
            ui.add(egui::TextEdit::singleline(app.search_mut()).hint_text("🔍 Search tools"));

            let query = app.search().to_owned();

            // Tool lists are collected up front so rows can mutate the app
            // while rendering.
            let favorites: Vec<(ToolId, &'static str)> = app
                .tools()
                .iter()
                .filter(|t| app.is_favorite(t.id()))
                .filter(|t| matches_query(t.name(), t.keywords(), &query))
                .map(|t| (t.id(), t.name()))
                .collect();

            egui::ScrollArea::vertical().auto_shrink(false).show(ui, |ui| {
                let mut any_shown = !favorites.is_empty();

                if !favorites.is_empty() {
                    ui.add_space(6.0);
                    ui.strong("Favorites");
                    for (id, name) in &favorites {
                        tool_row(app, ui, *id, name);
                    }
                }

                for category in ToolCategory::ALL {
                    let rows: Vec<(ToolId, &'static str)> = app
                        .tools()
                        .iter()
                        .filter(|t| t.category() == category)
                        .filter(|t| matches_query(t.name(), t.keywords(), &query))
                        .map(|t| (t.id(), t.name()))
                        .collect();
                    if rows.is_empty() {
                        continue;
                    }
                    any_shown = true;
                    ui.add_space(6.0);
                    ui.strong(category.label());
                    for (id, name) in &rows {
                        tool_row(app, ui, *id, name);
                    }
                }

                if !any_shown {
                    ui.add_space(6.0);
                    ui.weak("Nothing matches the search");
                }

                ui.add_space(8.0);
                ui.separator();
                ui.horizontal(|ui| {
                    egui::widgets::global_theme_preference_buttons(ui);
                });
                ui.weak(format!("toolbench {}", env!("CARGO_PKG_VERSION")));
            });
        });
}

#[cfg(test)]
mod tests {
    use super::matches_query;

    #[test]
    fn empty_query_matches_everything() {
        assert!(matches_query("JSON Formatter", &[], ""));
        assert!(matches_query("JSON Formatter", &[], "   "));
    }

    #[test]
    fn query_is_case_insensitive_on_the_name() {
        assert!(matches_query("JSON Formatter", &[], "json"));
        assert!(matches_query("JSON Formatter", &[], "FORMAT"));
        assert!(!matches_query("JSON Formatter", &[], "yaml"));
    }

    #[test]
    fn keywords_extend_the_match() {
        assert!(matches_query("Timestamp", &["unix", "epoch"], "epoch"));
        assert!(!matches_query("Timestamp", &["unix", "epoch"], "cron"));
    }
}
