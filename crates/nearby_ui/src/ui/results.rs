//! Ranked result list.

use eframe::egui;

use crate::app::NearbyApp;
use crate::ui::constants::MAX_LISTED_RESULTS;
use crate::ui::utils::format_place_meta;

pub fn render_results(ui: &mut egui::Ui, app: &mut NearbyApp) {
    ui.strong("Results");
    let results = app.session.results();
    if results.is_empty() {
        ui.label("No results yet — press \"Find Nearby\"");
        return;
    }

    let selected = app.session.selection().map(str::to_string);
    let mut clicked: Option<String> = None;
    egui::ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui| {
            for (idx, place) in results.iter().take(MAX_LISTED_RESULTS).enumerate() {
                let is_selected = selected.as_deref() == Some(place.id());
                let title = format!("{}. {}", idx + 1, place.name());
                let response = ui.selectable_label(is_selected, egui::RichText::new(title).strong());
                if !place.vicinity().is_empty() {
                    ui.small(place.vicinity());
                }
                ui.small(format_place_meta(place));
                ui.add_space(4.0);
                if response.clicked() {
                    clicked = Some(place.id().to_string());
                }
            }
        });

    if let Some(place_id) = clicked {
        app.focus_place(&place_id);
    }
}
