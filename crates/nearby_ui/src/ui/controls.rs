//! Sidebar: search controls, status, quick analysis and the result list.

use eframe::egui;
use nearby_core::places::{PlaceType, MAX_RADIUS_M, MIN_RADIUS_M, RADIUS_STEP_M};

use crate::app::NearbyApp;
use crate::ui::analysis::render_quick_analysis;
use crate::ui::results::render_results;
use crate::ui::utils::alert_color;

pub fn render_sidebar(ui: &mut egui::Ui, app: &mut NearbyApp) {
    ui.heading("Nearby Services Map");
    ui.label("Find pharmacies, ATMs, hospitals and more around you.");
    ui.separator();

    if let Some(warning) = app.availability.warning() {
        ui.colored_label(alert_color(), warning);
        ui.separator();
    }

    render_search_controls(ui, app);
    ui.separator();
    render_quick_analysis(ui, app);
    ui.separator();
    render_results(ui, app);
}

fn render_search_controls(ui: &mut egui::Ui, app: &mut NearbyApp) {
    ui.horizontal(|ui| {
        ui.label("Type");
        egui::ComboBox::from_id_salt("place_type")
            .selected_text(app.place_type.label())
            .show_ui(ui, |ui| {
                for kind in PlaceType::BUILT_IN {
                    let label = kind.label().to_string();
                    ui.selectable_value(&mut app.place_type, kind, label);
                }
            });
    });

    ui.horizontal(|ui| {
        ui.label("Radius");
        ui.add(
            egui::Slider::new(&mut app.radius_m, MIN_RADIUS_M..=MAX_RADIUS_M)
                .step_by(f64::from(RADIUS_STEP_M))
                .suffix(" m"),
        );
    });

    ui.horizontal(|ui| {
        let searching = app.session.is_searching();
        let label = if searching { "Searching…" } else { "Find Nearby" };
        if ui
            .add_enabled(app.session.can_search(), egui::Button::new(label))
            .clicked()
        {
            app.find_nearby();
        }
        if ui
            .add_enabled(app.session.reference().is_some(), egui::Button::new("Center on me"))
            .clicked()
        {
            app.center_on_me();
        }
    });

    ui.label(app.status_line());
    if let Some(reference) = app.session.reference() {
        ui.small(format!("You are at {reference}"));
    }
    if let Some(message) = &app.last_error {
        ui.colored_label(alert_color(), message);
    }
}
