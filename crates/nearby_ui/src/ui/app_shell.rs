use std::time::Duration;

use eframe::egui;
use nearby_core::config::NearbyConfig;

use crate::app::NearbyApp;
use crate::ui::constants::SIDEBAR_WIDTH;
use crate::ui::controls::render_sidebar;
use crate::ui::map_pane::render_map;

pub fn run(config: NearbyConfig) -> eframe::Result<()> {
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default().with_inner_size([1280.0, 800.0]),
        ..Default::default()
    };
    eframe::run_native(
        "Nearby Services Map",
        options,
        Box::new(move |_cc| Ok(Box::new(NearbyApp::new(&config)))),
    )
}

impl eframe::App for NearbyApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.poll();
        if self.has_pending_work() {
            ctx.request_repaint_after(Duration::from_millis(50));
        }

        egui::SidePanel::left("sidebar")
            .resizable(true)
            .default_width(SIDEBAR_WIDTH)
            .show(ctx, |ui| {
                render_sidebar(ui, self);
            });

        egui::CentralPanel::default().show(ctx, |ui| {
            render_map(ui, self);
        });
    }
}
