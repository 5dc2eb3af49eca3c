//! Quick analysis block and the distance histogram.

use eframe::egui;
use egui_plot::{Bar, BarChart, Plot};
use nearby_core::analysis::{distance_histogram, DistanceBucket};

use crate::app::NearbyApp;
use crate::ui::constants::HISTOGRAM_BUCKET_M;
use crate::ui::utils::marker_color;

pub fn render_quick_analysis(ui: &mut egui::Ui, app: &NearbyApp) {
    let analysis = app.session.analysis();
    ui.strong("Quick analysis");
    egui::Grid::new("quick_analysis")
        .num_columns(2)
        .striped(true)
        .show(ui, |ui| {
            ui.label("Found");
            ui.label(analysis.found.to_string());
            ui.end_row();
            ui.label("Within 500m");
            ui.label(analysis.within_500m.to_string());
            ui.end_row();
            ui.label("Within 1km");
            ui.label(analysis.within_1km.to_string());
            ui.end_row();
            ui.label("Closest");
            ui.label(analysis.closest_name.as_deref().unwrap_or("—"));
            ui.end_row();
        });

    let buckets = distance_histogram(app.session.results(), HISTOGRAM_BUCKET_M);
    if buckets.is_empty() {
        return;
    }
    Plot::new("distance_histogram")
        .height(120.0)
        .allow_drag(false)
        .allow_zoom(false)
        .allow_scroll(false)
        .x_axis_formatter(|mark, _| format!("{} m", mark.value as i64))
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(
                BarChart::new("Places per 250 m", histogram_bars(&buckets)).color(marker_color()),
            );
        });
}

/// One bar per bucket, centred on the bucket's midpoint.
pub fn histogram_bars(buckets: &[DistanceBucket]) -> Vec<Bar> {
    let width = HISTOGRAM_BUCKET_M as f64;
    buckets
        .iter()
        .map(|bucket| {
            Bar::new(bucket.lower_m as f64 + width / 2.0, bucket.count as f64).width(width * 0.9)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bars_sit_on_bucket_midpoints() {
        let buckets = [
            DistanceBucket { lower_m: 0, count: 2 },
            DistanceBucket { lower_m: 250, count: 0 },
            DistanceBucket { lower_m: 500, count: 1 },
        ];
        let bars = histogram_bars(&buckets);
        let points: Vec<(f64, f64)> = bars.iter().map(|bar| (bar.argument, bar.value)).collect();
        assert_eq!(points, [(125.0, 2.0), (375.0, 0.0), (625.0, 1.0)]);
    }
}
