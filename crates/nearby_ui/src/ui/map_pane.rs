//! Map canvas: graticule, reference location, search radius and numbered markers.

use eframe::egui::{self, Align2, Color32, FontId, Pos2, Rect, Stroke};
use nearby_core::geo::Coordinate;

use crate::app::{MapView, NearbyApp};
use crate::ui::constants::{GRID_TARGET_PX, MARKER_HIT_RADIUS_PX, MARKER_RADIUS_PX};
use crate::ui::utils::{
    grid_color, map_background, marker_color, meters_per_pixel, nice_step, radius_color,
    reference_color, selected_marker_color,
};

const MAX_GRID_LINES: usize = 200;

pub fn render_map(ui: &mut egui::Ui, app: &mut NearbyApp) {
    let (rect, response) = ui.allocate_exact_size(ui.available_size(), egui::Sense::click_and_drag());
    app.map
        .set_viewport(f64::from(rect.width()), f64::from(rect.height()));

    if response.dragged() {
        let delta = response.drag_delta();
        app.map.pan_by(f64::from(delta.x), f64::from(delta.y));
    }
    if response.hovered() {
        let scroll = ui.input(|input| input.raw_scroll_delta.y);
        if scroll > 0.0 {
            app.map.zoom_by(1);
        } else if scroll < 0.0 {
            app.map.zoom_by(-1);
        }
    }
    if response.clicked() {
        if let Some(pos) = response.interact_pointer_pos() {
            let offset = pos - rect.center();
            let hit = app
                .map
                .marker_near(f64::from(offset.x), f64::from(offset.y), MARKER_HIT_RADIUS_PX)
                .map(|marker| marker.place_id.clone());
            if let Some(place_id) = hit {
                app.map.click_marker(&place_id);
            }
        }
    }

    let painter = ui.painter_at(rect);
    painter.rect_filled(rect, 0.0, map_background());
    draw_graticule(&painter, &app.map, rect);

    if let Some(reference) = app.session.reference() {
        let center = to_screen(&app.map, rect, reference);
        let radius_px = f64::from(app.session.params().radius_m)
            / meters_per_pixel(reference.lat(), app.map.zoom());
        painter.circle_filled(center, radius_px as f32, radius_color());
        painter.circle_stroke(center, radius_px as f32, Stroke::new(1.0, reference_color()));
        painter.circle_filled(center, 7.0, reference_color());
        painter.circle_stroke(center, 7.0, Stroke::new(2.0, Color32::WHITE));
    }

    let selected = app.session.selection();
    for marker in app.map.markers() {
        let pos = to_screen(&app.map, rect, marker.coordinate);
        if !rect.expand(MARKER_RADIUS_PX).contains(pos) {
            continue;
        }
        let is_selected = selected == Some(marker.place_id.as_str());
        let (fill, radius) = if is_selected {
            (selected_marker_color(), MARKER_RADIUS_PX + 3.0)
        } else {
            (marker_color(), MARKER_RADIUS_PX)
        };
        painter.circle_filled(pos, radius, fill);
        painter.circle_stroke(pos, radius, Stroke::new(1.5, Color32::WHITE));
        painter.text(
            pos,
            Align2::CENTER_CENTER,
            &marker.label,
            FontId::proportional(11.0),
            Color32::WHITE,
        );
    }

    if let Some(place) = app.session.selected_place() {
        let pos = to_screen(&app.map, rect, place.coordinate());
        painter.text(
            pos + egui::vec2(0.0, -MARKER_RADIUS_PX - 10.0),
            Align2::CENTER_BOTTOM,
            place.name(),
            FontId::proportional(13.0),
            Color32::from_gray(20),
        );
    }

    painter.text(
        rect.left_bottom() + egui::vec2(8.0, -6.0),
        Align2::LEFT_BOTTOM,
        format!("{}  z{}", app.map.center(), app.map.zoom()),
        FontId::monospace(11.0),
        Color32::from_gray(90),
    );
}

fn to_screen(map: &MapView, rect: Rect, point: Coordinate) -> Pos2 {
    let (dx, dy) = map.screen_offset(point);
    rect.center() + egui::vec2(dx as f32, dy as f32)
}

/// Parallels and meridians at a round degree spacing.
fn draw_graticule(painter: &egui::Painter, map: &MapView, rect: Rect) {
    let half_w = f64::from(rect.width()) / 2.0;
    let half_h = f64::from(rect.height()) / 2.0;
    let north_west = map.coordinate_at(-half_w, -half_h);
    let south_east = map.coordinate_at(half_w, half_h);
    let lng_span = south_east.lng() - north_west.lng();
    if lng_span <= 0.0 {
        return;
    }
    let step = nice_step(GRID_TARGET_PX * lng_span / f64::from(rect.width()));
    let stroke = Stroke::new(1.0, grid_color());
    let center = map.center();

    let mut lng = (north_west.lng() / step).floor() * step;
    for _ in 0..MAX_GRID_LINES {
        if lng > south_east.lng() {
            break;
        }
        let x = to_screen(map, rect, Coordinate::new(center.lat(), lng)).x;
        painter.line_segment([egui::pos2(x, rect.top()), egui::pos2(x, rect.bottom())], stroke);
        lng += step;
    }

    let mut lat = (south_east.lat() / step).floor() * step;
    for _ in 0..MAX_GRID_LINES {
        if lat > north_west.lat() {
            break;
        }
        let y = to_screen(map, rect, Coordinate::new(lat, center.lng())).y;
        painter.line_segment([egui::pos2(rect.left(), y), egui::pos2(rect.right(), y)], stroke);
        lat += step;
    }
}
