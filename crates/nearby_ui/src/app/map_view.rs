//! Map viewport: Web Mercator projection, owned markers and click queue.

use std::f64::consts::PI;

use nearby_core::geo::{Bounds, Coordinate};
use nearby_core::providers::{MapMarker, MapRenderer, FOCUS_ZOOM};

const TILE_SIZE: f64 = 256.0;
const MAX_LAT: f64 = 85.05112878;
pub const MIN_ZOOM: u8 = 2;
pub const MAX_ZOOM: u8 = 19;
/// Fraction of the viewport a fitted box may occupy.
const FIT_PADDING: f64 = 0.85;

/// Position in world pixels at `zoom` (origin top-left of the Mercator square).
pub fn world_px(point: Coordinate, zoom: u8) -> (f64, f64) {
    let scale = TILE_SIZE * f64::from(1u32 << zoom);
    let lat = point.lat().clamp(-MAX_LAT, MAX_LAT).to_radians();
    let x = (point.lng() + 180.0) / 360.0 * scale;
    let y = (1.0 - (lat.tan() + 1.0 / lat.cos()).ln() / PI) * 0.5 * scale;
    (x, y)
}

pub fn from_world_px(x: f64, y: f64, zoom: u8) -> Coordinate {
    let scale = TILE_SIZE * f64::from(1u32 << zoom);
    let lng = x / scale * 360.0 - 180.0;
    let n = PI * (1.0 - 2.0 * y / scale);
    let lat = n.sinh().atan().to_degrees();
    Coordinate::new(lat, lng)
}

/// Highest zoom at which `bounds` fits in a `width` x `height` viewport.
pub fn fit_zoom(bounds: &Bounds, width: f64, height: f64) -> u8 {
    let nw = Coordinate::new(bounds.lat_max, bounds.lng_min);
    let se = Coordinate::new(bounds.lat_min, bounds.lng_max);
    let mut chosen = MIN_ZOOM;
    for zoom in MIN_ZOOM..=MAX_ZOOM {
        let (x0, y0) = world_px(nw, zoom);
        let (x1, y1) = world_px(se, zoom);
        if (x1 - x0) <= width * FIT_PADDING && (y1 - y0) <= height * FIT_PADDING {
            chosen = zoom;
        } else {
            break;
        }
    }
    chosen
}

pub struct MapView {
    center: Coordinate,
    zoom: u8,
    viewport: (f64, f64),
    markers: Vec<MapMarker>,
    pending_clicks: Vec<String>,
}

impl MapView {
    pub fn new(center: Coordinate, zoom: u8) -> Self {
        Self {
            center,
            zoom: zoom.clamp(MIN_ZOOM, MAX_ZOOM),
            viewport: (800.0, 600.0),
            markers: Vec::new(),
            pending_clicks: Vec::new(),
        }
    }

    pub fn center(&self) -> Coordinate {
        self.center
    }

    pub fn zoom(&self) -> u8 {
        self.zoom
    }

    pub fn markers(&self) -> &[MapMarker] {
        &self.markers
    }

    /// Record the painted size so later fits use the real viewport.
    pub fn set_viewport(&mut self, width: f64, height: f64) {
        if width > 0.0 && height > 0.0 {
            self.viewport = (width, height);
        }
    }

    /// Offset of `point` from the viewport center, in screen pixels.
    pub fn screen_offset(&self, point: Coordinate) -> (f64, f64) {
        let (cx, cy) = world_px(self.center, self.zoom);
        let (px, py) = world_px(point, self.zoom);
        (px - cx, py - cy)
    }

    /// Coordinate under a screen offset from the viewport center.
    pub fn coordinate_at(&self, dx: f64, dy: f64) -> Coordinate {
        let (cx, cy) = world_px(self.center, self.zoom);
        from_world_px(cx + dx, cy + dy, self.zoom)
    }

    /// Move the view by a screen-space drag.
    pub fn pan_by(&mut self, dx: f64, dy: f64) {
        self.center = self.coordinate_at(-dx, -dy);
    }

    pub fn zoom_by(&mut self, steps: i32) {
        let next = i32::from(self.zoom) + steps;
        self.zoom = next.clamp(i32::from(MIN_ZOOM), i32::from(MAX_ZOOM)) as u8;
    }

    pub fn pan_to(&mut self, center: Coordinate) {
        self.center = center;
    }

    /// Queue a marker click for the presentation layer.
    pub fn click_marker(&mut self, place_id: &str) {
        self.pending_clicks.push(place_id.to_string());
    }

    /// Marker closest to a screen offset, within `radius_px`.
    pub fn marker_near(&self, dx: f64, dy: f64, radius_px: f64) -> Option<&MapMarker> {
        self.markers
            .iter()
            .map(|marker| {
                let (mx, my) = self.screen_offset(marker.coordinate);
                (marker, (mx - dx).hypot(my - dy))
            })
            .filter(|(_, dist)| *dist <= radius_px)
            .min_by(|a, b| a.1.total_cmp(&b.1))
            .map(|(marker, _)| marker)
    }
}

impl MapRenderer for MapView {
    fn set_view(&mut self, center: Coordinate, zoom: u8) {
        self.center = center;
        self.zoom = zoom.clamp(MIN_ZOOM, MAX_ZOOM);
    }

    fn set_markers(&mut self, markers: Vec<MapMarker>) {
        self.markers = markers;
    }

    fn fit_bounds(&mut self, bounds: Bounds) {
        let (width, height) = self.viewport;
        self.zoom = fit_zoom(&bounds, width, height);
        self.center = bounds.center();
    }

    fn focus(&mut self, center: Coordinate) {
        self.center = center;
        self.zoom = FOCUS_ZOOM;
    }

    fn drain_clicks(&mut self) -> Vec<String> {
        std::mem::take(&mut self.pending_clicks)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-6
    }

    #[test]
    fn projection_round_trips() {
        let point = Coordinate::new(26.8206, 30.8025);
        let (x, y) = world_px(point, 12);
        let back = from_world_px(x, y, 12);
        assert!(close(back.lat(), point.lat()));
        assert!(close(back.lng(), point.lng()));
    }

    #[test]
    fn origin_is_world_center() {
        let (x, y) = world_px(Coordinate::new(0.0, 0.0), 0);
        assert!(close(x, 128.0));
        assert!(close(y, 128.0));
    }

    #[test]
    fn fit_zoom_shrinks_for_wider_boxes() {
        let small = Bounds::from_coordinates([
            Coordinate::new(26.82, 30.80),
            Coordinate::new(26.83, 30.81),
        ])
        .unwrap();
        let large = Bounds::from_coordinates([
            Coordinate::new(26.5, 30.5),
            Coordinate::new(27.0, 31.0),
        ])
        .unwrap();
        let small_zoom = fit_zoom(&small, 800.0, 600.0);
        let large_zoom = fit_zoom(&large, 800.0, 600.0);
        assert!(small_zoom > large_zoom);

        let (nw_x, nw_y) = world_px(Coordinate::new(27.0, 30.5), large_zoom);
        let (se_x, se_y) = world_px(Coordinate::new(26.5, 31.0), large_zoom);
        assert!(se_x - nw_x <= 800.0 && se_y - nw_y <= 600.0);
    }

    #[test]
    fn single_point_fit_uses_max_zoom() {
        let point = Bounds::around(Coordinate::new(1.0, 1.0));
        assert_eq!(fit_zoom(&point, 800.0, 600.0), MAX_ZOOM);
    }

    #[test]
    fn markers_are_replaced_and_clicks_drained() {
        let mut view = MapView::new(Coordinate::new(0.0, 0.0), 14);
        view.set_markers(vec![MapMarker {
            place_id: "a".to_string(),
            coordinate: Coordinate::new(0.0, 0.0),
            label: "1".to_string(),
        }]);
        view.set_markers(Vec::new());
        assert!(view.markers().is_empty());

        view.click_marker("a");
        assert_eq!(view.drain_clicks(), vec!["a".to_string()]);
        assert!(view.drain_clicks().is_empty());
    }

    #[test]
    fn marker_near_picks_closest_within_radius() {
        let mut view = MapView::new(Coordinate::new(0.0, 0.0), 16);
        view.set_markers(vec![
            MapMarker {
                place_id: "center".to_string(),
                coordinate: Coordinate::new(0.0, 0.0),
                label: "1".to_string(),
            },
            MapMarker {
                place_id: "east".to_string(),
                coordinate: Coordinate::new(0.0, 0.001),
                label: "2".to_string(),
            },
        ]);
        assert_eq!(
            view.marker_near(1.0, 1.0, 10.0).map(|m| m.place_id.as_str()),
            Some("center")
        );
        assert!(view.marker_near(-300.0, 0.0, 10.0).is_none());
    }

    #[test]
    fn pan_moves_center_opposite_to_drag() {
        let mut view = MapView::new(Coordinate::new(10.0, 10.0), 10);
        view.pan_by(100.0, 0.0);
        assert!(view.center().lng() < 10.0);
        view.zoom_by(50);
        assert_eq!(view.zoom(), MAX_ZOOM);
    }
}
