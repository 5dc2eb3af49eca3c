//! Utility functions for the UI: formatting, colors, map scale.

use eframe::egui::Color32;
use nearby_core::places::RankedPlace;

use crate::ui::constants::EQUATOR_METERS_PER_PIXEL;

pub fn format_distance(distance_m: u64) -> String {
    format!("{distance_m} m")
}

/// "4.2 ⭐ (31)" for rated places, "No rating" otherwise.
pub fn format_rating(rating: Option<f64>, user_ratings_total: u32) -> String {
    match rating {
        Some(rating) => format!("{rating} ⭐ ({user_ratings_total})"),
        None => "No rating".to_string(),
    }
}

/// Secondary line of a result row: "992 m • 4.2 ⭐ (31)".
pub fn format_place_meta(place: &RankedPlace) -> String {
    format!(
        "{} • {}",
        format_distance(place.distance_m()),
        format_rating(place.rating(), place.user_ratings_total())
    )
}

/// Ground distance covered by one screen pixel at `lat` and `zoom`.
pub fn meters_per_pixel(lat: f64, zoom: u8) -> f64 {
    EQUATOR_METERS_PER_PIXEL * lat.to_radians().cos().abs() / f64::from(1u32 << zoom)
}

/// Round a grid spacing in degrees to 1, 2 or 5 times a power of ten.
pub fn nice_step(raw_deg: f64) -> f64 {
    if raw_deg <= 0.0 || !raw_deg.is_finite() {
        return 1.0;
    }
    let magnitude = 10f64.powf(raw_deg.log10().floor());
    let normalized = raw_deg / magnitude;
    let nice = if normalized < 1.5 {
        1.0
    } else if normalized < 3.5 {
        2.0
    } else if normalized < 7.5 {
        5.0
    } else {
        10.0
    };
    nice * magnitude
}

pub fn map_background() -> Color32 {
    Color32::from_rgb(232, 236, 228)
}

pub fn grid_color() -> Color32 {
    Color32::from_rgb(205, 210, 200)
}

pub fn reference_color() -> Color32 {
    Color32::from_rgb(30, 120, 230)
}

pub fn radius_color() -> Color32 {
    Color32::from_rgba_unmultiplied(30, 120, 230, 40)
}

pub fn marker_color() -> Color32 {
    Color32::from_rgb(220, 60, 50)
}

pub fn selected_marker_color() -> Color32 {
    Color32::from_rgb(250, 170, 30)
}

pub fn alert_color() -> Color32 {
    Color32::from_rgb(220, 180, 80)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rating_text_matches_list_format() {
        assert_eq!(format_rating(Some(4.2), 31), "4.2 ⭐ (31)");
        assert_eq!(format_rating(Some(4.0), 3), "4 ⭐ (3)");
        assert_eq!(format_rating(None, 0), "No rating");
        assert_eq!(format_distance(992), "992 m");
    }

    #[test]
    fn meters_per_pixel_halves_per_zoom_level() {
        let z12 = meters_per_pixel(0.0, 12);
        let z13 = meters_per_pixel(0.0, 13);
        assert!((z12 / z13 - 2.0).abs() < 1e-9);
        assert!(meters_per_pixel(60.0, 12) < z12);
    }

    #[test]
    fn nice_step_snaps_to_one_two_five() {
        assert!((nice_step(0.013) - 0.01).abs() < 1e-12);
        assert!((nice_step(0.03) - 0.02).abs() < 1e-12);
        assert!((nice_step(0.004) - 0.005).abs() < 1e-12);
        assert!((nice_step(0.9) - 1.0).abs() < 1e-12);
        assert_eq!(nice_step(0.0), 1.0);
    }
}
