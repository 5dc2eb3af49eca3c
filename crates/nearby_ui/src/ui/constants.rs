//! Constants used throughout the UI.

pub const SIDEBAR_WIDTH: f32 = 340.0;

/// Width of one bar in the distance histogram, in metres.
pub const HISTOGRAM_BUCKET_M: u64 = 250;

/// Only the first results are listed in the sidebar; all of them get markers.
pub const MAX_LISTED_RESULTS: usize = 30;

pub const MARKER_RADIUS_PX: f32 = 11.0;

/// How close a click must land to a marker to select it.
pub const MARKER_HIT_RADIUS_PX: f64 = 12.0;

/// Web Mercator ground resolution at the equator for zoom 0, metres per pixel.
pub const EQUATOR_METERS_PER_PIXEL: f64 = 156_543.033_92;

/// Target spacing between graticule lines on screen.
pub const GRID_TARGET_PX: f64 = 120.0;
