//! Glue between the session and a [`MapRenderer`].
//!
//! The renderer only ever sees whole marker sets: an empty set when a search
//! starts, the numbered result markers when it completes.

use tracing::debug;

use crate::error::TransitionError;
use crate::geo::Bounds;
use crate::providers::{MapMarker, MapRenderer};
use crate::ranking::SearchResultSet;
use crate::session::Session;

/// Markers labelled "1", "2", … in ranking order.
pub fn markers_for(results: &SearchResultSet) -> Vec<MapMarker> {
    results
        .iter()
        .enumerate()
        .map(|(idx, place)| MapMarker {
            place_id: place.id().to_string(),
            coordinate: place.coordinate(),
            label: (idx + 1).to_string(),
        })
        .collect()
}

/// Replace the markers with the session's results and fit the view around
/// the reference location plus every result.
pub fn show_results<R: MapRenderer + ?Sized>(session: &Session, renderer: &mut R) {
    renderer.set_markers(markers_for(session.results()));
    let Some(reference) = session.reference() else {
        return;
    };
    if session.results().is_empty() {
        return;
    }
    let mut bounds = Bounds::around(reference);
    for coordinate in session.results().coordinates() {
        bounds.extend(coordinate);
    }
    renderer.fit_bounds(bounds);
}

/// Remove all markers, e.g. when a new search starts.
pub fn clear_results<R: MapRenderer + ?Sized>(renderer: &mut R) {
    renderer.set_markers(Vec::new());
}

/// Select a place and focus the map on it.
pub fn focus_place<R: MapRenderer + ?Sized>(
    session: &mut Session,
    renderer: &mut R,
    place_id: &str,
) -> Result<(), TransitionError> {
    let coordinate = session.select(place_id)?;
    renderer.focus(coordinate);
    Ok(())
}

/// Turn pending marker clicks into selections. The last valid click wins.
pub fn apply_marker_clicks<R: MapRenderer + ?Sized>(session: &mut Session, renderer: &mut R) {
    for place_id in renderer.drain_clicks() {
        if let Err(err) = session.select(&place_id) {
            debug!(error = %err, "ignoring marker click");
        }
    }
}
