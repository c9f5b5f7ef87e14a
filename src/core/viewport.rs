use crate::core::{
    constants::{
        CLUSTER_CLICK_ZOOM_STEP, DEFAULT_CENTER, DEFAULT_ZOOM, LOCATE_ZOOM, MAX_ZOOM, MIN_ZOOM,
        PROJECTION_SCALE, SCREEN_CENTER_PERCENT, ZOOM_STEP,
    },
    geo::{LatLng, LatLngBounds},
};
use crate::spatial::projection::{project, ScreenPosition};
use serde::Serialize;

/// The visible map region of one search session: center and zoom.
///
/// `zoom` always lies in `[MIN_ZOOM, MAX_ZOOM]`; every constructor and
/// mutator clamps it. The struct is a plain value owned by its session, so
/// split panes simply hold independent copies.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Viewport {
    latitude: f64,
    longitude: f64,
    zoom: f64,
}

impl Viewport {
    /// Creates a new viewport, clamping `zoom` into the valid range
    pub fn new(latitude: f64, longitude: f64, zoom: f64) -> Self {
        Self {
            latitude,
            longitude,
            zoom: Self::clamp_zoom(zoom),
        }
    }

    /// Creates a viewport centered on `center`
    pub fn centered_on(center: LatLng, zoom: f64) -> Self {
        Self::new(center.lat, center.lng, zoom)
    }

    /// Clamps a zoom level into `[MIN_ZOOM, MAX_ZOOM]`. NaN falls back to the default zoom.
    pub fn clamp_zoom(zoom: f64) -> f64 {
        if zoom.is_nan() {
            return DEFAULT_ZOOM;
        }
        zoom.clamp(MIN_ZOOM, MAX_ZOOM)
    }

    pub fn latitude(&self) -> f64 {
        self.latitude
    }

    pub fn longitude(&self) -> f64 {
        self.longitude
    }

    pub fn zoom(&self) -> f64 {
        self.zoom
    }

    /// The center of the map view in geographical coordinates
    pub fn center(&self) -> LatLng {
        LatLng::new(self.latitude, self.longitude)
    }

    /// Recenters the view without touching the zoom
    pub fn pan_to(&mut self, center: LatLng) {
        self.latitude = center.lat;
        self.longitude = center.lng;
    }

    /// Sets the zoom level, clamping to valid range
    pub fn set_zoom(&mut self, zoom: f64) {
        self.zoom = Self::clamp_zoom(zoom);
    }

    pub fn zoom_in(&mut self) {
        self.set_zoom(self.zoom + ZOOM_STEP);
    }

    pub fn zoom_out(&mut self) {
        self.set_zoom(self.zoom - ZOOM_STEP);
    }

    /// Cluster click: recenter on the cluster and zoom two levels closer
    pub fn focus_cluster(&mut self, center: LatLng) {
        self.pan_to(center);
        self.set_zoom(self.zoom + CLUSTER_CLICK_ZOOM_STEP);
    }

    /// Device location found: recenter and jump to the locate zoom level
    pub fn locate(&mut self, position: LatLng) {
        self.pan_to(position);
        self.set_zoom(LOCATE_ZOOM);
    }

    /// The geographic region that projects inside `[0, 100]` on both axes
    pub fn visible_bounds(&self) -> LatLngBounds {
        LatLngBounds::around(self.center(), SCREEN_CENTER_PERCENT * PROJECTION_SCALE)
    }

    /// Projects a coordinate into screen percentages relative to this view
    pub fn project(&self, point: &LatLng) -> ScreenPosition {
        project(point, self)
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(DEFAULT_CENTER.0, DEFAULT_CENTER.1, DEFAULT_ZOOM)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_clamps_zoom() {
        assert_eq!(Viewport::new(0.0, 0.0, 3.0).zoom(), MIN_ZOOM);
        assert_eq!(Viewport::new(0.0, 0.0, 25.0).zoom(), MAX_ZOOM);
        assert_eq!(Viewport::new(0.0, 0.0, 11.5).zoom(), 11.5);
        assert_eq!(Viewport::new(0.0, 0.0, f64::NAN).zoom(), DEFAULT_ZOOM);
    }

    #[test]
    fn test_zoom_in_stops_at_max() {
        let mut viewport = Viewport::new(19.0, 72.8, 17.0);
        for _ in 0..3 {
            viewport.zoom_in();
        }
        assert_eq!(viewport.zoom(), 18.0);
    }

    #[test]
    fn test_zoom_out_stops_at_min() {
        let mut viewport = Viewport::new(19.0, 72.8, 9.0);
        viewport.zoom_out();
        viewport.zoom_out();
        assert_eq!(viewport.zoom(), 8.0);
    }

    #[test]
    fn test_focus_cluster_zooms_two_levels() {
        let mut viewport = Viewport::new(19.0, 72.8, 11.0);
        viewport.focus_cluster(LatLng::new(19.125, 72.875));
        assert_eq!(viewport.center(), LatLng::new(19.125, 72.875));
        assert_eq!(viewport.zoom(), 13.0);

        let mut near_max = Viewport::new(19.0, 72.8, 17.0);
        near_max.focus_cluster(LatLng::new(19.0, 72.8));
        assert_eq!(near_max.zoom(), 18.0);
    }

    #[test]
    fn test_pan_keeps_zoom() {
        let mut viewport = Viewport::new(19.0, 72.8, 11.0);
        viewport.pan_to(LatLng::new(28.6139, 77.209));
        assert_eq!(viewport.latitude(), 28.6139);
        assert_eq!(viewport.longitude(), 77.209);
        assert_eq!(viewport.zoom(), 11.0);
    }

    #[test]
    fn test_locate_sets_fixed_zoom() {
        let mut viewport = Viewport::new(19.0, 72.8, 9.0);
        viewport.locate(LatLng::new(12.97, 77.59));
        assert_eq!(viewport.center(), LatLng::new(12.97, 77.59));
        assert_eq!(viewport.zoom(), LOCATE_ZOOM);
    }

    #[test]
    fn test_visible_bounds_match_projection_edges() {
        let viewport = Viewport::new(10.0, 20.0, 12.0);
        let bounds = viewport.visible_bounds();
        let top_left = viewport.project(&LatLng::new(
            bounds.north_east.lat,
            bounds.south_west.lng,
        ));
        assert!((top_left.left_percent - 0.0).abs() < 1e-9);
        assert!((top_left.top_percent - 0.0).abs() < 1e-9);
    }
}
