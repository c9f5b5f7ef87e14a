//! Core constants for the map search engine.
//! Keeping them in a single place makes it easier to audit engine-wide magic numbers.

/// Most zoomed-out level a viewport may reach.
pub const MIN_ZOOM: f64 = 8.0;

/// Most zoomed-in level a viewport may reach.
pub const MAX_ZOOM: f64 = 18.0;

/// Above this zoom, listings are shown individually instead of clustered.
pub const CLUSTER_MAX_ZOOM: f64 = 14.0;

/// Below this zoom the coarse grid is used.
pub const COARSE_GRID_ZOOM: f64 = 10.0;

/// Grid cell edge in degrees when zoomed out.
pub const COARSE_CELL_SIZE: f64 = 0.1;

/// Grid cell edge in degrees from `COARSE_GRID_ZOOM` upwards.
pub const FINE_CELL_SIZE: f64 = 0.05;

/// Degrees per screen-percent unit. Independent of zoom.
pub const PROJECTION_SCALE: f64 = 0.01;

/// Screen-percent offset of the viewport center on both axes.
pub const SCREEN_CENTER_PERCENT: f64 = 50.0;

/// Programmatic +/- zoom step for the zoom buttons.
pub const ZOOM_STEP: f64 = 1.0;

/// Zoom increase applied when the user clicks a cluster.
pub const CLUSTER_CLICK_ZOOM_STEP: f64 = 2.0;

/// Zoom level applied once the device location has been found.
pub const LOCATE_ZOOM: f64 = 14.0;

/// Default map center (Mumbai).
pub const DEFAULT_CENTER: (f64, f64) = (19.076, 72.8777);

/// Default zoom for a fresh search session.
pub const DEFAULT_ZOOM: f64 = 12.0;

/// Default number of memoized cluster results.
pub const DEFAULT_CLUSTER_CACHE_CAPACITY: usize = 16;
