use crate::core::{
    constants::{COARSE_CELL_SIZE, COARSE_GRID_ZOOM, FINE_CELL_SIZE},
    geo::LatLng,
};

/// Grid cell edge in degrees for the given zoom
pub fn cell_size(zoom: f64) -> f64 {
    if zoom < COARSE_GRID_ZOOM {
        COARSE_CELL_SIZE
    } else {
        FINE_CELL_SIZE
    }
}

/// Cluster key of the grid cell containing `point` at `zoom`
pub fn cell_key(point: &LatLng, zoom: f64) -> String {
    GridCell::containing(point, zoom).key()
}

/// A square bucket of geographic space, identified by its floor-rounded
/// south-west corner.
///
/// Points on either side of a cell edge land in different cells even when
/// they are metres apart.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridCell {
    lat_index: f64,
    lng_index: f64,
    size: f64,
}

impl GridCell {
    pub fn containing(point: &LatLng, zoom: f64) -> Self {
        let size = cell_size(zoom);
        Self {
            lat_index: (point.lat / size).floor(),
            lng_index: (point.lng / size).floor(),
            size,
        }
    }

    pub fn size(&self) -> f64 {
        self.size
    }

    /// Latitude of the cell's southern edge
    pub fn grid_lat(&self) -> f64 {
        // + 0.0 folds -0.0 into 0.0 so keys never read "-0"
        self.lat_index * self.size + 0.0
    }

    /// Longitude of the cell's western edge
    pub fn grid_lng(&self) -> f64 {
        self.lng_index * self.size + 0.0
    }

    /// Geometric center of the cell, not the centroid of its contents
    pub fn center(&self) -> LatLng {
        let half = self.size / 2.0;
        LatLng::new(self.grid_lat() + half, self.grid_lng() + half)
    }

    /// String key `"{grid_lat}-{grid_lng}"`
    pub fn key(&self) -> String {
        format!("{}-{}", self.grid_lat(), self.grid_lng())
    }

    /// Hashable identity of the cell at a fixed size
    pub(crate) fn index(&self) -> (u64, u64) {
        ((self.lat_index + 0.0).to_bits(), (self.lng_index + 0.0).to_bits())
    }
}
