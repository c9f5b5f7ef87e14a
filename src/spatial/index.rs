use crate::{
    core::{
        geo::{LatLng, LatLngBounds},
        viewport::Viewport,
    },
    data::listing::Listing,
    prelude::Arc,
};

use rstar::{PointDistance, RTree, RTreeObject, AABB};

/// A listing position stored in the R-tree, pointing back at the listing slice
#[derive(Debug, Clone, Copy, PartialEq)]
struct IndexedPoint {
    position: [f64; 2],
    ordinal: usize,
}

// --- rstar integration -------------------------------------------------------------------------

impl RTreeObject for IndexedPoint {
    type Envelope = AABB<[f64; 2]>;

    fn envelope(&self) -> Self::Envelope {
        AABB::from_point(self.position)
    }
}

impl PointDistance for IndexedPoint {
    fn distance_2(&self, point: &[f64; 2]) -> f64 {
        let dx = self.position[0] - point[0];
        let dy = self.position[1] - point[1];
        dx * dx + dy * dy
    }
}

/// R-tree over a listing set for viewport culling.
///
/// Built once per listing set and shared with it. Query results come back
/// in the order of the original listing slice so that clustering a culled
/// subset keeps member order stable.
pub struct ListingIndex {
    listings: Arc<[Listing]>,
    rtree: RTree<IndexedPoint>,
}

impl ListingIndex {
    /// Bulk-loads the tree. Listings with non-finite coordinates are skipped.
    pub fn new(listings: Arc<[Listing]>) -> Self {
        let points = listings
            .iter()
            .enumerate()
            .filter(|(_, listing)| listing.position().is_finite())
            .map(|(ordinal, listing)| IndexedPoint {
                position: listing.position().to_xy(),
                ordinal,
            })
            .collect();

        Self {
            listings,
            rtree: RTree::bulk_load(points),
        }
    }

    /// The listing set this index was built over
    pub fn listings(&self) -> &Arc<[Listing]> {
        &self.listings
    }

    pub fn len(&self) -> usize {
        self.rtree.size()
    }

    pub fn is_empty(&self) -> bool {
        self.rtree.size() == 0
    }

    /// Listings inside `bounds`, edges inclusive
    pub fn query(&self, bounds: &LatLngBounds) -> Vec<&Listing> {
        let envelope = AABB::from_corners(bounds.south_west.to_xy(), bounds.north_east.to_xy());
        let mut ordinals: Vec<usize> = self
            .rtree
            .locate_in_envelope(&envelope)
            .map(|point| point.ordinal)
            .collect();
        ordinals.sort_unstable();
        ordinals.into_iter().map(|i| &self.listings[i]).collect()
    }

    /// Listings whose markers land on screen for `viewport`
    pub fn visible(&self, viewport: &Viewport) -> Vec<&Listing> {
        self.query(&viewport.visible_bounds())
    }

    /// Closest listing to `point` in degree space
    pub fn nearest(&self, point: &LatLng) -> Option<&Listing> {
        self.rtree
            .nearest_neighbor(&point.to_xy())
            .map(|found| &self.listings[found.ordinal])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn index() -> ListingIndex {
        ListingIndex::new(listings().into())
    }

    fn listings() -> Vec<Listing> {
        vec![
            Listing::new("bandra", 19.0596, 72.8295, 5500.0),
            Listing::new("goa", 15.2993, 74.124, 2500.0),
            Listing::new("andheri", 19.1136, 72.8697, 3200.0),
            Listing::new("broken", f64::NAN, 72.8, 1000.0),
        ]
    }

    #[test]
    fn test_skips_non_finite() {
        let index = index();
        assert_eq!(index.len(), 3);
        assert!(!index.is_empty());
    }

    #[test]
    fn test_visible_listings_in_input_order() {
        let index = index();
        let viewport = Viewport::new(19.076, 72.8777, 12.0);

        let ids: Vec<_> = index.visible(&viewport).iter().map(|l| l.id.as_str()).collect();
        assert_eq!(ids, vec!["bandra", "andheri"]);

        for listing in index.visible(&viewport) {
            assert!(viewport.project(&listing.position()).is_on_screen());
        }
    }

    #[test]
    fn test_query_bounds() {
        let index = index();
        let found = index.query(&LatLngBounds::from_coords(15.0, 74.0, 16.0, 75.0));
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].id, "goa");
    }

    #[test]
    fn test_nearest() {
        let index = index();
        let nearest = index.nearest(&LatLng::new(19.11, 72.87)).unwrap();
        assert_eq!(nearest.id, "andheri");

        let empty = ListingIndex::new(Vec::new().into());
        assert!(empty.nearest(&LatLng::new(0.0, 0.0)).is_none());
    }
}
