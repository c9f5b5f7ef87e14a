use crate::core::constants::CLUSTER_MAX_ZOOM;
use crate::data::listing::Listing;
use crate::prelude::Arc;
use crate::spatial::clustering::{build_clusters, Cluster};

/// Whether listings should be grouped into clusters at this zoom.
/// Past `CLUSTER_MAX_ZOOM` every listing gets its own marker.
pub fn should_cluster(zoom: f64) -> bool {
    zoom <= CLUSTER_MAX_ZOOM
}

/// What the renderer should draw for the current view
#[derive(Debug, Clone, PartialEq)]
pub enum MarkerSet {
    Clusters(Arc<[Cluster]>),
    Listings(Arc<[Listing]>),
}

impl MarkerSet {
    /// Applies the visibility policy and builds clusters when it asks for them
    pub fn compute(listings: &Arc<[Listing]>, zoom: f64) -> Self {
        if should_cluster(zoom) {
            Self::Clusters(build_clusters(listings, zoom).into())
        } else {
            Self::Listings(Arc::clone(listings))
        }
    }

    pub fn is_clustered(&self) -> bool {
        matches!(self, Self::Clusters(_))
    }

    /// Clusters to draw; empty while individual listings are shown
    pub fn clusters(&self) -> &[Cluster] {
        match self {
            Self::Clusters(clusters) => clusters,
            Self::Listings(_) => &[],
        }
    }

    pub fn find_cluster(&self, id: &str) -> Option<&Cluster> {
        self.clusters().iter().find(|c| c.id == id)
    }

    /// Number of markers the renderer will place
    pub fn len(&self) -> usize {
        match self {
            Self::Clusters(clusters) => clusters.len(),
            Self::Listings(listings) => listings.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Total listings represented, whichever mode is active
    pub fn listing_count(&self) -> usize {
        match self {
            Self::Clusters(clusters) => clusters.iter().map(|c| c.count).sum(),
            Self::Listings(listings) => listings.len(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn listings() -> Arc<[Listing]> {
        vec![
            Listing::new("A", 19.0596, 72.8295, 5500.0),
            Listing::new("B", 19.1136, 72.8697, 3200.0),
            Listing::new("D", 19.1130, 72.8690, 4000.0),
        ]
        .into()
    }

    #[test]
    fn test_threshold() {
        assert!(should_cluster(8.0));
        assert!(should_cluster(14.0));
        assert!(!should_cluster(14.01));
        assert!(!should_cluster(18.0));
    }

    #[test]
    fn test_clustered_marker_set() {
        let set = MarkerSet::compute(&listings(), 11.0);
        assert!(set.is_clustered());
        assert_eq!(set.len(), 2);
        assert_eq!(set.listing_count(), 3);
        assert!(set.find_cluster("19.05-72.8").is_some());
    }

    #[test]
    fn test_individual_marker_set() {
        let source = listings();
        let set = MarkerSet::compute(&source, 15.0);
        assert!(!set.is_clustered());
        assert!(set.clusters().is_empty());
        assert_eq!(set.len(), 3);
        assert_eq!(set, MarkerSet::Listings(source));
    }
}
