use crate::prelude::HashMap;
use crate::{
    core::geo::LatLng,
    data::listing::Listing,
    spatial::{grid::GridCell, visibility::should_cluster},
};
use serde::Serialize;
use std::collections::hash_map::Entry;

/// Listings sharing one grid cell at the current zoom.
///
/// A cluster is a value produced by one recomputation; nothing about it
/// persists into the next one.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Cluster {
    /// Key of the grid cell this cluster covers
    pub id: String,
    /// Center of the grid cell (not the centroid of the members)
    pub center: LatLng,
    /// Number of members, always `members.len()`
    pub count: usize,
    /// Mean member price
    pub avg_price: f64,
    /// Members in input order
    pub members: Vec<Listing>,
}

impl Cluster {
    pub fn is_singleton(&self) -> bool {
        self.count == 1
    }

    pub fn contains(&self, listing_id: &str) -> bool {
        self.members.iter().any(|m| m.id == listing_id)
    }
}

/// In-progress cluster keeping a running price sum so the mean never
/// requires another pass over the members.
struct ClusterAccumulator {
    cluster: Cluster,
    price_sum: f64,
}

impl ClusterAccumulator {
    fn new(cell: &GridCell, first: &Listing) -> Self {
        Self {
            cluster: Cluster {
                id: cell.key(),
                center: cell.center(),
                count: 1,
                avg_price: first.price,
                members: vec![first.clone()],
            },
            price_sum: first.price,
        }
    }

    fn push(&mut self, listing: &Listing) {
        self.price_sum += listing.price;
        self.cluster.count += 1;
        self.cluster.members.push(listing.clone());
        self.cluster.avg_price = self.price_sum / self.cluster.count as f64;
    }

    fn finish(self) -> Cluster {
        self.cluster
    }
}

/// Groups listings into grid clusters for `zoom`.
///
/// Returns an empty vector without bucketing anything when the zoom is past
/// the clustering threshold. Otherwise every listing lands in exactly one
/// cluster; clusters come out in the order their cell was first seen.
pub fn build_clusters(listings: &[Listing], zoom: f64) -> Vec<Cluster> {
    if !should_cluster(zoom) {
        return Vec::new();
    }

    let mut slots: HashMap<(u64, u64), usize> = HashMap::default();
    let mut accumulators: Vec<ClusterAccumulator> = Vec::new();

    for listing in listings {
        let cell = GridCell::containing(&listing.position(), zoom);
        match slots.entry(cell.index()) {
            Entry::Occupied(slot) => accumulators[*slot.get()].push(listing),
            Entry::Vacant(slot) => {
                slot.insert(accumulators.len());
                accumulators.push(ClusterAccumulator::new(&cell, listing));
            }
        }
    }

    accumulators
        .into_iter()
        .map(ClusterAccumulator::finish)
        .collect()
}
