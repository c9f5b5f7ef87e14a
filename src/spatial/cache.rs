use crate::prelude::{Arc, FxHasher};
use crate::{
    data::listing::Listing,
    spatial::{
        clustering::{build_clusters, Cluster},
        grid::cell_size,
        visibility::should_cluster,
    },
};
use lru::LruCache;
use std::hash::{Hash, Hasher};
use std::num::NonZeroUsize;

/// Memo key: grid resolution plus the listing-set fingerprint.
/// Zoom levels sharing a cell size produce identical clusters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
struct CacheKey {
    cell_size_bits: u64,
    fingerprint: u64,
}

/// Order-sensitive content hash of a listing set
pub fn fingerprint(listings: &[Listing]) -> u64 {
    let mut hasher = FxHasher::default();
    listings.len().hash(&mut hasher);
    for listing in listings {
        listing.id.hash(&mut hasher);
        listing.location.latitude.to_bits().hash(&mut hasher);
        listing.location.longitude.to_bits().hash(&mut hasher);
        listing.price.to_bits().hash(&mut hasher);
    }
    hasher.finish()
}

/// LRU memo over `build_clusters`.
///
/// Purely an optimisation: a hit returns exactly what a fresh build would.
pub struct ClusterCache {
    entries: Option<LruCache<CacheKey, Arc<[Cluster]>>>,
    hits: u64,
    misses: u64,
}

impl ClusterCache {
    /// `capacity == 0` disables memoization
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: NonZeroUsize::new(capacity).map(LruCache::new),
            hits: 0,
            misses: 0,
        }
    }

    pub fn disabled() -> Self {
        Self::new(0)
    }

    pub fn is_enabled(&self) -> bool {
        self.entries.is_some()
    }

    /// Clusters for `listings` at `zoom`, where `fingerprint` is
    /// `cache::fingerprint(listings)` computed by the caller
    pub fn get_or_build(
        &mut self,
        listings: &[Listing],
        fingerprint: u64,
        zoom: f64,
    ) -> Arc<[Cluster]> {
        if !should_cluster(zoom) {
            return Vec::<Cluster>::new().into();
        }

        let Some(entries) = self.entries.as_mut() else {
            self.misses += 1;
            return build_clusters(listings, zoom).into();
        };

        let key = CacheKey {
            cell_size_bits: cell_size(zoom).to_bits(),
            fingerprint,
        };

        if let Some(clusters) = entries.get(&key) {
            self.hits += 1;
            log::debug!("cluster cache hit ({} clusters)", clusters.len());
            return Arc::clone(clusters);
        }

        self.misses += 1;
        let clusters: Arc<[Cluster]> = build_clusters(listings, zoom).into();
        entries.put(key, Arc::clone(&clusters));
        clusters
    }

    pub fn len(&self) -> usize {
        self.entries.as_ref().map_or(0, |entries| entries.len())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn hits(&self) -> u64 {
        self.hits
    }

    pub fn misses(&self) -> u64 {
        self.misses
    }

    pub fn clear(&mut self) {
        if let Some(entries) = self.entries.as_mut() {
            entries.clear();
        }
    }
}

impl Default for ClusterCache {
    fn default() -> Self {
        Self::new(crate::core::constants::DEFAULT_CLUSTER_CACHE_CAPACITY)
    }
}
