use crate::{
    background::location::LocationRequest,
    core::{
        config::{MapSearchOptions, SearchProfile},
        geo::LatLng,
        viewport::Viewport,
    },
    data::{
        listing::{partition_valid, Listing},
        places::{Place, PlaceDirectory},
    },
    input::{
        events::MapSearchEvent,
        handler::{apply_event, ViewportChange},
    },
    prelude::Arc,
    spatial::{
        cache::{fingerprint, ClusterCache},
        index::ListingIndex,
        projection::{place_markers, PlacedMarker},
        visibility::{should_cluster, MarkerSet},
    },
    traits::{ListingProvider, LocationProvider},
};

/// One map-search session: the viewport, the listing set it searches over
/// and the markers derived from both.
///
/// Markers are recomputed explicitly whenever the listing set or the zoom
/// changes; panning only moves them on screen.
pub struct MapSearchSession {
    viewport: Viewport,
    listings: Arc<[Listing]>,
    fingerprint: u64,
    index: ListingIndex,
    cache: ClusterCache,
    places: PlaceDirectory,
    markers: MarkerSet,
    pending_location: Option<LocationRequest>,
}

impl MapSearchSession {
    pub fn new(options: MapSearchOptions) -> Self {
        let viewport = Viewport::from(options.initial_view);
        let listings: Arc<[Listing]> = Vec::new().into();

        Self {
            viewport,
            fingerprint: fingerprint(&listings),
            index: ListingIndex::new(Arc::clone(&listings)),
            markers: MarkerSet::compute(&listings, viewport.zoom()),
            listings,
            cache: ClusterCache::new(options.cluster_cache_capacity),
            places: PlaceDirectory::new(options.places),
            pending_location: None,
        }
    }

    pub fn from_profile(profile: &SearchProfile) -> Self {
        Self::new(profile.resolve())
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn listings(&self) -> &[Listing] {
        &self.listings
    }

    /// Latest clusters or listings for the renderer
    pub fn markers(&self) -> &MarkerSet {
        &self.markers
    }

    pub fn is_clustered(&self) -> bool {
        should_cluster(self.viewport.zoom())
    }

    pub fn places(&self) -> &PlaceDirectory {
        &self.places
    }

    pub fn cache(&self) -> &ClusterCache {
        &self.cache
    }

    /// Spatial index over the current listing set
    pub fn listing_index(&self) -> &ListingIndex {
        &self.index
    }

    /// Replaces the listing set. Listings with non-finite coordinates or a
    /// negative price are dropped and logged. Returns how many were dropped.
    pub fn set_listings<I>(&mut self, listings: I) -> usize
    where
        I: IntoIterator<Item = Listing>,
    {
        let (valid, rejected) = partition_valid(listings);
        for reason in &rejected {
            log::warn!("Skipping listing: {}", reason);
        }

        self.listings = valid.into();
        self.fingerprint = fingerprint(&self.listings);
        self.index = ListingIndex::new(Arc::clone(&self.listings));
        self.recompute();
        rejected.len()
    }

    /// Pulls a fresh listing set from the provider
    pub fn refresh_from<P>(&mut self, provider: &P) -> usize
    where
        P: ListingProvider + ?Sized,
    {
        self.set_listings(provider.listings().iter().cloned())
    }

    /// Rebuilds the marker set from the current listings and zoom
    pub fn recompute(&mut self) -> &MarkerSet {
        let zoom = self.viewport.zoom();
        self.markers = if should_cluster(zoom) {
            MarkerSet::Clusters(self.cache.get_or_build(&self.listings, self.fingerprint, zoom))
        } else {
            MarkerSet::Listings(Arc::clone(&self.listings))
        };

        log::debug!(
            "markers at z{}: {} {} for {} listings",
            zoom,
            self.markers.len(),
            if self.markers.is_clustered() { "clusters" } else { "listings" },
            self.listings.len()
        );
        &self.markers
    }

    /// Applies a gesture or callback, recomputing markers if the zoom moved
    pub fn handle_event(&mut self, event: &MapSearchEvent) -> ViewportChange {
        let change = apply_event(&mut self.viewport, event);
        if change.requires_recluster() {
            self.recompute();
        }
        change
    }

    pub fn pan_to(&mut self, center: LatLng) -> ViewportChange {
        self.handle_event(&MapSearchEvent::Pan { center })
    }

    pub fn zoom_in(&mut self) -> ViewportChange {
        self.handle_event(&MapSearchEvent::ZoomIn)
    }

    pub fn zoom_out(&mut self) -> ViewportChange {
        self.handle_event(&MapSearchEvent::ZoomOut)
    }

    /// Recenters on the place matching `query`. Unknown places leave the
    /// view untouched and return `None`.
    pub fn search_location(&mut self, query: &str) -> Option<Place> {
        let Some(place) = self.places.resolve(query).cloned() else {
            log::debug!("no place matches '{}'", query);
            return None;
        };

        self.handle_event(&MapSearchEvent::LocationSearchResolved {
            center: place.position(),
        });
        Some(place)
    }

    /// Zooms into a cluster of the current marker set by id
    pub fn focus_cluster(&mut self, cluster_id: &str) -> Option<ViewportChange> {
        let center = self.markers.find_cluster(cluster_id)?.center;
        Some(self.handle_event(&MapSearchEvent::ClusterClicked { center }))
    }

    /// Screen positions for every current marker, on screen or not
    pub fn placed_markers(&self) -> Vec<PlacedMarker> {
        place_markers(&self.markers, &self.viewport)
    }

    /// Screen positions for the markers that land inside the view
    pub fn visible_markers(&self) -> Vec<PlacedMarker> {
        self.placed_markers()
            .into_iter()
            .filter(|marker| marker.position.is_on_screen())
            .collect()
    }

    /// Listings whose own location lies inside the view
    pub fn visible_listings(&self) -> Vec<&Listing> {
        self.index.visible(&self.viewport)
    }

    /// Starts a "use my location" lookup, abandoning any earlier one
    pub fn request_location(&mut self, provider: Arc<dyn LocationProvider>) {
        if self.pending_location.is_some() {
            log::debug!("replacing pending location request");
        }
        self.pending_location = Some(LocationRequest::spawn(provider));
    }

    pub fn is_locating(&self) -> bool {
        self.pending_location.is_some()
    }

    /// Applies the location outcome if it has arrived. Failures are logged
    /// and leave the viewport unchanged.
    pub fn poll_location(&mut self) -> Option<ViewportChange> {
        let outcome = self.pending_location.as_mut()?.try_take()?;
        self.pending_location = None;
        Some(self.handle_event(&MapSearchEvent::from(outcome)))
    }
}

impl Default for MapSearchSession {
    fn default() -> Self {
        Self::new(MapSearchOptions::default())
    }
}
