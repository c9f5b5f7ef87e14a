//! Prelude module for common staymap types and traits
//!
//! This module re-exports the most commonly used types, traits, and functions
//! for easy importing with `use staymap::prelude::*;`

pub use crate::core::{
    config::{MapSearchOptions, SearchProfile, ViewOptions},
    geo::{LatLng, LatLngBounds},
    session::MapSearchSession,
    viewport::Viewport,
};

pub use crate::data::{
    listing::{Listing, Location},
    places::{Place, PlaceDirectory},
};

pub use crate::input::{
    events::MapSearchEvent,
    handler::{apply_event, ViewportChange},
};

pub use crate::spatial::{
    cache::ClusterCache,
    clustering::{build_clusters, Cluster},
    grid::{cell_key, cell_size, GridCell},
    index::ListingIndex,
    projection::{place_markers, project, MarkerKind, PlacedMarker, ScreenPosition},
    visibility::{should_cluster, MarkerSet},
};

pub use crate::background::location::{LocationOutcome, LocationRequest};

pub use crate::runtime::{runtime, spawn, AsyncHandle, AsyncSpawner};

pub use crate::traits::{ListingProvider, LocationProvider};

pub use crate::{Error as MapError, LocationError, Result};

pub use std::{pin::Pin, sync::Arc};

pub use fxhash::{FxHashMap as HashMap, FxHashSet as HashSet, FxHasher};

pub use futures::Future;
