//! Seams to the collaborators that live outside map search
//!
//! The listing backend and the device's location service are owned by the
//! surrounding application; map search only reads from them.

use crate::{core::geo::LatLng, data::listing::Listing, LocationError};
use async_trait::async_trait;

/// Source of the listings currently matching the user's search.
///
/// The slice is read-only to map search and may be replaced wholesale by
/// the provider after a new search.
pub trait ListingProvider {
    fn listings(&self) -> &[Listing];
}

impl ListingProvider for Vec<Listing> {
    fn listings(&self) -> &[Listing] {
        self
    }
}

impl ListingProvider for [Listing] {
    fn listings(&self) -> &[Listing] {
        self
    }
}

/// Device or browser capability reporting where the user is.
///
/// A request either resolves or is abandoned; there is no timeout or
/// cancellation contract beyond dropping the future.
#[async_trait]
pub trait LocationProvider: Send + Sync {
    async fn current_location(&self) -> std::result::Result<LatLng, LocationError>;
}

/// Provider answering with a fixed outcome, for demos and tests
#[derive(Debug, Clone)]
pub struct FixedLocation(pub std::result::Result<LatLng, LocationError>);

#[async_trait]
impl LocationProvider for FixedLocation {
    async fn current_location(&self) -> std::result::Result<LatLng, LocationError> {
        self.0.clone()
    }
}
