use crate::core::geo::LatLng;
use crate::{MapError, Result};
use serde::{Deserialize, Serialize};

/// Geographic position of a listing, as delivered by the listing provider
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub latitude: f64,
    pub longitude: f64,
}

/// A rental property as seen by map search. Owned by the listing provider
/// and never mutated here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Listing {
    pub id: String,
    pub location: Location,
    pub price: f64,
}

impl Listing {
    pub fn new(id: impl Into<String>, latitude: f64, longitude: f64, price: f64) -> Self {
        Self {
            id: id.into(),
            location: Location {
                latitude,
                longitude,
            },
            price,
        }
    }

    pub fn position(&self) -> LatLng {
        LatLng::new(self.location.latitude, self.location.longitude)
    }

    /// Checks the listing is safe to bucket and average
    pub fn validate(&self) -> Result<()> {
        if !self.position().is_finite() {
            return Err(MapError::InvalidCoordinates(format!(
                "listing {} at ({}, {})",
                self.id, self.location.latitude, self.location.longitude
            )));
        }
        if !self.price.is_finite() || self.price < 0.0 {
            return Err(MapError::InvalidListing {
                id: self.id.clone(),
                reason: format!("price must be a non-negative number, got {}", self.price),
            });
        }
        Ok(())
    }
}

/// Parses a JSON array of listings
pub fn listings_from_json(json: &str) -> Result<Vec<Listing>> {
    Ok(serde_json::from_str(json)?)
}

/// Splits listings into the usable ones and the rejection reasons for the rest
pub fn partition_valid<I>(listings: I) -> (Vec<Listing>, Vec<MapError>)
where
    I: IntoIterator<Item = Listing>,
{
    let mut valid = Vec::new();
    let mut rejected = Vec::new();
    for listing in listings {
        match listing.validate() {
            Ok(()) => valid.push(listing),
            Err(e) => rejected.push(e),
        }
    }
    (valid, rejected)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_listing_from_provider_json() {
        let listings = listings_from_json(
            r#"[{ "id": "bandra-loft", "location": { "latitude": 19.0596, "longitude": 72.8295 }, "price": 5500 }]"#,
        )
        .unwrap();
        assert_eq!(listings.len(), 1);
        assert_eq!(listings[0].id, "bandra-loft");
        assert_eq!(listings[0].position(), LatLng::new(19.0596, 72.8295));
        assert_eq!(listings[0].price, 5500.0);
    }

    #[test]
    fn test_validate_rejects_non_finite_coordinates() {
        let listing = Listing::new("x", f64::NAN, 72.8, 100.0);
        assert!(matches!(
            listing.validate(),
            Err(MapError::InvalidCoordinates(_))
        ));
    }

    #[test]
    fn test_validate_rejects_negative_price() {
        let listing = Listing::new("x", 19.0, 72.8, -1.0);
        assert!(matches!(
            listing.validate(),
            Err(MapError::InvalidListing { .. })
        ));
        assert!(Listing::new("free", 19.0, 72.8, 0.0).validate().is_ok());
    }

    #[test]
    fn test_partition_valid() {
        let (valid, rejected) = partition_valid(vec![
            Listing::new("a", 19.0, 72.8, 100.0),
            Listing::new("b", 19.0, f64::INFINITY, 100.0),
            Listing::new("c", 19.1, 72.9, f64::NAN),
        ]);
        assert_eq!(valid.len(), 1);
        assert_eq!(valid[0].id, "a");
        assert_eq!(rejected.len(), 2);
    }
}
