//! Named places for location search.
//!
//! A fixed lookup table, not a geocoder: a query resolves to a place by
//! case-insensitive name match, and the match recenters the map.

use crate::core::geo::LatLng;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Place {
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
}

impl Place {
    pub fn new(name: impl Into<String>, latitude: f64, longitude: f64) -> Self {
        Self {
            name: name.into(),
            latitude,
            longitude,
        }
    }

    pub fn position(&self) -> LatLng {
        LatLng::new(self.latitude, self.longitude)
    }

    /// Destinations known out of the box
    pub fn defaults() -> Vec<Place> {
        vec![
            Place::new("Mumbai", 19.076, 72.8777),
            Place::new("Bandra", 19.0596, 72.8295),
            Place::new("Juhu", 19.1075, 72.8263),
            Place::new("Goa", 15.2993, 74.124),
            Place::new("New Delhi", 28.6139, 77.209),
            Place::new("Bengaluru", 12.9716, 77.5946),
            Place::new("Jaipur", 26.9124, 75.7873),
            Place::new("Manali", 32.2432, 77.1892),
        ]
    }
}

#[derive(Debug, Clone, Default)]
pub struct PlaceDirectory {
    places: Vec<Place>,
}

impl PlaceDirectory {
    pub fn new(places: Vec<Place>) -> Self {
        Self { places }
    }

    pub fn len(&self) -> usize {
        self.places.len()
    }

    pub fn is_empty(&self) -> bool {
        self.places.is_empty()
    }

    pub fn places(&self) -> &[Place] {
        &self.places
    }

    /// Finds the best place for a free-text query.
    ///
    /// Exact name matches win over prefix matches, which win over substring
    /// matches; within a tier the earliest registered place wins.
    pub fn resolve(&self, query: &str) -> Option<&Place> {
        let needle = query.trim().to_lowercase();
        if needle.is_empty() {
            return None;
        }

        let mut best: Option<(u8, &Place)> = None;
        for place in &self.places {
            let name = place.name.to_lowercase();
            let rank = if name == needle {
                0
            } else if name.starts_with(&needle) {
                1
            } else if name.contains(&needle) {
                2
            } else {
                continue;
            };

            match best {
                Some((best_rank, _)) if best_rank <= rank => {}
                _ => best = Some((rank, place)),
            }
        }

        best.map(|(_, place)| place)
    }
}

impl From<Vec<Place>> for PlaceDirectory {
    fn from(places: Vec<Place>) -> Self {
        Self::new(places)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn directory() -> PlaceDirectory {
        PlaceDirectory::new(vec![
            Place::new("North Goa", 15.6, 73.8),
            Place::new("Goa", 15.2993, 74.124),
            Place::new("Goa Velha", 15.44, 73.88),
        ])
    }

    #[test]
    fn test_exact_match_wins() {
        let directory = directory();
        let place = directory.resolve("  goa ").unwrap();
        assert_eq!(place.name, "Goa");
    }

    #[test]
    fn test_prefix_beats_substring() {
        let directory = directory();
        let place = directory.resolve("goa v").unwrap();
        assert_eq!(place.name, "Goa Velha");

        let place = directory.resolve("north").unwrap();
        assert_eq!(place.name, "North Goa");
    }

    #[test]
    fn test_substring_match() {
        let directory = directory();
        let place = directory.resolve("velha").unwrap();
        assert_eq!(place.name, "Goa Velha");
    }

    #[test]
    fn test_no_match_or_empty_query() {
        assert!(directory().resolve("Atlantis").is_none());
        assert!(directory().resolve("   ").is_none());
    }

    #[test]
    fn test_defaults_are_finite() {
        assert!(Place::defaults().iter().all(|p| p.position().is_finite()));
    }
}
