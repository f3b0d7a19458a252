use serde::{Deserialize, Serialize};

use crate::CatalogError;
use crate::builtin::builtin_destinations;

/// A named place on the globe with the copy shown for it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Destination {
    pub name: String,
    pub lat: f64,
    pub lon: f64,
    #[serde(default)]
    pub is_origin: bool,
    #[serde(default)]
    pub services: String,
    #[serde(default)]
    pub routing: String,
    #[serde(default)]
    pub transit: String,
    #[serde(default)]
    pub detail: String,
}

impl Destination {
    pub fn new(name: impl Into<String>, lat: f64, lon: f64) -> Self {
        Self {
            name: name.into(),
            lat,
            lon,
            is_origin: false,
            services: String::new(),
            routing: String::new(),
            transit: String::new(),
            detail: String::new(),
        }
    }

    pub fn origin(mut self) -> Self {
        self.is_origin = true;
        self
    }

    pub fn with_services(mut self, services: impl Into<String>) -> Self {
        self.services = services.into();
        self
    }

    pub fn with_routing(mut self, routing: impl Into<String>) -> Self {
        self.routing = routing.into();
        self
    }

    pub fn with_transit(mut self, transit: impl Into<String>) -> Self {
        self.transit = transit.into();
        self
    }

    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = detail.into();
        self
    }
}

/// Stable position of a destination inside its registry.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DestinationId(pub usize);

/// Validated, immutable destination list.
///
/// Invariants (checked on construction):
/// - exactly one destination has `is_origin == true`;
/// - every latitude is finite and in `[-90, 90]`, every longitude in `[-180, 180]`.
#[derive(Debug, Clone, PartialEq)]
pub struct DestinationRegistry {
    destinations: Vec<Destination>,
    origin: DestinationId,
}

impl DestinationRegistry {
    pub fn new(destinations: Vec<Destination>) -> Result<Self, CatalogError> {
        for d in &destinations {
            if !d.lat.is_finite() || !(-90.0..=90.0).contains(&d.lat) {
                return Err(CatalogError::LatitudeOutOfRange {
                    name: d.name.clone(),
                    lat: d.lat,
                });
            }
            if !d.lon.is_finite() || !(-180.0..=180.0).contains(&d.lon) {
                return Err(CatalogError::LongitudeOutOfRange {
                    name: d.name.clone(),
                    lon: d.lon,
                });
            }
        }

        let origins: Vec<usize> = destinations
            .iter()
            .enumerate()
            .filter(|(_, d)| d.is_origin)
            .map(|(i, _)| i)
            .collect();
        let origin = match origins.as_slice() {
            [] => return Err(CatalogError::NoOrigin),
            [only] => DestinationId(*only),
            many => {
                return Err(CatalogError::MultipleOrigins(
                    many.iter().map(|&i| destinations[i].name.clone()).collect(),
                ));
            }
        };

        Ok(Self {
            destinations,
            origin,
        })
    }

    /// The destinations served from the Pakistan hubs. The static list
    /// already satisfies the invariants `new` checks.
    pub fn builtin() -> Self {
        let destinations = builtin_destinations();
        let origin = destinations
            .iter()
            .position(|d| d.is_origin)
            .map(DestinationId)
            .unwrap_or(DestinationId(0));
        Self {
            destinations,
            origin,
        }
    }

    /// Parses a JSON array of destinations and validates it.
    pub fn from_json_str(json: &str) -> Result<Self, CatalogError> {
        let destinations: Vec<Destination> =
            serde_json::from_str(json).map_err(|e| CatalogError::Corrupt(e.to_string()))?;
        Self::new(destinations)
    }

    pub fn origin_id(&self) -> DestinationId {
        self.origin
    }

    pub fn origin(&self) -> &Destination {
        &self.destinations[self.origin.0]
    }

    pub fn get(&self, id: DestinationId) -> Option<&Destination> {
        self.destinations.get(id.0)
    }

    pub fn iter(&self) -> impl Iterator<Item = (DestinationId, &Destination)> + '_ {
        self.destinations
            .iter()
            .enumerate()
            .map(|(i, d)| (DestinationId(i), d))
    }

    /// Every destination except the origin, in registry order.
    pub fn non_origin(&self) -> impl Iterator<Item = (DestinationId, &Destination)> + '_ {
        let origin = self.origin;
        self.iter().filter(move |(id, _)| *id != origin)
    }

    pub fn find_by_name(&self, name: &str) -> Option<(DestinationId, &Destination)> {
        self.iter().find(|(_, d)| d.name == name)
    }

    pub fn len(&self) -> usize {
        self.destinations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.destinations.is_empty()
    }
}
