//! Site content: the destination registry shown on the hero globe, the
//! tooltip/modal text derived from it, and the shipment tracking records.

mod builtin;
pub mod destination;
pub mod detail;
pub mod tracking;

pub use destination::*;
pub use detail::*;
pub use tracking::*;

#[derive(Debug, Clone, PartialEq)]
pub enum CatalogError {
    NoOrigin,
    MultipleOrigins(Vec<String>),
    LatitudeOutOfRange { name: String, lat: f64 },
    LongitudeOutOfRange { name: String, lon: f64 },
    Corrupt(String),
}

impl std::fmt::Display for CatalogError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CatalogError::NoOrigin => write!(f, "no destination is marked as origin"),
            CatalogError::MultipleOrigins(names) => {
                write!(f, "more than one origin destination: {}", names.join(", "))
            }
            CatalogError::LatitudeOutOfRange { name, lat } => {
                write!(f, "destination {name:?} has latitude {lat} outside [-90, 90]")
            }
            CatalogError::LongitudeOutOfRange { name, lon } => {
                write!(f, "destination {name:?} has longitude {lon} outside [-180, 180]")
            }
            CatalogError::Corrupt(msg) => write!(f, "destination list corrupt: {msg}"),
        }
    }
}

impl std::error::Error for CatalogError {}
