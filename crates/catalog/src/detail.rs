//! Text shown for a destination in the hover tooltip and the detail modal.

use crate::Destination;

pub const FALLBACK_SERVICES: &str = "Air Freight, Express Cargo";
pub const FALLBACK_ROUTING: &str = "Direct";
pub const FALLBACK_TRANSIT: &str = "3-5 business days";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TooltipContent {
    pub title: String,
    pub body: String,
    pub transit_line: String,
}

impl TooltipContent {
    pub fn for_destination(dest: &Destination) -> Self {
        Self {
            title: dest.name.clone(),
            body: dest.detail.clone(),
            transit_line: format!("Transit: {}", dest.transit),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModalContent {
    pub name: String,
    pub services: String,
    pub routing: String,
    pub transit: String,
}

impl ModalContent {
    /// Modal fields for `dest`; empty fields fall back to generic copy.
    pub fn for_destination(dest: &Destination) -> Self {
        Self {
            name: dest.name.clone(),
            services: or_fallback(&dest.services, FALLBACK_SERVICES),
            routing: or_fallback(&dest.routing, FALLBACK_ROUTING),
            transit: or_fallback(&dest.transit, FALLBACK_TRANSIT),
        }
    }
}

fn or_fallback(value: &str, fallback: &str) -> String {
    if value.is_empty() {
        fallback.to_string()
    } else {
        value.to_string()
    }
}
