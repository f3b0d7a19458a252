//! Curved flight routes from the origin hub to each destination.

use std::collections::BTreeMap;

use catalog::DestinationId;
use foundation::math::{QuadraticBezier3, Rgb, Vec3};

use crate::World;
use crate::entity::EntityId;

pub const ROUTE_COLOR: u32 = 0x2DBE60;
pub const ROUTE_OPACITY: f32 = 0.4;
pub const ROUTE_DASH: f32 = 0.2;
pub const ROUTE_GAP: f32 = 0.1;
pub const ROUTE_DIVISIONS: usize = 50;

pub const TUBE_RADIUS: f64 = 0.02;
pub const TUBE_SEGMENTS: u32 = 64;
pub const TUBE_SIDES: u32 = 8;

/// Resting look of every route once the pointer has moved over the globe.
pub const DEFAULT_APPEARANCE: RouteAppearance = RouteAppearance {
    color: 0x00FFAA,
    opacity: 0.4,
};
/// Look of the route belonging to the hovered destination.
pub const HIGHLIGHT_APPEARANCE: RouteAppearance = RouteAppearance {
    color: 0x50FF90,
    opacity: 1.0,
};

#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub enum RouteStyle {
    #[default]
    Dashed,
    Tube,
}

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct RouteAppearance {
    pub color: u32,
    pub opacity: f32,
}

/// Arc from `origin` to `target`, both on the sphere surface.
///
/// The control point lies on the bisecting ray at `5.2 + 0.55 * chord`, so
/// longer routes arc higher above the globe.
pub fn route_curve(origin: Vec3, target: Vec3) -> QuadraticBezier3 {
    let chord = origin.distance(target);
    let altitude = 5.2 + chord * 0.55;
    let mid = (origin + target).normalize().scale(altitude);
    QuadraticBezier3::new(origin, mid, target)
}

#[derive(Debug, Clone, PartialEq)]
pub struct Route {
    pub destination: DestinationId,
    pub entity: EntityId,
    pub curve: QuadraticBezier3,
}

/// Destination -> route lookup; the origin never has an entry.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RouteTable {
    routes: BTreeMap<DestinationId, Route>,
}

impl RouteTable {
    pub fn insert(&mut self, route: Route) {
        self.routes.insert(route.destination, route);
    }

    pub fn get(&self, destination: DestinationId) -> Option<&Route> {
        self.routes.get(&destination)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Route> + '_ {
        self.routes.values()
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }

    /// Resets every route to the default look, then highlights the route of
    /// `hovered` if it has one.
    pub fn apply_hover(&self, world: &mut World, hovered: Option<DestinationId>) {
        for route in self.routes.values() {
            set_appearance(world, route.entity, DEFAULT_APPEARANCE);
        }
        if let Some(route) = hovered.and_then(|d| self.routes.get(&d)) {
            set_appearance(world, route.entity, HIGHLIGHT_APPEARANCE);
        }
    }
}

fn set_appearance(world: &mut World, entity: EntityId, look: RouteAppearance) {
    if let Some(drawable) = world.drawable_3d_mut(entity) {
        drawable.material.color = Rgb::from_hex(look.color);
        drawable.material.opacity = look.opacity;
    }
}
