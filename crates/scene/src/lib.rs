pub mod components;
pub mod entity;
pub mod labels;
pub mod mesh;
pub mod picking;
pub mod prefabs;
pub mod routes;
pub mod world;

pub use world::*;
