//! The floor plan occupancy grid and named locations.

pub mod locations;
pub mod plan;

pub use locations::NamedLocation;
pub use plan::FloorPlan;
