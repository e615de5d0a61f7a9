//! Geometric queries over the floor plan.

pub mod raycast;

pub use raycast::{RayMarchConfig, cast_ray};
