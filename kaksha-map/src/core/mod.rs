//! Fundamental types shared across the crate.

pub mod cell;
pub mod math;
pub mod point;
pub mod pose;

pub use cell::CellType;
pub use point::{GridCoord, WorldPoint};
pub use pose::Pose2D;
