//! Path planning over the floor plan grid.

pub mod astar;

pub use astar::{AStarConfig, AStarPlanner, PathFailure, PathResult};
