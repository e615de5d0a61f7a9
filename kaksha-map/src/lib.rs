//! # Kaksha-Map: Office Floor Plan & Path Planning Library
//!
//! A 2D grid map library for indoor office navigation, designed as the
//! foundation of the Kaksha robot assistant stack.
//!
//! ## Features
//!
//! - **Semantic occupancy grid**: cells carry office semantics (walls,
//!   doors, desks, chairs, charging dock) instead of raw occupancy
//! - **Named locations**: meeting rooms, desks and other points of
//!   interest resolved by name
//! - **A\* path planning**: 8-connected search with √2 diagonal cost and
//!   corner-cutting prevention
//! - **Grid raycasting**: fixed-step ray marching for simulated range
//!   sensing
//! - **JSON persistence**: lossless round-trip of grid and location data
//!
//! ## Quick Start
//!
//! ```rust
//! use kaksha_map::{AStarPlanner, CellType, FloorPlan, GridCoord};
//!
//! let mut plan = FloorPlan::new(10, 10);
//! plan.fill_rect(4, 0, 1, 8, CellType::Wall);
//! plan.add_location("pantry", 8, 8, "room").unwrap();
//!
//! let goal = plan.location("pantry").unwrap().position;
//! let result = AStarPlanner::with_defaults(&plan).find_path(GridCoord::new(0, 0), goal);
//! assert!(result.success);
//! ```
//!
//! ## Coordinate Frame
//!
//! Grid coordinates are integer cell indices with (0, 0) at the top-left
//! corner, X growing to the right and Y growing downward. Continuous
//! coordinates ([`core::WorldPoint`], [`core::Pose2D`]) are expressed in
//! cell units; each cell covers `resolution` meters (0.5 m by default),
//! and meters appear only at the sensing and display boundary.
//!
//! ## Architecture
//!
//! - [`core`]: fundamental types (CellType, GridCoord, WorldPoint, Pose2D)
//! - [`grid`]: the [`FloorPlan`] occupancy grid and named locations
//! - [`pathfinding`]: A* planner over the grid
//! - [`query`]: ray marching queries
//! - [`io`]: JSON map persistence
//! - [`office`]: the default office floor plan

pub mod core;
pub mod error;
pub mod grid;
pub mod io;
pub mod office;
pub mod pathfinding;
pub mod query;

pub use self::core::{CellType, GridCoord, Pose2D, WorldPoint};
pub use error::{MapError, Result};
pub use grid::{FloorPlan, NamedLocation};
pub use pathfinding::{AStarConfig, AStarPlanner, PathFailure, PathResult};
