//! # Kaksha-Nav: Navigation Executor
//!
//! The navigation brain of the Kaksha office robot. Owns the active
//! path and target, consumes the planner and range sensor, and drives
//! an agent toward successive waypoints with replanning under
//! obstruction.
//!
//! ## State machine
//!
//! ```text
//! Idle --navigate_to--> Planning --path found--> Following --arrival--> Idle
//!                          |                        |  ^
//!                          +--no path--> Idle       +--+ replan on obstruction
//!                                                      (cooldown-limited)
//! ```
//!
//! Everything is synchronous: `navigate_to` plans within the call
//! (Planning is transient) and `update` advances one tick. The owning
//! application calls `update` from its simulation loop.

pub mod config;
pub mod error;
pub mod navigator;
pub mod patrol;

pub use config::NavConfig;
pub use error::{NavError, Result};
pub use navigator::{NavState, Navigator, NavigatorConfig};
pub use patrol::{PatrolEntry, PatrolSchedule, default_patrol};
