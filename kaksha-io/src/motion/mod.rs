//! Waypoint-following drive strategies.
//!
//! Two genuinely different kinematics modes, modeled as separate
//! implementations of one [`Drive`] interface rather than mode flags on
//! a single object:
//!
//! - [`PointDrive`]: discrete point-to-point motion that steps straight
//!   at the target and snaps onto it - the simplified agent backend.
//! - [`DiffDrive`]: continuous rotation-first control over a
//!   [`Chassis`](crate::chassis::Chassis) - the simulated or physical
//!   differential-drive backend.

pub mod diff;
pub mod point;

pub use diff::{DiffDrive, DiffDriveConfig};
pub use point::PointDrive;

use kaksha_map::{Pose2D, WorldPoint};

/// Waypoint-following capability interface.
///
/// Positions are in cell units, matching the floor plan's continuous
/// frame.
pub trait Drive {
    /// Set the current motion target.
    fn move_to(&mut self, target: WorldPoint);

    /// Advance by `dt` seconds. Returns whether motion is still in
    /// progress.
    fn update(&mut self, dt: f32) -> bool;

    /// Abandon the current target and stop.
    fn halt(&mut self);

    /// Current pose estimate.
    fn pose(&mut self) -> Pose2D;

    /// Whether a motion target is active.
    fn is_moving(&self) -> bool;
}
