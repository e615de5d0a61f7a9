//! Chassis control - the robot's drive base.
//!
//! One capability interface, two backends chosen at construction time:
//! [`MockChassis`] simulates differential-drive kinematics in software,
//! [`SerialChassis`] talks to a motor controller board over UART.

pub mod mock;
pub mod serial;

pub use mock::MockChassis;
pub use serial::SerialChassis;

use crate::error::Result;
use kaksha_map::Pose2D;

/// Drive base capability interface.
pub trait Chassis {
    /// Set linear (units/s, forward positive) and angular (rad/s, CCW
    /// positive) velocity.
    fn set_velocity(&mut self, linear: f32, angular: f32) -> Result<()>;

    /// Stop all motion.
    fn stop(&mut self) -> Result<()>;

    /// Current odometry estimate. Serial backends return the last
    /// successfully read pose when the board does not answer.
    fn odometry(&mut self) -> Pose2D;

    /// Whether the backend is connected and usable.
    fn is_connected(&self) -> bool;

    /// Release resources and stop the chassis.
    fn close(&mut self) -> Result<()>;

    /// Advance simulated kinematics by `dt` seconds.
    ///
    /// Hardware backends integrate on the board and ignore this; the
    /// default is a no-op.
    fn integrate(&mut self, _dt: f32) {}
}
