//! Simulated chassis with differential-drive kinematics.

use super::Chassis;
use crate::error::Result;
use kaksha_map::Pose2D;
use kaksha_map::core::math::normalize_angle;

/// Software-only chassis for testing navigation without hardware.
///
/// [`integrate`](Chassis::integrate) applies the differential-drive
/// model: heading first (`theta += omega * dt`, wrapped to [-π, π)),
/// then position along the new heading
/// (`x += v * cos(theta) * dt`, `y += v * sin(theta) * dt`).
pub struct MockChassis {
    pose: Pose2D,
    linear: f32,
    angular: f32,
    connected: bool,
}

impl MockChassis {
    /// Create a mock chassis at the given pose.
    pub fn new(x: f32, y: f32, heading: f32) -> Self {
        log::info!("MockChassis at ({x:.2}, {y:.2}), heading {heading:.2} rad");
        Self {
            pose: Pose2D::new(x, y, heading),
            linear: 0.0,
            angular: 0.0,
            connected: true,
        }
    }

    /// Currently commanded velocities (linear, angular).
    pub fn commanded_velocity(&self) -> (f32, f32) {
        (self.linear, self.angular)
    }
}

impl Chassis for MockChassis {
    fn set_velocity(&mut self, linear: f32, angular: f32) -> Result<()> {
        self.linear = linear;
        self.angular = angular;
        Ok(())
    }

    fn stop(&mut self) -> Result<()> {
        self.linear = 0.0;
        self.angular = 0.0;
        Ok(())
    }

    fn odometry(&mut self) -> Pose2D {
        self.pose
    }

    fn is_connected(&self) -> bool {
        self.connected
    }

    fn close(&mut self) -> Result<()> {
        self.connected = false;
        self.stop()
    }

    fn integrate(&mut self, dt: f32) {
        if self.linear.abs() < 1e-9 && self.angular.abs() < 1e-9 {
            return;
        }

        let theta = normalize_angle(self.pose.theta + self.angular * dt);
        self.pose = Pose2D {
            x: self.pose.x + self.linear * theta.cos() * dt,
            y: self.pose.y + self.linear * theta.sin() * dt,
            theta,
        };
    }
}
