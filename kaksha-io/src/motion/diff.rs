//! Differential-drive waypoint controller.

use super::Drive;
use crate::chassis::Chassis;
use kaksha_map::core::math::normalize_angle;
use kaksha_map::{Pose2D, WorldPoint};

/// Tuning for the rotation-first waypoint controller.
#[derive(Clone, Debug)]
pub struct DiffDriveConfig {
    /// Cruise linear velocity (cell units/s).
    pub linear_vel: f32,
    /// Rotation-in-place angular velocity (rad/s).
    pub angular_vel: f32,
    /// Heading error above which the robot rotates in place (radians).
    pub heading_threshold: f32,
    /// Distance at which a target counts as reached (cell units).
    pub arrive_threshold: f32,
}

impl Default for DiffDriveConfig {
    fn default() -> Self {
        Self {
            linear_vel: 2.0,
            angular_vel: 3.0,
            heading_threshold: 0.3, // ~17 degrees
            arrive_threshold: 0.15,
        }
    }
}

/// Rotation-first waypoint controller over a [`Chassis`].
///
/// While the heading error to the target exceeds the threshold the
/// robot rotates in place; once roughly aligned it translates with a
/// proportional angular correction. Arrival within the threshold stops
/// the chassis and clears the target.
pub struct DiffDrive<C: Chassis> {
    chassis: C,
    target: Option<WorldPoint>,
    config: DiffDriveConfig,
}

impl<C: Chassis> DiffDrive<C> {
    /// Wrap a chassis with the given tuning.
    pub fn new(chassis: C, config: DiffDriveConfig) -> Self {
        Self {
            chassis,
            target: None,
            config,
        }
    }

    /// Wrap a chassis with default tuning.
    pub fn with_defaults(chassis: C) -> Self {
        Self::new(chassis, DiffDriveConfig::default())
    }

    /// Access the wrapped chassis.
    pub fn chassis_mut(&mut self) -> &mut C {
        &mut self.chassis
    }

    /// Compute the velocity command toward a target from a pose.
    fn velocity_toward(&self, pose: Pose2D, target: WorldPoint) -> (f32, f32) {
        let dx = target.x - pose.x;
        let dy = target.y - pose.y;
        let distance = (dx * dx + dy * dy).sqrt();
        let angle_error = normalize_angle(dy.atan2(dx) - pose.theta);

        if angle_error.abs() > self.config.heading_threshold {
            // Rotate in place first
            (0.0, angle_error.signum() * self.config.angular_vel)
        } else {
            // Translate with proportional angular correction
            let linear = (distance * 2.0).min(self.config.linear_vel);
            let angular =
                (angle_error * 2.0).clamp(-self.config.angular_vel, self.config.angular_vel);
            (linear, angular)
        }
    }
}

impl<C: Chassis> Drive for DiffDrive<C> {
    fn move_to(&mut self, target: WorldPoint) {
        log::debug!("diff drive target ({:.2}, {:.2})", target.x, target.y);
        self.target = Some(target);
    }

    fn update(&mut self, dt: f32) -> bool {
        let Some(target) = self.target else {
            return false;
        };

        let pose = self.chassis.odometry();
        let distance = pose.position().distance(&target);

        if distance <= self.config.arrive_threshold {
            self.target = None;
            if let Err(e) = self.chassis.stop() {
                log::warn!("chassis stop failed: {e}");
            }
            return false;
        }

        let (linear, angular) = self.velocity_toward(pose, target);
        if let Err(e) = self.chassis.set_velocity(linear, angular) {
            log::warn!("chassis velocity command failed: {e}");
        }
        self.chassis.integrate(dt);
        true
    }

    fn halt(&mut self) {
        self.target = None;
        if let Err(e) = self.chassis.stop() {
            log::warn!("chassis stop failed: {e}");
        }
    }

    fn pose(&mut self) -> Pose2D {
        self.chassis.odometry()
    }

    fn is_moving(&self) -> bool {
        self.target.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chassis::MockChassis;

    fn drive_at_origin() -> DiffDrive<MockChassis> {
        DiffDrive::with_defaults(MockChassis::new(0.0, 0.0, 0.0))
    }

    #[test]
    fn test_rotates_in_place_when_misaligned() {
        let mut drive = drive_at_origin();
        // Target directly to the left: 90 degrees off heading
        drive.move_to(WorldPoint::new(0.0, 4.0));
        drive.update(0.01);

        let (linear, angular) = drive.chassis_mut().commanded_velocity();
        assert_eq!(linear, 0.0);
        assert!(angular > 0.0); // CCW toward +Y
    }

    #[test]
    fn test_translates_when_aligned() {
        let mut drive = drive_at_origin();
        drive.move_to(WorldPoint::new(4.0, 0.0));
        drive.update(0.01);

        let (linear, angular) = drive.chassis_mut().commanded_velocity();
        assert!(linear > 0.0);
        assert!(angular.abs() < 0.1);
    }

    #[test]
    fn test_converges_on_target() {
        let mut drive = drive_at_origin();
        drive.move_to(WorldPoint::new(3.0, 2.0));

        let mut steps = 0;
        while drive.update(0.05) {
            steps += 1;
            assert!(steps < 2000, "did not converge");
        }

        let pose = drive.pose();
        assert!(pose.position().distance(&WorldPoint::new(3.0, 2.0)) < 0.2);
        assert!(!drive.is_moving());
        // Chassis stopped on arrival
        assert_eq!(drive.chassis_mut().commanded_velocity(), (0.0, 0.0));
    }

    #[test]
    fn test_halt_stops_chassis() {
        let mut drive = drive_at_origin();
        drive.move_to(WorldPoint::new(5.0, 0.0));
        drive.update(0.1);
        drive.halt();
        assert!(!drive.is_moving());
        assert_eq!(drive.chassis_mut().commanded_velocity(), (0.0, 0.0));
    }
}
