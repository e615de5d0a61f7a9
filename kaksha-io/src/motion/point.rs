//! Point-to-point drive strategy.

use super::Drive;
use kaksha_map::{Pose2D, WorldPoint};

/// Discrete straight-line mover.
///
/// Each update takes one step of `speed * dt` directly toward the
/// target, snapping exactly onto it once the remaining distance fits in
/// a single step. Heading always faces the direction of travel.
pub struct PointDrive {
    pose: Pose2D,
    target: Option<WorldPoint>,
    speed: f32,
}

impl PointDrive {
    /// Create a point drive at a position, facing +X.
    ///
    /// `speed` is in cell units per second.
    pub fn new(x: f32, y: f32, speed: f32) -> Self {
        Self {
            pose: Pose2D::new(x, y, 0.0),
            target: None,
            speed,
        }
    }

    /// Configured speed (cell units per second).
    pub fn speed(&self) -> f32 {
        self.speed
    }
}

impl Drive for PointDrive {
    fn move_to(&mut self, target: WorldPoint) {
        let dx = target.x - self.pose.x;
        let dy = target.y - self.pose.y;
        if dx.abs() > 1e-6 || dy.abs() > 1e-6 {
            self.pose.theta = dy.atan2(dx);
        }
        self.target = Some(target);
        log::debug!(
            "move_to ({:.2}, {:.2}), heading {:.2} rad",
            target.x,
            target.y,
            self.pose.theta
        );
    }

    fn update(&mut self, dt: f32) -> bool {
        let Some(target) = self.target else {
            return false;
        };

        let dx = target.x - self.pose.x;
        let dy = target.y - self.pose.y;
        let distance = (dx * dx + dy * dy).sqrt();
        let step = self.speed * dt;

        if distance <= step {
            // Close enough to snap exactly onto the target
            self.pose.x = target.x;
            self.pose.y = target.y;
            self.target = None;
            log::debug!("reached ({:.2}, {:.2})", target.x, target.y);
            return false;
        }

        let ratio = step / distance;
        self.pose.x += dx * ratio;
        self.pose.y += dy * ratio;
        self.pose.theta = dy.atan2(dx);
        true
    }

    fn halt(&mut self) {
        self.target = None;
    }

    fn pose(&mut self) -> Pose2D {
        self.pose
    }

    fn is_moving(&self) -> bool {
        self.target.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_steps_toward_target_then_snaps() {
        let mut drive = PointDrive::new(0.0, 0.0, 1.0);
        drive.move_to(WorldPoint::new(3.0, 0.0));
        assert!(drive.is_moving());

        // One second at speed 1: one cell covered, still moving
        assert!(drive.update(1.0));
        assert_relative_eq!(drive.pose().x, 1.0, epsilon = 1e-5);

        assert!(drive.update(1.0));
        // Remaining distance (1.0) fits in the next step: exact snap
        assert!(!drive.update(1.0));
        assert_eq!(drive.pose().x, 3.0);
        assert_eq!(drive.pose().y, 0.0);
        assert!(!drive.is_moving());
    }

    #[test]
    fn test_snap_is_exact_not_approximate() {
        let mut drive = PointDrive::new(0.0, 0.0, 2.0);
        drive.move_to(WorldPoint::new(0.7, 0.3));
        // Step of 2.0 * 1.0 covers the whole distance at once
        assert!(!drive.update(1.0));
        assert_eq!(drive.pose().x, 0.7);
        assert_eq!(drive.pose().y, 0.3);
    }

    #[test]
    fn test_heading_faces_travel_direction() {
        let mut drive = PointDrive::new(0.0, 0.0, 1.0);
        drive.move_to(WorldPoint::new(0.0, 5.0));
        assert_relative_eq!(drive.pose().theta, std::f32::consts::FRAC_PI_2, epsilon = 1e-5);

        drive.update(1.0);
        assert_relative_eq!(drive.pose().theta, std::f32::consts::FRAC_PI_2, epsilon = 1e-5);
    }

    #[test]
    fn test_update_without_target_is_idle() {
        let mut drive = PointDrive::new(1.0, 1.0, 1.0);
        assert!(!drive.update(0.5));
        assert_eq!(drive.pose().position(), WorldPoint::new(1.0, 1.0));
    }

    #[test]
    fn test_halt_abandons_target() {
        let mut drive = PointDrive::new(0.0, 0.0, 1.0);
        drive.move_to(WorldPoint::new(5.0, 0.0));
        drive.halt();
        assert!(!drive.is_moving());
        assert!(!drive.update(1.0));
    }
}
