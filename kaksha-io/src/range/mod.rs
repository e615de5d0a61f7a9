//! Directional range sensing.
//!
//! A fixed fan of distance sensors around the robot. Two backends:
//! [`GridRangeSensor`] simulates readings by ray-marching the floor
//! plan, [`SerialRangeSensor`] polls a physical sensor board.

pub mod grid;
pub mod serial;

pub use grid::{GridRangeSensor, GridSensorConfig};
pub use serial::SerialRangeSensor;

use kaksha_map::Pose2D;
use std::f32::consts::{FRAC_PI_2, FRAC_PI_4, PI};
use std::panic::{AssertUnwindSafe, catch_unwind};

/// Default sensor fan: eight directions relative to the robot heading,
/// starting dead ahead and stepping clockwise.
pub const DEFAULT_SENSOR_ANGLES: [f32; 8] = [
    0.0,                  // ahead
    FRAC_PI_4,            // front right
    FRAC_PI_2,            // right
    3.0 * FRAC_PI_4,      // rear right
    PI,                   // behind
    -3.0 * FRAC_PI_4,     // rear left
    -FRAC_PI_2,           // left
    -FRAC_PI_4,           // front left
];

/// Obstacle-proximity listener. Receives the full distance vector of
/// the poll that tripped the safety threshold.
pub type ObstacleCallback = Box<dyn FnMut(&[f32])>;

/// Range sensing capability interface.
///
/// `pose` is the robot's current pose; directions are relative to its
/// heading. Distances are in meters, with the backend's maximum range
/// (or `f32::INFINITY` when a physical board has no data) standing in
/// for "no obstacle within range".
pub trait RangeSensor {
    /// Poll every configured direction.
    fn distances(&mut self, pose: Pose2D) -> Vec<f32>;

    /// Cheap single-direction check: is the given relative direction
    /// clear out to `distance` meters?
    fn is_direction_clear(&mut self, pose: Pose2D, direction: f32, distance: f32) -> bool;

    /// Register an obstacle-proximity listener, invoked whenever a full
    /// poll sees any distance below the safety threshold.
    fn on_obstacle(&mut self, callback: ObstacleCallback);

    /// Release resources.
    fn close(&mut self);
}

/// Listener registry shared by the sensor backends.
///
/// A panicking listener is caught and logged; it never prevents the
/// remaining listeners from running or aborts the poll.
#[derive(Default)]
pub(crate) struct CallbackRegistry {
    callbacks: Vec<ObstacleCallback>,
}

impl CallbackRegistry {
    pub(crate) fn register(&mut self, callback: ObstacleCallback) {
        self.callbacks.push(callback);
    }

    pub(crate) fn notify(&mut self, distances: &[f32]) {
        for callback in &mut self.callbacks {
            if catch_unwind(AssertUnwindSafe(|| callback(distances))).is_err() {
                log::warn!("obstacle listener panicked; continuing with remaining listeners");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[test]
    fn test_default_angles_span_the_circle() {
        assert_eq!(DEFAULT_SENSOR_ANGLES.len(), 8);
        assert_eq!(DEFAULT_SENSOR_ANGLES[0], 0.0);
        // Adjacent sensors are 45 degrees apart (mod 2pi)
        for pair in DEFAULT_SENSOR_ANGLES.windows(2) {
            let gap = kaksha_map::core::math::angle_diff(pair[0], pair[1]).abs();
            assert!((gap - FRAC_PI_4).abs() < 1e-6);
        }
    }

    #[test]
    fn test_panicking_listener_does_not_stop_others() {
        let mut registry = CallbackRegistry::default();
        let seen = Rc::new(RefCell::new(Vec::new()));

        registry.register(Box::new(|_| panic!("listener one is broken")));
        let seen_clone = Rc::clone(&seen);
        registry.register(Box::new(move |d| {
            seen_clone.borrow_mut().push(d.to_vec());
        }));

        registry.notify(&[0.2, 1.0]);
        registry.notify(&[0.1, 1.0]);

        assert_eq!(seen.borrow().len(), 2);
        assert_eq!(seen.borrow()[0], vec![0.2, 1.0]);
    }
}
