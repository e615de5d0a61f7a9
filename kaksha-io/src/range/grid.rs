//! Simulated range sensor backed by floor plan raycasting.

use super::{CallbackRegistry, DEFAULT_SENSOR_ANGLES, ObstacleCallback, RangeSensor};
use kaksha_map::query::{RayMarchConfig, cast_ray};
use kaksha_map::{FloorPlan, Pose2D};
use std::sync::{Arc, RwLock};

/// Configuration for the simulated range sensor.
#[derive(Clone, Debug)]
pub struct GridSensorConfig {
    /// Sensor directions relative to the robot heading (radians).
    pub angles: Vec<f32>,
    /// Maximum detection range in meters.
    pub max_range_m: f32,
    /// Readings below this trip the obstacle listeners (meters).
    pub safe_distance_m: f32,
    /// Ray march step in cell units.
    pub step_cells: f32,
}

impl Default for GridSensorConfig {
    fn default() -> Self {
        Self {
            angles: DEFAULT_SENSOR_ANGLES.to_vec(),
            max_range_m: 5.0,
            safe_distance_m: 0.5,
            step_cells: 0.25,
        }
    }
}

/// Range sensor that ray-marches the shared floor plan.
///
/// Holds the plan behind the application's coarse lock so that map
/// edits made elsewhere (e.g. a newly observed obstacle) are visible on
/// the next poll.
pub struct GridRangeSensor {
    plan: Arc<RwLock<FloorPlan>>,
    config: GridSensorConfig,
    callbacks: CallbackRegistry,
}

impl GridRangeSensor {
    /// Create a simulated sensor over the shared plan.
    pub fn new(plan: Arc<RwLock<FloorPlan>>, config: GridSensorConfig) -> Self {
        log::info!(
            "GridRangeSensor: {} directions, max range {:.1}m",
            config.angles.len(),
            config.max_range_m
        );
        Self {
            plan,
            config,
            callbacks: CallbackRegistry::default(),
        }
    }

    /// Create with the default eight-direction fan.
    pub fn with_defaults(plan: Arc<RwLock<FloorPlan>>) -> Self {
        Self::new(plan, GridSensorConfig::default())
    }

    fn cast(&self, pose: Pose2D, world_angle: f32) -> f32 {
        let ray = RayMarchConfig {
            step_cells: self.config.step_cells,
            max_range_m: self.config.max_range_m,
        };
        match self.plan.read() {
            Ok(plan) => cast_ray(&plan, pose.position(), world_angle, &ray),
            Err(_) => {
                log::warn!("floor plan lock poisoned, reporting max range");
                self.config.max_range_m
            }
        }
    }
}

impl RangeSensor for GridRangeSensor {
    fn distances(&mut self, pose: Pose2D) -> Vec<f32> {
        let readings: Vec<f32> = self
            .config
            .angles
            .iter()
            .map(|&relative| self.cast(pose, pose.theta + relative))
            .collect();

        if readings.iter().any(|&d| d < self.config.safe_distance_m) {
            self.callbacks.notify(&readings);
        }

        readings
    }

    fn is_direction_clear(&mut self, pose: Pose2D, direction: f32, distance: f32) -> bool {
        self.cast(pose, pose.theta + direction) >= distance
    }

    fn on_obstacle(&mut self, callback: ObstacleCallback) {
        self.callbacks.register(callback);
    }

    fn close(&mut self) {
        log::info!("GridRangeSensor closed");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use kaksha_map::CellType;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn shared_plan(setup: impl FnOnce(&mut FloorPlan)) -> Arc<RwLock<FloorPlan>> {
        let mut plan = FloorPlan::new(20, 20);
        setup(&mut plan);
        Arc::new(RwLock::new(plan))
    }

    #[test]
    fn test_reading_per_configured_angle() {
        let plan = shared_plan(|_| {});
        let mut sensor = GridRangeSensor::with_defaults(plan);
        let readings = sensor.distances(Pose2D::new(10.0, 10.0, 0.0));
        assert_eq!(readings.len(), 8);
        // Open grid interior: everything at max range
        for d in &readings {
            assert_relative_eq!(*d, 5.0);
        }
    }

    #[test]
    fn test_wall_ahead_shortens_forward_reading() {
        let plan = shared_plan(|p| p.fill_rect(14, 0, 1, 20, CellType::Wall));
        let mut sensor = GridRangeSensor::with_defaults(plan);
        let readings = sensor.distances(Pose2D::new(10.0, 10.0, 0.0));
        // Forward (index 0) hits the wall ~3.5 cells out = 1.75m
        assert!(readings[0] < 2.0);
        // Behind (index 4) is clear out to max range
        assert!(readings[4] > readings[0]);
        assert_relative_eq!(readings[4], 5.0);
    }

    #[test]
    fn test_heading_rotates_the_fan() {
        let plan = shared_plan(|p| p.fill_rect(14, 0, 1, 20, CellType::Wall));
        let mut sensor = GridRangeSensor::with_defaults(plan);
        // Facing +Y: the wall at +X is now on the robot's left
        let readings = sensor.distances(Pose2D::new(10.0, 10.0, std::f32::consts::FRAC_PI_2));
        let forward = readings[0];
        let left = readings[6];
        assert!(left < forward, "left {left} should see the wall, forward {forward} clear");
    }

    #[test]
    fn test_is_direction_clear_thresholds() {
        let plan = shared_plan(|p| p.fill_rect(14, 0, 1, 20, CellType::Wall));
        let mut sensor = GridRangeSensor::with_defaults(plan);
        let pose = Pose2D::new(10.0, 10.0, 0.0);
        // Wall ~1.75m ahead
        assert!(sensor.is_direction_clear(pose, 0.0, 1.0));
        assert!(!sensor.is_direction_clear(pose, 0.0, 2.5));
        // Behind is clear well past that
        assert!(sensor.is_direction_clear(pose, std::f32::consts::PI, 2.5));
    }

    #[test]
    fn test_obstacle_callback_fires_below_safe_distance() {
        static FIRED: AtomicUsize = AtomicUsize::new(0);

        let plan = shared_plan(|p| p.fill_rect(11, 0, 1, 20, CellType::Wall));
        let mut sensor = GridRangeSensor::with_defaults(plan);
        sensor.on_obstacle(Box::new(|_| {
            FIRED.fetch_add(1, Ordering::SeqCst);
        }));

        // Wall half a cell ahead: 0.25m < 0.5m safety threshold
        sensor.distances(Pose2D::new(10.0, 10.0, 0.0));
        assert_eq!(FIRED.load(Ordering::SeqCst), 1);

        // Far from anything: no callback
        sensor.distances(Pose2D::new(5.0, 10.0, std::f32::consts::PI));
        assert_eq!(FIRED.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_map_edits_visible_through_shared_lock() {
        let plan = shared_plan(|_| {});
        let mut sensor = GridRangeSensor::with_defaults(Arc::clone(&plan));
        let pose = Pose2D::new(10.0, 10.0, 0.0);

        assert!(sensor.is_direction_clear(pose, 0.0, 2.0));
        plan.write().unwrap().fill_rect(12, 0, 1, 20, CellType::Wall);
        assert!(!sensor.is_direction_clear(pose, 0.0, 2.0));
    }
}
