//! Ray marching for simulated range sensing.
//!
//! Marches a ray through the floor plan in fixed-size steps, rounding
//! each sample to the nearest cell and testing walkability. Used by the
//! simulated range sensor to compute obstacle distances.

use crate::core::WorldPoint;
use crate::grid::FloorPlan;

/// Ray marching parameters.
#[derive(Clone, Copy, Debug)]
pub struct RayMarchConfig {
    /// Step size in cell units.
    pub step_cells: f32,
    /// Maximum ray range in meters.
    pub max_range_m: f32,
}

impl Default for RayMarchConfig {
    fn default() -> Self {
        Self {
            step_cells: 0.25,
            max_range_m: 5.0,
        }
    }
}

/// March a ray from `origin` along `angle` and return the distance in
/// meters to the first unwalkable sample.
///
/// Samples start one step out from the origin. Cells outside the grid
/// terminate the ray just like walls - the map edge is an obstacle.
/// Returns `config.max_range_m` when nothing is hit within range.
pub fn cast_ray(plan: &FloorPlan, origin: WorldPoint, angle: f32, config: &RayMarchConfig) -> f32 {
    let max_range_cells = plan.meters_to_cells(config.max_range_m);
    let max_steps = (max_range_cells / config.step_cells).ceil() as usize;

    let cos_a = angle.cos();
    let sin_a = angle.sin();

    for i in 1..=max_steps {
        let travelled = config.step_cells * i as f32;
        let sample = WorldPoint::new(
            origin.x + cos_a * travelled,
            origin.y + sin_a * travelled,
        );
        let cell = sample.nearest_cell();
        if !plan.is_walkable(cell.x, cell.y) {
            return plan.cells_to_meters(travelled);
        }
    }

    config.max_range_m
}
