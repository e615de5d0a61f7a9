//! Point and coordinate types for the floor plan grid.

use serde::{Deserialize, Serialize};
use std::ops::{Add, Mul, Sub};

/// Grid coordinates (integer cell indices).
///
/// (0, 0) is the top-left cell; X grows to the right (columns), Y grows
/// downward (rows). Signed so that out-of-range queries stay
/// representable - the grid answers "not walkable" for them instead of
/// erroring.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct GridCoord {
    /// X coordinate (column index)
    pub x: i32,
    /// Y coordinate (row index)
    pub y: i32,
}

impl GridCoord {
    /// Create a new grid coordinate.
    #[inline]
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Chebyshev distance (max of x and y distance) - adjacency metric
    /// for 8-connected grids.
    #[inline]
    pub fn chebyshev_distance(&self, other: &GridCoord) -> i32 {
        (self.x - other.x).abs().max((self.y - other.y).abs())
    }

    /// Euclidean distance, used as the A* heuristic.
    #[inline]
    pub fn euclidean_distance(&self, other: &GridCoord) -> f32 {
        let dx = (self.x - other.x) as f32;
        let dy = (self.y - other.y) as f32;
        (dx * dx + dy * dy).sqrt()
    }

    /// Get the 8 neighbors (orthogonal then diagonal).
    #[inline]
    pub fn neighbors_8(&self) -> [GridCoord; 8] {
        [
            GridCoord::new(self.x, self.y - 1),     // N
            GridCoord::new(self.x + 1, self.y),     // E
            GridCoord::new(self.x, self.y + 1),     // S
            GridCoord::new(self.x - 1, self.y),     // W
            GridCoord::new(self.x + 1, self.y - 1), // NE
            GridCoord::new(self.x + 1, self.y + 1), // SE
            GridCoord::new(self.x - 1, self.y + 1), // SW
            GridCoord::new(self.x - 1, self.y - 1), // NW
        ]
    }

    /// Center of this cell in continuous coordinates.
    #[inline]
    pub fn to_world(self) -> WorldPoint {
        WorldPoint::new(self.x as f32, self.y as f32)
    }
}

impl Add for GridCoord {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        GridCoord::new(self.x + other.x, self.y + other.y)
    }
}

impl Sub for GridCoord {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        GridCoord::new(self.x - other.x, self.y - other.y)
    }
}

/// Continuous coordinates in cell units (f32).
///
/// Cell (x, y) is centered on the continuous point (x, y); multiplying by
/// the plan resolution converts to meters.
#[derive(Clone, Copy, Debug, PartialEq, Default, Serialize, Deserialize)]
pub struct WorldPoint {
    /// X coordinate in cell units
    pub x: f32,
    /// Y coordinate in cell units
    pub y: f32,
}

impl WorldPoint {
    /// Origin point.
    pub const ZERO: WorldPoint = WorldPoint { x: 0.0, y: 0.0 };

    /// Create a new world point.
    #[inline]
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to another point.
    #[inline]
    pub fn distance(&self, other: &WorldPoint) -> f32 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }

    /// Angle from this point to another (radians, CCW from +X).
    #[inline]
    pub fn angle_to(&self, other: &WorldPoint) -> f32 {
        (other.y - self.y).atan2(other.x - self.x)
    }

    /// Point at a given angle and distance from this point.
    #[inline]
    pub fn point_at(&self, angle: f32, distance: f32) -> WorldPoint {
        WorldPoint::new(
            self.x + distance * angle.cos(),
            self.y + distance * angle.sin(),
        )
    }

    /// Round to the nearest grid cell.
    #[inline]
    pub fn nearest_cell(&self) -> GridCoord {
        GridCoord::new(self.x.round() as i32, self.y.round() as i32)
    }
}

impl Add for WorldPoint {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        WorldPoint::new(self.x + other.x, self.y + other.y)
    }
}

impl Sub for WorldPoint {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        WorldPoint::new(self.x - other.x, self.y - other.y)
    }
}

impl Mul<f32> for WorldPoint {
    type Output = Self;

    #[inline]
    fn mul(self, scalar: f32) -> Self {
        WorldPoint::new(self.x * scalar, self.y * scalar)
    }
}

impl From<GridCoord> for WorldPoint {
    #[inline]
    fn from(coord: GridCoord) -> Self {
        coord.to_world()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_neighbors_8_are_adjacent() {
        let c = GridCoord::new(5, 5);
        for n in c.neighbors_8() {
            assert_eq!(c.chebyshev_distance(&n), 1);
        }
    }

    #[test]
    fn test_euclidean_distance() {
        let a = GridCoord::new(0, 0);
        let b = GridCoord::new(3, 4);
        assert_relative_eq!(a.euclidean_distance(&b), 5.0, epsilon = 1e-6);
    }

    #[test]
    fn test_world_point_distance() {
        let a = WorldPoint::new(0.0, 0.0);
        let b = WorldPoint::new(3.0, 4.0);
        assert_relative_eq!(a.distance(&b), 5.0, epsilon = 1e-6);
    }

    #[test]
    fn test_nearest_cell_rounds() {
        assert_eq!(WorldPoint::new(1.4, 1.6).nearest_cell(), GridCoord::new(1, 2));
        assert_eq!(WorldPoint::new(-0.4, 0.4).nearest_cell(), GridCoord::new(0, 0));
    }

    #[test]
    fn test_point_at() {
        let origin = WorldPoint::ZERO;
        let east = origin.point_at(0.0, 2.0);
        assert_relative_eq!(east.x, 2.0, epsilon = 1e-6);
        assert_relative_eq!(east.y, 0.0, epsilon = 1e-6);

        let north = origin.point_at(std::f32::consts::FRAC_PI_2, 1.0);
        assert_relative_eq!(north.x, 0.0, epsilon = 1e-6);
        assert_relative_eq!(north.y, 1.0, epsilon = 1e-6);
    }
}
