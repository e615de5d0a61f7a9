//! Floor plan grid storage.
//!
//! Row-major grid of [`CellType`] plus the name-keyed location map.
//! Pure data and query structure - path planning and sensing live in
//! their own modules.

use crate::core::{CellType, GridCoord, WorldPoint};
use crate::error::{MapError, Result};
use crate::grid::NamedLocation;
use std::collections::HashMap;

/// Default cell edge length in meters.
pub const DEFAULT_RESOLUTION: f32 = 0.5;

/// 2D office floor plan.
///
/// The grid is indexed as `(x, y)` with `(0, 0)` at the top-left; cells
/// are stored row-major. Out-of-range queries answer "not walkable"
/// rather than erroring - a robot asking about a cell beyond the map
/// edge gets the same answer as for a wall.
#[derive(Clone, Debug)]
pub struct FloorPlan {
    /// Grid width in cells
    width: usize,
    /// Grid height in cells
    height: usize,
    /// Cell edge length in meters
    resolution: f32,
    /// Cell types, row-major
    cells: Vec<CellType>,
    /// Named locations keyed by name
    locations: HashMap<String, NamedLocation>,
}

impl FloorPlan {
    /// Create an empty (all-walkable) plan with the default resolution.
    pub fn new(width: usize, height: usize) -> Self {
        Self::with_resolution(width, height, DEFAULT_RESOLUTION)
    }

    /// Create an empty plan with an explicit resolution (meters/cell).
    pub fn with_resolution(width: usize, height: usize, resolution: f32) -> Self {
        Self {
            width,
            height,
            resolution,
            cells: vec![CellType::Empty; width * height],
            locations: HashMap::new(),
        }
    }

    /// Grid width in cells.
    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    /// Grid height in cells.
    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    /// Cell edge length in meters.
    #[inline]
    pub fn resolution(&self) -> f32 {
        self.resolution
    }

    /// Total number of cells.
    #[inline]
    pub fn cell_count(&self) -> usize {
        self.width * self.height
    }

    /// Check if grid coordinates are within bounds.
    #[inline]
    pub fn in_bounds(&self, x: i32, y: i32) -> bool {
        x >= 0 && y >= 0 && (x as usize) < self.width && (y as usize) < self.height
    }

    #[inline]
    fn index(&self, x: i32, y: i32) -> Option<usize> {
        if self.in_bounds(x, y) {
            Some(y as usize * self.width + x as usize)
        } else {
            None
        }
    }

    /// Get the cell type, `None` outside the grid.
    #[inline]
    pub fn get(&self, x: i32, y: i32) -> Option<CellType> {
        self.index(x, y).map(|i| self.cells[i])
    }

    /// Get the cell type at a coordinate.
    #[inline]
    pub fn cell_at(&self, coord: GridCoord) -> Option<CellType> {
        self.get(coord.x, coord.y)
    }

    /// Set a single cell. Writes outside the grid are ignored.
    #[inline]
    pub fn set_cell(&mut self, x: i32, y: i32, cell_type: CellType) {
        if let Some(i) = self.index(x, y) {
            self.cells[i] = cell_type;
        }
    }

    /// Check whether a cell permits traversal.
    ///
    /// Out-of-range coordinates are not walkable - never an error.
    #[inline]
    pub fn is_walkable(&self, x: i32, y: i32) -> bool {
        self.get(x, y).is_some_and(CellType::is_walkable)
    }

    /// Walkable 8-connected neighbors of a cell.
    ///
    /// A diagonal neighbor is included only when **both** orthogonal
    /// cells adjacent to it are walkable, so paths can never cut through
    /// a wall corner where two diagonal walls touch.
    pub fn walkable_neighbors(&self, x: i32, y: i32) -> Vec<GridCoord> {
        let mut neighbors = Vec::with_capacity(8);
        for neighbor in GridCoord::new(x, y).neighbors_8() {
            if !self.is_walkable(neighbor.x, neighbor.y) {
                continue;
            }
            let dx = neighbor.x - x;
            let dy = neighbor.y - y;
            if dx != 0 && dy != 0 {
                // Diagonal step: both orthogonal cells must be open
                if !self.is_walkable(x + dx, y) || !self.is_walkable(x, y + dy) {
                    continue;
                }
            }
            neighbors.push(neighbor);
        }
        neighbors
    }

    /// Fill a rectangle with a cell type, clamped to the grid.
    pub fn fill_rect(&mut self, x: i32, y: i32, w: i32, h: i32, cell_type: CellType) {
        for cy in y..y + h {
            for cx in x..x + w {
                self.set_cell(cx, cy, cell_type);
            }
        }
    }

    /// Draw a walled room with optional door openings.
    ///
    /// Walls on all four sides, interior set to `Empty`, then doors
    /// punched at the given offsets relative to the room's top-left
    /// corner.
    pub fn draw_room(&mut self, x: i32, y: i32, w: i32, h: i32, doors: &[(i32, i32)]) {
        self.fill_rect(x, y, w, 1, CellType::Wall);
        self.fill_rect(x, y + h - 1, w, 1, CellType::Wall);
        self.fill_rect(x, y, 1, h, CellType::Wall);
        self.fill_rect(x + w - 1, y, 1, h, CellType::Wall);
        if w > 2 && h > 2 {
            self.fill_rect(x + 1, y + 1, w - 2, h - 2, CellType::Empty);
        }
        for &(dx, dy) in doors {
            self.set_cell(x + dx, y + dy, CellType::Door);
        }
    }

    /// Register a named location.
    ///
    /// Rejects empty names and out-of-bounds cells. A duplicate name
    /// overwrites the earlier entry - last write wins. This is a
    /// deliberate policy, not an oversight: map builders re-register
    /// locations when refining a layout.
    pub fn add_location(
        &mut self,
        name: impl Into<String>,
        x: i32,
        y: i32,
        category: impl Into<String>,
    ) -> Result<()> {
        let name = name.into();
        if name.is_empty() {
            return Err(MapError::InvalidLocation("empty name".to_string()));
        }
        if !self.in_bounds(x, y) {
            return Err(MapError::InvalidLocation(format!(
                "cell ({x}, {y}) outside {}x{} grid",
                self.width, self.height
            )));
        }
        let location = NamedLocation::new(name.clone(), GridCoord::new(x, y), category);
        self.locations.insert(name, location);
        Ok(())
    }

    /// Look up a named location.
    pub fn location(&self, name: &str) -> Result<&NamedLocation> {
        self.locations
            .get(name)
            .ok_or_else(|| MapError::LocationNotFound(name.to_string()))
    }

    /// All named locations.
    pub fn locations(&self) -> &HashMap<String, NamedLocation> {
        &self.locations
    }

    /// Replace the location map wholesale (used by deserialization).
    pub(crate) fn set_locations(&mut self, locations: HashMap<String, NamedLocation>) {
        self.locations = locations;
    }

    /// Raw cell slice, row-major (for serialization and rendering).
    pub fn cells(&self) -> &[CellType] {
        &self.cells
    }

    /// Round a continuous point to its grid cell.
    #[inline]
    pub fn world_to_grid(&self, point: WorldPoint) -> GridCoord {
        point.nearest_cell()
    }

    /// Center of a grid cell in continuous coordinates.
    #[inline]
    pub fn grid_to_world(&self, coord: GridCoord) -> WorldPoint {
        coord.to_world()
    }

    /// Convert a distance in cell units to meters.
    #[inline]
    pub fn cells_to_meters(&self, cells: f32) -> f32 {
        cells * self.resolution
    }

    /// Convert a distance in meters to cell units.
    #[inline]
    pub fn meters_to_cells(&self, meters: f32) -> f32 {
        meters / self.resolution
    }

    /// Render the plan as ASCII for terminal display.
    ///
    /// `.` empty, `#` wall, `D` door, `T` desk, `C` chair, `E` dock.
    /// Named locations are listed below the grid.
    pub fn to_ascii(&self) -> String {
        let mut lines = Vec::with_capacity(self.height + self.locations.len() + 3);
        let header: String = (0..self.width).map(|i| (b'0' + (i % 10) as u8) as char).collect();
        lines.push(format!("   {header}"));
        for y in 0..self.height as i32 {
            let row: String = (0..self.width as i32)
                .map(|x| self.get(x, y).map_or('?', CellType::as_char))
                .collect();
            lines.push(format!("{y:2} {row}"));
        }
        if !self.locations.is_empty() {
            lines.push(String::new());
            lines.push("locations:".to_string());
            let mut names: Vec<_> = self.locations.keys().collect();
            names.sort();
            for name in names {
                let loc = &self.locations[name];
                lines.push(format!(
                    "  {}: ({}, {}) [{}]",
                    name, loc.position.x, loc.position.y, loc.category
                ));
            }
        }
        lines.join("\n")
    }
}
