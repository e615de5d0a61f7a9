//! JSON map format.
//!
//! Document shape:
//!
//! ```json
//! {
//!   "width": 20,
//!   "height": 12,
//!   "grid": [[0, 1, ...], ...],
//!   "named_locations": {
//!     "pantry": {"name": "pantry", "position": [17, 9], "cell_type": "room"}
//!   }
//! }
//! ```
//!
//! `grid` is a row-major 2D array of integer cell-type codes. A loaded
//! document must round-trip losslessly; malformed documents (dimension
//! mismatch, unknown cell codes, out-of-bounds locations) fail fast with
//! [`MapError::InvalidFormat`].

use crate::core::CellType;
use crate::error::{MapError, Result};
use crate::grid::{FloorPlan, NamedLocation};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::io::{Read, Write};
use std::path::Path;

/// On-disk document shape.
#[derive(Serialize, Deserialize)]
struct MapDocument {
    width: usize,
    height: usize,
    grid: Vec<Vec<u8>>,
    #[serde(default)]
    named_locations: HashMap<String, NamedLocation>,
}

/// Save a floor plan to a JSON file.
pub fn save_json(plan: &FloorPlan, path: &Path) -> Result<()> {
    let mut file = std::fs::File::create(path)?;
    write_json(plan, &mut file)
}

/// Write a floor plan to a writer in JSON format.
pub fn write_json<W: Write>(plan: &FloorPlan, writer: &mut W) -> Result<()> {
    let grid: Vec<Vec<u8>> = (0..plan.height())
        .map(|y| {
            (0..plan.width())
                .map(|x| plan.get(x as i32, y as i32).unwrap_or_default() as u8)
                .collect()
        })
        .collect();

    let document = MapDocument {
        width: plan.width(),
        height: plan.height(),
        grid,
        named_locations: plan.locations().clone(),
    };

    serde_json::to_writer_pretty(writer, &document)?;
    Ok(())
}

/// Load a floor plan from a JSON file.
pub fn load_json(path: &Path) -> Result<FloorPlan> {
    let file = std::fs::File::open(path)?;
    read_json(std::io::BufReader::new(file))
}

/// Read a floor plan from a reader in JSON format.
pub fn read_json<R: Read>(reader: R) -> Result<FloorPlan> {
    let document: MapDocument = serde_json::from_reader(reader)?;

    if document.grid.len() != document.height {
        return Err(MapError::InvalidFormat(format!(
            "grid has {} rows, header says {}",
            document.grid.len(),
            document.height
        )));
    }

    let mut plan = FloorPlan::new(document.width, document.height);
    for (y, row) in document.grid.iter().enumerate() {
        if row.len() != document.width {
            return Err(MapError::InvalidFormat(format!(
                "row {} has {} cells, header says {}",
                y,
                row.len(),
                document.width
            )));
        }
        for (x, &code) in row.iter().enumerate() {
            let cell = CellType::from_u8(code).ok_or_else(|| {
                MapError::InvalidFormat(format!("unknown cell code {code} at ({x}, {y})"))
            })?;
            plan.set_cell(x as i32, y as i32, cell);
        }
    }

    for location in document.named_locations.values() {
        if !plan.in_bounds(location.position.x, location.position.y) {
            return Err(MapError::InvalidFormat(format!(
                "location {:?} at ({}, {}) outside {}x{} grid",
                location.name,
                location.position.x,
                location.position.y,
                document.width,
                document.height
            )));
        }
    }
    plan.set_locations(document.named_locations);

    log::debug!(
        "loaded {}x{} plan with {} locations",
        plan.width(),
        plan.height(),
        plan.locations().len()
    );

    Ok(plan)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_plan() -> FloorPlan {
        let mut plan = FloorPlan::new(6, 4);
        plan.draw_room(0, 0, 4, 4, &[(3, 1)]);
        plan.set_cell(5, 3, CellType::Dock);
        plan.add_location("room", 1, 1, "room").unwrap();
        plan.add_location("dock", 5, 3, "charger").unwrap();
        plan
    }

    #[test]
    fn test_round_trip_is_lossless() {
        let plan = sample_plan();

        let mut buffer = Vec::new();
        write_json(&plan, &mut buffer).unwrap();
        let restored = read_json(buffer.as_slice()).unwrap();

        assert_eq!(restored.width(), plan.width());
        assert_eq!(restored.height(), plan.height());
        assert_eq!(restored.cells(), plan.cells());
        assert_eq!(restored.locations(), plan.locations());
    }

    #[test]
    fn test_rejects_row_count_mismatch() {
        let doc = r#"{"width": 2, "height": 3, "grid": [[0, 0], [0, 0]]}"#;
        let err = read_json(doc.as_bytes()).unwrap_err();
        assert!(matches!(err, MapError::InvalidFormat(_)));
    }

    #[test]
    fn test_rejects_row_width_mismatch() {
        let doc = r#"{"width": 2, "height": 2, "grid": [[0, 0], [0]]}"#;
        let err = read_json(doc.as_bytes()).unwrap_err();
        assert!(matches!(err, MapError::InvalidFormat(_)));
    }

    #[test]
    fn test_rejects_unknown_cell_code() {
        let doc = r#"{"width": 2, "height": 1, "grid": [[0, 77]]}"#;
        let err = read_json(doc.as_bytes()).unwrap_err();
        assert!(matches!(err, MapError::InvalidFormat(_)));
    }

    #[test]
    fn test_rejects_out_of_bounds_location() {
        let doc = r#"{
            "width": 2, "height": 1, "grid": [[0, 0]],
            "named_locations": {
                "ghost": {"name": "ghost", "position": [5, 5], "cell_type": "room"}
            }
        }"#;
        let err = read_json(doc.as_bytes()).unwrap_err();
        assert!(matches!(err, MapError::InvalidFormat(_)));
    }

    #[test]
    fn test_missing_locations_field_defaults_empty() {
        let doc = r#"{"width": 1, "height": 1, "grid": [[0]]}"#;
        let plan = read_json(doc.as_bytes()).unwrap();
        assert!(plan.locations().is_empty());
    }
}
