//! Named points of interest on the floor plan.

use crate::core::GridCoord;
use serde::{Deserialize, Serialize};

/// A named location, e.g. a meeting room, the entrance or the pantry.
///
/// Owned by the [`FloorPlan`](super::FloorPlan) in a name-keyed map.
/// Each name maps to exactly one cell; registering the same name twice
/// overwrites the earlier entry (last write wins).
///
/// Serializes in the persisted map format:
/// `{"name": .., "position": [x, y], "cell_type": ..}`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct NamedLocation {
    /// Location name, e.g. "meeting-room-a".
    pub name: String,
    /// Grid cell of the location.
    #[serde(with = "coord_array")]
    pub position: GridCoord,
    /// Category tag, e.g. "room", "entrance", "area", "charger".
    #[serde(rename = "cell_type")]
    pub category: String,
}

impl NamedLocation {
    /// Create a new named location.
    pub fn new(name: impl Into<String>, position: GridCoord, category: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            position,
            category: category.into(),
        }
    }
}

/// Persist a [`GridCoord`] as a two-element `[x, y]` array.
mod coord_array {
    use crate::core::GridCoord;
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    pub fn serialize<S: Serializer>(coord: &GridCoord, serializer: S) -> Result<S::Ok, S::Error> {
        [coord.x, coord.y].serialize(serializer)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<GridCoord, D::Error> {
        let [x, y] = <[i32; 2]>::deserialize(deserializer)?;
        Ok(GridCoord::new(x, y))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serializes_with_wire_field_names() {
        let loc = NamedLocation::new("pantry", GridCoord::new(17, 9), "room");
        let json = serde_json::to_value(&loc).unwrap();
        assert_eq!(json["name"], "pantry");
        assert_eq!(json["cell_type"], "room");
        assert_eq!(json["position"][0], 17);
        assert_eq!(json["position"][1], 9);
    }

    #[test]
    fn test_round_trip() {
        let loc = NamedLocation::new("entrance", GridCoord::new(18, 4), "entrance");
        let json = serde_json::to_string(&loc).unwrap();
        let back: NamedLocation = serde_json::from_str(&json).unwrap();
        assert_eq!(back, loc);
    }
}
