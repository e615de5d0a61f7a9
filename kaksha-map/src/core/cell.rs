//! Cell types for the office occupancy grid.
//!
//! Kaksha uses semantic cell types that distinguish the different pieces
//! of office furniture, not just free/occupied.

use serde::{Deserialize, Serialize};

/// Semantic cell type - what occupies this cell of the floor plan?
///
/// The walkable subset is fixed: `Empty`, `Door` and `Dock` permit
/// traversal; everything else blocks it. This subset is immutable at
/// runtime.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[repr(u8)]
pub enum CellType {
    /// Open floor, traversable
    #[default]
    Empty = 0,

    /// Wall segment, blocks traversal
    Wall = 1,

    /// Door opening, traversable
    Door = 2,

    /// Desk surface, blocks traversal
    Desk = 3,

    /// Chair, blocks traversal
    Chair = 4,

    /// Charging dock, traversable (the robot parks on it)
    Dock = 5,
}

impl CellType {
    /// Can the robot occupy this cell?
    #[inline]
    pub fn is_walkable(self) -> bool {
        matches!(self, CellType::Empty | CellType::Door | CellType::Dock)
    }

    /// Is this cell an obstacle (any non-walkable type)?
    #[inline]
    pub fn is_obstacle(self) -> bool {
        !self.is_walkable()
    }

    /// Convert from the persisted integer code.
    ///
    /// Returns `None` for unknown codes so deserialization can reject
    /// malformed maps instead of silently coercing them.
    #[inline]
    pub fn from_u8(value: u8) -> Option<Self> {
        match value {
            0 => Some(CellType::Empty),
            1 => Some(CellType::Wall),
            2 => Some(CellType::Door),
            3 => Some(CellType::Desk),
            4 => Some(CellType::Chair),
            5 => Some(CellType::Dock),
            _ => None,
        }
    }

    /// Single character representation for ASCII rendering.
    pub fn as_char(self) -> char {
        match self {
            CellType::Empty => '.',
            CellType::Wall => '#',
            CellType::Door => 'D',
            CellType::Desk => 'T',
            CellType::Chair => 'C',
            CellType::Dock => 'E',
        }
    }
}
