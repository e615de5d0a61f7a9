//! The default office floor plan.
//!
//! A 20x12 cell office (10 m x 6 m at the default resolution): three
//! meeting rooms on the left and center, an open desk area on the
//! right, a pantry in the lower-right corner, a charging dock in the
//! lower-left and a two-cell entrance on the right wall, all joined by
//! a two-cell-wide corridor system.
//!
//! ```text
//!    01234567890123456789
//!  0 ####################
//!  1 #...#.#..#..TTC.TTC#
//!  2 #...D.#..#..TTC.TTC#
//!  3 #...#.#DD#.D###D####
//!  4 #####..............D
//!  5 #####..............D
//!  6 #...#..............#
//!  7 #...D......TTC.....#
//!  8 #...#......TTC.#####
//!  9 #####..........D...#
//! 10 ##E#D..........D...#
//! 11 ####################
//! ```

use crate::core::CellType;
use crate::grid::FloorPlan;

/// Build the default office floor plan.
///
/// Location registration cannot fail here - every cell is in bounds by
/// construction - so the builder returns the plan directly.
pub fn default_office() -> FloorPlan {
    let mut plan = FloorPlan::new(20, 12);

    // Outer walls
    plan.fill_rect(0, 0, 20, 1, CellType::Wall);
    plan.fill_rect(0, 11, 20, 1, CellType::Wall);
    plan.fill_rect(0, 0, 1, 12, CellType::Wall);
    plan.fill_rect(19, 0, 1, 12, CellType::Wall);

    // Meeting room A (upper left, 5x5), door on the right wall
    plan.draw_room(0, 0, 5, 5, &[(4, 2)]);
    register(&mut plan, "meeting-room-a", 2, 2, "room");

    // Meeting room B (lower left, 5x5), door on the right wall
    plan.draw_room(0, 5, 5, 5, &[(4, 2)]);
    register(&mut plan, "meeting-room-b", 2, 7, "room");

    // Meeting room C (upper center, 4x4), double door on the lower wall
    plan.draw_room(6, 0, 4, 4, &[(1, 3), (2, 3)]);
    register(&mut plan, "meeting-room-c", 7, 1, "room");

    // Corridor system: vertical corridor at x=5, east-west corridor at
    // y=4..5, and the right-half verticals at x=10
    plan.fill_rect(5, 0, 1, 12, CellType::Empty);
    plan.set_cell(5, 0, CellType::Wall);
    plan.set_cell(5, 11, CellType::Wall);
    plan.fill_rect(5, 4, 14, 2, CellType::Empty);
    plan.fill_rect(10, 0, 1, 4, CellType::Empty);
    plan.set_cell(10, 0, CellType::Wall);
    plan.fill_rect(10, 6, 1, 6, CellType::Empty);
    plan.set_cell(10, 11, CellType::Wall);

    // Charging nook (lower left): wall above, door out to the corridor
    plan.fill_rect(0, 10, 4, 1, CellType::Wall);
    plan.set_cell(4, 10, CellType::Door);
    plan.set_cell(2, 10, CellType::Dock);
    register(&mut plan, "dock", 4, 10, "charger");

    // Pantry (lower right, 5x4), doors on the left wall
    plan.draw_room(15, 8, 5, 4, &[(0, 1), (0, 2)]);
    register(&mut plan, "pantry", 17, 9, "room");

    // Entrance (right wall, two door cells)
    plan.set_cell(19, 4, CellType::Door);
    plan.set_cell(19, 5, CellType::Door);
    register(&mut plan, "entrance", 18, 4, "entrance");

    // Open desk area (upper right): dividing wall at y=3 with two doors
    plan.fill_rect(11, 3, 9, 1, CellType::Wall);
    plan.set_cell(11, 3, CellType::Door);
    plan.set_cell(15, 3, CellType::Door);

    // Upper desk rows: TTC . TTC with an aisle at x=15. Each named
    // location is the walkable docking cell beside the desk.
    plan.set_cell(12, 1, CellType::Desk);
    plan.set_cell(13, 1, CellType::Desk);
    plan.set_cell(14, 1, CellType::Chair);
    register(&mut plan, "desk-1", 11, 1, "area");

    plan.set_cell(12, 2, CellType::Desk);
    plan.set_cell(13, 2, CellType::Desk);
    plan.set_cell(14, 2, CellType::Chair);
    register(&mut plan, "desk-2", 11, 2, "area");

    plan.set_cell(16, 1, CellType::Desk);
    plan.set_cell(17, 1, CellType::Desk);
    plan.set_cell(18, 1, CellType::Chair);
    register(&mut plan, "desk-3", 15, 1, "area");

    plan.set_cell(16, 2, CellType::Desk);
    plan.set_cell(17, 2, CellType::Desk);
    plan.set_cell(18, 2, CellType::Chair);
    register(&mut plan, "desk-4", 15, 2, "area");

    // Lower desk rows (center right)
    plan.set_cell(11, 7, CellType::Desk);
    plan.set_cell(12, 7, CellType::Desk);
    plan.set_cell(13, 7, CellType::Chair);
    register(&mut plan, "desk-5", 14, 7, "area");

    plan.set_cell(11, 8, CellType::Desk);
    plan.set_cell(12, 8, CellType::Desk);
    plan.set_cell(13, 8, CellType::Chair);
    register(&mut plan, "desk-6", 14, 8, "area");

    // Corridor waypoint used by patrol routes
    register(&mut plan, "hall-center", 10, 4, "area");

    plan
}

fn register(plan: &mut FloorPlan, name: &str, x: i32, y: i32, category: &str) {
    // In-bounds by construction; a failure here is a bug in the layout.
    if let Err(e) = plan.add_location(name, x, y, category) {
        unreachable!("default office layout broken: {e}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pathfinding::AStarPlanner;

    #[test]
    fn test_dimensions_and_location_count() {
        let plan = default_office();
        assert_eq!(plan.width(), 20);
        assert_eq!(plan.height(), 12);
        assert_eq!(plan.locations().len(), 13);
    }

    #[test]
    fn test_every_location_is_walkable() {
        let plan = default_office();
        for (name, loc) in plan.locations() {
            assert!(
                plan.is_walkable(loc.position.x, loc.position.y),
                "{name} at ({}, {}) is not walkable",
                loc.position.x,
                loc.position.y
            );
        }
    }

    #[test]
    fn test_every_location_reachable_from_dock() {
        let plan = default_office();
        let dock = plan.location("dock").unwrap().position;
        let planner = AStarPlanner::with_defaults(&plan);
        for (name, loc) in plan.locations() {
            let result = planner.find_path(dock, loc.position);
            assert!(result.success, "{name} unreachable from the dock");
        }
    }

    #[test]
    fn test_outer_walls_closed_except_entrance() {
        let plan = default_office();
        for x in 0..20 {
            assert!(!plan.is_walkable(x, 0));
            assert!(!plan.is_walkable(x, 11));
        }
        for y in 0..12 {
            assert!(!plan.is_walkable(0, y));
            // Right wall is open only at the entrance doors
            let open = y == 4 || y == 5;
            assert_eq!(plan.is_walkable(19, y), open, "right wall at y={y}");
        }
    }

    #[test]
    fn test_meeting_room_a_only_entered_through_door() {
        let plan = default_office();
        // Interior cell (2, 2); the room's sole opening is (4, 2)
        assert_eq!(plan.get(4, 2), Some(CellType::Door));
        assert_eq!(plan.get(4, 1), Some(CellType::Wall));
        assert_eq!(plan.get(4, 3), Some(CellType::Wall));
    }
}
