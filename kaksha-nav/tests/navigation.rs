//! End-to-end navigation scenarios over the full stack: floor plan,
//! planner, range sensor, drive strategies and the navigator.

use kaksha_io::chassis::MockChassis;
use kaksha_io::motion::{DiffDrive, Drive, PointDrive};
use kaksha_io::range::GridRangeSensor;
use kaksha_map::{CellType, FloorPlan, GridCoord, WorldPoint};
use kaksha_nav::{NavState, Navigator, PatrolEntry};
use std::sync::{Arc, RwLock};

#[test]
fn point_drive_reaches_named_corner() {
    // Agent at (0,0) on a 10x10 open grid, target at (9,9): repeated
    // updates must end the navigation with the agent on the target.
    let mut plan = FloorPlan::new(10, 10);
    plan.add_location("corner", 9, 9, "area").unwrap();

    let mut drive = PointDrive::new(0.0, 0.0, 2.0);
    let mut navigator = Navigator::with_defaults();
    navigator.navigate_to(&plan, "corner", &mut drive).unwrap();
    assert!(navigator.is_navigating());

    let mut ticks = 0;
    while navigator.is_navigating() {
        navigator.update(&plan, 0.1, &mut drive, None);
        ticks += 1;
        assert!(ticks < 5000, "navigation never finished");
    }

    let pose = drive.pose();
    assert!((pose.x - 9.0).abs() < 1e-3, "ended at x={}", pose.x);
    assert!((pose.y - 9.0).abs() < 1e-3, "ended at y={}", pose.y);
    assert_eq!(navigator.state(), NavState::Idle);
    assert!(navigator.current_target().is_none());
}

#[test]
fn diff_drive_reaches_named_corner() {
    let mut plan = FloorPlan::new(10, 10);
    plan.add_location("corner", 9, 9, "area").unwrap();

    let chassis = MockChassis::new(0.0, 0.0, 0.0);
    let mut drive = DiffDrive::with_defaults(chassis);
    let mut navigator = Navigator::with_defaults();
    navigator.navigate_to(&plan, "corner", &mut drive).unwrap();

    let mut ticks = 0;
    while navigator.is_navigating() {
        navigator.update(&plan, 0.05, &mut drive, None);
        ticks += 1;
        assert!(ticks < 20000, "navigation never finished");
    }

    let pose = drive.pose();
    assert!(
        pose.position().distance(&WorldPoint::new(9.0, 9.0)) < 0.5,
        "ended at ({:.2}, {:.2})",
        pose.x,
        pose.y
    );
}

#[test]
fn obstruction_triggers_replan_to_same_target() {
    // Start on an open corridor, then drop a wall across the robot's
    // forward direction. After one update with the cooldown elapsed the
    // active path must differ and still end at the same cell.
    let plan = Arc::new(RwLock::new(FloorPlan::new(12, 12)));
    plan.write()
        .unwrap()
        .add_location("far-side", 11, 5, "area")
        .unwrap();

    let mut sensor = GridRangeSensor::with_defaults(Arc::clone(&plan));
    let mut drive = PointDrive::new(0.0, 5.0, 1.0);
    let mut navigator = Navigator::with_defaults();

    {
        let guard = plan.read().unwrap();
        navigator.navigate_to(&guard, "far-side", &mut drive).unwrap();
    }
    let original_path = navigator.current_path().to_vec();
    assert_eq!(original_path.last(), Some(&GridCoord::new(11, 5)));

    // Walk forward until the robot is a couple of cells in
    for _ in 0..10 {
        let guard = plan.read().unwrap();
        navigator.update(&guard, 0.25, &mut drive, Some(&mut sensor));
    }
    assert!(drive.pose().x > 2.0);
    assert!(navigator.is_navigating());

    // Block the corridor ahead, leaving a detour along the bottom rows
    plan.write()
        .unwrap()
        .fill_rect(4, 0, 1, 10, CellType::Wall);

    {
        let guard = plan.read().unwrap();
        navigator.update(&guard, 0.25, &mut drive, Some(&mut sensor));
    }

    let new_path = navigator.current_path().to_vec();
    assert_ne!(new_path, original_path, "path should have been replanned");
    assert_eq!(new_path.last(), Some(&GridCoord::new(11, 5)));
    // The detour must dodge the wall column through the open rows
    assert!(new_path.iter().all(|c| c.x != 4 || c.y >= 10));

    // And the navigation still completes
    let mut ticks = 0;
    while navigator.is_navigating() {
        let guard = plan.read().unwrap();
        navigator.update(&guard, 0.25, &mut drive, Some(&mut sensor));
        ticks += 1;
        assert!(ticks < 5000, "detour never finished");
    }
    let pose = drive.pose();
    assert!((pose.x - 11.0).abs() < 1e-3);
    assert!((pose.y - 5.0).abs() < 1e-3);
}

#[test]
fn replan_failure_keeps_following() {
    // Obstacle ahead but no alternative route: the navigator should
    // keep its current path and keep retrying rather than give up.
    let plan = Arc::new(RwLock::new(FloorPlan::new(12, 3)));
    plan.write()
        .unwrap()
        .add_location("end", 11, 1, "area")
        .unwrap();

    let mut sensor = GridRangeSensor::with_defaults(Arc::clone(&plan));
    let mut drive = PointDrive::new(0.0, 1.0, 1.0);
    let mut navigator = Navigator::with_defaults();

    {
        let guard = plan.read().unwrap();
        navigator.navigate_to(&guard, "end", &mut drive).unwrap();
    }
    for _ in 0..8 {
        let guard = plan.read().unwrap();
        navigator.update(&guard, 0.25, &mut drive, Some(&mut sensor));
    }

    // Seal the corridor completely
    plan.write().unwrap().fill_rect(5, 0, 1, 3, CellType::Wall);
    let path_before = navigator.current_path().to_vec();

    for _ in 0..20 {
        let guard = plan.read().unwrap();
        navigator.update(&guard, 0.25, &mut drive, Some(&mut sensor));
    }

    // Still navigating on the old path, still targeting the far end
    assert!(navigator.is_navigating());
    assert_eq!(navigator.current_target(), Some("end"));
    assert_eq!(navigator.current_path(), path_before.as_slice());
}

#[test]
fn patrol_triggers_each_entry_once_in_order() {
    let mut plan = FloorPlan::new(10, 10);
    plan.add_location("a", 2, 2, "area").unwrap();
    plan.add_location("b", 5, 5, "area").unwrap();
    plan.add_location("c", 8, 8, "area").unwrap();

    let mut drive = PointDrive::new(0.0, 0.0, 2.0);
    let mut navigator = Navigator::with_defaults();
    navigator.set_patrol_schedule(vec![
        PatrolEntry::new(10.0, "a", "first"),
        PatrolEntry::new(20.0, "b", "second"),
        PatrolEntry::new(30.0, "c", "third"),
    ]);

    let mut triggered = Vec::new();
    for time in [5.0, 15.0, 25.0, 35.0] {
        if let Some(entry) = navigator.check_patrol(&plan, time, &mut drive) {
            triggered.push(entry.location);
        }
    }

    assert_eq!(triggered, ["a", "b", "c"]);

    // Entry "a" never re-triggers after its time has passed
    assert!(navigator.check_patrol(&plan, 40.0, &mut drive).is_none());
}

#[test]
fn patrol_triggers_start_navigation() {
    let mut plan = FloorPlan::new(10, 10);
    plan.add_location("post", 6, 0, "area").unwrap();

    let mut drive = PointDrive::new(0.0, 0.0, 2.0);
    let mut navigator = Navigator::with_defaults();
    navigator.set_patrol_schedule(vec![PatrolEntry::new(60.0, "post", "round")]);

    assert!(navigator.check_patrol(&plan, 30.0, &mut drive).is_none());
    assert!(!navigator.is_navigating());

    let entry = navigator.check_patrol(&plan, 61.0, &mut drive).unwrap();
    assert_eq!(entry.location, "post");
    assert!(navigator.is_navigating());
    assert_eq!(navigator.current_target(), Some("post"));
}
