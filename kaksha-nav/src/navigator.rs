//! Navigation executor - plans paths and follows them.
//!
//! The [`Navigator`] resolves named targets against the floor plan,
//! plans with A*, feeds waypoints to a [`Drive`] one at a time, and
//! replans from the robot's current cell when the forward direction is
//! obstructed - throttled by a cooldown so a lingering obstacle does
//! not cause replan thrashing.

use crate::error::{NavError, Result};
use crate::patrol::{PatrolEntry, PatrolSchedule};
use kaksha_io::motion::Drive;
use kaksha_io::range::RangeSensor;
use kaksha_map::pathfinding::AStarPlanner;
use kaksha_map::{FloorPlan, GridCoord};
use serde::Deserialize;

/// Navigation execution state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NavState {
    /// No active target.
    #[default]
    Idle,

    /// Resolving a target and planning a path (transient - only
    /// observable inside `navigate_to`).
    Planning,

    /// Following the active path waypoint by waypoint.
    Following,
}

/// Configuration for the navigator.
#[derive(Clone, Debug, Deserialize)]
pub struct NavigatorConfig {
    /// Seconds between automatic replanning attempts (default: 2.0).
    #[serde(default = "default_replan_cooldown")]
    pub replan_cooldown_s: f32,

    /// Forward clearance required while following, in meters
    /// (default: 0.8). Anything closer triggers a replan attempt.
    #[serde(default = "default_obstacle_check_distance")]
    pub obstacle_check_distance_m: f32,
}

fn default_replan_cooldown() -> f32 {
    2.0
}

fn default_obstacle_check_distance() -> f32 {
    0.8
}

impl Default for NavigatorConfig {
    fn default() -> Self {
        Self {
            replan_cooldown_s: default_replan_cooldown(),
            obstacle_check_distance_m: default_obstacle_check_distance(),
        }
    }
}

/// One-shot arrival notification.
type ArrivalCallback = Box<dyn FnOnce()>;

/// Navigation executor.
///
/// Call [`update`](Navigator::update) at a regular rate with the shared
/// floor plan, the tick duration, the drive, and optionally the range
/// sensor. The navigator never owns the plan - callers pass a borrow
/// each tick so map edits made between ticks are always visible.
pub struct Navigator {
    config: NavigatorConfig,
    state: NavState,
    path: Vec<GridCoord>,
    path_index: usize,
    goal: Option<GridCoord>,
    current_target: Option<String>,
    on_arrival: Option<ArrivalCallback>,
    replan_cooldown: f32,
    patrol: PatrolSchedule,
}

impl Navigator {
    /// Create a navigator with the given configuration.
    pub fn new(config: NavigatorConfig) -> Self {
        Self {
            config,
            state: NavState::Idle,
            path: Vec::new(),
            path_index: 0,
            goal: None,
            current_target: None,
            on_arrival: None,
            replan_cooldown: 0.0,
            patrol: PatrolSchedule::default(),
        }
    }

    /// Create with default configuration.
    pub fn with_defaults() -> Self {
        Self::new(NavigatorConfig::default())
    }

    /// Current execution state.
    pub fn state(&self) -> NavState {
        self.state
    }

    /// Whether a navigation is in progress.
    pub fn is_navigating(&self) -> bool {
        self.state != NavState::Idle
    }

    /// Name of the active target, if any.
    pub fn current_target(&self) -> Option<&str> {
        self.current_target.as_deref()
    }

    /// The full active path.
    pub fn current_path(&self) -> &[GridCoord] {
        &self.path
    }

    /// Waypoints not yet dispatched to the drive.
    pub fn remaining_path(&self) -> &[GridCoord] {
        &self.path[self.path_index.min(self.path.len())..]
    }

    /// Register a one-shot callback fired when the active navigation
    /// arrives. Replaced by the next `navigate_to`.
    pub fn on_arrival(&mut self, callback: impl FnOnce() + 'static) {
        self.on_arrival = Some(Box::new(callback));
    }

    /// Start navigating to a named location from the drive's current
    /// position.
    ///
    /// An unknown name fails with [`NavError::LocationNotFound`] and
    /// leaves any in-progress navigation untouched. A planning failure
    /// fails with [`NavError::NoPath`] and leaves the navigator idle -
    /// the prior path is already superseded at that point.
    pub fn navigate_to(
        &mut self,
        plan: &FloorPlan,
        name: &str,
        drive: &mut dyn Drive,
    ) -> Result<()> {
        let goal = match plan.location(name) {
            Ok(location) => location.position,
            Err(_) => {
                log::warn!("unknown navigation target {name:?}");
                return Err(NavError::LocationNotFound(name.to_string()));
            }
        };
        self.start_navigation(plan, goal, Some(name.to_string()), drive)
    }

    /// Start navigating to an explicit cell (e.g. an API request
    /// carrying raw coordinates instead of a location name).
    ///
    /// Same failure semantics as [`navigate_to`](Navigator::navigate_to)
    /// minus the name resolution.
    pub fn navigate_to_cell(
        &mut self,
        plan: &FloorPlan,
        goal: GridCoord,
        drive: &mut dyn Drive,
    ) -> Result<()> {
        self.start_navigation(plan, goal, None, drive)
    }

    fn start_navigation(
        &mut self,
        plan: &FloorPlan,
        goal: GridCoord,
        name: Option<String>,
        drive: &mut dyn Drive,
    ) -> Result<()> {
        let label = name
            .clone()
            .unwrap_or_else(|| format!("({}, {})", goal.x, goal.y));

        // The new request supersedes whatever was active.
        self.state = NavState::Planning;
        self.path.clear();
        self.path_index = 0;
        self.goal = None;
        self.current_target = None;
        self.on_arrival = None;

        let start = drive.pose().position().nearest_cell();
        let result = AStarPlanner::with_defaults(plan).find_path(start, goal);
        if !result.success {
            log::warn!(
                "no path from ({}, {}) to {label} ({:?})",
                start.x,
                start.y,
                result.failure_reason
            );
            self.state = NavState::Idle;
            return Err(NavError::NoPath {
                from_x: start.x,
                from_y: start.y,
                target: label,
            });
        }

        log::info!(
            "path to {label}: {} waypoints, cost {:.2}",
            result.path.len(),
            result.cost
        );
        self.path = result.path;
        self.path_index = 0;
        self.goal = Some(goal);
        self.current_target = name;
        self.state = NavState::Following;
        Ok(())
    }

    /// Advance navigation by one tick.
    ///
    /// Checks forward clearance (replanning when obstructed and the
    /// cooldown has lapsed), dispatches the next waypoint whenever the
    /// drive is not mid-move, fires the arrival callback once on
    /// reaching the final cell, and advances the drive by `dt`.
    pub fn update(
        &mut self,
        plan: &FloorPlan,
        dt: f32,
        drive: &mut dyn Drive,
        mut sensor: Option<&mut dyn RangeSensor>,
    ) {
        if !self.is_navigating() {
            return;
        }

        if self.replan_cooldown > 0.0 {
            self.replan_cooldown -= dt;
        }

        if let Some(sensor) = sensor.as_deref_mut()
            && self.replan_cooldown <= 0.0
            && self.path_index < self.path.len()
        {
            let pose = drive.pose();
            if !sensor.is_direction_clear(pose, 0.0, self.config.obstacle_check_distance_m) {
                self.try_replan(plan, drive);
            }
        }

        if !drive.is_moving() {
            if self.path_index < self.path.len() {
                let next = self.path[self.path_index];
                drive.move_to(next.to_world());
                self.path_index += 1;
            } else {
                // Final cell reached
                log::info!(
                    "arrived at {}",
                    self.current_target.as_deref().unwrap_or("target cell")
                );
                self.current_target = None;
                self.goal = None;
                self.state = NavState::Idle;
                if let Some(callback) = self.on_arrival.take() {
                    callback();
                }
                return;
            }
        }

        drive.update(dt);
    }

    /// Replan to the current target from the drive's position.
    ///
    /// On success the new path replaces the old one wholesale and the
    /// cooldown restarts. On failure the navigator keeps following the
    /// existing path and will retry once the obstacle check fails again
    /// with the cooldown lapsed.
    fn try_replan(&mut self, plan: &FloorPlan, drive: &mut dyn Drive) -> bool {
        let Some(goal) = self.goal else {
            return false;
        };

        let start = drive.pose().position().nearest_cell();
        let result = AStarPlanner::with_defaults(plan).find_path(start, goal);
        if !result.success {
            log::warn!(
                "replan to ({}, {}) failed from ({}, {})",
                goal.x,
                goal.y,
                start.x,
                start.y
            );
            return false;
        }

        log::info!(
            "replanned to ({}, {}): {} waypoints",
            goal.x,
            goal.y,
            result.path.len()
        );
        self.path = result.path;
        self.path_index = 0;
        self.replan_cooldown = self.config.replan_cooldown_s;
        // Abandon the in-flight waypoint; the new path starts from the
        // current cell.
        drive.halt();
        true
    }

    /// Install a patrol schedule (sorted by trigger time).
    pub fn set_patrol_schedule(&mut self, entries: Vec<PatrolEntry>) {
        self.patrol = PatrolSchedule::new(entries);
    }

    /// Check the patrol schedule against the current clock, triggering
    /// at most one due entry per call, in time order. Passed entries
    /// never re-trigger.
    pub fn check_patrol(
        &mut self,
        plan: &FloorPlan,
        current_minutes: f32,
        drive: &mut dyn Drive,
    ) -> Option<PatrolEntry> {
        let entry = self.patrol.pop_due(current_minutes)?;
        log::info!(
            "patrol trigger: {} -> {}",
            entry.action,
            entry.location
        );
        if let Err(e) = self.navigate_to(plan, &entry.location, drive) {
            log::warn!("patrol navigation failed: {e}");
        }
        Some(entry)
    }
}
