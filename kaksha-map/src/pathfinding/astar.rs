//! A* planner over the 8-connected floor plan grid.

use crate::core::GridCoord;
use crate::grid::FloorPlan;
use log::{debug, trace};
use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashMap, HashSet};

/// A node in the A* search.
#[derive(Clone, Debug)]
struct AStarNode {
    coord: GridCoord,
    g_cost: f32, // Cost from start
    f_cost: f32, // g_cost + heuristic
}

impl Eq for AStarNode {}

impl PartialEq for AStarNode {
    fn eq(&self, other: &Self) -> bool {
        self.coord == other.coord
    }
}

impl Ord for AStarNode {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reverse ordering for min-heap behavior
        other
            .f_cost
            .partial_cmp(&self.f_cost)
            .unwrap_or(Ordering::Equal)
    }
}

impl PartialOrd for AStarNode {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// A* planner configuration.
#[derive(Clone, Debug)]
pub struct AStarConfig {
    /// Diagonal movement cost (orthogonal steps cost 1.0)
    pub diagonal_cost: f32,
    /// Maximum number of nodes to expand before giving up
    pub max_iterations: usize,
}

impl Default for AStarConfig {
    fn default() -> Self {
        Self {
            diagonal_cost: std::f32::consts::SQRT_2,
            max_iterations: 100_000,
        }
    }
}

/// Result of A* pathfinding.
#[derive(Clone, Debug)]
pub struct PathResult {
    /// Path from start to goal inclusive (empty if no path found)
    pub path: Vec<GridCoord>,
    /// Total path cost
    pub cost: f32,
    /// Number of nodes expanded during the search
    pub nodes_expanded: usize,
    /// Whether a path was found
    pub success: bool,
    /// Reason for failure (if any)
    pub failure_reason: Option<PathFailure>,
}

impl PathResult {
    fn failed(reason: PathFailure, nodes_expanded: usize) -> Self {
        Self {
            path: Vec::new(),
            cost: f32::INFINITY,
            nodes_expanded,
            success: false,
            failure_reason: Some(reason),
        }
    }

    /// Path length in cells.
    pub fn length_cells(&self) -> usize {
        self.path.len()
    }
}

/// Reason for path failure.
///
/// Absence of a path is an expected outcome in a dynamic environment,
/// so all of these are values on [`PathResult`], never panics.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PathFailure {
    /// Start cell is not walkable
    StartBlocked,
    /// Goal cell is not walkable
    GoalBlocked,
    /// No connecting route exists
    NoPath,
    /// Maximum iterations exceeded
    MaxIterationsExceeded,
}

/// A* pathfinder borrowing a floor plan.
///
/// Classic A* over the 8-connected grid: orthogonal steps cost 1.0,
/// diagonal steps cost √2, and the heuristic is Euclidean distance to
/// the goal (admissible and consistent for this cost model, so returned
/// paths are optimal). Corner cutting is excluded by the plan's
/// neighbor rule.
///
/// Frontier ties at equal f-cost are broken by whatever order the
/// binary heap yields - deterministic for a fixed input, but not a
/// documented ordering. Callers should rely on path cost and adjacency,
/// not exact shape in symmetric grids.
pub struct AStarPlanner<'a> {
    plan: &'a FloorPlan,
    config: AStarConfig,
}

impl<'a> AStarPlanner<'a> {
    /// Create a new planner.
    pub fn new(plan: &'a FloorPlan, config: AStarConfig) -> Self {
        Self { plan, config }
    }

    /// Create with default configuration.
    pub fn with_defaults(plan: &'a FloorPlan) -> Self {
        Self::new(plan, AStarConfig::default())
    }

    /// Find a path from start to goal.
    ///
    /// Unwalkable endpoints fail immediately without searching. Start
    /// equal to goal yields the single-element path.
    pub fn find_path(&self, start: GridCoord, goal: GridCoord) -> PathResult {
        trace!(
            "[AStar] find_path: start=({},{}) goal=({},{})",
            start.x, start.y, goal.x, goal.y
        );

        if !self.plan.is_walkable(start.x, start.y) {
            debug!("[AStar] FAILED: start ({},{}) not walkable", start.x, start.y);
            return PathResult::failed(PathFailure::StartBlocked, 0);
        }
        if !self.plan.is_walkable(goal.x, goal.y) {
            debug!("[AStar] FAILED: goal ({},{}) not walkable", goal.x, goal.y);
            return PathResult::failed(PathFailure::GoalBlocked, 0);
        }

        let mut open_set = BinaryHeap::new();
        let mut closed_set = HashSet::new();
        let mut came_from: HashMap<GridCoord, GridCoord> = HashMap::new();
        let mut g_scores: HashMap<GridCoord, f32> = HashMap::new();

        open_set.push(AStarNode {
            coord: start,
            g_cost: 0.0,
            f_cost: start.euclidean_distance(&goal),
        });
        g_scores.insert(start, 0.0);

        let mut nodes_expanded = 0;

        while let Some(current) = open_set.pop() {
            nodes_expanded += 1;

            if nodes_expanded > self.config.max_iterations {
                debug!("[AStar] FAILED: max iterations ({nodes_expanded} nodes)");
                return PathResult::failed(PathFailure::MaxIterationsExceeded, nodes_expanded);
            }

            if current.coord == goal {
                return self.reconstruct_path(came_from, goal, current.g_cost, nodes_expanded);
            }

            if closed_set.contains(&current.coord) {
                continue;
            }
            closed_set.insert(current.coord);

            for neighbor in self.plan.walkable_neighbors(current.coord.x, current.coord.y) {
                if closed_set.contains(&neighbor) {
                    continue;
                }

                let is_diagonal =
                    neighbor.x != current.coord.x && neighbor.y != current.coord.y;
                let move_cost = if is_diagonal {
                    self.config.diagonal_cost
                } else {
                    1.0
                };

                let tentative_g = g_scores[&current.coord] + move_cost;
                let current_g = g_scores.get(&neighbor).copied().unwrap_or(f32::INFINITY);
                if tentative_g < current_g {
                    came_from.insert(neighbor, current.coord);
                    g_scores.insert(neighbor, tentative_g);
                    open_set.push(AStarNode {
                        coord: neighbor,
                        g_cost: tentative_g,
                        f_cost: tentative_g + neighbor.euclidean_distance(&goal),
                    });
                }
            }
        }

        debug!("[AStar] FAILED: no path after expanding {nodes_expanded} nodes");
        PathResult::failed(PathFailure::NoPath, nodes_expanded)
    }

    /// Reconstruct the path by walking parent links back to start.
    fn reconstruct_path(
        &self,
        came_from: HashMap<GridCoord, GridCoord>,
        goal: GridCoord,
        cost: f32,
        nodes_expanded: usize,
    ) -> PathResult {
        let mut path = Vec::new();
        let mut current = goal;

        while let Some(&prev) = came_from.get(&current) {
            path.push(current);
            current = prev;
        }
        path.push(current); // Add start
        path.reverse();

        trace!(
            "[AStar] SUCCESS: path length={} cells, cost={:.2}, nodes_expanded={}",
            path.len(),
            cost,
            nodes_expanded
        );

        PathResult {
            path,
            cost,
            nodes_expanded,
            success: true,
            failure_reason: None,
        }
    }
}
