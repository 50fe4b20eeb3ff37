//! A* route planning on the warehouse occupancy grid
//!
//! Searches the 8-connected grid from the worker's cell to the product's
//! cell. When the product sits inside a rack footprint the target is moved
//! to the first walkable cell found in square rings around it.
//!
//! Diagonal moves are allowed between any two walkable cells, even when
//! both orthogonal neighbours are blocked (no corner-cutting check).

use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashMap, HashSet};

use itertools::iproduct;
use log::{debug, trace};
use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};

use crate::common::{GridCell, Path, RoutePlanner, WorldPoint};
use crate::utils::OccupancyGrid;

/// Neighbour offsets `(dr, dc)`: up, down, left, right, then diagonals
const MOTIONS: [(i64, i64); 8] = [
    (-1, 0),
    (1, 0),
    (0, -1),
    (0, 1),
    (-1, -1),
    (-1, 1),
    (1, -1),
    (1, 1),
];

/// Configuration for the A* planner
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AStarConfig {
    /// Cost of a diagonal step (orthogonal steps cost 1)
    pub diagonal_cost: f64,
    /// Largest ring radius, in cells, searched when snapping a blocked destination
    pub snap_radius: usize,
}

impl Default for AStarConfig {
    fn default() -> Self {
        Self {
            diagonal_cost: std::f64::consts::SQRT_2,
            snap_radius: 10,
        }
    }
}

/// Why a search produced no route
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathFailure {
    StartOutOfBounds,
    EndOutOfBounds,
    NoPath,
}

/// Outcome of a single search
#[derive(Debug, Clone)]
pub struct PathResult {
    /// Raw route: exact start, interior cell centers, exact end
    pub path: Path,
    /// Cells visited by the route, start to target
    pub cells: Vec<GridCell>,
    /// Cell the search actually aimed for (after snapping)
    pub target: Option<GridCell>,
    /// Route cost in cell units
    pub cost: f64,
    pub nodes_expanded: usize,
    pub failure: Option<PathFailure>,
}

impl PathResult {
    fn failed(reason: PathFailure, target: Option<GridCell>, nodes_expanded: usize) -> Self {
        Self {
            path: Path::new(),
            cells: Vec::new(),
            target,
            cost: f64::INFINITY,
            nodes_expanded,
            failure: Some(reason),
        }
    }

    pub fn is_success(&self) -> bool {
        self.failure.is_none()
    }
}

/// Open set entry, ordered by `f` then by insertion sequence
#[derive(Debug)]
struct OpenNode {
    cell: GridCell,
    g: f64,
    f: OrderedFloat<f64>,
    seq: u64,
}

impl Eq for OpenNode {}

impl PartialEq for OpenNode {
    fn eq(&self, other: &Self) -> bool {
        self.f == other.f && self.seq == other.seq
    }
}

impl Ord for OpenNode {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reverse ordering for min-heap behavior
        other.f.cmp(&self.f).then_with(|| other.seq.cmp(&self.seq))
    }
}

impl PartialOrd for OpenNode {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// A* planner over a borrowed occupancy grid
pub struct AStarPlanner<'a> {
    grid: &'a OccupancyGrid,
    config: AStarConfig,
}

impl<'a> AStarPlanner<'a> {
    pub fn new(grid: &'a OccupancyGrid, config: AStarConfig) -> Self {
        AStarPlanner { grid, config }
    }

    pub fn with_defaults(grid: &'a OccupancyGrid) -> Self {
        Self::new(grid, AStarConfig::default())
    }

    /// Get reference to the grid
    pub fn grid(&self) -> &OccupancyGrid {
        self.grid
    }

    /// Search for a route from `start` to `end` in world coordinates
    pub fn find_path(&self, start: WorldPoint, end: WorldPoint) -> PathResult {
        trace!(
            "find_path: start=({:.1},{:.1}) end=({:.1},{:.1})",
            start.x, start.y, end.x, end.y
        );

        // Only bounds are checked here; a start inside a rack footprint is
        // routed out through its walkable neighbours.
        let start_cell = match self.grid.cell_of(&start) {
            Some(cell) => cell,
            None => {
                debug!("start ({:.1},{:.1}) outside grid", start.x, start.y);
                return PathResult::failed(PathFailure::StartOutOfBounds, None, 0);
            }
        };
        let end_cell = match self.grid.cell_of(&end) {
            Some(cell) => cell,
            None => {
                debug!("end ({:.1},{:.1}) outside grid", end.x, end.y);
                return PathResult::failed(PathFailure::EndOutOfBounds, None, 0);
            }
        };

        let target = if self.grid.is_walkable(end_cell) {
            end_cell
        } else {
            match self.snap_target(end_cell) {
                Some(cell) => {
                    trace!(
                        "destination ({},{}) blocked, snapped to ({},{})",
                        end_cell.row, end_cell.col, cell.row, cell.col
                    );
                    cell
                }
                None => {
                    debug!(
                        "no walkable cell within {} of ({},{})",
                        self.config.snap_radius, end_cell.row, end_cell.col
                    );
                    end_cell
                }
            }
        };

        self.search(start_cell, target, start, end)
    }

    /// First walkable cell in square rings of growing radius around `cell`
    pub fn snap_target(&self, cell: GridCell) -> Option<GridCell> {
        for radius in 1..=self.config.snap_radius as i64 {
            for (dr, dc) in iproduct!(-radius..=radius, -radius..=radius) {
                let candidate = GridCell::new(cell.row + dr, cell.col + dc);
                if self.grid.is_walkable(candidate) {
                    return Some(candidate);
                }
            }
        }
        None
    }

    fn search(&self, start: GridCell, target: GridCell, start_point: WorldPoint, end_point: WorldPoint) -> PathResult {
        let mut open_set = BinaryHeap::new();
        let mut closed_set: HashSet<GridCell> = HashSet::new();
        let mut came_from: HashMap<GridCell, GridCell> = HashMap::new();
        let mut g_score: HashMap<GridCell, f64> = HashMap::new();
        let mut seq: u64 = 0;

        g_score.insert(start, 0.0);
        open_set.push(OpenNode {
            cell: start,
            g: 0.0,
            f: OrderedFloat(self.calc_heuristic(start, target)),
            seq,
        });

        let mut nodes_expanded = 0;

        while let Some(current) = open_set.pop() {
            if closed_set.contains(&current.cell) {
                continue;
            }
            nodes_expanded += 1;

            if current.cell == target {
                debug!(
                    "route found: cost {:.2}, {} nodes expanded",
                    current.g, nodes_expanded
                );
                return self.build_result(&came_from, target, current.g, nodes_expanded, start_point, end_point);
            }

            closed_set.insert(current.cell);

            for &(dr, dc) in MOTIONS.iter() {
                let neighbor = GridCell::new(current.cell.row + dr, current.cell.col + dc);

                if !self.grid.is_walkable(neighbor) || closed_set.contains(&neighbor) {
                    continue;
                }

                let move_cost = if dr != 0 && dc != 0 {
                    self.config.diagonal_cost
                } else {
                    1.0
                };
                let tentative_g = current.g + move_cost;

                let known_g = g_score.get(&neighbor).copied().unwrap_or(f64::INFINITY);
                if tentative_g < known_g {
                    came_from.insert(neighbor, current.cell);
                    g_score.insert(neighbor, tentative_g);
                    seq += 1;
                    open_set.push(OpenNode {
                        cell: neighbor,
                        g: tentative_g,
                        f: OrderedFloat(tentative_g + self.calc_heuristic(neighbor, target)),
                        seq,
                    });
                }
            }
        }

        debug!("no route after expanding {} nodes", nodes_expanded);
        PathResult::failed(PathFailure::NoPath, Some(target), nodes_expanded)
    }

    fn calc_heuristic(&self, from: GridCell, to: GridCell) -> f64 {
        from.manhattan(&to) as f64
    }

    fn build_result(
        &self,
        came_from: &HashMap<GridCell, GridCell>,
        target: GridCell,
        cost: f64,
        nodes_expanded: usize,
        start_point: WorldPoint,
        end_point: WorldPoint,
    ) -> PathResult {
        let mut cells = vec![target];
        let mut current = target;
        while let Some(&prev) = came_from.get(&current) {
            cells.push(prev);
            current = prev;
        }
        cells.reverse();

        let mut points: Vec<WorldPoint> = cells.iter().map(|&c| self.grid.cell_center(c)).collect();
        // Endpoints are the caller's exact coordinates, not cell centers
        points[0] = start_point;
        if points.len() < 2 || points.last() != Some(&end_point) {
            points.push(end_point);
        }

        PathResult {
            path: Path::from_points(points),
            cells,
            target: Some(target),
            cost,
            nodes_expanded,
            failure: None,
        }
    }
}

impl<'a> RoutePlanner for AStarPlanner<'a> {
    fn plan(&self, start: WorldPoint, goal: WorldPoint) -> Path {
        self.find_path(start, goal).path
    }
}

/// Raw A* route with default settings; empty when unreachable
pub fn find_path(grid: &OccupancyGrid, start: WorldPoint, end: WorldPoint) -> Path {
    AStarPlanner::with_defaults(grid).find_path(start, end).path
}
