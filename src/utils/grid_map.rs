//! Occupancy grid for the warehouse floor plan
//!
//! Racks are rasterized onto a uniform grid of square cells. A cell is
//! blocked when any rack rectangle overlaps its span, even partially.

use std::fmt;
use std::ops::Deref;

use itertools::iproduct;
use log::debug;
use nalgebra::DMatrix;
use serde::{Deserialize, Serialize};

use crate::common::{GridCell, NavError, NavResult, Obstacle, WorldPoint};

/// Warehouse bounding box and cell edge length
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawGridConfig", into = "RawGridConfig")]
pub struct GridConfig {
    width: f64,
    height: f64,
    cell_size: f64,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
struct RawGridConfig {
    width: f64,
    height: f64,
    cell_size: f64,
}

impl TryFrom<RawGridConfig> for GridConfig {
    type Error = NavError;

    fn try_from(raw: RawGridConfig) -> Result<Self, Self::Error> {
        GridConfig::new(raw.width, raw.height, raw.cell_size)
    }
}

impl From<GridConfig> for RawGridConfig {
    fn from(config: GridConfig) -> Self {
        RawGridConfig {
            width: config.width,
            height: config.height,
            cell_size: config.cell_size,
        }
    }
}

impl GridConfig {
    pub fn new(width: f64, height: f64, cell_size: f64) -> NavResult<Self> {
        if !(cell_size.is_finite() && cell_size > 0.0) {
            return Err(NavError::InvalidParameter(format!(
                "cell_size must be positive, got {}",
                cell_size
            )));
        }
        if !(width.is_finite() && width > 0.0 && height.is_finite() && height > 0.0) {
            return Err(NavError::InvalidParameter(format!(
                "grid bounds must be positive, got {}x{}",
                width, height
            )));
        }
        Ok(Self { width, height, cell_size })
    }

    pub fn width(&self) -> f64 {
        self.width
    }

    pub fn height(&self) -> f64 {
        self.height
    }

    pub fn cell_size(&self) -> f64 {
        self.cell_size
    }

    pub fn cols(&self) -> usize {
        ((self.width / self.cell_size).ceil() as usize).max(1)
    }

    pub fn rows(&self) -> usize {
        ((self.height / self.cell_size).ceil() as usize).max(1)
    }
}

impl Default for GridConfig {
    /// 900x600 floor plan with 20-unit cells
    fn default() -> Self {
        Self {
            width: 900.0,
            height: 600.0,
            cell_size: 20.0,
        }
    }
}

/// State of a single grid cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CellState {
    #[default]
    Walkable,
    Blocked,
}

impl CellState {
    pub fn as_char(self) -> char {
        match self {
            CellState::Walkable => '.',
            CellState::Blocked => '#',
        }
    }
}

/// `rows x cols` matrix of cell states
#[derive(Debug, Clone, PartialEq)]
pub struct OccupancyGrid {
    cells: DMatrix<CellState>,
    cell_size: f64,
}

impl OccupancyGrid {
    /// All-walkable grid sized from the config
    pub fn new(config: &GridConfig) -> Self {
        Self {
            cells: DMatrix::from_element(config.rows(), config.cols(), CellState::Walkable),
            cell_size: config.cell_size(),
        }
    }

    pub fn rows(&self) -> usize {
        self.cells.nrows()
    }

    pub fn cols(&self) -> usize {
        self.cells.ncols()
    }

    pub fn cell_size(&self) -> f64 {
        self.cell_size
    }

    pub fn contains(&self, cell: GridCell) -> bool {
        cell.row >= 0
            && cell.col >= 0
            && (cell.row as usize) < self.rows()
            && (cell.col as usize) < self.cols()
    }

    /// Cell state, or `None` outside the grid
    pub fn state(&self, cell: GridCell) -> Option<CellState> {
        if !self.contains(cell) {
            return None;
        }
        self.cells.get((cell.row as usize, cell.col as usize)).copied()
    }

    /// Out-of-range cells are never walkable
    pub fn is_walkable(&self, cell: GridCell) -> bool {
        self.state(cell) == Some(CellState::Walkable)
    }

    /// Cell index of a world point, ignoring grid bounds
    pub fn cell_index(&self, point: &WorldPoint) -> Option<GridCell> {
        if !point.is_finite() {
            return None;
        }
        let row = (point.y / self.cell_size).floor();
        let col = (point.x / self.cell_size).floor();
        if row.abs() > i64::MAX as f64 || col.abs() > i64::MAX as f64 {
            return None;
        }
        Some(GridCell::new(row as i64, col as i64))
    }

    /// Cell containing a world point, `None` when outside the grid
    pub fn cell_of(&self, point: &WorldPoint) -> Option<GridCell> {
        self.cell_index(point).filter(|cell| self.contains(*cell))
    }

    /// World-space center of a cell
    pub fn cell_center(&self, cell: GridCell) -> WorldPoint {
        let half = self.cell_size / 2.0;
        WorldPoint::new(
            cell.col as f64 * self.cell_size + half,
            cell.row as f64 * self.cell_size + half,
        )
    }

    /// Mark every cell overlapped by the rectangle as blocked.
    ///
    /// Degenerate rectangles are ignored and the covered range is clipped
    /// to the grid.
    pub fn mark_obstacle(&mut self, obstacle: &Obstacle) {
        if obstacle.is_degenerate() {
            return;
        }
        let cs = self.cell_size;
        let (row_start, row_end) = clip_span(obstacle.y, obstacle.height, cs, self.rows());
        let (col_start, col_end) = clip_span(obstacle.x, obstacle.width, cs, self.cols());

        for row in row_start..row_end {
            for col in col_start..col_end {
                self.cells[(row, col)] = CellState::Blocked;
            }
        }
    }

    /// Every cell with its state, row-major
    pub fn iter_cells(&self) -> impl Iterator<Item = (GridCell, CellState)> + '_ {
        iproduct!(0..self.rows(), 0..self.cols())
            .map(move |(row, col)| (GridCell::new(row as i64, col as i64), self.cells[(row, col)]))
    }

    pub fn blocked_count(&self) -> usize {
        self.cells.iter().filter(|&&s| s == CellState::Blocked).count()
    }
}

/// Index range `floor(start / cs) .. ceil((start + len) / cs)` clipped to `[0, limit)`
fn clip_span(start: f64, len: f64, cs: f64, limit: usize) -> (usize, usize) {
    let lo = (start / cs).floor().max(0.0);
    let hi = ((start + len) / cs).ceil().min(limit as f64);
    if hi <= lo {
        return (0, 0);
    }
    (lo as usize, hi as usize)
}

impl Deref for OccupancyGrid {
    type Target = DMatrix<CellState>;

    fn deref(&self) -> &Self::Target {
        &self.cells
    }
}

impl fmt::Display for OccupancyGrid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..self.rows() {
            let line: String = (0..self.cols())
                .map(|col| self.cells[(row, col)].as_char())
                .collect();
            writeln!(f, "{}", line)?;
        }
        Ok(())
    }
}

/// Rasterize obstacles onto a fresh grid
pub fn build_grid(config: &GridConfig, obstacles: &[Obstacle]) -> OccupancyGrid {
    let mut grid = OccupancyGrid::new(config);
    for obstacle in obstacles {
        grid.mark_obstacle(obstacle);
    }
    debug!(
        "built {}x{} grid (cell {}), {} obstacles, {} blocked cells",
        grid.rows(),
        grid.cols(),
        config.cell_size(),
        obstacles.len(),
        grid.blocked_count()
    );
    grid
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    fn warehouse_config() -> GridConfig {
        GridConfig::new(900.0, 600.0, 20.0).unwrap()
    }

    #[test]
    fn test_grid_dimensions() {
        let config = warehouse_config();
        assert_eq!(config.cols(), 45);
        assert_eq!(config.rows(), 30);

        let ragged = GridConfig::new(95.0, 41.0, 20.0).unwrap();
        assert_eq!(ragged.cols(), 5);
        assert_eq!(ragged.rows(), 3);

        let tiny = GridConfig::new(1.0, 1.0, 20.0).unwrap();
        let grid = OccupancyGrid::new(&tiny);
        assert_eq!((grid.rows(), grid.cols()), (1, 1));
    }

    #[test]
    fn test_invalid_config_rejected() {
        assert!(GridConfig::new(900.0, 600.0, 0.0).is_err());
        assert!(GridConfig::new(900.0, 600.0, -5.0).is_err());
        assert!(GridConfig::new(0.0, 600.0, 20.0).is_err());
        assert!(GridConfig::new(900.0, f64::NAN, 20.0).is_err());
    }

    #[test]
    fn test_config_deserialize_validates() {
        let ok: GridConfig = serde_yaml::from_str("width: 900\nheight: 600\ncell_size: 20").unwrap();
        assert_eq!(ok.cols(), 45);
        let bad: Result<GridConfig, _> = serde_yaml::from_str("width: 900\nheight: 600\ncell_size: 0");
        assert!(bad.is_err());
    }

    #[test]
    fn test_rack_blocks_exact_cell_range() {
        let grid = build_grid(&warehouse_config(), &[Obstacle::new(140.0, 140.0, 100.0, 60.0)]);

        // cols 7..12, rows 7..10 (end exclusive)
        for row in 0..grid.rows() as i64 {
            for col in 0..grid.cols() as i64 {
                let inside = (7..10).contains(&row) && (7..12).contains(&col);
                let expected = if inside { CellState::Blocked } else { CellState::Walkable };
                assert_eq!(grid.state(GridCell::new(row, col)), Some(expected), "cell ({}, {})", row, col);
            }
        }
        assert_eq!(grid.blocked_count(), 15);
    }

    #[test]
    fn test_partial_overlap_blocks_cell() {
        let grid = build_grid(&warehouse_config(), &[Obstacle::new(25.0, 45.0, 2.0, 2.0)]);
        assert!(!grid.is_walkable(GridCell::new(2, 1)));
        assert_eq!(grid.blocked_count(), 1);
    }

    #[test]
    fn test_degenerate_and_outside_obstacles() {
        let obstacles = [
            Obstacle::new(30.0, 30.0, 0.0, 40.0),
            Obstacle::new(30.0, 30.0, -10.0, 40.0),
            Obstacle::new(2000.0, 2000.0, 50.0, 50.0),
            Obstacle::new(-100.0, -100.0, 50.0, 50.0),
        ];
        let grid = build_grid(&warehouse_config(), &obstacles);
        assert_eq!(grid.blocked_count(), 0);
    }

    #[test]
    fn test_obstacle_clipped_to_bounds() {
        let grid = build_grid(&warehouse_config(), &[Obstacle::new(-30.0, 580.0, 70.0, 100.0)]);
        // cols 0..2, row 29 only
        assert_eq!(grid.blocked_count(), 2);
        assert!(!grid.is_walkable(GridCell::new(29, 0)));
        assert!(!grid.is_walkable(GridCell::new(29, 1)));
        assert!(grid.is_walkable(GridCell::new(29, 2)));
    }

    #[test]
    fn test_obstacle_order_does_not_matter() {
        let a = Obstacle::new(100.0, 100.0, 80.0, 40.0);
        let b = Obstacle::new(150.0, 120.0, 30.0, 90.0);
        let config = warehouse_config();
        assert_eq!(build_grid(&config, &[a, b]), build_grid(&config, &[b, a]));
    }

    #[test]
    fn test_random_racks_block_every_intersecting_cell() {
        let config = warehouse_config();
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..50 {
            let rack = Obstacle::new(
                rng.gen_range(0.0..800.0),
                rng.gen_range(0.0..500.0),
                rng.gen_range(1.0..100.0),
                rng.gen_range(1.0..100.0),
            );
            let grid = build_grid(&config, &[rack]);
            let cs = config.cell_size();
            for row in 0..grid.rows() {
                for col in 0..grid.cols() {
                    let (x0, y0) = (col as f64 * cs, row as f64 * cs);
                    let intersects = rack.x < x0 + cs
                        && rack.x + rack.width > x0
                        && rack.y < y0 + cs
                        && rack.y + rack.height > y0;
                    let cell = GridCell::new(row as i64, col as i64);
                    assert_eq!(!grid.is_walkable(cell), intersects, "rack {:?} cell {:?}", rack, cell);
                }
            }
        }
    }

    #[test]
    fn test_out_of_range_access() {
        let grid = OccupancyGrid::new(&warehouse_config());
        assert_eq!(grid.state(GridCell::new(-1, 0)), None);
        assert_eq!(grid.state(GridCell::new(0, 45)), None);
        assert!(!grid.is_walkable(GridCell::new(30, 0)));
        assert_eq!(grid.cell_of(&WorldPoint::new(-10.0, -10.0)), None);
        assert_eq!(grid.cell_of(&WorldPoint::new(f64::NAN, 10.0)), None);
        assert_eq!(grid.cell_of(&WorldPoint::new(899.9, 599.9)), Some(GridCell::new(29, 44)));
    }

    #[test]
    fn test_cell_center() {
        let grid = OccupancyGrid::new(&warehouse_config());
        assert_eq!(grid.cell_center(GridCell::new(27, 2)), WorldPoint::new(50.0, 550.0));
    }

    #[test]
    fn test_display() {
        let config = GridConfig::new(60.0, 40.0, 20.0).unwrap();
        let grid = build_grid(&config, &[Obstacle::new(20.0, 0.0, 20.0, 20.0)]);
        assert_eq!(grid.to_string(), ".#.\n...\n");
    }

    #[test]
    fn test_iter_cells_row_major() {
        let config = GridConfig::new(60.0, 40.0, 20.0).unwrap();
        let grid = build_grid(&config, &[Obstacle::new(20.0, 0.0, 20.0, 20.0)]);
        let cells: Vec<(GridCell, CellState)> = grid.iter_cells().collect();
        assert_eq!(cells.len(), 6);
        assert_eq!(cells[1], (GridCell::new(0, 1), CellState::Blocked));
        assert_eq!(cells[3].0, GridCell::new(1, 0));
    }
}
