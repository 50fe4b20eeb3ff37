//! Route planning on the warehouse grid

pub mod a_star;
pub mod simplify;

pub use a_star::*;
pub use simplify::*;

use crate::common::{Path, WorldPoint};
use crate::utils::OccupancyGrid;

/// A* route followed by collinear-point removal
pub fn find_route(grid: &OccupancyGrid, start: WorldPoint, end: WorldPoint) -> Path {
    simplify(&find_path(grid, start, end))
}
