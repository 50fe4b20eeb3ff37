//! warehouse_nav - indoor route planning for warehouse floor plans
//!
//! Racks are rasterized onto an occupancy grid, A* finds a route between
//! two points on the floor and the route is reduced to its turning points
//! before distance, walking time and turn-by-turn directions are derived.

// Core modules
pub mod common;
pub mod config;
pub mod utils;

// Planning and route description
pub mod path_planning;
pub mod route;
pub mod warehouse;

// Re-export common types for convenience
pub use common::{GridCell, Obstacle, Path, WorldPoint};
pub use common::{PathSmoother, RoutePlanner};
pub use common::{NavError, NavResult};
pub use config::NavigationConfig;
pub use path_planning::{find_path, find_route, simplify, AStarPlanner};
pub use route::{calculate_distance, calculate_walking_time, get_directions, RouteMetrics};
pub use utils::{build_grid, GridConfig, OccupancyGrid};
pub use warehouse::{NavigationSession, WarehouseLayout};
