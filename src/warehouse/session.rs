//! Per-worker navigation state
//!
//! A session tracks the worker's position, the selected product and the
//! simplified route to it. Every selection rebuilds the grid and replans
//! from the current worker position; nothing is cached between requests.

use log::{debug, info};

use crate::common::{NavError, NavResult, Path, WorldPoint};
use crate::path_planning::{simplify, AStarPlanner};
use crate::route::RouteMetrics;
use crate::warehouse::layout::{Product, WarehouseLayout};

pub struct NavigationSession {
    layout: WarehouseLayout,
    worker_position: WorldPoint,
    selected: Option<usize>,
    path: Path,
}

impl NavigationSession {
    pub fn new(layout: WarehouseLayout) -> Self {
        let worker_position = layout.worker_start;
        Self {
            layout,
            worker_position,
            selected: None,
            path: Path::new(),
        }
    }

    pub fn layout(&self) -> &WarehouseLayout {
        &self.layout
    }

    pub fn worker_position(&self) -> WorldPoint {
        self.worker_position
    }

    pub fn selected_product(&self) -> Option<&Product> {
        self.selected.and_then(|i| self.layout.products.get(i))
    }

    /// Current simplified route; empty when nothing is selected or unreachable
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Select a product and route to its shelf location
    pub fn select_product(&mut self, product_id: &str) -> NavResult<&Path> {
        let index = self
            .layout
            .products
            .iter()
            .position(|p| p.id == product_id)
            .ok_or_else(|| NavError::UnknownProduct(product_id.to_string()))?;
        self.selected = Some(index);
        self.replan();
        Ok(&self.path)
    }

    /// Select the first product stocked on a rack.
    ///
    /// Returns `Ok(None)` and leaves the selection untouched for an empty rack.
    pub fn select_rack(&mut self, rack_id: &str) -> NavResult<Option<&Path>> {
        let catalog = self.layout.catalog();
        if catalog.rack(rack_id).is_none() {
            return Err(NavError::UnknownRack(rack_id.to_string()));
        }
        let product_id = match catalog.first_product_in_rack(rack_id) {
            Some(product) => product.id.clone(),
            None => {
                debug!("rack {} has no products", rack_id);
                return Ok(None);
            }
        };
        self.select_product(&product_id).map(Some)
    }

    /// Drop the selection and send the worker back to the start
    pub fn clear(&mut self) {
        self.selected = None;
        self.path = Path::new();
        self.worker_position = self.layout.worker_start;
    }

    /// Distance, walking time and directions for the current route
    pub fn route_metrics(&self) -> Option<RouteMetrics> {
        let product = self.selected_product()?;
        Some(RouteMetrics::from_path(
            &self.path,
            &product.name,
            &product.rack,
            &self.layout.navigation.route,
        ))
    }

    /// Step the worker through the route, one waypoint per call to `next`.
    ///
    /// Yields nothing unless the route has at least two points.
    pub fn start_navigation(&mut self) -> Walk<'_> {
        let index = if self.path.len() < 2 { self.path.len() } else { 0 };
        Walk { session: self, index }
    }

    fn replan(&mut self) {
        let (goal, product_id) = match self.selected_product() {
            Some(product) => (product.location(), product.id.clone()),
            None => return,
        };

        let grid = self.layout.build_grid();
        let planner = AStarPlanner::new(&grid, self.layout.navigation.pathfinding.clone());
        let result = planner.find_path(self.worker_position, goal);
        self.path = simplify(&result.path);

        if self.path.is_empty() {
            info!("no route to {} from ({:.1},{:.1})", product_id, self.worker_position.x, self.worker_position.y);
        } else {
            info!(
                "route to {}: {} waypoints, {} nodes expanded",
                product_id,
                self.path.len(),
                result.nodes_expanded
            );
        }
    }
}

/// Iterator moving the worker along the current route
pub struct Walk<'a> {
    session: &'a mut NavigationSession,
    index: usize,
}

impl<'a> Iterator for Walk<'a> {
    type Item = WorldPoint;

    fn next(&mut self) -> Option<Self::Item> {
        let point = *self.session.path.points.get(self.index)?;
        self.session.worker_position = point;
        self.index += 1;
        Some(point)
    }
}
