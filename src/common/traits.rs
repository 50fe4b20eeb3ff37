//! Common traits defining interfaces for navigation algorithms

use crate::common::types::*;

/// Trait for route planners over a fixed floor plan.
///
/// An empty [`Path`] signals that no route exists; planners do not
/// return errors for unreachable or out-of-bounds endpoints.
pub trait RoutePlanner {
    /// Plan a route from start to goal
    fn plan(&self, start: WorldPoint, goal: WorldPoint) -> Path;
}

/// Trait for post-processing a planned route
pub trait PathSmoother {
    fn smooth(&self, path: &Path) -> Path;
}
