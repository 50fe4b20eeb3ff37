//! Navigation tuning loaded alongside the warehouse layout.

use serde::{Deserialize, Serialize};

use crate::common::{NavError, NavResult};
use crate::path_planning::AStarConfig;
use crate::route::RouteConfig;

/// Planner and route-metric settings
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct NavigationConfig {
    /// A* settings
    pub pathfinding: AStarConfig,
    /// Distance, walking time and direction settings
    pub route: RouteConfig,
}

impl NavigationConfig {
    pub fn validate(&self) -> NavResult<()> {
        let astar = &self.pathfinding;
        if !(astar.diagonal_cost.is_finite() && astar.diagonal_cost > 0.0) {
            return Err(NavError::InvalidParameter(format!(
                "diagonal_cost must be positive, got {}",
                astar.diagonal_cost
            )));
        }
        let route = &self.route;
        if !(route.walking_speed_mps.is_finite() && route.walking_speed_mps > 0.0) {
            return Err(NavError::InvalidParameter(format!(
                "walking_speed_mps must be positive, got {}",
                route.walking_speed_mps
            )));
        }
        if !(route.meters_per_unit.is_finite() && route.meters_per_unit >= 0.0) {
            return Err(NavError::InvalidParameter(format!(
                "meters_per_unit must be non-negative, got {}",
                route.meters_per_unit
            )));
        }
        if !(route.turn_threshold.is_finite() && route.turn_threshold >= 0.0) {
            return Err(NavError::InvalidParameter(format!(
                "turn_threshold must be non-negative, got {}",
                route.turn_threshold
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = NavigationConfig::default();
        assert_eq!(config.pathfinding.snap_radius, 10);
        assert!((config.pathfinding.diagonal_cost - std::f64::consts::SQRT_2).abs() < 1e-12);
        assert_eq!(config.route.meters_per_unit, 0.1);
        assert_eq!(config.route.walking_speed_mps, 1.4);
        assert_eq!(config.route.turn_threshold, 10.0);
        assert_eq!(config.route.start_label, "Worker Entrance");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_yaml_keeps_defaults() {
        let yaml = "pathfinding:\n  snap_radius: 4\nroute:\n  walking_speed_mps: 1.0\n";
        let config: NavigationConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.pathfinding.snap_radius, 4);
        assert_eq!(config.route.walking_speed_mps, 1.0);
        assert_eq!(config.route.meters_per_unit, 0.1);
    }

    #[test]
    fn test_validate_rejects_bad_speed() {
        let mut config = NavigationConfig::default();
        config.route.walking_speed_mps = 0.0;
        assert!(matches!(config.validate(), Err(NavError::InvalidParameter(_))));
    }
}
