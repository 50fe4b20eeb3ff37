//! Route distance and walking-time estimates

use itertools::Itertools;
use serde::{Deserialize, Serialize};

use crate::common::Path;
use crate::route::directions::{get_directions, DirectionStep};

/// Unit conversion and labelling parameters for route metrics
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RouteConfig {
    /// Meters per layout coordinate unit
    pub meters_per_unit: f64,
    /// Average walking speed [m/s]
    pub walking_speed_mps: f64,
    /// Minimum |cross product| of consecutive segments that counts as a turn
    pub turn_threshold: f64,
    /// Name used in the first direction step
    pub start_label: String,
}

impl Default for RouteConfig {
    fn default() -> Self {
        Self {
            meters_per_unit: 0.1,
            walking_speed_mps: 1.4,
            turn_threshold: 10.0,
            start_label: "Worker Entrance".to_string(),
        }
    }
}

/// Route length in meters; `0.0` for fewer than two points
pub fn calculate_distance(path: &Path, config: &RouteConfig) -> f64 {
    if path.len() < 2 {
        return 0.0;
    }
    let units: f64 = path
        .points
        .iter()
        .tuple_windows()
        .map(|(a, b)| a.distance(b))
        .sum();
    units * config.meters_per_unit
}

/// Distance label with one decimal
pub fn format_distance(meters: f64) -> String {
    format!("{:.1}", meters)
}

/// Walking time in seconds, computed from the distance rounded to 0.1 m
pub fn walking_seconds(distance_meters: f64, config: &RouteConfig) -> f64 {
    let rounded = (distance_meters * 10.0).round() / 10.0;
    rounded / config.walking_speed_mps
}

/// `"{s} sec"` below one minute, `"{m}m {s}s"` otherwise.
///
/// The unit is chosen before rounding, so 59.6 s reads `"60 sec"`. Minutes
/// and seconds come from the rounded total and never show `60s`.
pub fn format_walking_time(seconds: f64) -> String {
    let seconds = seconds.max(0.0);
    let total = seconds.round() as u64;
    if seconds < 60.0 {
        format!("{} sec", total)
    } else {
        format!("{}m {}s", total / 60, total % 60)
    }
}

pub fn calculate_walking_time(path: &Path, config: &RouteConfig) -> String {
    format_walking_time(walking_seconds(calculate_distance(path, config), config))
}

/// Derived summary of a finished route
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RouteMetrics {
    pub distance_meters: f64,
    pub walking_time_label: String,
    pub directions: Vec<DirectionStep>,
}

impl RouteMetrics {
    pub fn from_path(path: &Path, destination_label: &str, location_label: &str, config: &RouteConfig) -> Self {
        let distance_meters = calculate_distance(path, config);
        Self {
            distance_meters,
            walking_time_label: format_walking_time(walking_seconds(distance_meters, config)),
            directions: get_directions(path, destination_label, location_label, config),
        }
    }

    pub fn distance_label(&self) -> String {
        format_distance(self.distance_meters)
    }
}
