//! Common types used throughout warehouse_nav

use nalgebra::Vector2;
use serde::{Deserialize, Serialize};

/// Continuous coordinate in warehouse space
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WorldPoint {
    pub x: f64,
    pub y: f64,
}

impl WorldPoint {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn origin() -> Self {
        Self { x: 0.0, y: 0.0 }
    }

    pub fn distance(&self, other: &WorldPoint) -> f64 {
        ((self.x - other.x).powi(2) + (self.y - other.y).powi(2)).sqrt()
    }

    pub fn to_vector(&self) -> Vector2<f64> {
        Vector2::new(self.x, self.y)
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

impl From<(f64, f64)> for WorldPoint {
    fn from(tuple: (f64, f64)) -> Self {
        Self { x: tuple.0, y: tuple.1 }
    }
}

impl From<Vector2<f64>> for WorldPoint {
    fn from(v: Vector2<f64>) -> Self {
        Self { x: v[0], y: v[1] }
    }
}

/// Route represented as a sequence of world points.
///
/// An empty path means no route is available.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct Path {
    pub points: Vec<WorldPoint>,
}

impl Path {
    pub fn new() -> Self {
        Self { points: Vec::new() }
    }

    pub fn from_points(points: Vec<WorldPoint>) -> Self {
        Self { points }
    }

    pub fn from_xy(x: &[f64], y: &[f64]) -> Self {
        assert_eq!(x.len(), y.len());
        let points = x.iter().zip(y.iter())
            .map(|(&x, &y)| WorldPoint::new(x, y))
            .collect();
        Self { points }
    }

    pub fn push(&mut self, point: WorldPoint) {
        self.points.push(point);
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn first(&self) -> Option<&WorldPoint> {
        self.points.first()
    }

    pub fn last(&self) -> Option<&WorldPoint> {
        self.points.last()
    }

    pub fn x_coords(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.x).collect()
    }

    pub fn y_coords(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.y).collect()
    }

    /// Sum of segment lengths in layout units
    pub fn total_length(&self) -> f64 {
        if self.points.len() < 2 {
            return 0.0;
        }
        self.points.windows(2)
            .map(|w| w[0].distance(&w[1]))
            .sum()
    }
}

/// Cell index in the occupancy grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GridCell {
    pub row: i64,
    pub col: i64,
}

impl GridCell {
    pub fn new(row: i64, col: i64) -> Self {
        Self { row, col }
    }

    /// Manhattan distance in cells
    pub fn manhattan(&self, other: &GridCell) -> i64 {
        (self.row - other.row).abs() + (self.col - other.col).abs()
    }
}

/// Axis-aligned rectangular obstacle in world space
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Obstacle {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Obstacle {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self { x, y, width, height }
    }

    /// Zero-area, negative or non-finite rectangles cover nothing
    pub fn is_degenerate(&self) -> bool {
        !(self.x.is_finite() && self.y.is_finite())
            || !(self.width.is_finite() && self.height.is_finite())
            || self.width <= 0.0
            || self.height <= 0.0
    }

    pub fn contains(&self, point: &WorldPoint) -> bool {
        point.x >= self.x
            && point.x < self.x + self.width
            && point.y >= self.y
            && point.y < self.y + self.height
    }

    pub fn center(&self) -> WorldPoint {
        WorldPoint::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_world_point_distance() {
        let p1 = WorldPoint::new(0.0, 0.0);
        let p2 = WorldPoint::new(3.0, 4.0);
        assert!((p1.distance(&p2) - 5.0).abs() < 1e-10);
    }

    #[test]
    fn test_path_total_length() {
        let path = Path::from_xy(&[0.0, 1.0, 1.0], &[0.0, 0.0, 1.0]);
        assert!((path.total_length() - 2.0).abs() < 1e-10);
        assert_eq!(Path::new().total_length(), 0.0);
    }

    #[test]
    fn test_obstacle_degenerate() {
        assert!(Obstacle::new(10.0, 10.0, 0.0, 5.0).is_degenerate());
        assert!(Obstacle::new(10.0, 10.0, -4.0, 5.0).is_degenerate());
        assert!(Obstacle::new(f64::NAN, 10.0, 4.0, 5.0).is_degenerate());
        assert!(!Obstacle::new(10.0, 10.0, 4.0, 5.0).is_degenerate());
    }

    #[test]
    fn test_obstacle_contains_is_half_open() {
        let rack = Obstacle::new(140.0, 140.0, 100.0, 60.0);
        assert!(rack.contains(&WorldPoint::new(140.0, 140.0)));
        assert!(rack.contains(&WorldPoint::new(160.0, 155.0)));
        assert!(!rack.contains(&WorldPoint::new(240.0, 150.0)));
    }
}
