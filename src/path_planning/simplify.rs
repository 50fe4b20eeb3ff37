//! Collinear waypoint removal
//!
//! Grid routes carry one point per cell. Interior points are dropped while
//! the route keeps heading in the same horizontal, vertical or diagonal
//! direction, leaving one point per change of heading.

use crate::common::{Path, PathSmoother, WorldPoint};

/// Sign of a coordinate delta, with `0` for no movement
fn sign(value: f64) -> i8 {
    if value > 0.0 {
        1
    } else if value < 0.0 {
        -1
    } else {
        0
    }
}

fn heading(from: &WorldPoint, to: &WorldPoint) -> (i8, i8) {
    (sign(to.x - from.x), sign(to.y - from.y))
}

/// Remove interior points where the heading does not change.
///
/// The incoming heading is measured from the last kept point. First and
/// last points are always kept; paths of two points or fewer are returned
/// unchanged.
pub fn simplify(path: &Path) -> Path {
    let points = &path.points;
    if points.len() <= 2 {
        return path.clone();
    }

    let mut simplified = vec![points[0]];
    for window in points.windows(2).skip(1) {
        let (current, next) = (&window[0], &window[1]);
        let prev = simplified.last().copied().unwrap_or(points[0]);
        if heading(&prev, current) != heading(current, next) {
            simplified.push(*current);
        }
    }
    simplified.push(points[points.len() - 1]);

    Path::from_points(simplified)
}

/// [`PathSmoother`] wrapper around [`simplify`]
#[derive(Debug, Clone, Copy, Default)]
pub struct PathSimplifier;

impl PathSmoother for PathSimplifier {
    fn smooth(&self, path: &Path) -> Path {
        simplify(path)
    }
}
