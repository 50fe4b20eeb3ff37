//! Turn-by-turn directions along a simplified route
//!
//! Turns are classified by the 2-D cross product of the incoming and
//! outgoing segments. Coordinates are screen-space (y grows downwards), so
//! a positive cross product is a right turn.

use itertools::Itertools;
use serde::Serialize;

use crate::common::Path;
use crate::route::metrics::RouteConfig;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Maneuver {
    Start,
    TurnLeft,
    TurnRight,
    Arrive,
    PickUp,
}

impl Maneuver {
    pub fn icon(self) -> &'static str {
        match self {
            Maneuver::Start => "🚶",
            Maneuver::TurnLeft => "⬅️",
            Maneuver::TurnRight => "➡️",
            Maneuver::Arrive => "📍",
            Maneuver::PickUp => "📦",
        }
    }
}

/// One numbered instruction
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DirectionStep {
    /// 1-based, sequential
    pub step: usize,
    pub instruction: String,
    pub icon: &'static str,
    pub maneuver: Maneuver,
}

fn push_step(steps: &mut Vec<DirectionStep>, maneuver: Maneuver, instruction: String) {
    steps.push(DirectionStep {
        step: steps.len() + 1,
        instruction,
        icon: maneuver.icon(),
        maneuver,
    });
}

/// Directions from the start to the product.
///
/// Returns nothing for paths with fewer than two points.
pub fn get_directions(
    path: &Path,
    destination_label: &str,
    location_label: &str,
    config: &RouteConfig,
) -> Vec<DirectionStep> {
    if path.len() < 2 {
        return Vec::new();
    }

    let mut steps = Vec::new();
    push_step(&mut steps, Maneuver::Start, format!("Start from {}", config.start_label));

    for (prev, current, next) in path.points.iter().tuple_windows() {
        let incoming = current.to_vector() - prev.to_vector();
        let outgoing = next.to_vector() - current.to_vector();
        let cross = incoming.perp(&outgoing);

        if cross.abs() > config.turn_threshold {
            if cross > 0.0 {
                push_step(&mut steps, Maneuver::TurnRight, "Turn right".to_string());
            } else {
                push_step(&mut steps, Maneuver::TurnLeft, "Turn left".to_string());
            }
        }
    }

    push_step(&mut steps, Maneuver::Arrive, format!("Arrive at Rack {}", location_label));
    push_step(&mut steps, Maneuver::PickUp, format!("Pick up: {}", destination_label));
    steps
}

#[cfg(test)]
mod tests {
    use super::*;

    fn directions(x: &[f64], y: &[f64]) -> Vec<DirectionStep> {
        get_directions(&Path::from_xy(x, y), "Atomic Habits", "D1", &RouteConfig::default())
    }

    #[test]
    fn test_no_directions_without_route() {
        assert!(directions(&[], &[]).is_empty());
        assert!(directions(&[50.0], &[550.0]).is_empty());
    }

    #[test]
    fn test_straight_route() {
        let steps = directions(&[0.0, 100.0], &[0.0, 0.0]);
        let text: Vec<&str> = steps.iter().map(|s| s.instruction.as_str()).collect();
        assert_eq!(
            text,
            vec!["Start from Worker Entrance", "Arrive at Rack D1", "Pick up: Atomic Habits"]
        );
    }

    #[test]
    fn test_single_right_turn() {
        // east, then south in screen space
        let steps = directions(&[0.0, 100.0, 100.0], &[0.0, 0.0, 100.0]);
        assert_eq!(steps.len(), 4);
        assert_eq!(steps[1].maneuver, Maneuver::TurnRight);
        assert_eq!(steps[1].instruction, "Turn right");
        assert_eq!(steps[1].icon, "➡️");
        assert_eq!(steps[2].maneuver, Maneuver::Arrive);
        assert_eq!(steps[3].maneuver, Maneuver::PickUp);
        let numbers: Vec<usize> = steps.iter().map(|s| s.step).collect();
        assert_eq!(numbers, vec![1, 2, 3, 4]);
    }

    #[test]
    fn test_single_left_turn() {
        // north, then west in screen space
        let steps = directions(&[50.0, 50.0, 10.0], &[550.0, 130.0, 130.0]);
        assert_eq!(steps.len(), 4);
        assert_eq!(steps[1].maneuver, Maneuver::TurnLeft);
        assert_eq!(steps[1].icon, "⬅️");
    }

    #[test]
    fn test_small_jog_is_not_a_turn() {
        // cross product 8, below the threshold of 10
        let steps = directions(&[0.0, 20.0, 40.0], &[0.0, 0.0, 0.4]);
        assert_eq!(steps.len(), 3);
    }

    #[test]
    fn test_step_numbers_have_no_gaps() {
        let steps = directions(
            &[0.0, 100.0, 100.0, 200.0, 200.0],
            &[0.0, 0.0, 100.0, 100.0, 0.0],
        );
        assert_eq!(steps.len(), 6);
        for (i, step) in steps.iter().enumerate() {
            assert_eq!(step.step, i + 1);
        }
    }
}
