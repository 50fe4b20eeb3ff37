//! Grid construction and plotting utilities

pub mod grid_map;
pub mod visualization;

pub use grid_map::*;
pub use visualization::{colors, FloorPlot};
