//! Route metrics: distance, walking time and turn-by-turn directions

pub mod directions;
pub mod metrics;

pub use directions::*;
pub use metrics::*;
