//! Common types, traits, and error definitions for warehouse_nav
//!
//! This module provides the foundational building blocks shared by the
//! grid, planner and route modules.

pub mod types;
pub mod traits;
pub mod error;

pub use types::*;
pub use traits::*;
pub use error::*;
