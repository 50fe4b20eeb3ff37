//! Warehouse floor plan, product catalog and worker navigation sessions

pub mod catalog;
pub mod layout;
pub mod session;

pub use catalog::*;
pub use layout::*;
pub use session::*;
