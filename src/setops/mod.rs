//! Setops module - Set algebra over values.
//!
//! This module provides positional union, intersection and difference of
//! two values, their topological variants, and the [`Options`] that steer
//! conflict resolution and must-subtract checks.

mod difference;
mod intersection;
mod options;
mod topo_difference;
mod topo_intersection;
mod union;


pub use difference::*;
pub use intersection::*;
pub use options::*;
pub use topo_difference::*;
pub use topo_intersection::*;
pub use union::*;
