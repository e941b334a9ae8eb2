//! Patch module - Bidirectional patches between two values.
//!
//! This module computes a [`Patch`] describing how one value turns into
//! another, applies it forward or in reverse, and renders it for debugging.

mod apply;
mod diff;
mod patch;
mod render;


pub use apply::*;
pub use diff::*;
pub use patch::*;
pub use render::*;
