//! Walk module - Ordered, path-aware traversal of a value.
//!
//! This module provides the path types used to address nodes and the
//! depth-first walker with in-place mutation hooks.

mod path;
mod walker;

pub use path::*;
pub use walker::*;
