//! # docdelta
//!
//! Structural diff, bidirectional patching and set algebra over schemaless
//! JSON/YAML documents.
//!
//! ## Modules
//!
//! - [`value`] - The closed document value model, deep equality, deep copy and the JSON/YAML codec
//! - [`walk`] - Ordered depth-first traversal with in-place mutation hooks
//! - [`patch`] - Computing a reversible patch between two values and applying it in either direction
//! - [`setops`] - Union, intersection, difference and their topological variants
//! - [`error`] - Error types shared by all operations
//!
//! ## Example
//!
//! ```
//! use docdelta::{apply_fwd, apply_rev, diff, value::from_json};
//!
//! let a = from_json(r#"{"foo": "123", "bar": "456"}"#).unwrap();
//! let b = from_json(r#"{"foo": "999", "tur": "333"}"#).unwrap();
//!
//! let patch = diff(&a, &b).unwrap();
//! let forward = apply_fwd(&patch, &a).unwrap();
//! assert_eq!(forward, b);
//! assert_eq!(apply_rev(&patch, &forward).unwrap(), a);
//! ```

pub mod error;
pub mod patch;
pub mod setops;
pub mod value;
pub mod walk;

pub use error::{DecodeError, Error, Result};
pub use patch::{apply_fwd, apply_rev, diff, render, Direction, Patch};
pub use setops::{difference, intersection, topo_difference, topo_intersection, union, Options};
pub use value::{deep_equal, Kind, Map, Opaque, Value};
pub use walk::{walk, Path, PathElement, WalkPosition};

/// Maximum nesting depth accepted by every recursive operation.
pub const MAX_DEPTH: usize = 256;

pub(crate) fn check_depth(depth: usize) -> Result<()> {
    if depth > MAX_DEPTH {
        return Err(Error::depth_exceeded(MAX_DEPTH));
    }
    Ok(())
}
