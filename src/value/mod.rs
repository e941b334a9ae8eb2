//! Value module - In-memory representation of schemaless JSON/YAML documents.
//!
//! This module provides the recursive value type, deep equality and deep
//! copy, and the codec boundary used to build values from text.

mod codec;
mod opaque;
mod value;

pub use codec::*;
pub use opaque::*;
pub use value::*;
