//! Topological intersection of two values.

use super::intersection::{intersect_array, intersect_object};
use super::options::{Options, Resolution};
use crate::check_depth;
use crate::error::{Error, Result};
use crate::value::{Kind, Value};
use tracing::debug;

/// TopoIntersection keeps every position that both `a` and `b` occupy.
///
/// Containers are matched like [`intersection`](super::intersection), but
/// a position where two leaves meet is never dropped: the topological
/// intersection resolution in `opts` decides what survives there, whether
/// or not the leaves are equal. A `Null` on either side yields `Null`.
///
/// Fails with [`Error::UnsupportedType`] when an opaque value meets
/// anything but `Null`.
pub fn topo_intersection(a: &Value, b: &Value, opts: Options) -> Result<Value> {
    let resolution = opts.topo_intersection_resolution();
    debug!(options = ?opts, ?resolution, "topo_intersection");
    topo_intersection_value(a, b, resolution, 0)
}

fn topo_intersection_value(
    a: &Value,
    b: &Value,
    resolution: Resolution,
    depth: usize,
) -> Result<Value> {
    check_depth(depth)?;
    let merge = |a: &Value, b: &Value| topo_intersection_value(a, b, resolution, depth + 1);
    match (a, b) {
        (Value::Null, _) | (_, Value::Null) => Ok(Value::Null),
        (Value::Opaque(_), _) | (_, Value::Opaque(_)) => Err(Error::unsupported_type(Kind::Opaque)),
        (Value::Object(x), Value::Object(y)) => intersect_object(x, y, merge),
        (Value::Array(x), Value::Array(y)) => intersect_array(x, y, merge),
        _ => Ok(resolution.resolve(a, b)),
    }
}
