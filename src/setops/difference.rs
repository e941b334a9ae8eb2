//! Difference of two values.

use super::options::Options;
use crate::check_depth;
use crate::error::{Error, Result};
use crate::value::{deep_equal, Map, Value};
use crate::walk::PathElement;
use tracing::debug;

/// Difference removes from `minuend` everything `subtrahend` matches.
///
/// Leaves that are deeply equal on both sides become `Null`; any other leaf
/// keeps the minuend's value. Objects recurse on shared keys, keep
/// minuend-only keys and drop entries that became `Null`. Arrays keep the
/// minuend's length, recurse on shared indices and keep the minuend's tail.
/// A non-empty container with nothing left in it becomes `Null` itself; an
/// empty one is only removed by an equal subtrahend. `difference(x, x)` is
/// always `Null`. A `Null` minuend stays `Null`.
///
/// With [`Options::DIFFERENCE_MUST_SUBTRACT`] any subtrahend content that
/// removes nothing fails with [`Error::MustSubtract`]: a key or index the
/// minuend lacks, or a leaf that does not match.
pub fn difference(minuend: &Value, subtrahend: &Value, opts: Options) -> Result<Value> {
    let must = opts.difference_must_subtract();
    debug!(options = ?opts, must, "difference");
    difference_value(minuend, subtrahend, must, 0)
}

fn difference_value(m: &Value, s: &Value, must: bool, depth: usize) -> Result<Value> {
    check_depth(depth)?;
    let subtract = |m: &Value, s: &Value| difference_value(m, s, must, depth + 1);
    match (m, s) {
        (Value::Null, _) => Ok(Value::Null),
        _ if deep_equal(m, s) => Ok(Value::Null),
        (Value::Object(x), Value::Object(y)) => subtract_object(x, y, must, subtract),
        (Value::Array(x), Value::Array(y)) => subtract_array(x, y, must, subtract),
        (_, Value::Null) => Ok(m.clone()),
        _ if must => Err(Error::must_subtract(format!("{} does not match {}", s, m))),
        _ => Ok(m.clone()),
    }
}

/// Subtracts `y` from `x` key by key with `subtract`.
///
/// Minuend-only keys are kept and `Null` results are dropped. A non-empty
/// object left empty becomes `Null`.
pub(super) fn subtract_object<F>(x: &Map, y: &Map, must: bool, mut subtract: F) -> Result<Value>
where
    F: FnMut(&Value, &Value) -> Result<Value>,
{
    if must {
        if let Some((key, _)) = y.iter().find(|(k, v)| !v.is_null() && !x.has(k)) {
            return Err(Error::must_subtract("key is missing from the minuend")
                .at(PathElement::FieldName(key.clone())));
        }
    }

    let mut out = Map::new();
    for (key, a) in x {
        let rest = match y.get(key) {
            Some(b) => subtract(a, b).map_err(|e| e.at(PathElement::FieldName(key.clone())))?,
            None => a.clone(),
        };
        if !rest.is_null() {
            out.set(key.clone(), rest);
        }
    }

    if !x.is_empty() && out.is_empty() {
        return Ok(Value::Null);
    }
    Ok(Value::Object(out))
}

/// Subtracts `y` from `x` index by index with `subtract`.
///
/// The result keeps the length of `x`; indices past the end of `y` are
/// kept as they are. A non-empty array whose every slot is `Null` becomes
/// `Null`.
pub(super) fn subtract_array<F>(x: &[Value], y: &[Value], must: bool, mut subtract: F) -> Result<Value>
where
    F: FnMut(&Value, &Value) -> Result<Value>,
{
    if must {
        if let Some(i) = (x.len()..y.len()).find(|&i| !y[i].is_null()) {
            return Err(Error::must_subtract("index is missing from the minuend")
                .at(PathElement::Index(i)));
        }
    }

    let mut out = Vec::with_capacity(x.len());
    for (i, a) in x.iter().enumerate() {
        let rest = match y.get(i) {
            Some(b) => subtract(a, b).map_err(|e| e.at(PathElement::Index(i)))?,
            None => a.clone(),
        };
        out.push(rest);
    }

    if !x.is_empty() && out.iter().all(Value::is_null) {
        return Ok(Value::Null);
    }
    Ok(Value::Array(out))
}
