//! Intersection of two values.

use super::options::Options;
use crate::check_depth;
use crate::error::{Error, Result};
use crate::value::{Kind, Map, Value};
use crate::walk::PathElement;
use tracing::debug;

/// Intersection keeps what `a` and `b` hold in common.
///
/// Equal strings and numbers survive, as does `Absence` meeting `Absence`.
/// Every other pair of leaves yields `Null`. Objects keep only shared keys
/// and drop entries whose result is `Null`. Arrays are cut to the shorter
/// length and keep `Null` slots so indices stay aligned.
///
/// Intersection has no conflict policy; `opts` is accepted so every set
/// operation shares one signature. Fails with [`Error::UnsupportedType`]
/// when an opaque value meets anything but `Null`.
pub fn intersection(a: &Value, b: &Value, opts: Options) -> Result<Value> {
    debug!(options = ?opts, "intersection");
    intersection_value(a, b, 0)
}

fn intersection_value(a: &Value, b: &Value, depth: usize) -> Result<Value> {
    check_depth(depth)?;
    let out = match (a, b) {
        (Value::Null, _) | (_, Value::Null) => Value::Null,
        (Value::Opaque(_), _) | (_, Value::Opaque(_)) => {
            return Err(Error::unsupported_type(Kind::Opaque))
        }
        (Value::Absence, Value::Absence) => Value::Absence,
        (Value::String(x), Value::String(y)) if x == y => a.clone(),
        (Value::Number(x), Value::Number(y)) if x == y => a.clone(),
        (Value::Object(x), Value::Object(y)) => {
            intersect_object(x, y, |a, b| intersection_value(a, b, depth + 1))?
        }
        (Value::Array(x), Value::Array(y)) => {
            intersect_array(x, y, |a, b| intersection_value(a, b, depth + 1))?
        }
        _ => Value::Null,
    };
    Ok(out)
}

/// Merges the shared keys of two objects with `merge`, omitting `Null`
/// results.
pub(super) fn intersect_object<F>(x: &Map, y: &Map, mut merge: F) -> Result<Value>
where
    F: FnMut(&Value, &Value) -> Result<Value>,
{
    let mut out = Map::new();
    for (key, a) in x {
        let Some(b) = y.get(key) else {
            continue;
        };
        let merged = merge(a, b).map_err(|e| e.at(PathElement::FieldName(key.clone())))?;
        if !merged.is_null() {
            out.set(key.clone(), merged);
        }
    }
    Ok(Value::Object(out))
}

/// Merges two arrays index by index up to the shorter length.
pub(super) fn intersect_array<F>(x: &[Value], y: &[Value], mut merge: F) -> Result<Value>
where
    F: FnMut(&Value, &Value) -> Result<Value>,
{
    x.iter()
        .zip(y)
        .enumerate()
        .map(|(i, (a, b))| merge(a, b).map_err(|e| e.at(PathElement::Index(i))))
        .collect::<Result<Vec<_>>>()
        .map(Value::Array)
}
