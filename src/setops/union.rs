//! Union of two values.

use super::options::{Options, Resolution};
use crate::check_depth;
use crate::error::{Error, Result};
use crate::value::{Kind, Map, Value};
use crate::walk::PathElement;
use tracing::debug;

/// Union combines everything held by `a` and `b`.
///
/// Object keys held by one side pass through; shared keys are merged
/// recursively. Arrays are merged index by index up to the shorter length
/// and the longer tail passes through. A `Null` on either side yields the
/// other side. Any other pair of leaves, equal or not, is a conflict settled
/// by the union resolution in `opts` (by default the pair `[a, b]`).
///
/// Fails with [`Error::UnsupportedType`] when an opaque value meets
/// anything but `Null`.
pub fn union(a: &Value, b: &Value, opts: Options) -> Result<Value> {
    let resolution = opts.union_resolution();
    debug!(options = ?opts, ?resolution, "union");
    union_value(a, b, resolution, 0)
}

fn union_value(a: &Value, b: &Value, resolution: Resolution, depth: usize) -> Result<Value> {
    check_depth(depth)?;
    match (a, b) {
        (Value::Null, other) | (other, Value::Null) => Ok(other.clone()),
        (Value::Opaque(_), _) | (_, Value::Opaque(_)) => Err(Error::unsupported_type(Kind::Opaque)),
        (Value::Object(x), Value::Object(y)) => union_object(x, y, resolution, depth),
        (Value::Array(x), Value::Array(y)) => union_array(x, y, resolution, depth),
        _ => Ok(resolution.resolve(a, b)),
    }
}

fn union_object(x: &Map, y: &Map, resolution: Resolution, depth: usize) -> Result<Value> {
    let mut out = Map::new();
    for (key, a) in x {
        let merged = match y.get(key) {
            Some(b) => union_value(a, b, resolution, depth + 1)
                .map_err(|e| e.at(PathElement::FieldName(key.clone())))?,
            None => a.clone(),
        };
        out.set(key.clone(), merged);
    }
    for (key, b) in y {
        if !x.has(key) {
            out.set(key.clone(), b.clone());
        }
    }
    Ok(Value::Object(out))
}

fn union_array(x: &[Value], y: &[Value], resolution: Resolution, depth: usize) -> Result<Value> {
    let shared = x.len().min(y.len());
    let mut out = Vec::with_capacity(x.len().max(y.len()));
    for (i, (a, b)) in x.iter().zip(y).enumerate() {
        out.push(union_value(a, b, resolution, depth + 1).map_err(|e| e.at(PathElement::Index(i)))?);
    }
    let tail = if x.len() > shared { &x[shared..] } else { &y[shared..] };
    out.extend(tail.iter().cloned());
    Ok(Value::Array(out))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::{from_json, Opaque};
    use pretty_assertions::assert_eq;

    #[test]
    fn test_union_null_yields_other_side() {
        let v = Value::from("x");
        assert_eq!(union(&Value::Null, &v, Options::default()).unwrap(), v);
        assert_eq!(union(&v, &Value::Null, Options::default()).unwrap(), v);
        assert_eq!(
            union(&Value::Null, &Value::Null, Options::default()).unwrap(),
            Value::Null
        );
    }

    #[test]
    fn test_union_array_tail() {
        let a = from_json(r#"["a", "b", "c"]"#).unwrap();
        let b = from_json(r#"["A"]"#).unwrap();
        let expected = from_json(r#"["A", "b", "c"]"#).unwrap();
        assert_eq!(union(&a, &b, Options::RESOLVE_SECOND).unwrap(), expected);

        let expected = from_json(r#"[["A", "a"], "b", "c"]"#).unwrap();
        assert_eq!(union(&b, &a, Options::default()).unwrap(), expected);
    }

    #[test]
    fn test_union_mismatched_kinds_conflict() {
        let a = from_json(r#"{"k": {"nested": 1}}"#).unwrap();
        let b = from_json(r#"{"k": [1]}"#).unwrap();
        let expected = from_json(r#"{"k": [{"nested": 1}, [1]]}"#).unwrap();
        assert_eq!(union(&a, &b, Options::default()).unwrap(), expected);
        assert_eq!(union(&a, &b, Options::UNION_RESOLVE_FIRST).unwrap(), a);
    }

    #[test]
    fn test_union_opaque_is_unsupported() {
        let a = from_json(r#"{"ok": "x", "flag": true}"#).unwrap();
        let b = from_json(r#"{"flag": "y"}"#).unwrap();
        let err = union(&a, &b, Options::default()).unwrap_err();
        assert!(err.is_unsupported_type());
        assert_eq!(err.path().map(|p| p.to_string()), Some(".flag".to_string()));

        let opaque = Value::Opaque(Opaque::new(7u8));
        assert!(union(&opaque, &Value::from("x"), Options::default())
            .unwrap_err()
            .is_unsupported_type());
    }

    #[test]
    fn test_union_null_passes_opaque_through() {
        let opaque = Value::Opaque(Opaque::new(true));
        assert_eq!(union(&Value::Null, &opaque, Options::default()).unwrap(), opaque);
        assert_eq!(union(&opaque, &Value::Null, Options::default()).unwrap(), opaque);
    }
}
