//! Topological difference of two values.

use super::difference::{subtract_array, subtract_object};
use super::options::Options;
use crate::check_depth;
use crate::error::{Error, Result};
use crate::value::{deep_equal, Value};
use tracing::debug;

/// TopoDifference removes from `minuend` every position `subtrahend`
/// occupies, regardless of the values found there.
///
/// A leaf is removed when the subtrahend holds a leaf of the same kind at
/// the same position; a kind mismatch keeps the minuend. A `Null` minuend
/// stays `Null` and a `Null` subtrahend keeps the minuend. Containers recurse
/// exactly as in [`difference`](super::difference), including the collapse
/// of emptied non-empty containers to `Null`.
///
/// With [`Options::TOPO_DIFFERENCE_MUST_SUBTRACT`] subtrahend content with
/// nothing to remove fails with [`Error::MustSubtract`]: a missing key, a
/// longer array, a kind mismatch, or content meeting a `Null` minuend.
pub fn topo_difference(minuend: &Value, subtrahend: &Value, opts: Options) -> Result<Value> {
    let must = opts.topo_difference_must_subtract();
    debug!(options = ?opts, must, "topo_difference");
    topo_difference_value(minuend, subtrahend, must, 0)
}

fn topo_difference_value(m: &Value, s: &Value, must: bool, depth: usize) -> Result<Value> {
    check_depth(depth)?;
    let subtract = |m: &Value, s: &Value| topo_difference_value(m, s, must, depth + 1);
    match (m, s) {
        (Value::Null, Value::Null) => Ok(Value::Null),
        (Value::Null, _) if must => Err(Error::must_subtract(format!(
            "{} meets an already subtracted position",
            s.kind()
        ))),
        (Value::Null, _) => Ok(Value::Null),
        (_, Value::Null) => Ok(m.clone()),
        _ if deep_equal(m, s) => Ok(Value::Null),
        (Value::Object(x), Value::Object(y)) => subtract_object(x, y, must, subtract),
        (Value::Array(x), Value::Array(y)) => subtract_array(x, y, must, subtract),
        _ if m.kind() == s.kind() => Ok(Value::Null),
        _ if must => Err(Error::must_subtract(format!(
            "{} cannot subtract {}",
            s.kind(),
            m.kind()
        ))),
        _ => Ok(m.clone()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::from_json;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_topo_difference_ignores_leaf_values() {
        let m = from_json(r#"{"a": "1", "b": 2, "c": "keep"}"#).unwrap();
        let s = from_json(r#"{"a": "other", "b": 3, "c": 4}"#).unwrap();
        let expected = from_json(r#"{"c": "keep"}"#).unwrap();
        assert_eq!(topo_difference(&m, &s, Options::default()).unwrap(), expected);
    }

    #[test]
    fn test_topo_difference_null_operands() {
        let v = Value::from("v");
        let opts = Options::default();
        assert_eq!(topo_difference(&Value::Null, &Value::Null, opts).unwrap(), Value::Null);
        assert_eq!(topo_difference(&Value::Null, &v, opts).unwrap(), Value::Null);
        assert_eq!(topo_difference(&v, &Value::Null, opts).unwrap(), v);

        let err = topo_difference(&Value::Null, &v, Options::MUST_SUBTRACT).unwrap_err();
        assert!(err.is_must_subtract());
        assert_eq!(
            topo_difference(&Value::Null, &Value::Null, Options::MUST_SUBTRACT).unwrap(),
            Value::Null
        );
    }

    #[test]
    fn test_topo_difference_must_subtract_kind_mismatch() {
        let m = from_json(r#"[{"a": "x"}, "y"]"#).unwrap();
        let s = from_json(r#"[{"a": 1}, "z"]"#).unwrap();
        let err = topo_difference(&m, &s, Options::TOPO_DIFFERENCE_MUST_SUBTRACT).unwrap_err();
        assert!(err.is_must_subtract());
        assert_eq!(err.path().map(|p| p.to_string()), Some("[0].a".to_string()));

        let expected = Value::Array(vec![from_json(r#"{"a": "x"}"#).unwrap(), Value::Null]);
        assert_eq!(topo_difference(&m, &s, Options::DIFFERENCE_MUST_SUBTRACT).unwrap(), expected);
    }

    #[test]
    fn test_topo_difference_of_itself_is_null() {
        let data = from_json(r#"{"a": [1, "two", {"three": null}], "b": true}"#).unwrap();
        assert_eq!(
            topo_difference(&data, &data, Options::MUST_SUBTRACT).unwrap(),
            Value::Null
        );
    }
}
