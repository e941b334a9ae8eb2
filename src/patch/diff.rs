//! Computing patches.

use super::patch::{ArrayPatch, ObjectPatch, Patch, RawPatch, ScalarPatch};
use crate::error::Result;
use crate::value::{Map, Value};
use crate::walk::PathElement;
use crate::check_depth;
use std::collections::BTreeMap;
use tracing::debug;

/// Computes the patch that turns `a` into `b`.
///
/// Diffing never fails on mismatched kinds; such positions degrade to a
/// whole-value [`RawPatch`]. At the document root the raw delete flags
/// record whether either side is [`Value::Absence`]. Identical inputs
/// produce [`Patch::NoChange`].
///
/// The only failure is nesting deeper than [`crate::MAX_DEPTH`].
pub fn diff(a: &Value, b: &Value) -> Result<Patch> {
    let mut patch = diff_value(a, b, 0)?;
    if let Patch::Raw(raw) = &mut patch {
        raw.delete_fwd = b.is_absent();
        raw.delete_rev = a.is_absent();
    }
    debug!(from = %a.kind(), to = %b.kind(), patch = patch.kind_name(), "diff");
    Ok(patch)
}

fn diff_value(a: &Value, b: &Value, depth: usize) -> Result<Patch> {
    check_depth(depth)?;
    let patch = match (a, b) {
        (Value::Absence, Value::Absence) | (Value::Null, Value::Null) => Patch::NoChange,
        (Value::String(x), Value::String(y)) => {
            if x == y {
                Patch::NoChange
            } else {
                Patch::Scalar(ScalarPatch::String {
                    fwd: y.clone(),
                    rev: x.clone(),
                })
            }
        }
        (Value::Number(x), Value::Number(y)) => {
            if x == y {
                Patch::NoChange
            } else {
                Patch::Scalar(ScalarPatch::Number { fwd: *y, rev: *x })
            }
        }
        (Value::Array(x), Value::Array(y)) => diff_array(x, y, depth)?,
        (Value::Object(x), Value::Object(y)) => diff_object(x, y, depth)?,
        (Value::Opaque(x), Value::Opaque(y)) if x == y => Patch::NoChange,
        _ => Patch::Raw(RawPatch::replace(a.clone(), b.clone())),
    };
    Ok(patch)
}

fn diff_array(x: &[Value], y: &[Value], depth: usize) -> Result<Patch> {
    let len = x.len().max(y.len());
    let mut elements = Vec::with_capacity(len);
    for i in 0..len {
        let slot = match (x.get(i), y.get(i)) {
            (Some(a), Some(b)) => {
                diff_value(a, b, depth + 1).map_err(|e| e.at(PathElement::Index(i)))?
            }
            (Some(a), None) => Patch::Raw(RawPatch::removed(a.clone())),
            (None, Some(b)) => Patch::Raw(RawPatch::added(b.clone())),
            (None, None) => Patch::NoChange,
        };
        elements.push(slot);
    }

    if x.len() == y.len() && elements.iter().all(Patch::is_no_change) {
        return Ok(Patch::NoChange);
    }
    Ok(Patch::Array(ArrayPatch {
        len_fwd: y.len(),
        len_rev: x.len(),
        elements,
    }))
}

fn diff_object(x: &Map, y: &Map, depth: usize) -> Result<Patch> {
    let mut entries = BTreeMap::new();
    for (key, a) in x {
        let entry = match y.get(key) {
            Some(b) => diff_value(a, b, depth + 1)
                .map_err(|e| e.at(PathElement::FieldName(key.clone())))?,
            None => Patch::Raw(RawPatch::removed(a.clone())),
        };
        if !entry.is_no_change() {
            entries.insert(key.clone(), entry);
        }
    }
    for (key, b) in y {
        if !x.has(key) {
            entries.insert(key.clone(), Patch::Raw(RawPatch::added(b.clone())));
        }
    }

    if entries.is_empty() {
        return Ok(Patch::NoChange);
    }
    Ok(Patch::Object(ObjectPatch { entries }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::from_json;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_diff_equal_values_is_no_change() {
        for text in [r#"{"a": [1, "x", null]}"#, "[]", "{}", "null", "3", r#""s""#, "true"] {
            let v = from_json(text).unwrap();
            assert_eq!(diff(&v, &v).unwrap(), Patch::NoChange, "{}", text);
        }
        assert_eq!(diff(&Value::Null, &Value::Null).unwrap(), Patch::NoChange);
    }

    #[test]
    fn test_diff_scalars() {
        assert_eq!(
            diff(&Value::from("a"), &Value::from("b")).unwrap(),
            Patch::Scalar(ScalarPatch::String {
                fwd: "b".to_string(),
                rev: "a".to_string()
            })
        );
        assert_eq!(
            diff(&Value::from(1), &Value::from(2)).unwrap(),
            Patch::Scalar(ScalarPatch::Number { fwd: 2.0, rev: 1.0 })
        );
    }

    #[test]
    fn test_diff_kind_mismatch_is_raw() {
        assert_eq!(
            diff(&Value::from("1"), &Value::from(1)).unwrap(),
            Patch::Raw(RawPatch::replace(Value::from("1"), Value::from(1)))
        );
        assert_eq!(
            diff(&Value::Null, &Value::Absence).unwrap(),
            Patch::Raw(RawPatch {
                delete_fwd: true,
                delete_rev: false,
                val_fwd: Value::Absence,
                val_rev: Value::Null,
            })
        );
        assert_eq!(
            diff(&Value::Absence, &Value::from("x")).unwrap(),
            Patch::Raw(RawPatch::added(Value::from("x")))
        );
    }

    #[test]
    fn test_diff_array_lengths() {
        let a = from_json(r#"["a", "b", "c"]"#).unwrap();
        let b = from_json(r#"["a", "B"]"#).unwrap();
        assert_eq!(
            diff(&a, &b).unwrap(),
            Patch::Array(ArrayPatch {
                len_fwd: 2,
                len_rev: 3,
                elements: vec![
                    Patch::NoChange,
                    Patch::Scalar(ScalarPatch::String {
                        fwd: "B".to_string(),
                        rev: "b".to_string()
                    }),
                    Patch::Raw(RawPatch::removed(Value::from("c"))),
                ],
            })
        );
    }

    #[test]
    fn test_diff_object_entries() {
        let a = from_json(r#"{"same": 1, "changed": {"x": 1}, "gone": "g"}"#).unwrap();
        let b = from_json(r#"{"same": 1, "changed": {"x": 2}, "new": null}"#).unwrap();
        let Patch::Object(object) = diff(&a, &b).unwrap() else {
            panic!("expected object patch");
        };
        let keys: Vec<&str> = object.entries.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["changed", "gone", "new"]);
        assert_eq!(
            object.entries["new"],
            Patch::Raw(RawPatch::added(Value::Absence))
        );
        assert!(matches!(object.entries["changed"], Patch::Object(_)));
    }

    #[test]
    fn test_diff_nested_absence_has_no_delete_flags() {
        let a = from_json(r#"{"k": null}"#).unwrap();
        let b = from_json(r#"{"k": "v"}"#).unwrap();
        let Patch::Object(object) = diff(&a, &b).unwrap() else {
            panic!("expected object patch");
        };
        assert_eq!(
            object.entries["k"],
            Patch::Raw(RawPatch::replace(Value::Absence, Value::from("v")))
        );
    }

    #[test]
    fn test_diff_depth_limit() {
        let mut a = Value::from(1);
        let mut b = Value::from(2);
        for _ in 0..=crate::MAX_DEPTH {
            a = Value::Array(vec![a]);
            b = Value::Array(vec![b]);
        }
        let err = diff(&a, &b).unwrap_err();
        assert!(matches!(err, crate::Error::DepthExceeded { .. }));
        assert_eq!(err.path().map(|p| p.len()), Some(crate::MAX_DEPTH + 1));
    }
}
