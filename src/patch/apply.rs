//! Applying patches in either direction.

use super::patch::{ArrayPatch, Direction, ObjectPatch, Patch};
use crate::check_depth;
use crate::error::{Error, Result};
use crate::value::Value;
use crate::walk::PathElement;
use tracing::debug;

/// Applies `patch` forward to a copy of `value`.
///
/// For a patch computed as `diff(a, b)`, `apply_fwd(&patch, &a)` equals `b`.
/// The input is left untouched.
pub fn apply_fwd(patch: &Patch, value: &Value) -> Result<Value> {
    apply(patch, value, Direction::Forward)
}

/// Applies `patch` in reverse to a copy of `value`.
///
/// For a patch computed as `diff(a, b)`, `apply_rev(&patch, &b)` equals `a`.
pub fn apply_rev(patch: &Patch, value: &Value) -> Result<Value> {
    apply(patch, value, Direction::Reverse)
}

/// Applies `patch` forward, modifying `value` destructively.
///
/// On error `value` may be left partially patched.
pub fn apply_fwd_in_place(patch: &Patch, value: &mut Value) -> Result<()> {
    apply_in_place(patch, value, Direction::Forward)
}

/// Applies `patch` in reverse, modifying `value` destructively.
///
/// On error `value` may be left partially patched.
pub fn apply_rev_in_place(patch: &Patch, value: &mut Value) -> Result<()> {
    apply_in_place(patch, value, Direction::Reverse)
}

/// Applies `patch` in `dir` to a copy of `value`.
pub fn apply(patch: &Patch, value: &Value, dir: Direction) -> Result<Value> {
    let mut out = value.clone();
    apply_in_place(patch, &mut out, dir)?;
    Ok(out)
}

/// Applies `patch` in `dir`, modifying `value` destructively.
///
/// A container patch that meets a value of another kind, or an array of
/// the wrong length, fails with [`Error::InvariantViolation`]: the patch
/// was computed against different data.
pub fn apply_in_place(patch: &Patch, value: &mut Value, dir: Direction) -> Result<()> {
    debug!(direction = ?dir, patch = patch.kind_name(), target = %value.kind(), "apply");
    apply_value(patch, value, dir, 0)
}

fn apply_value(patch: &Patch, target: &mut Value, dir: Direction, depth: usize) -> Result<()> {
    check_depth(depth)?;
    match patch {
        Patch::NoChange => {}
        Patch::Raw(raw) => *target = raw.value(dir).clone(),
        Patch::Scalar(scalar) => *target = scalar.value(dir),
        Patch::Array(array) => apply_array(array, target, dir, depth)?,
        Patch::Object(object) => apply_object(object, target, dir, depth)?,
    }
    Ok(())
}

fn apply_array(patch: &ArrayPatch, target: &mut Value, dir: Direction, depth: usize) -> Result<()> {
    let items = match target {
        Value::Array(items) => items,
        other => {
            return Err(Error::invariant(format!(
                "array patch applied to {} value",
                other.kind()
            )))
        }
    };

    let expected = patch.target_len(dir.reversed());
    if items.len() != expected {
        return Err(Error::invariant(format!(
            "array patch expects {} elements, found {}",
            expected,
            items.len()
        )));
    }
    let len = patch.target_len(dir);
    if patch.elements.len() < len {
        return Err(Error::invariant(format!(
            "array patch covers {} slots, needs {}",
            patch.elements.len(),
            len
        )));
    }

    items.resize(len, Value::Absence);
    for (i, (item, slot)) in items.iter_mut().zip(&patch.elements).enumerate() {
        apply_value(slot, item, dir, depth + 1).map_err(|e| e.at(PathElement::Index(i)))?;
    }
    Ok(())
}

fn apply_object(patch: &ObjectPatch, target: &mut Value, dir: Direction, depth: usize) -> Result<()> {
    let map = match target {
        Value::Object(map) => map,
        other => {
            return Err(Error::invariant(format!(
                "object patch applied to {} value",
                other.kind()
            )))
        }
    };

    for (key, entry) in &patch.entries {
        if entry.deletes(dir) {
            map.delete(key);
            continue;
        }
        apply_value(entry, map.slot(key), dir, depth + 1)
            .map_err(|e| e.at(PathElement::FieldName(key.clone())))?;
    }
    Ok(())
}
