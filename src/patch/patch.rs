//! Patch types.

use crate::value::{Kind, Value};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Direction selects which payload of a patch is applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Turns the first diff operand into the second.
    Forward,
    /// Turns the second diff operand back into the first.
    Reverse,
}

impl Direction {
    /// Returns `fwd` for [`Direction::Forward`] and `rev` otherwise.
    pub fn pick<T>(self, fwd: T, rev: T) -> T {
        match self {
            Direction::Forward => fwd,
            Direction::Reverse => rev,
        }
    }

    pub fn reversed(self) -> Self {
        self.pick(Direction::Reverse, Direction::Forward)
    }
}

/// Patch is an immutable description of the difference between two values.
///
/// Every variant carries enough information to go in both directions, so
/// the same patch can rebuild the second operand from the first and the
/// first from the second.
///
/// Values inside a patch serialize like documents, so a `Value::Null`
/// sentinel is stored as `null` and reads back as `Value::Absence`. A
/// stored patch over sentinels rebuilds `Absence` where `Null` stood.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Patch {
    /// Nothing to do at this position.
    #[default]
    NoChange,
    /// Whole-value replacement; used when the operand kinds differ or a
    /// slot exists on one side only.
    Raw(RawPatch),
    /// Both operands are the same scalar kind with different values.
    Scalar(ScalarPatch),
    Array(ArrayPatch),
    Object(ObjectPatch),
}

impl Patch {
    pub fn is_no_change(&self) -> bool {
        matches!(self, Patch::NoChange)
    }

    /// Returns true if applying this patch in `dir` removes the slot it is
    /// attached to.
    pub fn deletes(&self, dir: Direction) -> bool {
        match self {
            Patch::Raw(raw) => raw.deletes(dir),
            _ => false,
        }
    }

    /// Returns a short name for the variant, used in logs.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Patch::NoChange => "no_change",
            Patch::Raw(_) => "raw",
            Patch::Scalar(_) => "scalar",
            Patch::Array(_) => "array",
            Patch::Object(_) => "object",
        }
    }
}

/// RawPatch replaces a value wholesale.
///
/// `delete_fwd` marks a slot that does not exist after the change and
/// `delete_rev` one that did not exist before it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawPatch {
    pub delete_fwd: bool,
    pub delete_rev: bool,
    pub val_fwd: Value,
    pub val_rev: Value,
}

impl RawPatch {
    /// Replacement of `a` by `b` where both slots exist.
    pub fn replace(a: Value, b: Value) -> Self {
        RawPatch {
            delete_fwd: false,
            delete_rev: false,
            val_fwd: b,
            val_rev: a,
        }
    }

    /// A slot holding `a` that is gone after the change.
    pub fn removed(a: Value) -> Self {
        RawPatch {
            delete_fwd: true,
            delete_rev: false,
            val_fwd: Value::Absence,
            val_rev: a,
        }
    }

    /// A slot holding `b` that did not exist before the change.
    pub fn added(b: Value) -> Self {
        RawPatch {
            delete_fwd: false,
            delete_rev: true,
            val_fwd: b,
            val_rev: Value::Absence,
        }
    }

    pub fn deletes(&self, dir: Direction) -> bool {
        dir.pick(self.delete_fwd, self.delete_rev)
    }

    pub fn value(&self, dir: Direction) -> &Value {
        dir.pick(&self.val_fwd, &self.val_rev)
    }
}

/// ScalarPatch swaps one scalar for another of the same kind.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScalarPatch {
    String { fwd: String, rev: String },
    Number { fwd: f64, rev: f64 },
}

impl ScalarPatch {
    pub fn kind(&self) -> Kind {
        match self {
            ScalarPatch::String { .. } => Kind::String,
            ScalarPatch::Number { .. } => Kind::Number,
        }
    }

    pub fn value(&self, dir: Direction) -> Value {
        match self {
            ScalarPatch::String { fwd, rev } => Value::String(dir.pick(fwd, rev).clone()),
            ScalarPatch::Number { fwd, rev } => Value::Number(dir.pick(*fwd, *rev)),
        }
    }
}

/// ArrayPatch changes an array slot by slot.
///
/// `elements` covers indices `0..max(len_fwd, len_rev)`; slots present on
/// one side only hold a [`RawPatch`] with the matching delete flag.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArrayPatch {
    pub len_fwd: usize,
    pub len_rev: usize,
    pub elements: Vec<Patch>,
}

impl ArrayPatch {
    /// Returns the array length after applying in `dir`.
    pub fn target_len(&self, dir: Direction) -> usize {
        dir.pick(self.len_fwd, self.len_rev)
    }
}

/// ObjectPatch changes the entries of an object. Keys that are identical
/// on both sides do not appear.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ObjectPatch {
    pub entries: BTreeMap<String, Patch>,
}
