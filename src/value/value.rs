//! Core value types and operations.

use super::opaque::Opaque;
use crate::error::Result;
use std::collections::btree_map;
use std::collections::BTreeMap;
use std::fmt;

/// Value represents one node of a schemaless document.
///
/// The variant set is closed; foreign host data rides in [`Value::Opaque`].
#[derive(Debug, Clone, Default)]
pub enum Value {
    /// Structural "no value here". Decoded JSON/YAML `null` lands here.
    #[default]
    Absence,
    /// The set-algebra sentinel for "this position contributes nothing".
    /// Equal only to itself.
    Null,
    String(String),
    Number(f64),
    Array(Vec<Value>),
    Object(Map),
    Opaque(Opaque),
}

/// Kind names the variant of a [`Value`] without its payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Kind {
    Absence,
    Null,
    String,
    Number,
    Array,
    Object,
    Opaque,
}

impl Kind {
    /// Returns true for the two container kinds.
    pub fn is_container(self) -> bool {
        matches!(self, Kind::Array | Kind::Object)
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Kind::Absence => "absence",
            Kind::Null => "null",
            Kind::String => "string",
            Kind::Number => "number",
            Kind::Array => "array",
            Kind::Object => "object",
            Kind::Opaque => "opaque",
        };
        f.write_str(name)
    }
}

/// Map represents the entries of an object, keyed by string.
///
/// Entries iterate in ascending key order, which keeps walks, diffs and
/// rendered output reproducible.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Map {
    entries: BTreeMap<String, Value>,
}

impl Value {
    pub fn kind(&self) -> Kind {
        match self {
            Value::Absence => Kind::Absence,
            Value::Null => Kind::Null,
            Value::String(_) => Kind::String,
            Value::Number(_) => Kind::Number,
            Value::Array(_) => Kind::Array,
            Value::Object(_) => Kind::Object,
            Value::Opaque(_) => Kind::Opaque,
        }
    }

    pub fn is_absent(&self) -> bool {
        matches!(self, Value::Absence)
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    pub fn is_container(&self) -> bool {
        self.kind().is_container()
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            Value::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&Vec<Value>> {
        match self {
            Value::Array(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_object(&self) -> Option<&Map> {
        match self {
            Value::Object(map) => Some(map),
            _ => None,
        }
    }

    pub fn as_opaque(&self) -> Option<&Opaque> {
        match self {
            Value::Opaque(o) => Some(o),
            _ => None,
        }
    }

    /// Returns true if any node of this value is [`Value::Opaque`].
    pub fn contains_opaque(&self) -> bool {
        match self {
            Value::Opaque(_) => true,
            Value::Array(items) => items.iter().any(Value::contains_opaque),
            Value::Object(map) => map.values().any(Value::contains_opaque),
            _ => false,
        }
    }

    /// Produces a value graph that shares no mutable state with `self`.
    ///
    /// Recognized variants are cloned structurally. Every opaque leaf is
    /// encoded and decoded again through the JSON codec, so it comes back
    /// in its decoded form: a serialized struct returns as an object, a
    /// boolean returns as an opaque boolean. A host value that cannot be
    /// encoded cannot be copied.
    pub fn deep_copy(&self) -> Result<Value> {
        if !self.contains_opaque() {
            return Ok(self.clone());
        }
        match self {
            Value::Opaque(o) => super::codec::round_trip(o),
            Value::Array(items) => items
                .iter()
                .map(Value::deep_copy)
                .collect::<Result<Vec<_>>>()
                .map(Value::Array),
            Value::Object(map) => map
                .iter()
                .map(|(k, v)| v.deep_copy().map(|copy| (k.clone(), copy)))
                .collect::<Result<Map>>()
                .map(Value::Object),
            other => Ok(other.clone()),
        }
    }
}

/// Structural, kind-strict equality.
///
/// `Null` equals only `Null` and `Absence` equals only `Absence`; numbers
/// follow IEEE-754, so `NaN` is unequal to itself. A string never equals a
/// number with the same text.
pub fn deep_equal(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Absence, Value::Absence) => true,
        (Value::Null, Value::Null) => true,
        (Value::String(x), Value::String(y)) => x == y,
        (Value::Number(x), Value::Number(y)) => x == y,
        (Value::Array(x), Value::Array(y)) => {
            x.len() == y.len() && x.iter().zip(y).all(|(a, b)| deep_equal(a, b))
        }
        (Value::Object(x), Value::Object(y)) => {
            x.len() == y.len()
                && x.iter()
                    .all(|(k, v)| y.get(k).is_some_and(|other| deep_equal(v, other)))
        }
        (Value::Opaque(x), Value::Opaque(y)) => x == y,
        _ => false,
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        deep_equal(self, other)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Number(n)
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Value::Number(f64::from(n))
    }
}

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Self {
        Value::Array(items)
    }
}

impl From<Map> for Value {
    fn from(map: Map) -> Self {
        Value::Object(map)
    }
}

impl From<Opaque> for Value {
    fn from(o: Opaque) -> Self {
        Value::Opaque(o)
    }
}

impl fmt::Display for Value {
    /// Compact, JSON-like text. `Absence` prints as `nil` and the sentinel
    /// as `NULL` so the two stay distinguishable in diagnostics.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Absence => f.write_str("nil"),
            Value::Null => f.write_str("NULL"),
            Value::String(s) => write!(f, "{:?}", s),
            Value::Number(n) => write!(f, "{}", n),
            Value::Array(items) => {
                f.write_str("[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(",")?;
                    }
                    write!(f, "{}", item)?;
                }
                f.write_str("]")
            }
            Value::Object(map) => {
                f.write_str("{")?;
                for (i, (k, v)) in map.iter().enumerate() {
                    if i > 0 {
                        f.write_str(",")?;
                    }
                    write!(f, "{:?}:{}", k, v)?;
                }
                f.write_str("}")
            }
            Value::Opaque(o) => match o.encode() {
                Ok(json) => write!(f, "{}", json),
                Err(_) => write!(f, "<{}>", o.type_name()),
            },
        }
    }
}

impl Map {
    pub fn new() -> Self {
        Map {
            entries: BTreeMap::new(),
        }
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.entries.get(key)
    }

    pub fn get_mut(&mut self, key: &str) -> Option<&mut Value> {
        self.entries.get_mut(key)
    }

    /// Returns the slot for `key`, inserting [`Value::Absence`] if it is
    /// missing.
    pub fn slot(&mut self, key: &str) -> &mut Value {
        self.entries.entry(key.to_string()).or_default()
    }

    pub fn set(&mut self, key: impl Into<String>, value: Value) -> Option<Value> {
        self.entries.insert(key.into(), value)
    }

    pub fn has(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn delete(&mut self, key: &str) -> Option<Value> {
        self.entries.remove(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.entries.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = (&String, &mut Value)> {
        self.entries.iter_mut()
    }

    pub fn keys(&self) -> impl Iterator<Item = &String> {
        self.entries.keys()
    }

    pub fn values(&self) -> impl Iterator<Item = &Value> {
        self.entries.values()
    }
}

impl FromIterator<(String, Value)> for Map {
    fn from_iter<T: IntoIterator<Item = (String, Value)>>(iter: T) -> Self {
        Map {
            entries: iter.into_iter().collect(),
        }
    }
}

impl<'a> FromIterator<(&'a str, Value)> for Map {
    fn from_iter<T: IntoIterator<Item = (&'a str, Value)>>(iter: T) -> Self {
        iter.into_iter().map(|(k, v)| (k.to_string(), v)).collect()
    }
}

impl IntoIterator for Map {
    type Item = (String, Value);
    type IntoIter = btree_map::IntoIter<String, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

impl<'a> IntoIterator for &'a Map {
    type Item = (&'a String, &'a Value);
    type IntoIter = btree_map::Iter<'a, String, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
