//! Depth-first traversal with mutation hooks.

use super::path::{Path, PathElement};
use crate::error::{Error, Result};
use crate::value::Value;
use crate::MAX_DEPTH;
use tracing::trace;

/// WalkPosition is the node a walk callback is currently looking at.
///
/// It pairs the node with the path that leads to it and allows the callback
/// to read, replace or delete the node's own children. Changes are visible
/// to the rest of the traversal, which descends into the children only after
/// the callback returns.
#[derive(Debug)]
pub struct WalkPosition<'a> {
    path: &'a Path,
    value: &'a mut Value,
}

impl<'a> WalkPosition<'a> {
    /// Returns the key of this node within its parent, `None` at the root.
    pub fn key(&self) -> Option<&PathElement> {
        self.path.last()
    }

    /// Returns the keys from the root down to this node.
    pub fn path(&self) -> &Path {
        self.path
    }

    /// Returns the nesting depth of this node; the root is at depth 0.
    pub fn depth(&self) -> usize {
        self.path.len()
    }

    pub fn value(&self) -> &Value {
        self.value
    }

    /// Reads one child of this node.
    pub fn get(&self, key: &PathElement) -> Option<&Value> {
        match (&*self.value, key) {
            (Value::Object(map), PathElement::FieldName(name)) => map.get(name),
            (Value::Array(items), PathElement::Index(i)) => items.get(*i),
            _ => None,
        }
    }

    /// Replaces or inserts one child of this node.
    ///
    /// Objects accept any field name. Arrays accept an existing index only;
    /// use [`Value::Array`] replacement on the parent to grow an array.
    pub fn set(&mut self, key: PathElement, value: Value) -> Result<()> {
        match (&mut *self.value, &key) {
            (Value::Object(map), PathElement::FieldName(name)) => {
                map.set(name.clone(), value);
                Ok(())
            }
            (Value::Array(items), PathElement::Index(i)) if *i < items.len() => {
                items[*i] = value;
                Ok(())
            }
            _ => Err(self.invalid_child(key)),
        }
    }

    /// Removes one child of this node and returns it.
    ///
    /// Deleting a missing key or an index past the end returns `Ok(None)`.
    /// Removing an array element shifts the elements after it.
    pub fn delete(&mut self, key: &PathElement) -> Result<Option<Value>> {
        match (&mut *self.value, key) {
            (Value::Object(map), PathElement::FieldName(name)) => Ok(map.delete(name)),
            (Value::Array(items), PathElement::Index(i)) => {
                Ok((*i < items.len()).then(|| items.remove(*i)))
            }
            _ => Err(self.invalid_child(key.clone())),
        }
    }

    fn invalid_child(&self, key: PathElement) -> Error {
        Error::InvalidChild {
            path: self.path.clone(),
            key,
            kind: self.value.kind(),
        }
    }
}

/// Walks `root` depth-first and calls `visit` once for every node.
///
/// Nodes are visited in pre-order: a node before its children, object
/// entries in ascending key order, array elements by index. A root that is a
/// leaf is visited exactly once. The first error returned by `visit` stops
/// the walk and is returned unchanged.
///
/// The callback sees the keys leading to its node but not the ancestor
/// values, which are borrowed for the descent. To read ancestors, resolve
/// prefixes of [`WalkPosition::path`] against a copy taken before the walk
/// with [`Path::resolve`].
pub fn walk<F, E>(root: &mut Value, mut visit: F) -> Result<(), E>
where
    F: FnMut(&mut WalkPosition<'_>) -> Result<(), E>,
    E: From<Error>,
{
    let mut path = Path::new();
    walk_node(root, &mut path, &mut visit)
}

fn walk_node<F, E>(value: &mut Value, path: &mut Path, visit: &mut F) -> Result<(), E>
where
    F: FnMut(&mut WalkPosition<'_>) -> Result<(), E>,
    E: From<Error>,
{
    if path.len() > MAX_DEPTH {
        return Err(Error::DepthExceeded {
            path: path.clone(),
            limit: MAX_DEPTH,
        }
        .into());
    }

    trace!(path = %path, kind = %value.kind(), "visit");
    visit(&mut WalkPosition {
        path: &*path,
        value: &mut *value,
    })?;

    match value {
        Value::Object(map) => {
            for (key, child) in map.iter_mut() {
                path.push(PathElement::FieldName(key.clone()));
                let result = walk_node(child, path, visit);
                path.pop();
                result?;
            }
        }
        Value::Array(items) => {
            for (i, child) in items.iter_mut().enumerate() {
                path.push(PathElement::Index(i));
                let result = walk_node(child, path, visit);
                path.pop();
                result?;
            }
        }
        _ => {}
    }
    Ok(())
}
