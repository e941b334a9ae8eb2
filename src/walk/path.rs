//! Path element and path types.

use crate::value::Value;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;

/// PathElement addresses one child within a container.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PathElement {
    /// Key of an object entry.
    FieldName(String),
    /// Position within an array.
    Index(usize),
}

impl PathElement {
    /// Creates a new field name path element.
    pub fn field_name(name: impl Into<String>) -> Self {
        PathElement::FieldName(name.into())
    }

    /// Creates a new index path element.
    pub fn index(i: usize) -> Self {
        PathElement::Index(i)
    }

    /// Returns true if this is a field name element.
    pub fn is_field_name(&self) -> bool {
        matches!(self, PathElement::FieldName(_))
    }

    /// Returns the field name if this is a field name element.
    pub fn as_field_name(&self) -> Option<&str> {
        match self {
            PathElement::FieldName(name) => Some(name),
            PathElement::Index(_) => None,
        }
    }

    /// Returns the index if this is an index element.
    pub fn as_index(&self) -> Option<usize> {
        match self {
            PathElement::Index(i) => Some(*i),
            PathElement::FieldName(_) => None,
        }
    }
}

impl From<&str> for PathElement {
    fn from(name: &str) -> Self {
        PathElement::field_name(name)
    }
}

impl From<String> for PathElement {
    fn from(name: String) -> Self {
        PathElement::FieldName(name)
    }
}

impl From<usize> for PathElement {
    fn from(i: usize) -> Self {
        PathElement::Index(i)
    }
}

impl PartialOrd for PathElement {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for PathElement {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (PathElement::FieldName(a), PathElement::FieldName(b)) => a.cmp(b),
            (PathElement::Index(a), PathElement::Index(b)) => a.cmp(b),
            // Field names come before indices
            (PathElement::FieldName(_), PathElement::Index(_)) => Ordering::Less,
            (PathElement::Index(_), PathElement::FieldName(_)) => Ordering::Greater,
        }
    }
}

/// Path is the chain of keys from a document root down to one node.
///
/// The root itself is the empty path, so `len()` is the depth of the node.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Path {
    elements: Vec<PathElement>,
}

impl Path {
    /// Creates a new empty path.
    pub fn new() -> Self {
        Path {
            elements: Vec::new(),
        }
    }

    /// Creates a path from a vector of elements.
    pub fn from_elements(elements: Vec<PathElement>) -> Self {
        Path { elements }
    }

    /// Returns the number of elements in the path.
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    /// Returns true if the path is empty.
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Returns an iterator over the path elements.
    pub fn iter(&self) -> impl Iterator<Item = &PathElement> {
        self.elements.iter()
    }

    /// Appends a path element.
    pub fn push(&mut self, element: PathElement) {
        self.elements.push(element);
    }

    /// Inserts a path element at the root end.
    pub fn push_front(&mut self, element: PathElement) {
        self.elements.insert(0, element);
    }

    /// Removes and returns the last path element.
    pub fn pop(&mut self) -> Option<PathElement> {
        self.elements.pop()
    }

    /// Returns the last path element.
    pub fn last(&self) -> Option<&PathElement> {
        self.elements.last()
    }

    /// Creates a new path with the given element appended.
    pub fn with(&self, element: PathElement) -> Self {
        let mut new_path = self.clone();
        new_path.push(element);
        new_path
    }

    /// Returns a copy of this path with the last frame dropped, or `None` at
    /// the root.
    pub fn parent(&self) -> Option<Self> {
        let (_, rest) = self.elements.split_last()?;
        Some(Path::from_elements(rest.to_vec()))
    }

    /// Returns a slice of the path elements.
    pub fn as_slice(&self) -> &[PathElement] {
        &self.elements
    }

    /// Follows this path down from `root`, returning the value it leads to.
    pub fn resolve<'v>(&self, root: &'v Value) -> Option<&'v Value> {
        self.elements
            .iter()
            .try_fold(root, |node, element| match (node, element) {
                (Value::Object(map), PathElement::FieldName(name)) => map.get(name),
                (Value::Array(items), PathElement::Index(i)) => items.get(*i),
                _ => None,
            })
    }
}

impl FromIterator<PathElement> for Path {
    fn from_iter<T: IntoIterator<Item = PathElement>>(iter: T) -> Self {
        Path {
            elements: iter.into_iter().collect(),
        }
    }
}

impl IntoIterator for Path {
    type Item = PathElement;
    type IntoIter = std::vec::IntoIter<PathElement>;

    fn into_iter(self) -> Self::IntoIter {
        self.elements.into_iter()
    }
}

impl<'a> IntoIterator for &'a Path {
    type Item = &'a PathElement;
    type IntoIter = std::slice::Iter<'a, PathElement>;

    fn into_iter(self) -> Self::IntoIter {
        self.elements.iter()
    }
}

impl fmt::Display for PathElement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PathElement::FieldName(name) => write!(f, ".{}", name),
            PathElement::Index(i) => write!(f, "[{}]", i),
        }
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.elements.is_empty() {
            return write!(f, ".");
        }
        for element in &self.elements {
            write!(f, "{}", element)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_path_element_field_name() {
        let pe = PathElement::field_name("foo");
        assert!(pe.is_field_name());
        assert_eq!(pe.as_field_name(), Some("foo"));
        assert_eq!(pe.as_index(), None);
    }

    #[test]
    fn test_path_operations() {
        let mut path = Path::new();
        assert!(path.is_empty());

        path.push(PathElement::field_name("metadata"));
        path.push(PathElement::index(3));
        assert_eq!(path.len(), 2);
        assert_eq!(path.last(), Some(&PathElement::Index(3)));

        let parent = path.parent().unwrap();
        assert_eq!(parent.len(), 1);
        // parent() copies; the original keeps its frames
        assert_eq!(path.len(), 2);

        assert_eq!(path.pop(), Some(PathElement::Index(3)));
        assert_eq!(path, parent);
        assert!(Path::new().parent().is_none());
    }

    #[test]
    fn test_path_resolve() {
        let doc = crate::value::from_json(r#"{"items": [{"name": "n"}]}"#).unwrap();
        let path = Path::from_elements(vec![
            PathElement::field_name("items"),
            PathElement::index(0),
            PathElement::field_name("name"),
        ]);
        assert_eq!(path.resolve(&doc), Some(&Value::from("n")));
        assert_eq!(Path::new().resolve(&doc), Some(&doc));
        assert_eq!(path.with(PathElement::index(0)).resolve(&doc), None);
        assert_eq!(Path::from_elements(vec![PathElement::index(0)]).resolve(&doc), None);
    }

    #[test]
    fn test_path_display() {
        let path = Path::from_elements(vec![
            PathElement::field_name("items"),
            PathElement::index(0),
            PathElement::field_name("name"),
        ]);
        assert_eq!(format!("{}", path), ".items[0].name");
        assert_eq!(format!("{}", Path::new()), ".");
    }

    #[test]
    fn test_path_element_ordering() {
        let a = PathElement::field_name("a");
        let b = PathElement::field_name("b");
        assert!(a < b);
        assert!(PathElement::index(1) < PathElement::index(2));
        // Field names come before indices
        assert!(b < PathElement::index(0));
    }
}
