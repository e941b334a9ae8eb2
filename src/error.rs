//! Error types shared by every operation in the crate.

use crate::value::Kind;
use crate::walk::{Path, PathElement};
use thiserror::Error;

/// Convenience alias for results produced by this crate.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// DecodeError is raised at the codec boundary when input cannot be turned
/// into a [`Value`](crate::Value).
#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("failed to read input: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

/// Error is the failure type of diff, apply, walk and the set operations.
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Decode(#[from] DecodeError),

    #[error("failed to encode value: {0}")]
    Encode(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// A value kind with no merge rule reached Union, Intersection or
    /// TopoIntersection.
    #[error("{path}: unsupported type: {kind}")]
    UnsupportedType { path: Path, kind: Kind },

    /// The subtrahend held content that could not be removed from the
    /// minuend while a must-subtract option was set.
    #[error("{path}: can't subtract: {reason}")]
    MustSubtract { path: Path, reason: String },

    /// A patch was applied to data it was not computed against.
    #[error("{path}: invariant violation: {message}")]
    InvariantViolation { path: Path, message: String },

    /// A walk callback addressed a child the current node cannot hold.
    #[error("{path}: invalid child {key} for {kind} value")]
    InvalidChild {
        path: Path,
        key: PathElement,
        kind: Kind,
    },

    #[error("{path}: nesting deeper than {limit} levels")]
    DepthExceeded { path: Path, limit: usize },
}

impl Error {
    /// Wraps a codec failure on the encode side.
    pub fn encode(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Error::Encode(Box::new(err))
    }

    /// Creates an unsupported type error at the current position.
    pub fn unsupported_type(kind: Kind) -> Self {
        Error::UnsupportedType {
            path: Path::new(),
            kind,
        }
    }

    /// Creates a must-subtract violation at the current position.
    pub fn must_subtract(reason: impl Into<String>) -> Self {
        Error::MustSubtract {
            path: Path::new(),
            reason: reason.into(),
        }
    }

    /// Creates an invariant violation at the current position.
    pub fn invariant(message: impl Into<String>) -> Self {
        Error::InvariantViolation {
            path: Path::new(),
            message: message.into(),
        }
    }

    /// Creates a depth limit error at the current position.
    pub fn depth_exceeded(limit: usize) -> Self {
        Error::DepthExceeded {
            path: Path::new(),
            limit,
        }
    }

    /// Prefixes the error location with `element`.
    ///
    /// Recursive operations call this while unwinding so the reported path
    /// runs from the document root to the failing node.
    pub fn at(mut self, element: PathElement) -> Self {
        match &mut self {
            Error::UnsupportedType { path, .. }
            | Error::MustSubtract { path, .. }
            | Error::InvariantViolation { path, .. }
            | Error::InvalidChild { path, .. }
            | Error::DepthExceeded { path, .. } => path.push_front(element),
            Error::Decode(_) | Error::Encode(_) => {}
        }
        self
    }

    /// Returns the location of the failure, if it has one.
    pub fn path(&self) -> Option<&Path> {
        match self {
            Error::UnsupportedType { path, .. }
            | Error::MustSubtract { path, .. }
            | Error::InvariantViolation { path, .. }
            | Error::InvalidChild { path, .. }
            | Error::DepthExceeded { path, .. } => Some(path),
            Error::Decode(_) | Error::Encode(_) => None,
        }
    }

    /// Returns true for programming errors such as applying a patch to the
    /// wrong document. These are never data problems.
    pub fn is_invariant_violation(&self) -> bool {
        matches!(self, Error::InvariantViolation { .. })
    }

    pub fn is_must_subtract(&self) -> bool {
        matches!(self, Error::MustSubtract { .. })
    }

    pub fn is_unsupported_type(&self) -> bool {
        matches!(self, Error::UnsupportedType { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_path_is_built_root_first() {
        let err = Error::must_subtract("extra key")
            .at(PathElement::field_name("inner"))
            .at(PathElement::index(2))
            .at(PathElement::field_name("outer"));

        assert!(err.is_must_subtract());
        assert_eq!(err.path().map(|p| p.to_string()), Some(".outer[2].inner".to_string()));
        assert_eq!(err.to_string(), ".outer[2].inner: can't subtract: extra key");
    }

    #[test]
    fn test_invariant_violation_is_distinguished() {
        let err = Error::invariant("array patch applied to string");
        assert!(err.is_invariant_violation());
        assert!(!err.is_must_subtract());
        assert!(!err.is_unsupported_type());
    }

    #[test]
    fn test_decode_error_has_no_path() {
        let json_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err: Error = DecodeError::from(json_err).into();
        assert!(err.path().is_none());
        assert!(err.to_string().starts_with("invalid JSON"));
    }
}
