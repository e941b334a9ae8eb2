//! Host values that live outside the recognized value kinds.

use std::any::Any;
use std::fmt;
use std::sync::Arc;

use serde::Serialize;

/// HostValue is implemented by foreign types carried inside
/// [`Value::Opaque`](super::Value::Opaque).
///
/// Any `Serialize + PartialEq` type gets an implementation for free: host
/// equality is the type's own `PartialEq`, and encoding goes through
/// `serde_json`.
pub trait HostValue: fmt::Debug + Send + Sync + 'static {
    /// Name of the concrete host type, used in diagnostics.
    fn type_name(&self) -> &'static str;

    /// Host-level equality. Values of different host types are never equal.
    fn host_eq(&self, other: &dyn HostValue) -> bool;

    /// Encodes the host value into the generic JSON model.
    fn encode(&self) -> serde_json::Result<serde_json::Value>;

    fn as_any(&self) -> &dyn Any;
}

impl<T> HostValue for T
where
    T: Serialize + PartialEq + fmt::Debug + Send + Sync + 'static,
{
    fn type_name(&self) -> &'static str {
        std::any::type_name::<T>()
    }

    fn host_eq(&self, other: &dyn HostValue) -> bool {
        other
            .as_any()
            .downcast_ref::<T>()
            .is_some_and(|other| self == other)
    }

    fn encode(&self) -> serde_json::Result<serde_json::Value> {
        serde_json::to_value(self)
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// Opaque is an immutable, shareable handle to a host value.
///
/// Cloning an Opaque shares the host value; since it can never be mutated
/// through the handle, a clone carries no shared mutable state.
#[derive(Debug, Clone)]
pub struct Opaque(Arc<dyn HostValue>);

impl Opaque {
    /// Wraps a host value.
    pub fn new<T: HostValue>(value: T) -> Self {
        Opaque(Arc::new(value))
    }

    /// Returns the name of the wrapped host type.
    pub fn type_name(&self) -> &'static str {
        self.0.type_name()
    }

    /// Encodes the wrapped value into the generic JSON model.
    pub fn encode(&self) -> serde_json::Result<serde_json::Value> {
        self.0.encode()
    }

    /// Returns the wrapped value if it is a `T`.
    pub fn downcast_ref<T: 'static>(&self) -> Option<&T> {
        self.0.as_any().downcast_ref::<T>()
    }
}

impl PartialEq for Opaque {
    fn eq(&self, other: &Self) -> bool {
        self.0.host_eq(other.0.as_ref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, PartialEq, Serialize)]
    struct Endpoint {
        host: String,
        port: u16,
    }

    #[test]
    fn test_opaque_host_equality() {
        let a = Opaque::new(Endpoint { host: "fred".into(), port: 80 });
        let b = Opaque::new(Endpoint { host: "fred".into(), port: 80 });
        let c = Opaque::new(Endpoint { host: "barney".into(), port: 80 });

        assert_eq!(a, b);
        assert_ne!(a, c);
        // Different host types never compare equal
        assert_ne!(Opaque::new(true), Opaque::new(1u8));
    }

    #[test]
    fn test_opaque_encode_and_downcast() {
        let o = Opaque::new(Endpoint { host: "fred".into(), port: 80 });
        assert_eq!(
            o.encode().unwrap(),
            serde_json::json!({"host": "fred", "port": 80})
        );
        assert_eq!(o.downcast_ref::<Endpoint>().map(|e| e.port), Some(80));
        assert!(o.downcast_ref::<bool>().is_none());
        assert!(o.type_name().ends_with("Endpoint"));
    }
}
