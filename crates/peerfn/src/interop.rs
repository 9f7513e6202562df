//! The narrow interface host code calls through
//!
//! Callers depend on this trait, never on the interop library's native
//! handle types, so the live adapter can be swapped for a test double.

use crate::errors::BridgeError;
use crate::value::Value;

/// A connection to the peer runtime capable of invoking named functions.
pub trait Interop {
    /// Invoke the peer function `name` with positional `args`.
    ///
    /// Fails with `FunctionNotFound` when `name` is undefined in the peer
    /// namespace and `Peer` when the function itself raises.
    fn invoke(&self, name: &str, args: &[Value]) -> Result<Value, BridgeError>;
}

impl<T: Interop + ?Sized> Interop for &T {
    fn invoke(&self, name: &str, args: &[Value]) -> Result<Value, BridgeError> {
        (**self).invoke(name, args)
    }
}
