//! Host-callable wrappers around the peer functions

use crate::errors::BridgeError;
use crate::initialization::PeerRuntime;
use crate::interop::Interop;
use crate::value::Value;

/// The host call surface over an injected interop adapter.
pub struct Bindings<I> {
    interop: I,
}

impl<I: Interop> Bindings<I> {
    pub fn new(interop: I) -> Self {
        Bindings { interop }
    }

    /// Say hello using the peer runtime.
    pub fn hello(&self) -> Result<String, BridgeError> {
        match self.interop.invoke("hello", &[])? {
            Value::Str(greeting) => Ok(greeting),
            other => Err(BridgeError::Marshal(format!(
                "Expected a string greeting, got {:?}",
                other
            ))),
        }
    }

    /// Return the number `n` doubled.
    ///
    /// The input is converted to f64 host-side; the doubling itself is
    /// delegated to the peer function `float_double`.
    pub fn double(&self, n: impl Into<f64>) -> Result<f64, BridgeError> {
        let n = n.into();
        let result = self.interop.invoke("float_double", &[Value::Float(n)])?;
        result.as_f64().ok_or_else(|| {
            BridgeError::Marshal(format!("Expected a number from float_double, got {:?}", result))
        })
    }
}

/// Say hello using the shared peer runtime.
pub fn hello() -> Result<String, BridgeError> {
    Bindings::new(PeerRuntime::shared()?).hello()
}

/// Return the number `n` doubled, using the shared peer runtime.
pub fn double(n: impl Into<f64>) -> Result<f64, BridgeError> {
    Bindings::new(PeerRuntime::shared()?).double(n)
}
