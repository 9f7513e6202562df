//! Rust bridge to an embedded peer-language runtime
//!
//! The bridge loads a small peer script on first use and re-exports two of
//! its functions as host-callable wrappers:
//! 1. `hello()` delegates to the peer's `hello`
//! 2. `double(n)` delegates to the peer's `float_double`
//!
//! Host code calls through the narrow [`Interop`] trait, so the live
//! [`PeerRuntime`] adapter can be replaced with a test double. Calls are
//! synchronous and single-threaded; the embedded interpreter is a
//! process-wide resource.

pub mod errors;
mod initialization;
mod interop;
mod invoker;
pub mod value;

mod bindings;

pub use bindings::{double, hello, Bindings};
pub use errors::BridgeError;
pub use initialization::PeerRuntime;
pub use interop::Interop;
pub use value::Value;
