//! Host call surface tests against mock interop adapters
//!
//! These exercise the bindings without a live interpreter: the adapter
//! behind the `Interop` trait is replaced with test doubles.

use peerfn::{Bindings, BridgeError, Interop, Value};

/// Behaves like the loaded peer script
struct MockPeer;

impl Interop for MockPeer {
    fn invoke(&self, name: &str, args: &[Value]) -> Result<Value, BridgeError> {
        match name {
            "hello" if args.is_empty() => Ok(Value::Str("Hello from the peer runtime!".into())),
            "float_double" => {
                let n = args.first().and_then(Value::as_f64).ok_or_else(|| {
                    BridgeError::Marshal("float_double expects one numeric argument".into())
                })?;
                Ok(Value::Float(n * 2.0))
            }
            other => Err(BridgeError::FunctionNotFound(other.to_string())),
        }
    }
}

/// A peer namespace with no functions defined
struct EmptyPeer;

impl Interop for EmptyPeer {
    fn invoke(&self, name: &str, _args: &[Value]) -> Result<Value, BridgeError> {
        Err(BridgeError::FunctionNotFound(name.to_string()))
    }
}

/// An adapter whose initialization failed; every call reports that failure
struct UninitializedPeer;

impl Interop for UninitializedPeer {
    fn invoke(&self, _name: &str, _args: &[Value]) -> Result<Value, BridgeError> {
        Err(BridgeError::Initialization(
            "peer runtime unavailable".to_string(),
        ))
    }
}

#[test]
fn test_hello_returns_nonempty_greeting() {
    let bindings = Bindings::new(MockPeer);
    let greeting = bindings.hello();
    assert!(greeting.is_ok_and(|g| !g.is_empty()));
}

#[test]
fn test_double_known_values() {
    let bindings = Bindings::new(MockPeer);
    assert!(bindings.double(0).is_ok_and(|v| v == 0.0));
    assert!(bindings.double(-3.5).is_ok_and(|v| v == -7.0));
    assert!(bindings.double(100).is_ok_and(|v| v == 200.0));
}

#[test]
fn test_double_matches_two_n_for_finite_inputs() {
    let bindings = Bindings::new(MockPeer);
    let inputs: [f64; 7] = [0.0, 1.0, -1.0, 0.25, -1024.5, 1e9, -3.75e-4];
    for n in inputs {
        assert!(bindings.double(n).is_ok_and(|v| v == 2.0 * n), "n = {}", n);
    }
}

#[test]
fn test_double_accepts_integer_input() {
    let bindings = Bindings::new(MockPeer);
    assert!(bindings.double(21_i32).is_ok_and(|v| v == 42.0));
    assert!(bindings.double(7_u16).is_ok_and(|v| v == 14.0));
}

#[test]
fn test_double_is_idempotent() {
    let bindings = Bindings::new(MockPeer);
    let first = bindings.double(12.5);
    for _ in 0..3 {
        let again = bindings.double(12.5);
        assert!(again.is_ok_and(|v| v == 25.0));
    }
    assert!(first.is_ok_and(|v| v == 25.0));
}

#[test]
fn test_calls_before_initialization_fail_loudly() {
    let bindings = Bindings::new(UninitializedPeer);
    assert!(matches!(
        bindings.hello(),
        Err(BridgeError::Initialization(_))
    ));
    assert!(matches!(
        bindings.double(3.0),
        Err(BridgeError::Initialization(_))
    ));
}

#[test]
fn test_missing_peer_function_is_reported() {
    let bindings = Bindings::new(EmptyPeer);
    let result = bindings.hello();
    assert!(matches!(result, Err(BridgeError::FunctionNotFound(name)) if name == "hello"));
}

#[test]
fn test_non_string_greeting_is_a_marshal_error() {
    struct NumericGreeter;
    impl Interop for NumericGreeter {
        fn invoke(&self, _name: &str, _args: &[Value]) -> Result<Value, BridgeError> {
            Ok(Value::Int(42))
        }
    }

    let bindings = Bindings::new(NumericGreeter);
    assert!(matches!(bindings.hello(), Err(BridgeError::Marshal(_))));
}

#[test]
fn test_bindings_work_through_a_reference() {
    let peer = MockPeer;
    let bindings = Bindings::new(&peer);
    assert!(bindings.double(4.0).is_ok_and(|v| v == 8.0));
}
