//! Delegated invocation of peer functions
//!
//! Arguments and results cross the boundary as JSON through the peer's own
//! `json` module, so the adapter never depends on the native representation
//! of peer objects.

use crate::errors::BridgeError;
use crate::initialization::PeerRuntime;
use crate::interop::Interop;
use crate::value::Value;
use peerfn_logger as logger;
use pyo3::prelude::*;
use pyo3::types::{PyModule, PyTuple};

impl Interop for PeerRuntime {
    fn invoke(&self, name: &str, args: &[Value]) -> Result<Value, BridgeError> {
        pyo3::Python::attach(|py| {
            let module = self.module(py);

            if !module.hasattr(name)? {
                return Err(BridgeError::FunctionNotFound(name.to_string()));
            }
            let func = module.getattr(name)?;

            let json_module = PyModule::import(py, "json")?;
            let loads = json_module.getattr("loads")?;

            let mut py_args = Vec::with_capacity(args.len());
            for arg in args {
                let encoded = serde_json::to_string(arg)
                    .map_err(|e| BridgeError::Marshal(format!("{}", e)))?;
                py_args.push(loads.call1((encoded,))?);
            }
            let py_args = PyTuple::new(py, py_args)?;

            logger::step(&format!("Invoking peer function '{}'", name));
            let result = func
                .call1(py_args)
                .map_err(|e| BridgeError::Peer(format!("Function '{}' failed: {}", name, e)))?;

            let dumps = json_module.getattr("dumps")?;
            let encoded = dumps.call1((result,))?.extract::<String>()?;
            serde_json::from_str(&encoded).map_err(|e| BridgeError::Marshal(format!("{}", e)))
        })
    }
}
