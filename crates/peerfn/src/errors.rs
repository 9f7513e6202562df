use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur during bridge operations
#[derive(Error, Debug)]
pub enum BridgeError {
    #[error("Failed to initialize peer runtime: {0}")]
    Initialization(String),

    #[error("Virtual environment not found or invalid at: {0}")]
    VenvNotFound(PathBuf),

    #[error("Peer script not found: {0}")]
    ScriptNotFound(PathBuf),

    #[error("Peer function '{0}' is not defined")]
    FunctionNotFound(String),

    #[error("Peer runtime error: {0}")]
    Peer(String),

    #[error("Failed to marshal value across the runtime boundary: {0}")]
    Marshal(String),

    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

/// Generic conversion from PyErr to BridgeError.
///
/// NOTE: This conversion keeps only the rendered message, which includes the
/// peer exception type and text but not the traceback.
impl From<pyo3::PyErr> for BridgeError {
    fn from(err: pyo3::PyErr) -> Self {
        BridgeError::Peer(format!("{}", err))
    }
}
