//! Peer runtime initialization
//!
//! One lifecycle transition: uninitialized to initialized. Initialization
//! resolves the peer script, activates the dependency environment if one is
//! present, starts the embedded interpreter, and executes the script into a
//! dedicated module namespace. Any failure is fatal and surfaced as is; an
//! initialization error observed through [`PeerRuntime::shared`] is cached
//! and repeated to every later caller.

use crate::errors::BridgeError;
use once_cell::sync::OnceCell;
use peerfn_config::venv_paths::{resolve_site_packages, system_python};
use peerfn_config::Config;
use peerfn_logger as logger;
use pyo3::prelude::*;
use pyo3::types::PyModule;
use std::ffi::CString;
use std::fs;
use std::path::{Path, PathBuf};

/// Peer-side source compiled into the binary, used when no script file is
/// present on disk (e.g. an installed layout without the source tree).
const EMBEDDED_SCRIPT: &str = include_str!("../peer/funcs.py");

/// The live connection to the embedded peer runtime.
///
/// Construct one explicitly with [`PeerRuntime::initialize`] to control the
/// configuration, or use [`PeerRuntime::shared`] for the process-wide
/// instance.
pub struct PeerRuntime {
    /// The peer module namespace holding the loaded function definitions
    module: Py<PyModule>,
}

static RUNTIME_INSTANCE: OnceCell<Result<PeerRuntime, BridgeError>> = OnceCell::new();

impl PeerRuntime {
    /// Get or initialize the shared runtime instance
    pub fn shared() -> Result<&'static PeerRuntime, BridgeError> {
        let init = || {
            let config = Config::load().map_err(|e| {
                BridgeError::Initialization(format!("Failed to load config: {}", e))
            })?;
            PeerRuntime::initialize(&config)
        };
        match RUNTIME_INSTANCE.get_or_init(init) {
            Ok(runtime) => Ok(runtime),
            Err(e) => Err(BridgeError::Initialization(format!("{}", e))),
        }
    }

    /// Initialize the embedded interpreter and load the peer script
    ///
    /// This performs:
    /// 1. Resolve the peer script (config override, sibling file, embedded copy)
    /// 2. Resolve the dependency environment's site-packages, if any
    /// 3. Start the interpreter and activate the environment
    /// 4. Execute the script into a dedicated module namespace
    pub fn initialize(config: &Config) -> Result<PeerRuntime, BridgeError> {
        let start_time = std::time::Instant::now();

        let script = resolve_script(config)?;
        let site_packages = resolve_dependency_env(config)?;

        logger::debug("Initializing peer interpreter...");
        let interp_start = std::time::Instant::now();
        pyo3::Python::initialize();
        logger::debug(&format!(
            "pyo3::Python::initialize took: {:?}",
            interp_start.elapsed()
        ));

        let runtime = pyo3::Python::attach(|py| {
            // Enable bytecode generation for faster subsequent loads
            let sys = PyModule::import(py, "sys").map_err(|e| {
                BridgeError::Initialization(format!("Failed to import sys module: {}", e))
            })?;
            sys.setattr("dont_write_bytecode", false).map_err(|e| {
                BridgeError::Initialization(format!("Failed to enable bytecode generation: {}", e))
            })?;

            if let Some(ref site_dir) = site_packages {
                let site = PyModule::import(py, "site").map_err(|e| {
                    BridgeError::Initialization(format!("Failed to import site module: {}", e))
                })?;
                let site_dir = site_dir.to_string_lossy();
                site.call_method1("addsitedir", (site_dir.as_ref(),))
                    .map_err(|e| {
                        BridgeError::Initialization(format!("Failed to add site directory: {}", e))
                    })?;
                logger::debug(&format!("Activated dependency environment: {}", site_dir));
            }

            let module = load_script_module(py, &script)?;
            Ok::<PeerRuntime, BridgeError>(PeerRuntime {
                module: module.unbind(),
            })
        })?;

        logger::debug(&format!(
            "Total bridge initialization took: {:?}",
            start_time.elapsed()
        ));
        Ok(runtime)
    }

    /// The loaded peer module namespace
    pub(crate) fn module<'py>(&self, py: Python<'py>) -> Bound<'py, PyModule> {
        self.module.bind(py).clone()
    }
}

/// The peer script source and where it came from
struct ScriptSource {
    source: String,
    /// Reported as the filename in peer tracebacks
    origin: PathBuf,
}

fn resolve_script(config: &Config) -> Result<ScriptSource, BridgeError> {
    if let Some(ref configured) = config.script_path {
        let path = PathBuf::from(configured);
        if !path.is_file() {
            return Err(BridgeError::ScriptNotFound(path));
        }
        logger::debug(&format!("Loading peer script from {}", path.display()));
        let source = fs::read_to_string(&path)?;
        return Ok(ScriptSource {
            source,
            origin: path,
        });
    }

    let sibling = Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("peer")
        .join("funcs.py");
    if sibling.is_file() {
        logger::debug(&format!("Loading peer script from {}", sibling.display()));
        let source = fs::read_to_string(&sibling)?;
        return Ok(ScriptSource {
            source,
            origin: sibling,
        });
    }

    logger::debug("Loading embedded peer script");
    Ok(ScriptSource {
        source: EMBEDDED_SCRIPT.to_string(),
        origin: PathBuf::from("peer/funcs.py"),
    })
}

/// Resolve the site-packages directory to activate, if any.
///
/// A venv configured explicitly must exist; a missing default is not an
/// error, the bridge just runs against the system interpreter.
fn resolve_dependency_env(config: &Config) -> Result<Option<PathBuf>, BridgeError> {
    if let Some(ref configured) = config.venv_path {
        let venv = PathBuf::from(configured);
        if !venv.is_dir() {
            return Err(BridgeError::VenvNotFound(venv));
        }
        let site = resolve_site_packages(&venv)
            .map_err(|e| BridgeError::Initialization(format!("{}", e)))?;
        return Ok(Some(site));
    }

    let default = default_venv_path();
    if default.is_dir() {
        match resolve_site_packages(&default) {
            Ok(site) => return Ok(Some(site)),
            Err(e) => logger::warn(&format!("Ignoring default virtual environment: {}", e)),
        }
    }

    match system_python() {
        Ok(python) => logger::debug(&format!(
            "No virtual environment configured; system interpreter at {}",
            python.display()
        )),
        Err(e) => logger::step(&format!("{}", e)),
    }
    Ok(None)
}

/// The environment root two directory levels above the peer script, which is
/// where a project-level `.venv` sits relative to `crates/peerfn/peer/`.
fn default_venv_path() -> PathBuf {
    let manifest_dir = Path::new(env!("CARGO_MANIFEST_DIR"));
    manifest_dir
        .ancestors()
        .nth(2)
        .unwrap_or(manifest_dir)
        .join(".venv")
}

fn load_script_module<'py>(
    py: Python<'py>,
    script: &ScriptSource,
) -> Result<Bound<'py, PyModule>, BridgeError> {
    let code = CString::new(script.source.as_str()).map_err(|e| {
        BridgeError::Initialization(format!("Peer script contains a NUL byte: {}", e))
    })?;
    let filename = CString::new(script.origin.to_string_lossy().as_bytes())
        .unwrap_or_else(|_| c"peer_funcs.py".to_owned());
    PyModule::from_code(py, code.as_c_str(), filename.as_c_str(), c"peerfn_peer")
        .map_err(|e| BridgeError::Initialization(format!("Failed to load peer script: {}", e)))
}
