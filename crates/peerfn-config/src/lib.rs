//! Configuration for the peerfn bridge
//!
//! Two concerns live here:
//! - the user-level config file (peer script override, virtual environment
//!   location, interpreter version pin)
//! - virtual environment path resolution, which differs between Unix and
//!   Windows layouts

mod config;
pub mod venv_paths;

pub use config::{Config, ConfigError};
