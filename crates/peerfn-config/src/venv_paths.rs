//! Path resolution for Python virtual environments
//!
//! The bridge activates an existing environment before the peer script loads;
//! it never creates one. These helpers locate the pieces it needs and report
//! a missing environment as an error instead of guessing.

use std::fs;
use std::path::{Path, PathBuf};

/// Library directory inside a venv: "Lib" on Windows, "lib" on Unix
#[cfg(windows)]
pub const VENV_LIB_DIR: &str = "Lib";
#[cfg(not(windows))]
pub const VENV_LIB_DIR: &str = "lib";

/// Binaries directory inside a venv: "Scripts" on Windows, "bin" on Unix
#[cfg(windows)]
pub const VENV_BIN_DIR: &str = "Scripts";
#[cfg(not(windows))]
pub const VENV_BIN_DIR: &str = "bin";

#[cfg(not(windows))]
const PYTHON_EXE_CANDIDATES: &[&str] = &["python3", "python"];
#[cfg(windows)]
const PYTHON_EXE_CANDIDATES: &[&str] = &["python.exe", "python3.exe"];

/// Error type for venv path resolution
#[derive(Debug, Clone)]
pub enum VenvPathError {
    /// The venv root does not exist or is not a directory
    VenvNotFound(PathBuf),
    /// A required directory or file inside the venv is missing
    PathResolution(String),
}

impl std::fmt::Display for VenvPathError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            VenvPathError::VenvNotFound(path) => {
                write!(f, "Virtual environment not found: {}", path.display())
            }
            VenvPathError::PathResolution(msg) => write!(f, "{}", msg),
        }
    }
}

impl std::error::Error for VenvPathError {}

/// Resolve the site-packages directory of a virtual environment.
///
/// Unix layout is `<venv>/lib/python3.X/site-packages`; Windows layout is
/// `<venv>/Lib/site-packages`.
pub fn resolve_site_packages(venv_path: &Path) -> Result<PathBuf, VenvPathError> {
    if !venv_path.is_dir() {
        return Err(VenvPathError::VenvNotFound(venv_path.to_path_buf()));
    }

    let lib_dir = venv_path.join(VENV_LIB_DIR);
    if !lib_dir.is_dir() {
        return Err(VenvPathError::PathResolution(format!(
            "lib directory not found: {}",
            lib_dir.display()
        )));
    }

    #[cfg(windows)]
    let site_packages = lib_dir.join("site-packages");

    // On Unix the versioned directory (e.g. python3.12) sits between lib/
    // and site-packages, and its name depends on the interpreter used to
    // create the venv.
    #[cfg(not(windows))]
    let site_packages = fs::read_dir(&lib_dir)
        .map_err(|e| VenvPathError::PathResolution(format!("Failed to read lib dir: {}", e)))?
        .filter_map(|e| e.ok())
        .find(|e| e.file_name().to_string_lossy().starts_with("python"))
        .ok_or_else(|| {
            VenvPathError::PathResolution("No python3.X directory found in venv/lib".to_string())
        })?
        .path()
        .join("site-packages");

    if !site_packages.is_dir() {
        return Err(VenvPathError::PathResolution(format!(
            "site-packages not found: {}",
            site_packages.display()
        )));
    }
    Ok(site_packages)
}

/// Resolve the interpreter executable of a virtual environment.
pub fn resolve_python_exe(venv_path: &Path) -> Result<PathBuf, VenvPathError> {
    if !venv_path.is_dir() {
        return Err(VenvPathError::VenvNotFound(venv_path.to_path_buf()));
    }

    let bin_dir = venv_path.join(VENV_BIN_DIR);
    for exe in PYTHON_EXE_CANDIDATES {
        let candidate = bin_dir.join(exe);
        if candidate.is_file() {
            return Ok(candidate);
        }
    }

    Err(VenvPathError::PathResolution(format!(
        "Python executable not found in {}",
        bin_dir.display()
    )))
}

/// Locate a system interpreter on PATH, used when no venv is configured.
pub fn system_python() -> Result<PathBuf, VenvPathError> {
    for exe in PYTHON_EXE_CANDIDATES {
        if let Ok(path) = which::which(exe) {
            return Ok(path);
        }
    }
    Err(VenvPathError::PathResolution(
        "No Python interpreter found on PATH".to_string(),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[cfg(not(windows))]
    fn create_mock_venv(python_version: &str) -> Option<TempDir> {
        let temp_dir = TempDir::new().ok()?;
        let venv_path = temp_dir.path();

        let site_packages = venv_path
            .join("lib")
            .join(python_version)
            .join("site-packages");
        fs::create_dir_all(&site_packages).ok()?;

        let bin_dir = venv_path.join("bin");
        fs::create_dir_all(&bin_dir).ok()?;
        fs::write(bin_dir.join("python3"), "").ok()?;

        Some(temp_dir)
    }

    #[test]
    #[cfg(not(windows))]
    fn test_resolve_site_packages() {
        let Some(venv) = create_mock_venv("python3.12") else {
            return;
        };
        let result = resolve_site_packages(venv.path());
        assert!(result.is_ok_and(|p| p.ends_with("lib/python3.12/site-packages")));
    }

    #[test]
    #[cfg(not(windows))]
    fn test_resolve_python_exe() {
        let Some(venv) = create_mock_venv("python3.12") else {
            return;
        };
        let result = resolve_python_exe(venv.path());
        assert!(result.is_ok_and(|p| p.ends_with("bin/python3")));
    }

    #[test]
    #[cfg(not(windows))]
    fn test_missing_site_packages_is_a_resolution_error() {
        let Ok(venv) = TempDir::new() else {
            return;
        };
        let Ok(()) = fs::create_dir_all(venv.path().join("lib").join("python3.12")) else {
            return;
        };
        let result = resolve_site_packages(venv.path());
        assert!(matches!(result, Err(VenvPathError::PathResolution(_))));
    }

    #[test]
    fn test_venv_not_found() {
        let non_existent = PathBuf::from("/tmp/peerfn_non_existent_venv_12345");
        let result = resolve_site_packages(&non_existent);
        assert!(matches!(result, Err(VenvPathError::VenvNotFound(_))));
    }

    #[test]
    fn test_platform_constants() {
        #[cfg(not(windows))]
        {
            assert_eq!(VENV_LIB_DIR, "lib");
            assert_eq!(VENV_BIN_DIR, "bin");
        }
        #[cfg(windows)]
        {
            assert_eq!(VENV_LIB_DIR, "Lib");
            assert_eq!(VENV_BIN_DIR, "Scripts");
        }
    }
}
