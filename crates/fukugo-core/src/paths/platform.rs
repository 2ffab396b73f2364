//! Platform-specific data directory resolution.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use super::error::PathError;

/// Environment variable overriding the data directory.
pub const ENV_DATA_DIR: &str = "FUKUGO_DATA_DIR";

/// Get the root directory for application data (audio cache database).
///
/// Resolution order:
/// 1. `FUKUGO_DATA_DIR` environment variable (highest priority)
/// 2. System data directory (e.g., `~/.local/share/fukugo`)
///
/// The directory is created if it doesn't exist.
pub fn data_root() -> Result<PathBuf, PathError> {
    let override_dir = env::var(ENV_DATA_DIR).ok().filter(|v| !v.trim().is_empty());
    let root = resolve_data_root(override_dir.as_deref(), dirs::data_local_dir())?;
    ensure_dir(&root)?;
    Ok(root)
}

/// Pure resolution step of [`data_root`].
pub(super) fn resolve_data_root(
    override_dir: Option<&str>,
    system_data_dir: Option<PathBuf>,
) -> Result<PathBuf, PathError> {
    if let Some(path) = override_dir {
        return Ok(PathBuf::from(path.trim()));
    }

    system_data_dir
        .map(|dir| dir.join("fukugo"))
        .ok_or(PathError::NoDataDir)
}

pub(super) fn ensure_dir(path: &Path) -> Result<(), PathError> {
    if path.is_dir() {
        return Ok(());
    }

    tracing::debug!(path = %path.display(), "Creating data directory");
    fs::create_dir_all(path).map_err(|e| PathError::CreateFailed {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })
}
