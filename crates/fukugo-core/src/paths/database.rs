//! Database path resolution.

use std::path::PathBuf;

use super::error::PathError;
use super::platform::{data_root, ensure_dir};

/// File name of the audio cache database.
pub const DATABASE_FILE_NAME: &str = "fukugo.db";

/// Get the path to the audio cache database file.
///
/// Returns `<data root>/data/fukugo.db`; the `data/` subdirectory is created
/// if it doesn't exist.
pub fn database_path() -> Result<PathBuf, PathError> {
    let data_dir = data_root()?.join("data");
    ensure_dir(&data_dir)?;
    Ok(data_dir.join(DATABASE_FILE_NAME))
}
