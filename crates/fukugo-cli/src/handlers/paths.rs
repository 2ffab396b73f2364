//! Paths command handler.

use fukugo_core::{data_root, database_path};

use crate::error::CliError;

/// Print the resolved data directory and cache database in `key = value`
/// format.
pub fn execute() -> Result<(), CliError> {
    println!("data_root = {}", data_root()?.display());
    println!("database = {}", database_path()?.display());
    Ok(())
}
