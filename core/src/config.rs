use std::path::PathBuf;

use anyhow::{anyhow, Result};

pub const DATA_DIR_ENV: &str = "CRAGBOOK_DIR";
const DEFAULT_DIR_NAME: &str = ".cragbook";

/// Resolves the journal's data directory: an explicit path wins, otherwise
/// `~/.cragbook`.
pub fn resolve_data_dir(explicit: Option<PathBuf>) -> Result<PathBuf> {
    match explicit {
        Some(dir) => Ok(dir),
        None => {
            let home_dir = dirs::home_dir()
                .ok_or_else(|| anyhow!("Could not determine home directory"))?;
            Ok(home_dir.join(DEFAULT_DIR_NAME))
        }
    }
}
