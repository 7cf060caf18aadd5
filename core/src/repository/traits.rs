use std::path::PathBuf;

use crate::model::Journal;
use anyhow::Result;

pub trait JournalRepository {
    fn load(&self) -> Result<Journal>;
    fn save(&self, journal: &Journal) -> Result<()>;
}

/// Where climb photos live. Photos are addressed by generated file names.
pub trait PhotoStorage {
    fn save(&self, bytes: &[u8]) -> Result<String>;
    fn load(&self, filename: &str) -> Result<Vec<u8>>;
    fn path(&self, filename: &str) -> PathBuf;
    /// Removes the given files. Missing files are not an error.
    fn delete(&self, filenames: &[String]);
}
