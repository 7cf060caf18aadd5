use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::debug;

use crate::error::JournalError;
use crate::model::journal::{Journal, SCHEMA_VERSION};
use crate::repository::traits::JournalRepository;

const DEFAULT_FILE_NAME: &str = "journal.json";

/// Stores the whole journal as one pretty-printed JSON document.
#[derive(Clone)]
pub struct FileJournalRepository {
    file_path: PathBuf,
}

impl FileJournalRepository {
    pub fn new(data_dir: &Path) -> Result<Self> {
        fs::create_dir_all(data_dir)
            .with_context(|| format!("Could not create data directory {}", data_dir.display()))?;
        let path = data_dir.join(DEFAULT_FILE_NAME);

        let repo = FileJournalRepository { file_path: path };
        if !repo.file_path.exists() {
            debug!(path = %repo.file_path.display(), "initializing empty journal");
            repo.write_journal(&Journal::default())?;
        }

        Ok(repo)
    }

    pub fn file_path(&self) -> &Path {
        &self.file_path
    }

    fn read_journal(&self) -> Result<Journal> {
        let file = File::open(&self.file_path)
            .with_context(|| format!("Could not open {}", self.file_path.display()))?;
        let reader = BufReader::new(file);
        let journal: Journal = serde_json::from_reader(reader)
            .with_context(|| format!("Could not parse {}", self.file_path.display()))?;
        Ok(journal)
    }

    fn write_journal(&self, journal: &Journal) -> Result<()> {
        let file = File::create(&self.file_path)
            .with_context(|| format!("Could not write {}", self.file_path.display()))?;
        let mut writer = BufWriter::new(file);
        serde_json::to_writer_pretty(&mut writer, journal)?;
        writer.flush()?;
        Ok(())
    }
}

impl JournalRepository for FileJournalRepository {
    fn load(&self) -> Result<Journal> {
        let journal = self.read_journal()?;
        if journal.schema_version > SCHEMA_VERSION {
            return Err(JournalError::UnsupportedSchema {
                found: journal.schema_version,
                supported: SCHEMA_VERSION,
            }
            .into());
        }
        debug!(
            places = journal.places.len(),
            routes = journal.routes.len(),
            climbings = journal.climbings.len(),
            "loaded journal"
        );
        Ok(journal)
    }

    fn save(&self, journal: &Journal) -> Result<()> {
        let mut payload = journal.clone();
        payload.schema_version = SCHEMA_VERSION;
        self.write_journal(&payload)?;
        debug!(path = %self.file_path.display(), "saved journal");
        Ok(())
    }
}
