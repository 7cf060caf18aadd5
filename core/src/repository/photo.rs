use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::{debug, warn};
use uuid::Uuid;

use crate::repository::traits::PhotoStorage;

const PHOTO_DIR_NAME: &str = "photos";

#[derive(Clone)]
pub struct FilePhotoStorage {
    dir: PathBuf,
}

impl FilePhotoStorage {
    pub fn new(data_dir: &Path) -> Result<Self> {
        let dir = data_dir.join(PHOTO_DIR_NAME);
        fs::create_dir_all(&dir)
            .with_context(|| format!("Could not create photo directory {}", dir.display()))?;
        Ok(Self { dir })
    }
}

impl PhotoStorage for FilePhotoStorage {
    fn save(&self, bytes: &[u8]) -> Result<String> {
        let filename = format!("{}.jpg", Uuid::new_v4());
        let path = self.dir.join(&filename);
        fs::write(&path, bytes).with_context(|| format!("Could not write photo {}", path.display()))?;
        debug!(%filename, size = bytes.len(), "saved photo");
        Ok(filename)
    }

    fn load(&self, filename: &str) -> Result<Vec<u8>> {
        let path = self.path(filename);
        fs::read(&path).with_context(|| format!("Could not read photo {}", path.display()))
    }

    fn path(&self, filename: &str) -> PathBuf {
        self.dir.join(filename)
    }

    fn delete(&self, filenames: &[String]) {
        for filename in filenames {
            match fs::remove_file(self.path(filename)) {
                Ok(()) => debug!(%filename, "deleted photo"),
                Err(e) if e.kind() == ErrorKind::NotFound => {}
                Err(e) => warn!(%filename, error = %e, "could not delete photo"),
            }
        }
    }
}
