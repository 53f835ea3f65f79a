use std::{
    fs::{self, File},
    io::Write,
    path::{Path, PathBuf},
};

use tracing::debug;

use crate::errors::StorageError;
use crate::loan::LoanBook;

use super::{LoanBookStorage, Result};

const TMP_SUFFIX: &str = "tmp";

/// Stores the whole loan book as one pretty-printed JSON document.
#[derive(Debug, Clone)]
pub struct JsonStorage {
    path: PathBuf,
}

impl JsonStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl LoanBookStorage for JsonStorage {
    fn save(&self, book: &LoanBook) -> Result<()> {
        let json = serde_json::to_string_pretty(book)?;
        let tmp = tmp_path(&self.path);
        write_atomic(&tmp, &json).map_err(|err| StorageError::from_io(err, &self.path))?;
        fs::rename(&tmp, &self.path).map_err(|err| StorageError::from_io(err, &self.path))?;
        debug!(path = %self.path.display(), loans = book.len(), "loan book saved");
        Ok(())
    }

    fn load(&self) -> Result<Option<LoanBook>> {
        if !self.path.exists() {
            return Ok(None);
        }
        let data =
            fs::read_to_string(&self.path).map_err(|err| StorageError::from_read_io(err, &self.path))?;
        let book = serde_json::from_str(&data).map_err(|err| StorageError::Corrupt(err.to_string()))?;
        Ok(Some(book))
    }
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut tmp = path.to_path_buf();
    let ext = match path.extension().and_then(|ext| ext.to_str()) {
        Some(existing) => format!("{}.{}", existing, TMP_SUFFIX),
        None => TMP_SUFFIX.to_string(),
    };
    tmp.set_extension(ext);
    tmp
}

pub(crate) fn write_atomic(path: &Path, data: &str) -> std::io::Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    let mut file = File::create(path)?;
    file.write_all(data.as_bytes())?;
    file.flush()?;
    Ok(())
}
