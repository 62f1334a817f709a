//! Append-only record file.

use crate::error::StoreError;
use crate::record::KeyRecord;
use std::fs::{self, File, OpenOptions};
use std::io::{self, ErrorKind, Read, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Plain-text record file, one `TYPE;value;institution` line per key.
///
/// Every call opens and closes the file. There is no locking, so two
/// processes registering at once can both pass the duplicate check.
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    /// Create a store backed by `path`. Nothing is touched until first use.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Path of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load every record in file order.
    ///
    /// Returns an empty list if the file doesn't exist. Blank lines are
    /// skipped; any other malformed line is an error.
    pub fn load(&self) -> Result<Vec<KeyRecord>, StoreError> {
        let contents = match fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                info!(
                    "Key store not found at {:?}, starting with no records",
                    self.path
                );
                return Ok(Vec::new());
            }
            Err(e) => return Err(e.into()),
        };

        let records = contents
            .lines()
            .enumerate()
            .filter(|(_, line)| !line.trim().is_empty())
            .map(|(index, line)| {
                KeyRecord::from_line(line).map_err(|source| StoreError::Corrupt {
                    line: index + 1,
                    source,
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        debug!("Loaded {} records from {:?}", records.len(), self.path);
        Ok(records)
    }

    /// Append one record, creating the file (and its directory) if needed.
    ///
    /// If the last line of an existing file is unterminated, it is terminated
    /// first so the new record starts on its own line. The write is synced to
    /// disk before returning.
    pub fn append(&self, record: &KeyRecord) -> Result<(), StoreError> {
        record.ensure_encodable()?;

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }

        let mut file = OpenOptions::new()
            .read(true)
            .create(true)
            .append(true)
            .open(&self.path)?;

        let mut line = String::new();
        if ends_without_newline(&mut file)? {
            debug!("Terminating unfinished last line in {:?}", self.path);
            line.push('\n');
        }
        line.push_str(&record.to_line());
        line.push('\n');

        file.write_all(line.as_bytes())?;
        file.sync_data()?;

        debug!("Appended record {} to {:?}", record, self.path);
        Ok(())
    }

    #[cfg(test)]
    fn exists(&self) -> bool {
        self.path.exists()
    }
}

/// True if the file is non-empty and its last byte is not `\n`.
fn ends_without_newline(file: &mut File) -> io::Result<bool> {
    if file.metadata()?.len() == 0 {
        return Ok(false);
    }

    let mut last = [0u8; 1];
    file.seek(SeekFrom::End(-1))?;
    file.read_exact(&mut last)?;
    Ok(last[0] != b'\n')
}
