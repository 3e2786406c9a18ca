mod export;
pub use export::{CSV_HEADER, export_csv};

use crate::{Error, Result};
use crate::record::Student;
use crate::roster::Roster;
use derive_more::Display;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Conventional file name for the persisted roster.
pub const DATA_FILENAME: &str = "students.json";
/// Conventional file name for CSV exports.
pub const CSV_FILENAME: &str = "students.csv";

/// Persistence adapter for a [`Roster`], backed by a UTF-8 JSON file holding
/// an array of record objects.
#[derive(Clone, Debug)]
pub struct JsonStore {
    file_path: PathBuf,
}

/// What [`JsonStore::load`] produced: the roster, plus the corruption report
/// when the on-disk data had to be abandoned.
#[derive(Debug)]
pub struct LoadOutcome {
    pub roster: Roster,
    pub warning: Option<CorruptionWarning>,
}

/// Non-fatal load-time condition: the roster file existed but did not parse
/// into the expected structure. The original file is preserved as a backup
/// and the roster starts empty.
#[derive(Clone, Debug, Display)]
#[display(
    "Roster file at [{}] could not be parsed and was backed up to [{}], caused by: [{reason}]",
    file_path.display(),
    backup_path.display()
)]
pub struct CorruptionWarning {
    pub file_path: PathBuf,
    pub backup_path: PathBuf,
    pub reason: String,
}

/// Escalation for callers that treat a corrupt roster file as fatal rather
/// than recoverable.
impl From<CorruptionWarning> for Error {
    fn from(warning: CorruptionWarning) -> Self {
        return Error::Corrupt {
            file_path: warning.file_path,
            reason: format!("{} (backup at [{}])", warning.reason, warning.backup_path.display()),
        };
    }
}

impl JsonStore {
    /// Creates a store persisting to the given file path.
    pub fn new(file_path: impl Into<PathBuf>) -> Self {
        return Self {
            file_path: file_path.into(),
        };
    }

    /// Creates a store persisting to [`DATA_FILENAME`] inside `dir`.
    pub fn in_dir(dir: impl AsRef<Path>) -> Self {
        return Self::new(dir.as_ref().join(DATA_FILENAME));
    }

    pub fn file_path(&self) -> &Path {
        return &self.file_path;
    }

    /// Loads the roster from disk.
    ///
    /// A missing file is not an error: the roster starts empty with no
    /// warning. A file that exists but does not parse into the expected
    /// record array (or carries duplicate ids) is backed up and reported
    /// through [`LoadOutcome::warning`], and the roster starts empty.
    ///
    /// # Errors
    /// - [`Error::Inaccessible`] when the file exists but cannot be read
    /// - I/O failures while backing up a corrupt file
    pub fn load(&self) -> Result<LoadOutcome> {
        let bytes = match fs::read(&self.file_path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                info!(
                    "No roster file at [{}], starting with an empty roster.",
                    self.file_path.display()
                );
                return Ok(LoadOutcome {
                    roster: Roster::new(),
                    warning: None,
                });
            }
            Err(e) => {
                return Err(Error::Inaccessible {
                    file_path: self.file_path.clone(),
                    reason: e,
                });
            }
        };

        let records: Vec<Student> = match serde_json::from_slice(&bytes) {
            Ok(records) => records,
            Err(e) => return self.recover_from_corrupt(e.to_string()),
        };

        match Roster::from_records(records) {
            Ok(roster) => {
                info!(
                    "Loaded [{}] student(s) from [{}].",
                    roster.len(),
                    self.file_path.display()
                );
                return Ok(LoadOutcome {
                    roster,
                    warning: None,
                });
            }
            Err(e) => return self.recover_from_corrupt(e.to_string()),
        }
    }

    /// Serializes the full collection and atomically replaces the roster
    /// file: the data is written to a temporary file in the same directory
    /// and renamed over the destination, so a crash mid-write never leaves a
    /// half-written file visible.
    ///
    /// # Errors
    /// - I/O
    /// - Serialization failure
    pub fn save(&self, roster: &Roster) -> Result<()> {
        let serialized = serde_json::to_vec_pretty(roster.list_all())
            .map_err(|e| Error::SerializationFailure(Box::new(e)))?;

        if let Some(parent) = self.file_path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(|e| Error::IOCreateDirFailure {
                    path: parent.display().to_string(),
                    reason: e,
                })?;
            }
        }

        // Temp file must live in the target directory for the rename to stay
        // on one filesystem.
        let dir = match self.file_path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };

        let mut temp = tempfile::NamedTempFile::new_in(dir).map_err(|e| Error::IOWriteFailure {
            path: dir.display().to_string(),
            reason: e,
        })?;
        temp.write_all(&serialized).map_err(|e| Error::IOWriteFailure {
            path: temp.path().display().to_string(),
            reason: e,
        })?;
        temp.persist(&self.file_path)
            .map_err(|e| Error::IOPersistFailure {
                path: self.file_path.display().to_string(),
                reason: e.error,
            })?;

        return Ok(());
    }

    /// Writes a CSV snapshot of the roster to the caller-chosen destination.
    /// See [`export_csv`].
    pub fn export_csv(&self, roster: &Roster, path: impl AsRef<Path>) -> Result<()> {
        return export_csv(roster, path);
    }

    fn recover_from_corrupt(&self, reason: String) -> Result<LoadOutcome> {
        warn!(
            "Failed to load roster at [{}], caused by: [{reason}]. Falling back to an empty roster.",
            self.file_path.display()
        );

        let backup_path = self.backup_storage("FAILED_PARSING")?;
        info!("Backup created successfully at [{}]", backup_path.display());

        return Ok(LoadOutcome {
            roster: Roster::new(),
            warning: Some(CorruptionWarning {
                file_path: self.file_path.clone(),
                backup_path,
                reason,
            }),
        });
    }

    /// Copies the roster file to a timestamped `.bak` sibling, returning the
    /// backup path.
    fn backup_storage(&self, reason: &str) -> Result<PathBuf> {
        let file_name = self
            .file_path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();
        let backup_path = self.file_path.with_file_name(format!(
            "{file_name}.{}-{reason}.bak",
            chrono::Local::now().timestamp()
        ));

        fs::copy(&self.file_path, &backup_path).map_err(|e| Error::IOCopyFailure {
            path_from: self.file_path.display().to_string(),
            path_destination: backup_path.display().to_string(),
            reason: e,
        })?;

        return Ok(backup_path);
    }
}
