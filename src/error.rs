use derive_more::{Display, Error, From};
use std::path::PathBuf;

use crate::record::StudentId;

pub type Result<T> = core::result::Result<T, Error>;

#[derive(Debug, Error, From, Display)]
pub enum Error {
    // -- Record validation
    #[display("Invalid {field}: [{reason}]")]
    Validation { field: &'static str, reason: String },

    #[display("No student with id [{id}]")]
    NotFound { id: StudentId },

    // -- I/O
    #[display("Directory creation at [{path}] failed, caused by: [{reason}]")]
    IOCreateDirFailure {
        path: String,
        reason: std::io::Error,
    },

    #[display("Copy from [{path_from}] to [{path_destination}] failed, caused by: [{reason}]")]
    IOCopyFailure {
        path_from: String,
        path_destination: String,
        reason: std::io::Error,
    },

    #[display("Write to file at [{path}] failed, caused by: [{reason}]")]
    IOWriteFailure {
        path: String,
        reason: std::io::Error,
    },

    #[display("Atomic replace of [{path}] failed, caused by: [{reason}]")]
    IOPersistFailure {
        path: String,
        reason: std::io::Error,
    },

    // -- Serde
    #[from]
    #[display("Serialization failed, caused by: [{_0}]")]
    SerializationFailure(Box<dyn std::error::Error + Send + Sync>),

    // -- Storage
    #[display("Roster file at [{}] is corrupt, caused by: [{reason}]", file_path.display())]
    Corrupt { file_path: PathBuf, reason: String },

    #[display("Roster file at [{}] is inaccessible, caused by: [{reason}]", file_path.display())]
    Inaccessible {
        file_path: PathBuf,
        reason: std::io::Error,
    },

    #[display("CSV export to [{path}] failed, caused by: [{reason}]")]
    CsvExportFailure {
        path: String,
        reason: Box<dyn std::error::Error + Send + Sync>,
    },
}
