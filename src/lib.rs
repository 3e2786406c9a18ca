#![doc = include_str!("../README.md")]

pub mod error;
pub mod record;
pub mod roster;
pub mod storage;

pub use error::{Error, Result};
pub(crate) use serde::{Deserialize, Serialize};

pub mod prelude {
    pub use crate::error::Error;
    pub use crate::record::{NewStudent, Student, StudentId, StudentPatch};
    pub use crate::roster::Roster;
    pub use crate::storage::{
        CSV_FILENAME, CorruptionWarning, DATA_FILENAME, JsonStore, LoadOutcome, export_csv,
    };
}
