use crate::{Error, Result};
use crate::roster::Roster;
use std::path::Path;
use tracing::info;

/// Column order of the exported CSV, matching the record's field names.
pub const CSV_HEADER: [&str; 4] = ["id", "name", "age", "grade"];

/// Writes the roster to `path` as CSV: one header row, then one row per
/// record in [`Roster::list_all`] order. Embedded delimiters and quotes are
/// escaped per standard CSV quoting rules. An empty roster still gets the
/// header row.
///
/// # Errors
/// - [`Error::CsvExportFailure`] on an unwritable destination or any write
///   failure
pub fn export_csv(roster: &Roster, path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();

    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_path(path)
        .map_err(|e| csv_failure(path, e))?;

    writer
        .write_record(CSV_HEADER)
        .map_err(|e| csv_failure(path, e))?;

    for record in roster.list_all() {
        writer.serialize(record).map_err(|e| csv_failure(path, e))?;
    }

    writer.flush().map_err(|e| csv_failure(path, e))?;

    info!(
        "Exported [{}] student(s) to [{}].",
        roster.len(),
        path.display()
    );
    return Ok(());
}

fn csv_failure(path: &Path, error: impl std::error::Error + Send + Sync + 'static) -> Error {
    return Error::CsvExportFailure {
        path: path.display().to_string(),
        reason: Box::new(error),
    };
}
