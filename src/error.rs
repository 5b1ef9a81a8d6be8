use thiserror::Error;

/// Run-fatal failures. Row exclusions (CUOTA = "3", missing SOLICITUD) are
/// not errors; they are counted in [`crate::batch::BatchSummary`].
#[derive(Debug, Error)]
pub enum HabError {
    /// The input header lacks required columns. Raised before any row is
    /// processed and lists every missing column at once.
    #[error("input is missing required columns: {}", .0.join(", "))]
    MissingColumns(Vec<String>),

    /// A non-default field could not be read for a row. `row` is the 1-based
    /// data row number (header excluded).
    #[error("row {row}: field {field} could not be read")]
    FieldRead { row: usize, field: String },

    /// A character in the assembled content falls outside ISO-8859-1. The
    /// whole run aborts; no partial file is emitted.
    #[error("line {line}: character {ch:?} cannot be encoded as ISO-8859-1")]
    Encoding { ch: char, line: usize },

    #[error("failed to read batch: {0}")]
    Csv(#[from] csv::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
