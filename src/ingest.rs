//! CSV ingestion of deposit batches.
//!
//! Every cell is kept as an opaque string: no numeric coercion, so leading
//! zeros and decimal quirks survive untouched. The header is validated
//! before any row is read and every missing column is reported in one error.

use std::fs::File;
use std::io;
use std::path::Path;

use csv::ReaderBuilder;
use log::debug;

use crate::error::HabError;

/// Columns a deposit batch must carry. Extra columns are ignored.
pub const REQUIRED_COLUMNS: [&str; 8] = [
    "SUCURSAL",
    "CUENTA",
    "IMPORTE",
    "SOLICITUD",
    "CBU",
    "CUOTA",
    "CUIL",
    "CUIL_APODERADO",
];

/// One source record, all values as raw text. An empty `cuil_apoderado` is
/// the tabular rendition of "absent" and is semantically distinct from an
/// empty `cuil`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DepositRow {
    pub sucursal: String,
    pub cuenta: String,
    pub importe: String,
    pub solicitud: String,
    pub cbu: String,
    pub cuota: String,
    pub cuil: String,
    pub cuil_apoderado: String,
}

impl DepositRow {
    /// Looks up a value by its source column name.
    pub fn field(&self, name: &str) -> Option<&str> {
        match name {
            "SUCURSAL" => Some(&self.sucursal),
            "CUENTA" => Some(&self.cuenta),
            "IMPORTE" => Some(&self.importe),
            "SOLICITUD" => Some(&self.solicitud),
            "CBU" => Some(&self.cbu),
            "CUOTA" => Some(&self.cuota),
            "CUIL" => Some(&self.cuil),
            "CUIL_APODERADO" => Some(&self.cuil_apoderado),
            _ => None,
        }
    }
}

/// Reads a deposit batch from a CSV file.
pub fn read_batch(path: &Path) -> Result<Vec<DepositRow>, HabError> {
    debug!("Reading deposit batch from {}", path.display());
    let file = File::open(path)?;
    read_batch_from(io::BufReader::new(file))
}

/// Reads a deposit batch from any reader. Fails up front with the full list
/// of missing required columns; a short record later is a row-level
/// `FieldRead` failure that aborts the run.
pub fn read_batch_from<R: io::Read>(reader: R) -> Result<Vec<DepositRow>, HabError> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(reader);

    let headers = rdr.headers()?.clone();
    let mut indices = [0usize; REQUIRED_COLUMNS.len()];
    let mut missing = Vec::new();
    for (slot, col) in indices.iter_mut().zip(REQUIRED_COLUMNS) {
        match headers.iter().position(|h| h == col) {
            Some(i) => *slot = i,
            None => missing.push(col.to_string()),
        }
    }
    if !missing.is_empty() {
        return Err(HabError::MissingColumns(missing));
    }

    let mut rows = Vec::new();
    for (i, result) in rdr.records().enumerate() {
        let record = result?;
        let cell = |col: usize| -> Result<String, HabError> {
            record
                .get(indices[col])
                .map(str::to_string)
                .ok_or_else(|| HabError::FieldRead {
                    row: i + 1,
                    field: REQUIRED_COLUMNS[col].to_string(),
                })
        };
        rows.push(DepositRow {
            sucursal: cell(0)?,
            cuenta: cell(1)?,
            importe: cell(2)?,
            solicitud: cell(3)?,
            cbu: cell(4)?,
            cuota: cell(5)?,
            cuil: cell(6)?,
            cuil_apoderado: cell(7)?,
        });
    }
    debug!("Loaded {} records", rows.len());
    Ok(rows)
}
