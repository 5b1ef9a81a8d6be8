//! The batch transform: row filtering, field resolution and the CUIL prefix
//! rule, producing the audit table and the encoded payload in one pass.

use rayon::prelude::*;

use crate::encode;
use crate::error::HabError;
use crate::ingest::DepositRow;
use crate::schema::{FieldSpec, CUIL, IMPORTE};

/// One resolved record: a padded string per schema field, in schema order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputRow {
    pub values: Vec<String>,
}

/// Counters for the silent row exclusions and the apoderado split. These are
/// reported to the caller, never raised as failures.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchSummary {
    pub total: usize,
    pub excluded_cuota: usize,
    pub excluded_sin_solicitud: usize,
    pub processed: usize,
    pub with_apoderado: usize,
    pub without_apoderado: usize,
}

/// Result of a run: the encoded payload plus the resolved table for
/// preview/audit.
#[derive(Debug, Clone)]
pub struct BatchResult {
    pub columns: Vec<&'static str>,
    pub rows: Vec<OutputRow>,
    pub payload: Vec<u8>,
    pub summary: BatchSummary,
}

enum RowOutcome {
    Emitted(OutputRow),
    ExcludedCuota,
    ExcludedSinSolicitud,
}

/// Runs the whole transform over a batch. Row transforms are independent and
/// run on the rayon pool; the collect keeps input order.
pub fn run_batch(schema: &[FieldSpec], batch: &[DepositRow]) -> Result<BatchResult, HabError> {
    let outcomes: Vec<RowOutcome> = batch
        .par_iter()
        .enumerate()
        .map(|(i, row)| resolve_row(schema, row, i + 1))
        .collect::<Result<_, _>>()?;

    let mut summary = BatchSummary {
        total: batch.len(),
        ..BatchSummary::default()
    };
    summary.without_apoderado = batch
        .iter()
        .filter(|row| row.cuil_apoderado.is_empty())
        .count();
    summary.with_apoderado = summary.total - summary.without_apoderado;

    let mut rows = Vec::with_capacity(batch.len());
    for outcome in outcomes {
        match outcome {
            RowOutcome::Emitted(row) => rows.push(row),
            RowOutcome::ExcludedCuota => summary.excluded_cuota += 1,
            RowOutcome::ExcludedSinSolicitud => summary.excluded_sin_solicitud += 1,
        }
    }
    summary.processed = rows.len();

    let payload = encode::serialize(&rows)?;
    Ok(BatchResult {
        columns: schema.iter().map(|spec| spec.name).collect(),
        rows,
        payload,
        summary,
    })
}

/// Maps one source row to its outcome: excluded (tagged, not an error) or a
/// fully resolved [`OutputRow`]. `row_no` is 1-based for error reporting.
fn resolve_row(
    schema: &[FieldSpec],
    source: &DepositRow,
    row_no: usize,
) -> Result<RowOutcome, HabError> {
    // Installment "3" marks the row as not eligible for deposit.
    if source.cuota == "3" {
        return Ok(RowOutcome::ExcludedCuota);
    }
    // A request identifier is mandatory; rows lacking it are dropped silently.
    if source.solicitud.trim().is_empty() {
        return Ok(RowOutcome::ExcludedSinSolicitud);
    }

    let mut values = Vec::with_capacity(schema.len());
    for spec in schema {
        let value = match &spec.default {
            Some(default) => zero_pad(default, spec.total_width),
            None if spec.name == CUIL => cuil_with_prefix(source, spec.total_width),
            None => {
                let raw = source
                    .field(spec.name)
                    .ok_or_else(|| HabError::FieldRead {
                        row: row_no,
                        field: spec.name.to_string(),
                    })?;
                if spec.name == IMPORTE {
                    // Append the minor-unit suffix to the raw string; the
                    // value is never parsed as a number.
                    zero_pad(&format!("{raw}00"), spec.total_width)
                } else {
                    zero_pad(raw, spec.total_width)
                }
            }
        };
        values.push(value);
    }
    Ok(RowOutcome::Emitted(OutputRow { values }))
}

/// Derives the identifier field from the original unpadded CUIL plus a
/// one-character prefix: "2" when CUIL_APODERADO is absent, "1" when the
/// deposit is made on behalf of an apoderado.
///
/// A blank CUIL resolves to the empty string, deliberately unpadded: "no
/// identifier available" rather than "identifier is numerically zero". The
/// resulting line is shorter than nominal; the identifier is the last field,
/// so every earlier position stays correct.
fn cuil_with_prefix(source: &DepositRow, width: usize) -> String {
    let prefijo = if source.cuil_apoderado.is_empty() { "2" } else { "1" };
    if source.cuil.trim().is_empty() {
        String::new()
    } else {
        zero_pad(&format!("{prefijo}{}", source.cuil), width)
    }
}

/// Left-pads with `0` up to `width`; longer values pass through unchanged.
fn zero_pad(value: &str, width: usize) -> String {
    format!("{value:0>width$}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_pad() {
        assert_eq!(zero_pad("12", 5), "00012");
        assert_eq!(zero_pad("1500.5000", 18), "0000000001500.5000");
        assert_eq!(zero_pad("", 2), "00");
        assert_eq!(zero_pad("123456", 3), "123456");
    }

    #[test]
    fn test_cuil_prefix_selection() {
        let mut row = DepositRow {
            cuil: "20123456789".into(),
            ..DepositRow::default()
        };
        assert_eq!(cuil_with_prefix(&row, 22), "0000000000220123456789");
        row.cuil_apoderado = "20987654321".into();
        assert_eq!(cuil_with_prefix(&row, 22), "0000000000120123456789");
    }

    #[test]
    fn test_blank_cuil_stays_empty() {
        let row = DepositRow {
            cuil: "   ".into(),
            ..DepositRow::default()
        };
        assert_eq!(cuil_with_prefix(&row, 22), "");
    }
}
