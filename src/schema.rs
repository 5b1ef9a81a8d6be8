//! Declarative layout of the `.hab` deposit record.
//!
//! The layout is a fixed, ordered table of twelve field definitions. Fields
//! with a default are constant across the batch and never read from the
//! source; the rest are resolved from the source row by name. The FECHA
//! default is shaped like any other default but its value is supplied per
//! run by the caller.

/// Output line width when every field is present (sum of all field widths).
pub const NOMINAL_LINE_WIDTH: usize = 103;

pub const IMPORTE: &str = "IMPORTE";
pub const CUIL: &str = "CUIL";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// Zero-padded on the left.
    Numeric,
    /// Alphanumeric. Only the identifier field, which carries its own rule.
    Alphanumeric,
}

/// One output column: position, widths and an optional constant value.
#[derive(Debug, Clone)]
pub struct FieldSpec {
    pub order: usize,
    pub name: &'static str,
    pub integer_width: usize,
    pub decimal_width: usize,
    pub total_width: usize,
    pub kind: FieldKind,
    pub default: Option<String>,
}

impl FieldSpec {
    fn new(
        order: usize,
        name: &'static str,
        integer_width: usize,
        decimal_width: usize,
        total_width: usize,
        kind: FieldKind,
        default: Option<&str>,
    ) -> Self {
        Self {
            order,
            name,
            integer_width,
            decimal_width,
            total_width,
            kind,
            default: default.map(str::to_string),
        }
    }
}

/// The twelve-field deposit layout, ordered by `order`.
///
/// `fecha` is the deposit date in `YYYYMMDD` form and becomes the FECHA
/// default for the whole run.
pub fn deposit_schema(fecha: &str) -> Vec<FieldSpec> {
    use FieldKind::{Alphanumeric, Numeric};
    vec![
        FieldSpec::new(1, "TIPO DE CONVENIO", 3, 0, 3, Numeric, Some("013")),
        FieldSpec::new(2, "SUCURSAL", 5, 0, 5, Numeric, None),
        FieldSpec::new(3, "MONEDA", 2, 0, 2, Numeric, Some("01")),
        FieldSpec::new(4, "SISTEMA", 1, 0, 1, Numeric, Some("3")),
        FieldSpec::new(5, "CUENTA", 9, 0, 9, Numeric, None),
        FieldSpec::new(6, IMPORTE, 18, 2, 18, Numeric, None),
        FieldSpec::new(7, "FECHA", 8, 0, 8, Numeric, Some(fecha)),
        FieldSpec::new(8, "NRO CONVENIO CON LA EMPRESA", 5, 0, 5, Numeric, Some("01465")),
        FieldSpec::new(9, "SOLICITUD", 6, 0, 6, Numeric, None),
        FieldSpec::new(10, "CBU", 22, 0, 22, Numeric, None),
        FieldSpec::new(11, "CUOTA", 2, 0, 2, Numeric, Some("00")),
        FieldSpec::new(12, CUIL, 22, 0, 22, Alphanumeric, None),
    ]
}

/// Sum of the field widths, i.e. the length every assembled line has unless
/// the identifier was emptied by the CUIL rule.
pub fn nominal_width(schema: &[FieldSpec]) -> usize {
    schema.iter().map(|spec| spec.total_width).sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn schema_widths_sum_to_nominal_line_width() {
        let schema = deposit_schema("20260825");
        assert_eq!(nominal_width(&schema), NOMINAL_LINE_WIDTH);
    }

    #[test]
    fn schema_is_ordered() {
        let schema = deposit_schema("20260825");
        for (i, spec) in schema.iter().enumerate() {
            assert_eq!(spec.order, i + 1);
        }
    }
}
