use deposito_hab::error::HabError;
use deposito_hab::ingest::read_batch_from;

const HEADER: &str = "SUCURSAL,CUENTA,IMPORTE,SOLICITUD,CBU,CUOTA,CUIL,CUIL_APODERADO";

#[test]
fn reads_all_cells_as_text() {
    let csv = format!(
        "{HEADER}\n007,000450001,1500.50,000123,0123456789012345678901,01,20123456789,\n"
    );
    let rows = read_batch_from(csv.as_bytes()).expect("batch should parse");
    assert_eq!(rows.len(), 1);
    // Leading zeros are data, not formatting
    assert_eq!(rows[0].sucursal, "007");
    assert_eq!(rows[0].cuenta, "000450001");
    assert_eq!(rows[0].importe, "1500.50");
    assert_eq!(rows[0].cuil_apoderado, "");
}

#[test]
fn missing_columns_are_reported_together() {
    let csv = "SUCURSAL,CUENTA,IMPORTE,CBU,CUOTA,CUIL\n1,2,3,4,5,6\n";
    let err = read_batch_from(csv.as_bytes()).unwrap_err();
    match err {
        HabError::MissingColumns(cols) => {
            assert_eq!(cols, vec!["SOLICITUD", "CUIL_APODERADO"]);
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn extra_columns_are_ignored() {
    let csv = format!(
        "OBSERVACIONES,{HEADER}\nnota,12,450001,1500.50,123,0123456789012345678901,01,20123456789,20987654321\n"
    );
    let rows = read_batch_from(csv.as_bytes()).expect("batch should parse");
    assert_eq!(rows[0].sucursal, "12");
    assert_eq!(rows[0].cuil_apoderado, "20987654321");
}

#[test]
fn short_record_is_a_field_read_failure() {
    let csv = format!("{HEADER}\n12,450001,1500.50\n");
    let err = read_batch_from(csv.as_bytes()).unwrap_err();
    match err {
        HabError::FieldRead { row, field } => {
            assert_eq!(row, 1);
            assert_eq!(field, "SOLICITUD");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn empty_input_is_just_the_header() {
    let csv = format!("{HEADER}\n");
    let rows = read_batch_from(csv.as_bytes()).expect("batch should parse");
    assert!(rows.is_empty());
}
