//! Record assembly and `.hab` serialization.

use crate::batch::OutputRow;
use crate::error::HabError;

pub const LINE_TERMINATOR: &str = "\r\n";

/// Concatenates the resolved field values in schema order, no separators.
pub fn assemble_line(row: &OutputRow) -> String {
    row.values.concat()
}

/// Joins the assembled lines with CRLF, appends one trailing terminator and
/// encodes the whole content as ISO-8859-1.
pub fn serialize(rows: &[OutputRow]) -> Result<Vec<u8>, HabError> {
    let lines: Vec<String> = rows.iter().map(assemble_line).collect();
    let mut content = lines.join(LINE_TERMINATOR);
    content.push_str(LINE_TERMINATOR);
    encode_latin1(&content)
}

/// Strict ISO-8859-1: scalar values U+0000..=U+00FF map 1:1 to bytes. Any
/// character above that range aborts the run; nothing is substituted or
/// dropped.
pub fn encode_latin1(content: &str) -> Result<Vec<u8>, HabError> {
    let mut bytes = Vec::with_capacity(content.len());
    let mut line = 1usize;
    for ch in content.chars() {
        let cp = ch as u32;
        if cp > 0xFF {
            return Err(HabError::Encoding { ch, line });
        }
        bytes.push(cp as u8);
        if ch == '\n' {
            line += 1;
        }
    }
    Ok(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_latin1_round_trips_high_bytes() {
        let encoded = encode_latin1("año\r\n").unwrap();
        assert_eq!(encoded, vec![b'a', 0xF1, b'o', b'\r', b'\n']);
    }

    #[test]
    fn test_latin1_rejects_out_of_range() {
        let err = encode_latin1("ok\r\nmonto €").unwrap_err();
        match err {
            HabError::Encoding { ch, line } => {
                assert_eq!(ch, '€');
                assert_eq!(line, 2);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_empty_batch_is_one_terminator() {
        assert_eq!(serialize(&[]).unwrap(), b"\r\n");
    }
}
