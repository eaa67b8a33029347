//! RFID write blocks for batch printing.
//!
//! A write block is a run of `^RFW` lines placed right after `^XA`, so the
//! tag is encoded in the same print cycle as the label.

use crate::protocol::rfid::{self, RfidField, RfidScheme};

/// One value to encode into a tag memory bank.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RfidWrite {
    pub field: RfidField,
    pub value: String,
}

impl RfidWrite {
    pub fn new(field: RfidField, value: impl Into<String>) -> Self {
        Self {
            field,
            value: value.into(),
        }
    }
}

/// Strip all whitespace and uppercase.
pub fn normalize_hex(value: &str) -> String {
    value
        .chars()
        .filter(|c| !c.is_whitespace())
        .flat_map(char::to_uppercase)
        .collect()
}

/// Build a write block with [`RfidScheme::V1`] addressing.
///
/// ```
/// use labelzpl::batch::{RfidWrite, build_rfid_write};
/// use labelzpl::protocol::rfid::RfidField;
///
/// let block = build_rfid_write(&[
///     RfidWrite::new(RfidField::Epc, "3034 257b"),
///     RfidWrite::new(RfidField::UserData, "abc123"),
/// ]);
/// assert_eq!(block, "^RFW,H,1,12^FD3034257B^FS\n^RFW,U,0,2,1^FDABC123^FS");
/// ```
pub fn build_rfid_write(writes: &[RfidWrite]) -> String {
    build_rfid_write_with(&RfidScheme::V1, writes)
}

/// Build a write block with the given addressing.
///
/// Values are normalized with [`normalize_hex`]. Empty or non-hex values
/// and banks without write parameters (TID) are skipped.
pub fn build_rfid_write_with(scheme: &RfidScheme, writes: &[RfidWrite]) -> String {
    let mut lines = Vec::new();
    for w in writes {
        let value = normalize_hex(&w.value);
        if value.is_empty() {
            continue;
        }
        if !value.chars().all(|c| c.is_ascii_hexdigit()) {
            tracing::debug!(field = %w.field, value = %value, "value is not hex, skipping write");
            continue;
        }
        let Some(params) = scheme.binding(w.field).write else {
            tracing::debug!(field = %w.field, "bank is read-only, skipping write");
            continue;
        };
        lines.push(rfid::write(&params, &value));
    }
    lines.join("\n")
}

/// Insert a write block right after the first `^XA`.
///
/// The document is returned unchanged when the block is empty or there is
/// no `^XA`.
pub fn inject_rfid_write(doc: &str, block: &str) -> String {
    if block.is_empty() {
        return doc.to_string();
    }
    let Some(pos) = doc.find("^XA") else {
        return doc.to_string();
    };
    let (head, rest) = doc.split_at(pos + 3);
    format!("{}\n{}\n{}", head, block, rest)
}
