//! # Batch Printing
//!
//! A compiled document with `{{name}}` placeholders is a print template.
//! This module fills it from tabular rows, one document per row.
//!
//! ```text
//! compile (placeholders on) ──► doc ──┬── row 1 ──► substitute ──► doc₁
//!                                     ├── row 2 ──► substitute ──► doc₂
//!                                     └── …
//! ```
//!
//! Rows are expanded in parallel; output order always matches row order.
//!
//! ## Example
//!
//! ```
//! use labelzpl::batch::*;
//!
//! let doc = "^XA\n^FD{{sku}}^FS\n^XZ";
//! let rows: Vec<Row> = serde_json::from_str(r#"[{"code": "A-1"}, {"code": 42}]"#).unwrap();
//! let map = ColumnMap::from([("code".to_string(), "sku".to_string())]);
//!
//! let docs = batch_from_rows(doc, &rows, &map);
//! assert_eq!(docs, vec!["^XA\n^FDA-1^FS\n^XZ", "^XA\n^FD42^FS\n^XZ"]);
//! ```

mod rfid;

pub use rfid::{
    RfidWrite, build_rfid_write, build_rfid_write_with, inject_rfid_write, normalize_hex,
};

use crate::protocol::rfid::{RfidField, RfidScheme};
use crate::protocol::text::escape_field_data;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::fmt;

// ============================================================================
// ROW DATA
// ============================================================================

/// One cell of row data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CellValue {
    Text(String),
    Number(f64),
    Bool(bool),
    Empty,
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Text(s) => f.write_str(s),
            // f64 Display already prints 3.0 as "3"
            CellValue::Number(n) => write!(f, "{}", n),
            CellValue::Bool(b) => write!(f, "{}", b),
            CellValue::Empty => Ok(()),
        }
    }
}

impl From<&str> for CellValue {
    fn from(s: &str) -> Self {
        CellValue::Text(s.to_string())
    }
}

impl From<String> for CellValue {
    fn from(s: String) -> Self {
        CellValue::Text(s)
    }
}

impl From<f64> for CellValue {
    fn from(n: f64) -> Self {
        CellValue::Number(n)
    }
}

/// A row of data keyed by column name.
pub type Row = HashMap<String, CellValue>;

/// Column name → variable name.
pub type ColumnMap = BTreeMap<String, String>;

/// Every column name that appears in any row.
pub fn row_columns(rows: &[Row]) -> BTreeSet<String> {
    rows.iter().flat_map(|row| row.keys().cloned()).collect()
}

/// Map each column to the variable of the same name, for columns that name
/// a fillable variable.
pub fn auto_column_map<'a>(
    columns: impl IntoIterator<Item = &'a str>,
    fillable: &[String],
) -> ColumnMap {
    columns
        .into_iter()
        .filter(|c| fillable.iter().any(|v| v == c))
        .map(|c| (c.to_string(), c.to_string()))
        .collect()
}

/// Variable values for one row, keyed by trimmed variable name. Mapped
/// columns missing from the row are skipped.
pub fn row_variables(row: &Row, column_map: &ColumnMap) -> HashMap<String, String> {
    column_map
        .iter()
        .filter_map(|(column, variable)| {
            row.get(column)
                .map(|value| (variable.trim().to_string(), value.to_string()))
        })
        .collect()
}

// ============================================================================
// SUBSTITUTION
// ============================================================================

/// Replace every `{{name}}` with the escaped value of `vars[name]`.
///
/// `name` is one or more characters other than `{` and `}`, trimmed before
/// lookup. Unknown names are replaced with nothing.
///
/// ```
/// use labelzpl::batch::substitute_variables;
/// use std::collections::HashMap;
///
/// let vars = HashMap::from([("x".to_string(), "1^2".to_string())]);
/// assert_eq!(substitute_variables("A{{ x }}B", &vars), "A1_2B");
/// assert_eq!(substitute_variables("A{{y}}B", &vars), "AB");
/// ```
pub fn substitute_variables(doc: &str, vars: &HashMap<String, String>) -> String {
    let mut out = String::with_capacity(doc.len());
    let mut rest = doc;

    while let Some(start) = rest.find("{{") {
        out.push_str(&rest[..start]);
        let after = &rest[start + 2..];
        let name_len = after.find(['{', '}']).unwrap_or(after.len());

        if name_len > 0 && after[name_len..].starts_with("}}") {
            let name = after[..name_len].trim();
            if let Some(value) = vars.get(name) {
                out.push_str(&escape_field_data(value));
            }
            rest = &after[name_len + 2..];
        } else {
            // Not a placeholder here; keep one brace and rescan
            out.push('{');
            rest = &rest[start + 1..];
        }
    }

    out.push_str(rest);
    out
}

// ============================================================================
// BATCH EXPANSION
// ============================================================================

/// One filled document per row, in row order.
pub fn batch_from_rows(doc: &str, rows: &[Row], column_map: &ColumnMap) -> Vec<String> {
    tracing::debug!(rows = rows.len(), columns = column_map.len(), "expanding batch");
    rows.par_iter()
        .map(|row| substitute_variables(doc, &row_variables(row, column_map)))
        .collect()
}

/// Columns holding RFID values to encode per row.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RfidWriteColumns {
    pub epc: Option<String>,
    pub user_data: Option<String>,
}

impl RfidWriteColumns {
    /// True when no column is configured.
    pub fn is_empty(&self) -> bool {
        self.epc.is_none() && self.user_data.is_none()
    }

    /// Writes taken from a row, EPC first.
    pub fn writes_for(&self, row: &Row) -> Vec<RfidWrite> {
        [
            (RfidField::Epc, &self.epc),
            (RfidField::UserData, &self.user_data),
        ]
        .into_iter()
        .filter_map(|(field, column)| {
            let value = row.get(column.as_deref()?)?;
            Some(RfidWrite::new(field, value.to_string()))
        })
        .collect()
    }
}

/// Like [`batch_from_rows`], plus a per-row RFID write block after `^XA`.
pub fn batch_with_rfid_writes(
    doc: &str,
    rows: &[Row],
    column_map: &ColumnMap,
    rfid_columns: &RfidWriteColumns,
    scheme: &RfidScheme,
) -> Vec<String> {
    rows.par_iter()
        .map(|row| {
            let filled = substitute_variables(doc, &row_variables(row, column_map));
            let block = build_rfid_write_with(scheme, &rfid_columns.writes_for(row));
            inject_rfid_write(&filled, &block)
        })
        .collect()
}
