//! # IR Opcodes
//!
//! This module defines the intermediate representation (IR) for label
//! compilation. The IR is a sequence of opcodes that can be inspected,
//! tested, and rendered to ZPL text.
//!
//! ## Design Philosophy
//!
//! The IR sits between the element model and raw ZPL:
//!
//! ```text
//! Elements → IR (inspectable) → Codegen → ZPL lines
//! ```
//!
//! Each opcode renders to exactly one line of the output document. Field
//! data is carried unescaped; codegen applies [`escape_field_data`] to
//! literals only, so placeholders keep their braces intact.
//!
//! [`escape_field_data`]: crate::protocol::text::escape_field_data

use crate::protocol::barcode::LinearBarcode;
use crate::protocol::graphics::Lean;
use crate::protocol::rfid::{RfidBinding, WriteParams};
use crate::protocol::text::FontSpec;

/// Where a field's printed content comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldData {
    /// Fixed text, escaped at codegen.
    Literal(String),
    /// A `{{name}}` placeholder filled later by batch substitution.
    Placeholder(String),
    /// Content read from the RFID tag into this field number.
    FieldNumber(u8),
}

impl FieldData {
    /// True when the printer fills this field from an RFID read.
    pub fn is_rfid(&self) -> bool {
        matches!(self, Self::FieldNumber(_))
    }
}

/// IR opcodes, one per output line.
#[derive(Debug, Clone, PartialEq)]
pub enum Op {
    // ========== Label Framing ==========
    /// `^XA`
    StartFormat,

    /// `^PW{dots}`
    PrintWidth(i32),

    /// `^LL{dots}`
    LabelLength(i32),

    /// `^LH{x},{y}`
    LabelHome { x: i32, y: i32 },

    /// `^RS{tag_type}`, enables RFID reads for the label.
    RfidSetup { tag_type: u8 },

    /// `^XZ`
    EndFormat,

    // ========== Text ==========
    /// Text field positioned at its baseline (`^FT`).
    Text {
        x: i32,
        y: i32,
        font: FontSpec,
        data: FieldData,
    },

    // ========== Barcodes ==========
    /// Code 128 / Code 39 barcode, preceded by `^BY`.
    LinearBarcode {
        x: i32,
        y: i32,
        barcode: LinearBarcode,
        data: FieldData,
    },

    /// QR code (`^BQ`).
    QrCode {
        x: i32,
        y: i32,
        magnification: i32,
        data: FieldData,
    },

    // ========== Graphics ==========
    /// Box or straight line (`^GB`). `rounding` 0 means square corners.
    Box {
        x: i32,
        y: i32,
        width: i32,
        height: i32,
        thickness: i32,
        rounding: i32,
    },

    /// Ellipse (`^GE`).
    Ellipse {
        x: i32,
        y: i32,
        width: i32,
        height: i32,
        thickness: i32,
    },

    /// Diagonal line across a `width × height` box (`^GD`).
    Diagonal {
        x: i32,
        y: i32,
        width: i32,
        height: i32,
        thickness: i32,
        lean: Lean,
    },

    /// Pre-rasterized bitmap (`^GFA`). `fragment` is the parameter list
    /// after `^GFA,`.
    GraphicField { x: i32, y: i32, fragment: String },

    // ========== RFID ==========
    /// Read a tag bank into the binding's field number.
    RfidRead(RfidBinding),

    /// Write a normalized hex value to a tag bank.
    RfidWrite { params: WriteParams, value: String },

    // ========== Diagnostics ==========
    /// Non-printing comment (`^FX`).
    Comment(String),
}

/// A compiled IR program.
#[derive(Debug, Clone, Default)]
pub struct Program {
    pub ops: Vec<Op>,
}

impl Program {
    /// Create an empty program.
    pub fn new() -> Self {
        Self { ops: Vec::new() }
    }

    /// Add an op to the program.
    pub fn push(&mut self, op: Op) {
        self.ops.push(op);
    }

    /// Add multiple ops to the program.
    pub fn extend(&mut self, ops: impl IntoIterator<Item = Op>) {
        self.ops.extend(ops);
    }

    /// Get the number of ops in the program.
    pub fn len(&self) -> usize {
        self.ops.len()
    }

    /// Check if the program is empty.
    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }

    /// Iterate over ops.
    pub fn iter(&self) -> impl Iterator<Item = &Op> {
        self.ops.iter()
    }
}

impl FromIterator<Op> for Program {
    fn from_iter<T: IntoIterator<Item = Op>>(iter: T) -> Self {
        Self {
            ops: iter.into_iter().collect(),
        }
    }
}

impl IntoIterator for Program {
    type Item = Op;
    type IntoIter = std::vec::IntoIter<Op>;

    fn into_iter(self) -> Self::IntoIter {
        self.ops.into_iter()
    }
}

impl<'a> IntoIterator for &'a Program {
    type Item = &'a Op;
    type IntoIter = std::slice::Iter<'a, Op>;

    fn into_iter(self) -> Self::IntoIter {
        self.ops.iter()
    }
}
