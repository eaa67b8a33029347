//! # Code Generation
//!
//! Renders IR programs to ZPL text, one line per op.

use super::ops::{FieldData, Op, Program};
use crate::protocol::{barcode, commands, graphics, rfid, text};

impl Program {
    /// Render the program to a ZPL document, lines joined by `\n`.
    pub fn to_zpl(&self) -> String {
        self.to_lines().join("\n")
    }

    /// Render every op to its ZPL line.
    pub fn to_lines(&self) -> Vec<String> {
        self.ops.iter().map(Op::to_zpl).collect()
    }
}

impl Op {
    /// Render this op to a single ZPL line.
    pub fn to_zpl(&self) -> String {
        match self {
            // ===== Label Framing =====
            Op::StartFormat => commands::start_format().to_string(),
            Op::PrintWidth(dots) => commands::print_width(*dots),
            Op::LabelLength(dots) => commands::label_length(*dots),
            Op::LabelHome { x, y } => commands::label_home(*x, *y),
            Op::RfidSetup { tag_type } => rfid::setup(*tag_type),
            Op::EndFormat => commands::end_format().to_string(),

            // ===== Text =====
            Op::Text { x, y, font, data } => {
                let position = commands::field_typeset(*x, *y);
                match data {
                    FieldData::FieldNumber(n) => format!(
                        "{}{}{}{}",
                        position,
                        font,
                        rfid::field_number(*n),
                        commands::field_separator()
                    ),
                    FieldData::Placeholder(name) => format!(
                        "{}{}{}{}{{{{{}}}}}{}",
                        position,
                        font,
                        text::UTF8_FIELD_PREFIX,
                        text::FIELD_DATA,
                        name,
                        text::UTF8_FIELD_SUFFIX
                    ),
                    FieldData::Literal(s) => format!(
                        "{}{}{}{}{}{}",
                        position,
                        font,
                        text::UTF8_FIELD_PREFIX,
                        text::FIELD_DATA,
                        text::escape_field_data(s),
                        text::UTF8_FIELD_SUFFIX
                    ),
                }
            }

            // ===== Barcodes =====
            Op::LinearBarcode {
                x,
                y,
                barcode: code,
                data,
            } => format!(
                "{}{}{}{}",
                commands::field_origin(*x, *y),
                barcode::module_width(),
                code,
                field_payload(data, "")
            ),
            Op::QrCode {
                x,
                y,
                magnification,
                data,
            } => format!(
                "{}{}{}",
                commands::field_origin(*x, *y),
                barcode::qr_code(*magnification),
                field_payload(data, barcode::QR_DATA_PREFIX)
            ),

            // ===== Graphics =====
            Op::Box {
                x,
                y,
                width,
                height,
                thickness,
                rounding,
            } => framed(
                *x,
                *y,
                graphics::graphic_box(*width, *height, *thickness, *rounding),
            ),
            Op::Ellipse {
                x,
                y,
                width,
                height,
                thickness,
            } => framed(*x, *y, graphics::graphic_ellipse(*width, *height, *thickness)),
            Op::Diagonal {
                x,
                y,
                width,
                height,
                thickness,
                lean,
            } => framed(
                *x,
                *y,
                graphics::graphic_diagonal(*width, *height, *thickness, *lean),
            ),
            Op::GraphicField { x, y, fragment } => {
                framed(*x, *y, graphics::graphic_field(fragment))
            }

            // ===== RFID =====
            Op::RfidRead(binding) => rfid::read(binding),
            Op::RfidWrite { params, value } => rfid::write(params, value),

            // ===== Diagnostics =====
            Op::Comment(s) => commands::comment(s),
        }
    }
}

/// `^FO{x},{y}{body}^FS`
fn framed(x: i32, y: i32, body: String) -> String {
    format!(
        "{}{}{}",
        commands::field_origin(x, y),
        body,
        commands::field_separator()
    )
}

/// Barcode data: `^FN{n}^FS`, or `^FD{prefix}{data}^FS`.
fn field_payload(data: &FieldData, prefix: &str) -> String {
    match data {
        FieldData::FieldNumber(n) => {
            format!("{}{}", rfid::field_number(*n), commands::field_separator())
        }
        FieldData::Placeholder(name) => format!(
            "{}{}{{{{{}}}}}{}",
            text::FIELD_DATA,
            prefix,
            name,
            commands::field_separator()
        ),
        FieldData::Literal(s) => format!(
            "{}{}{}{}",
            text::FIELD_DATA,
            prefix,
            text::escape_field_data(s),
            commands::field_separator()
        ),
    }
}
