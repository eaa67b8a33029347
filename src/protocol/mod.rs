//! # ZPL Protocol Implementation
//!
//! Low-level builders for the ZPL II commands the compiler emits. Builders
//! return command text; they never escape field data themselves except
//! where noted.
//!
//! ## Module Structure
//!
//! - [`commands`]: Label framing and field positioning (`^XA`, `^PW`, `^FO`, …)
//! - [`text`]: Field data escaping, orientations and fonts
//! - [`barcode`]: Code 128, Code 39 and QR codes
//! - [`graphics`]: Boxes, ellipses, diagonals and bitmap fields
//! - [`rfid`]: RFID setup, reads and writes, and the addressing scheme
//!
//! ## Usage Example
//!
//! ```
//! use labelzpl::protocol::{commands, graphics, text};
//!
//! let mut lines = vec![commands::start_format().to_string()];
//! lines.push(commands::print_width(464));
//! lines.push(format!(
//!     "{}{}{}",
//!     commands::field_origin(40, 40),
//!     graphics::graphic_box(200, 80, 3, 0),
//!     commands::field_separator()
//! ));
//! lines.push(commands::end_format().to_string());
//!
//! assert_eq!(lines.join("\n"), "^XA\n^PW464\n^FO40,40^GB200,80,3^FS\n^XZ");
//! assert_eq!(text::escape_field_data("^"), "_");
//! ```
//!
//! ## Protocol Reference
//!
//! Based on the Zebra "ZPL II Programming Guide".

pub mod barcode;
pub mod commands;
pub mod graphics;
pub mod rfid;
pub mod text;
