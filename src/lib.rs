//! # labelzpl - Label Templates to ZPL
//!
//! labelzpl compiles label designs (text, barcodes, QR codes, shapes, images
//! and RFID fields on a millimetre canvas) into ZPL II documents for Zebra
//! printers. It provides:
//!
//! - **Template model**: serde types for canvases and elements
//! - **Compiler**: elements → IR ops → one ZPL document
//! - **Placeholders**: bound fields compile to `{{name}}` for later filling
//! - **RFID**: reads into printed fields and per-label tag writes
//! - **Batch**: fill a compiled document from tabular rows
//! - **Transport**: raw TCP delivery
//!
//! ## Quick Start
//!
//! ```
//! use labelzpl::document::*;
//! use labelzpl::batch;
//! use std::collections::HashMap;
//!
//! let mut template = Template::new(CanvasConfig::new(58.0, 40.0));
//! template.push(DesignElement::new(
//!     ElementBase::new("name", 5.0, 5.0, 40.0, 8.0),
//!     ElementKind::Text(TextElement::new("Sample").bound("product")),
//! ));
//!
//! // Compile once with placeholders
//! let doc = template.compile(&CompileOptions::default());
//! assert!(doc.starts_with("^XA\n^PW464\n^LL320\n^LH0,0\n"));
//!
//! // Fill per label
//! let vars = HashMap::from([("product".to_string(), "Tea".to_string())]);
//! let label = batch::substitute_variables(&doc, &vars);
//! assert!(label.contains("^FDTea^FS"));
//! ```
//!
//! ## Module Overview
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`document`] | Template model, element compilation, variable queries |
//! | [`ir`] | Intermediate ops and ZPL code generation |
//! | [`protocol`] | ZPL command builders |
//! | [`render`] | Image loading and bitmap rasterization |
//! | [`batch`] | Placeholder substitution, batch expansion, RFID writes |
//! | [`transport`] | Delivery backends |
//! | [`printer`] | Printer presets and unit conversion |
//! | [`error`] | Error types |

pub mod batch;
pub mod document;
pub mod error;
pub mod ir;
pub mod printer;
pub mod protocol;
pub mod render;
pub mod transport;

// Re-exports for convenience
pub use document::{CompileOptions, Template};
pub use error::LabelError;
pub use printer::PrinterConfig;
pub use transport::{LabelSink, TcpSink};
