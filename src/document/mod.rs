//! # Label Template Model
//!
//! A single type hierarchy that is both the Rust API and the template JSON
//! format. A [`Template`] is a canvas plus a list of [`DesignElement`]s and
//! compiles to one ZPL document.
//!
//! ```
//! use labelzpl::document::*;
//!
//! // Rust construction
//! let template = Template {
//!     canvas: CanvasConfig::new(58.0, 40.0),
//!     elements: vec![DesignElement::new(
//!         ElementBase::new("t1", 5.0, 5.0, 20.0, 10.0),
//!         ElementKind::Text(TextElement::new("Hello").bound("变量1")),
//!     )],
//! };
//!
//! // JSON deserialization
//! let same = Template::from_json(
//!     r#"{"canvas": {"width": 58, "height": 40},
//!         "elements": [{"id": "t1", "type": "text", "x": 5, "y": 5,
//!                       "width": 20, "height": 10, "content": "Hello",
//!                       "dataField": "变量1"}]}"#,
//! ).unwrap();
//!
//! // Both compile the same way
//! let zpl = template.compile(&CompileOptions::default());
//! assert_eq!(zpl, same.compile(&CompileOptions::default()));
//! assert!(zpl.contains("{{变量1}}"));
//! ```
//!
//! ## Compilation Order
//!
//! Invisible elements are skipped. The rest are compiled in ascending
//! `(zIndex, y, x)` order via [`compare_elements`]; ties keep their input
//! order.
//!
//! ## Document Layout
//!
//! ```text
//! ^XA
//! ^PW{width}
//! ^LL{height}
//! ^LH0,0
//! ^RS8                 only when an element reads an RFID bank
//! …one line per element op…
//! ^XZ
//! ```

pub mod types;

mod barcode;
mod graphics;
mod shapes;
mod text;
pub mod variables;

pub use types::*;
pub use variables::{collect_fillable_variables, variable_display_names};

use crate::error::LabelError;
use crate::ir::{FieldData, Op, Program};
use crate::protocol::rfid::{RfidBinding, RfidScheme};
use crate::protocol::text::Orientation;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::HashMap;

// ============================================================================
// COMPILE OPTIONS
// ============================================================================

/// Compile-time switches.
#[derive(Debug, Clone)]
pub struct CompileOptions {
    /// Emit `{{name}}` placeholders for bound variables (default: true).
    /// When false, literal content or sample values are printed instead.
    pub variable_placeholder: bool,
    /// Pre-rasterized `^GFA` fragments keyed by image element id.
    pub image_cache: HashMap<String, String>,
    /// RFID addressing.
    pub rfid_scheme: RfidScheme,
}

impl Default for CompileOptions {
    fn default() -> Self {
        Self {
            variable_placeholder: true,
            image_cache: HashMap::new(),
            rfid_scheme: RfidScheme::V1,
        }
    }
}

impl CompileOptions {
    /// Options for one-shot printing: literal content, no placeholders.
    pub fn literal() -> Self {
        Self {
            variable_placeholder: false,
            ..Self::default()
        }
    }

    pub fn with_placeholders(mut self, enabled: bool) -> Self {
        self.variable_placeholder = enabled;
        self
    }

    pub fn with_image_cache(mut self, cache: HashMap<String, String>) -> Self {
        self.image_cache = cache;
        self
    }

    pub fn with_rfid_scheme(mut self, scheme: RfidScheme) -> Self {
        self.rfid_scheme = scheme;
        self
    }
}

// ============================================================================
// EMIT CONTEXT
// ============================================================================

/// An element's box in device dots.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Placement {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
    pub orientation: Orientation,
}

/// Data source of a bindable field, plus the RFID read it depends on.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldSource {
    pub data: FieldData,
    pub read: Option<RfidBinding>,
}

/// Context passed to element `emit()` methods, carrying the ops buffer and
/// everything an element needs to know about the target.
pub struct EmitContext<'a> {
    /// The IR ops buffer being built.
    pub ops: Vec<Op>,
    /// Target resolution in dots per inch.
    pub dpi: u32,
    /// Emit placeholders for bound variables.
    pub variable_placeholder: bool,
    /// RFID addressing.
    pub rfid: RfidScheme,
    /// `^GFA` fragments by element id.
    pub image_cache: &'a HashMap<String, String>,
}

impl<'a> EmitContext<'a> {
    /// Create a context for a canvas resolution and compile options.
    pub fn new(dpi: u32, options: &'a CompileOptions) -> Self {
        Self {
            ops: Vec::new(),
            dpi,
            variable_placeholder: options.variable_placeholder,
            rfid: options.rfid_scheme,
            image_cache: &options.image_cache,
        }
    }

    /// Push a single op.
    pub fn push(&mut self, op: Op) {
        self.ops.push(op);
    }

    /// Extend with multiple ops.
    pub fn extend(&mut self, ops: impl IntoIterator<Item = Op>) {
        self.ops.extend(ops);
    }

    /// Convert millimeters to dots.
    pub fn dots(&self, mm: f64) -> i32 {
        crate::printer::mm_to_dots(mm, self.dpi)
    }

    /// Stroke thickness in dots, at least 1.
    pub fn stroke_dots(&self, stroke_width_mm: f64) -> i32 {
        self.dots(stroke_width_mm).max(1)
    }

    /// Convert an element's geometry to dots.
    pub fn place(&self, base: &ElementBase) -> Placement {
        Placement {
            x: self.dots(base.x),
            y: self.dots(base.y),
            width: self.dots(base.width),
            height: self.dots(base.height),
            orientation: base.orientation(),
        }
    }

    /// Resolve where a bindable field gets its data.
    ///
    /// RFID-bound fields print a field number and require a read; bound
    /// variables print a placeholder in placeholder mode; everything else
    /// prints `literal()`.
    pub fn field_source(&self, binding: Binding<'_>, literal: impl FnOnce() -> String) -> FieldSource {
        match binding {
            Binding::Rfid(field) => {
                let binding = *self.rfid.binding(field);
                FieldSource {
                    data: FieldData::FieldNumber(binding.field_number),
                    read: Some(binding),
                }
            }
            Binding::Variable(name) if self.variable_placeholder => FieldSource {
                data: FieldData::Placeholder(name.to_string()),
                read: None,
            },
            _ => FieldSource {
                data: FieldData::Literal(literal()),
                read: None,
            },
        }
    }
}

// ============================================================================
// ORDERING
// ============================================================================

/// Compile order: `zIndex`, then `y`, then `x` (total float ordering).
pub fn compare_elements(a: &DesignElement, b: &DesignElement) -> Ordering {
    a.base
        .z_index
        .cmp(&b.base.z_index)
        .then_with(|| a.base.y.total_cmp(&b.base.y))
        .then_with(|| a.base.x.total_cmp(&b.base.x))
}

/// Visible elements in compile order.
pub fn sorted_elements(elements: &[DesignElement]) -> Vec<&DesignElement> {
    let mut visible: Vec<&DesignElement> = elements.iter().filter(|e| e.base.visible).collect();
    visible.sort_by(|a, b| compare_elements(a, b));
    visible
}

// ============================================================================
// ELEMENT DISPATCH
// ============================================================================

impl DesignElement {
    /// Emit IR ops for this element.
    pub fn emit(&self, ctx: &mut EmitContext) {
        match &self.kind {
            ElementKind::Text(t) => t.emit(self, ctx),
            ElementKind::Variable(v) => v.emit(self, ctx),
            ElementKind::Barcode(b) => b.emit(self, ctx),
            ElementKind::Rectangle(r) => r.emit(&self.base, ctx),
            ElementKind::Ellipse(e) => e.emit(&self.base, ctx),
            ElementKind::Line(l) => l.emit(&self.base, ctx),
            ElementKind::Image(i) => i.emit(&self.base, ctx),
            ElementKind::Unknown { type_name } => {
                tracing::debug!(id = %self.base.id, type_name = %type_name, "unknown element type");
                ctx.push(Op::Comment(format!(
                    "unsupported element {} type {}",
                    self.base.id, type_name
                )));
            }
        }
    }
}

// ============================================================================
// TEMPLATE
// ============================================================================

/// A label template: canvas plus elements.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Template {
    pub canvas: CanvasConfig,
    /// Elements of unknown type are kept and compile to a comment.
    #[serde(default, deserialize_with = "types::deserialize_elements")]
    pub elements: Vec<DesignElement>,
}

impl Template {
    /// Create a template with no elements.
    pub fn new(canvas: CanvasConfig) -> Self {
        Self {
            canvas,
            elements: Vec::new(),
        }
    }

    /// Add an element.
    pub fn push(&mut self, element: DesignElement) {
        self.elements.push(element);
    }

    /// Parse template JSON and check the canvas invariants.
    pub fn from_json(json: &str) -> Result<Self, LabelError> {
        let template: Self = serde_json::from_str(json)?;
        template.canvas.validate()?;
        Ok(template)
    }

    /// Compile to an IR program.
    pub fn compile_program(&self, options: &CompileOptions) -> Program {
        compile_program(&self.canvas, &self.elements, options)
    }

    /// Compile to a ZPL document.
    pub fn compile(&self, options: &CompileOptions) -> String {
        self.compile_program(options).to_zpl()
    }

    /// Fillable variables, in compile order.
    pub fn fillable_variables(&self) -> Vec<String> {
        collect_fillable_variables(&self.elements)
    }

    /// Image elements with a source, in input order.
    pub fn images(&self) -> impl Iterator<Item = (&ElementBase, &ImageElement)> {
        self.elements.iter().filter_map(|e| match &e.kind {
            ElementKind::Image(img) if !img.src.is_empty() => Some((&e.base, img)),
            _ => None,
        })
    }
}

/// Compile elements on a canvas to an IR program.
///
/// Never fails: unknown elements and missing images become comments.
pub fn compile_program(
    canvas: &CanvasConfig,
    elements: &[DesignElement],
    options: &CompileOptions,
) -> Program {
    let sorted = sorted_elements(elements);
    let mut ctx = EmitContext::new(canvas.dpi, options);

    ctx.push(Op::StartFormat);
    ctx.push(Op::PrintWidth(canvas.width_dots()));
    ctx.push(Op::LabelLength(canvas.height_dots()));
    ctx.push(Op::LabelHome { x: 0, y: 0 });

    if sorted
        .iter()
        .any(|e| matches!(e.binding(), Binding::Rfid(_)))
    {
        let tag_type = ctx.rfid.tag_type;
        ctx.push(Op::RfidSetup { tag_type });
    }

    for element in sorted {
        element.emit(&mut ctx);
    }

    ctx.push(Op::EndFormat);
    Program { ops: ctx.ops }
}

/// Compile elements on a canvas to a ZPL document.
pub fn template_to_zpl(
    canvas: &CanvasConfig,
    elements: &[DesignElement],
    options: &CompileOptions,
) -> String {
    compile_program(canvas, elements, options).to_zpl()
}
