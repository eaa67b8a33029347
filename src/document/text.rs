//! Emit logic for text fields: Text and Variable.
//!
//! Both print at `^FT{x},{y}` with the element's quadrant orientation in
//! the font command. RFID-bound fields print `^FN{n}` without the UTF-8
//! wrapper, since tag data is raw bytes, and are followed by the read.

use super::types::{DesignElement, TextElement, VariableElement};
use super::{EmitContext, FieldSource, Placement};
use crate::ir::Op;
use crate::protocol::text::{FontFace, FontSpec};

/// Font size for variable elements, in points.
pub const VARIABLE_FONT_SIZE: f64 = 12.0;

/// The printer rejects empty field data.
fn non_empty(s: &str) -> String {
    if s.is_empty() {
        " ".to_string()
    } else {
        s.to_string()
    }
}

fn emit_text_field(ctx: &mut EmitContext, placement: Placement, font: FontSpec, source: FieldSource) {
    ctx.push(Op::Text {
        x: placement.x,
        y: placement.y,
        font,
        data: source.data,
    });
    if let Some(read) = source.read {
        ctx.push(Op::RfidRead(read));
    }
}

impl TextElement {
    /// Emit IR ops for this text element.
    pub fn emit(&self, element: &DesignElement, ctx: &mut EmitContext) {
        let placement = ctx.place(&element.base);
        let font = FontSpec::sized(
            FontFace::from_family(self.font_family.as_deref()),
            placement.orientation,
            self.font_size,
            ctx.dpi,
        );
        let source = ctx.field_source(element.binding(), || non_empty(self.content.trim()));
        emit_text_field(ctx, placement, font, source);
    }
}

impl VariableElement {
    /// Emit IR ops for this variable element. Prints `sample_value` when no
    /// placeholder is emitted.
    pub fn emit(&self, element: &DesignElement, ctx: &mut EmitContext) {
        let placement = ctx.place(&element.base);
        let font = FontSpec::sized(
            FontFace::from_family(self.font_family.as_deref()),
            placement.orientation,
            VARIABLE_FONT_SIZE,
            ctx.dpi,
        );
        let source = ctx.field_source(element.binding(), || non_empty(&self.sample_value));
        emit_text_field(ctx, placement, font, source);
    }
}
