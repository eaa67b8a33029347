//! Emit logic for barcode elements.

use super::EmitContext;
use super::types::{BarcodeElement, DesignElement};
use crate::ir::Op;
use crate::protocol::barcode::{LinearBarcode, Symbology, bar_height, qr_magnification};

impl BarcodeElement {
    /// Emit IR ops for this barcode element.
    ///
    /// An RFID-bound barcode reads the tag first, then encodes the field
    /// number's contents.
    pub fn emit(&self, element: &DesignElement, ctx: &mut EmitContext) {
        let placement = ctx.place(&element.base);
        let symbology = Symbology::from_format(&self.format);

        let source = ctx.field_source(element.binding(), || {
            let content = self.content.trim();
            if content.is_empty() {
                "0".to_string()
            } else {
                content.to_string()
            }
        });

        if let Some(read) = source.read {
            ctx.push(Op::RfidRead(read));
        }

        if symbology.is_2d() {
            ctx.push(Op::QrCode {
                x: placement.x,
                y: placement.y,
                magnification: qr_magnification(placement.width, placement.height),
                data: source.data,
            });
        } else {
            ctx.push(Op::LinearBarcode {
                x: placement.x,
                y: placement.y,
                barcode: LinearBarcode {
                    symbology,
                    orientation: placement.orientation,
                    height: bar_height(placement.height),
                },
                data: source.data,
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::super::{CompileOptions, ElementBase, ElementKind};
    use super::*;

    fn emit(barcode: BarcodeElement, options: &CompileOptions) -> Vec<String> {
        let element = DesignElement::new(
            ElementBase::new("b", 5.0, 10.0, 20.0, 20.0),
            ElementKind::Barcode(barcode),
        );
        let mut ctx = EmitContext::new(203, options);
        element.emit(&mut ctx);
        ctx.ops.iter().map(Op::to_zpl).collect()
    }

    #[test]
    fn test_qr_literal() {
        let lines = emit(BarcodeElement::new("QR", "ABC"), &CompileOptions::literal());
        // 20mm = 160 dots, 160 / 20 = 8
        assert_eq!(lines, vec!["^FO40,80^BQN,2,8,Q^FDQA,ABC^FS"]);
    }

    #[test]
    fn test_qr_escapes_literal_only() {
        let lines = emit(BarcodeElement::new("qr code", "a^b\\c"), &CompileOptions::default());
        assert_eq!(lines, vec!["^FO40,80^BQN,2,8,Q^FDQA,a_b\\\\c^FS"]);

        let lines = emit(
            BarcodeElement::new("QRCODE", "").bound("url"),
            &CompileOptions::default(),
        );
        assert_eq!(lines, vec!["^FO40,80^BQN,2,8,Q^FDQA,{{url}}^FS"]);
    }

    #[test]
    fn test_code128_default() {
        let lines = emit(BarcodeElement::new("", "12345"), &CompileOptions::default());
        assert_eq!(lines, vec!["^FO40,80^BY2,2^BCN,160,Y,N,N,A^FD12345^FS"]);
    }

    #[test]
    fn test_code39() {
        let lines = emit(BarcodeElement::new("code39", " X1 "), &CompileOptions::default());
        assert_eq!(lines, vec!["^FO40,80^BY2,2^B3N,N,160,Y,N^FDX1^FS"]);
    }

    #[test]
    fn test_empty_content_is_zero() {
        let lines = emit(BarcodeElement::new("CODE128", "  "), &CompileOptions::default());
        assert_eq!(lines, vec!["^FO40,80^BY2,2^BCN,160,Y,N,N,A^FD0^FS"]);
    }

    #[test]
    fn test_placeholder() {
        let lines = emit(
            BarcodeElement::new("CODE128", "").bound("sku"),
            &CompileOptions::default(),
        );
        assert_eq!(lines, vec!["^FO40,80^BY2,2^BCN,160,Y,N,N,A^FD{{sku}}^FS"]);
    }

    #[test]
    fn test_rfid_bound_reads_first() {
        let lines = emit(
            BarcodeElement::new("CODE128", "").bound("TID"),
            &CompileOptions::default(),
        );
        assert_eq!(
            lines,
            vec![
                "^FN1^RFR,H,0,12,2^FS",
                "^FO40,80^BY2,2^BCN,160,Y,N,N,A^FN1^FS"
            ]
        );
    }

    #[test]
    fn test_short_bar_height_floor() {
        let element = DesignElement::new(
            ElementBase::new("b", 0.0, 0.0, 30.0, 1.0),
            ElementKind::Barcode(BarcodeElement::new("CODE128", "1")),
        );
        let options = CompileOptions::default();
        let mut ctx = EmitContext::new(203, &options);
        element.emit(&mut ctx);
        assert_eq!(ctx.ops[0].to_zpl(), "^FO0,0^BY2,2^BCN,20,Y,N,N,A^FD1^FS");
    }

    #[test]
    fn test_rotated_linear() {
        let mut element = DesignElement::new(
            ElementBase::new("b", 0.0, 0.0, 30.0, 10.0),
            ElementKind::Barcode(BarcodeElement::new("CODE128", "1")),
        );
        element.base.rotation = 270.0;
        let options = CompileOptions::default();
        let mut ctx = EmitContext::new(203, &options);
        element.emit(&mut ctx);
        assert_eq!(ctx.ops[0].to_zpl(), "^FO0,0^BY2,2^BCB,80,Y,N,N,A^FD1^FS");
    }
}
