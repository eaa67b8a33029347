//! # Golden Tests
//!
//! Whole-document tests: template in, exact ZPL out.
//!
//! ## Test Coverage
//!
//! - **Compile**: header, element ordering, placeholders, literal mode,
//!   RFID reads, diagnostics for unknown elements and missing images.
//! - **Batch**: substitution, row order, RFID write injection.
//! - **Images**: data URL → image cache → `^GFA` in the document.

use labelzpl::batch::{self, ColumnMap, RfidWrite, RfidWriteColumns, Row};
use labelzpl::document::*;
use labelzpl::protocol::rfid::{RfidField, RfidScheme};
use labelzpl::render::{DefaultRenderer, build_image_cache};
use pretty_assertions::assert_eq;
use std::collections::HashMap;

fn lines(doc: &[&str]) -> String {
    doc.join("\n")
}

fn template(json: &str) -> Template {
    Template::from_json(json).expect("template parses")
}

// ============================================================================
// COMPILE
// ============================================================================

#[test]
fn test_placeholder_text_on_58x40() {
    let t = template(
        r#"{
            "canvas": {"width": 58, "height": 40, "dpi": 203},
            "elements": [
                {"id": "t1", "type": "text", "x": 5, "y": 5, "width": 30, "height": 8,
                 "content": "示例", "fontSize": 12, "dataField": "变量1"}
            ]
        }"#,
    );

    assert_eq!(
        t.compile(&CompileOptions::default()),
        lines(&[
            "^XA",
            "^PW464",
            "^LL320",
            "^LH0,0",
            "^FT40,40^A0N,34,20^FH\\^CI28^FD{{变量1}}^FS^CI27",
            "^XZ",
        ])
    );
}

#[test]
fn test_literal_mode_prints_content() {
    let t = template(
        r#"{
            "canvas": {"width": 58, "height": 40},
            "elements": [
                {"id": "t1", "type": "text", "x": 5, "y": 5, "width": 30, "height": 8,
                 "content": "  示例  ", "dataField": "变量1"}
            ]
        }"#,
    );

    let zpl = t.compile(&CompileOptions::literal());
    assert!(zpl.contains("^FD示例^FS^CI27"), "{zpl}");
    assert!(!zpl.contains("{{"), "{zpl}");
}

#[test]
fn test_qr_literal() {
    let t = template(
        r#"{
            "canvas": {"width": 58, "height": 40},
            "elements": [
                {"id": "q", "type": "barcode", "x": 5, "y": 10, "width": 20, "height": 20,
                 "format": "QR", "content": "ABC"}
            ]
        }"#,
    );

    assert_eq!(
        t.compile(&CompileOptions::literal()),
        lines(&[
            "^XA",
            "^PW464",
            "^LL320",
            "^LH0,0",
            "^FO40,80^BQN,2,8,Q^FDQA,ABC^FS",
            "^XZ",
        ])
    );
}

#[test]
fn test_zero_size_line_prints_nothing() {
    let t = template(
        r#"{
            "canvas": {"width": 58, "height": 40},
            "elements": [
                {"id": "l", "type": "line", "x": 5, "y": 5, "width": 0, "height": 0}
            ]
        }"#,
    );

    assert_eq!(
        t.compile(&CompileOptions::default()),
        lines(&["^XA", "^PW464", "^LL320", "^LH0,0", "^XZ"])
    );
}

#[test]
fn test_rfid_read_enables_subsystem() {
    let t = template(
        r#"{
            "canvas": {"width": 58, "height": 40},
            "elements": [
                {"id": "epc", "type": "text", "x": 5, "y": 5, "width": 40, "height": 6,
                 "dataField": "EPC"},
                {"id": "tid", "type": "barcode", "x": 5, "y": 20, "width": 40, "height": 10,
                 "format": "CODE128", "dataField": "TID"}
            ]
        }"#,
    );

    assert_eq!(
        t.compile(&CompileOptions::default()),
        lines(&[
            "^XA",
            "^PW464",
            "^LL320",
            "^LH0,0",
            "^RS8",
            "^FT40,40^A0N,34,20^FN2^FS",
            "^FN2^RFR,H,2,16,1^FS",
            "^FN1^RFR,H,0,12,2^FS",
            "^FO40,160^BY2,2^BCN,80,Y,N,N,A^FN1^FS",
            "^XZ",
        ])
    );
    assert!(t.fillable_variables().is_empty());
}

#[test]
fn test_mixed_label_order_and_diagnostics() {
    let t = template(
        r#"{
            "canvas": {"width": 58, "height": 40},
            "elements": [
                {"id": "frame", "type": "rectangle", "x": 1, "y": 1, "width": 56, "height": 38,
                 "strokeWidth": 0.25, "zIndex": 0},
                {"id": "logo", "type": "image", "x": 40, "y": 2, "width": 10, "height": 10,
                 "src": "https://example.invalid/logo.png", "zIndex": 1},
                {"id": "sku", "type": "barcode", "x": 5, "y": 25, "width": 40, "height": 10,
                 "format": "CODE39", "content": "X-1", "dataField": "sku", "zIndex": 1},
                {"id": "title", "type": "text", "x": 5, "y": 3, "width": 30, "height": 6,
                 "content": "Title", "zIndex": 1},
                {"id": "star", "type": "star", "x": 0, "y": 0, "zIndex": 2},
                {"id": "hidden", "type": "text", "x": 0, "y": 0, "content": "no",
                 "visible": false}
            ]
        }"#,
    );

    assert_eq!(
        t.compile(&CompileOptions::default()),
        lines(&[
            "^XA",
            "^PW464",
            "^LL320",
            "^LH0,0",
            "^FO8,8^GB448,304,2^FS",
            "^FXimage logo failed to load or was not cached^FS",
            "^FT40,24^A0N,34,20^FH\\^CI28^FDTitle^FS^CI27",
            "^FO40,200^BY2,2^B3N,N,80,Y,N^FD{{sku}}^FS",
            "^FXunsupported element star type star^FS",
            "^XZ",
        ])
    );
    assert_eq!(t.fillable_variables(), vec!["sku"]);
}

#[test]
fn test_json_round_trip_compiles_identically() {
    let t = template(
        r#"{
            "canvas": {"width": 100, "height": 50, "dpi": 300},
            "elements": [
                {"id": "v", "type": "variable", "x": 10, "y": 10, "width": 30, "height": 5,
                 "dataField": "lot", "sampleValue": "L-001", "rotation": 90}
            ]
        }"#,
    );
    let json = serde_json::to_string(&t).unwrap();
    let again = template(&json);

    for options in [CompileOptions::default(), CompileOptions::literal()] {
        assert_eq!(t.compile(&options), again.compile(&options));
    }
}

#[test]
fn test_invalid_canvas_rejected() {
    let err = Template::from_json(r#"{"canvas": {"width": 0, "height": 40}}"#);
    assert!(err.is_err());
}

// ============================================================================
// BATCH
// ============================================================================

#[test]
fn test_unknown_variable_becomes_empty() {
    assert_eq!(batch::substitute_variables("A{{x}}B", &HashMap::new()), "AB");
}

#[test]
fn test_batch_from_template() {
    let t = template(
        r#"{
            "canvas": {"width": 58, "height": 40},
            "elements": [
                {"id": "name", "type": "text", "x": 5, "y": 5, "width": 40, "height": 6,
                 "dataField": "名称"},
                {"id": "code", "type": "barcode", "x": 5, "y": 15, "width": 40, "height": 10,
                 "dataField": "sku"}
            ]
        }"#,
    );
    let doc = t.compile(&CompileOptions::default());

    let rows: Vec<Row> = serde_json::from_str(
        r#"[
            {"名称": "苹果", "sku": 1001, "ignored": "x"},
            {"名称": "a^b", "sku": "B\\2"},
            {"sku": 1003}
        ]"#,
    )
    .unwrap();
    let columns = batch::row_columns(&rows);
    let map = batch::auto_column_map(columns.iter().map(String::as_str), &t.fillable_variables());
    let docs = batch::batch_from_rows(&doc, &rows, &map);

    let label = |name: &str, sku: &str| {
        lines(&[
            "^XA",
            "^PW464",
            "^LL320",
            "^LH0,0",
            &format!("^FT40,40^A0N,34,20^FH\\^CI28^FD{}^FS^CI27", name),
            &format!("^FO40,120^BY2,2^BCN,80,Y,N,N,A^FD{}^FS", sku),
            "^XZ",
        ])
    };
    assert_eq!(
        docs,
        vec![
            label("苹果", "1001"),
            label("a_b", "B\\\\2"),
            label("", "1003"),
        ]
    );
}

#[test]
fn test_batch_with_rfid_writes() {
    let doc = lines(&["^XA", "^PW464", "^LL320", "^LH0,0", "^FT40,40^A0N,34,20^FH\\^CI28^FD{{sku}}^FS^CI27", "^XZ"]);
    let rows: Vec<Row> = serde_json::from_str(
        r#"[
            {"sku": "A", "epc": "3034 257b", "user": "abc123"},
            {"sku": "B", "epc": "", "user": ""}
        ]"#,
    )
    .unwrap();
    let map = ColumnMap::from([("sku".to_string(), "sku".to_string())]);
    let columns = RfidWriteColumns {
        epc: Some("epc".into()),
        user_data: Some("user".into()),
    };

    let docs = batch::batch_with_rfid_writes(&doc, &rows, &map, &columns, &RfidScheme::V1);
    assert_eq!(docs.len(), 2);
    assert_eq!(
        docs[0],
        lines(&[
            "^XA",
            "^RFW,H,1,12^FD3034257B^FS",
            "^RFW,U,0,2,1^FDABC123^FS",
            "",
            "^PW464",
            "^LL320",
            "^LH0,0",
            "^FT40,40^A0N,34,20^FH\\^CI28^FDA^FS^CI27",
            "^XZ",
        ])
    );
    assert!(!docs[1].contains("^RFW"));
}

#[test]
fn test_rfid_write_lengths() {
    assert_eq!(
        batch::build_rfid_write(&[
            RfidWrite::new(RfidField::Tid, "FFFF"),
            RfidWrite::new(RfidField::Epc, "e2003412"),
            RfidWrite::new(RfidField::UserData, "abc123"),
        ]),
        "^RFW,H,1,12^FDE2003412^FS\n^RFW,U,0,2,1^FDABC123^FS"
    );
}

// ============================================================================
// IMAGES
// ============================================================================

#[tokio::test]
async fn test_image_cache_feeds_compile() {
    use base64::Engine;
    use image::{DynamicImage, Rgba, RgbaImage};
    use std::io::Cursor;

    let mut png = Vec::new();
    DynamicImage::ImageRgba8(RgbaImage::from_pixel(8, 8, Rgba([0, 0, 0, 255])))
        .write_to(&mut Cursor::new(&mut png), image::ImageFormat::Png)
        .unwrap();
    let src = format!(
        "data:image/png;base64,{}",
        base64::engine::general_purpose::STANDARD.encode(&png)
    );

    let mut t = Template::new(CanvasConfig::new(58.0, 40.0));
    t.push(DesignElement::new(
        ElementBase::new("dot", 5.0, 5.0, 1.0, 0.25),
        ElementKind::Image(ImageElement {
            src,
            alt: None,
        }),
    ));

    let renderer = DefaultRenderer::new().unwrap();
    let cache = build_image_cache(&t.elements, &t.canvas, &renderer).await;
    let zpl = t.compile(&CompileOptions::default().with_image_cache(cache));

    assert_eq!(
        zpl,
        lines(&[
            "^XA",
            "^PW464",
            "^LL320",
            "^LH0,0",
            "^FO40,40^GFA,0,2,1,2,ffff^FS",
            "^XZ",
        ])
    );
}
