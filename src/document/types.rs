//! Element types for the label template model.
//!
//! All types derive `Serialize + Deserialize` with camelCase keys, so the
//! same types work for Rust construction and for template JSON:
//!
//! ```json
//! {"id": "t1", "type": "text", "x": 5, "y": 5, "width": 20, "height": 10,
//!  "content": "Hello", "fontSize": 12, "dataField": "变量1"}
//! ```
//!
//! Geometry is in millimeters with a top-left origin; conversion to dots
//! happens at compile time.

use serde::{Deserialize, Serialize};

use crate::error::LabelError;
use crate::printer::{DEFAULT_DPI, mm_to_dots};
use crate::protocol::rfid::RfidField;
use crate::protocol::text::Orientation;

fn default_true() -> bool {
    true
}

fn default_dpi() -> u32 {
    DEFAULT_DPI
}

fn default_font_size() -> f64 {
    12.0
}

fn default_stroke_width() -> f64 {
    1.0
}

fn default_barcode_format() -> String {
    "CODE128".into()
}

// ============================================================================
// CANVAS
// ============================================================================

/// Physical label size and printer resolution.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CanvasConfig {
    /// Label width in millimeters.
    pub width: f64,
    /// Label height in millimeters.
    pub height: f64,
    /// Printer resolution in dots per inch.
    #[serde(default = "default_dpi")]
    pub dpi: u32,
    /// Designer background color. Not printed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub background_color: Option<String>,
}

impl CanvasConfig {
    /// A canvas of `width × height` millimeters at 203 DPI.
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            dpi: DEFAULT_DPI,
            background_color: None,
        }
    }

    /// Same canvas at another resolution.
    pub fn with_dpi(mut self, dpi: u32) -> Self {
        self.dpi = dpi;
        self
    }

    /// Check the canvas invariants: positive, finite size and resolution.
    pub fn validate(&self) -> Result<(), LabelError> {
        if !(self.width.is_finite() && self.width > 0.0) {
            return Err(LabelError::Template(format!(
                "canvas width must be positive, got {}",
                self.width
            )));
        }
        if !(self.height.is_finite() && self.height > 0.0) {
            return Err(LabelError::Template(format!(
                "canvas height must be positive, got {}",
                self.height
            )));
        }
        if self.dpi == 0 {
            return Err(LabelError::Template("canvas dpi must be positive".into()));
        }
        Ok(())
    }

    /// Convert millimeters to dots at this canvas' resolution.
    pub fn dots(&self, mm: f64) -> i32 {
        mm_to_dots(mm, self.dpi)
    }

    /// Label width in dots (`^PW`).
    pub fn width_dots(&self) -> i32 {
        self.dots(self.width)
    }

    /// Label length in dots (`^LL`).
    pub fn height_dots(&self) -> i32 {
        self.dots(self.height)
    }
}

// ============================================================================
// ELEMENTS
// ============================================================================

/// Fields shared by every element.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ElementBase {
    /// Unique within a template. Keys the image cache.
    pub id: String,
    /// Display label in the designer.
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub x: f64,
    #[serde(default)]
    pub y: f64,
    #[serde(default)]
    pub width: f64,
    #[serde(default)]
    pub height: f64,
    /// Degrees, any value. Snapped to the nearest quadrant at compile time.
    #[serde(default)]
    pub rotation: f64,
    #[serde(default)]
    pub z_index: i32,
    #[serde(default = "default_true")]
    pub visible: bool,
}

impl ElementBase {
    /// A visible element at `(x, y)` with size `width × height` (mm).
    pub fn new(id: impl Into<String>, x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            id: id.into(),
            name: String::new(),
            x,
            y,
            width,
            height,
            rotation: 0.0,
            z_index: 0,
            visible: true,
        }
    }

    /// Quadrant orientation of this element.
    pub fn orientation(&self) -> Orientation {
        Orientation::from_degrees(self.rotation)
    }
}

/// Horizontal text alignment in the designer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextAlign {
    #[default]
    Left,
    Center,
    Right,
}

/// Static or bound text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextElement {
    #[serde(default)]
    pub content: String,
    /// Points.
    #[serde(default = "default_font_size")]
    pub font_size: f64,
    #[serde(default)]
    pub font_family: Option<String>,
    #[serde(default)]
    pub color: Option<String>,
    #[serde(default)]
    pub text_align: TextAlign,
    #[serde(default)]
    pub bold: bool,
    #[serde(default)]
    pub italic: bool,
    /// Variable name or RFID bank name. Empty means unbound.
    #[serde(default)]
    pub data_field: Option<String>,
}

impl TextElement {
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            font_size: default_font_size(),
            font_family: None,
            color: None,
            text_align: TextAlign::Left,
            bold: false,
            italic: false,
            data_field: None,
        }
    }

    pub fn bound(mut self, data_field: impl Into<String>) -> Self {
        self.data_field = Some(data_field.into());
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RectangleElement {
    #[serde(default)]
    pub fill: Option<String>,
    #[serde(default)]
    pub stroke: Option<String>,
    /// Millimeters.
    #[serde(default = "default_stroke_width")]
    pub stroke_width: f64,
    /// Millimeters.
    #[serde(default)]
    pub corner_radius: f64,
}

impl Default for RectangleElement {
    fn default() -> Self {
        Self {
            fill: None,
            stroke: None,
            stroke_width: default_stroke_width(),
            corner_radius: 0.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EllipseElement {
    #[serde(default)]
    pub fill: Option<String>,
    #[serde(default)]
    pub stroke: Option<String>,
    #[serde(default = "default_stroke_width")]
    pub stroke_width: f64,
}

impl Default for EllipseElement {
    fn default() -> Self {
        Self {
            fill: None,
            stroke: None,
            stroke_width: default_stroke_width(),
        }
    }
}

/// A line spanning the element's bounding box.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineElement {
    #[serde(default)]
    pub stroke: Option<String>,
    #[serde(default = "default_stroke_width")]
    pub stroke_width: f64,
}

impl Default for LineElement {
    fn default() -> Self {
        Self {
            stroke: None,
            stroke_width: default_stroke_width(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BarcodeElement {
    #[serde(default)]
    pub content: String,
    /// Symbology name: `CODE128` (default), `CODE39`, `QR`.
    #[serde(default = "default_barcode_format")]
    pub format: String,
    #[serde(default)]
    pub data_field: Option<String>,
}

impl BarcodeElement {
    pub fn new(format: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            format: format.into(),
            data_field: None,
        }
    }

    pub fn bound(mut self, data_field: impl Into<String>) -> Self {
        self.data_field = Some(data_field.into());
        self
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageElement {
    /// `data:` URL, `http(s)` URL or local path.
    #[serde(default)]
    pub src: String,
    #[serde(default)]
    pub alt: Option<String>,
}

/// A named variable slot showing `sample_value` when printed without data.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VariableElement {
    #[serde(default)]
    pub data_field: String,
    #[serde(default)]
    pub label: String,
    #[serde(default)]
    pub sample_value: String,
    #[serde(default)]
    pub font_family: Option<String>,
}

/// Element variant, tagged by `"type"`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ElementKind {
    Text(TextElement),
    Rectangle(RectangleElement),
    Ellipse(EllipseElement),
    Line(LineElement),
    Barcode(BarcodeElement),
    Image(ImageElement),
    Variable(VariableElement),
    /// A `"type"` this compiler does not know. Only produced by the element
    /// list deserializer; compiles to a diagnostic comment.
    #[serde(skip)]
    Unknown { type_name: String },
}

impl ElementKind {
    /// Type names handled by the derived deserializer.
    pub const KNOWN_TYPES: &'static [&'static str] = &[
        "text",
        "rectangle",
        "ellipse",
        "line",
        "barcode",
        "image",
        "variable",
    ];

    /// The `"type"` tag.
    pub fn type_name(&self) -> &str {
        match self {
            Self::Text(_) => "text",
            Self::Rectangle(_) => "rectangle",
            Self::Ellipse(_) => "ellipse",
            Self::Line(_) => "line",
            Self::Barcode(_) => "barcode",
            Self::Image(_) => "image",
            Self::Variable(_) => "variable",
            Self::Unknown { type_name } => type_name,
        }
    }
}

/// One placed element: shared geometry plus its variant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DesignElement {
    #[serde(flatten)]
    pub base: ElementBase,
    #[serde(flatten)]
    pub kind: ElementKind,
}

impl DesignElement {
    pub fn new(base: ElementBase, kind: ElementKind) -> Self {
        Self { base, kind }
    }

    /// The bound data field, trimmed, if any. Blank names count as unbound;
    /// only text, variable and barcode elements bind.
    pub fn data_field(&self) -> Option<&str> {
        let field = match &self.kind {
            ElementKind::Text(t) => t.data_field.as_deref(),
            ElementKind::Barcode(b) => b.data_field.as_deref(),
            ElementKind::Variable(v) => Some(v.data_field.as_str()),
            _ => None,
        };
        field.map(str::trim).filter(|f| !f.is_empty())
    }

    /// What the element's data field refers to.
    pub fn binding(&self) -> Binding<'_> {
        match self.data_field() {
            None => Binding::Unbound,
            Some(name) => match RfidField::from_name(name) {
                Some(field) => Binding::Rfid(field),
                None => Binding::Variable(name),
            },
        }
    }
}

/// Resolved meaning of an element's data field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Binding<'a> {
    /// Literal content.
    Unbound,
    /// Printer-side read of an RFID bank.
    Rfid(RfidField),
    /// A fillable variable, substituted per batch row.
    Variable(&'a str),
}

// ============================================================================
// TOLERANT ELEMENT LIST
// ============================================================================

/// Deserialize a `Vec<DesignElement>`, keeping elements of unknown type.
///
/// Each element is first parsed as raw JSON. Known `"type"` values go to the
/// derived deserializer; anything else keeps its base fields and becomes
/// [`ElementKind::Unknown`].
pub(crate) fn deserialize_elements<'de, D>(deserializer: D) -> Result<Vec<DesignElement>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let values: Vec<serde_json::Value> = Vec::deserialize(deserializer)?;
    values
        .into_iter()
        .enumerate()
        .map(|(i, v)| {
            let obj = match v {
                serde_json::Value::Object(map) => map,
                other => {
                    return Err(serde::de::Error::custom(format!(
                        "elements[{}]: expected object, got {}",
                        i, other
                    )));
                }
            };

            let type_name = obj
                .get("type")
                .and_then(|t| t.as_str())
                .unwrap_or_default()
                .to_string();

            if ElementKind::KNOWN_TYPES.contains(&type_name.as_str()) {
                serde_json::from_value(serde_json::Value::Object(obj))
                    .map_err(|e| serde::de::Error::custom(format!("elements[{}]: {}", i, e)))
            } else {
                let base: ElementBase = serde_json::from_value(serde_json::Value::Object(obj))
                    .map_err(|e| serde::de::Error::custom(format!("elements[{}]: {}", i, e)))?;
                Ok(DesignElement {
                    base,
                    kind: ElementKind::Unknown { type_name },
                })
            }
        })
        .collect()
}
