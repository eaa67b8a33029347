//! # ZPL Barcode Commands
//!
//! ## Supported Symbologies
//!
//! | Symbology | Command | Notes |
//! |-----------|---------|-------|
//! | Code 128 | `^BC` | Default for linear codes, automatic subset mode |
//! | Code 39 | `^B3` | No check digit |
//! | QR Code | `^BQ` | Model 2, error correction Q |
//!
//! ## Module Width (^BY)
//!
//! Linear barcodes are preceded by `^BY2,2`: 2-dot narrow bars and a 2:1
//! wide-to-narrow ratio.
//!
//! ## QR Field Data
//!
//! `^BQ` expects its field data to start with an error correction level and
//! input mode. We always send `QA,` (level Q, automatic mode):
//!
//! ```text
//! ^BQN,2,4,Q^FDQA,https://example.com^FS
//! ```

use super::text::Orientation;
use std::fmt;

/// Minimum bar height in dots for linear barcodes.
pub const MIN_BAR_HEIGHT: i32 = 20;

/// Largest QR magnification factor the printer accepts.
pub const MAX_QR_MAGNIFICATION: i32 = 10;

/// QR field data prefix: error correction Q, automatic input mode.
pub const QR_DATA_PREFIX: &str = "QA,";

/// Barcode symbology selected by the element's `format` string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Symbology {
    Code128,
    Code39,
    Qr,
}

impl Symbology {
    /// Parse a designer format name.
    ///
    /// The name is uppercased with whitespace removed. `QR` and `QRCODE`
    /// select QR; `CODE39` selects Code 39; everything else is Code 128.
    ///
    /// ```
    /// use labelzpl::protocol::barcode::Symbology;
    ///
    /// assert_eq!(Symbology::from_format("qr code"), Symbology::Qr);
    /// assert_eq!(Symbology::from_format("EAN13"), Symbology::Code128);
    /// ```
    pub fn from_format(format: &str) -> Self {
        let normalized: String = format
            .chars()
            .filter(|c| !c.is_whitespace())
            .collect::<String>()
            .to_uppercase();
        match normalized.as_str() {
            "QR" | "QRCODE" => Self::Qr,
            "CODE39" => Self::Code39,
            _ => Self::Code128,
        }
    }

    /// True for two-dimensional symbologies.
    pub fn is_2d(self) -> bool {
        matches!(self, Self::Qr)
    }
}

/// Linear barcode symbology with its bar height, as a `^BC`/`^B3` command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LinearBarcode {
    pub symbology: Symbology,
    pub orientation: Orientation,
    pub height: i32,
}

impl fmt::Display for LinearBarcode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.symbology {
            Symbology::Code39 => write!(f, "^B3{},N,{},Y,N", self.orientation, self.height),
            _ => write!(f, "^BC{},{},Y,N,N,A", self.orientation, self.height),
        }
    }
}

/// # Bar Code Field Default (^BYw,r)
pub fn module_width() -> &'static str {
    "^BY2,2"
}

/// Bar height for a barcode box height: never below [`MIN_BAR_HEIGHT`].
pub fn bar_height(box_height_dots: i32) -> i32 {
    box_height_dots.max(MIN_BAR_HEIGHT)
}

/// QR magnification for a box: `clamp(round(min(w, h) / 20), 1, 10)`.
///
/// ```
/// use labelzpl::protocol::barcode::qr_magnification;
///
/// assert_eq!(qr_magnification(160, 200), 8);
/// assert_eq!(qr_magnification(5, 5), 1);
/// assert_eq!(qr_magnification(800, 800), 10);
/// ```
pub fn qr_magnification(width_dots: i32, height_dots: i32) -> i32 {
    let side = width_dots.min(height_dots) as f64;
    ((side / 20.0).round() as i32).clamp(1, MAX_QR_MAGNIFICATION)
}

/// # QR Code (^BQN,2,m,Q)
///
/// ZPL only accepts normal orientation for `^BQ`.
pub fn qr_code(magnification: i32) -> String {
    format!("^BQN,2,{},Q", magnification)
}
