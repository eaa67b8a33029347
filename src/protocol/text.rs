//! # ZPL Text Fields
//!
//! Field data encoding, orientation codes and font selection.
//!
//! ## Field Data
//!
//! Field content goes between `^FD` and `^FS`. The control prefix `^` may
//! never appear inside it, and `\` is the hex escape indicator once `^FH\`
//! is active. [`escape_field_data`] makes arbitrary user text safe:
//!
//! | Input | Output |
//! |-------|--------|
//! | `\` | `\\` |
//! | `^` | `_` |
//!
//! Backslashes are doubled first, then carets are replaced, so the
//! underscore produced for a caret is never touched again. The function is
//! not idempotent: escaping twice doubles backslashes twice.
//!
//! ## Orientation
//!
//! ZPL fields support four orientations only:
//!
//! | Code | Rotation |
//! |------|----------|
//! | `N` | 0° (normal) |
//! | `R` | 90° clockwise |
//! | `I` | 180° (inverted) |
//! | `B` | 270° (read bottom-up) |
//!
//! ## Fonts
//!
//! | Family | Command |
//! |--------|---------|
//! | `ZEBRA 0` (default) | `^A0o,h,w` |
//! | `ZEBRA SimSun` | `^A@o,h,w,SIMSUN.TTF` |
//! | `ZEBRA Swiss Unicode` | `^A@o,h,w,TT0003M_` |

use std::fmt;

/// Field data introducer (^FD).
pub const FIELD_DATA: &str = "^FD";

/// Opens a UTF-8 text field: `^FH\` enables hex escapes, `^CI28` selects
/// UTF-8 encoding.
pub const UTF8_FIELD_PREFIX: &str = "^FH\\^CI28";

/// Closes a UTF-8 text field and restores the default code page (`^CI27`).
pub const UTF8_FIELD_SUFFIX: &str = "^FS^CI27";

/// Escape text for use inside `^FD…^FS`.
///
/// ```
/// use labelzpl::protocol::text::escape_field_data;
///
/// assert_eq!(escape_field_data(r"a\b^c"), r"a\\b_c");
/// ```
pub fn escape_field_data(s: &str) -> String {
    s.replace('\\', "\\\\").replace('^', "_")
}

// ============================================================================
// ORIENTATION
// ============================================================================

/// One of the four field orientations ZPL supports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Orientation {
    /// 0°
    #[default]
    Normal,
    /// 90° clockwise
    Rotated,
    /// 180°
    Inverted,
    /// 270° clockwise
    Bottom,
}

impl Orientation {
    /// Snap an arbitrary rotation in degrees to the nearest quadrant.
    ///
    /// The angle is rounded, normalized into `[0, 360)` and bucketed with
    /// ±45° tolerance around 0/90/180/270. Boundary angles (45, 135, 225,
    /// 315) go to the following quadrant. Half degrees round up (-45.5 is
    /// -45, so `Normal`). Non-finite input maps to `Normal`.
    ///
    /// ```
    /// use labelzpl::protocol::text::Orientation;
    ///
    /// assert_eq!(Orientation::from_degrees(-90.0), Orientation::Bottom);
    /// assert_eq!(Orientation::from_degrees(44.0), Orientation::Normal);
    /// assert_eq!(Orientation::from_degrees(45.0), Orientation::Rotated);
    /// ```
    pub fn from_degrees(deg: f64) -> Self {
        if !deg.is_finite() {
            return Self::Normal;
        }
        // Half-degrees round up, so -45.5 snaps to -45
        let n = (deg + 0.5).floor().rem_euclid(360.0);
        if !(45.0..315.0).contains(&n) {
            Self::Normal
        } else if n < 135.0 {
            Self::Rotated
        } else if n < 225.0 {
            Self::Inverted
        } else {
            Self::Bottom
        }
    }

    /// The single-letter ZPL code.
    pub fn code(self) -> char {
        match self {
            Self::Normal => 'N',
            Self::Rotated => 'R',
            Self::Inverted => 'I',
            Self::Bottom => 'B',
        }
    }

    /// True for 90° and 270°, where width and height trade places.
    pub fn is_quarter_turn(self) -> bool {
        matches!(self, Self::Rotated | Self::Bottom)
    }
}

impl fmt::Display for Orientation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Free-function form of [`Orientation::from_degrees`].
pub fn rotation_to_orientation(deg: f64) -> Orientation {
    Orientation::from_degrees(deg)
}

// ============================================================================
// FONTS
// ============================================================================

/// Device font addressed by a designer font family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FontFace {
    /// Built-in scalable font `0`.
    #[default]
    Builtin,
    /// SimSun TrueType font stored on the printer.
    SimSun,
    /// Zebra Swiss Unicode font.
    SwissUnicode,
}

impl FontFace {
    /// Map a designer font family to a device font.
    ///
    /// Unknown or absent families fall back to the built-in font.
    pub fn from_family(family: Option<&str>) -> Self {
        match family {
            Some("ZEBRA 0") => Self::Builtin,
            Some("ZEBRA SimSun") => Self::SimSun,
            Some("ZEBRA Swiss Unicode") => Self::SwissUnicode,
            _ => Self::Builtin,
        }
    }

    /// Font file name on the printer, for downloaded fonts.
    pub fn file_name(self) -> Option<&'static str> {
        match self {
            Self::Builtin => None,
            Self::SimSun => Some("SIMSUN.TTF"),
            Self::SwissUnicode => Some("TT0003M_"),
        }
    }
}

/// Height in dots for a font size in points: `max(10, round(pt / 72 * dpi))`.
pub fn font_height_dots(points: f64, dpi: u32) -> i32 {
    ((points / 72.0 * dpi as f64).round() as i32).max(10)
}

/// A fully specified `^A` font command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FontSpec {
    pub face: FontFace,
    pub orientation: Orientation,
    pub height: i32,
    pub width: i32,
}

impl FontSpec {
    /// Font for a point size at a resolution. Width is 60% of the height.
    pub fn sized(face: FontFace, orientation: Orientation, points: f64, dpi: u32) -> Self {
        let height = font_height_dots(points, dpi);
        let width = (height as f64 * 0.6).round() as i32;
        Self {
            face,
            orientation,
            height,
            width,
        }
    }
}

impl fmt::Display for FontSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.face.file_name() {
            None => write!(f, "^A0{},{},{}", self.orientation, self.height, self.width),
            Some(file) => write!(
                f,
                "^A@{},{},{},{}",
                self.orientation, self.height, self.width, file
            ),
        }
    }
}
