//! # ZPL Format Commands
//!
//! Label framing and field positioning commands.
//!
//! ## Command Structure
//!
//! ZPL commands are text. Each starts with a control prefix (`^` for
//! format commands, `~` for immediate control commands) followed by a
//! two-character mnemonic and comma-separated parameters:
//!
//! ```text
//! ^FO50,100      field origin at x=50, y=100 dots
//! ^GB200,80,3    graphic box 200×80, border 3 dots
//! ```
//!
//! A label format is bracketed by `^XA` … `^XZ`. Fields are positioned with
//! `^FO` (top-left origin) or `^FT` (baseline origin) and terminated by
//! `^FS`.
//!
//! ## Coordinate System
//!
//! ```text
//! (0,0) ──────────────────────► X (dots, up to ^PW)
//!   │
//!   │   ┌───────┐  ← ^FO places the top-left corner
//!   │   │ field │
//!   │   └───────┘
//!   ▼
//!   Y (dots, up to ^LL, paper feed direction)
//! ```
//!
//! ## Reference
//!
//! Zebra "ZPL II Programming Guide", format command chapter.

/// Format command prefix.
pub const CARET: char = '^';

/// Immediate control command prefix.
pub const TILDE: char = '~';

// ============================================================================
// LABEL FRAMING
// ============================================================================

/// # Start Format (^XA)
///
/// Opens a label format. Everything up to the matching `^XZ` describes one
/// label.
///
/// ```
/// use labelzpl::protocol::commands;
///
/// assert_eq!(commands::start_format(), "^XA");
/// ```
pub fn start_format() -> &'static str {
    "^XA"
}

/// # End Format (^XZ)
///
/// Closes the label format and triggers printing.
pub fn end_format() -> &'static str {
    "^XZ"
}

/// # Print Width (^PWa)
///
/// Sets the printable width of the label in dots.
pub fn print_width(dots: i32) -> String {
    format!("^PW{}", dots)
}

/// # Label Length (^LLy)
///
/// Sets the length of the label in dots (continuous media).
pub fn label_length(dots: i32) -> String {
    format!("^LL{}", dots)
}

/// # Label Home (^LHx,y)
///
/// Shifts the origin of every following field by (x, y) dots.
pub fn label_home(x: i32, y: i32) -> String {
    format!("^LH{},{}", x, y)
}

// ============================================================================
// FIELD POSITIONING
// ============================================================================

/// # Field Origin (^FOx,y)
///
/// Positions the upper-left corner of the next field.
///
/// ```
/// use labelzpl::protocol::commands;
///
/// assert_eq!(commands::field_origin(40, 80), "^FO40,80");
/// ```
pub fn field_origin(x: i32, y: i32) -> String {
    format!("^FO{},{}", x, y)
}

/// # Field Typeset (^FTx,y)
///
/// Positions the next field relative to its text baseline.
pub fn field_typeset(x: i32, y: i32) -> String {
    format!("^FT{},{}", x, y)
}

/// # Field Separator (^FS)
///
/// Ends a field definition.
pub fn field_separator() -> &'static str {
    "^FS"
}

/// # Comment (^FX)
///
/// Non-printing comment. The comment text ends at the next control prefix,
/// so any caret in `text` is replaced the same way field data is. Line
/// breaks become spaces so the comment stays on one line.
///
/// ```
/// use labelzpl::protocol::commands;
///
/// assert_eq!(commands::comment("image a^b missing"), "^FXimage a_b missing^FS");
/// ```
pub fn comment(text: &str) -> String {
    let cleaned = super::text::escape_field_data(text)
        .replace(TILDE, "-")
        .replace(['\r', '\n'], " ");
    format!("^FX{}^FS", cleaned)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_framing() {
        assert_eq!(start_format(), "^XA");
        assert_eq!(end_format(), "^XZ");
        assert_eq!(print_width(464), "^PW464");
        assert_eq!(label_length(320), "^LL320");
        assert_eq!(label_home(0, 0), "^LH0,0");
    }

    #[test]
    fn test_positioning() {
        assert_eq!(field_origin(1, 2), "^FO1,2");
        assert_eq!(field_typeset(3, 4), "^FT3,4");
        assert_eq!(field_separator(), "^FS");
    }

    #[test]
    fn test_comment_strips_prefixes() {
        let c = comment("a^b~c");
        assert_eq!(c, "^FXa_b-c^FS");
        assert_eq!(c.matches('^').count(), 2);
        assert_eq!(comment("a\nb"), "^FXa b^FS");
    }
}
