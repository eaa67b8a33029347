//! Emit logic for vector shapes: Rectangle, Ellipse, Line.
//!
//! ## Fill
//!
//! ZPL boxes and ellipses have a border thickness but no fill. A shape with
//! a dark fill (luminance below 0.5) is printed solid by making the border
//! as thick as the shape's smaller side. Light or absent fills print the
//! outline only.
//!
//! ## Lines
//!
//! A line spans its element's bounding box. Near-horizontal and
//! near-vertical lines (under 2 dots across) become thin boxes; anything
//! else is a `^GD` diagonal across the box.

use super::EmitContext;
use super::types::{ElementBase, EllipseElement, LineElement, RectangleElement};
use crate::ir::Op;
use crate::protocol::graphics::{Lean, MAX_CORNER_ROUNDING};

/// Parse a CSS-style color into RGBA.
///
/// Accepts `#rgb`, `#rrggbb`, `#rrggbbaa`, `rgb(r, g, b)`, `rgba(r, g, b, a)`
/// and a few names. Returns `None` for anything else.
fn parse_color(color: &str) -> Option<(u8, u8, u8, u8)> {
    let color = color.trim().to_ascii_lowercase();
    match color.as_str() {
        "black" => return Some((0, 0, 0, 255)),
        "white" => return Some((255, 255, 255, 255)),
        "transparent" | "none" | "" => return Some((0, 0, 0, 0)),
        _ => {}
    }

    if let Some(hex) = color.strip_prefix('#') {
        if !hex.is_ascii() {
            return None;
        }
        let channel = |s: &str| u8::from_str_radix(s, 16).ok();
        return match hex.len() {
            3 => {
                let expand = |i: usize| channel(&hex[i..i + 1]).map(|v| v * 17);
                Some((expand(0)?, expand(1)?, expand(2)?, 255))
            }
            6 => Some((channel(&hex[0..2])?, channel(&hex[2..4])?, channel(&hex[4..6])?, 255)),
            8 => Some((
                channel(&hex[0..2])?,
                channel(&hex[2..4])?,
                channel(&hex[4..6])?,
                channel(&hex[6..8])?,
            )),
            _ => None,
        };
    }

    let inner = color
        .strip_prefix("rgba(")
        .or_else(|| color.strip_prefix("rgb("))?
        .strip_suffix(')')?;
    let parts: Vec<&str> = inner.split(',').map(str::trim).collect();
    let channel = |s: &str| s.parse::<f64>().ok().map(|v| v.clamp(0.0, 255.0).round() as u8);
    match parts.as_slice() {
        [r, g, b] => Some((channel(r)?, channel(g)?, channel(b)?, 255)),
        [r, g, b, a] => {
            let alpha = a.parse::<f64>().ok()?.clamp(0.0, 1.0);
            Some((channel(r)?, channel(g)?, channel(b)?, (alpha * 255.0).round() as u8))
        }
        _ => None,
    }
}

/// True when `fill` is an opaque color dark enough to print as solid ink.
pub fn is_dark_fill(fill: Option<&str>) -> bool {
    let Some((r, g, b, a)) = fill.and_then(parse_color) else {
        return false;
    };
    let luminance = (0.299 * r as f64 + 0.587 * g as f64 + 0.114 * b as f64) / 255.0;
    a >= 128 && luminance < 0.5
}

/// `^GB` corner rounding for a radius: `clamp(round(8 * r / (min(w, h) / 2)), 0, 8)`.
pub fn corner_rounding(radius_dots: i32, width: i32, height: i32) -> i32 {
    let half_side = width.min(height) as f64 / 2.0;
    if radius_dots <= 0 || half_side <= 0.0 {
        return 0;
    }
    ((MAX_CORNER_ROUNDING as f64 * radius_dots as f64 / half_side).round() as i32)
        .clamp(0, MAX_CORNER_ROUNDING)
}

/// Border thickness: the stroke, or the smaller side for a dark fill.
fn border(ctx: &EmitContext, fill: Option<&str>, stroke_width: f64, width: i32, height: i32) -> i32 {
    if is_dark_fill(fill) {
        width.min(height).max(1)
    } else {
        ctx.stroke_dots(stroke_width)
    }
}

impl RectangleElement {
    /// Emit IR ops for this rectangle.
    pub fn emit(&self, base: &ElementBase, ctx: &mut EmitContext) {
        let p = ctx.place(base);
        let thickness = border(ctx, self.fill.as_deref(), self.stroke_width, p.width, p.height);
        let rounding = corner_rounding(ctx.dots(self.corner_radius), p.width, p.height);
        ctx.push(Op::Box {
            x: p.x,
            y: p.y,
            width: p.width,
            height: p.height,
            thickness,
            rounding,
        });
    }
}

impl EllipseElement {
    /// Emit IR ops for this ellipse.
    pub fn emit(&self, base: &ElementBase, ctx: &mut EmitContext) {
        let p = ctx.place(base);
        let thickness = border(ctx, self.fill.as_deref(), self.stroke_width, p.width, p.height);
        ctx.push(Op::Ellipse {
            x: p.x,
            y: p.y,
            width: p.width,
            height: p.height,
            thickness,
        });
    }
}

impl LineElement {
    /// Emit IR ops for this line. Zero-length lines emit nothing.
    pub fn emit(&self, base: &ElementBase, ctx: &mut EmitContext) {
        let p = ctx.place(base);
        let (width, height) = if p.orientation.is_quarter_turn() {
            (p.height.abs(), p.width.abs())
        } else {
            (p.width.abs(), p.height.abs())
        };
        let thickness = ctx.stroke_dots(self.stroke_width);
        // A quarter turn mirrors the slope of the diagonal
        let lean = if p.orientation.is_quarter_turn() {
            Lean::Right
        } else {
            Lean::Left
        };

        let length = (width as f64).hypot(height as f64).round() as i32;
        if length <= 0 {
            return;
        }

        let op = if height < 2 {
            Op::Box {
                x: p.x,
                y: p.y,
                width,
                height: thickness,
                thickness,
                rounding: 0,
            }
        } else if width < 2 {
            Op::Box {
                x: p.x,
                y: p.y,
                width: thickness,
                height,
                thickness,
                rounding: 0,
            }
        } else {
            Op::Diagonal {
                x: p.x,
                y: p.y,
                width,
                height,
                thickness,
                lean,
            }
        };
        ctx.push(op);
    }
}

#[cfg(test)]
mod tests {
    use super::super::CompileOptions;
    use super::*;

    fn lines_for(f: impl FnOnce(&mut EmitContext)) -> Vec<String> {
        let options = CompileOptions::default();
        let mut ctx = EmitContext::new(203, &options);
        f(&mut ctx);
        ctx.ops.iter().map(Op::to_zpl).collect()
    }

    #[test]
    fn test_parse_color() {
        assert_eq!(parse_color("#000"), Some((0, 0, 0, 255)));
        assert_eq!(parse_color("#FFFFFF"), Some((255, 255, 255, 255)));
        assert_eq!(parse_color("#11223380"), Some((0x11, 0x22, 0x33, 0x80)));
        assert_eq!(parse_color("rgb(10, 20, 30)"), Some((10, 20, 30, 255)));
        assert_eq!(parse_color("rgba(0,0,0,0.5)"), Some((0, 0, 0, 128)));
        assert_eq!(parse_color("transparent"), Some((0, 0, 0, 0)));
        assert_eq!(parse_color("#12"), None);
        assert_eq!(parse_color("#中"), None);
        assert_eq!(parse_color("chartreuse"), None);
    }

    #[test]
    fn test_dark_fill() {
        assert!(is_dark_fill(Some("#000000")));
        assert!(is_dark_fill(Some("black")));
        assert!(is_dark_fill(Some("#333")));
        assert!(!is_dark_fill(Some("#ffffff")));
        assert!(!is_dark_fill(Some("transparent")));
        assert!(!is_dark_fill(Some("rgba(0,0,0,0.2)")));
        assert!(!is_dark_fill(None));
    }

    #[test]
    fn test_corner_rounding() {
        assert_eq!(corner_rounding(0, 100, 50), 0);
        assert_eq!(corner_rounding(25, 100, 50), 8);
        assert_eq!(corner_rounding(100, 100, 50), 8);
        assert_eq!(corner_rounding(5, 100, 40), 2);
        assert_eq!(corner_rounding(5, 0, 40), 0);
    }

    #[test]
    fn test_rectangle_outline() {
        let base = ElementBase::new("r", 5.0, 5.0, 20.0, 10.0);
        let lines = lines_for(|ctx| RectangleElement::default().emit(&base, ctx));
        assert_eq!(lines, vec!["^FO40,40^GB160,80,8^FS"]);
    }

    #[test]
    fn test_rectangle_thin_stroke_floor() {
        let base = ElementBase::new("r", 0.0, 0.0, 20.0, 10.0);
        let rect = RectangleElement {
            stroke_width: 0.01,
            ..RectangleElement::default()
        };
        let lines = lines_for(|ctx| rect.emit(&base, ctx));
        assert_eq!(lines, vec!["^FO0,0^GB160,80,1^FS"]);
    }

    #[test]
    fn test_rectangle_filled_rounded() {
        let base = ElementBase::new("r", 0.0, 0.0, 20.0, 10.0);
        let rect = RectangleElement {
            fill: Some("#000".into()),
            corner_radius: 2.5,
            ..RectangleElement::default()
        };
        let lines = lines_for(|ctx| rect.emit(&base, ctx));
        // radius 20 dots over half side 40 dots → 4
        assert_eq!(lines, vec!["^FO0,0^GB160,80,80,B,4^FS"]);
    }

    #[test]
    fn test_ellipse() {
        let base = ElementBase::new("e", 1.0, 2.0, 10.0, 5.0);
        let lines = lines_for(|ctx| EllipseElement::default().emit(&base, ctx));
        assert_eq!(lines, vec!["^FO8,16^GE80,40,8^FS"]);
    }

    #[test]
    fn test_zero_size_line_emits_nothing() {
        let base = ElementBase::new("l", 5.0, 5.0, 0.0, 0.0);
        let lines = lines_for(|ctx| LineElement::default().emit(&base, ctx));
        assert!(lines.is_empty());
    }

    #[test]
    fn test_horizontal_and_vertical_lines() {
        let base = ElementBase::new("l", 0.0, 0.0, 30.0, 0.0);
        let lines = lines_for(|ctx| LineElement::default().emit(&base, ctx));
        assert_eq!(lines, vec!["^FO0,0^GB240,8,8^FS"]);

        let base = ElementBase::new("l", 0.0, 0.0, 0.1, 30.0);
        let lines = lines_for(|ctx| LineElement::default().emit(&base, ctx));
        assert_eq!(lines, vec!["^FO0,0^GB8,240,8^FS"]);
    }

    #[test]
    fn test_rotated_line_swaps_axes() {
        let mut base = ElementBase::new("l", 0.0, 0.0, 30.0, 0.0);
        base.rotation = 90.0;
        let lines = lines_for(|ctx| LineElement::default().emit(&base, ctx));
        assert_eq!(lines, vec!["^FO0,0^GB8,240,8^FS"]);
    }

    #[test]
    fn test_rotated_diagonal_leans_right() {
        let mut base = ElementBase::new("l", 20.0, 5.0, 10.0, 5.0);
        base.rotation = 90.0;
        let lines = lines_for(|ctx| LineElement::default().emit(&base, ctx));
        assert_eq!(lines, vec!["^FO160,40^GD40,80,8,B,R^FS"]);

        base.rotation = 270.0;
        let lines = lines_for(|ctx| LineElement::default().emit(&base, ctx));
        assert_eq!(lines, vec!["^FO160,40^GD40,80,8,B,R^FS"]);

        base.rotation = 180.0;
        let lines = lines_for(|ctx| LineElement::default().emit(&base, ctx));
        assert_eq!(lines, vec!["^FO160,40^GD80,40,8,B,L^FS"]);
    }

    #[test]
    fn test_diagonal_line() {
        let base = ElementBase::new("l", 0.0, 0.0, 30.0, 40.0);
        let line = LineElement {
            stroke_width: 0.25,
            ..LineElement::default()
        };
        let lines = lines_for(|ctx| line.emit(&base, ctx));
        assert_eq!(lines, vec!["^FO0,0^GD240,320,2,B,L^FS"]);
    }
}
