//! # ZPL Graphics Commands
//!
//! | Command | Shape |
//! |---------|-------|
//! | `^GBw,h,t[,c,r]` | Box (a line is a box one stroke thick) |
//! | `^GEw,h,t` | Ellipse |
//! | `^GDw,h,t,c,o` | Diagonal line across a w×h box |
//! | `^GFA,b,c,d,data` | Bitmap field, ASCII hex |
//!
//! ## Boxes
//!
//! A box whose thickness equals its smaller side prints solid. Corner
//! rounding goes from 0 (square) to 8 (fully rounded) and requires the line
//! color parameter, which is always `B` (black) here.
//!
//! ## Bitmap Layout
//!
//! `^GFA` data is 1 bit per dot, MSB = leftmost dot, rows padded to whole
//! bytes. See [`crate::render::raster`] for the packing.

/// Largest `^GB` corner rounding value.
pub const MAX_CORNER_ROUNDING: i32 = 8;

/// Direction a diagonal leans.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lean {
    /// `/` bottom-left to top-right
    Right,
    /// `\` top-left to bottom-right
    Left,
}

impl Lean {
    fn code(self) -> char {
        match self {
            Self::Right => 'R',
            Self::Left => 'L',
        }
    }
}

/// # Graphic Box (^GB)
///
/// ```
/// use labelzpl::protocol::graphics;
///
/// assert_eq!(graphics::graphic_box(100, 50, 2, 0), "^GB100,50,2");
/// assert_eq!(graphics::graphic_box(100, 50, 2, 3), "^GB100,50,2,B,3");
/// ```
pub fn graphic_box(width: i32, height: i32, thickness: i32, rounding: i32) -> String {
    if rounding > 0 {
        format!(
            "^GB{},{},{},B,{}",
            width,
            height,
            thickness,
            rounding.min(MAX_CORNER_ROUNDING)
        )
    } else {
        format!("^GB{},{},{}", width, height, thickness)
    }
}

/// # Graphic Ellipse (^GE)
pub fn graphic_ellipse(width: i32, height: i32, thickness: i32) -> String {
    format!("^GE{},{},{}", width, height, thickness)
}

/// # Graphic Diagonal Line (^GD)
///
/// Draws a line across the diagonal of a `width × height` box; its length is
/// the box's Euclidean diagonal.
pub fn graphic_diagonal(width: i32, height: i32, thickness: i32, lean: Lean) -> String {
    format!("^GD{},{},{},B,{}", width, height, thickness, lean.code())
}

/// # Graphic Field (^GFA)
///
/// `fragment` is the `compression,total,bytes_per_row,total,hex` parameter
/// list produced by the rasterizer.
pub fn graphic_field(fragment: &str) -> String {
    format!("^GFA,{}", fragment)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_box_rounding_clamped() {
        assert_eq!(graphic_box(10, 10, 1, 20), "^GB10,10,1,B,8");
    }

    #[test]
    fn test_ellipse_and_diagonal() {
        assert_eq!(graphic_ellipse(80, 40, 3), "^GE80,40,3");
        assert_eq!(graphic_diagonal(80, 40, 3, Lean::Left), "^GD80,40,3,B,L");
        assert_eq!(graphic_diagonal(8, 4, 1, Lean::Right), "^GD8,4,1,B,R");
    }

    #[test]
    fn test_graphic_field() {
        assert_eq!(graphic_field("0,2,1,2,ff00"), "^GFA,0,2,1,2,ff00");
    }
}
