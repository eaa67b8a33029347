//! # Bitmap Rasterization
//!
//! Converts rendered RGBA pixels into the 1-bit packed bitmap carried by
//! `^GFA` graphic fields.
//!
//! ## Ink Threshold
//!
//! A pixel prints when it is mostly transparent or dark:
//!
//! ```text
//! ink = alpha < 128 || (0.299·R + 0.587·G + 0.114·B) / 255 < 0.5
//! ```
//!
//! Transparent pixels count as ink. Renderers composite onto white first,
//! so this only matters for pixels handed in raw.
//!
//! ## Packing
//!
//! Row-major, 8 dots per byte, MSB = leftmost dot, each row padded with
//! zero bits to a whole byte:
//!
//! ```text
//! bytes_per_row = ceil(width / 8)
//! total_bytes   = bytes_per_row × height
//! ```
//!
//! ## Graphic Field Parameters
//!
//! ```text
//! 0,{total_bytes},{bytes_per_row},{total_bytes},{lowercase hex}
//! ```
//!
//! The leading `0` is the ASCII hex, uncompressed format.

use image::{GrayImage, Luma, Rgba, RgbaImage};
use std::fmt;
use std::fmt::Write as _;

/// True when a pixel prints as a black dot.
#[inline]
pub fn is_ink(pixel: &Rgba<u8>) -> bool {
    let [r, g, b, a] = pixel.0;
    let luminance = (0.299 * r as f64 + 0.587 * g as f64 + 0.114 * b as f64) / 255.0;
    a < 128 || luminance < 0.5
}

/// Pack a row of boolean pixels into bytes, MSB first.
///
/// ```
/// use labelzpl::render::raster::pack_row;
///
/// // 8 pixels pack into 1 byte
/// let row = vec![true, true, true, true, false, false, false, false];
/// assert_eq!(pack_row(&row), vec![0xF0]); // 11110000
///
/// // 12 pixels pack into 2 bytes (4 bits padding)
/// let row = vec![true; 12];
/// assert_eq!(pack_row(&row), vec![0xFF, 0xF0]); // 11111111 11110000
/// ```
pub fn pack_row(pixels: &[bool]) -> Vec<u8> {
    let num_bytes = pixels.len().div_ceil(8);
    let mut bytes = vec![0u8; num_bytes];

    for (i, &pixel) in pixels.iter().enumerate() {
        if pixel {
            let byte_idx = i / 8;
            let bit_idx = 7 - (i % 8); // MSB first
            bytes[byte_idx] |= 1 << bit_idx;
        }
    }

    bytes
}

/// A 1-bit bitmap, packed row by row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bitmap {
    pub width: u32,
    pub height: u32,
    /// `bytes_per_row × height` bytes.
    pub data: Vec<u8>,
}

impl Bitmap {
    /// Threshold and pack RGBA pixels.
    pub fn from_rgba(pixels: &RgbaImage) -> Self {
        let width = pixels.width();
        let height = pixels.height();
        let mut data = Vec::with_capacity(width.div_ceil(8) as usize * height as usize);
        let mut row = Vec::with_capacity(width as usize);

        for y in 0..height {
            row.clear();
            row.extend((0..width).map(|x| is_ink(pixels.get_pixel(x, y))));
            data.extend(pack_row(&row));
        }

        Self {
            width,
            height,
            data,
        }
    }

    /// Bytes per packed row.
    pub fn bytes_per_row(&self) -> usize {
        self.width.div_ceil(8) as usize
    }

    /// Total packed bytes.
    pub fn total_bytes(&self) -> usize {
        self.bytes_per_row() * self.height as usize
    }

    /// Whether the dot at `(x, y)` prints.
    pub fn is_set(&self, x: u32, y: u32) -> bool {
        if x >= self.width || y >= self.height {
            return false;
        }
        let idx = y as usize * self.bytes_per_row() + (x / 8) as usize;
        self.data
            .get(idx)
            .is_some_and(|byte| byte & (0x80 >> (x % 8)) != 0)
    }

    /// Graphic field parameters for this bitmap.
    pub fn to_graphic_field(&self) -> GraphicField {
        let mut hex = String::with_capacity(self.data.len() * 2);
        for byte in &self.data {
            let _ = write!(hex, "{:02x}", byte);
        }
        GraphicField {
            total_bytes: self.total_bytes(),
            bytes_per_row: self.bytes_per_row(),
            hex,
        }
    }

    /// Black-on-white grayscale image of the printed dots, for previews.
    pub fn to_gray_image(&self) -> GrayImage {
        GrayImage::from_fn(self.width, self.height, |x, y| {
            if self.is_set(x, y) {
                Luma([0])
            } else {
                Luma([255])
            }
        })
    }
}

/// `^GFA` parameter list for an uncompressed ASCII hex bitmap.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GraphicField {
    pub total_bytes: usize,
    pub bytes_per_row: usize,
    /// Lowercase hex, two digits per byte, no separators.
    pub hex: String,
}

impl fmt::Display for GraphicField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "0,{},{},{},{}",
            self.total_bytes, self.bytes_per_row, self.total_bytes, self.hex
        )
    }
}

/// Rasterize RGBA pixels straight to graphic field parameters.
pub fn rasterize(pixels: &RgbaImage) -> GraphicField {
    Bitmap::from_rgba(pixels).to_graphic_field()
}
