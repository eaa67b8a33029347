//! # Rendering Module
//!
//! Turns image elements into 1-bit graphic fields.
//!
//! ## Modules
//!
//! - [`raster`]: threshold RGBA pixels and pack them into `^GFA` hex
//! - [`resolve`]: async loading of image sources and the image cache pre-pass
//!
//! ## Usage Example
//!
//! ```
//! use image::{Rgba, RgbaImage};
//! use labelzpl::render::raster;
//!
//! // An 8×1 strip with the first half black
//! let mut pixels = RgbaImage::from_pixel(8, 1, Rgba([255, 255, 255, 255]));
//! for x in 0..4 {
//!     pixels.put_pixel(x, 0, Rgba([0, 0, 0, 255]));
//! }
//!
//! assert_eq!(raster::rasterize(&pixels).to_string(), "0,1,1,1,f0");
//! ```

pub mod raster;
pub mod resolve;

pub use raster::{Bitmap, GraphicField, rasterize};
pub use resolve::{DefaultRenderer, ImageRenderer, build_image_cache, rasterize_images};
