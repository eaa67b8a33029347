//! Image resolution: loads image sources and rasterizes them ahead of
//! compilation.
//!
//! Compilation is synchronous and never touches the network, so images go
//! through an async pre-pass that produces a cache of `^GFA` fragments
//! keyed by element id. [`Template::compile`] then only looks them up.
//!
//! ```text
//! image elements ──► ImageRenderer ──► rotate ──► Bitmap ──► cache[id]
//!                    (src → pixels)
//! ```
//!
//! A failed image is logged and left out of the cache; the compiler prints
//! a comment in its place.
//!
//! [`Template::compile`]: crate::document::Template::compile

use std::collections::HashMap;

use async_trait::async_trait;
use base64::Engine;
use image::{DynamicImage, Rgba, RgbaImage, imageops, imageops::FilterType};

use super::raster::Bitmap;
use crate::document::{CanvasConfig, DesignElement, ElementKind};
use crate::error::LabelError;
use crate::protocol::text::Orientation;

/// Renders an image source to pixels of an exact size.
#[async_trait]
pub trait ImageRenderer: Send + Sync {
    /// Render `src` into a `width × height` RGBA buffer.
    async fn render(&self, src: &str, width: u32, height: u32) -> Result<RgbaImage, LabelError>;
}

/// Loads `data:` URLs, `http(s)` URLs and local files, scales the image to
/// the target box and composites it onto white.
pub struct DefaultRenderer {
    http_client: reqwest::Client,
}

impl DefaultRenderer {
    /// Create a renderer with its own HTTP client.
    pub fn new() -> Result<Self, LabelError> {
        let http_client = reqwest::Client::builder()
            .user_agent("labelzpl/0.1")
            .build()
            .map_err(|e| LabelError::Image(format!("HTTP client error: {}", e)))?;
        Ok(Self { http_client })
    }

    /// Create a renderer sharing an existing HTTP client.
    pub fn with_client(http_client: reqwest::Client) -> Self {
        Self { http_client }
    }

    async fn load_bytes(&self, src: &str) -> Result<Vec<u8>, LabelError> {
        if src.starts_with("data:") {
            decode_data_url(src)
        } else if src.starts_with("http://") || src.starts_with("https://") {
            self.download(src).await
        } else {
            tokio::fs::read(src)
                .await
                .map_err(|e| LabelError::Image(format!("Failed to read {}: {}", src, e)))
        }
    }

    async fn download(&self, url: &str) -> Result<Vec<u8>, LabelError> {
        let response = self
            .http_client
            .get(url)
            .send()
            .await
            .map_err(|e| LabelError::Image(format!("Failed to download {}: {}", url, e)))?;
        if !response.status().is_success() {
            return Err(LabelError::Image(format!(
                "Failed to download {}: HTTP {}",
                url,
                response.status()
            )));
        }
        let bytes = response
            .bytes()
            .await
            .map_err(|e| LabelError::Image(format!("Failed to read image data: {}", e)))?;
        Ok(bytes.to_vec())
    }
}

#[async_trait]
impl ImageRenderer for DefaultRenderer {
    async fn render(&self, src: &str, width: u32, height: u32) -> Result<RgbaImage, LabelError> {
        let bytes = self.load_bytes(src).await?;
        let image = image::load_from_memory(&bytes)
            .map_err(|e| LabelError::Image(format!("Failed to decode image: {}", e)))?;
        Ok(fit_onto_white(&image, width, height))
    }
}

/// Decode the payload of a `data:` URL.
///
/// `data:image/png;base64,…` is base64-decoded; a payload without the
/// `;base64` marker is taken as raw bytes.
pub fn decode_data_url(src: &str) -> Result<Vec<u8>, LabelError> {
    let (header, payload) = src
        .split_once(',')
        .ok_or_else(|| LabelError::Image("Invalid data URL format".into()))?;
    if header.ends_with(";base64") {
        base64::engine::general_purpose::STANDARD
            .decode(payload.trim())
            .map_err(|e| LabelError::Image(format!("Base64 decode error: {}", e)))
    } else {
        Ok(payload.as_bytes().to_vec())
    }
}

/// Scale an image to exactly `width × height` (at least 1×1) over a white
/// background.
pub fn fit_onto_white(image: &DynamicImage, width: u32, height: u32) -> RgbaImage {
    let width = width.max(1);
    let height = height.max(1);
    let scaled = image
        .resize_exact(width, height, FilterType::Triangle)
        .to_rgba8();
    let mut canvas = RgbaImage::from_pixel(width, height, Rgba([255, 255, 255, 255]));
    imageops::overlay(&mut canvas, &scaled, 0, 0);
    canvas
}

/// Rotate pixels clockwise into the field orientation.
pub fn orient(pixels: RgbaImage, orientation: Orientation) -> RgbaImage {
    match orientation {
        Orientation::Normal => pixels,
        Orientation::Rotated => imageops::rotate90(&pixels),
        Orientation::Inverted => imageops::rotate180(&pixels),
        Orientation::Bottom => imageops::rotate270(&pixels),
    }
}

/// Render and rasterize every image element with a source.
///
/// Images are processed one after another. Each failure is logged and
/// skipped; the result holds only the images that rendered.
pub async fn rasterize_images(
    elements: &[DesignElement],
    canvas: &CanvasConfig,
    renderer: &dyn ImageRenderer,
) -> HashMap<String, Bitmap> {
    let mut bitmaps = HashMap::new();

    for element in elements {
        let ElementKind::Image(image) = &element.kind else {
            continue;
        };
        if image.src.is_empty() {
            continue;
        }

        let base = &element.base;
        let width = canvas.dots(base.width).max(1) as u32;
        let height = canvas.dots(base.height).max(1) as u32;

        match renderer.render(&image.src, width, height).await {
            Ok(pixels) => {
                let bitmap = Bitmap::from_rgba(&orient(pixels, base.orientation()));
                tracing::debug!(
                    id = %base.id,
                    width = bitmap.width,
                    height = bitmap.height,
                    "rasterized image"
                );
                bitmaps.insert(base.id.clone(), bitmap);
            }
            Err(e) => {
                tracing::warn!(id = %base.id, error = %e, "skipping image");
            }
        }
    }

    bitmaps
}

/// Build the `^GFA` fragment cache consumed by
/// [`CompileOptions::image_cache`](crate::document::CompileOptions::image_cache).
pub async fn build_image_cache(
    elements: &[DesignElement],
    canvas: &CanvasConfig,
    renderer: &dyn ImageRenderer,
) -> HashMap<String, String> {
    rasterize_images(elements, canvas, renderer)
        .await
        .into_iter()
        .map(|(id, bitmap)| (id, bitmap.to_graphic_field().to_string()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::{ElementBase, ImageElement};
    use std::io::Cursor;

    fn png_data_url(img: &RgbaImage) -> String {
        let mut bytes = Vec::new();
        DynamicImage::ImageRgba8(img.clone())
            .write_to(&mut Cursor::new(&mut bytes), image::ImageFormat::Png)
            .unwrap();
        format!(
            "data:image/png;base64,{}",
            base64::engine::general_purpose::STANDARD.encode(&bytes)
        )
    }

    fn image_element(id: &str, src: &str, width: f64, height: f64) -> DesignElement {
        DesignElement::new(
            ElementBase::new(id, 0.0, 0.0, width, height),
            ElementKind::Image(ImageElement {
                src: src.into(),
                alt: None,
            }),
        )
    }

    /// White with the top-left dot black; fails for sources starting with "bad".
    struct SolidRenderer;

    #[async_trait]
    impl ImageRenderer for SolidRenderer {
        async fn render(
            &self,
            src: &str,
            width: u32,
            height: u32,
        ) -> Result<RgbaImage, LabelError> {
            if src.starts_with("bad") {
                return Err(LabelError::Image(format!("cannot load {}", src)));
            }
            let mut img = RgbaImage::from_pixel(width, height, Rgba([255, 255, 255, 255]));
            img.put_pixel(0, 0, Rgba([0, 0, 0, 255]));
            Ok(img)
        }
    }

    #[test]
    fn test_decode_data_url() {
        assert_eq!(decode_data_url("data:text/plain;base64,aGk=").unwrap(), b"hi");
        assert_eq!(decode_data_url("data:text/plain,hi").unwrap(), b"hi");
        assert!(decode_data_url("data:nocomma").is_err());
        assert!(decode_data_url("data:image/png;base64,!!!").is_err());
    }

    #[test]
    fn test_fit_onto_white_min_size() {
        let img = DynamicImage::ImageRgba8(RgbaImage::from_pixel(4, 4, Rgba([0, 0, 0, 255])));
        let out = fit_onto_white(&img, 0, 0);
        assert_eq!(out.dimensions(), (1, 1));
    }

    #[test]
    fn test_fit_onto_white_fills_transparency() {
        let img = DynamicImage::ImageRgba8(RgbaImage::from_pixel(2, 2, Rgba([0, 0, 0, 0])));
        let out = fit_onto_white(&img, 2, 2);
        assert_eq!(out.get_pixel(0, 0), &Rgba([255, 255, 255, 255]));
    }

    #[test]
    fn test_orient_dimensions() {
        let img = RgbaImage::new(3, 2);
        assert_eq!(orient(img.clone(), Orientation::Normal).dimensions(), (3, 2));
        assert_eq!(orient(img.clone(), Orientation::Rotated).dimensions(), (2, 3));
        assert_eq!(orient(img.clone(), Orientation::Inverted).dimensions(), (3, 2));
        assert_eq!(orient(img, Orientation::Bottom).dimensions(), (2, 3));
    }

    #[tokio::test]
    async fn test_data_url_image_cache() {
        let black = RgbaImage::from_pixel(4, 4, Rgba([0, 0, 0, 255]));
        let src = png_data_url(&black);
        let canvas = CanvasConfig::new(58.0, 40.0);
        // 1mm × 0.25mm at 203 dpi → 8 × 2 dots
        let elements = vec![image_element("logo", &src, 1.0, 0.25)];

        let renderer = DefaultRenderer::new().unwrap();
        let cache = build_image_cache(&elements, &canvas, &renderer).await;
        assert_eq!(cache.get("logo").map(String::as_str), Some("0,2,1,2,ffff"));
    }

    #[tokio::test]
    async fn test_failures_are_isolated() {
        let canvas = CanvasConfig::new(58.0, 40.0);
        let elements = vec![
            image_element("ok", "good.png", 1.0, 1.0),
            image_element("broken", "bad.png", 1.0, 1.0),
            image_element("empty", "", 1.0, 1.0),
        ];
        let bitmaps = rasterize_images(&elements, &canvas, &SolidRenderer).await;
        assert_eq!(bitmaps.len(), 1);
        assert!(bitmaps.contains_key("ok"));
    }

    #[tokio::test]
    async fn test_undecodable_image_skipped() {
        let canvas = CanvasConfig::new(58.0, 40.0);
        let elements = vec![image_element("x", "data:image/png;base64,aGk=", 1.0, 1.0)];
        let renderer = DefaultRenderer::new().unwrap();
        assert!(build_image_cache(&elements, &canvas, &renderer).await.is_empty());
    }

    #[tokio::test]
    async fn test_rotation_applied() {
        let canvas = CanvasConfig::new(58.0, 40.0);
        let mut element = image_element("r", "good.png", 2.0, 1.0);
        element.base.rotation = 90.0;
        let bitmaps = rasterize_images(&[element], &canvas, &SolidRenderer).await;
        let bitmap = &bitmaps["r"];
        // 16×8 rendered, then turned to 8×16 with the marked dot at top-right
        assert_eq!((bitmap.width, bitmap.height), (8, 16));
        assert!(bitmap.is_set(7, 0));
        assert!(!bitmap.is_set(0, 0));
    }
}
